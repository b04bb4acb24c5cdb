//! Turtle state and operations for tree interpretation.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// The state of the tree-building turtle.
///
/// Orientation is kept as two Euler-style angles in degrees rather than a
/// quaternion: `angle_z` tilts the heading away from `+Y` towards `+X`, and
/// `angle_x` swings it from `+Y` towards `+Z`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeTurtleState {
    /// Current world-space position of the "cursor".
    pub position: Vec3,

    /// Tilt around Z, in degrees (`+` / `-`).
    pub angle_z: f32,

    /// Tilt around X, in degrees (`|` / `/`).
    pub angle_x: f32,

    /// One more than the number of open brackets. Branch radius is
    /// `step_length / level`.
    pub level: u32,
}

impl Default for TreeTurtleState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            angle_z: 0.0,
            angle_x: 0.0,
            level: 1,
        }
    }
}

impl TreeTurtleState {
    /// Unit heading derived from the two angles.
    ///
    /// `(sin z, cos z * cos x, cos z * sin x)`, which is `+Y` when both angles
    /// are zero.
    pub fn heading(&self) -> Vec3 {
        let (sin_z, cos_z) = self.angle_z.to_radians().sin_cos();
        let (sin_x, cos_x) = self.angle_x.to_radians().sin_cos();
        Vec3::new(sin_z, cos_z * cos_x, cos_z * sin_x)
    }

    /// Snapshot of everything a `[` saves.
    pub fn save(&self) -> SavedState {
        SavedState {
            position: self.position,
            angle_z: self.angle_z,
            angle_x: self.angle_x,
        }
    }

    /// Restores a snapshot. The nesting level is left to the caller.
    pub fn restore(&mut self, saved: SavedState) {
        self.position = saved.position;
        self.angle_z = saved.angle_z;
        self.angle_x = saved.angle_x;
    }
}

/// Position and orientation stored on the branch stack.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedState {
    pub position: Vec3,
    pub angle_z: f32,
    pub angle_x: f32,
}

/// Operations that can be performed by the tree turtle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreeOp {
    /// Draw a branch segment and advance (`F`, `J`).
    Branch,
    /// Maybe place a leaf (`l`).
    Leaf,
    /// Maybe place a fruit (`a`).
    Fruit,
    /// Adjust `angle_z` by one turn in the given direction (`+` / `-`).
    Yaw(i8),
    /// Adjust `angle_x` by one turn in the given direction (`|` / `/`).
    Pitch(i8),
    /// Save position and heading (`[`).
    Push,
    /// Restore the most recently pushed state (`]`).
    Pop,
    /// No-op: symbol has no turtle meaning.
    Ignore,
}

impl TreeOp {
    /// The fixed turtle alphabet. Anything else is [`TreeOp::Ignore`].
    pub fn from_symbol(symbol: char) -> Self {
        match symbol {
            'F' | 'J' => TreeOp::Branch,
            'l' => TreeOp::Leaf,
            'a' => TreeOp::Fruit,
            '+' => TreeOp::Yaw(1),
            '-' => TreeOp::Yaw(-1),
            '|' => TreeOp::Pitch(1),
            '/' => TreeOp::Pitch(-1),
            '[' => TreeOp::Push,
            ']' => TreeOp::Pop,
            _ => TreeOp::Ignore,
        }
    }

    /// Standard symbol strings paired with their operations.
    pub const STANDARD_SYMBOLS: [(&'static str, TreeOp); 10] = [
        ("F", TreeOp::Branch),
        ("J", TreeOp::Branch),
        ("l", TreeOp::Leaf),
        ("a", TreeOp::Fruit),
        ("+", TreeOp::Yaw(1)),
        ("-", TreeOp::Yaw(-1)),
        ("|", TreeOp::Pitch(1)),
        ("/", TreeOp::Pitch(-1)),
        ("[", TreeOp::Push),
        ("]", TreeOp::Pop),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_is_up_by_default() {
        assert_eq!(TreeTurtleState::default().heading(), Vec3::Y);
    }

    #[test]
    fn heading_follows_both_angles() {
        let turtle = TreeTurtleState {
            angle_z: 90.0,
            ..Default::default()
        };
        assert!(turtle.heading().abs_diff_eq(Vec3::X, 1e-6));

        let turtle = TreeTurtleState {
            angle_x: 90.0,
            ..Default::default()
        };
        assert!(turtle.heading().abs_diff_eq(Vec3::Z, 1e-6));
    }

    #[test]
    fn decodes_alphabet() {
        assert_eq!(TreeOp::from_symbol('J'), TreeOp::Branch);
        assert_eq!(TreeOp::from_symbol('/'), TreeOp::Pitch(-1));
        assert_eq!(TreeOp::from_symbol('L'), TreeOp::Ignore);
        for (sym, op) in TreeOp::STANDARD_SYMBOLS {
            assert_eq!(TreeOp::from_symbol(sym.chars().next().unwrap()), op);
        }
    }
}
