//! Output geometry: branch, leaf and fruit records grouped into a [`TreeModel`].

use bevy_heavy::ComputeMassProperties3d as _;
use bevy_math::primitives::{Cylinder, Sphere};
use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// The complete, engine-agnostic geometry of one generated tree.
///
/// Records are stored in emission order, one sequence per rendering group.
/// A host turns branches into cylinders and leaves/fruit into placed proxies.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeModel {
    pub branches: Vec<Branch>,
    pub leaves: Vec<Leaf>,
    pub fruits: Vec<Fruit>,
}

/// One straight trunk or twig segment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    /// Base of the segment.
    pub start: Vec3,
    /// Unit growth direction.
    pub direction: Vec3,
    pub length: f32,
    /// `step_length / level`; thinner the deeper the branch is nested.
    pub radius: f32,
    /// Nesting level the segment was drawn at.
    pub level: u32,
    /// Length variance drawn in `[0.7, 1.2]`. Not applied to the geometry;
    /// renderers may scale by it for visual variety.
    pub jitter: f32,
}

impl Branch {
    pub fn end(&self) -> Vec3 {
        self.start + self.direction * self.length
    }

    pub fn center(&self) -> Vec3 {
        self.start + self.direction * (self.length / 2.0)
    }

    /// Rotation taking a Y-aligned cylinder onto this branch.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_arc(Vec3::Y, self.direction)
    }

    /// Center and rotation of the segment as a Y-aligned cylinder.
    pub fn transform(&self) -> (Vec3, Quat) {
        (self.center(), self.rotation())
    }

    pub fn cylinder(&self) -> Cylinder {
        Cylinder::new(self.radius, self.length)
    }
}

/// A leaf placement.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Leaf {
    pub position: Vec3,
    /// Uniform scale applied to the host's leaf proxy.
    pub scale: f32,
    pub rotation: LeafRotation,
}

/// Random orientation of a leaf, in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeafRotation {
    /// Rotation about X, within `[-60, 60]`.
    pub roll: f32,
    /// Rotation about Y, within `[0, 360]`.
    pub yaw: f32,
}

impl LeafRotation {
    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.roll.to_radians(), self.yaw.to_radians(), 0.0)
    }
}

/// A fruit placement. Positions already include the downward hang offset.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fruit {
    pub position: Vec3,
    pub scale: f32,
}

impl Fruit {
    /// Bounding sphere of the fruit, treating `scale` as its radius.
    pub fn sphere(&self) -> Sphere {
        Sphere::new(self.scale)
    }
}

/// Record counts, used by hosts to decide which groups to create.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    pub branches: usize,
    pub leaves: usize,
    pub fruits: usize,
}

/// The three rendering groups a model maps onto.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupKind {
    Tree,
    Leaves,
    Apples,
}

impl GroupKind {
    pub fn name(self) -> &'static str {
        match self {
            GroupKind::Tree => "tree",
            GroupKind::Leaves => "leaves",
            GroupKind::Apples => "apples",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeGroup {
    pub kind: GroupKind,
    pub members: usize,
}

impl TreeGroup {
    pub fn is_empty(&self) -> bool {
        self.members == 0
    }
}

impl TreeModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> TreeStats {
        TreeStats {
            branches: self.branches.len(),
            leaves: self.leaves.len(),
            fruits: self.fruits.len(),
        }
    }

    /// Groups in host creation order: tree, leaves, apples.
    pub fn groups(&self) -> [TreeGroup; 3] {
        let stats = self.stats();
        [
            TreeGroup {
                kind: GroupKind::Tree,
                members: stats.branches,
            },
            TreeGroup {
                kind: GroupKind::Leaves,
                members: stats.leaves,
            },
            TreeGroup {
                kind: GroupKind::Apples,
                members: stats.fruits,
            },
        ]
    }

    /// Total mass of all branch cylinders at `density` (kg/m³).
    ///
    /// Overlap at joints is not subtracted.
    pub fn wood_mass(&self, density: f32) -> f32 {
        self.branches
            .iter()
            .map(|b| b.cylinder().mass(density))
            .sum()
    }

    pub fn fruit_mass(&self, density: f32) -> f32 {
        self.fruits.iter().map(|f| f.sphere().mass(density)).sum()
    }

    /// Axis-aligned bounds of every placement, or `None` for an empty model.
    ///
    /// Branch radius is ignored; only segment endpoints are included.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let points = self
            .branches
            .iter()
            .flat_map(|b| [b.start, b.end()])
            .chain(self.leaves.iter().map(|l| l.position))
            .chain(self.fruits.iter().map(|f| f.position));

        points.fold(None, |acc, p| match acc {
            None => Some((p, p)),
            Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trunk() -> Branch {
        Branch {
            start: Vec3::ZERO,
            direction: Vec3::Y,
            length: 2.0,
            radius: 0.5,
            level: 1,
            jitter: 1.0,
        }
    }

    #[test]
    fn branch_geometry() {
        let b = trunk();
        assert_eq!(b.end(), Vec3::new(0.0, 2.0, 0.0));
        let (center, rot) = b.transform();
        assert_eq!(center, Vec3::new(0.0, 1.0, 0.0));
        assert!(rot.abs_diff_eq(Quat::IDENTITY, 1e-6));
    }

    #[test]
    fn tilted_branch_rotation_maps_up_onto_direction() {
        let dir = Vec3::new(1.0, 1.0, 0.0).normalize();
        let b = Branch {
            direction: dir,
            ..trunk()
        };
        assert!((b.rotation() * Vec3::Y).abs_diff_eq(dir, 1e-5));
    }

    #[test]
    fn wood_mass_is_cylinder_volume_times_density() {
        let model = TreeModel {
            branches: vec![trunk(), trunk()],
            ..Default::default()
        };
        let expected = 2.0 * std::f32::consts::PI * 0.25 * 2.0 * 10.0;
        assert!((model.wood_mass(10.0) - expected).abs() < 1e-3);
    }

    #[test]
    fn empty_model_has_no_bounds_and_empty_groups() {
        let model = TreeModel::new();
        assert_eq!(model.bounds(), None);
        assert!(model.groups().iter().all(TreeGroup::is_empty));
    }

    #[test]
    fn bounds_cover_leaves_and_fruit() {
        let model = TreeModel {
            branches: vec![trunk()],
            leaves: vec![Leaf {
                position: Vec3::new(-1.0, 1.0, 0.5),
                scale: 1.0,
                rotation: LeafRotation { roll: 0.0, yaw: 0.0 },
            }],
            fruits: vec![Fruit {
                position: Vec3::new(0.0, -0.8, 0.0),
                scale: 0.1,
            }],
        };
        assert_eq!(
            model.bounds(),
            Some((Vec3::new(-1.0, -0.8, 0.0), Vec3::new(0.0, 2.0, 0.5)))
        );
    }
}
