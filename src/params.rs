//! Per-request generation parameters.

use crate::error::TreeError;
use serde::{Deserialize, Serialize};

/// The knobs a host exposes for one generation request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParams {
    /// Number of rewrite iterations. Must be at least 1.
    pub iterations: u32,
    /// Length of one `F` segment; also the trunk radius at nesting level 1.
    pub step_length: f32,
    /// Angle (degrees) applied by each turn symbol.
    pub turn_angle_degrees: f32,
    /// Multiplier on leaf size.
    pub leaf_scale: f32,
    pub leaves_enabled: bool,
    pub apples_enabled: bool,
    /// Adds `l -> ll` before expansion, roughly doubling foliage.
    pub leaf_thickened: bool,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            iterations: 4,
            step_length: 0.6,
            turn_angle_degrees: 25.0,
            leaf_scale: 1.2,
            leaves_enabled: true,
            apples_enabled: false,
            leaf_thickened: false,
        }
    }
}

impl GenerationParams {
    /// Rejects out-of-range values. Nothing is clamped.
    pub fn validate(&self) -> Result<(), TreeError> {
        if self.iterations < 1 {
            return Err(TreeError::InvalidParams {
                field: "iterations",
                reason: "must be at least 1",
            });
        }
        positive("step_length", self.step_length)?;
        positive("turn_angle_degrees", self.turn_angle_degrees)?;
        positive("leaf_scale", self.leaf_scale)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TreeError> {
    if !value.is_finite() {
        return Err(TreeError::InvalidParams {
            field,
            reason: "must be finite",
        });
    }
    if value <= 0.0 {
        return Err(TreeError::InvalidParams {
            field,
            reason: "must be greater than zero",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(GenerationParams::default().validate().is_ok());
    }

    #[test]
    fn rejects_each_bad_field() {
        let cases = [
            (
                GenerationParams {
                    iterations: 0,
                    ..Default::default()
                },
                "iterations",
            ),
            (
                GenerationParams {
                    step_length: 0.0,
                    ..Default::default()
                },
                "step_length",
            ),
            (
                GenerationParams {
                    turn_angle_degrees: -25.0,
                    ..Default::default()
                },
                "turn_angle_degrees",
            ),
            (
                GenerationParams {
                    leaf_scale: f32::NAN,
                    ..Default::default()
                },
                "leaf_scale",
            ),
        ];
        for (params, expected) in cases {
            match params.validate() {
                Err(TreeError::InvalidParams { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected InvalidParams for {expected}, got {other:?}"),
            }
        }
    }
}
