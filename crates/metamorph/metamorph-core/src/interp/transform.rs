use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use super::functions::{lerp_vec3, slerp_rotation};
use super::Interpolator;

/// Rigid transform: position plus orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: UnitQuaternion<f32>,
}

impl Transform {
    pub fn new(position: Vector3<f32>, rotation: UnitQuaternion<f32>) -> Self {
        Self { position, rotation }
    }

    pub fn identity() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
        }
    }

    pub fn from_position(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vector3::new(x, y, z),
            rotation: UnitQuaternion::identity(),
        }
    }

    /// Orientation from roll/pitch/yaw in radians, positioned at the origin.
    pub fn from_euler_angles(roll: f32, pitch: f32, yaw: f32) -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: UnitQuaternion::from_euler_angles(roll, pitch, yaw),
        }
    }

    pub fn with_rotation(mut self, rotation: UnitQuaternion<f32>) -> Self {
        self.rotation = rotation;
        self
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Lerps positions and slerps orientations, independently.
#[derive(Debug, Clone, Default)]
pub struct TransformInterpolator {
    current: Transform,
}

impl TransformInterpolator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Interpolator<Transform> for TransformInterpolator {
    fn morph(&mut self, from: &Transform, to: &Transform, scaling: f32) {
        self.current.position = lerp_vec3(&from.position, &to.position, scaling);
        self.current.rotation = slerp_rotation(&from.rotation, &to.rotation, scaling);
    }

    #[inline]
    fn object(&self) -> &Transform {
        &self.current
    }
}
