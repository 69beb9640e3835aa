//! Position + orientation pairs
//!
//! A [`Pose`] is how tracked hardware reports where something is: hand
//! joints, the wrist, the head. It carries no scale.

use glam::{Mat4, Quat, Vec3};

use crate::FORWARD;

/// A position and orientation in world space
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose {
    /// Position in meters
    pub position: Vec3,
    /// Orientation as a unit quaternion
    pub orientation: Quat,
}

impl Pose {
    /// The identity pose: origin, no rotation
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    /// Create a pose from position and orientation
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self { position, orientation }
    }

    /// The direction this pose is facing (-Z forward)
    pub fn forward(&self) -> Vec3 {
        self.orientation * FORWARD
    }

    /// Convert to a rotation + translation matrix (no scale)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position)
    }
}
