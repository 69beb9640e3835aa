//! Camera projection parameters

use spatialkit_math::Mat4;

/// Perspective camera parameters
///
/// The view matrix comes from a [`Transform`](crate::Transform) or head
/// pose; this type only owns the projection side.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub clip_near: f32,
    pub clip_far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov: 90.0,
            clip_near: 0.01,
            clip_far: 50.0,
        }
    }
}

impl Camera {
    /// Right-handed perspective projection for the given aspect ratio
    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), aspect, self.clip_near, self.clip_far)
    }
}
