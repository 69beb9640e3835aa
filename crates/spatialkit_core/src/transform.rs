//! Transform engine: TRS state with a dirty-cached world matrix
//!
//! A [`Transform`] stores position, scale, and rotation, plus a cached
//! composed matrix guarded by a dirty flag. Setters only write fields and
//! mark the flag; [`Transform::update`] is the single place the matrix is
//! recomputed, so a frame that never reads the matrix never pays for the
//! composition.

use spatialkit_math::{quat_lookat, Mat4, Quat, Vec3, FORWARD};

/// Position, scale, and rotation with a lazily recomputed matrix
///
/// The cached matrix is `translation * rotation * scale` in glam's
/// column-major convention (scale applied first, translation last; a point
/// transforms as `M * p`). Invariant: the cache is mathematically equal to
/// that composition whenever the dirty flag is clear.
#[derive(Clone, Copy, Debug)]
pub struct Transform {
    position: Vec3,
    scale: Vec3,
    rotation: Quat,
    dirty: bool,
    matrix: Mat4,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform {
    /// Create an identity transform
    ///
    /// The cache starts valid (identity matrix, dirty flag clear).
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
            rotation: Quat::IDENTITY,
            dirty: false,
            matrix: Mat4::IDENTITY,
        }
    }

    /// Create a transform at the given position
    pub fn from_position(position: Vec3) -> Self {
        let mut t = Self::new();
        t.set_position(position);
        t
    }

    /// Overwrite position, scale, and rotation at once
    pub fn set(&mut self, position: Vec3, scale: Vec3, rotation: Quat) {
        self.position = position;
        self.scale = scale;
        self.rotation = rotation;
        self.dirty = true;
    }

    /// Set the position and mark the matrix stale
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.dirty = true;
    }

    /// Set the scale and mark the matrix stale
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.dirty = true;
    }

    /// Set the rotation and mark the matrix stale
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
        self.dirty = true;
    }

    /// The stored position, verbatim
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// The stored scale, verbatim
    #[inline]
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// The stored rotation, verbatim
    #[inline]
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Whether the cached matrix is stale
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The direction this transform faces (-Z forward)
    pub fn forward(&self) -> Vec3 {
        self.rotation * FORWARD
    }

    /// Rotate so the forward axis points from `position` toward `target`
    ///
    /// Keeps the current rotation when the target is degenerate (at the
    /// position itself, or straight along the up axis).
    pub fn lookat(&mut self, target: Vec3) {
        if let Some(rotation) = quat_lookat(self.position, target) {
            self.rotation = rotation;
            self.dirty = true;
        }
    }

    /// Recompute the matrix if stale, then return it
    ///
    /// This is the sole valid path to the composed matrix; calling it twice
    /// without a mutation in between returns bit-identical results and only
    /// composes once.
    pub fn update(&mut self) -> Mat4 {
        if self.dirty {
            self.matrix =
                Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position);
            self.dirty = false;
        }
        self.matrix
    }

    /// Transform a point from local space into world space
    pub fn local_to_world(&mut self, local: Vec3) -> Vec3 {
        self.update().transform_point3(local)
    }

    /// Transform a point from world space into local space
    ///
    /// Uses the general affine inverse, so non-uniform scale is handled; the
    /// transform must be invertible (no zero scale axis).
    pub fn world_to_local(&mut self, world: Vec3) -> Vec3 {
        self.update().inverse().transform_point3(world)
    }

    /// Transform a direction from local into world space (no translation)
    pub fn local_to_world_dir(&mut self, local_dir: Vec3) -> Vec3 {
        self.update().transform_vector3(local_dir)
    }

    /// Transform a direction from world into local space (no translation)
    pub fn world_to_local_dir(&mut self, world_dir: Vec3) -> Vec3 {
        self.update().inverse().transform_vector3(world_dir)
    }
}
