//! Rays for pointer input and picking

use glam::Vec3;

/// A ray with an origin and (not necessarily normalized) direction
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Ray {
    /// Ray origin
    pub pos: Vec3,
    /// Ray direction
    pub dir: Vec3,
}

impl Ray {
    /// Create a ray from origin and direction
    pub fn new(pos: Vec3, dir: Vec3) -> Self {
        Self { pos, dir }
    }

    /// Point along the ray at parameter `t`
    pub fn at(&self, t: f32) -> Vec3 {
        self.pos + self.dir * t
    }

    /// Intersect with the plane through `plane_pt` with normal `plane_normal`
    ///
    /// Returns the ray parameter `t >= 0` on hit, or `None` when the ray is
    /// parallel to the plane or points away from it.
    pub fn intersect_plane(&self, plane_pt: Vec3, plane_normal: Vec3) -> Option<f32> {
        let denom = plane_normal.dot(self.dir);
        if denom.abs() < 1e-8 {
            return None;
        }
        let t = (plane_pt - self.pos).dot(plane_normal) / denom;
        (t >= 0.0).then_some(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -2.0));
        assert_eq!(ray.at(1.5), Vec3::new(0.0, 0.0, -3.0));
    }

    #[test]
    fn test_intersect_floor() {
        // Ray pointing down from (0, 5, 0) hits the Y=0 plane at t=5
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y);
        let t = ray.intersect_plane(Vec3::ZERO, Vec3::Y).unwrap();
        assert!((t - 5.0).abs() < 1e-6);
        assert!((ray.at(t) - Vec3::ZERO).length() < 1e-5);
    }

    #[test]
    fn test_intersect_parallel_misses() {
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::X);
        assert!(ray.intersect_plane(Vec3::ZERO, Vec3::Y).is_none());
    }

    #[test]
    fn test_intersect_behind_misses() {
        // Pointing up, away from the floor
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::Y);
        assert!(ray.intersect_plane(Vec3::ZERO, Vec3::Y).is_none());
    }
}
