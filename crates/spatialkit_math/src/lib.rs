//! Math support types for the spatialkit engine
//!
//! The heavy lifting (vectors, quaternions, matrices) comes from [`glam`],
//! which is re-exported here so downstream crates share one math vocabulary.
//! This crate adds the small spatial types the engine needs on top:
//!
//! - [`Pose`] - A position + orientation pair (hand joints, head, wrist)
//! - [`Ray`] - Origin + direction, for pointer rays
//! - [`Color32`] / [`Color128`] - 8-bit and float RGBA colors
//!
//! ## Conventions
//!
//! Right-handed coordinates, Y up, -Z forward. Matrices are column-major
//! (glam's convention) and compose translation * rotation * scale, so a
//! point transforms as `M * p`.

mod color;
mod pose;
mod ray;

pub use color::{Color128, Color32};
pub use pose::Pose;
pub use ray::Ray;

// Shared math vocabulary for the whole engine
pub use glam::{Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

/// The engine's forward axis (-Z, right-handed Y-up)
pub const FORWARD: Vec3 = Vec3::NEG_Z;
/// The engine's up axis
pub const UP: Vec3 = Vec3::Y;
/// The engine's right axis
pub const RIGHT: Vec3 = Vec3::X;

/// Build a rotation looking from `from` toward `at` (-Z forward, Y up)
///
/// Returns `None` when the direction is degenerate: zero length, or
/// parallel to the up axis (no unique roll).
pub fn quat_lookat(from: Vec3, at: Vec3) -> Option<Quat> {
    let forward = at - from;
    if forward.length_squared() < 1e-12 {
        return None;
    }
    let forward = forward.normalize();
    if forward.cross(UP).length_squared() < 1e-8 {
        return None;
    }
    let right = forward.cross(UP).normalize();
    let up = right.cross(forward).normalize();
    // Columns are the rotated basis vectors; forward maps to -Z
    Some(Quat::from_mat3(&Mat3::from_cols(right, up, -forward)))
}
