//! RGBA color types
//!
//! [`Color32`] is the 8-bit-per-channel form used for vertex colors and
//! texture pixels; [`Color128`] is the float form used for shader
//! parameters and lighting. Both are Pod so the external renderer can
//! upload them directly.

use bytemuck::{Pod, Zeroable};

/// An 8-bit-per-channel RGBA color
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Color32 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color32 {
    /// Opaque white
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque black
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Middle gray, for shader defaults
    pub const GRAY: Self = Self::new(128, 128, 128, 255);

    /// Create a color from raw channel values
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to the float representation
    pub fn to_color128(self) -> Color128 {
        Color128::new(
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            f32::from(self.a) / 255.0,
        )
    }
}

/// A float-per-channel RGBA color (linear space)
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Color128 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color128 {
    /// Opaque white
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque black
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Create a color from raw channel values
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to the 8-bit representation, clamping each channel
    pub fn to_color32(self) -> Color32 {
        let to_byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color32::new(to_byte(self.r), to_byte(self.g), to_byte(self.b), to_byte(self.a))
    }
}
