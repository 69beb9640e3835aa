//! Decoder traits for file-backed assets
//!
//! The engine core never parses image, font, or model files itself; it asks
//! a caller-supplied loader to turn a path into plain CPU data and registers
//! the result. Backends plug in real decoders, tests plug in stubs.

use std::collections::HashMap;
use std::path::Path;

use spatialkit_math::Color32;

use crate::error::AssetError;
use crate::mesh::Vertex;

/// Decoded image data, row-major RGBA
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color32>,
}

/// Decoded mesh geometry
pub struct MeshData {
    pub verts: Vec<Vertex>,
    pub inds: Vec<u32>,
}

/// A rasterized font: glyph atlas plus per-glyph width metrics
pub struct FontData {
    /// The glyph atlas image
    pub atlas: TextureData,
    /// Width-to-height ratio per glyph
    pub glyph_aspects: HashMap<char, f32>,
    /// Ratio used for glyphs missing from the map
    pub default_aspect: f32,
}

/// Decodes an image file into pixel data
pub trait TextureLoader {
    fn load(&self, path: &Path) -> Result<TextureData, AssetError>;
}

/// Decodes and rasterizes a font file
pub trait FontLoader {
    fn load(&self, path: &Path) -> Result<FontData, AssetError>;
}

/// Decodes a model file into one mesh per subset
pub trait ModelLoader {
    fn load(&self, path: &Path) -> Result<Vec<MeshData>, AssetError>;
}
