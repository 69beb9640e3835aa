//! Texture assets: pixel data and sampler options
//!
//! Texture payloads keep a CPU copy of their pixels; the external GPU
//! backend uploads from it and clears the dirty flags. Render-target and
//! depth usage is expressed through [`TexType`] flags but the GPU objects
//! themselves live outside this crate.

use bitflags::bitflags;
use spatialkit_math::Color32;

use crate::assets::Assets;
use crate::error::AssetError;
use crate::loader::TextureLoader;

slotmap::new_key_type! {
    /// Handle to a texture in the asset registry
    pub struct TextureId;
}

bitflags! {
    /// What a texture is used for
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct TexType: u32 {
        /// A sampled image without mipmaps
        const IMAGE_NOMIPS = 1 << 0;
        /// A cubemap (six faces)
        const CUBEMAP = 1 << 1;
        /// Renderable target
        const RENDERTARGET = 1 << 2;
        /// Depth buffer
        const DEPTH = 1 << 3;
        /// Has (or wants) mipmaps
        const MIPS = 1 << 4;
        /// Updated frequently from the CPU
        const DYNAMIC = 1 << 5;
        /// A standard sampled image with mipmaps
        const IMAGE = Self::IMAGE_NOMIPS.bits() | Self::MIPS.bits();
    }
}

bitflags! {
    /// Which parts of a texture changed since the GPU last saw it
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct TextureDirty: u8 {
        /// Pixel contents changed
        const PIXELS = 1 << 0;
        /// Sampler options changed
        const OPTIONS = 1 << 1;
    }
}

/// Pixel format of a texture
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TexFormat {
    /// 8 bits per channel RGBA
    #[default]
    Rgba32,
    /// 16 bits per channel RGBA
    Rgba64,
    /// 32-bit float per channel RGBA
    Rgba128,
    /// Combined depth + stencil
    DepthStencil,
    /// 32-bit depth
    Depth32,
    /// 16-bit depth
    Depth16,
}

/// Sampling filter for a texture
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TexSample {
    /// Bilinear filtering
    #[default]
    Linear,
    /// Nearest-neighbor filtering
    Point,
    /// Anisotropic filtering
    Anisotropic,
}

/// Addressing mode outside the 0..1 uv range
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TexAddress {
    /// Repeat the texture
    #[default]
    Wrap,
    /// Clamp to the edge pixel
    Clamp,
    /// Mirror on each repeat
    Mirror,
}

/// A texture payload: pixels plus sampler state
#[derive(Clone, Debug)]
pub struct Texture {
    kind: TexType,
    format: TexFormat,
    sample: TexSample,
    address: TexAddress,
    anisotropy: i32,
    width: u32,
    height: u32,
    pixels: Vec<Color32>,
    dirty: TextureDirty,
}

impl Texture {
    pub(crate) fn new(kind: TexType, format: TexFormat) -> Self {
        Self {
            kind,
            format,
            sample: TexSample::default(),
            address: TexAddress::default(),
            anisotropy: 4,
            width: 0,
            height: 0,
            pixels: Vec::new(),
            dirty: TextureDirty::empty(),
        }
    }

    /// Usage flags for this texture
    pub fn kind(&self) -> TexType {
        self.kind
    }

    /// Pixel format
    pub fn format(&self) -> TexFormat {
        self.format
    }

    /// Sampling filter
    pub fn sample(&self) -> TexSample {
        self.sample
    }

    /// Addressing mode
    pub fn address(&self) -> TexAddress {
        self.address
    }

    /// Anisotropy level (only meaningful with [`TexSample::Anisotropic`])
    pub fn anisotropy(&self) -> i32 {
        self.anisotropy
    }

    /// Width in pixels (0 until pixels are set)
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels (0 until pixels are set)
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width / height, or 1.0 before pixels are set
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    /// The CPU copy of the pixel data, row-major
    pub fn pixels(&self) -> &[Color32] {
        &self.pixels
    }

    /// What the GPU backend still needs to re-upload
    pub fn dirty(&self) -> TextureDirty {
        self.dirty
    }

    /// Called by the GPU backend once uploads are done
    pub fn clear_dirty(&mut self) {
        self.dirty = TextureDirty::empty();
    }
}

impl Assets {
    /// Register a new texture under `id` with the given type and format
    pub fn tex_create(
        &mut self,
        id: &str,
        kind: TexType,
        format: TexFormat,
    ) -> Result<TextureId, AssetError> {
        self.textures.create(id, Texture::new(kind, format))
    }

    /// Load a texture from a file through an external decoder
    ///
    /// The file path doubles as the asset id, so loading the same file twice
    /// without a `tex_find` guard is a duplicate-id error. On decode failure
    /// nothing is registered.
    pub fn tex_create_file(
        &mut self,
        path: &str,
        loader: &dyn TextureLoader,
    ) -> Result<TextureId, AssetError> {
        let data = loader.load(path.as_ref())?;
        let tex = self.tex_create(path, TexType::IMAGE, TexFormat::Rgba32)?;
        self.tex_set_colors(tex, data.width, data.height, &data.pixels);
        log::info!("loaded texture '{}' ({}x{})", path, data.width, data.height);
        Ok(tex)
    }

    /// Look up a texture by id, taking a new reference on hit
    pub fn tex_find(&mut self, id: &str) -> Option<TextureId> {
        self.textures.find(id)
    }

    /// Drop one reference to a texture
    pub fn tex_release(&mut self, tex: TextureId) {
        self.textures.release(tex);
    }

    /// Read access to a texture payload
    pub fn texture(&self, tex: TextureId) -> Option<&Texture> {
        self.textures.get(tex)
    }

    /// Current reference count of a texture handle
    pub fn tex_ref_count(&self, tex: TextureId) -> Option<u32> {
        self.textures.ref_count(tex)
    }

    /// Replace a texture's pixel contents
    ///
    /// `pixels` must hold `width * height` entries, row-major.
    pub fn tex_set_colors(&mut self, tex: TextureId, width: u32, height: u32, pixels: &[Color32]) {
        assert_eq!(
            pixels.len(),
            (width * height) as usize,
            "pixel data does not match {}x{}",
            width,
            height
        );
        let t = self.textures.payload_mut(tex);
        t.width = width;
        t.height = height;
        t.pixels.clear();
        t.pixels.extend_from_slice(pixels);
        t.dirty |= TextureDirty::PIXELS;
    }

    /// Set sampler options
    pub fn tex_set_options(
        &mut self,
        tex: TextureId,
        sample: TexSample,
        address: TexAddress,
        anisotropy: i32,
    ) {
        let t = self.textures.payload_mut(tex);
        t.sample = sample;
        t.address = address;
        t.anisotropy = anisotropy;
        t.dirty |= TextureDirty::OPTIONS;
    }

    /// Clear a texture's GPU dirty flags (for the external backend)
    pub fn tex_clear_dirty(&mut self, tex: TextureId) {
        self.textures.payload_mut(tex).clear_dirty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{TextureData, TextureLoader};
    use std::path::Path;

    struct SolidLoader(Color32);

    impl TextureLoader for SolidLoader {
        fn load(&self, _path: &Path) -> Result<TextureData, AssetError> {
            Ok(TextureData {
                width: 2,
                height: 2,
                pixels: vec![self.0; 4],
            })
        }
    }

    struct FailingLoader;

    impl TextureLoader for FailingLoader {
        fn load(&self, path: &Path) -> Result<TextureData, AssetError> {
            Err(AssetError::Decode(format!("unreadable: {}", path.display())))
        }
    }

    #[test]
    fn test_create_defaults() {
        let mut assets = Assets::new();
        let tex = assets
            .tex_create("t", TexType::IMAGE, TexFormat::Rgba32)
            .unwrap();
        let t = assets.texture(tex).unwrap();
        assert_eq!(t.kind(), TexType::IMAGE);
        assert_eq!(t.sample(), TexSample::Linear);
        assert_eq!(t.address(), TexAddress::Wrap);
        assert_eq!(t.width(), 0);
        assert_eq!(t.aspect(), 1.0);
    }

    #[test]
    fn test_set_colors() {
        let mut assets = Assets::new();
        let tex = assets
            .tex_create("t", TexType::IMAGE, TexFormat::Rgba32)
            .unwrap();
        assets.tex_set_colors(tex, 2, 2, &[Color32::WHITE; 4]);

        let t = assets.texture(tex).unwrap();
        assert_eq!(t.width(), 2);
        assert_eq!(t.height(), 2);
        assert_eq!(t.pixels().len(), 4);
        assert!(t.dirty().contains(TextureDirty::PIXELS));
    }

    #[test]
    #[should_panic(expected = "does not match")]
    fn test_set_colors_size_mismatch_panics() {
        let mut assets = Assets::new();
        let tex = assets
            .tex_create("t", TexType::IMAGE, TexFormat::Rgba32)
            .unwrap();
        assets.tex_set_colors(tex, 4, 4, &[Color32::WHITE; 4]);
    }

    #[test]
    fn test_set_options_marks_dirty() {
        let mut assets = Assets::new();
        let tex = assets
            .tex_create("t", TexType::IMAGE, TexFormat::Rgba32)
            .unwrap();
        assets.tex_set_options(tex, TexSample::Point, TexAddress::Clamp, 1);

        let t = assets.texture(tex).unwrap();
        assert_eq!(t.sample(), TexSample::Point);
        assert_eq!(t.address(), TexAddress::Clamp);
        assert_eq!(t.anisotropy(), 1);
        assert!(t.dirty().contains(TextureDirty::OPTIONS));
    }

    #[test]
    fn test_create_file_success() {
        let mut assets = Assets::new();
        let tex = assets
            .tex_create_file("floor.png", &SolidLoader(Color32::GRAY))
            .unwrap();
        assert_eq!(assets.texture(tex).unwrap().width(), 2);
        // Path doubles as the id
        let found = assets.tex_find("floor.png").unwrap();
        assert_eq!(found, tex);
    }

    #[test]
    fn test_create_file_failure_registers_nothing() {
        let mut assets = Assets::new();
        let result = assets.tex_create_file("missing.png", &FailingLoader);
        assert!(result.is_err());
        assert!(assets.is_empty());
        assert!(assets.tex_find("missing.png").is_none());
    }
}
