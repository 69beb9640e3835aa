//! Font assets: a glyph atlas texture plus width metrics
//!
//! Rasterization happens in the [`FontLoader`](crate::loader::FontLoader);
//! the payload only keeps what text layout needs: the atlas handle and the
//! width-to-height ratio of each glyph.

use std::collections::HashMap;

use crate::assets::Assets;
use crate::error::AssetError;
use crate::loader::FontLoader;
use crate::texture::{TexFormat, TexType, TextureId};

slotmap::new_key_type! {
    /// Handle to a font in the asset registry
    pub struct FontId;
}

/// A font payload
pub struct Font {
    atlas: TextureId,
    glyph_aspects: HashMap<char, f32>,
    default_aspect: f32,
}

impl Font {
    /// The glyph atlas texture; the font holds a reference on it
    pub fn atlas(&self) -> TextureId {
        self.atlas
    }

    /// Width-to-height ratio of a glyph at height 1.0
    pub fn glyph_aspect(&self, ch: char) -> f32 {
        self.glyph_aspects
            .get(&ch)
            .copied()
            .unwrap_or(self.default_aspect)
    }
}

impl Assets {
    /// Load a font from a file through an external rasterizer
    ///
    /// The path doubles as the asset id. The atlas is registered as a
    /// texture under `"{path}/atlas"` with the font holding its only
    /// initial reference.
    pub fn font_create_file(
        &mut self,
        path: &str,
        loader: &dyn FontLoader,
    ) -> Result<FontId, AssetError> {
        let data = loader.load(path.as_ref())?;
        let glyph_count = data.glyph_aspects.len();

        let atlas_id = format!("{}/atlas", path);
        let atlas = self.tex_create(&atlas_id, TexType::IMAGE, TexFormat::Rgba32)?;
        self.tex_set_colors(atlas, data.atlas.width, data.atlas.height, &data.atlas.pixels);

        let font = match self.fonts.create(
            path,
            Font {
                atlas,
                glyph_aspects: data.glyph_aspects,
                default_aspect: data.default_aspect,
            },
        ) {
            Ok(font) => font,
            Err(err) => {
                // Roll the atlas back so a duplicate-id font leaves no orphan
                self.tex_release(atlas);
                return Err(err);
            }
        };
        log::info!("loaded font '{}' ({} glyphs)", path, glyph_count);
        Ok(font)
    }

    /// Look up a font by id, taking a new reference on hit
    pub fn font_find(&mut self, id: &str) -> Option<FontId> {
        self.fonts.find(id)
    }

    /// Drop one reference to a font
    ///
    /// When this frees the font, its reference on the atlas texture is
    /// dropped as well.
    pub fn font_release(&mut self, font: FontId) {
        if let Some(payload) = self.fonts.release(font) {
            self.tex_release(payload.atlas);
        }
    }

    /// Read access to a font payload
    pub fn font(&self, font: FontId) -> Option<&Font> {
        self.fonts.get(font)
    }

    /// Current reference count of a font handle
    pub fn font_ref_count(&self, font: FontId) -> Option<u32> {
        self.fonts.ref_count(font)
    }

    /// The atlas texture of a font
    pub fn font_get_tex(&self, font: FontId) -> Option<TextureId> {
        self.fonts.get(font).map(Font::atlas)
    }
}
