//! Text styles and layout measurement
//!
//! A text style bundles a font, a character height in meters, a material,
//! and alignment. Styles live in a grow-only table on [`Assets`]; they are
//! cheap value handles and are never released individually, but each style
//! holds references on its font and material so those stay alive for as
//! long as the context does.

use bitflags::bitflags;
use spatialkit_math::Vec2;

use crate::assets::Assets;
use crate::font::FontId;
use crate::material::MaterialId;

bitflags! {
    /// How text is positioned relative to its anchor point
    ///
    /// Defaults (empty flags) are left-aligned, top-anchored.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct TextAlign: u32 {
        /// Center horizontally
        const X_CENTER = 1 << 1;
        /// Center vertically
        const Y_CENTER = 1 << 2;
        /// Right-align
        const X_RIGHT = 1 << 3;
        /// Anchor to the bottom
        const Y_BOTTOM = 1 << 4;
        /// Center both axes
        const CENTER = Self::X_CENTER.bits() | Self::Y_CENTER.bits();
    }
}

/// Index into the text style table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextStyleId(pub(crate) u32);

/// A text style: font, size, material, alignment
#[derive(Clone, Copy, Debug)]
pub struct TextStyle {
    pub font: FontId,
    /// Glyph height in meters
    pub char_height: f32,
    pub material: MaterialId,
    pub align: TextAlign,
}

impl Assets {
    /// Register a text style, taking references on its font and material
    pub fn text_make_style(
        &mut self,
        font: FontId,
        char_height: f32,
        material: MaterialId,
        align: TextAlign,
    ) -> TextStyleId {
        self.fonts.addref(font);
        self.materials.addref(material);
        self.text_styles.push(TextStyle {
            font,
            char_height,
            material,
            align,
        });
        TextStyleId(self.text_styles.len() as u32 - 1)
    }

    /// Read access to a text style
    pub fn text_style(&self, style: TextStyleId) -> Option<&TextStyle> {
        self.text_styles.get(style.0 as usize)
    }

    /// Measure the layout size of `text` in meters
    ///
    /// Newlines break lines; the width is the widest line. Glyph widths
    /// come from the font's aspect metrics.
    pub fn text_size(&self, style: TextStyleId, text: &str) -> Vec2 {
        let Some(style) = self.text_styles.get(style.0 as usize) else {
            return Vec2::ZERO;
        };
        let Some(font) = self.fonts.get(style.font) else {
            return Vec2::ZERO;
        };

        let mut widest = 0.0f32;
        let mut lines = 0u32;
        for line in text.split('\n') {
            lines += 1;
            let width: f32 = line
                .chars()
                .map(|ch| font.glyph_aspect(ch) * style.char_height)
                .sum();
            widest = widest.max(width);
        }
        Vec2::new(widest, lines as f32 * style.char_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::tests::StubFontLoader;

    fn style_fixture(assets: &mut Assets) -> TextStyleId {
        let font = assets.font_create_file("fonts/sans.ttf", &StubFontLoader).unwrap();
        let shader = assets.shader_create("font_shader", "code").unwrap();
        let material = assets.material_create("font_mat", shader).unwrap();
        let style = assets.text_make_style(font, 0.02, material, TextAlign::CENTER);
        assets.font_release(font);
        assets.shader_release(shader);
        assets.material_release(material);
        style
    }

    #[test]
    fn test_style_keeps_assets_alive() {
        let mut assets = Assets::new();
        let style = style_fixture(&mut assets);

        // Caller released everything; the style's references keep them live
        let s = *assets.text_style(style).unwrap();
        assert!(assets.font(s.font).is_some());
        assert!(assets.material(s.material).is_some());
        assert_eq!(s.align, TextAlign::CENTER);
    }

    #[test]
    fn test_size_uses_glyph_metrics() {
        let mut assets = Assets::new();
        let style = style_fixture(&mut assets);

        // Stub font: 'i' = 0.25, 'w' = 0.9, default = 0.5, height 0.02
        let size = assets.text_size(style, "iw");
        assert!((size.x - (0.25 + 0.9) * 0.02).abs() < 1e-6);
        assert!((size.y - 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_size_multiline() {
        let mut assets = Assets::new();
        let style = style_fixture(&mut assets);

        let size = assets.text_size(style, "ww\ni");
        // Width is the widest line, height covers both lines
        assert!((size.x - 1.8 * 0.02).abs() < 1e-6);
        assert!((size.y - 0.04).abs() < 1e-6);
    }

    #[test]
    fn test_size_empty_text() {
        let mut assets = Assets::new();
        let style = style_fixture(&mut assets);
        let size = assets.text_size(style, "");
        assert_eq!(size.x, 0.0);
        assert!((size.y - 0.02).abs() < 1e-6);
    }
}
