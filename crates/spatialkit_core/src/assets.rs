//! The engine's asset context
//!
//! [`Assets`] is the explicit process-wide owner of every asset registry.
//! It is constructed once by the engine bootstrap and passed to whatever
//! needs to resolve handles; there are no ambient globals. All cross-kind
//! reference counting (a material holding textures, a model holding meshes)
//! goes through methods on this type so the counts can never drift.

use crate::font::{Font, FontId};
use crate::material::{Material, MaterialId};
use crate::mesh::{Mesh, MeshId};
use crate::model::{Model, ModelId};
use crate::registry::Registry;
use crate::shader::{Shader, ShaderId};
use crate::sprite::{Sprite, SpriteId};
use crate::text::TextStyle;
use crate::texture::{Texture, TextureId};

/// All asset registries, one per kind, plus the text style table
///
/// Asset operations live in per-kind `impl Assets` blocks next to their
/// payload types (`mesh.rs`, `texture.rs`, ...). The registries themselves
/// are crate-private so every release goes through the cascading methods.
pub struct Assets {
    pub(crate) meshes: Registry<MeshId, Mesh>,
    pub(crate) textures: Registry<TextureId, Texture>,
    pub(crate) shaders: Registry<ShaderId, Shader>,
    pub(crate) materials: Registry<MaterialId, Material>,
    pub(crate) fonts: Registry<FontId, Font>,
    pub(crate) models: Registry<ModelId, Model>,
    pub(crate) sprites: Registry<SpriteId, Sprite>,
    pub(crate) text_styles: Vec<TextStyle>,
    /// Counter for generated sprite ids (sprites have no caller-chosen id)
    pub(crate) next_sprite_id: u64,
}

impl Default for Assets {
    fn default() -> Self {
        Self::new()
    }
}

impl Assets {
    /// Create an empty asset context
    pub fn new() -> Self {
        Self {
            meshes: Registry::new(),
            textures: Registry::new(),
            shaders: Registry::new(),
            materials: Registry::new(),
            fonts: Registry::new(),
            models: Registry::new(),
            sprites: Registry::new(),
            text_styles: Vec::new(),
            next_sprite_id: 0,
        }
    }

    /// Total number of live assets across all kinds
    pub fn total_count(&self) -> usize {
        self.meshes.len()
            + self.textures.len()
            + self.shaders.len()
            + self.materials.len()
            + self.fonts.len()
            + self.models.len()
            + self.sprites.len()
    }

    /// Whether every registry is empty (useful around shutdown)
    pub fn is_empty(&self) -> bool {
        self.total_count() == 0
    }

    /// Debug-log the live asset counts per kind
    pub fn log_counts(&self) {
        log::debug!(
            "assets: {} meshes, {} textures, {} shaders, {} materials, {} fonts, {} models, {} sprites",
            self.meshes.len(),
            self.textures.len(),
            self.shaders.len(),
            self.materials.len(),
            self.fonts.len(),
            self.models.len(),
            self.sprites.len(),
        );
    }
}
