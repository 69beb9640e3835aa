//! Sprite assets: a texture reference plus 2D layout info
//!
//! Sprites have no caller-chosen id when built from an existing texture;
//! the context hands out a generated one. File-backed sprites use their
//! path, matching the other file-backed asset kinds.

use crate::assets::Assets;
use crate::error::AssetError;
use crate::loader::TextureLoader;
use crate::texture::TextureId;

slotmap::new_key_type! {
    /// Handle to a sprite in the asset registry
    pub struct SpriteId;
}

/// How a sprite is stored for rendering
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SpriteKind {
    /// Packed into a shared sprite atlas
    #[default]
    Atlased,
    /// Drawn from its own texture
    Single,
}

/// A sprite payload
#[derive(Clone, Debug)]
pub struct Sprite {
    texture: TextureId,
    aspect: f32,
    kind: SpriteKind,
    /// Which atlas an [`SpriteKind::Atlased`] sprite packs into
    atlas: Option<String>,
}

impl Sprite {
    /// The backing texture; the sprite holds a reference on it
    pub fn texture(&self) -> TextureId {
        self.texture
    }

    /// Width / height of the sprite's source image
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Atlased or standalone
    pub fn kind(&self) -> SpriteKind {
        self.kind
    }

    /// The atlas name, for atlased sprites
    pub fn atlas(&self) -> Option<&str> {
        self.atlas.as_deref()
    }

    /// Width at the given height, preserving aspect
    pub fn normalized_dimensions(&self, height: f32) -> (f32, f32) {
        (self.aspect * height, height)
    }
}

impl Assets {
    /// Wrap an existing texture in a sprite
    ///
    /// The sprite takes a reference on the texture and is registered under
    /// a generated id. `atlas` names the shared atlas an
    /// [`SpriteKind::Atlased`] sprite packs into and is ignored for
    /// [`SpriteKind::Single`].
    pub fn sprite_create(
        &mut self,
        tex: TextureId,
        kind: SpriteKind,
        atlas: &str,
    ) -> Result<SpriteId, AssetError> {
        let aspect = match self.textures.get(tex) {
            Some(t) => t.aspect(),
            None => return Err(AssetError::NotFound(format!("texture {:?}", tex))),
        };
        let id = format!("sprite/{}", self.next_sprite_id);
        self.next_sprite_id += 1;

        let sprite = self.sprites.create(
            &id,
            Sprite {
                texture: tex,
                aspect,
                kind,
                atlas: (kind == SpriteKind::Atlased).then(|| atlas.to_string()),
            },
        )?;
        self.textures.addref(tex);
        Ok(sprite)
    }

    /// Load a sprite (and its texture) from an image file
    ///
    /// The path doubles as the sprite id; the texture is registered under
    /// the same path with the sprite holding one reference on it.
    pub fn sprite_create_file(
        &mut self,
        path: &str,
        kind: SpriteKind,
        loader: &dyn TextureLoader,
    ) -> Result<SpriteId, AssetError> {
        let tex = self.tex_create_file(path, loader)?;
        let aspect = self.textures.payload_mut(tex).aspect();

        match self.sprites.create(
            path,
            Sprite {
                texture: tex,
                aspect,
                kind,
                atlas: (kind == SpriteKind::Atlased).then(|| "default".to_string()),
            },
        ) {
            Ok(sprite) => Ok(sprite),
            Err(err) => {
                // Duplicate sprite id; drop the texture we just registered
                self.tex_release(tex);
                Err(err)
            }
        }
    }

    /// Look up a sprite by id, taking a new reference on hit
    pub fn sprite_find(&mut self, id: &str) -> Option<SpriteId> {
        self.sprites.find(id)
    }

    /// Drop one reference to a sprite
    ///
    /// When this frees the sprite, its reference on the texture is dropped
    /// as well.
    pub fn sprite_release(&mut self, sprite: SpriteId) {
        if let Some(payload) = self.sprites.release(sprite) {
            self.tex_release(payload.texture);
        }
    }

    /// Read access to a sprite payload
    pub fn sprite(&self, sprite: SpriteId) -> Option<&Sprite> {
        self.sprites.get(sprite)
    }

    /// Current reference count of a sprite handle
    pub fn sprite_ref_count(&self, sprite: SpriteId) -> Option<u32> {
        self.sprites.ref_count(sprite)
    }

    /// Width / height of a sprite's source image
    pub fn sprite_aspect(&self, sprite: SpriteId) -> Option<f32> {
        self.sprites.get(sprite).map(Sprite::aspect)
    }
}
