//! The frame render list
//!
//! Systems push draws into a [`RenderList`] each frame; the external GPU
//! backend consumes and clears it. The list stores handles and matrices
//! only, so building it touches no GPU state.

use spatialkit_math::{Color128, Color32, Mat4, Vec3};

use crate::assets::Assets;
use crate::camera::Camera;
use crate::material::MaterialId;
use crate::mesh::MeshId;
use crate::model::ModelId;
use crate::sprite::SpriteId;
use crate::text::{TextAlign, TextStyleId};
use crate::texture::TextureId;
use crate::transform::Transform;

/// A single directional light
#[derive(Clone, Copy, Debug)]
pub struct DirectionalLight {
    pub direction: Vec3,
    pub color: Color128,
    pub intensity: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            direction: Vec3::new(-1.0, -2.0, -1.0).normalize(),
            color: Color128::WHITE,
            intensity: 1.0,
        }
    }
}

/// One mesh draw queued for this frame
#[derive(Clone, Copy, Debug)]
pub struct DrawCall {
    pub mesh: MeshId,
    pub material: MaterialId,
    pub transform: Mat4,
}

/// One sprite draw queued for this frame
#[derive(Clone, Copy, Debug)]
pub struct SpriteDraw {
    pub sprite: SpriteId,
    pub transform: Mat4,
    pub color: Color32,
}

/// One text draw queued for this frame
#[derive(Clone, Debug)]
pub struct TextDraw {
    pub style: TextStyleId,
    pub text: String,
    pub transform: Mat4,
    pub align: TextAlign,
}

/// Everything the GPU backend needs to render one frame
#[derive(Debug, Default)]
pub struct RenderList {
    view: Mat4,
    projection: Mat4,
    light: DirectionalLight,
    sky: Option<TextureId>,
    show_sky: bool,
    draws: Vec<DrawCall>,
    sprites: Vec<SpriteDraw>,
    texts: Vec<TextDraw>,
}

impl RenderList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the view matrix directly
    pub fn set_view(&mut self, view: Mat4) {
        self.view = view;
    }

    /// Set the projection matrix directly
    pub fn set_projection(&mut self, projection: Mat4) {
        self.projection = projection;
    }

    /// Derive view and projection from a camera transform
    ///
    /// The view matrix is the inverse of the camera's world transform.
    pub fn set_camera(&mut self, camera: &Camera, transform: &mut Transform, aspect: f32) {
        self.view = transform.update().inverse();
        self.projection = camera.projection(aspect);
    }

    /// Set the scene's directional light
    pub fn set_light(&mut self, light: DirectionalLight) {
        self.light = light;
    }

    /// Set the sky cubemap and whether to draw it
    pub fn set_sky(&mut self, sky: Option<TextureId>, show: bool) {
        self.sky = sky;
        self.show_sky = show && sky.is_some();
    }

    /// Queue a mesh draw at a world matrix
    pub fn add_mesh(&mut self, mesh: MeshId, material: MaterialId, transform: Mat4) {
        self.draws.push(DrawCall {
            mesh,
            material,
            transform,
        });
    }

    /// Queue a mesh draw at a transform, updating its cached matrix
    pub fn add_mesh_tr(&mut self, mesh: MeshId, material: MaterialId, transform: &mut Transform) {
        let matrix = transform.update();
        self.add_mesh(mesh, material, matrix);
    }

    /// Queue every subset of a model at a world matrix
    pub fn add_model(&mut self, assets: &Assets, model: ModelId, transform: Mat4) {
        if let Some(m) = assets.model(model) {
            for subset in m.subsets() {
                self.add_mesh(subset.mesh, subset.material, transform);
            }
        }
    }

    /// Queue a sprite draw with a color tint
    pub fn draw_sprite(&mut self, sprite: SpriteId, transform: Mat4, color: Color32) {
        self.sprites.push(SpriteDraw {
            sprite,
            transform,
            color,
        });
    }

    /// Queue a text draw
    pub fn add_text(&mut self, style: TextStyleId, text: &str, transform: Mat4, align: TextAlign) {
        self.texts.push(TextDraw {
            style,
            text: text.to_string(),
            transform,
            align,
        });
    }

    /// Drop all queued draws, keeping view/projection/light state
    pub fn clear(&mut self) {
        self.draws.clear();
        self.sprites.clear();
        self.texts.clear();
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn light(&self) -> &DirectionalLight {
        &self.light
    }

    pub fn sky(&self) -> Option<TextureId> {
        self.sky
    }

    pub fn show_sky(&self) -> bool {
        self.show_sky
    }

    pub fn draws(&self) -> &[DrawCall] {
        &self.draws
    }

    pub fn sprites(&self) -> &[SpriteDraw] {
        &self.sprites
    }

    pub fn texts(&self) -> &[TextDraw] {
        &self.texts
    }
}
