//! The engine's built-in assets
//!
//! Every context gets a small set of fallback assets so systems always have
//! something valid to draw with: solid 2x2 textures, a unit quad, the stock
//! shaders, and a default material. They are registered under `default/...`
//! ids so user code can `find` them like any other asset.

use spatialkit_math::{Color32, Vec2, Vec3};

use crate::assets::Assets;
use crate::error::AssetError;
use crate::material::MaterialId;
use crate::mesh::{MeshId, Vertex};
use crate::shader::ShaderId;
use crate::texture::{TexFormat, TexType, TextureId};

const SHADER_DEFAULT: &str = include_str!("shaders/default.wgsl");
const SHADER_PBR: &str = include_str!("shaders/pbr.wgsl");
const SHADER_UNLIT: &str = include_str!("shaders/unlit.wgsl");
const SHADER_FONT: &str = include_str!("shaders/font.wgsl");

/// Handles to the built-in assets
///
/// `init` creates them in dependency order; `shutdown` releases them in
/// reverse. The context owns one reference to each for the lifetime of the
/// engine.
pub struct Defaults {
    /// Solid white; the fallback for unset diffuse slots
    pub tex: TextureId,
    pub tex_black: TextureId,
    pub tex_gray: TextureId,
    /// A flat normal map (pointing straight out)
    pub tex_flat: TextureId,
    /// Full roughness, no metal
    pub tex_rough: TextureId,
    /// A unit quad facing -Z
    pub quad: MeshId,
    pub shader: ShaderId,
    pub shader_pbr: ShaderId,
    pub shader_unlit: ShaderId,
    pub shader_font: ShaderId,
    pub material: MaterialId,
}

impl Defaults {
    /// Create the built-in assets inside `assets`
    pub fn init(assets: &mut Assets) -> Result<Self, AssetError> {
        let tex = solid_tex(assets, "default/tex", Color32::WHITE)?;
        let tex_black = solid_tex(assets, "default/tex_black", Color32::BLACK)?;
        let tex_gray = solid_tex(assets, "default/tex_gray", Color32::GRAY)?;
        let tex_flat = solid_tex(assets, "default/tex_flat", Color32::new(128, 128, 255, 255))?;
        let tex_rough = solid_tex(assets, "default/tex_rough", Color32::new(0, 0, 255, 255))?;

        let quad = assets.mesh_create("default/quad")?;
        assets.mesh_set_verts(quad, &quad_verts());
        assets.mesh_set_inds(quad, &[0, 1, 2, 0, 2, 3]);

        let shader = assets.shader_create("default/shader", SHADER_DEFAULT)?;
        let shader_pbr = assets.shader_create("default/shader_pbr", SHADER_PBR)?;
        let shader_unlit = assets.shader_create("default/shader_unlit", SHADER_UNLIT)?;
        let shader_font = assets.shader_create("default/shader_font", SHADER_FONT)?;

        let material = assets.material_create("default/material", shader_pbr)?;
        assets.material_set_texture(material, "diffuse", tex);

        log::info!("default assets initialized");
        Ok(Self {
            tex,
            tex_black,
            tex_gray,
            tex_flat,
            tex_rough,
            quad,
            shader,
            shader_pbr,
            shader_unlit,
            shader_font,
            material,
        })
    }

    /// Release the built-in assets, in reverse creation order
    pub fn shutdown(self, assets: &mut Assets) {
        assets.material_release(self.material);
        assets.shader_release(self.shader_font);
        assets.shader_release(self.shader_unlit);
        assets.shader_release(self.shader_pbr);
        assets.shader_release(self.shader);
        assets.mesh_release(self.quad);
        assets.tex_release(self.tex_rough);
        assets.tex_release(self.tex_flat);
        assets.tex_release(self.tex_gray);
        assets.tex_release(self.tex_black);
        assets.tex_release(self.tex);
    }
}

fn solid_tex(assets: &mut Assets, id: &str, color: Color32) -> Result<TextureId, AssetError> {
    let tex = assets.tex_create(id, TexType::IMAGE, TexFormat::Rgba32)?;
    assets.tex_set_colors(tex, 2, 2, &[color; 4]);
    Ok(tex)
}

fn quad_verts() -> [Vertex; 4] {
    [
        Vertex::new(Vec3::new(-0.5, -0.5, 0.0), Vec3::NEG_Z, Vec2::new(0.0, 1.0)),
        Vertex::new(Vec3::new(0.5, -0.5, 0.0), Vec3::NEG_Z, Vec2::new(1.0, 1.0)),
        Vertex::new(Vec3::new(0.5, 0.5, 0.0), Vec3::NEG_Z, Vec2::new(1.0, 0.0)),
        Vertex::new(Vec3::new(-0.5, 0.5, 0.0), Vec3::NEG_Z, Vec2::new(0.0, 0.0)),
    ]
}
