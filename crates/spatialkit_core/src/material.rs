//! Material assets: shader binding, render state, and the parameter table
//!
//! A material's parameter table maps names to typed values (float, color,
//! vector, matrix, texture). Slots are kept in insertion order so
//! enumeration is reproducible. Lookups can use the name or its
//! precomputed hash ([`material_param_id`]) — both resolve to the same
//! slot, letting per-frame code skip string hashing.
//!
//! Texture-typed values own a reference on the texture they point at:
//! storing one bumps the texture's ref count, and displacing it (overwrite
//! with any type, or releasing the material) drops it again. That is why
//! every parameter write goes through [`Assets`] rather than the payload
//! directly.

use spatialkit_math::{Color128, Mat4, Vec4};
use xxhash_rust::xxh3::xxh3_64;

use crate::assets::Assets;
use crate::error::AssetError;
use crate::shader::ShaderId;
use crate::texture::TextureId;

slotmap::new_key_type! {
    /// Handle to a material in the asset registry
    pub struct MaterialId;
}

/// Hash a parameter name into the numeric id used by the `_id` fast paths
///
/// Callers hash once, cache the id, and use it every frame.
pub fn material_param_id(name: &str) -> u64 {
    xxh3_64(name.as_bytes())
}

/// How a material blends with what is behind it
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlphaMode {
    /// Opaque; alpha ignored
    #[default]
    None,
    /// Alpha blending
    Blend,
    /// Alpha-test cutout
    Test,
}

/// Which triangle winding gets culled
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CullMode {
    /// Cull counter-clockwise faces
    #[default]
    Ccw,
    /// Cull clockwise faces
    Cw,
    /// Draw both sides
    None,
}

/// The type tag of a stored parameter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamType {
    Float,
    Color,
    Vector,
    Matrix,
    Texture,
}

/// A typed parameter value
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamValue {
    Float(f32),
    Color(Color128),
    Vector(Vec4),
    Matrix(Mat4),
    Texture(TextureId),
}

impl ParamValue {
    /// The type tag of this value
    pub fn param_type(&self) -> ParamType {
        match self {
            ParamValue::Float(_) => ParamType::Float,
            ParamValue::Color(_) => ParamType::Color,
            ParamValue::Vector(_) => ParamType::Vector,
            ParamValue::Matrix(_) => ParamType::Matrix,
            ParamValue::Texture(_) => ParamType::Texture,
        }
    }
}

/// One named slot in the parameter table
#[derive(Clone, Debug)]
struct ParamSlot {
    /// The parameter name; empty when the slot was first written through
    /// the id-only path
    name: String,
    id: u64,
    value: ParamValue,
}

/// A material payload: shader, render-state flags, parameter table
#[derive(Clone, Debug)]
pub struct Material {
    shader: ShaderId,
    alpha: AlphaMode,
    cull: CullMode,
    queue_offset: i32,
    params: Vec<ParamSlot>,
}

impl Material {
    pub(crate) fn new(shader: ShaderId) -> Self {
        Self {
            shader,
            alpha: AlphaMode::default(),
            cull: CullMode::default(),
            queue_offset: 0,
            params: Vec::new(),
        }
    }

    /// The shader this material renders with
    pub fn shader(&self) -> ShaderId {
        self.shader
    }

    /// Alpha blend mode (render state, not a parameter)
    pub fn alpha_mode(&self) -> AlphaMode {
        self.alpha
    }

    /// Face culling mode (render state, not a parameter)
    pub fn cull(&self) -> CullMode {
        self.cull
    }

    /// Sort-order bias within the render queue
    pub fn queue_offset(&self) -> i32 {
        self.queue_offset
    }

    /// Number of parameters in the table
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Name and type of the parameter at `index`, in insertion order
    pub fn param_info(&self, index: usize) -> Option<(&str, ParamType)> {
        self.params
            .get(index)
            .map(|slot| (slot.name.as_str(), slot.value.param_type()))
    }

    /// Get a parameter by name if it exists with the requested type
    ///
    /// A stored value of a different type is a mismatch, not a coercion:
    /// the lookup fails.
    pub fn get_param(&self, name: &str, ty: ParamType) -> Option<ParamValue> {
        self.get_param_id(material_param_id(name), ty)
    }

    /// Get a parameter by precomputed id if it exists with the requested type
    pub fn get_param_id(&self, id: u64, ty: ParamType) -> Option<ParamValue> {
        let slot = &self.params[self.slot_index(id)?];
        (slot.value.param_type() == ty).then_some(slot.value)
    }

    fn slot_index(&self, id: u64) -> Option<usize> {
        self.params.iter().position(|slot| slot.id == id)
    }

    /// Store a value, returning the texture it displaced (if any)
    ///
    /// The caller (always [`Assets`]) is responsible for the ref-count
    /// bookkeeping on the returned handle.
    pub(crate) fn set_value(
        &mut self,
        name: Option<&str>,
        id: u64,
        value: ParamValue,
    ) -> Option<TextureId> {
        match self.slot_index(id) {
            Some(index) => {
                let slot = &mut self.params[index];
                // Backfill the name when a slot created through the id path
                // is later written by name
                if slot.name.is_empty() {
                    if let Some(name) = name {
                        slot.name = name.to_string();
                    }
                }
                let displaced = match slot.value {
                    ParamValue::Texture(t) => Some(t),
                    _ => None,
                };
                slot.value = value;
                displaced
            }
            None => {
                self.params.push(ParamSlot {
                    name: name.unwrap_or("").to_string(),
                    id,
                    value,
                });
                None
            }
        }
    }

    /// Handles of every texture-typed parameter, for cascading release
    pub(crate) fn texture_params(&self) -> impl Iterator<Item = TextureId> + '_ {
        self.params.iter().filter_map(|slot| match slot.value {
            ParamValue::Texture(t) => Some(t),
            _ => None,
        })
    }
}

impl Assets {
    /// Register a new material under `id`, rendering with `shader`
    ///
    /// The material takes a reference on the shader.
    pub fn material_create(&mut self, id: &str, shader: ShaderId) -> Result<MaterialId, AssetError> {
        let mat = self.materials.create(id, Material::new(shader))?;
        self.shaders.addref(shader);
        Ok(mat)
    }

    /// Duplicate a material's state under a new id
    ///
    /// The copy takes its own references on the shader and on every
    /// texture parameter, so the two materials can diverge safely.
    pub fn material_copy(&mut self, id: &str, source: MaterialId) -> Result<MaterialId, AssetError> {
        let payload = match self.materials.get(source) {
            Some(m) => m.clone(),
            None => return Err(AssetError::NotFound(format!("material {:?}", source))),
        };
        let textures: Vec<TextureId> = payload.texture_params().collect();
        let shader = payload.shader();

        let copy = self.materials.create(id, payload)?;
        self.shaders.addref(shader);
        for tex in textures {
            self.textures.addref(tex);
        }
        Ok(copy)
    }

    /// Look up a material by id, taking a new reference on hit
    pub fn material_find(&mut self, id: &str) -> Option<MaterialId> {
        self.materials.find(id)
    }

    /// Drop one reference to a material
    ///
    /// When this frees the material, its references on its shader and on
    /// every texture parameter are dropped as well.
    pub fn material_release(&mut self, mat: MaterialId) {
        if let Some(payload) = self.materials.release(mat) {
            self.shaders.release(payload.shader());
            let textures: Vec<TextureId> = payload.texture_params().collect();
            for tex in textures {
                self.textures.release(tex);
            }
        }
    }

    /// Read access to a material payload
    pub fn material(&self, mat: MaterialId) -> Option<&Material> {
        self.materials.get(mat)
    }

    /// Current reference count of a material handle
    pub fn material_ref_count(&self, mat: MaterialId) -> Option<u32> {
        self.materials.ref_count(mat)
    }

    /// Swap the material's shader, adjusting both shaders' ref counts
    pub fn material_set_shader(&mut self, mat: MaterialId, shader: ShaderId) {
        // addref before release so swapping a shader with itself is safe
        self.shaders.addref(shader);
        let m = self.materials.payload_mut(mat);
        let old = m.shader;
        m.shader = shader;
        self.shaders.release(old);
    }

    /// The shader a material renders with
    pub fn material_get_shader(&self, mat: MaterialId) -> Option<ShaderId> {
        self.materials.get(mat).map(Material::shader)
    }

    /// Set the alpha blend mode
    pub fn material_set_alpha_mode(&mut self, mat: MaterialId, mode: AlphaMode) {
        self.materials.payload_mut(mat).alpha = mode;
    }

    /// Set the face culling mode
    pub fn material_set_cull(&mut self, mat: MaterialId, mode: CullMode) {
        self.materials.payload_mut(mat).cull = mode;
    }

    /// Set the render-queue sort bias
    pub fn material_set_queue_offset(&mut self, mat: MaterialId, offset: i32) {
        self.materials.payload_mut(mat).queue_offset = offset;
    }

    /// Set a float parameter
    pub fn material_set_float(&mut self, mat: MaterialId, name: &str, value: f32) {
        self.material_set_param(mat, name, ParamValue::Float(value));
    }

    /// Set a color parameter
    pub fn material_set_color(&mut self, mat: MaterialId, name: &str, value: Color128) {
        self.material_set_param(mat, name, ParamValue::Color(value));
    }

    /// Set a vector parameter
    pub fn material_set_vector(&mut self, mat: MaterialId, name: &str, value: Vec4) {
        self.material_set_param(mat, name, ParamValue::Vector(value));
    }

    /// Set a matrix parameter
    pub fn material_set_matrix(&mut self, mat: MaterialId, name: &str, value: Mat4) {
        self.material_set_param(mat, name, ParamValue::Matrix(value));
    }

    /// Set a texture parameter
    ///
    /// Takes a reference on `tex`; a texture previously stored at this key
    /// (or displaced later by any overwrite) has its reference dropped.
    pub fn material_set_texture(&mut self, mat: MaterialId, name: &str, tex: TextureId) {
        self.material_set_param(mat, name, ParamValue::Texture(tex));
    }

    /// Set a parameter by name; overwrites any existing type at that key
    pub fn material_set_param(&mut self, mat: MaterialId, name: &str, value: ParamValue) {
        self.store_param(mat, Some(name), material_param_id(name), value);
    }

    /// Set a parameter by precomputed id (the per-frame fast path)
    pub fn material_set_param_id(&mut self, mat: MaterialId, id: u64, value: ParamValue) {
        self.store_param(mat, None, id, value);
    }

    /// Get a parameter by name; fails on absence or stored-type mismatch
    pub fn material_get_param(
        &self,
        mat: MaterialId,
        name: &str,
        ty: ParamType,
    ) -> Option<ParamValue> {
        self.materials.get(mat)?.get_param(name, ty)
    }

    /// Get a parameter by precomputed id
    pub fn material_get_param_id(
        &self,
        mat: MaterialId,
        id: u64,
        ty: ParamType,
    ) -> Option<ParamValue> {
        self.materials.get(mat)?.get_param_id(id, ty)
    }

    /// Number of parameters in a material's table
    pub fn material_get_param_count(&self, mat: MaterialId) -> Option<usize> {
        self.materials.get(mat).map(Material::param_count)
    }

    /// Name and type of a material's parameter at `index`, insertion order
    pub fn material_get_param_info(&self, mat: MaterialId, index: usize) -> Option<(&str, ParamType)> {
        self.materials.get(mat)?.param_info(index)
    }

    fn store_param(&mut self, mat: MaterialId, name: Option<&str>, id: u64, value: ParamValue) {
        // Take the new texture reference before displacing the old one, so
        // overwriting a texture with itself never drops it to zero.
        if let ParamValue::Texture(tex) = value {
            self.textures.addref(tex);
        }
        let displaced = self.materials.payload_mut(mat).set_value(name, id, value);
        if let Some(old) = displaced {
            self.textures.release(old);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::{TexFormat, TexType};

    fn setup() -> (Assets, MaterialId, TextureId) {
        let mut assets = Assets::new();
        let shader = assets.shader_create("shader", "code").unwrap();
        let mat = assets.material_create("mat", shader).unwrap();
        let tex = assets
            .tex_create("tex", TexType::IMAGE, TexFormat::Rgba32)
            .unwrap();
        (assets, mat, tex)
    }

    #[test]
    fn test_create_refs_shader() {
        let mut assets = Assets::new();
        let shader = assets.shader_create("shader", "code").unwrap();
        assert_eq!(assets.shader_ref_count(shader), Some(1));

        let mat = assets.material_create("mat", shader).unwrap();
        assert_eq!(assets.shader_ref_count(shader), Some(2));

        // Caller can drop its own shader reference; the material keeps it alive
        assets.shader_release(shader);
        assert_eq!(assets.shader_ref_count(shader), Some(1));

        assets.material_release(mat);
        assert!(assets.shader(shader).is_none());
    }

    #[test]
    fn test_float_param_roundtrip() {
        let (mut assets, mat, _) = setup();
        assets.material_set_float(mat, "metallic", 0.5);

        match assets.material_get_param(mat, "metallic", ParamType::Float) {
            Some(ParamValue::Float(v)) => assert_eq!(v, 0.5),
            other => panic!("Expected float param, got {:?}", other),
        }
    }

    #[test]
    fn test_name_and_id_paths_share_a_slot() {
        let (mut assets, mat, _) = setup();
        let id = material_param_id("roughness");

        assets.material_set_float(mat, "roughness", 0.25);
        assets.material_set_param_id(mat, id, ParamValue::Float(0.75));

        // Still one slot, holding the id-path value
        assert_eq!(assets.material(mat).unwrap().param_count(), 1);
        match assets.material_get_param(mat, "roughness", ParamType::Float) {
            Some(ParamValue::Float(v)) => assert_eq!(v, 0.75),
            other => panic!("Expected float param, got {:?}", other),
        }
    }

    #[test]
    fn test_id_path_slot_backfills_name() {
        let (mut assets, mat, _) = setup();
        let id = material_param_id("tint");

        assets.material_set_param_id(mat, id, ParamValue::Float(1.0));
        assert_eq!(
            assets.material(mat).unwrap().param_info(0),
            Some(("", ParamType::Float))
        );

        assets.material_set_float(mat, "tint", 2.0);
        assert_eq!(
            assets.material(mat).unwrap().param_info(0),
            Some(("tint", ParamType::Float))
        );
        assert_eq!(assets.material(mat).unwrap().param_count(), 1);
    }

    #[test]
    fn test_get_type_mismatch_fails() {
        let (mut assets, mat, _) = setup();
        assets.material_set_float(mat, "metallic", 0.5);

        assert!(assets
            .material_get_param(mat, "metallic", ParamType::Color)
            .is_none());
        assert!(assets
            .material_get_param(mat, "absent", ParamType::Float)
            .is_none());
    }

    #[test]
    fn test_texture_param_refcounting() {
        let (mut assets, mat, tex) = setup();
        assert_eq!(assets.tex_ref_count(tex), Some(1));

        assets.material_set_texture(mat, "diffuse", tex);
        assert_eq!(assets.tex_ref_count(tex), Some(2));

        // Overwriting with a float displaces the texture and drops its ref
        assets.material_set_float(mat, "diffuse", 0.0);
        assert_eq!(assets.tex_ref_count(tex), Some(1));

        // The slot is now float-typed
        assert!(assets
            .material_get_param(mat, "diffuse", ParamType::Texture)
            .is_none());
        assert!(assets
            .material_get_param(mat, "diffuse", ParamType::Float)
            .is_some());
    }

    #[test]
    fn test_texture_overwrite_with_itself() {
        let (mut assets, mat, tex) = setup();
        assets.material_set_texture(mat, "diffuse", tex);
        assets.material_set_texture(mat, "diffuse", tex);
        assert_eq!(assets.tex_ref_count(tex), Some(2));
    }

    #[test]
    fn test_texture_overwrite_with_other_texture() {
        let (mut assets, mat, tex_a) = setup();
        let tex_b = assets
            .tex_create("tex_b", TexType::IMAGE, TexFormat::Rgba32)
            .unwrap();

        assets.material_set_texture(mat, "diffuse", tex_a);
        assets.material_set_texture(mat, "diffuse", tex_b);

        assert_eq!(assets.tex_ref_count(tex_a), Some(1));
        assert_eq!(assets.tex_ref_count(tex_b), Some(2));
    }

    #[test]
    fn test_release_drops_texture_params() {
        let (mut assets, mat, tex) = setup();
        assets.material_set_texture(mat, "diffuse", tex);
        assets.material_release(mat);

        // Only the caller's own reference remains
        assert_eq!(assets.tex_ref_count(tex), Some(1));
    }

    #[test]
    fn test_copy_takes_its_own_references() {
        let (mut assets, mat, tex) = setup();
        assets.material_set_texture(mat, "diffuse", tex);
        let shader = assets.material_get_shader(mat).unwrap();

        let copy = assets.material_copy("mat_copy", mat).unwrap();
        assert_eq!(assets.tex_ref_count(tex), Some(3));
        assert_eq!(assets.shader_ref_count(shader), Some(3));

        // The copy diverges without touching the original
        assets.material_set_float(copy, "diffuse", 0.0);
        assert!(assets
            .material_get_param(mat, "diffuse", ParamType::Texture)
            .is_some());

        assets.material_release(copy);
        assert_eq!(assets.tex_ref_count(tex), Some(2));
    }

    #[test]
    fn test_param_enumeration_insertion_order() {
        let (mut assets, mat, tex) = setup();
        assets.material_set_float(mat, "metallic", 0.1);
        assets.material_set_texture(mat, "diffuse", tex);
        assets.material_set_color(mat, "tint", Color128::WHITE);

        let m = assets.material(mat).unwrap();
        assert_eq!(m.param_count(), 3);
        assert_eq!(m.param_info(0), Some(("metallic", ParamType::Float)));
        assert_eq!(m.param_info(1), Some(("diffuse", ParamType::Texture)));
        assert_eq!(m.param_info(2), Some(("tint", ParamType::Color)));
        assert!(m.param_info(3).is_none());
    }

    #[test]
    fn test_render_state_flags() {
        let (mut assets, mat, _) = setup();
        assets.material_set_alpha_mode(mat, AlphaMode::Blend);
        assets.material_set_cull(mat, CullMode::None);
        assets.material_set_queue_offset(mat, -10);

        let m = assets.material(mat).unwrap();
        assert_eq!(m.alpha_mode(), AlphaMode::Blend);
        assert_eq!(m.cull(), CullMode::None);
        assert_eq!(m.queue_offset(), -10);
        // Render state is not a parameter
        assert_eq!(m.param_count(), 0);
    }

    #[test]
    fn test_set_shader_swaps_references() {
        let (mut assets, mat, _) = setup();
        let old = assets.material_get_shader(mat).unwrap();
        let new = assets.shader_create("shader2", "code2").unwrap();

        assets.material_set_shader(mat, new);

        assert_eq!(assets.material_get_shader(mat), Some(new));
        assert_eq!(assets.shader_ref_count(old), Some(1));
        assert_eq!(assets.shader_ref_count(new), Some(2));
    }

    #[test]
    fn test_set_shader_to_itself() {
        let (mut assets, mat, _) = setup();
        let shader = assets.material_get_shader(mat).unwrap();
        assets.material_set_shader(mat, shader);
        assert_eq!(assets.shader_ref_count(shader), Some(2));
    }
}
