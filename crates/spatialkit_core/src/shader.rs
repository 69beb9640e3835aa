//! Shader assets
//!
//! A shader payload is just its source code; compilation happens in the
//! external GPU backend, which watches the dirty flag and rebuilds lazily.

use crate::assets::Assets;
use crate::error::AssetError;

slotmap::new_key_type! {
    /// Handle to a shader in the asset registry
    pub struct ShaderId;
}

/// A shader payload: source code pending external compilation
#[derive(Clone, Debug)]
pub struct Shader {
    code: String,
    dirty: bool,
}

impl Shader {
    /// The current shader source
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Whether the GPU backend needs to recompile
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Called by the GPU backend after a successful compile
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}

impl Assets {
    /// Register a new shader under `id` with the given source code
    pub fn shader_create(&mut self, id: &str, code: &str) -> Result<ShaderId, AssetError> {
        self.shaders.create(
            id,
            Shader {
                code: code.to_string(),
                dirty: true,
            },
        )
    }

    /// Load shader source from a file; the path doubles as the asset id
    pub fn shader_create_file(&mut self, path: &str) -> Result<ShaderId, AssetError> {
        let code = std::fs::read_to_string(path)?;
        self.shader_create(path, &code)
    }

    /// Look up a shader by id, taking a new reference on hit
    pub fn shader_find(&mut self, id: &str) -> Option<ShaderId> {
        self.shaders.find(id)
    }

    /// Drop one reference to a shader
    pub fn shader_release(&mut self, shader: ShaderId) {
        self.shaders.release(shader);
    }

    /// Read access to a shader payload
    pub fn shader(&self, shader: ShaderId) -> Option<&Shader> {
        self.shaders.get(shader)
    }

    /// Current reference count of a shader handle
    pub fn shader_ref_count(&self, shader: ShaderId) -> Option<u32> {
        self.shaders.ref_count(shader)
    }

    /// Replace a shader's source in place; identity and ref count untouched
    pub fn shader_set_code(&mut self, shader: ShaderId, code: &str) {
        let s = self.shaders.payload_mut(shader);
        s.code = code.to_string();
        s.dirty = true;
    }

    /// Replace a shader's source from a file
    pub fn shader_set_codefile(&mut self, shader: ShaderId, path: &str) -> Result<(), AssetError> {
        let code = std::fs::read_to_string(path)?;
        self.shader_set_code(shader, &code);
        Ok(())
    }
}
