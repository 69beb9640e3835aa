//! Mesh assets: vertex and index data
//!
//! A mesh payload is CPU-side geometry. Mutators mark bitflag dirty state
//! so the external GPU backend knows which buffers to rebuild before the
//! next draw; the backend clears the flags once it has uploaded.

use bitflags::bitflags;
use bytemuck::{Pod, Zeroable};
use spatialkit_math::{Color32, Vec2, Vec3};

use crate::assets::Assets;
use crate::error::AssetError;

slotmap::new_key_type! {
    /// Handle to a mesh in the asset registry
    pub struct MeshId;
}

bitflags! {
    /// Which parts of a mesh changed since the GPU last saw it
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct MeshDirty: u8 {
        /// Vertex buffer needs rebuilding
        const VERTS = 1 << 0;
        /// Index buffer needs rebuilding
        const INDS = 1 << 1;
    }
}

/// A single mesh vertex, laid out for direct GPU upload
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in mesh-local space
    pub pos: Vec3,
    /// Surface normal
    pub norm: Vec3,
    /// Texture coordinate
    pub uv: Vec2,
    /// Vertex color
    pub col: Color32,
}

impl Vertex {
    /// Create a white vertex from position, normal, and uv
    pub fn new(pos: Vec3, norm: Vec3, uv: Vec2) -> Self {
        Self {
            pos,
            norm,
            uv,
            col: Color32::WHITE,
        }
    }
}

/// CPU-side mesh geometry
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    verts: Vec<Vertex>,
    inds: Vec<u32>,
    /// How many indices to draw; defaults to all of them
    draw_inds: u32,
    dirty: MeshDirty,
}

impl Mesh {
    /// The vertex data
    pub fn verts(&self) -> &[Vertex] {
        &self.verts
    }

    /// The index data
    pub fn inds(&self) -> &[u32] {
        &self.inds
    }

    /// Number of indices the renderer should draw
    pub fn draw_ind_count(&self) -> u32 {
        self.draw_inds
    }

    /// Which buffers the GPU backend still needs to rebuild
    pub fn dirty(&self) -> MeshDirty {
        self.dirty
    }

    /// Called by the GPU backend once buffers are rebuilt
    pub fn clear_dirty(&mut self) {
        self.dirty = MeshDirty::empty();
    }
}

impl Assets {
    /// Register a new, empty mesh under `id`
    pub fn mesh_create(&mut self, id: &str) -> Result<MeshId, AssetError> {
        self.meshes.create(id, Mesh::default())
    }

    /// Look up a mesh by id, taking a new reference on hit
    pub fn mesh_find(&mut self, id: &str) -> Option<MeshId> {
        self.meshes.find(id)
    }

    /// Drop one reference to a mesh
    pub fn mesh_release(&mut self, mesh: MeshId) {
        self.meshes.release(mesh);
    }

    /// Read access to a mesh payload
    pub fn mesh(&self, mesh: MeshId) -> Option<&Mesh> {
        self.meshes.get(mesh)
    }

    /// Current reference count of a mesh handle
    pub fn mesh_ref_count(&self, mesh: MeshId) -> Option<u32> {
        self.meshes.ref_count(mesh)
    }

    /// Replace a mesh's vertex data
    ///
    /// Identity and reference count are untouched; the change is visible to
    /// every holder of the handle.
    pub fn mesh_set_verts(&mut self, mesh: MeshId, verts: &[Vertex]) {
        let m = self.meshes.payload_mut(mesh);
        m.verts.clear();
        m.verts.extend_from_slice(verts);
        m.dirty |= MeshDirty::VERTS;
    }

    /// Replace a mesh's index data; resets the draw count to all indices
    pub fn mesh_set_inds(&mut self, mesh: MeshId, inds: &[u32]) {
        let m = self.meshes.payload_mut(mesh);
        m.inds.clear();
        m.inds.extend_from_slice(inds);
        m.draw_inds = inds.len() as u32;
        m.dirty |= MeshDirty::INDS;
    }

    /// Draw only the first `count` indices (clamped to the index count)
    pub fn mesh_set_draw_inds(&mut self, mesh: MeshId, count: u32) {
        let m = self.meshes.payload_mut(mesh);
        m.draw_inds = count.min(m.inds.len() as u32);
    }

    /// Clear a mesh's GPU dirty flags (for the external backend)
    pub fn mesh_clear_dirty(&mut self, mesh: MeshId) {
        self.meshes.payload_mut(mesh).clear_dirty();
    }
}
