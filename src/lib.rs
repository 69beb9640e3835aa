//! spatialkit: runtime core for a real-time spatial rendering engine
//!
//! This crate ties the workspace together and re-exports the pieces an
//! application needs:
//!
//! - [`spatialkit_math`] (as `math`): vectors, poses, rays, colors
//! - [`spatialkit_core`] (as `core`): the asset registry, transforms,
//!   materials, and the frame render list
//! - [`spatialkit_input`] (as `input`): hand tracking, pointers, and
//!   input events
//!
//! A typical frame: feed hardware samples into an
//! [`Input`](spatialkit_input::Input), mutate
//! [`Transform`](spatialkit_core::Transform)s and material parameters, then
//! fill a [`RenderList`](spatialkit_core::RenderList) for the GPU backend
//! to consume.

pub use spatialkit_core as core;
pub use spatialkit_input as input;
pub use spatialkit_math as math;

pub mod config;

/// The commonly used types, for glob import
pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use spatialkit_core::{
        Assets, Camera, Defaults, Material, MaterialId, Mesh, MeshId, Model, ModelId, RenderList,
        Shader, ShaderId, Sprite, SpriteId, TextStyleId, Texture, TextureId, Transform, Vertex,
    };
    pub use spatialkit_input::{Hand, Handed, Input, InputSource, InputState, Pointer};
    pub use spatialkit_math::{Color128, Color32, Mat4, Pose, Quat, Ray, Vec2, Vec3, Vec4};
}
