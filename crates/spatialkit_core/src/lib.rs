//! Core runtime for the spatialkit engine
//!
//! This crate owns the three contracts the rest of the engine builds on:
//!
//! - **Resource registry**: named, reference-counted asset storage with one
//!   strongly-typed handle kind per asset type ([`Registry`], [`Assets`]).
//! - **Transform engine**: position/scale/rotation state with a lazily
//!   recomputed, dirty-tracked world matrix ([`Transform`]).
//! - **Material parameter table**: typed name→value parameters layered on a
//!   material handle, with texture parameters participating in reference
//!   counting ([`Material`]).
//!
//! Everything here is single-threaded and synchronous: one frame samples
//! input, mutates transforms and materials, and hands resolved handles plus
//! matrices to the external renderer through a [`RenderList`]. GPU work,
//! file decoding ([`loader`]), and the scene layer live outside this crate.

mod assets;
mod camera;
mod defaults;
mod error;
mod font;
pub mod loader;
mod material;
mod mesh;
mod model;
mod registry;
mod render;
mod shader;
mod sprite;
mod text;
mod transform;
mod texture;

pub use assets::Assets;
pub use camera::Camera;
pub use defaults::Defaults;
pub use error::AssetError;
pub use font::{Font, FontId};
pub use material::{
    material_param_id, AlphaMode, CullMode, Material, MaterialId, ParamType, ParamValue,
};
pub use mesh::{Mesh, MeshDirty, MeshId, Vertex};
pub use model::{Model, ModelId, Subset};
pub use registry::Registry;
pub use render::{DirectionalLight, DrawCall, RenderList, SpriteDraw, TextDraw};
pub use shader::{Shader, ShaderId};
pub use sprite::{Sprite, SpriteId, SpriteKind};
pub use text::{TextAlign, TextStyle, TextStyleId};
pub use transform::Transform;
pub use texture::{TexAddress, TexFormat, TexSample, TexType, Texture, TextureDirty, TextureId};
