// src/gfx/resources/mod.rs
//! GPU resource management
//!
//! Handles textures, uniform blocks, and bind groups for rendering.

pub mod global_bindings;
pub mod texture_loader;
pub mod texture_resource;
pub mod uniforms;

// Re-export main types
pub use global_bindings::GlobalBindings;
pub use texture_loader::{load_texture, TextureImage};
pub use texture_resource::{DepthBuffer, TextureResource};
pub use uniforms::{LightingUniforms, ObjectUniforms};
