//! Small wgpu helpers: bind group builders and typed uniform buffers.

pub mod binding_builder;
pub mod uniform_buffer;

pub use binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc};
pub use uniform_buffer::UniformBuffer;
