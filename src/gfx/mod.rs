//! # Graphics Module
//!
//! Everything needed to draw the scene: cube geometry, the fly camera,
//! shapes and lights, GPU resources and the wgpu renderer.
//!
//! ## Architecture Overview
//!
//! - **Geometry** ([`geometry`]) - cube vertex and index generation
//! - **Camera System** ([`camera`]) - first-person fly camera and projections
//! - **Scene Management** ([`scene`]) - shapes, lights and the render pass order
//! - **Backend** ([`backend`]) - the trait the scene renders through
//! - **Rendering Pipeline** ([`rendering`]) - the wgpu implementation of it
//! - **Resource Management** ([`resources`]) - textures and uniform blocks
//!
//! The scene is generic over [`backend::RenderBackend`]; the application
//! drives it with [`RenderEngine`], tests with
//! [`RecordingBackend`](backend::recording::RecordingBackend).

pub mod backend;
pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::FlyCamera;
pub use rendering::render_engine::RenderEngine;
