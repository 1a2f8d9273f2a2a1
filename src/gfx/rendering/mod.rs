// src/gfx/rendering/mod.rs
//! Core rendering functionality
//!
//! Handles render pipelines, GPU resource management, and frame submission.

pub mod pipeline_manager;
pub mod render_engine;
pub mod render_pass_ext;

// Re-export main types
pub use pipeline_manager::{PipelineConfig, PipelineManager, ShaderPipelines};
pub use render_engine::RenderEngine;
