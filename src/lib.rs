// src/lib.rs
//! Phong Scene
//!
//! A small lit 3D scene rendered with wgpu and winit: two textured cubes, a
//! filler and a key light drawn as markers, and a fly camera.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod input;
pub mod prelude;
pub mod wgpu_utils;

pub use app::{run, App};
pub use config::AppConfig;
