//! Common imports for building or driving a scene.
//!
//! ```no_run
//! use phong_scene::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     run(AppConfig::from_env())
//! }
//! ```

pub use crate::app::{run, App};
pub use crate::config::{AppConfig, CameraConfig};
pub use crate::error::{RenderError, TextureError};

pub use crate::gfx::backend::{RenderBackend, ShaderKind};
pub use crate::gfx::camera::{CameraMovement, FlyCamera, ProjectionMode};
pub use crate::gfx::geometry::{generate_cube, GeometryData};
pub use crate::gfx::scene::{build_default_scene, Scene, Shape};
pub use crate::gfx::RenderEngine;

pub use cgmath::{Point3, Vector2, Vector3};
