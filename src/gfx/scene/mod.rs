//! # Scene Management Module
//!
//! Shapes, lights and the scene container that renders them.
//!
//! ## Key Components
//!
//! - [`Scene`] - owns shapes, lights and the two shader programs
//! - [`Shape`] - a cube or light marker with its geometry, transform and material
//! - [`Vertex3D`] - vertex layout with position, normal, and texture coordinates
//!
//! ## Usage
//!
//! ```no_run
//! use phong_scene::gfx::backend::recording::RecordingBackend;
//! use phong_scene::gfx::scene::{build_default_scene, Scene};
//!
//! let mut backend = RecordingBackend::new();
//! let mut scene = Scene::new();
//! scene.initialize(&mut backend).unwrap();
//! build_default_scene(&mut scene);
//! ```
//!
//! The light list is ordered: the first light is the filler light and the
//! second the key light.

pub mod scene;
pub mod shape;
pub mod vertex;

// Re-export main types
pub use scene::{build_default_scene, Scene, SceneStatistics, ShaderPrograms};
pub use shape::{Drawable, LightSource, Material, Shape, ShapeKind, Transform};
pub use vertex::Vertex3D;
