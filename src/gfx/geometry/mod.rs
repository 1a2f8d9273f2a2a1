//! # Procedural Geometry Generation
//!
//! Builds the meshes used by the scene without any external model files.
//! Every shape in the scene is a cube, so [`generate_cube`] is the only
//! primitive.
//!
//! ```rust
//! use phong_scene::gfx::geometry::generate_cube;
//!
//! let cube = generate_cube(1.5);
//! assert_eq!(cube.vertex_count(), 24);
//! assert_eq!(cube.triangle_count(), 12);
//! ```

pub mod primitives;

pub use primitives::*;

use crate::gfx::scene::vertex::Vertex3D;

/// Interleaved geometry ready for GPU upload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryData {
    pub vertices: Vec<Vertex3D>,
    /// Triangle indices, three per triangle. Empty for non-indexed geometry.
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        if self.indices.is_empty() {
            self.vertices.len() / 3
        } else {
            self.indices.len() / 3
        }
    }

    pub fn is_indexed(&self) -> bool {
        !self.indices.is_empty()
    }
}
