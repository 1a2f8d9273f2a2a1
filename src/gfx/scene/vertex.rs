//! # Vertex Data Structures
//!
//! This module defines the vertex format shared by every mesh in the scene.
//! It provides a GPU-compatible layout with an 8-float stride.

/// A 3D vertex with position, normal and texture coordinate data.
///
/// # Memory Layout
///
/// The `#[repr(C)]` attribute ensures the struct has a C-compatible memory
/// layout, which is required for GPU buffer operations. The stride is 32 bytes
/// (3 + 3 + 2 floats).
///
/// Normals are expected to be unit length when authored; they are not
/// renormalized before upload.
///
/// # Examples
///
/// ```no_run
/// use phong_scene::gfx::scene::vertex::Vertex3D;
///
/// let vertex = Vertex3D {
///     position: [0.0, 1.0, 0.0],
///     normal: [0.0, 1.0, 0.0],
///     tex_coords: [0.5, 0.5],
/// };
/// ```
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3D {
    /// 3D position coordinates [x, y, z]
    pub position: [f32; 3],
    /// 3D normal vector [nx, ny, nz] for lighting calculations
    pub normal: [f32; 3],
    /// Texture coordinates [u, v], scaled by the material's UV scale in the shader
    pub tex_coords: [f32; 2],
}

impl Vertex3D {
    /// Number of floats per vertex.
    pub const FLOATS_PER_VERTEX: usize = 8;

    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    /// Returns the vertex buffer layout for wgpu rendering.
    ///
    /// - Attribute 0: Position (Float32x3)
    /// - Attribute 1: Normal (Float32x3)
    /// - Attribute 2: Texture coordinates (Float32x2)
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex3D>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_is_eight_floats() {
        assert_eq!(
            std::mem::size_of::<Vertex3D>(),
            Vertex3D::FLOATS_PER_VERTEX * std::mem::size_of::<f32>()
        );
        assert_eq!(Vertex3D::desc().array_stride, 32);
    }

    #[test]
    fn attribute_offsets_follow_field_order() {
        let layout = Vertex3D::desc();
        let offsets: Vec<u64> = layout.attributes.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 24]);
    }
}
