//! # Primitive Shape Generation
//!
//! Cube generation with per-face normals and texture coordinates.

use super::GeometryData;
use crate::gfx::scene::vertex::Vertex3D;

/// Corner signs, normal and UV for each of the 4 vertices of each face.
/// Order: front (+Z), back (-Z), left (-X), right (+X), bottom (-Y), top (+Y).
#[rustfmt::skip]
const CUBE_FACES: [([[f32; 3]; 4], [f32; 3], [[f32; 2]; 4]); 6] = [
    // Front face
    ([[-1.0, -1.0,  1.0], [ 1.0, -1.0,  1.0], [ 1.0,  1.0,  1.0], [-1.0,  1.0,  1.0]],
     [0.0, 0.0, 1.0],
     [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]),
    // Back face
    ([[-1.0, -1.0, -1.0], [ 1.0, -1.0, -1.0], [ 1.0,  1.0, -1.0], [-1.0,  1.0, -1.0]],
     [0.0, 0.0, -1.0],
     [[1.0, 0.0], [0.0, 0.0], [0.0, 1.0], [1.0, 1.0]]),
    // Left face
    ([[-1.0, -1.0, -1.0], [-1.0, -1.0,  1.0], [-1.0,  1.0,  1.0], [-1.0,  1.0, -1.0]],
     [-1.0, 0.0, 0.0],
     [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]),
    // Right face
    ([[ 1.0, -1.0, -1.0], [ 1.0, -1.0,  1.0], [ 1.0,  1.0,  1.0], [ 1.0,  1.0, -1.0]],
     [1.0, 0.0, 0.0],
     [[1.0, 0.0], [0.0, 0.0], [0.0, 1.0], [1.0, 1.0]]),
    // Bottom face
    ([[-1.0, -1.0, -1.0], [ 1.0, -1.0, -1.0], [ 1.0, -1.0,  1.0], [-1.0, -1.0,  1.0]],
     [0.0, -1.0, 0.0],
     [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]]),
    // Top face
    ([[-1.0,  1.0, -1.0], [ 1.0,  1.0, -1.0], [ 1.0,  1.0,  1.0], [-1.0,  1.0,  1.0]],
     [0.0, 1.0, 0.0],
     [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]),
];

/// Writes the 24 cube vertices for an edge length of `size` into `data.vertices`,
/// replacing whatever was there.
pub fn write_cube_vertices(data: &mut GeometryData, size: f32) {
    let half = size / 2.0;
    data.vertices.clear();
    data.vertices.reserve(24);

    for (corners, normal, uvs) in CUBE_FACES.iter() {
        for (corner, uv) in corners.iter().zip(uvs.iter()) {
            data.vertices.push(Vertex3D {
                position: [corner[0] * half, corner[1] * half, corner[2] * half],
                normal: *normal,
                tex_coords: *uv,
            });
        }
    }
}

/// Writes the 36 cube indices into `data.indices`, replacing whatever was there.
pub fn write_cube_indices(data: &mut GeometryData) {
    data.indices.clear();
    data.indices.reserve(36);

    // 2 triangles per face: (0, 1, 2) and (2, 3, 0) relative to the face's first vertex
    for face in 0..6u32 {
        let base = face * 4;
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }
}

/// Generate a cube with edge length `size` centered at the origin
///
/// Vertices are not shared between faces, so every face carries its own
/// axis-aligned normal. Behavior for a non-positive size is unspecified.
pub fn generate_cube(size: f32) -> GeometryData {
    let mut data = GeometryData::new();
    write_cube_vertices(&mut data, size);
    write_cube_indices(&mut data);
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    const AXES: [[f32; 3]; 6] = [
        [1.0, 0.0, 0.0],
        [-1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
    ];

    #[test]
    fn test_cube_generation() {
        for size in [0.1, 1.0, 1.5, 42.0] {
            let cube = generate_cube(size);
            assert_eq!(cube.vertices.len(), 24); // 6 faces * 4 vertices
            assert_eq!(cube.indices.len(), 36); // 6 faces * 2 triangles * 3 indices
            assert_eq!(cube.vertex_count(), 24);
            assert_eq!(cube.triangle_count(), 12);
        }
    }

    #[test]
    fn test_every_normal_is_an_axis() {
        let cube = generate_cube(2.0);
        for vertex in &cube.vertices {
            assert!(AXES.contains(&vertex.normal), "{:?}", vertex.normal);
        }
        // Each face uses a distinct axis, shared by its 4 vertices
        for (face, chunk) in cube.vertices.chunks(4).enumerate() {
            assert!(chunk.iter().all(|v| v.normal == chunk[0].normal), "face {face}");
        }
        let mut seen: Vec<[f32; 3]> = cube.vertices.chunks(4).map(|c| c[0].normal).collect();
        seen.dedup();
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_positions_lie_on_half_size() {
        let cube = generate_cube(1.5);
        for vertex in &cube.vertices {
            for component in vertex.position {
                assert_eq!(component.abs(), 0.75);
            }
        }
    }

    #[test]
    fn test_faces_lie_on_their_normal_side() {
        let cube = generate_cube(1.0);
        for vertex in &cube.vertices {
            let dot: f32 = (0..3).map(|i| vertex.position[i] * vertex.normal[i]).sum();
            assert_eq!(dot, 0.5);
        }
    }

    #[test]
    fn test_same_size_is_identical() {
        let a = generate_cube(1.5);
        let b = generate_cube(1.5);
        assert_eq!(
            bytemuck::cast_slice::<Vertex3D, u8>(&a.vertices),
            bytemuck::cast_slice::<Vertex3D, u8>(&b.vertices)
        );
        assert_eq!(a.indices, b.indices);
    }

    #[test]
    fn test_rewrite_overwrites_instead_of_appending() {
        let mut data = generate_cube(1.0);
        write_cube_vertices(&mut data, 3.0);
        write_cube_indices(&mut data);
        assert_eq!(data, generate_cube(3.0));
    }

    #[test]
    fn test_indices_stay_within_their_face() {
        let cube = generate_cube(1.0);
        for (face, triangles) in cube.indices.chunks(6).enumerate() {
            let base = face as u32 * 4;
            assert!(triangles.iter().all(|&i| (base..base + 4).contains(&i)));
        }
    }
}
