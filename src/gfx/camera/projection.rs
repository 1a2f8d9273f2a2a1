use cgmath::{ortho, perspective, Deg, Matrix4};

/// Converts OpenGL clip space (z in -1..1) to wgpu clip space (z in 0..1).
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;
/// Half extent of the orthographic view volume.
pub const ORTHO_EXTENT: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionMode {
    #[default]
    Perspective,
    Orthographic,
}

/// Projection in OpenGL clip-space convention.
///
/// `zoom` is the vertical field of view in degrees and is ignored in
/// orthographic mode.
pub fn projection_matrix(mode: ProjectionMode, zoom: f32, aspect: f32) -> Matrix4<f32> {
    match mode {
        ProjectionMode::Perspective => perspective(Deg(zoom), aspect, Z_NEAR, Z_FAR),
        ProjectionMode::Orthographic => ortho(
            -ORTHO_EXTENT,
            ORTHO_EXTENT,
            -ORTHO_EXTENT,
            ORTHO_EXTENT,
            Z_NEAR,
            Z_FAR,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{SquareMatrix, Vector4};

    #[test]
    fn orthographic_ignores_zoom_and_aspect() {
        let a = projection_matrix(ProjectionMode::Orthographic, 45.0, 16.0 / 9.0);
        let b = projection_matrix(ProjectionMode::Orthographic, 10.0, 1.0);
        assert_eq!(a, b);
        assert_eq!(a.x.x, 1.0 / ORTHO_EXTENT);
        assert_eq!(a.y.y, 1.0 / ORTHO_EXTENT);
    }

    #[test]
    fn perspective_follows_zoom_and_aspect() {
        let wide = projection_matrix(ProjectionMode::Perspective, 45.0, 2.0);
        let narrow = projection_matrix(ProjectionMode::Perspective, 30.0, 2.0);
        assert!(narrow.y.y > wide.y.y);
        assert!((wide.y.y / wide.x.x - 2.0).abs() < 1e-5);
        // perspective divide
        assert_eq!(wide.z.w, -1.0);
    }

    #[test]
    fn modes_produce_different_matrices() {
        assert_ne!(
            projection_matrix(ProjectionMode::Perspective, 45.0, 1.0),
            projection_matrix(ProjectionMode::Orthographic, 45.0, 1.0)
        );
    }

    #[test]
    fn wgpu_conversion_maps_depth_range() {
        let proj = OPENGL_TO_WGPU_MATRIX * projection_matrix(ProjectionMode::Perspective, 45.0, 1.0);
        let near = proj * Vector4::new(0.0, 0.0, -Z_NEAR, 1.0);
        let far = proj * Vector4::new(0.0, 0.0, -Z_FAR, 1.0);
        assert!((near.z / near.w).abs() < 1e-5);
        assert!((far.z / far.w - 1.0).abs() < 1e-4);
        assert!(OPENGL_TO_WGPU_MATRIX.invert().is_some());
    }
}
