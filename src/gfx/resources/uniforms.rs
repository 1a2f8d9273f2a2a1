//! Uniform block contents shared by the object and light-marker shaders.
//!
//! Both structs MUST match the WGSL declarations in `rendering/shaders/`
//! exactly, including the padding.

use cgmath::{Matrix, Matrix4, SquareMatrix, Vector2, Vector3};

/// Per-draw uniforms (bind group 1).
///
/// Matrices are in OpenGL clip-space convention; the wgpu backend converts the
/// projection when it uploads the block.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniforms {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    /// Inverse-transpose of `model`, used to bring normals into world space.
    pub normal_matrix: [[f32; 4]; 4],
    /// `objectColor`, alpha unused.
    pub object_color: [f32; 4],
    pub uv_scale: [f32; 2],
    _padding: [f32; 2],
}
// 4 * 64 + 16 + 8 + 8 = 288 bytes

impl ObjectUniforms {
    pub fn new(
        model: Matrix4<f32>,
        view: Matrix4<f32>,
        projection: Matrix4<f32>,
        object_color: Vector3<f32>,
        uv_scale: Vector2<f32>,
    ) -> Self {
        let normal_matrix = model
            .invert()
            .unwrap_or_else(Matrix4::identity)
            .transpose();

        Self {
            model: model.into(),
            view: view.into(),
            projection: projection.into(),
            normal_matrix: normal_matrix.into(),
            object_color: [object_color.x, object_color.y, object_color.z, 1.0],
            uv_scale: uv_scale.into(),
            _padding: [0.0; 2],
        }
    }

    /// Uniforms for an unlit light marker: only the transforms matter.
    pub fn marker(model: Matrix4<f32>, view: Matrix4<f32>, projection: Matrix4<f32>) -> Self {
        Self::new(
            model,
            view,
            projection,
            Vector3::new(1.0, 1.0, 1.0),
            Vector2::new(1.0, 1.0),
        )
    }

    pub fn model_matrix(&self) -> Matrix4<f32> {
        self.model.into()
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection.into()
    }

    /// Returns a copy with the projection replaced.
    pub fn with_projection(mut self, projection: Matrix4<f32>) -> Self {
        self.projection = projection.into();
        self
    }
}

/// Per-frame lighting uniforms (bind group 0).
///
/// Index 0 of the scene's lights feeds the `light_*` (filler) fields and index 1
/// the `key_light_*` fields.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniforms {
    /// `lightPos` (w unused)
    pub light_position: [f32; 4],
    /// `lightColor` (w unused)
    pub light_color: [f32; 4],
    /// `keyLightPos` (w unused)
    pub key_light_position: [f32; 4],
    /// `keyLightColor` (w unused)
    pub key_light_color: [f32; 4],
    /// `viewPosition` (w unused)
    pub view_position: [f32; 4],
}

impl LightingUniforms {
    pub fn new(
        filler_position: Vector3<f32>,
        filler_color: Vector3<f32>,
        key_position: Vector3<f32>,
        key_color: Vector3<f32>,
        view_position: Vector3<f32>,
    ) -> Self {
        Self {
            light_position: extend(filler_position),
            light_color: extend(filler_color),
            key_light_position: extend(key_position),
            key_light_color: extend(key_color),
            view_position: extend(view_position),
        }
    }
}

fn extend(v: Vector3<f32>) -> [f32; 4] {
    [v.x, v.y, v.z, 0.0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_match_shader_sizes() {
        assert_eq!(std::mem::size_of::<ObjectUniforms>(), 288);
        assert_eq!(std::mem::size_of::<LightingUniforms>(), 80);
    }

    #[test]
    fn normal_matrix_undoes_nonuniform_scale() {
        let model = Matrix4::from_nonuniform_scale(2.0, 4.0, 1.0);
        let uniforms = ObjectUniforms::new(
            model,
            Matrix4::identity(),
            Matrix4::identity(),
            Vector3::new(1.0, 1.0, 1.0),
            Vector2::new(1.0, 1.0),
        );
        let normal: Matrix4<f32> = uniforms.normal_matrix.into();
        assert_eq!(normal, Matrix4::from_nonuniform_scale(0.5, 0.25, 1.0));
    }

    #[test]
    fn normal_matrix_ignores_translation() {
        let model = Matrix4::from_translation(Vector3::new(3.0, -2.0, 1.0));
        let uniforms = ObjectUniforms::marker(model, Matrix4::identity(), Matrix4::identity());
        let normal: Matrix4<f32> = uniforms.normal_matrix.into();
        // only the upper 3x3 is used by the shader
        let n = normal * cgmath::Vector4::new(0.0, 1.0, 0.0, 0.0);
        assert_eq!(n.truncate(), Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn marker_is_white() {
        let uniforms = ObjectUniforms::marker(
            Matrix4::identity(),
            Matrix4::identity(),
            Matrix4::identity(),
        );
        assert_eq!(uniforms.object_color, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(uniforms.uv_scale, [1.0, 1.0]);
    }
}
