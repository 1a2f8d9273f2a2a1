//! Drawable shapes: textured cubes and the cube markers that stand in for lights.
//!
//! All variants share one record ([`Shape`]) holding geometry, transform and
//! material. What differs between a cube and a light is captured by the closed
//! [`ShapeKind`] enum and resolved with a `match` in [`Drawable::draw`].

use std::path::{Path, PathBuf};

use cgmath::{Matrix4, Vector2, Vector3, Zero};

use crate::{
    error::RenderError,
    gfx::{
        backend::{DrawCall, DrawPrimitive, RenderBackend},
        geometry::{write_cube_indices, write_cube_vertices, GeometryData},
        resources::{texture_loader::load_texture, uniforms::ObjectUniforms},
    },
};

/// Position and scale. Rotation is not supported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Transform {
    pub fn new(position: Vector3<f32>, scale: Vector3<f32>) -> Self {
        Self { position, scale }
    }

    /// translate(position) * scale(scale)
    pub fn model_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(Vector3::zero(), Vector3::new(1.0, 1.0, 1.0))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Base color, each channel in 0..=1
    pub color: Vector3<f32>,
    /// Multiplier applied to texture coordinates before sampling
    pub uv_scale: Vector2<f32>,
    /// Texture file, relative to the scene's asset directory
    pub texture_path: Option<PathBuf>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Vector3::new(1.0, 1.0, 1.0),
            uv_scale: Vector2::new(1.0, 1.0),
            texture_path: None,
        }
    }
}

/// Light-only properties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSource {
    pub color: Vector3<f32>,
    /// Stored for completeness; the shading model does not read it.
    pub intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    Cube,
    Light(LightSource),
}

/// Geometry generation and drawing, implemented by every shape variant.
pub trait Drawable<B: RenderBackend> {
    /// Regenerates vertex data from scratch.
    fn generate_vertices(&mut self);

    /// Regenerates index data from scratch.
    fn generate_indices(&mut self);

    fn generate_geometry(&mut self) {
        self.generate_vertices();
        self.generate_indices();
    }

    /// Issues one draw call with `shader`. Bind state is not preserved afterwards.
    fn draw(&self, backend: &mut B, shader: &B::Shader, view: Matrix4<f32>, projection: Matrix4<f32>);
}

/// A cube-based scene entity owning its geometry and GPU resources.
///
/// The mesh and texture are released when the shape is dropped.
pub struct Shape<B: RenderBackend> {
    name: String,
    kind: ShapeKind,
    size: f32,
    transform: Transform,
    material: Material,
    geometry: GeometryData,
    mesh: Option<B::Mesh>,
    texture: Option<B::Texture>,
}

impl<B: RenderBackend> Shape<B> {
    /// Creates a cube with edge length `size`. GPU resources are created later by
    /// [`Shape::upload`].
    pub fn cube(
        size: f32,
        position: Vector3<f32>,
        scale: Vector3<f32>,
        color: Vector3<f32>,
        texture_path: Option<PathBuf>,
        uv_scale: Vector2<f32>,
    ) -> Self {
        let mut shape = Self {
            name: "Cube".to_string(),
            kind: ShapeKind::Cube,
            size,
            transform: Transform::new(position, scale),
            material: Material {
                color,
                uv_scale,
                texture_path,
            },
            geometry: GeometryData::new(),
            mesh: None,
            texture: None,
        };
        shape.generate_geometry();
        shape
    }

    /// Creates a light marker cube at `position`. The light color doubles as the
    /// marker's base color.
    pub fn light(position: Vector3<f32>, color: Vector3<f32>, size: f32, intensity: f32) -> Self {
        let mut shape = Self::cube(
            size,
            position,
            Vector3::new(1.0, 1.0, 1.0),
            color,
            None,
            Vector2::new(1.0, 1.0),
        );
        shape.name = "Light".to_string();
        shape.kind = ShapeKind::Light(LightSource { color, intensity });
        shape
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Creates the GPU mesh and, if a texture path is set, loads and uploads the
    /// texture. A texture that fails to load is logged and the shape stays
    /// untextured.
    pub fn upload(&mut self, backend: &mut B, asset_root: &Path) -> Result<(), RenderError> {
        self.mesh = Some(backend.create_mesh(&self.name, &self.geometry)?);

        if let Some(relative) = &self.material.texture_path {
            let path = asset_root.join(relative);
            let label = format!("{} Texture", self.name);
            self.texture = match load_texture(&path) {
                Ok(image) => backend
                    .create_texture(&label, &image)
                    .inspect_err(|err| log::error!("{err}"))
                    .ok(),
                Err(err) => {
                    log::error!("{err}");
                    None
                }
            };
        }

        Ok(())
    }

    pub fn is_uploaded(&self) -> bool {
        self.mesh.is_some()
    }

    /// Changes the edge length, regenerating geometry and re-uploading the mesh
    /// in place. Nothing happens if the size is unchanged.
    ///
    /// Returns whether the GPU buffers were rewritten.
    pub fn set_size(&mut self, new_size: f32, backend: &mut B) -> bool {
        if self.size == new_size {
            return false;
        }
        self.size = new_size;
        self.generate_geometry();

        match self.mesh.as_mut() {
            Some(mesh) => {
                backend.update_mesh(mesh, &self.geometry);
                true
            }
            None => false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn is_light(&self) -> bool {
        matches!(self.kind, ShapeKind::Light(_))
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn geometry(&self) -> &GeometryData {
        &self.geometry
    }

    pub fn index_count(&self) -> u32 {
        self.geometry.indices.len() as u32
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn position(&self) -> Vector3<f32> {
        self.transform.position
    }

    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.transform.position = position;
    }

    pub fn scale(&self) -> Vector3<f32> {
        self.transform.scale
    }

    pub fn set_scale(&mut self, scale: Vector3<f32>) {
        self.transform.scale = scale;
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn color(&self) -> Vector3<f32> {
        self.material.color
    }

    pub fn set_color(&mut self, color: Vector3<f32>) {
        self.material.color = color;
    }

    pub fn uv_scale(&self) -> Vector2<f32> {
        self.material.uv_scale
    }

    pub fn set_uv_scale(&mut self, uv_scale: Vector2<f32>) {
        self.material.uv_scale = uv_scale;
    }

    pub fn texture_path(&self) -> Option<&Path> {
        self.material.texture_path.as_deref()
    }

    /// Takes effect on the next [`Shape::upload`].
    pub fn set_texture_path(&mut self, path: Option<PathBuf>) {
        self.material.texture_path = path;
    }

    pub fn texture(&self) -> Option<&B::Texture> {
        self.texture.as_ref()
    }

    pub fn light_source(&self) -> Option<&LightSource> {
        match &self.kind {
            ShapeKind::Light(light) => Some(light),
            ShapeKind::Cube => None,
        }
    }

    /// `None` for plain cubes.
    pub fn light_color(&self) -> Option<Vector3<f32>> {
        self.light_source().map(|light| light.color)
    }

    /// Ignored for plain cubes.
    pub fn set_light_color(&mut self, color: Vector3<f32>) {
        if let ShapeKind::Light(light) = &mut self.kind {
            light.color = color;
        }
    }

    pub fn intensity(&self) -> Option<f32> {
        self.light_source().map(|light| light.intensity)
    }

    /// Ignored for plain cubes.
    pub fn set_intensity(&mut self, intensity: f32) {
        if let ShapeKind::Light(light) = &mut self.kind {
            light.intensity = intensity;
        }
    }
}

impl<B: RenderBackend> Drawable<B> for Shape<B> {
    fn generate_vertices(&mut self) {
        write_cube_vertices(&mut self.geometry, self.size);
    }

    fn generate_indices(&mut self) {
        write_cube_indices(&mut self.geometry);
    }

    fn draw(&self, backend: &mut B, shader: &B::Shader, view: Matrix4<f32>, projection: Matrix4<f32>) {
        let Some(mesh) = self.mesh.as_ref() else {
            log::trace!("Skipping '{}': not uploaded", self.name);
            return;
        };
        let model = self.transform.model_matrix();

        let call = match self.kind {
            ShapeKind::Cube => DrawCall {
                shader,
                mesh,
                texture: self.texture.as_ref(),
                uniforms: ObjectUniforms::new(
                    model,
                    view,
                    projection,
                    self.material.color,
                    self.material.uv_scale,
                ),
                primitive: DrawPrimitive::for_geometry(&self.geometry),
            },
            ShapeKind::Light(_) => DrawCall {
                shader,
                mesh,
                texture: None,
                uniforms: ObjectUniforms::marker(model, view, projection),
                primitive: DrawPrimitive::Indexed {
                    index_count: self.index_count(),
                },
            },
        };

        backend.draw(call);
    }
}
