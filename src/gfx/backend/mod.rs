//! # Render Backend Abstraction
//!
//! The scene never talks to wgpu directly. It drives a [`RenderBackend`],
//! which owns the GPU objects behind the associated `Mesh`, `Texture` and
//! `Shader` types. Those types release their GPU resources when dropped, so an
//! entity holding them frees its buffers and textures exactly once.
//!
//! Two implementations exist:
//!
//! - [`RenderEngine`](crate::gfx::rendering::RenderEngine) - the wgpu renderer
//! - [`RecordingBackend`](recording::RecordingBackend) - records every call,
//!   used to test the scene and render pass without a GPU

pub mod recording;

use crate::{
    error::RenderError,
    gfx::{
        geometry::GeometryData,
        resources::{
            texture_loader::TextureImage,
            uniforms::{LightingUniforms, ObjectUniforms},
        },
    },
};

/// The two shader programs a scene owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderKind {
    /// Phong-lit, textured shapes.
    Object,
    /// Unlit solid white light markers.
    LightMarker,
}

impl ShaderKind {
    pub fn label(self) -> &'static str {
        match self {
            ShaderKind::Object => "Object Shader",
            ShaderKind::LightMarker => "Light Shader",
        }
    }
}

/// How a mesh's vertices are assembled into triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawPrimitive {
    Indexed { index_count: u32 },
    Vertices { vertex_count: u32 },
}

impl DrawPrimitive {
    /// Indexed when the geometry carries indices, otherwise a plain vertex draw.
    pub fn for_geometry(geometry: &GeometryData) -> Self {
        if geometry.is_indexed() {
            DrawPrimitive::Indexed {
                index_count: geometry.indices.len() as u32,
            }
        } else {
            DrawPrimitive::Vertices {
                vertex_count: geometry.vertices.len() as u32,
            }
        }
    }
}

/// One draw: a shader, a mesh, an optional texture and the per-draw uniforms.
pub struct DrawCall<'a, B: RenderBackend> {
    pub shader: &'a B::Shader,
    pub mesh: &'a B::Mesh,
    pub texture: Option<&'a B::Texture>,
    pub uniforms: ObjectUniforms,
    pub primitive: DrawPrimitive,
}

/// Everything the scene needs from a GPU.
///
/// Calls within a frame happen in the order
/// `begin_frame` -> `set_lighting` -> `draw`* -> `end_frame`. Bind state is not
/// preserved between draws; every [`DrawCall`] carries all it needs.
pub trait RenderBackend: Sized {
    type Mesh;
    type Texture;
    type Shader;

    /// Builds a shader program. Failure is fatal for the scene.
    fn create_shader(&mut self, kind: ShaderKind) -> Result<Self::Shader, RenderError>;

    /// Uploads geometry into new vertex (and index, if any) buffers.
    fn create_mesh(&mut self, label: &str, geometry: &GeometryData)
        -> Result<Self::Mesh, RenderError>;

    /// Replaces the contents of an existing mesh's buffers.
    fn update_mesh(&mut self, mesh: &mut Self::Mesh, geometry: &GeometryData);

    /// Uploads an image as a repeating, linearly filtered texture.
    fn create_texture(&mut self, label: &str, image: &TextureImage)
        -> Result<Self::Texture, RenderError>;

    /// Starts a frame: depth testing on, color and depth cleared.
    fn begin_frame(&mut self, clear_color: [f64; 4]) -> Result<(), RenderError>;

    /// Uploads the per-frame lighting block.
    fn set_lighting(&mut self, lighting: &LightingUniforms);

    fn draw(&mut self, call: DrawCall<'_, Self>);

    /// Finishes the frame and presents it.
    fn end_frame(&mut self) -> Result<(), RenderError>;

    /// Switches between filled and wireframe rasterization.
    fn set_wireframe(&mut self, enabled: bool);
}
