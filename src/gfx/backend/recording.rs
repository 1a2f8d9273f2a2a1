//! A [`RenderBackend`] that only records what it is asked to do.
//!
//! Meshes and textures handed out by the recorder log their own release when
//! dropped, so resource lifetimes can be checked as well as draw order.

use std::{cell::RefCell, rc::Rc};

use super::{DrawCall, DrawPrimitive, RenderBackend, ShaderKind};
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

type EventLog = Rc<RefCell<Vec<BackendEvent>>>;

/// A draw as seen by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDraw {
    pub shader: ShaderKind,
    pub mesh: u32,
    pub texture: Option<u32>,
    pub primitive: DrawPrimitive,
    pub uniforms: ObjectUniforms,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BackendEvent {
    ShaderCreated(ShaderKind),
    MeshCreated {
        id: u32,
        label: String,
        vertex_count: usize,
        index_count: usize,
    },
    MeshUpdated {
        id: u32,
        vertex_count: usize,
        index_count: usize,
    },
    MeshReleased(u32),
    TextureCreated {
        id: u32,
        label: String,
        width: u32,
        height: u32,
    },
    TextureReleased(u32),
    FrameBegun([f64; 4]),
    LightingSet(LightingUniforms),
    Draw(RecordedDraw),
    FrameEnded,
    WireframeSet(bool),
}

#[derive(Debug)]
pub struct RecordedMesh {
    id: u32,
    log: EventLog,
}

impl RecordedMesh {
    pub fn id(&self) -> u32 {
        self.id
    }
}

impl Drop for RecordedMesh {
    fn drop(&mut self) {
        self.log.borrow_mut().push(BackendEvent::MeshReleased(self.id));
    }
}

#[derive(Debug)]
pub struct RecordedTexture {
    id: u32,
    log: EventLog,
}

impl RecordedTexture {
    pub fn id(&self) -> u32 {
        self.id
    }
}

impl Drop for RecordedTexture {
    fn drop(&mut self) {
        self.log
            .borrow_mut()
            .push(BackendEvent::TextureReleased(self.id));
    }
}

#[derive(Debug)]
pub struct RecordedShader {
    pub kind: ShaderKind,
}

#[derive(Debug, Default)]
pub struct RecordingBackend {
    log: EventLog,
    next_id: u32,
    failing_shader: Option<ShaderKind>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `create_shader` fail for `kind`, to exercise startup failures.
    pub fn failing_shader(mut self, kind: ShaderKind) -> Self {
        self.failing_shader = Some(kind);
        self
    }

    pub fn events(&self) -> Vec<BackendEvent> {
        self.log.borrow().clone()
    }

    pub fn clear_events(&mut self) {
        self.log.borrow_mut().clear();
    }

    pub fn draws(&self) -> Vec<RecordedDraw> {
        self.log
            .borrow()
            .iter()
            .filter_map(|event| match event {
                BackendEvent::Draw(draw) => Some(draw.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn mesh_update_count(&self) -> usize {
        self.count(|event| matches!(event, BackendEvent::MeshUpdated { .. }))
    }

    pub fn released_mesh_count(&self) -> usize {
        self.count(|event| matches!(event, BackendEvent::MeshReleased(_)))
    }

    pub fn released_texture_count(&self) -> usize {
        self.count(|event| matches!(event, BackendEvent::TextureReleased(_)))
    }

    fn count(&self, predicate: impl Fn(&BackendEvent) -> bool) -> usize {
        self.log.borrow().iter().filter(|event| predicate(event)).count()
    }

    fn push(&self, event: BackendEvent) {
        self.log.borrow_mut().push(event);
    }

    fn allocate_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

impl RenderBackend for RecordingBackend {
    type Mesh = RecordedMesh;
    type Texture = RecordedTexture;
    type Shader = RecordedShader;

    fn create_shader(&mut self, kind: ShaderKind) -> Result<Self::Shader, RenderError> {
        if self.failing_shader == Some(kind) {
            return Err(RenderError::Shader {
                label: kind.label().to_string(),
                details: "forced failure".to_string(),
            });
        }
        self.push(BackendEvent::ShaderCreated(kind));
        Ok(RecordedShader { kind })
    }

    fn create_mesh(
        &mut self,
        label: &str,
        geometry: &GeometryData,
    ) -> Result<Self::Mesh, RenderError> {
        let id = self.allocate_id();
        self.push(BackendEvent::MeshCreated {
            id,
            label: label.to_string(),
            vertex_count: geometry.vertex_count(),
            index_count: geometry.indices.len(),
        });
        Ok(RecordedMesh {
            id,
            log: self.log.clone(),
        })
    }

    fn update_mesh(&mut self, mesh: &mut Self::Mesh, geometry: &GeometryData) {
        self.push(BackendEvent::MeshUpdated {
            id: mesh.id,
            vertex_count: geometry.vertex_count(),
            index_count: geometry.indices.len(),
        });
    }

    fn create_texture(
        &mut self,
        label: &str,
        image: &TextureImage,
    ) -> Result<Self::Texture, RenderError> {
        let id = self.allocate_id();
        self.push(BackendEvent::TextureCreated {
            id,
            label: label.to_string(),
            width: image.width,
            height: image.height,
        });
        Ok(RecordedTexture {
            id,
            log: self.log.clone(),
        })
    }

    fn begin_frame(&mut self, clear_color: [f64; 4]) -> Result<(), RenderError> {
        self.push(BackendEvent::FrameBegun(clear_color));
        Ok(())
    }

    fn set_lighting(&mut self, lighting: &LightingUniforms) {
        self.push(BackendEvent::LightingSet(*lighting));
    }

    fn draw(&mut self, call: DrawCall<'_, Self>) {
        self.push(BackendEvent::Draw(RecordedDraw {
            shader: call.shader.kind,
            mesh: call.mesh.id,
            texture: call.texture.map(|texture| texture.id),
            primitive: call.primitive,
            uniforms: call.uniforms,
        }));
    }

    fn end_frame(&mut self) -> Result<(), RenderError> {
        self.push(BackendEvent::FrameEnded);
        Ok(())
    }

    fn set_wireframe(&mut self, enabled: bool) {
        self.push(BackendEvent::WireframeSet(enabled));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::generate_cube;

    #[test]
    fn dropped_mesh_is_released_once() {
        let mut backend = RecordingBackend::new();
        let mesh = backend.create_mesh("cube", &generate_cube(1.0)).unwrap();
        let id = mesh.id();
        drop(mesh);

        assert_eq!(backend.released_mesh_count(), 1);
        assert_eq!(backend.events().last(), Some(&BackendEvent::MeshReleased(id)));
    }

    #[test]
    fn forced_shader_failure_only_hits_that_kind() {
        let mut backend = RecordingBackend::new().failing_shader(ShaderKind::LightMarker);
        assert!(backend.create_shader(ShaderKind::Object).is_ok());
        assert!(matches!(
            backend.create_shader(ShaderKind::LightMarker),
            Err(RenderError::Shader { .. })
        ));
    }

    #[test]
    fn ids_are_unique_across_resources() {
        let mut backend = RecordingBackend::new();
        let image = TextureImage {
            width: 1,
            height: 1,
            channels: 4,
            pixels: vec![0; 4],
        };
        let mesh = backend.create_mesh("cube", &generate_cube(1.0)).unwrap();
        let texture = backend.create_texture("tex", &image).unwrap();
        assert_ne!(mesh.id(), texture.id());

        drop(texture);
        assert_eq!(backend.released_texture_count(), 1);
        assert_eq!(backend.released_mesh_count(), 0);
        drop(mesh);
        assert_eq!(backend.released_mesh_count(), 1);
    }
}
