use std::path::Path;

use cgmath::{EuclideanSpace, Matrix4, Point3, Vector2, Vector3, Zero};

use crate::{
    error::RenderError,
    gfx::{
        backend::{RenderBackend, ShaderKind},
        resources::uniforms::LightingUniforms,
    },
};

use super::shape::{Drawable, Shape};

/// The two shader programs owned by a scene.
pub struct ShaderPrograms<B: RenderBackend> {
    pub object: B::Shader,
    pub light: B::Shader,
}

/// Scene containing shapes, lights and the shader programs that draw them
///
/// Light order matters: `lights[0]` is the filler light and `lights[1]` the key
/// light. Lights beyond index 1 are drawn as markers but do not light anything.
pub struct Scene<B: RenderBackend> {
    pub shapes: Vec<Shape<B>>,
    pub lights: Vec<Shape<B>>,
    shaders: Option<ShaderPrograms<B>>,
    clear_color: [f64; 4],
}

impl<B: RenderBackend> Scene<B> {
    pub fn new() -> Self {
        Self {
            shapes: Vec::new(),
            lights: Vec::new(),
            shaders: None,
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }

    pub fn with_clear_color(mut self, clear_color: [f64; 4]) -> Self {
        self.clear_color = clear_color;
        self
    }

    /// Creates both shader programs. Either failing is fatal.
    pub fn initialize(&mut self, backend: &mut B) -> Result<(), RenderError> {
        let object = backend.create_shader(ShaderKind::Object).inspect_err(|err| {
            log::error!("Failed to create shader program for shapes: {err}");
        })?;
        let light = backend
            .create_shader(ShaderKind::LightMarker)
            .inspect_err(|err| {
                log::error!("Failed to create shader program for lights: {err}");
            })?;

        self.shaders = Some(ShaderPrograms { object, light });
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.shaders.is_some()
    }

    pub fn add_shape(&mut self, shape: Shape<B>) {
        self.shapes.push(shape);
    }

    pub fn add_light(&mut self, light: Shape<B>) {
        debug_assert!(light.is_light(), "add_light expects a light shape");
        self.lights.push(light);
    }

    /// Uploads every shape and light that has no GPU mesh yet.
    pub fn init_gpu_resources(&mut self, backend: &mut B, asset_root: &Path) -> Result<(), RenderError> {
        for shape in self.shapes.iter_mut().chain(self.lights.iter_mut()) {
            if !shape.is_uploaded() {
                shape.upload(backend, asset_root)?;
            }
        }
        Ok(())
    }

    /// Resolves the filler and key roles into the lighting block.
    ///
    /// Returns `None` with no lights. With a single light the key light is
    /// black and sits at the origin.
    pub fn resolve_light_roles(&self, camera_position: Point3<f32>) -> Option<LightingUniforms> {
        let filler = self.lights.first()?;
        let (key_position, key_color) = match self.lights.get(1) {
            Some(key) => (key.position(), light_color(key)),
            None => (Vector3::zero(), Vector3::zero()),
        };

        Some(LightingUniforms::new(
            filler.position(),
            light_color(filler),
            key_position,
            key_color,
            camera_position.to_vec(),
        ))
    }

    /// Renders one frame: clear, lighting upload, shapes with the object shader,
    /// then light markers with the light shader.
    ///
    /// With no lights registered nothing is drawn at all, shapes included.
    pub fn render(
        &self,
        backend: &mut B,
        view: Matrix4<f32>,
        projection: Matrix4<f32>,
        camera_position: Point3<f32>,
    ) -> Result<(), RenderError> {
        backend.begin_frame(self.clear_color)?;

        let Some(lighting) = self.resolve_light_roles(camera_position) else {
            return Ok(());
        };
        let Some(shaders) = self.shaders.as_ref() else {
            log::warn!("Scene rendered before its shaders were created");
            return Ok(());
        };

        backend.set_lighting(&lighting);

        for shape in &self.shapes {
            shape.draw(backend, &shaders.object, view, projection);
        }
        for light in &self.lights {
            light.draw(backend, &shaders.light, view, projection);
        }

        Ok(())
    }

    pub fn get_light(&self, index: usize) -> Option<&Shape<B>> {
        self.lights.get(index)
    }

    pub fn get_light_mut(&mut self, index: usize) -> Option<&mut Shape<B>> {
        self.lights.get_mut(index)
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn get_statistics(&self) -> SceneStatistics {
        let all = || self.shapes.iter().chain(self.lights.iter());
        SceneStatistics {
            shape_count: self.shapes.len(),
            light_count: self.lights.len(),
            total_triangles: all().map(|s| s.geometry().triangle_count()).sum(),
            total_vertices: all().map(|s| s.geometry().vertex_count()).sum(),
        }
    }
}

impl<B: RenderBackend> Default for Scene<B> {
    fn default() -> Self {
        Self::new()
    }
}

fn light_color<B: RenderBackend>(light: &Shape<B>) -> Vector3<f32> {
    light.light_color().unwrap_or_else(Vector3::zero)
}

/// Scene statistics for logging
#[derive(Debug, PartialEq, Eq)]
pub struct SceneStatistics {
    pub shape_count: usize,
    pub light_count: usize,
    pub total_triangles: usize,
    pub total_vertices: usize,
}

/// Populates `scene` with the demo content: a wooden and a brick cube, then the
/// filler light followed by the key light.
pub fn build_default_scene<B: RenderBackend>(scene: &mut Scene<B>) {
    let unit = Vector3::new(1.0, 1.0, 1.0);
    let white = Vector3::new(1.0, 1.0, 1.0);

    scene.add_shape(
        Shape::cube(
            1.0,
            Vector3::new(0.0, 0.0, 0.0),
            unit,
            white,
            Some("wood.jpg".into()),
            Vector2::new(1.0, 1.0),
        )
        .with_name("Wood Cube"),
    );
    scene.add_shape(
        Shape::cube(
            1.5,
            Vector3::new(2.5, 0.0, 0.0),
            unit,
            white,
            Some("brick.jpg".into()),
            Vector2::new(1.0, 1.0),
        )
        .with_name("Brick Cube"),
    );

    scene.add_light(
        Shape::light(Vector3::new(2.5, 5.0, -0.8), white, 0.2, 0.8).with_name("Filler Light"),
    );
    scene.add_light(
        Shape::light(
            Vector3::new(-1.5, 4.0, -3.6),
            Vector3::new(0.0, 0.0, 1.0),
            0.1,
            0.5,
        )
        .with_name("Key Light"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::backend::{
        recording::{BackendEvent, RecordingBackend},
        DrawPrimitive,
    };
    use cgmath::SquareMatrix;

    fn camera() -> Point3<f32> {
        Point3::new(-5.0, 4.0, -0.3)
    }

    fn light(position: [f32; 3], color: [f32; 3]) -> Shape<RecordingBackend> {
        Shape::light(position.into(), color.into(), 0.2, 1.0)
    }

    fn cube() -> Shape<RecordingBackend> {
        Shape::cube(
            1.0,
            Vector3::zero(),
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(1.0, 1.0, 1.0),
            None,
            Vector2::new(1.0, 1.0),
        )
    }

    fn ready_scene(backend: &mut RecordingBackend) -> Scene<RecordingBackend> {
        let mut scene = Scene::new();
        scene.initialize(backend).unwrap();
        scene
    }

    #[test]
    fn default_scene_has_two_shapes_then_two_lights() {
        let mut scene: Scene<RecordingBackend> = Scene::new();
        build_default_scene(&mut scene);

        assert_eq!(scene.shape_count(), 2);
        assert_eq!(scene.light_count(), 2);
        assert_eq!(scene.shapes[0].size(), 1.0);
        assert_eq!(scene.shapes[1].size(), 1.5);
        assert_eq!(scene.shapes[1].position(), Vector3::new(2.5, 0.0, 0.0));
        assert_eq!(scene.shapes[0].texture_path(), Some(Path::new("wood.jpg")));
        assert_eq!(scene.shapes[1].texture_path(), Some(Path::new("brick.jpg")));

        let filler = scene.get_light(0).unwrap();
        assert_eq!(filler.position(), Vector3::new(2.5, 5.0, -0.8));
        assert_eq!(filler.light_color(), Some(Vector3::new(1.0, 1.0, 1.0)));
        let key = scene.get_light(1).unwrap();
        assert_eq!(key.position(), Vector3::new(-1.5, 4.0, -3.6));
        assert_eq!(key.light_color(), Some(Vector3::new(0.0, 0.0, 1.0)));
        assert_eq!(key.intensity(), Some(0.5));
    }

    #[test]
    fn default_scene_renders_two_shapes_then_two_lights() {
        let mut backend = RecordingBackend::new();
        let mut scene = ready_scene(&mut backend);
        build_default_scene(&mut scene);
        // textures are missing here, shapes fall back to untextured
        scene
            .init_gpu_resources(&mut backend, Path::new("/nonexistent"))
            .unwrap();
        backend.clear_events();

        scene
            .render(&mut backend, Matrix4::identity(), Matrix4::identity(), camera())
            .unwrap();

        let draws = backend.draws();
        let shaders: Vec<ShaderKind> = draws.iter().map(|d| d.shader).collect();
        assert_eq!(
            shaders,
            vec![
                ShaderKind::Object,
                ShaderKind::Object,
                ShaderKind::LightMarker,
                ShaderKind::LightMarker,
            ]
        );
        // meshes are drawn in insertion order
        let meshes: Vec<u32> = draws.iter().map(|d| d.mesh).collect();
        let mut sorted = meshes.clone();
        sorted.sort();
        assert_eq!(meshes, sorted);
        assert!(draws
            .iter()
            .all(|d| d.primitive == DrawPrimitive::Indexed { index_count: 36 }));
    }

    #[test]
    fn render_pass_order_is_clear_lighting_draws() {
        let mut backend = RecordingBackend::new();
        let mut scene = ready_scene(&mut backend);
        build_default_scene(&mut scene);
        scene
            .init_gpu_resources(&mut backend, Path::new("/nonexistent"))
            .unwrap();
        backend.clear_events();

        scene
            .render(&mut backend, Matrix4::identity(), Matrix4::identity(), camera())
            .unwrap();

        let events = backend.events();
        assert_eq!(events.len(), 6);
        assert_eq!(events[0], BackendEvent::FrameBegun([0.0, 0.0, 0.0, 1.0]));
        assert!(matches!(events[1], BackendEvent::LightingSet(_)));
        assert!(events[2..].iter().all(|e| matches!(e, BackendEvent::Draw(_))));
    }

    #[test]
    fn no_lights_clears_but_draws_nothing() {
        let mut backend = RecordingBackend::new();
        let mut scene = ready_scene(&mut backend);
        scene.add_shape(cube());
        scene
            .init_gpu_resources(&mut backend, Path::new("."))
            .unwrap();
        backend.clear_events();

        assert!(scene.resolve_light_roles(camera()).is_none());
        scene
            .render(&mut backend, Matrix4::identity(), Matrix4::identity(), camera())
            .unwrap();

        assert_eq!(backend.events(), vec![BackendEvent::FrameBegun([0.0, 0.0, 0.0, 1.0])]);
    }

    #[test]
    fn single_light_leaves_key_black_at_origin() {
        let mut scene: Scene<RecordingBackend> = Scene::new();
        scene.add_light(light([1.0, 2.0, 3.0], [0.5, 0.5, 0.5]));

        let lighting = scene.resolve_light_roles(camera()).unwrap();
        assert_eq!(lighting.light_position, [1.0, 2.0, 3.0, 0.0]);
        assert_eq!(lighting.light_color, [0.5, 0.5, 0.5, 0.0]);
        assert_eq!(lighting.key_light_position, [0.0; 4]);
        assert_eq!(lighting.key_light_color, [0.0; 4]);
        assert_eq!(lighting.view_position, [-5.0, 4.0, -0.3, 0.0]);
    }

    #[test]
    fn first_two_lights_are_filler_and_key() {
        let mut scene: Scene<RecordingBackend> = Scene::new();
        scene.add_light(light([1.0, 0.0, 0.0], [1.0, 0.0, 0.0]));
        scene.add_light(light([0.0, 1.0, 0.0], [0.0, 1.0, 0.0]));
        scene.add_light(light([0.0, 0.0, 1.0], [0.0, 0.0, 1.0]));

        let lighting = scene.resolve_light_roles(camera()).unwrap();
        assert_eq!(lighting.light_position, [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(lighting.light_color, [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(lighting.key_light_position, [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(lighting.key_light_color, [0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn extra_lights_are_drawn_but_not_shaded() {
        let mut backend = RecordingBackend::new();
        let mut scene = ready_scene(&mut backend);
        for i in 0..3 {
            scene.add_light(light([i as f32, 0.0, 0.0], [1.0, 1.0, 1.0]));
        }
        scene
            .init_gpu_resources(&mut backend, Path::new("."))
            .unwrap();
        backend.clear_events();

        scene
            .render(&mut backend, Matrix4::identity(), Matrix4::identity(), camera())
            .unwrap();

        assert_eq!(backend.draws().len(), 3);
    }

    #[test]
    fn shader_failure_is_fatal() {
        let mut backend = RecordingBackend::new().failing_shader(ShaderKind::LightMarker);
        let mut scene: Scene<RecordingBackend> = Scene::new();
        assert!(scene.initialize(&mut backend).is_err());
        assert!(!scene.is_initialized());
    }

    #[test]
    fn dropping_scene_releases_every_mesh_once() {
        let mut backend = RecordingBackend::new();
        let mut scene = ready_scene(&mut backend);
        build_default_scene(&mut scene);
        scene
            .init_gpu_resources(&mut backend, Path::new("/nonexistent"))
            .unwrap();
        drop(scene);
        assert_eq!(backend.released_mesh_count(), 4);
    }

    #[test]
    fn statistics_count_shapes_and_lights() {
        let mut scene: Scene<RecordingBackend> = Scene::new();
        build_default_scene(&mut scene);
        assert_eq!(
            scene.get_statistics(),
            SceneStatistics {
                shape_count: 2,
                light_count: 2,
                total_triangles: 48,
                total_vertices: 96,
            }
        );
    }
}
