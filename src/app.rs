use std::{sync::Arc, time::Instant};

use anyhow::Context;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{CursorGrabMode, Window, WindowAttributes, WindowId},
};

use crate::{
    config::AppConfig,
    gfx::{
        backend::RenderBackend,
        camera::{projection_matrix, CameraController, FlyCamera},
        scene::{build_default_scene, Scene},
        RenderEngine,
    },
    input::{process_input, FrameState, InputState},
};

/// Where the application is in its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPhase {
    Uninitialized,
    Running,
    Terminated,
}

/// Everything that exists once the window and GPU are up.
struct AppContext {
    window: Arc<Window>,
    engine: RenderEngine,
    scene: Scene<RenderEngine>,
    camera: FlyCamera,
    controller: CameraController,
    input: InputState,
    frame: FrameState,
    last_frame: Instant,
}

pub struct App {
    config: AppConfig,
    phase: AppPhase,
    context: Option<AppContext>,
    error: Option<anyhow::Error>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            phase: AppPhase::Uninitialized,
            context: None,
            error: None,
        }
    }

    pub fn phase(&self) -> AppPhase {
        self.phase
    }

    fn create_context(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<AppContext> {
        let attributes = WindowAttributes::default()
            .with_title(self.config.window_title.clone())
            .with_inner_size(PhysicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .context("Failed to create window")?,
        );
        capture_cursor(&window);

        let size = window.inner_size();
        let mut engine = pollster::block_on(RenderEngine::new(
            window.clone(),
            size.width,
            size.height,
        ))
        .context("Failed to initialize the renderer")?;

        let mut scene = Scene::new().with_clear_color(self.config.clear_color);
        scene
            .initialize(&mut engine)
            .context("Failed to create shader programs")?;
        build_default_scene(&mut scene);
        scene
            .init_gpu_resources(&mut engine, &self.config.asset_dir)
            .context("Failed to upload scene meshes")?;

        let stats = scene.get_statistics();
        log::info!(
            "Scene ready: {} shapes, {} lights, {} triangles",
            stats.shape_count,
            stats.light_count,
            stats.total_triangles
        );

        Ok(AppContext {
            window,
            engine,
            scene,
            camera: FlyCamera::from_config(&self.config.camera),
            controller: CameraController::new(size),
            input: InputState::new(),
            frame: FrameState::default(),
            last_frame: Instant::now(),
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.error = Some(error);
        self.terminate(event_loop);
    }

    fn terminate(&mut self, event_loop: &ActiveEventLoop) {
        self.phase = AppPhase::Terminated;
        event_loop.exit();
    }
}

/// Hides the cursor and keeps it inside the window. Not every platform
/// supports confinement, so locking is tried next. Look comes from raw mouse
/// motion either way.
fn capture_cursor(window: &Window) {
    let grabbed = window
        .set_cursor_grab(CursorGrabMode::Confined)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked));
    if let Err(err) = grabbed {
        log::warn!("Could not capture the cursor: {err}");
    }
    window.set_cursor_visible(false);
}

impl AppContext {
    /// One frame: input, then the scene, then present.
    fn redraw(&mut self) -> anyhow::Result<()> {
        let now = Instant::now();
        let delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        process_input(
            &self.input,
            delta_time,
            &mut self.camera,
            &mut self.scene,
            &mut self.frame,
        );
        self.engine.set_wireframe(self.frame.wireframe);

        let view = self.camera.view_matrix();
        let projection = projection_matrix(
            self.frame.projection_mode,
            self.camera.zoom,
            self.engine.aspect_ratio(),
        );

        self.scene
            .render(&mut self.engine, view, projection, self.camera.position)?;
        self.engine.end_frame()?;
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.context.is_some() || self.phase == AppPhase::Terminated {
            return;
        }

        match self.create_context(event_loop) {
            Ok(context) => {
                self.context = Some(context);
                self.phase = AppPhase::Running;
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(context) = self.context.as_mut() else {
            return;
        };

        match event {
            WindowEvent::KeyboardInput { ref event, .. } => {
                context.input.process_keyboard(event);
            }
            WindowEvent::Focused(false) => context.input.clear(),
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                context.engine.resize(width, height);
            }
            WindowEvent::CloseRequested => self.terminate(event_loop),
            WindowEvent::CursorMoved { .. }
            | WindowEvent::MouseWheel { .. }
            | WindowEvent::MouseInput { .. } => {
                context.controller.process_events(&event, &mut context.camera);
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = context.redraw() {
                    self.fail(event_loop, err.context("Failed to render frame"));
                    return;
                }
                if context.frame.close_requested {
                    self.terminate(event_loop);
                }
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let Some(context) = self.context.as_mut() else {
            return;
        };
        context
            .controller
            .process_device_event(&event, &mut context.camera);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(context) = self.context.as_ref() {
            context.window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // GPU resources go before the window they render into
        if let Some(context) = self.context.take() {
            let AppContext { window, engine, scene, .. } = context;
            drop(scene);
            drop(engine);
            drop(window);
        }
        log::info!("Shut down");
    }
}

/// Opens the window and runs the render loop until it closes.
pub fn run(config: AppConfig) -> anyhow::Result<()> {
    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop
        .run_app(&mut app)
        .context("Event loop terminated abnormally")?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
