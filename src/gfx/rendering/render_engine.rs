//! WGPU-based implementation of the scene's render backend
//!
//! Draws issued during a frame are queued with cloned handles to their
//! pipeline, buffers and bind groups, then replayed into a single render pass
//! when the frame ends.

use wgpu::util::DeviceExt;

use crate::{
    error::RenderError,
    gfx::{
        backend::{DrawCall, RenderBackend, ShaderKind},
        camera::OPENGL_TO_WGPU_MATRIX,
        geometry::GeometryData,
        resources::{
            global_bindings::{create_object_binding, object_bind_group_layout, ObjectUBO},
            texture_loader::TextureImage,
            texture_resource::texture_bind_group_layout,
            uniforms::LightingUniforms,
            DepthBuffer, GlobalBindings, TextureResource,
        },
    },
    wgpu_utils::BindGroupLayoutWithDesc,
};

use super::{
    pipeline_manager::{PipelineManager, ShaderPipelines},
    render_pass_ext::{DrawQueued, QueuedDraw},
};

/// Vertex/index buffers of one shape plus its object uniform block.
///
/// The uniform block is rewritten on every draw, so a mesh is drawn at most
/// once per frame.
pub struct GpuMesh {
    label: String,
    vertex_buffer: wgpu::Buffer,
    index_buffer: Option<wgpu::Buffer>,
    uniforms: ObjectUBO,
    bind_group: wgpu::BindGroup,
}

impl Drop for GpuMesh {
    fn drop(&mut self) {
        log::trace!("Releasing mesh '{}'", self.label);
    }
}

pub struct GpuTexture {
    resource: TextureResource,
    bind_group: wgpu::BindGroup,
}

impl GpuTexture {
    pub fn size(&self) -> (u32, u32) {
        let size = self.resource.texture.size();
        (size.width, size.height)
    }
}

struct Frame {
    surface_texture: wgpu::SurfaceTexture,
    clear_color: [f64; 4],
    draws: Vec<QueuedDraw>,
}

/// Core rendering engine managing the surface, device and draw submission
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_buffer: DepthBuffer,
    pipeline_manager: PipelineManager,
    global_bindings: GlobalBindings,
    object_layout: BindGroupLayoutWithDesc,
    texture_layout: BindGroupLayoutWithDesc,
    white_texture_bind_group: wgpu::BindGroup,
    wireframe: bool,
    frame: Option<Frame>,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// Fails if no adapter or device is available, or the surface cannot be
    /// created.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> Result<RenderEngine, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|err| RenderError::Adapter(err.to_string()))?;

        let info = adapter.get_info();
        log::info!("Using adapter '{}' ({:?})", info.name, info.backend);

        // Wireframe is optional; the fill pipelines are used when it is missing.
        let required_features = adapter.features() & wgpu::Features::POLYGON_MODE_LINE;
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features,
                required_limits: wgpu::Limits::downlevel_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or_else(|| RenderError::Adapter("surface reports no formats".to_string()))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!(
            "Surface configured: {}x{} {:?}",
            config.width,
            config.height,
            format
        );

        let depth_buffer = DepthBuffer::new(&device, &config, "Depth Buffer");

        let global_bindings = GlobalBindings::new(&device);
        let object_layout = object_bind_group_layout(&device);
        let texture_layout = texture_bind_group_layout(&device);

        let pipeline_manager = PipelineManager::new(
            &device,
            &[
                global_bindings.bind_group_layout(),
                &object_layout.layout,
                &texture_layout.layout,
            ],
            format,
            required_features.contains(wgpu::Features::POLYGON_MODE_LINE),
        );

        let white = TextureResource::create_white(&device, &queue);
        let white_texture_bind_group =
            white.create_bind_group(&device, &texture_layout, "White Fallback Bind Group");

        Ok(RenderEngine {
            surface,
            device,
            queue,
            config,
            depth_buffer,
            pipeline_manager,
            global_bindings,
            object_layout,
            texture_layout,
            white_texture_bind_group,
            wireframe: false,
            frame: None,
        })
    }

    /// Resizes the surface and recreates the depth buffer.
    ///
    /// Zero-sized requests (minimized windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_buffer = DepthBuffer::new(&self.device, &self.config, "Depth Buffer");
        let (depth_width, depth_height) = self.depth_buffer.size();
        log::debug!("Depth buffer resized to {depth_width}x{depth_height}");
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }

    fn create_vertex_buffer(&self, label: &str, geometry: &GeometryData) -> wgpu::Buffer {
        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Vertex Buffer")),
                contents: bytemuck::cast_slice(&geometry.vertices),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            })
    }

    fn create_index_buffer(&self, label: &str, geometry: &GeometryData) -> Option<wgpu::Buffer> {
        geometry.is_indexed().then(|| {
            self.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{label} Index Buffer")),
                    contents: bytemuck::cast_slice(&geometry.indices),
                    usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
                })
        })
    }
}

impl RenderBackend for RenderEngine {
    type Mesh = GpuMesh;
    type Texture = GpuTexture;
    type Shader = ShaderPipelines;

    fn create_shader(&mut self, kind: ShaderKind) -> Result<Self::Shader, RenderError> {
        self.pipeline_manager.create_pipelines(&self.device, kind)
    }

    fn create_mesh(
        &mut self,
        label: &str,
        geometry: &GeometryData,
    ) -> Result<Self::Mesh, RenderError> {
        let (uniforms, bind_group) = create_object_binding(
            &self.device,
            &self.object_layout,
            &format!("{label} Object Bind Group"),
        );

        Ok(GpuMesh {
            label: label.to_string(),
            vertex_buffer: self.create_vertex_buffer(label, geometry),
            index_buffer: self.create_index_buffer(label, geometry),
            uniforms,
            bind_group,
        })
    }

    fn update_mesh(&mut self, mesh: &mut Self::Mesh, geometry: &GeometryData) {
        let vertices: &[u8] = bytemuck::cast_slice(&geometry.vertices);
        if mesh.vertex_buffer.size() == vertices.len() as u64 {
            self.queue.write_buffer(&mesh.vertex_buffer, 0, vertices);
        } else {
            mesh.vertex_buffer = self.create_vertex_buffer(&mesh.label, geometry);
        }

        let indices: &[u8] = bytemuck::cast_slice(&geometry.indices);
        match &mesh.index_buffer {
            Some(buffer) if buffer.size() == indices.len() as u64 => {
                self.queue.write_buffer(buffer, 0, indices);
            }
            _ => mesh.index_buffer = self.create_index_buffer(&mesh.label, geometry),
        }
    }

    fn create_texture(
        &mut self,
        label: &str,
        image: &TextureImage,
    ) -> Result<Self::Texture, RenderError> {
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let resource = TextureResource::create_from_image(&self.device, &self.queue, image, label);
        let bind_group =
            resource.create_bind_group(&self.device, &self.texture_layout, &format!("{label} Bind Group"));

        if let Some(error) = pollster::block_on(self.device.pop_error_scope()) {
            return Err(RenderError::Upload {
                label: label.to_string(),
                details: error.to_string(),
            });
        }

        let texture = GpuTexture {
            resource,
            bind_group,
        };
        let (width, height) = texture.size();
        log::debug!("Uploaded texture '{label}' ({width}x{height})");
        Ok(texture)
    }

    fn begin_frame(&mut self, clear_color: [f64; 4]) -> Result<(), RenderError> {
        if self.frame.take().is_some() {
            log::warn!("Previous frame was never finished; dropping it");
        }

        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated; reconfiguring and skipping frame");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(err) => {
                log::warn!("Skipping frame: {err}");
                return Ok(());
            }
        };

        self.frame = Some(Frame {
            surface_texture,
            clear_color,
            draws: Vec::new(),
        });
        Ok(())
    }

    fn set_lighting(&mut self, lighting: &LightingUniforms) {
        self.global_bindings.update(&self.queue, *lighting);
    }

    fn draw(&mut self, call: DrawCall<'_, Self>) {
        let Some(frame) = self.frame.as_mut() else {
            return;
        };

        let uniforms = call
            .uniforms
            .with_projection(OPENGL_TO_WGPU_MATRIX * call.uniforms.projection_matrix());
        call.mesh.uniforms.write_content(&self.queue, &uniforms);

        let texture_bind_group = call
            .texture
            .map_or(&self.white_texture_bind_group, |texture| &texture.bind_group);

        frame.draws.push(QueuedDraw {
            pipeline: call.shader.select(self.wireframe).clone(),
            vertex_buffer: call.mesh.vertex_buffer.clone(),
            index_buffer: call.mesh.index_buffer.clone(),
            object_bind_group: call.mesh.bind_group.clone(),
            texture_bind_group: texture_bind_group.clone(),
            primitive: call.primitive,
        });
    }

    fn end_frame(&mut self) -> Result<(), RenderError> {
        let Some(frame) = self.frame.take() else {
            return Ok(());
        };

        let surface_texture_view = frame
            .surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let [r, g, b, a] = frame.clear_color;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_buffer.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);
            for draw in &frame.draws {
                render_pass.draw_queued(draw);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.surface_texture.present();
        Ok(())
    }

    fn set_wireframe(&mut self, enabled: bool) {
        if enabled == self.wireframe {
            return;
        }
        if enabled && !self.pipeline_manager.supports_wireframe() {
            log::warn!("Wireframe rendering is not supported by this device");
        }
        log::debug!("Wireframe {}", if enabled { "on" } else { "off" });
        self.wireframe = enabled;
    }
}
