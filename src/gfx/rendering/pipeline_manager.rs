//! Render pipeline creation for the object and light-marker shaders
//!
//! Shader modules are compiled once per [`ShaderKind`] and cached. Each kind
//! gets a filled pipeline and, when the device supports it, a wireframe twin.
//! Validation errors raised while building are captured with an error scope
//! and returned instead of panicking inside wgpu's default handler.

use std::collections::HashMap;

use wgpu::*;

use crate::{
    error::RenderError,
    gfx::{backend::ShaderKind, resources::TextureResource, scene::vertex::Vertex3D},
};

/// Parameters for one render pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub label: String,
    pub shader: ShaderKind,
    pub polygon_mode: PolygonMode,
    pub cull_mode: Option<Face>,
    pub color_format: TextureFormat,
}

impl PipelineConfig {
    pub fn new(shader: ShaderKind, color_format: TextureFormat) -> Self {
        Self {
            label: shader.label().to_string(),
            shader,
            polygon_mode: PolygonMode::Fill,
            cull_mode: None,
            color_format,
        }
    }

    pub fn with_polygon_mode(mut self, polygon_mode: PolygonMode) -> Self {
        if polygon_mode == PolygonMode::Line {
            self.label = format!("{} (wireframe)", self.shader.label());
        }
        self.polygon_mode = polygon_mode;
        self
    }
}

/// The pipelines built for one shader program.
#[derive(Debug)]
pub struct ShaderPipelines {
    pub kind: ShaderKind,
    pub fill: RenderPipeline,
    pub wireframe: Option<RenderPipeline>,
}

impl ShaderPipelines {
    pub fn select(&self, wireframe: bool) -> &RenderPipeline {
        match (&self.wireframe, wireframe) {
            (Some(line), true) => line,
            _ => &self.fill,
        }
    }
}

pub struct PipelineManager {
    layout: PipelineLayout,
    shader_modules: HashMap<ShaderKind, ShaderModule>,
    color_format: TextureFormat,
    supports_wireframe: bool,
}

impl PipelineManager {
    /// `bind_group_layouts` are the lighting, object and texture layouts, in
    /// group order. Both shaders share this layout.
    pub fn new(
        device: &Device,
        bind_group_layouts: &[&BindGroupLayout],
        color_format: TextureFormat,
        supports_wireframe: bool,
    ) -> Self {
        let layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts,
            push_constant_ranges: &[],
        });

        Self {
            layout,
            shader_modules: HashMap::new(),
            color_format,
            supports_wireframe,
        }
    }

    pub fn supports_wireframe(&self) -> bool {
        self.supports_wireframe
    }

    /// Compiles the shader for `kind` and builds its pipelines.
    pub fn create_pipelines(
        &mut self,
        device: &Device,
        kind: ShaderKind,
    ) -> Result<ShaderPipelines, RenderError> {
        device.push_error_scope(ErrorFilter::Validation);

        let shader = &*self.shader_modules.entry(kind).or_insert_with(|| {
            device.create_shader_module(ShaderModuleDescriptor {
                label: Some(kind.label()),
                source: ShaderSource::Wgsl(shader_source(kind).into()),
            })
        });
        let config = PipelineConfig::new(kind, self.color_format);
        let fill = create_pipeline_from_config(device, &self.layout, shader, &config);
        let wireframe = self.supports_wireframe.then(|| {
            let config = config.clone().with_polygon_mode(PolygonMode::Line);
            create_pipeline_from_config(device, &self.layout, shader, &config)
        });

        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            self.shader_modules.remove(&kind);
            return Err(RenderError::Shader {
                label: kind.label().to_string(),
                details: error.to_string(),
            });
        }

        log::debug!(
            "Created pipelines for '{}' (wireframe: {})",
            kind.label(),
            wireframe.is_some()
        );
        Ok(ShaderPipelines {
            kind,
            fill,
            wireframe,
        })
    }
}

fn create_pipeline_from_config(
    device: &Device,
    layout: &PipelineLayout,
    shader: &ShaderModule,
    config: &PipelineConfig,
) -> RenderPipeline {
    device.create_render_pipeline(&RenderPipelineDescriptor {
        label: Some(&config.label),
        layout: Some(layout),
        vertex: VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex3D::desc()],
            compilation_options: PipelineCompilationOptions::default(),
        },
        fragment: Some(FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(ColorTargetState {
                format: config.color_format,
                blend: Some(BlendState::REPLACE),
                write_mask: ColorWrites::ALL,
            })],
            compilation_options: PipelineCompilationOptions::default(),
        }),
        primitive: PrimitiveState {
            topology: PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: FrontFace::Ccw,
            cull_mode: config.cull_mode,
            polygon_mode: config.polygon_mode,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(DepthStencilState {
            format: TextureResource::DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: CompareFunction::Less,
            stencil: StencilState::default(),
            bias: DepthBiasState::default(),
        }),
        multisample: MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

pub fn shader_source(kind: ShaderKind) -> &'static str {
    match kind {
        ShaderKind::Object => include_str!("phong.wgsl"),
        ShaderKind::LightMarker => include_str!("light_marker.wgsl"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wireframe_label_is_distinct() {
        let config = PipelineConfig::new(ShaderKind::Object, TextureFormat::Bgra8Unorm)
            .with_polygon_mode(PolygonMode::Line);
        assert_eq!(config.label, "Object Shader (wireframe)");
        assert_eq!(config.polygon_mode, PolygonMode::Line);
    }

    #[test]
    fn shader_sources_declare_entry_points() {
        for kind in [ShaderKind::Object, ShaderKind::LightMarker] {
            let source = shader_source(kind);
            assert!(source.contains("fn vs_main"));
            assert!(source.contains("fn fs_main"));
        }
    }

    #[test]
    fn light_marker_is_solid_white() {
        assert!(shader_source(ShaderKind::LightMarker).contains("vec4<f32>(1.0)"));
    }
}
