//! Per-frame lighting uniforms
//!
//! The lighting block is shared by every draw in a frame and bound to slot 0
//! of both pipelines.

use bytemuck::Zeroable;

use crate::wgpu_utils::{
    BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc, UniformBuffer,
};

use super::uniforms::{LightingUniforms, ObjectUniforms};

pub type LightingUBO = UniformBuffer<LightingUniforms>;
pub type ObjectUBO = UniformBuffer<ObjectUniforms>;

/// Lighting uniform buffer with its bind group layout and bind group.
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: wgpu::BindGroup,
    ubo: LightingUBO,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .uniform()
            .create(device, "Lighting Bind Group Layout");

        let ubo = LightingUBO::new(device, None, &LightingUniforms::default());
        let bind_group = BindGroupBuilder::new(&bind_group_layout)
            .resource(ubo.binding_resource())
            .create(device, "Lighting Bind Group");

        GlobalBindings {
            bind_group_layout,
            bind_group,
            ubo,
        }
    }

    pub fn update(&mut self, queue: &wgpu::Queue, lighting: LightingUniforms) {
        self.ubo.update_content(queue, lighting);
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

/// Layout of the per-mesh object uniform slot (group 1).
pub fn object_bind_group_layout(device: &wgpu::Device) -> BindGroupLayoutWithDesc {
    BindGroupLayoutBuilder::new()
        .uniform()
        .create(device, "Object Bind Group Layout")
}

/// Creates an object uniform buffer and its bind group.
pub fn create_object_binding(
    device: &wgpu::Device,
    layout: &BindGroupLayoutWithDesc,
    label: &str,
) -> (ObjectUBO, wgpu::BindGroup) {
    let ubo = ObjectUBO::new(
        device,
        Some(&format!("{label} Uniform Buffer")),
        &ObjectUniforms::zeroed(),
    );
    let bind_group = BindGroupBuilder::new(layout)
        .resource(ubo.binding_resource())
        .create(device, label);
    (ubo, bind_group)
}
