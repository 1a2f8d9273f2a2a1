use std::marker::PhantomData;

use wgpu::util::DeviceExt;

/// Typed uniform buffer holding exactly one `Content`.
///
/// The last uploaded bytes are kept so [`UniformBuffer::update_content`] can
/// skip redundant writes.
pub struct UniformBuffer<Content> {
    buffer: wgpu::Buffer,
    content_type: PhantomData<Content>,
    previous_content: Vec<u8>,
}

/// Type name without its module path, e.g. `LightingUniforms`.
fn short_type_name<T>() -> &'static str {
    let type_name = std::any::type_name::<T>();
    type_name.rsplit("::").next().unwrap_or(type_name)
}

impl<Content: bytemuck::Pod> UniformBuffer<Content> {
    /// Creates the buffer filled with `initial_content`. Without a label the
    /// content type's name is used.
    pub fn new(device: &wgpu::Device, label: Option<&str>, initial_content: &Content) -> Self {
        let label = label.map_or_else(
            || format!("{} Uniform Buffer", short_type_name::<Content>()),
            str::to_string,
        );
        let bytes = bytemuck::bytes_of(initial_content);
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&label),
            contents: bytes,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        UniformBuffer {
            buffer,
            content_type: PhantomData,
            previous_content: bytes.to_vec(),
        }
    }

    /// Writes `content`, skipping the upload if it is unchanged.
    pub fn update_content(&mut self, queue: &wgpu::Queue, content: Content) {
        let new_content = bytemuck::bytes_of(&content);
        if self.previous_content == new_content {
            return;
        }
        queue.write_buffer(&self.buffer, 0, new_content);
        self.previous_content = new_content.to_vec();
    }

    /// Writes `content` unconditionally. Usable through a shared reference, so
    /// the change tracking is bypassed.
    pub fn write_content(&self, queue: &wgpu::Queue, content: &Content) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(content));
    }

    pub fn binding_resource(&self) -> wgpu::BindingResource {
        self.buffer.as_entire_binding()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::resources::uniforms::{LightingUniforms, ObjectUniforms};

    #[test]
    fn labels_use_the_bare_type_name() {
        assert_eq!(short_type_name::<LightingUniforms>(), "LightingUniforms");
        assert_eq!(short_type_name::<ObjectUniforms>(), "ObjectUniforms");
        assert_eq!(short_type_name::<u32>(), "u32");
    }
}
