//! Render pass extension for replaying queued draws

use crate::gfx::backend::DrawPrimitive;

/// A draw captured during the frame, holding handles to everything it binds.
pub struct QueuedDraw {
    pub pipeline: wgpu::RenderPipeline,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: Option<wgpu::Buffer>,
    pub object_bind_group: wgpu::BindGroup,
    pub texture_bind_group: wgpu::BindGroup,
    pub primitive: DrawPrimitive,
}

pub trait DrawQueued<'a> {
    fn draw_queued(&mut self, draw: &'a QueuedDraw);
}

impl<'a, 'b> DrawQueued<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_queued(&mut self, draw: &'b QueuedDraw) {
        self.set_pipeline(&draw.pipeline);
        self.set_bind_group(1, &draw.object_bind_group, &[]);
        self.set_bind_group(2, &draw.texture_bind_group, &[]);
        self.set_vertex_buffer(0, draw.vertex_buffer.slice(..));

        match (draw.primitive, &draw.index_buffer) {
            (DrawPrimitive::Indexed { index_count }, Some(index_buffer)) => {
                self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                self.draw_indexed(0..index_count, 0, 0..1);
            }
            (DrawPrimitive::Indexed { .. }, None) => {
                log::warn!("Indexed draw requested for a mesh without an index buffer");
            }
            (DrawPrimitive::Vertices { vertex_count }, _) => {
                self.draw(0..vertex_count, 0..1);
            }
        }
    }
}
