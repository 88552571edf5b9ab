use super::helpers;
use hero_core::constants::PLANE_SEGMENTS;
use hero_core::{DecodedImage, PlaneMesh, SurfaceUniforms, SurfaceVertex};
use wgpu::util::DeviceExt;

/// The distortion plane. Only exists once a background image has arrived.
pub(crate) struct SurfaceLayer {
    pipeline: wgpu::RenderPipeline,
    bgl: wgpu::BindGroupLayout,
    uniform_buffer: wgpu::Buffer,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

impl SurfaceLayer {
    pub(crate) fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        color_format: wgpu::TextureFormat,
        sampler: &wgpu::Sampler,
        image: &DecodedImage,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("surface_shader"),
            source: wgpu::ShaderSource::Wgsl(hero_core::SURFACE_WGSL.into()),
        });
        let bgl = helpers::textured_bind_group_layout(device, "surface_bgl");
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("surface_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SurfaceVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 12,
                    shader_location: 1,
                },
            ],
        };
        let pipeline = helpers::make_pipeline(
            device,
            "surface_pipeline",
            &pl,
            &shader,
            "vs_surface",
            "fs_surface",
            &[vertex_layout],
            color_format,
            Some(wgpu::BlendState::REPLACE),
        );

        let mesh = PlaneMesh::grid(PLANE_SEGMENTS);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("surface_vb"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("surface_ib"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("surface_uniforms"),
            size: std::mem::size_of::<SurfaceUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let (texture, view) = helpers::upload_rgba_texture(device, queue, "surface_image", image);
        let bind_group = helpers::textured_bind_group(
            device,
            "surface_bg",
            &bgl,
            &uniform_buffer,
            &view,
            sampler,
        );

        Self {
            pipeline,
            bgl,
            uniform_buffer,
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            _texture: texture,
            bind_group,
        }
    }

    /// Swap the sampled image in place; geometry and pipeline are kept.
    pub(crate) fn replace_image(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        sampler: &wgpu::Sampler,
        image: &DecodedImage,
    ) {
        let (texture, view) = helpers::upload_rgba_texture(device, queue, "surface_image", image);
        self.bind_group = helpers::textured_bind_group(
            device,
            "surface_bg",
            &self.bgl,
            &self.uniform_buffer,
            &view,
            sampler,
        );
        self._texture = texture;
    }

    pub(crate) fn write_uniforms(&self, queue: &wgpu::Queue, uniforms: &SurfaceUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
