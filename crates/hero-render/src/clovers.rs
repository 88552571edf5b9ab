use super::helpers;
use hero_core::constants::{CLOVER_COUNT, CLOVER_OPACITY, CLOVER_SIZE};
use hero_core::{DecodedImage, InstanceRaw};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct CloverUniforms {
    view_proj: [[f32; 4]; 4],
    opacity: f32,
    _pad: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct CloverVertex {
    corner: [f32; 2],
    uv: [f32; 2],
}

/// Two triangles centred on the origin; uv rows start at the top.
fn clover_quad(size: f32) -> [CloverVertex; 6] {
    let h = size / 2.0;
    let v = |x: f32, y: f32, u: f32, w: f32| CloverVertex {
        corner: [x, y],
        uv: [u, w],
    };
    [
        v(-h, -h, 0.0, 1.0),
        v(h, -h, 1.0, 1.0),
        v(h, h, 1.0, 0.0),
        v(-h, -h, 0.0, 1.0),
        v(h, h, 1.0, 0.0),
        v(-h, h, 0.0, 0.0),
    ]
}

struct SpriteBinding {
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

/// Instanced clover sprites: one vertex buffer for the quad, one for the
/// per-instance transforms, a single draw call for the whole pool.
pub(crate) struct CloverLayer {
    pipeline: wgpu::RenderPipeline,
    bgl: wgpu::BindGroupLayout,
    uniform_buffer: wgpu::Buffer,
    quad_vb: wgpu::Buffer,
    instance_vb: wgpu::Buffer,
    instance_capacity: usize,
    instance_count: u32,
    sprite: Option<SpriteBinding>,
}

impl CloverLayer {
    pub(crate) fn new(device: &wgpu::Device, color_format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("clover_shader"),
            source: wgpu::ShaderSource::Wgsl(hero_core::CLOVER_WGSL.into()),
        });
        let bgl = helpers::textured_bind_group_layout(device, "clover_bgl");
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("clover_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let vertex_buffers = [
            // slot 0: quad corners
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<CloverVertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x2,
                        offset: 0,
                        shader_location: 0,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x2,
                        offset: 8,
                        shader_location: 1,
                    },
                ],
            },
            // slot 1: model matrix columns
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<InstanceRaw>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 0,
                        shader_location: 2,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 16,
                        shader_location: 3,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 32,
                        shader_location: 4,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 48,
                        shader_location: 5,
                    },
                ],
            },
        ];
        let pipeline = helpers::make_pipeline(
            device,
            "clover_pipeline",
            &pl,
            &shader,
            "vs_clover",
            "fs_clover",
            &vertex_buffers,
            color_format,
            Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
        );
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("clover_uniforms"),
            size: std::mem::size_of::<CloverUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("clover_quad_vb"),
            contents: bytemuck::cast_slice(&clover_quad(CLOVER_SIZE)),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let instance_vb = Self::create_instance_buffer(device, CLOVER_COUNT);

        Self {
            pipeline,
            bgl,
            uniform_buffer,
            quad_vb,
            instance_vb,
            instance_capacity: CLOVER_COUNT,
            instance_count: 0,
            sprite: None,
        }
    }

    fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("clover_instance_vb"),
            size: (std::mem::size_of::<InstanceRaw>() * capacity.max(1)) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    pub(crate) fn set_sprite(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        sampler: &wgpu::Sampler,
        image: &DecodedImage,
    ) {
        let (texture, view) = helpers::upload_rgba_texture(device, queue, "clover_sprite", image);
        let bind_group = helpers::textured_bind_group(
            device,
            "clover_bg",
            &self.bgl,
            &self.uniform_buffer,
            &view,
            sampler,
        );
        self.sprite = Some(SpriteBinding {
            _texture: texture,
            bind_group,
        });
    }

    pub(crate) fn write_view(&self, queue: &wgpu::Queue, view_proj: [[f32; 4]; 4]) {
        let u = CloverUniforms {
            view_proj,
            opacity: CLOVER_OPACITY,
            _pad: [0.0; 3],
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&u));
    }

    /// Write the full transform batch; grows the buffer if the pool grew.
    pub(crate) fn commit(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, instances: &[InstanceRaw]) {
        if instances.len() > self.instance_capacity {
            self.instance_vb = Self::create_instance_buffer(device, instances.len());
            self.instance_capacity = instances.len();
        }
        queue.write_buffer(&self.instance_vb, 0, bytemuck::cast_slice(instances));
        self.instance_count = instances.len() as u32;
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        // Without the sprite there is nothing to show
        let Some(sprite) = &self.sprite else {
            return;
        };
        if self.instance_count == 0 {
            return;
        }
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &sprite.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
        rpass.set_vertex_buffer(1, self.instance_vb.slice(..));
        rpass.draw(0..6, 0..self.instance_count);
    }
}
