//! wgpu renderer for the hero: a distortion plane under an instanced
//! clover layer, drawn into a transparent surface.

mod clovers;
mod helpers;
mod surface;
pub mod targets;

use clovers::CloverLayer;
use hero_core::{
    DecodedImage, FrameSink, InstanceRaw, ResponsiveCamera, SurfaceUniforms, Viewport,
};
use surface::SurfaceLayer;
use targets::MsaaTarget;

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    view_format: wgpu::TextureFormat,
    msaa: MsaaTarget,
    sampler: wgpu::Sampler,
    background: Option<SurfaceLayer>,
    clovers: CloverLayer,
    uniforms: SurfaceUniforms,
    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    /// `width`/`height` are the backing size in physical pixels.
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'a>>,
        width: u32,
        height: u32,
        viewport: Viewport,
        camera: &ResponsiveCamera,
    ) -> anyhow::Result<Self> {
        let width = width.max(1);
        let height = height.max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(target)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        let format = targets::pick_surface_format(&caps.formats)
            .ok_or_else(|| anyhow::anyhow!("Surface reports no formats"))?;
        let view_format = targets::render_format(format);
        // The page shows through wherever the plane is not drawn
        let alpha_mode = targets::pick_alpha_mode(&caps.alpha_modes);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: targets::surface_view_formats(format),
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!(
            "[gpu] surface {}x{} format={:?} view={:?} alpha={:?}",
            width,
            height,
            format,
            view_format,
            alpha_mode
        );

        let msaa = MsaaTarget::new(&device, view_format, width, height);
        let sampler = helpers::create_linear_sampler(&device);
        let clovers = CloverLayer::new(&device, view_format);
        clovers.write_view(&queue, camera.view_proj().to_cols_array_2d());
        let uniforms = SurfaceUniforms::new(camera, viewport, glam::Vec2::ONE);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            view_format,
            msaa,
            sampler,
            background: None,
            clovers,
            uniforms,
            width,
            height,
        })
    }

    /// Reconfigure the swapchain for a new backing size in physical pixels.
    pub fn resize_backing(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.msaa = MsaaTarget::new(&self.device, self.view_format, width, height);
        }
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor {
                format: Some(self.view_format),
                ..Default::default()
            });
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("hero_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.msaa.view,
                    resolve_target: Some(&view),
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Discard,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if let Some(bg) = &self.background {
                bg.draw(&mut rpass);
            }
            self.clovers.draw(&mut rpass);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl FrameSink for GpuState<'_> {
    type Error = wgpu::SurfaceError;

    fn resize(&mut self, viewport: Viewport, camera: &ResponsiveCamera) {
        self.uniforms.set_view(camera, viewport);
        if let Some(bg) = &self.background {
            bg.write_uniforms(&self.queue, &self.uniforms);
        }
        self.clovers
            .write_view(&self.queue, camera.view_proj().to_cols_array_2d());
    }

    fn install_background(&mut self, image: &DecodedImage) {
        self.uniforms.image_resolution = image.resolution().to_array();
        match &mut self.background {
            Some(bg) => bg.replace_image(&self.device, &self.queue, &self.sampler, image),
            None => {
                self.background = Some(SurfaceLayer::new(
                    &self.device,
                    &self.queue,
                    self.view_format,
                    &self.sampler,
                    image,
                ));
            }
        }
        if let Some(bg) = &self.background {
            bg.write_uniforms(&self.queue, &self.uniforms);
        }
        log::debug!("[gpu] background {}x{}", image.width, image.height);
    }

    fn install_sprite(&mut self, image: &DecodedImage) {
        self.clovers
            .set_sprite(&self.device, &self.queue, &self.sampler, image);
        log::debug!("[gpu] sprite {}x{}", image.width, image.height);
    }

    fn surface_ready(&self) -> bool {
        self.background.is_some()
    }

    fn push_surface_motion(&mut self, time: f32, mouse: glam::Vec2) {
        self.uniforms.set_motion(time, mouse);
        if let Some(bg) = &self.background {
            bg.write_uniforms(&self.queue, &self.uniforms);
        }
    }

    fn commit_instances(&mut self, instances: &[InstanceRaw]) {
        self.clovers.commit(&self.device, &self.queue, instances);
    }

    fn draw(&mut self) -> Result<(), Self::Error> {
        match self.render() {
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[gpu] surface lost; reconfiguring");
                self.reconfigure();
                Ok(())
            }
            other => other,
        }
    }
}
