use std::time::Instant;
use winit::dpi::PhysicalSize;
use winit::keyboard::{Key, NamedKey};
use winit::{event::*, event_loop::EventLoop, window::WindowBuilder};

use hero_core::constants::ENTRANCE_TIMELINE_SEC;
use hero_core::{
    BackgroundVariant, FrameDriver, HeroConfig, OrientationWatch, PendingAssets, SceneContext,
    Viewport,
};
use hero_render::GpuState;

mod loader;
use loader::{AssetKind, DiskLoader};

fn logical_viewport(size: PhysicalSize<u32>, scale_factor: f64) -> Viewport {
    let logical = size.to_logical::<f32>(scale_factor);
    Viewport::new(logical.width, logical.height)
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let asset_root = std::env::args().nth(1).unwrap_or_else(|| ".".to_string());
    let config = HeroConfig::default();
    let mut loader = DiskLoader::new(&asset_root);

    let event_loop = EventLoop::new().expect("event loop");
    let window = WindowBuilder::new()
        .with_title("Clover Hero (native)")
        .with_transparent(true)
        .build(&event_loop)
        .expect("window");

    let size = window.inner_size();
    let viewport = logical_viewport(size, window.scale_factor());
    let mut watch = OrientationWatch::new(viewport);
    let mut pending = PendingAssets::default();
    loader.spawn(BackgroundVariant::select(viewport).path(&config), AssetKind::Background);
    loader.spawn(&config.sprite_image, AssetKind::Sprite);

    let mut scene = SceneContext::new(viewport);
    let mut driver = FrameDriver::new();
    let mut gpu = pollster::block_on(GpuState::new(
        &window,
        size.width,
        size.height,
        viewport,
        &scene.camera,
    ))
    .expect("gpu");
    let started = Instant::now();
    let window = &window;
    log::info!("[frame] native preview running, assets from {}", asset_root);

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::Resized(size),
                ..
            } => {
                // Minimising reports 0x0; keep the last real layout
                if size.width == 0 || size.height == 0 {
                    return;
                }
                gpu.resize_backing(size.width, size.height);
                let vp = logical_viewport(size, window.scale_factor());
                scene.resize(vp, &mut gpu);
                // No page to reload here: swap in the other background
                loader.reload_on_flip(
                    &mut watch,
                    (size.width, size.height),
                    vp,
                    &config,
                    &mut pending,
                );
            }
            Event::WindowEvent {
                event: WindowEvent::CursorMoved { position, .. },
                ..
            } => {
                let p = position.to_logical::<f32>(window.scale_factor());
                scene.set_pointer(p.x, p.y);
            }
            Event::WindowEvent {
                event:
                    WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                logical_key: Key::Named(NamedKey::Space),
                                state: ElementState::Pressed,
                                ..
                            },
                        ..
                    },
                ..
            } => {
                scene.rain.enable_falling();
            }
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => elwt.exit(),
            Event::AboutToWait => {
                if !scene.rain.is_falling()
                    && started.elapsed().as_secs_f32() >= ENTRANCE_TIMELINE_SEC
                {
                    scene.rain.enable_falling();
                }
                loader.poll(&mut pending);
                pending.apply_ready(&mut gpu);
                match driver.tick(&mut scene, &mut gpu) {
                    Ok(()) => window.request_redraw(),
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("[frame] out of GPU memory");
                        elwt.exit();
                    }
                    Err(e) => log::error!("render error: {:?}", e),
                }
            }
            _ => {}
        })
        .expect("event loop");
}
