#![cfg(target_arch = "wasm32")]
use hero_core::{
    BackgroundVariant, HeroConfig, OrientationWatch, PendingAssets, SceneContext,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod dom;
mod events;
mod frame;
mod input;
mod retry;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("hero-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Let the clovers fall. Same effect as dispatching the entrance event.
#[wasm_bindgen]
pub fn start_clover_rain() -> Result<(), JsValue> {
    let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let event = web::Event::new(&HeroConfig::default().entrance_event)?;
    window.dispatch_event(&event)?;
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let container_id = HeroConfig::default().container_id;
    let container = document
        .get_element_by_id(&container_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", container_id))?;
    let config = dom::read_config(&container);

    let viewport = dom::window_viewport(&window);
    let pixel_ratio = config.pixel_ratio(window.device_pixel_ratio());
    let canvas = dom::mount_canvas(&document, &container)?;
    let (w_px, h_px) = dom::size_canvas(&canvas, viewport, pixel_ratio);

    // Listeners go up before the GPU is ready; the first frame drains them
    let input = Rc::new(RefCell::new(input::InputQueue::default()));
    events::wire_resize(&window, input.clone(), OrientationWatch::new(viewport));
    events::wire_pointer(&window, input.clone());
    events::wire_entrance(&window, &config.entrance_event, input.clone());

    let pending = Rc::new(RefCell::new(PendingAssets::default()));
    let variant = BackgroundVariant::select(viewport);
    log::info!("[assets] {:?} background {}", variant, variant.path(&config));
    assets::spawn_load(
        variant.path(&config).to_string(),
        assets::AssetKind::Background,
        pending.clone(),
    );
    assets::spawn_load(
        config.sprite_image.clone(),
        assets::AssetKind::Sprite,
        pending.clone(),
    );

    let scene = SceneContext::new(viewport);
    let gpu = hero_render::GpuState::new(
        wgpu::SurfaceTarget::Canvas(canvas.clone()),
        w_px,
        h_px,
        viewport,
        &scene.camera,
    )
    .await?;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        scene,
        gpu,
        input,
        pending,
        canvas,
        pixel_ratio,
    )));
    frame::start_loop(frame_ctx);
    log::info!("[frame] hero mounted in #{}", config.container_id);
    Ok(())
}
