use crate::dom;
use crate::input::InputQueue;
use hero_core::{FrameDriver, PendingAssets, SceneContext};
use hero_render::GpuState;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub scene: SceneContext,
    pub driver: FrameDriver,
    pub gpu: GpuState<'static>,
    pub input: Rc<RefCell<InputQueue>>,
    pub assets: Rc<RefCell<PendingAssets>>,
    pub canvas: web::HtmlCanvasElement,
    pub pixel_ratio: f64,
    halted: bool,
}

impl FrameContext {
    pub fn new(
        scene: SceneContext,
        gpu: GpuState<'static>,
        input: Rc<RefCell<InputQueue>>,
        assets: Rc<RefCell<PendingAssets>>,
        canvas: web::HtmlCanvasElement,
        pixel_ratio: f64,
    ) -> Self {
        Self {
            scene,
            driver: FrameDriver::new(),
            gpu,
            input,
            assets,
            canvas,
            pixel_ratio,
            halted: false,
        }
    }

    pub fn frame(&mut self) {
        if self.halted {
            return;
        }
        let batch = self.input.borrow_mut().drain();
        if let Some(vp) = batch.viewport {
            let (w, h) = dom::size_canvas(&self.canvas, vp, self.pixel_ratio);
            self.gpu.resize_backing(w, h);
            self.scene.resize(vp, &mut self.gpu);
            log::debug!("[frame] resized to {}x{} ({}x{} px)", vp.width, vp.height, w, h);
        }
        if let Some((x, y)) = batch.pointer {
            self.scene.set_pointer(x, y);
        }
        if batch.entrance {
            self.scene.rain.enable_falling();
        }
        self.assets.borrow_mut().apply_ready(&mut self.gpu);

        match self.driver.tick(&mut self.scene, &mut self.gpu) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("[frame] out of GPU memory; drawing stopped");
                self.halted = true;
            }
            Err(e) => log::error!("render error: {:?}", e),
        }
    }
}

type TickCell = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn request_frame(tick: &TickCell) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        if let Err(e) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            log::error!("[frame] requestAnimationFrame failed: {:?}", e);
        }
    }
}

/// One callback per display refresh, rescheduled from inside itself.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: TickCell = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}
