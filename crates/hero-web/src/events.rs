use crate::dom;
use crate::input::InputQueue;
use hero_core::OrientationWatch;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn listen<F>(target: &web::EventTarget, event: &str, closure: Closure<F>)
where
    F: ?Sized + wasm_bindgen::closure::WasmClosure,
{
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        log::error!("[events] cannot listen for {}: {:?}", event, e);
    }
    // Listeners live as long as the page
    closure.forget();
}

/// Window resize. Crossing the portrait/landscape boundary reloads the page
/// so the matching background is fetched from scratch.
pub fn wire_resize(window: &web::Window, input: Rc<RefCell<InputQueue>>, watch: OrientationWatch) {
    let closure = Closure::wrap(Box::new(move || {
        let Some(w) = web::window() else {
            return;
        };
        let vp = dom::window_viewport(&w);
        if watch.changed(vp) {
            log::info!(
                "[events] orientation left {:?}; reloading",
                watch.initial()
            );
            if let Err(e) = w.location().reload() {
                log::error!("[events] reload failed: {:?}", e);
            }
            return;
        }
        input.borrow_mut().push_resize(vp);
    }) as Box<dyn FnMut()>);
    listen(window, "resize", closure);
}

pub fn wire_pointer(window: &web::Window, input: Rc<RefCell<InputQueue>>) {
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        input
            .borrow_mut()
            .push_pointer(ev.client_x() as f32, ev.client_y() as f32);
    }) as Box<dyn FnMut(_)>);
    listen(window, "pointermove", closure);
}

/// The page entrance timeline announces completion with a window event.
pub fn wire_entrance(window: &web::Window, event_name: &str, input: Rc<RefCell<InputQueue>>) {
    let closure = Closure::wrap(Box::new(move || {
        input.borrow_mut().trigger_entrance();
    }) as Box<dyn FnMut()>);
    listen(window, event_name, closure);
}
