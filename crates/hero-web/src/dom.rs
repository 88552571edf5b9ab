use crate::input;
use hero_core::{HeroConfig, Viewport};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Current `innerWidth`/`innerHeight` of the window.
pub fn window_viewport(window: &web::Window) -> Viewport {
    let read = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0) as f32
    };
    Viewport::new(read(window.inner_width()), read(window.inner_height()))
}

/// Defaults, with asset paths taken from `data-hero-*` on the container.
pub fn read_config(container: &web::Element) -> HeroConfig {
    let attr = |name: &str| input::attribute_override(container.get_attribute(name));
    HeroConfig::default().with_overrides(
        attr("data-hero-landscape"),
        attr("data-hero-portrait"),
        attr("data-hero-sprite"),
    )
}

/// Create the hero canvas and append it to the container.
pub fn mount_canvas(
    document: &web::Document,
    container: &web::Element,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let style = canvas.style();
    let _ = style.set_property("display", "block");
    let _ = style.set_property("pointer-events", "none");
    container
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    Ok(canvas)
}

/// CSS size follows the viewport; the backing store is scaled by the capped
/// pixel ratio. Returns the backing size.
pub fn size_canvas(
    canvas: &web::HtmlCanvasElement,
    viewport: Viewport,
    pixel_ratio: f64,
) -> (u32, u32) {
    let (w_px, h_px) = input::backing_size(viewport, pixel_ratio);
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    let style = canvas.style();
    let _ = style.set_property("width", &format!("{}px", viewport.width));
    let _ = style.set_property("height", &format!("{}px", viewport.height));
    (w_px, h_px)
}
