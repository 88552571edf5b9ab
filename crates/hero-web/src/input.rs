use hero_core::Viewport;

/// Events collected by DOM listeners between two frames.
///
/// Listeners only write here; the frame callback drains it once per tick so
/// the scene is never touched from inside an event handler.
#[derive(Debug, Default)]
pub struct InputQueue {
    viewport: Option<Viewport>,
    pointer: Option<(f32, f32)>,
    entrance: bool,
}

/// Everything that arrived since the previous drain.
#[derive(Debug, Default, PartialEq)]
pub struct InputBatch {
    pub viewport: Option<Viewport>,
    pub pointer: Option<(f32, f32)>,
    pub entrance: bool,
}

impl InputQueue {
    /// Only the latest size matters.
    pub fn push_resize(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }

    pub fn push_pointer(&mut self, client_x: f32, client_y: f32) {
        self.pointer = Some((client_x, client_y));
    }

    pub fn trigger_entrance(&mut self) {
        self.entrance = true;
    }

    pub fn drain(&mut self) -> InputBatch {
        InputBatch {
            viewport: self.viewport.take(),
            pointer: self.pointer.take(),
            entrance: std::mem::take(&mut self.entrance),
        }
    }
}

/// Canvas backing store size in device pixels for a CSS viewport.
#[inline]
pub fn backing_size(viewport: Viewport, pixel_ratio: f64) -> (u32, u32) {
    let scale = |css: f32| ((css as f64 * pixel_ratio).round() as u32).max(1);
    (scale(viewport.width), scale(viewport.height))
}

/// Trim a `data-*` attribute value; blank counts as absent.
#[inline]
pub fn attribute_override(raw: Option<String>) -> Option<String> {
    raw.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
