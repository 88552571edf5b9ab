use crate::constants::{MOUSE_EASE, MOUSE_START};
use crate::viewport::Viewport;
use glam::Vec2;

/// Map client coordinates to 0..1 with Y flipped so 0 is the bottom edge.
#[inline]
pub fn normalize_pointer(client_x: f32, client_y: f32, viewport: Viewport) -> Vec2 {
    Vec2::new(
        client_x / viewport.width,
        1.0 - client_y / viewport.height,
    )
}

/// Pointer position eased toward its latest raw target once per frame.
#[derive(Clone, Copy, Debug)]
pub struct SmoothedMouse {
    target: Vec2,
    current: Vec2,
    ease: f32,
}

impl Default for SmoothedMouse {
    fn default() -> Self {
        Self::new(MOUSE_EASE)
    }
}

impl SmoothedMouse {
    /// `ease` is clamped to (0, 1] so the smoothed value never overshoots.
    pub fn new(ease: f32) -> Self {
        let start = Vec2::from(MOUSE_START);
        Self {
            target: start,
            current: start,
            ease: ease.clamp(f32::EPSILON, 1.0),
        }
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn current(&self) -> Vec2 {
        self.current
    }

    pub fn ease(&self) -> f32 {
        self.ease
    }

    pub fn step(&mut self) -> Vec2 {
        self.current += (self.target - self.current) * self.ease;
        self.current
    }
}
