use glam::Vec2;

/// Visible page area in CSS pixels.
///
/// Both dimensions are clamped to at least one pixel so that the aspect
/// ratio is always finite, even while a window is minimised.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        let sanitize = |v: f32| if v.is_finite() { v.max(1.0) } else { 1.0 };
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    #[inline]
    pub fn resolution(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        if self.height > self.width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Remembers the orientation class seen at startup.
///
/// The background image is chosen once per orientation class, so a resize
/// that flips the class asks the host to rebuild the hero from scratch.
#[derive(Clone, Copy, Debug)]
pub struct OrientationWatch {
    initial: Orientation,
}

impl OrientationWatch {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            initial: viewport.orientation(),
        }
    }

    pub fn initial(&self) -> Orientation {
        self.initial
    }

    pub fn changed(&self, viewport: Viewport) -> bool {
        viewport.orientation() != self.initial
    }
}
