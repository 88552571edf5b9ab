//! Texture resolution: which image to load, decoding it, and handing the
//! result to the renderer exactly once.

use crate::config::HeroConfig;
use crate::driver::FrameSink;
use crate::error::HeroError;
use crate::viewport::{Orientation, Viewport};
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackgroundVariant {
    Landscape,
    Portrait,
}

impl BackgroundVariant {
    pub fn select(viewport: Viewport) -> Self {
        match viewport.orientation() {
            Orientation::Portrait => BackgroundVariant::Portrait,
            Orientation::Landscape => BackgroundVariant::Landscape,
        }
    }

    pub fn path(self, config: &HeroConfig) -> &str {
        match self {
            BackgroundVariant::Landscape => &config.landscape_image,
            BackgroundVariant::Portrait => &config.portrait_image,
        }
    }
}

/// RGBA8 pixels plus the image's natural size.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    pub fn decode(bytes: &[u8]) -> Result<Self, HeroError> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(HeroError::EmptyImage { width, height });
        }
        Ok(Self {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }

    pub fn resolution(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

#[derive(Debug)]
enum Slot<T> {
    Pending,
    Ready(T),
    Consumed,
}

/// A value that is produced once and consumed once.
#[derive(Debug)]
pub struct OneShot<T> {
    name: &'static str,
    slot: Slot<T>,
}

impl<T> OneShot<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            slot: Slot::Pending,
        }
    }

    pub fn deliver(&mut self, value: T) -> Result<(), HeroError> {
        match self.slot {
            Slot::Pending => {
                self.slot = Slot::Ready(value);
                Ok(())
            }
            _ => Err(HeroError::AlreadyDelivered(self.name)),
        }
    }

    pub fn take(&mut self) -> Option<T> {
        match std::mem::replace(&mut self.slot, Slot::Consumed) {
            Slot::Ready(v) => Some(v),
            other => {
                self.slot = other;
                None
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.slot, Slot::Pending)
    }

    pub fn is_consumed(&self) -> bool {
        matches!(self.slot, Slot::Consumed)
    }
}

/// Asynchronous loads in flight for the hero.
#[derive(Debug)]
pub struct PendingAssets {
    pub background: OneShot<DecodedImage>,
    pub sprite: OneShot<DecodedImage>,
}

impl Default for PendingAssets {
    fn default() -> Self {
        Self {
            background: OneShot::new("background image"),
            sprite: OneShot::new("clover sprite"),
        }
    }
}

impl PendingAssets {
    /// Hand any finished image to the renderer. Safe to call every frame.
    pub fn apply_ready<S: FrameSink>(&mut self, sink: &mut S) {
        if let Some(img) = self.background.take() {
            log::info!("[assets] background ready {}x{}", img.width, img.height);
            sink.install_background(&img);
        }
        if let Some(img) = self.sprite.take() {
            log::info!("[assets] sprite ready {}x{}", img.width, img.height);
            sink.install_sprite(&img);
        }
    }

    /// Forget the background so a different variant can be loaded.
    pub fn reset_background(&mut self) {
        self.background = OneShot::new("background image");
    }
}
