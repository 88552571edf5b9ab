use crate::constants::MAX_PIXEL_RATIO;

/// Runtime settings that the host page (or the native preview) may override.
#[derive(Clone, Debug, PartialEq)]
pub struct HeroConfig {
    /// Id of the element the canvas is appended to.
    pub container_id: String,
    pub landscape_image: String,
    pub portrait_image: String,
    pub sprite_image: String,
    pub max_pixel_ratio: f64,
    /// DOM event fired by the entrance timeline once it has finished.
    pub entrance_event: String,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            container_id: "canvas-container".to_string(),
            landscape_image: "./assets/images/hero.jpg".to_string(),
            portrait_image: "./assets/images/hero-mobile.jpg".to_string(),
            sprite_image: "./assets/images/trevo.png".to_string(),
            max_pixel_ratio: MAX_PIXEL_RATIO,
            entrance_event: "hero:entrance-complete".to_string(),
        }
    }
}

impl HeroConfig {
    /// Replace the asset paths that are given, keep the rest.
    pub fn with_overrides(
        mut self,
        landscape: Option<String>,
        portrait: Option<String>,
        sprite: Option<String>,
    ) -> Self {
        let keep_or = |cur: &mut String, new: Option<String>| {
            if let Some(v) = new.filter(|v| !v.trim().is_empty()) {
                *cur = v;
            }
        };
        keep_or(&mut self.landscape_image, landscape);
        keep_or(&mut self.portrait_image, portrait);
        keep_or(&mut self.sprite_image, sprite);
        self
    }

    /// Device pixel ratio clamped to the configured cap.
    pub fn pixel_ratio(&self, device_pixel_ratio: f64) -> f64 {
        if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio.min(self.max_pixel_ratio)
        } else {
            1.0
        }
    }
}
