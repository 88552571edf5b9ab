//! Responsive perspective camera.
//!
//! The camera looks straight down -Z at the distortion surface, which sits at
//! the world origin. Field of view and distance come from one of two fixed
//! presets picked by viewport width; nothing is interpolated between them.

use crate::constants::*;
use crate::viewport::Viewport;
use glam::{Mat4, Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPreset {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    /// Distance from the camera to the surface plane.
    pub depth: f32,
}

impl CameraPreset {
    pub const DESKTOP: CameraPreset = CameraPreset {
        fov_deg: DESKTOP_FOV_DEG,
        depth: DESKTOP_DEPTH,
    };
    // Used both at construction and on resize.
    pub const MOBILE: CameraPreset = CameraPreset {
        fov_deg: MOBILE_FOV_DEG,
        depth: MOBILE_DEPTH,
    };

    #[inline]
    pub fn fov_radians(&self) -> f32 {
        self.fov_deg.to_radians()
    }
}

/// Pick the preset for a viewport width. The breakpoint belongs to desktop.
#[inline]
pub fn configure(viewport_width: f32) -> CameraPreset {
    if viewport_width < MOBILE_BREAKPOINT_PX {
        CameraPreset::MOBILE
    } else {
        CameraPreset::DESKTOP
    }
}

/// World-space size of the view frustum cross-section at `depth`.
#[inline]
pub fn frustum_size(fov_deg: f32, depth: f32, aspect: f32) -> Vec2 {
    let height = 2.0 * (fov_deg.to_radians() / 2.0).tan() * depth;
    Vec2::new(height * aspect, height)
}

#[derive(Clone, Debug)]
pub struct ResponsiveCamera {
    preset: CameraPreset,
    aspect: f32,
    projection: Mat4,
}

impl ResponsiveCamera {
    pub fn new(viewport: Viewport) -> Self {
        let preset = configure(viewport.width);
        let aspect = viewport.aspect();
        Self {
            preset,
            aspect,
            projection: Self::build_projection(preset, aspect),
        }
    }

    /// Re-pick the preset and rebuild the projection in the same step.
    ///
    /// Returns `true` when the preset itself changed.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        let preset = configure(viewport.width);
        let switched = preset != self.preset;
        self.preset = preset;
        self.aspect = viewport.aspect();
        self.projection = Self::build_projection(self.preset, self.aspect);
        if switched {
            log::debug!(
                "[camera] preset fov={} depth={} at width {}",
                preset.fov_deg,
                preset.depth,
                viewport.width
            );
        }
        switched
    }

    fn build_projection(preset: CameraPreset, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(preset.fov_radians(), aspect, CAMERA_NEAR, CAMERA_FAR)
    }

    pub fn preset(&self) -> CameraPreset {
        self.preset
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn eye(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.preset.depth)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        let eye = self.eye();
        Mat4::look_at_rh(eye, eye - Vec3::Z, Vec3::Y)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }

    /// Visible world area on the z = 0 plane.
    pub fn visible_size(&self) -> Vec2 {
        frustum_size(self.preset.fov_deg, self.preset.depth, self.aspect)
    }
}
