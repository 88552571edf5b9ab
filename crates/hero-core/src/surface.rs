//! Distortion surface: geometry, cover-fit mapping and the liquid wave.
//!
//! The per-pixel work runs in `shaders/surface.wgsl`; the functions here are
//! the same math on the CPU so the renderer and the tests agree on it.

use crate::camera::ResponsiveCamera;
use crate::constants::*;
use crate::viewport::Viewport;
use glam::{Mat4, Vec2, Vec3};

/// World-space scale that makes the unit plane fill the view.
#[inline]
pub fn plane_scale(camera: &ResponsiveCamera) -> Vec2 {
    camera.visible_size()
}

/// Per-axis crop factor for a "cover" fit of an image onto the screen.
#[inline]
pub fn cover_ratio(resolution: Vec2, image_resolution: Vec2) -> Vec2 {
    let screen_ar = resolution.x / resolution.y;
    let image_ar = image_resolution.x / image_resolution.y;
    Vec2::new(
        (screen_ar / image_ar).min(1.0),
        (image_ar / screen_ar).min(1.0),
    )
}

/// Remap a surface uv into the centred, cropped image region.
#[inline]
pub fn cover_uv(uv: Vec2, ratio: Vec2) -> Vec2 {
    uv * ratio + (Vec2::ONE - ratio) * 0.5
}

#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Full strength at the pointer, zero at `WAVE_FALLOFF` and beyond.
#[inline]
pub fn distortion_strength(dist: f32) -> f32 {
    (1.0 - smoothstep(0.0, WAVE_FALLOFF, dist)) * WAVE_STRENGTH
}

#[inline]
pub fn wave(dist: f32, time: f32) -> f32 {
    (dist * WAVE_FREQUENCY - time * WAVE_SPEED).sin()
}

/// The uv the surface samples for one fragment.
///
/// Distance is measured on the raw uv, before the cover remap; the offset is
/// applied equally to both axes.
pub fn distorted_uv(
    uv: Vec2,
    mouse: Vec2,
    time: f32,
    resolution: Vec2,
    image_resolution: Vec2,
) -> Vec2 {
    let mapped = cover_uv(uv, cover_ratio(resolution, image_resolution));
    let dist = uv.distance(mouse);
    mapped + Vec2::splat(wave(dist, time) * distortion_strength(dist))
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SurfaceVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Unit plane in the XY plane, centred on the origin, split into a grid.
///
/// Rows run top to bottom; uv.y is 1 at the top edge and 0 at the bottom.
#[derive(Clone, Debug)]
pub struct PlaneMesh {
    pub vertices: Vec<SurfaceVertex>,
    pub indices: Vec<u16>,
}

impl PlaneMesh {
    /// `segments` is clamped to `1..=MAX_PLANE_SEGMENTS` so indices fit u16.
    pub fn grid(segments: u32) -> Self {
        let segments = segments.clamp(1, MAX_PLANE_SEGMENTS);
        let stride = segments + 1;
        let mut vertices = Vec::with_capacity((stride * stride) as usize);
        for iy in 0..stride {
            let v = iy as f32 / segments as f32;
            for ix in 0..stride {
                let u = ix as f32 / segments as f32;
                vertices.push(SurfaceVertex {
                    position: [u - 0.5, 0.5 - v, 0.0],
                    uv: [u, 1.0 - v],
                });
            }
        }
        let mut indices = Vec::with_capacity((segments * segments * 6) as usize);
        for iy in 0..segments {
            for ix in 0..segments {
                let a = (ix + stride * iy) as u16;
                let b = (ix + stride * (iy + 1)) as u16;
                let c = (ix + 1 + stride * (iy + 1)) as u16;
                let d = (ix + 1 + stride * iy) as u16;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }
        Self { vertices, indices }
    }
}

/// Uniform block for `surface.wgsl`; 160 bytes, 16-byte aligned.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SurfaceUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub resolution: [f32; 2],
    pub image_resolution: [f32; 2],
    pub mouse: [f32; 2],
    pub time: f32,
    pub _pad: f32,
}

impl SurfaceUniforms {
    pub fn new(camera: &ResponsiveCamera, viewport: Viewport, image_resolution: Vec2) -> Self {
        let mut u = Self::zeroed_with_mouse();
        u.set_view(camera, viewport);
        u.image_resolution = image_resolution.to_array();
        u
    }

    fn zeroed_with_mouse() -> Self {
        let mut u: Self = bytemuck::Zeroable::zeroed();
        u.mouse = MOUSE_START;
        u
    }

    /// Camera matrix, plane scale and resolution; call after every resize.
    pub fn set_view(&mut self, camera: &ResponsiveCamera, viewport: Viewport) {
        let scale = plane_scale(camera);
        self.view_proj = camera.view_proj().to_cols_array_2d();
        self.model = Mat4::from_scale(Vec3::new(scale.x, scale.y, 1.0)).to_cols_array_2d();
        self.resolution = viewport.resolution().to_array();
    }

    pub fn set_motion(&mut self, time: f32, mouse: Vec2) {
        self.time = time;
        self.mouse = mouse.to_array();
    }
}
