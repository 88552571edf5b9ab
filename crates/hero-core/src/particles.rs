//! Clover rain: a fixed pool of rotating sprites that fall and wrap around.

use crate::constants::*;
use glam::{Mat4, Quat, Vec2, Vec3};
use rand::prelude::*;
use std::f32::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    /// World units per tick, fixed at spawn.
    pub fall_speed: f32,
    /// Radians around Z.
    pub rotation: f32,
    pub rotation_speed: f32,
}

impl Particle {
    pub fn transform(&self) -> Mat4 {
        Mat4::from_rotation_translation(Quat::from_rotation_z(self.rotation), self.position)
    }
}

/// Per-instance model matrix, uploaded as four vec4 vertex attributes.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
}

impl From<&Particle> for InstanceRaw {
    fn from(p: &Particle) -> Self {
        Self {
            model: p.transform().to_cols_array_2d(),
        }
    }
}

pub struct ParticleRain {
    particles: Vec<Particle>,
    instances: Vec<InstanceRaw>,
    visible: Vec2,
    falling: bool,
    rng: StdRng,
}

impl ParticleRain {
    /// Scatter `count` clovers across the width and up to one screen height
    /// above the top edge.
    pub fn spawn(count: usize, visible: Vec2, mut rng: StdRng) -> Self {
        let particles = (0..count)
            .map(|_| {
                let x = (rng.gen::<f32>() - 0.5) * visible.x;
                let y = visible.y / 2.0 + rng.gen::<f32>() * visible.y;
                Particle {
                    position: Vec3::new(x, y, CLOVER_Z),
                    fall_speed: FALL_SPEED_MIN + rng.gen::<f32>() * FALL_SPEED_SPAN,
                    rotation_speed: (rng.gen::<f32>() - 0.5) * ROTATION_SPEED_SPAN,
                    rotation: rng.gen::<f32>() * PI,
                }
            })
            .collect();
        Self::with_particles(particles, visible, rng)
    }

    pub fn from_entropy(count: usize, visible: Vec2) -> Self {
        Self::spawn(count, visible, StdRng::from_entropy())
    }

    /// Build a rain from explicit particles; `rng` only drives respawns.
    pub fn with_particles(particles: Vec<Particle>, visible: Vec2, rng: StdRng) -> Self {
        let instances = particles.iter().map(InstanceRaw::from).collect();
        Self {
            particles,
            instances,
            visible,
            falling: false,
            rng,
        }
    }

    /// Start the fall. Returns `true` only on the first call.
    pub fn enable_falling(&mut self) -> bool {
        let first = !self.falling;
        self.falling = true;
        if first {
            log::info!("[rain] clovers falling ({} sprites)", self.particles.len());
        }
        first
    }

    pub fn is_falling(&self) -> bool {
        self.falling
    }

    /// Track the camera's visible area; existing positions are kept.
    pub fn set_visible_area(&mut self, visible: Vec2) {
        self.visible = visible;
    }

    pub fn visible_area(&self) -> Vec2 {
        self.visible
    }

    #[inline]
    pub fn bottom_limit(&self) -> f32 {
        -self.visible.y / BOTTOM_LIMIT_DIVISOR
    }

    /// Advance one frame. Returns `false` (and touches nothing) until the
    /// fall has been enabled.
    pub fn tick(&mut self) -> bool {
        if !self.falling {
            return false;
        }
        let bottom = self.bottom_limit();
        let visible = self.visible;
        for (p, inst) in self.particles.iter_mut().zip(self.instances.iter_mut()) {
            p.position.y -= p.fall_speed;
            p.rotation += p.rotation_speed;
            // Only the position wraps; speeds persist for the sprite's lifetime.
            if p.position.y < bottom {
                p.position.y = visible.y / 2.0 + self.rng.gen::<f32>() * RESPAWN_JITTER;
                p.position.x = (self.rng.gen::<f32>() - 0.5) * visible.x;
            }
            *inst = InstanceRaw::from(&*p);
        }
        true
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn instances(&self) -> &[InstanceRaw] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
