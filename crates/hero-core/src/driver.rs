//! Frame driver and the scene state it advances.

use crate::assets::DecodedImage;
use crate::camera::ResponsiveCamera;
use crate::constants::{CLOVER_COUNT, TIME_STEP};
use crate::mouse::{normalize_pointer, SmoothedMouse};
use crate::particles::{InstanceRaw, ParticleRain};
use crate::viewport::Viewport;
use glam::Vec2;

/// What the driver needs from a renderer.
pub trait FrameSink {
    type Error: std::fmt::Debug;

    /// Viewport or camera changed; rebuild projection, plane scale and
    /// resolution before the next draw.
    fn resize(&mut self, viewport: Viewport, camera: &ResponsiveCamera);
    /// Build the distortion surface on first call, swap its image after.
    fn install_background(&mut self, image: &DecodedImage);
    fn install_sprite(&mut self, image: &DecodedImage);
    fn surface_ready(&self) -> bool;
    fn push_surface_motion(&mut self, time: f32, mouse: Vec2);
    /// Upload the whole instance batch in one go.
    fn commit_instances(&mut self, instances: &[InstanceRaw]);
    fn draw(&mut self) -> Result<(), Self::Error>;
}

/// All per-frame state of the hero, owned by whoever drives the loop.
pub struct SceneContext {
    pub viewport: Viewport,
    pub camera: ResponsiveCamera,
    pub mouse: SmoothedMouse,
    pub rain: ParticleRain,
    time: f32,
}

impl SceneContext {
    pub fn new(viewport: Viewport) -> Self {
        let camera = ResponsiveCamera::new(viewport);
        let rain = ParticleRain::from_entropy(CLOVER_COUNT, camera.visible_size());
        Self::with_rain(viewport, rain)
    }

    pub fn with_rain(viewport: Viewport, rain: ParticleRain) -> Self {
        Self {
            viewport,
            camera: ResponsiveCamera::new(viewport),
            mouse: SmoothedMouse::default(),
            rain,
            time: 0.0,
        }
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Record a raw pointer position in client coordinates.
    pub fn set_pointer(&mut self, client_x: f32, client_y: f32) {
        self.mouse
            .set_target(normalize_pointer(client_x, client_y, self.viewport));
    }

    /// Recompute everything derived from the viewport and tell the renderer.
    pub fn resize<S: FrameSink>(&mut self, viewport: Viewport, sink: &mut S) {
        self.viewport = viewport;
        self.camera.resize(viewport);
        self.rain.set_visible_area(self.camera.visible_size());
        sink.resize(viewport, &self.camera);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running,
}

#[derive(Debug)]
pub struct FrameDriver {
    state: DriverState,
    frames: u64,
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDriver {
    pub fn new() -> Self {
        Self {
            state: DriverState::Idle,
            frames: 0,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Idle -> Running. Pushes the initial view and sprite layout once.
    pub fn start<S: FrameSink>(&mut self, scene: &SceneContext, sink: &mut S) {
        if self.state == DriverState::Running {
            return;
        }
        sink.resize(scene.viewport, &scene.camera);
        sink.commit_instances(scene.rain.instances());
        self.state = DriverState::Running;
        log::info!("[frame] loop running");
    }

    /// One display refresh. Scheduling the next one is the caller's job.
    pub fn tick<S: FrameSink>(
        &mut self,
        scene: &mut SceneContext,
        sink: &mut S,
    ) -> Result<(), S::Error> {
        self.start(scene, sink);

        scene.time += TIME_STEP;
        let mouse = scene.mouse.step();
        if sink.surface_ready() {
            sink.push_surface_motion(scene.time, mouse);
        }
        if scene.rain.tick() {
            sink.commit_instances(scene.rain.instances());
        }
        self.frames += 1;
        sink.draw()
    }
}
