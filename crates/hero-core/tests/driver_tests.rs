// Host-side tests for the frame driver ordering and asset hand-off.
// A recording sink stands in for the GPU renderer.

use glam::{Vec2, Vec3};
use hero_core::constants::*;
use hero_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Resize(Viewport),
    Background(u32, u32),
    Sprite(u32, u32),
    Motion(f32, Vec2),
    Commit(usize),
    Draw,
}

#[derive(Default)]
struct RecordingSink {
    calls: Vec<Call>,
    has_surface: bool,
    fail_draw: bool,
}

impl RecordingSink {
    fn take(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }
}

impl FrameSink for RecordingSink {
    type Error = &'static str;

    fn resize(&mut self, viewport: Viewport, _camera: &ResponsiveCamera) {
        self.calls.push(Call::Resize(viewport));
    }
    fn install_background(&mut self, image: &DecodedImage) {
        self.has_surface = true;
        self.calls.push(Call::Background(image.width, image.height));
    }
    fn install_sprite(&mut self, image: &DecodedImage) {
        self.calls.push(Call::Sprite(image.width, image.height));
    }
    fn surface_ready(&self) -> bool {
        self.has_surface
    }
    fn push_surface_motion(&mut self, time: f32, mouse: Vec2) {
        self.calls.push(Call::Motion(time, mouse));
    }
    fn commit_instances(&mut self, instances: &[InstanceRaw]) {
        self.calls.push(Call::Commit(instances.len()));
    }
    fn draw(&mut self) -> Result<(), Self::Error> {
        self.calls.push(Call::Draw);
        if self.fail_draw {
            Err("lost")
        } else {
            Ok(())
        }
    }
}

fn scene() -> SceneContext {
    let viewport = Viewport::new(1280.0, 720.0);
    let visible = ResponsiveCamera::new(viewport).visible_size();
    let rain = ParticleRain::spawn(CLOVER_COUNT, visible, StdRng::seed_from_u64(3));
    SceneContext::with_rain(viewport, rain)
}

fn image(w: u32, h: u32) -> DecodedImage {
    DecodedImage {
        width: w,
        height: h,
        rgba: vec![255; (w * h * 4) as usize],
    }
}

#[test]
fn first_tick_starts_the_loop_once() {
    let mut scene = scene();
    let mut sink = RecordingSink::default();
    let mut driver = FrameDriver::new();
    assert_eq!(driver.state(), DriverState::Idle);

    driver.tick(&mut scene, &mut sink).unwrap();
    assert_eq!(driver.state(), DriverState::Running);
    assert_eq!(
        sink.take(),
        vec![Call::Resize(scene.viewport), Call::Commit(CLOVER_COUNT), Call::Draw]
    );

    driver.tick(&mut scene, &mut sink).unwrap();
    assert_eq!(sink.take(), vec![Call::Draw]);
    assert_eq!(driver.state(), DriverState::Running);
    assert_eq!(driver.frames(), 2);
}

#[test]
fn time_advances_by_a_fixed_step() {
    let mut scene = scene();
    let mut sink = RecordingSink::default();
    let mut driver = FrameDriver::new();
    for _ in 0..100 {
        driver.tick(&mut scene, &mut sink).unwrap();
    }
    assert!((scene.time() - 100.0 * TIME_STEP).abs() < 1e-4);
}

#[test]
fn surface_motion_is_pushed_only_once_the_surface_exists() {
    let mut scene = scene();
    let mut sink = RecordingSink::default();
    let mut driver = FrameDriver::new();
    let mut assets = PendingAssets::default();

    driver.tick(&mut scene, &mut sink).unwrap();
    assert!(!sink.take().iter().any(|c| matches!(c, Call::Motion(..))));

    assets.background.deliver(image(4, 2)).unwrap();
    assets.apply_ready(&mut sink);
    driver.tick(&mut scene, &mut sink).unwrap();
    let calls = sink.take();
    assert_eq!(calls[0], Call::Background(4, 2));
    match calls[1] {
        Call::Motion(t, m) => {
            assert!((t - 2.0 * TIME_STEP).abs() < 1e-6);
            assert_eq!(m, Vec2::splat(0.5));
        }
        ref other => panic!("expected motion, got {other:?}"),
    }
    assert_eq!(calls[2], Call::Draw);
}

#[test]
fn tick_order_is_motion_then_rain_then_draw() {
    let mut scene = scene();
    let mut sink = RecordingSink {
        has_surface: true,
        ..Default::default()
    };
    let mut driver = FrameDriver::new();
    driver.start(&scene, &mut sink);
    sink.take();

    scene.rain.enable_falling();
    driver.tick(&mut scene, &mut sink).unwrap();
    let calls = sink.take();
    assert!(matches!(calls[0], Call::Motion(..)));
    assert_eq!(calls[1], Call::Commit(CLOVER_COUNT));
    assert_eq!(calls[2], Call::Draw);
    assert_eq!(calls.len(), 3);
}

#[test]
fn pointer_is_smoothed_toward_the_target() {
    let mut scene = scene();
    let mut sink = RecordingSink {
        has_surface: true,
        ..Default::default()
    };
    let mut driver = FrameDriver::new();
    // bottom-left corner in client space
    scene.set_pointer(0.0, 720.0);
    driver.tick(&mut scene, &mut sink).unwrap();
    let m = scene.mouse.current();
    assert!((m.x - 0.45).abs() < 1e-6);
    assert!((m.y - 0.45).abs() < 1e-6);
}

#[test]
fn resize_updates_camera_rain_and_renderer() {
    let mut scene = scene();
    let mut sink = RecordingSink::default();
    let small = Viewport::new(390.0, 844.0);
    scene.resize(small, &mut sink);
    assert_eq!(scene.viewport, small);
    assert_eq!(scene.camera.preset(), CameraPreset::MOBILE);
    assert_eq!(scene.rain.visible_area(), scene.camera.visible_size());
    assert_eq!(sink.take(), vec![Call::Resize(small)]);
    assert_eq!(scene.camera.eye(), Vec3::new(0.0, 0.0, MOBILE_DEPTH));
}

#[test]
fn draw_errors_are_returned_to_the_caller() {
    let mut scene = scene();
    let mut sink = RecordingSink {
        fail_draw: true,
        ..Default::default()
    };
    let mut driver = FrameDriver::new();
    assert_eq!(driver.tick(&mut scene, &mut sink), Err("lost"));
    // the loop keeps its state; the next tick tries again
    assert_eq!(driver.state(), DriverState::Running);
}

#[test]
fn late_sprite_and_background_are_applied_once() {
    let mut sink = RecordingSink::default();
    let mut assets = PendingAssets::default();
    assets.apply_ready(&mut sink);
    assert!(sink.take().is_empty());

    assets.sprite.deliver(image(8, 8)).unwrap();
    assets.apply_ready(&mut sink);
    assets.apply_ready(&mut sink);
    assert_eq!(sink.take(), vec![Call::Sprite(8, 8)]);
    assert!(assets.sprite.is_consumed());
    assert!(assets.background.is_pending());
}
