/// Scene tuning constants shared by the web and native front-ends.
///
/// Values mirror the look of the landing page hero; keeping them here keeps
/// magic numbers out of the simulation and the renderer.

// Camera presets (width below the breakpoint is treated as mobile)
pub const MOBILE_BREAKPOINT_PX: f32 = 768.0;
pub const DESKTOP_FOV_DEG: f32 = 70.0;
pub const DESKTOP_DEPTH: f32 = 1.0;
pub const MOBILE_FOV_DEG: f32 = 85.0;
pub const MOBILE_DEPTH: f32 = 2.5;
pub const CAMERA_NEAR: f32 = 0.01;
pub const CAMERA_FAR: f32 = 10.0;

// Pointer smoothing
pub const MOUSE_EASE: f32 = 0.1; // lerp factor per frame
pub const MOUSE_START: [f32; 2] = [0.5, 0.5];

// Frame clock: fixed increment per tick, not wall-clock based
pub const TIME_STEP: f32 = 0.01;

// Liquid distortion
pub const WAVE_FREQUENCY: f32 = 6.0;
pub const WAVE_SPEED: f32 = 0.8;
pub const WAVE_FALLOFF: f32 = 1.5; // uv distance where the distortion fades out
pub const WAVE_STRENGTH: f32 = 0.015;
pub const PLANE_SEGMENTS: u32 = 32;
// (255 + 1)^2 vertices is the most a u16 index buffer can address
pub const MAX_PLANE_SEGMENTS: u32 = 255;

// Clover rain
pub const CLOVER_COUNT: usize = 40;
pub const CLOVER_SIZE: f32 = 0.08; // world units, square sprite
pub const CLOVER_OPACITY: f32 = 0.8;
pub const CLOVER_Z: f32 = 0.05; // slightly in front of the surface
pub const FALL_SPEED_MIN: f32 = 0.001;
pub const FALL_SPEED_SPAN: f32 = 0.002;
pub const ROTATION_SPEED_SPAN: f32 = 0.02; // centred on zero
pub const RESPAWN_JITTER: f32 = 0.5;
pub const BOTTOM_LIMIT_DIVISOR: f32 = 1.5; // bottom limit = -H / divisor

// Canvas
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Length of the page entrance timeline that normally fires the rain trigger
pub const ENTRANCE_TIMELINE_SEC: f32 = 2.7;

// Asset loading: one retry after the first failed fetch
pub const FETCH_ATTEMPTS: u32 = 2;
