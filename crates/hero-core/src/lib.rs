pub mod assets;
pub mod camera;
pub mod config;
pub mod constants;
pub mod driver;
pub mod error;
pub mod mouse;
pub mod particles;
pub mod surface;
pub mod viewport;

pub use assets::*;
pub use camera::*;
pub use config::*;
pub use driver::*;
pub use error::*;
pub use mouse::*;
pub use particles::*;
pub use surface::*;
pub use viewport::*;

// Shaders bundled as string constants
pub static SURFACE_WGSL: &str = include_str!("../shaders/surface.wgsl");
pub static CLOVER_WGSL: &str = include_str!("../shaders/clover.wgsl");
