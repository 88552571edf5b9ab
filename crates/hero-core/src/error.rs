use thiserror::Error;

#[derive(Debug, Error)]
pub enum HeroError {
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
    #[error("{0} was already delivered")]
    AlreadyDelivered(&'static str),
}
