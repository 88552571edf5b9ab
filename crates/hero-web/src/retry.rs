use std::fmt::Debug;
use std::future::Future;

/// Run `load` up to `attempts` times (at least once) and keep the first
/// success. Intermediate failures log at `warn`, the last one at `error`.
pub async fn load_with_retry<T, E, F, Fut>(label: &str, attempts: u32, mut load: F) -> Option<T>
where
    E: Debug,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let attempts = attempts.max(1);
    for attempt in 1..=attempts {
        match load(attempt).await {
            Ok(value) => return Some(value),
            Err(e) if attempt < attempts => {
                log::warn!("[assets] {} attempt {} failed: {:?}", label, attempt, e);
            }
            Err(e) => log::error!("[assets] {} unavailable: {:?}", label, e),
        }
    }
    None
}
