use crate::retry;
use hero_core::constants::FETCH_ATTEMPTS;
use hero_core::{DecodedImage, OneShot, PendingAssets};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

#[derive(Clone, Copy, Debug)]
pub enum AssetKind {
    Background,
    Sprite,
}

impl AssetKind {
    fn slot(self, assets: &mut PendingAssets) -> &mut OneShot<DecodedImage> {
        match self {
            AssetKind::Background => &mut assets.background,
            AssetKind::Sprite => &mut assets.sprite,
        }
    }
}

async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!(format!("fetch {}: {:?}", url, e)))?
        .dyn_into::<web::Response>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    if !resp.ok() {
        anyhow::bail!("fetch {}: HTTP {}", url, resp.status());
    }
    let buf = JsFuture::from(
        resp.array_buffer()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?,
    )
    .await
    .map_err(|e| anyhow::anyhow!(format!("read {}: {:?}", url, e)))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

async fn load_image(url: &str) -> anyhow::Result<DecodedImage> {
    let bytes = fetch_bytes(url).await?;
    Ok(DecodedImage::decode(&bytes)?)
}

/// Fetch and decode in the background, then fill the matching slot.
/// Failures are logged and leave the slot pending; that layer never shows.
pub fn spawn_load(url: String, kind: AssetKind, assets: Rc<RefCell<PendingAssets>>) {
    spawn_local(async move {
        let label = format!("{:?}", kind);
        let Some(img) = retry::load_with_retry(&label, FETCH_ATTEMPTS, |_| load_image(&url)).await
        else {
            return;
        };
        if let Err(e) = kind.slot(&mut assets.borrow_mut()).deliver(img) {
            log::warn!("[assets] {:?}: {}", kind, e);
        }
    });
}
