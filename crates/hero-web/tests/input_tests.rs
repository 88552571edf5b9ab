// Host-side tests for the pure input helpers.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use hero_core::Viewport;
use input::*;

#[test]
fn drain_returns_latest_resize_and_pointer() {
    let mut q = InputQueue::default();
    q.push_resize(Viewport::new(800.0, 600.0));
    q.push_resize(Viewport::new(1024.0, 768.0));
    q.push_pointer(10.0, 20.0);
    q.push_pointer(30.0, 40.0);

    let batch = q.drain();
    assert_eq!(batch.viewport, Some(Viewport::new(1024.0, 768.0)));
    assert_eq!(batch.pointer, Some((30.0, 40.0)));
    assert!(!batch.entrance);

    // nothing carries over
    assert_eq!(q.drain(), InputBatch::default());
}

#[test]
fn entrance_is_reported_once_per_trigger() {
    let mut q = InputQueue::default();
    q.trigger_entrance();
    q.trigger_entrance();
    assert!(q.drain().entrance);
    assert!(!q.drain().entrance);
}

#[test]
fn backing_size_scales_by_pixel_ratio() {
    let vp = Viewport::new(390.0, 844.0);
    assert_eq!(backing_size(vp, 1.0), (390, 844));
    assert_eq!(backing_size(vp, 2.0), (780, 1688));
    assert_eq!(backing_size(Viewport::new(333.0, 100.0), 1.5), (500, 150));
}

#[test]
fn backing_size_never_zero() {
    assert_eq!(backing_size(Viewport::new(0.0, 0.0), 0.25), (1, 1));
}

#[test]
fn blank_attributes_are_ignored() {
    assert_eq!(attribute_override(None), None);
    assert_eq!(attribute_override(Some("   ".into())), None);
    assert_eq!(
        attribute_override(Some(" /img/hero.webp ".into())),
        Some("/img/hero.webp".to_string())
    );
}
