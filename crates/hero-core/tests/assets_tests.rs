// Host-side tests for background selection, decoding and one-shot delivery.

use hero_core::*;
use std::io::Cursor;

fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([10, 200, 30, 255]));
    let mut out = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut out, image::ImageFormat::Png)
        .expect("encode png");
    out.into_inner()
}

#[test]
fn portrait_viewports_pick_the_portrait_image() {
    let cfg = HeroConfig::default();
    let portrait = BackgroundVariant::select(Viewport::new(390.0, 844.0));
    assert_eq!(portrait, BackgroundVariant::Portrait);
    assert_eq!(portrait.path(&cfg), "./assets/images/hero-mobile.jpg");

    let landscape = BackgroundVariant::select(Viewport::new(1440.0, 900.0));
    assert_eq!(landscape, BackgroundVariant::Landscape);
    assert_eq!(landscape.path(&cfg), "./assets/images/hero.jpg");

    // square counts as landscape
    assert_eq!(
        BackgroundVariant::select(Viewport::new(600.0, 600.0)),
        BackgroundVariant::Landscape
    );
}

#[test]
fn decode_reports_natural_size() {
    let img = DecodedImage::decode(&png_bytes(5, 3)).expect("decode");
    assert_eq!((img.width, img.height), (5, 3));
    assert_eq!(img.rgba.len(), 5 * 3 * 4);
    assert_eq!(&img.rgba[..4], &[10, 200, 30, 255]);
    assert_eq!(img.resolution(), glam::Vec2::new(5.0, 3.0));
}

#[test]
fn decode_rejects_garbage() {
    let err = DecodedImage::decode(b"definitely not an image").unwrap_err();
    assert!(matches!(err, HeroError::Decode(_)));
}

#[test]
fn one_shot_delivers_exactly_once() {
    let mut slot: OneShot<u32> = OneShot::new("answer");
    assert!(slot.is_pending());
    assert_eq!(slot.take(), None);

    slot.deliver(42).unwrap();
    assert!(!slot.is_pending());
    let again = slot.deliver(7).unwrap_err();
    assert!(matches!(again, HeroError::AlreadyDelivered("answer")));

    assert_eq!(slot.take(), Some(42));
    assert_eq!(slot.take(), None);
    assert!(slot.is_consumed());
    assert!(slot.deliver(1).is_err());
}

#[test]
fn webp_overrides_decode() {
    let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([0, 120, 40, 255]));
    let mut out = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut out, image::ImageFormat::WebP)
        .expect("encode webp");
    let decoded = DecodedImage::decode(&out.into_inner()).unwrap();
    assert_eq!((decoded.width, decoded.height), (3, 2));
    assert_eq!(&decoded.rgba[..4], &[0, 120, 40, 255]);
}

#[test]
fn background_slot_can_be_reset_for_a_new_variant() {
    let mut assets = PendingAssets::default();
    assets
        .background
        .deliver(DecodedImage::decode(&png_bytes(2, 2)).unwrap())
        .unwrap();
    assert!(assets.background.take().is_some());
    assets.reset_background();
    assert!(assets.background.is_pending());
}

#[test]
fn config_overrides_only_non_empty_paths() {
    let cfg = HeroConfig::default().with_overrides(
        Some("/img/wide.webp".to_string()),
        Some("   ".to_string()),
        None,
    );
    assert_eq!(cfg.landscape_image, "/img/wide.webp");
    assert_eq!(cfg.portrait_image, "./assets/images/hero-mobile.jpg");
    assert_eq!(cfg.sprite_image, "./assets/images/trevo.png");
    assert_eq!(cfg.container_id, "canvas-container");
}

#[test]
fn pixel_ratio_is_capped() {
    let cfg = HeroConfig::default();
    assert_eq!(cfg.pixel_ratio(1.0), 1.0);
    assert_eq!(cfg.pixel_ratio(1.5), 1.5);
    assert_eq!(cfg.pixel_ratio(3.0), 2.0);
    assert_eq!(cfg.pixel_ratio(0.0), 1.0);
    assert_eq!(cfg.pixel_ratio(f64::NAN), 1.0);
}
