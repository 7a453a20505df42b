use super::*;
use crate::compose::config::{ACCENT_BLUE, SlideSpec};
use crate::foundation::core::Rgb8;
use crate::text::fonts::NoFonts;

fn small_layout() -> LayoutConfig {
    LayoutConfig {
        canvas_width: 400,
        canvas_height: 900,
        screenshot_y: 500,
        glow_height: 100,
        headline_y: 20.0,
        headline_advance: 60.0,
        subhead_gap: 10.0,
        subhead_advance: 30.0,
        ..LayoutConfig::default()
    }
}

fn spec() -> SlideSpec {
    SlideSpec::new(
        "shot.png",
        "A\nB",
        "C",
        Rgb8::new(10, 35, 78),
        ACCENT_BLUE,
        "out.png",
    )
}

fn white(w: u32, h: u32) -> image::RgbaImage {
    image::RgbaImage::from_pixel(w, h, image::Rgba([255, 255, 255, 255]))
}

#[test]
fn composed_slide_has_canvas_size() {
    let layout = small_layout();
    let composer = SlideComposer::new(&layout, &NoFonts);
    let out = composer.compose(&spec(), &white(100, 200)).unwrap();
    assert_eq!(out.dimensions(), (400, 900));
}

#[test]
fn top_row_is_gradient_plus_glow() {
    let layout = small_layout();
    let composer = SlideComposer::new(&layout, &NoFonts);
    let out = composer.compose(&spec(), &white(100, 200)).unwrap();
    assert_eq!(out.get_pixel(0, 0).0, [10, 45, 95]);
    // Below the glow band only the gradient remains.
    let below = out.get_pixel(0, 150).0;
    let t = crate::render::gradient::ease_in_t(150, 900);
    let expected_g = (35.0 + (12.0 - 35.0) * t).round() as u8;
    assert_eq!(below[1], expected_g);
}

#[test]
fn screenshot_is_framed_and_centered() {
    let layout = small_layout();
    let composer = SlideComposer::new(&layout, &NoFonts);
    let out = composer.compose(&spec(), &white(100, 200)).unwrap();

    // 100x200 fits as 180x360, framed to 212x392 at x = 94, y = 500.
    assert_eq!(out.get_pixel(200, 696).0, [255, 255, 255]);
    assert_eq!(out.get_pixel(200, 501).0, [58, 58, 62]);
    assert_eq!(out.get_pixel(200, 508).0, [38, 38, 40]);
    // Just outside the frame's right edge.
    assert_ne!(out.get_pixel(307, 696).0, [38, 38, 40]);
    assert_ne!(out.get_pixel(307, 696).0, [58, 58, 62]);
}

#[test]
fn divider_sits_below_text_block() {
    let layout = small_layout();
    let composer = SlideComposer::new(&layout, &NoFonts);
    let out = composer.compose(&spec(), &white(100, 200)).unwrap();

    // Headline 20 + 2 * 60, gap 10, subhead 1 * 30, gap 20 => bar top at 200.
    assert_eq!(out.get_pixel(200, 201).0, [10, 132, 255]);
    assert_eq!(out.get_pixel(145, 202).0, [10, 132, 255]);
    assert_ne!(out.get_pixel(200, 196).0, [10, 132, 255]);
    assert_ne!(out.get_pixel(100, 201).0, [10, 132, 255]);
}

#[test]
fn compose_is_deterministic() {
    let layout = small_layout();
    let composer = SlideComposer::new(&layout, &NoFonts);
    let a = composer.compose(&spec(), &white(64, 64)).unwrap();
    let b = composer.compose(&spec(), &white(64, 64)).unwrap();
    assert_eq!(a.as_raw(), b.as_raw());
}

#[test]
fn missing_source_writes_nothing() {
    let root = std::env::temp_dir().join(format!("storeshots_slide_missing_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&root);
    std::fs::create_dir_all(&root).unwrap();

    let layout = small_layout();
    let composer = SlideComposer::new(&layout, &NoFonts);
    let outcome = composer.build(&spec(), &root, &root).unwrap();
    assert_eq!(
        outcome,
        SlideOutcome::MissingSource {
            source: "shot.png".to_string()
        }
    );
    assert!(!outcome.is_built());
    assert!(!root.join("out.png").exists());
}

#[test]
fn invalid_layout_is_reported() {
    let layout = LayoutConfig {
        screenshot_y: 900,
        ..small_layout()
    };
    let composer = SlideComposer::new(&layout, &NoFonts);
    assert!(composer.compose(&spec(), &white(10, 10)).is_err());
}

fn brightness(px: [u8; 3]) -> i32 {
    px.iter().map(|&c| i32::from(c)).sum()
}

#[test]
fn text_is_centered_shadowed_and_stacked_with_a_real_font() {
    let fonts = crate::text::fonts::default_resolver();
    if fonts.resolve(FontDescriptor::bold(96.0)).is_none()
        || fonts.resolve(FontDescriptor::regular(48.0)).is_none()
    {
        return;
    }

    let layout = LayoutConfig {
        canvas_height: 1400,
        screenshot_y: 900,
        ..LayoutConfig::default()
    };
    let slide = SlideSpec::new(
        "shot.png",
        "Network",
        "Real-time status",
        Rgb8::new(10, 35, 78),
        ACCENT_BLUE,
        "out.png",
    );
    let black = image::RgbaImage::from_pixel(100, 200, image::Rgba([0, 0, 0, 255]));
    let out = SlideComposer::new(&layout, &fonts)
        .compose(&slide, &black)
        .unwrap();

    let cw = layout.canvas_width;
    let px = |x: u32, y: u32| out.get_pixel(x, y).0;
    // Text never reaches column 0, so it carries the row's background.
    let bg = |y: u32| brightness(px(0, y));

    let headline_rows = 140..260;
    let mut white = Vec::new();
    let (mut ink_min, mut ink_max) = (u32::MAX, 0);
    for y in headline_rows.clone() {
        for x in 0..cw {
            let p = px(x, y);
            if p.iter().all(|&c| c >= 250) {
                white.push((x, y));
            }
            if brightness(p) > bg(y) + 24 {
                ink_min = ink_min.min(x);
                ink_max = ink_max.max(x);
            }
        }
    }
    assert!(!white.is_empty(), "headline drew no solid white");
    assert!(white.iter().all(|&(_, y)| headline_rows.contains(&y)));

    let mid = f64::from(ink_min + ink_max) / 2.0;
    assert!(
        (mid - f64::from(cw) / 2.0).abs() <= 1.5,
        "ink spans {ink_min}..={ink_max}"
    );

    // The shadow pass sits 2px down-right, beneath the fill.
    let shadowed = white.iter().any(|&(x, y)| {
        let p = px(x + 2, y + 2);
        brightness(p) < bg(y + 2) - 20
    });
    assert!(shadowed, "no shadow tint found below-right of the headline");

    let headline_bottom = white.iter().map(|&(_, y)| y).max().unwrap();
    let gray_top = (260..layout.screenshot_y)
        .find(|&y| (0..cw).any(|x| px(x, y) == [174, 174, 178]))
        .expect("subhead drew no solid gray");
    assert!(gray_top > headline_bottom);
    assert!(f64::from(gray_top) >= 140.0 + 120.0 + 20.0);
}
