use super::*;

#[test]
fn mask_center_is_opaque_and_corner_transparent() {
    for (w, h, r) in [(100u32, 80u32, 36.0), (1052, 1958, 36.0), (64, 64, 4.0), (90, 60, 44.0)] {
        let m = rounded_mask(w, h, r).unwrap();
        assert_eq!(m.get(w / 2, h / 2), 255, "{w}x{h} r={r}");
        assert_eq!(m.get(0, 0), 0, "{w}x{h} r={r}");
        assert_eq!(m.get(w - 1, 0), 0);
        assert_eq!(m.get(0, h - 1), 0);
        assert_eq!(m.get(w - 1, h - 1), 0);
    }
}

#[test]
fn zero_radius_mask_is_a_full_rectangle() {
    let m = rounded_mask(16, 9, 0.0).unwrap();
    for y in 0..9 {
        for x in 0..16 {
            assert_eq!(m.get(x, y), 255);
        }
    }
}

#[test]
fn mask_edges_are_opaque_between_arcs() {
    let m = rounded_mask(200, 100, 36.0).unwrap();
    assert_eq!(m.get(100, 0), 255);
    assert_eq!(m.get(0, 50), 255);
    assert_eq!(m.get(199, 50), 255);
}

#[test]
fn corner_arc_is_antialiased() {
    let m = rounded_mask(200, 200, 36.0).unwrap();
    // Walking the diagonal into the corner arc crosses at least one partial pixel.
    let partial = (0..36).any(|i| {
        let a = m.get(i, i);
        a > 0 && a < 255
    });
    assert!(partial);
}

#[test]
fn radius_is_clamped_to_half_the_short_side() {
    assert_eq!(clamp_radius(100.0, 40.0, 44.0), 20.0);
    assert_eq!(clamp_radius(100.0, 100.0, -3.0), 0.0);
    assert_eq!(clamp_radius(100.0, 100.0, f64::NAN), 0.0);
    assert_eq!(clamp_radius(100.0, 100.0, 36.0), 36.0);
}

#[test]
fn apply_scales_premultiplied_pixels() {
    let m = rounded_mask(40, 40, 10.0).unwrap();
    let mut s = Surface::filled(40, 40, [200, 100, 50, 255]).unwrap();
    m.apply_to(&mut s).unwrap();
    assert_eq!(s.pixel(0, 0), Some([0, 0, 0, 0]));
    assert_eq!(s.pixel(20, 20), Some([200, 100, 50, 255]));
}

#[test]
fn apply_rejects_size_mismatch() {
    let m = rounded_mask(10, 10, 2.0).unwrap();
    let mut s = Surface::new(11, 10).unwrap();
    assert!(m.apply_to(&mut s).is_err());
}

#[test]
fn oversized_scene_is_rejected() {
    assert!(render_scene(70_000, 10, |_| Ok(())).is_err());
}
