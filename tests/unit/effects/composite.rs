use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src, 1.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_keeps_opaque_dst_opaque() {
    let dst = [10, 35, 78, 255];
    let src = [1, 13, 25, 25];
    assert_eq!(over(dst, src, 1.0)[3], 255);
}

#[test]
fn over_at_clips_negative_and_overflowing_offsets() {
    let mut dst = Surface::filled(4, 4, [0, 0, 0, 255]).unwrap();
    let src = Surface::filled(3, 3, [255, 255, 255, 255]).unwrap();

    over_at(&mut dst, &src, -1, 2);
    assert_eq!(dst.pixel(0, 1), Some([0, 0, 0, 255]));
    assert_eq!(dst.pixel(0, 2), Some([255, 255, 255, 255]));
    assert_eq!(dst.pixel(1, 3), Some([255, 255, 255, 255]));
    assert_eq!(dst.pixel(2, 2), Some([0, 0, 0, 255]));
}

#[test]
fn over_at_fully_outside_is_noop() {
    let mut dst = Surface::filled(2, 2, [9, 9, 9, 255]).unwrap();
    let before = dst.clone();
    let src = Surface::filled(2, 2, [255, 255, 255, 255]).unwrap();
    over_at(&mut dst, &src, 5, 0);
    over_at(&mut dst, &src, 0, -2);
    assert_eq!(dst, before);
}

#[test]
fn flatten_drops_alpha_over_black() {
    let mut s = Surface::filled(2, 1, [40, 60, 80, 255]).unwrap();
    s.data_mut()[4..8].copy_from_slice(&[50, 50, 50, 128]);
    let rgb = flatten_to_rgb(&s).unwrap();
    assert_eq!(rgb.dimensions(), (2, 1));
    assert_eq!(rgb.get_pixel(0, 0).0, [40, 60, 80]);
    assert_eq!(rgb.get_pixel(1, 0).0, [50, 50, 50]);
}
