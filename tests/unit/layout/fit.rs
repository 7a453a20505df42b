use super::*;

#[test]
fn tall_source_is_clamped_to_max_height() {
    assert_eq!(fit_within(2000, 4000, 1052, 1958).unwrap(), (979, 1958));
    assert_eq!(fit_within(1179, 2556, 1052, 1958).unwrap(), (903, 1958));
}

#[test]
fn wide_source_uses_width_budget() {
    assert_eq!(fit_within(4000, 2000, 1052, 1958).unwrap(), (1052, 526));
    assert_eq!(fit_within(1052, 1000, 1052, 1958).unwrap(), (1052, 1000));
}

#[test]
fn exact_fit_is_not_clamped() {
    assert_eq!(fit_within(1052, 1958, 1052, 1958).unwrap(), (1052, 1958));
}

#[test]
fn non_positive_dimensions_are_rejected() {
    assert!(fit_within(0, 10, 100, 100).is_err());
    assert!(fit_within(10, 0, 100, 100).is_err());
    assert!(fit_within(10, 10, 0, 100).is_err());
    assert!(fit_within(10, 10, 100, 0).is_err());
}

#[test]
fn fitted_size_respects_ceiling_and_aspect() {
    let budgets = [(1052u32, 1958u32), (300, 200), (640, 1500)];
    for sw in (50u32..3000).step_by(173) {
        for sh in (50u32..5000).step_by(211) {
            for (tw_budget, mh) in budgets {
                let (tw, th) = fit_within(sw, sh, tw_budget, mh).unwrap();
                assert!(th <= mh, "{sw}x{sh} -> {tw}x{th}");
                assert!(tw <= tw_budget, "{sw}x{sh} -> {tw}x{th}");

                // Cross-multiplied aspect error is bounded by half a pixel on either axis.
                let lhs = u64::from(tw) * u64::from(sh);
                let rhs = u64::from(th) * u64::from(sw);
                let err = lhs.abs_diff(rhs);
                let bound = u64::from(sw.max(sh)).div_ceil(2);
                assert!(err <= bound, "{sw}x{sh} -> {tw}x{th} err={err}");
            }
        }
    }
}

#[test]
fn scale_image_resamples_to_fitted_size() {
    let src = image::RgbaImage::from_pixel(200, 400, image::Rgba([255, 255, 255, 255]));
    let scaled = scale_image(&src, 105, 150).unwrap();
    assert_eq!((scaled.target_width, scaled.target_height), (75, 150));
    assert_eq!(scaled.image.dimensions(), (75, 150));
    assert_eq!((scaled.source_width, scaled.source_height), (200, 400));
    assert!(scaled.image.get_pixel(37, 75).0.iter().all(|&c| c >= 250));
}
