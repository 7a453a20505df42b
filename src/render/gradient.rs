use crate::foundation::core::{Rgb8, Surface};
use crate::foundation::error::StoreshotsResult;
use crate::foundation::math::lerp_u8;

/// Ease-in interpolation parameter for row `y` of a `height`-row gradient.
///
/// Squaring keeps the top color dominant over most of the canvas. A single-row
/// gradient is entirely the top color.
pub fn ease_in_t(y: u32, height: u32) -> f64 {
    if height <= 1 {
        return 0.0;
    }
    let t = f64::from(y) / f64::from(height - 1);
    t * t
}

/// Opaque vertical gradient from `top` (row 0) to `bottom` (last row).
pub fn vertical_gradient(
    width: u32,
    height: u32,
    top: Rgb8,
    bottom: Rgb8,
) -> StoreshotsResult<Surface> {
    let mut out = Surface::new(width, height)?;
    for y in 0..height {
        let t = ease_in_t(y, height);
        let px = [
            lerp_u8(top.r(), bottom.r(), t),
            lerp_u8(top.g(), bottom.g(), t),
            lerp_u8(top.b(), bottom.b(), t),
            255,
        ];
        for dst in out.row_mut(y).chunks_exact_mut(4) {
            dst.copy_from_slice(&px);
        }
    }
    Ok(out)
}

/// Alpha of glow row `y` in a band of `band_height` rows, fading linearly to zero.
pub fn glow_alpha(y: u32, band_height: u32, max_alpha: u8) -> u8 {
    if band_height == 0 || y >= band_height {
        return 0;
    }
    let t = 1.0 - f64::from(y) / f64::from(band_height);
    (f64::from(max_alpha) * t).round().clamp(0.0, 255.0) as u8
}

/// Translucent accent band spanning `width`, composited at the canvas top-left.
pub fn glow_band(
    width: u32,
    band_height: u32,
    accent: Rgb8,
    max_alpha: u8,
) -> StoreshotsResult<Surface> {
    let mut out = Surface::new(width, band_height)?;
    for y in 0..band_height {
        let px = accent.with_alpha(glow_alpha(y, band_height, max_alpha)).premul();
        for dst in out.row_mut(y).chunks_exact_mut(4) {
            dst.copy_from_slice(&px);
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/gradient.rs"]
mod tests;
