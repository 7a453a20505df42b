use crate::foundation::core::Surface;
use crate::foundation::error::{StoreshotsError, StoreshotsResult};
use crate::foundation::math::mul_div255_u8;

pub type PremulRgba8 = [u8; 4];

/// Porter-Duff source-over on premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), op);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

/// Composite `src` over `dst` with its top-left corner at `(x, y)` in `dst` space.
///
/// Portions of `src` falling outside `dst` are clipped.
pub fn over_at(dst: &mut Surface, src: &Surface, x: i64, y: i64) {
    let dw = i64::from(dst.width());
    let dh = i64::from(dst.height());
    let sw = i64::from(src.width());
    let sh = i64::from(src.height());

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + sw).min(dw);
    let y1 = (y + sh).min(dh);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let src_stride = (sw as usize) * 4;
    let span = ((x1 - x0) as usize) * 4;
    for dy in y0..y1 {
        let sy = (dy - y) as usize;
        let sx = (x0 - x) as usize;
        let s_start = sy * src_stride + sx * 4;
        let s_row = &src.data()[s_start..s_start + span];

        let d_row = dst.row_mut(dy as u32);
        let d_start = (x0 as usize) * 4;
        let d_row = &mut d_row[d_start..d_start + span];

        for (d, s) in d_row.chunks_exact_mut(4).zip(s_row.chunks_exact(4)) {
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], 1.0);
            d.copy_from_slice(&out);
        }
    }
}

/// Flatten a premultiplied surface onto an opaque black backdrop and drop alpha.
pub fn flatten_to_rgb(src: &Surface) -> StoreshotsResult<image::RgbImage> {
    let mut out = Vec::with_capacity((src.width() as usize) * (src.height() as usize) * 3);
    for px in src.data().chunks_exact(4) {
        let flat = over([0, 0, 0, 255], [px[0], px[1], px[2], px[3]], 1.0);
        out.extend_from_slice(&flat[..3]);
    }
    image::RgbImage::from_raw(src.width(), src.height(), out).ok_or_else(|| {
        StoreshotsError::render(format!(
            "rgb buffer does not match {}x{}",
            src.width(),
            src.height()
        ))
    })
}

fn mul_div255(x: u16, y: u16) -> u8 {
    mul_div255_u8(x, y)
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
