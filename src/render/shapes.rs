use vello_cpu::kurbo::Shape;

use crate::foundation::core::{Rgba8, Surface};
use crate::foundation::error::{StoreshotsError, StoreshotsResult};
use crate::foundation::math::mul_div255_u8;

/// Flattening tolerance for corner arcs, in pixels.
const ARC_TOLERANCE: f64 = 0.1;

/// Single-channel coverage mask: 255 inside the shape, 0 outside.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    alpha: Vec<u8>,
}

impl Mask {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Coverage at `(x, y)`; 0 outside the mask bounds.
    pub fn get(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.alpha[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Scale every pixel of `target` by the mask coverage (premultiplied "dst-in").
    pub fn apply_to(&self, target: &mut Surface) -> StoreshotsResult<()> {
        if target.width() != self.width || target.height() != self.height {
            return Err(StoreshotsError::render(format!(
                "mask {}x{} does not match surface {}x{}",
                self.width,
                self.height,
                target.width(),
                target.height()
            )));
        }
        for (px, &m) in target.data_mut().chunks_exact_mut(4).zip(&self.alpha) {
            if m == 255 {
                continue;
            }
            let m = u16::from(m);
            for c in px.iter_mut() {
                *c = mul_div255_u8(u16::from(*c), m);
            }
        }
        Ok(())
    }
}

/// Antialiased rounded-rectangle mask covering the full `width` x `height` area.
///
/// `radius` is clamped to `[0, min(width, height) / 2]`.
pub fn rounded_mask(width: u32, height: u32, radius: f64) -> StoreshotsResult<Mask> {
    let coverage = render_scene(width, height, |ctx| {
        fill_rounded_rect(
            ctx,
            (0.0, 0.0, f64::from(width), f64::from(height)),
            radius,
            Rgba8::new(255, 255, 255, 255),
        );
        Ok(())
    })?;
    let alpha = coverage.data().chunks_exact(4).map(|px| px[3]).collect();
    Ok(Mask {
        width,
        height,
        alpha,
    })
}

/// Clamp a corner radius so opposite arcs never overlap.
pub fn clamp_radius(width: f64, height: f64, radius: f64) -> f64 {
    let max = (width.min(height) / 2.0).max(0.0);
    if !radius.is_finite() {
        return 0.0;
    }
    radius.clamp(0.0, max)
}

/// Fill the rounded rectangle spanning `(x0, y0, x1, y1)` with a solid color.
pub(crate) fn fill_rounded_rect(
    ctx: &mut vello_cpu::RenderContext,
    rect: (f64, f64, f64, f64),
    radius: f64,
    color: Rgba8,
) {
    let (x0, y0, x1, y1) = rect;
    let r = clamp_radius(x1 - x0, y1 - y0, radius);
    let path = vello_cpu::kurbo::RoundedRect::new(x0, y0, x1, y1, r).to_path(ARC_TOLERANCE);
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        color.r, color.g, color.b, color.a,
    ));
    ctx.fill_path(&path);
}

/// Rasterize a vector scene into a fresh transparent surface.
///
/// `vello_cpu` renders into a fresh buffer, so callers composite the returned surface
/// onto their target with [`crate::over_at`].
pub(crate) fn render_scene(
    width: u32,
    height: u32,
    draw: impl FnOnce(&mut vello_cpu::RenderContext) -> StoreshotsResult<()>,
) -> StoreshotsResult<Surface> {
    let width_u16: u16 = width
        .try_into()
        .map_err(|_| StoreshotsError::render("scene width exceeds u16"))?;
    let height_u16: u16 = height
        .try_into()
        .map_err(|_| StoreshotsError::render("scene height exceeds u16"))?;
    if width_u16 == 0 || height_u16 == 0 {
        return Err(StoreshotsError::validation(format!(
            "scene dimensions must be > 0 (got {width}x{height})"
        )));
    }

    let mut ctx = vello_cpu::RenderContext::new(width_u16, height_u16);
    draw(&mut ctx)?;
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(width_u16, height_u16);
    ctx.render_to_pixmap(&mut pixmap);
    Surface::from_premul_bytes(width, height, pixmap.data_as_u8_slice().to_vec())
}

#[cfg(test)]
#[path = "../../tests/unit/render/shapes.rs"]
mod tests;
