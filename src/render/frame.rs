use crate::effects::composite::over_at;
use crate::foundation::core::{Rgb8, Surface};
use crate::foundation::error::StoreshotsResult;
use crate::layout::fit::ScaledImage;
use crate::render::shapes::{fill_rounded_rect, render_scene, rounded_mask};

/// Geometry and colors of the device bezel drawn around a screenshot.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FrameStyle {
    /// Gap between the bezel edge and the screenshot, in pixels.
    pub padding: u32,
    pub frame_radius: f64,
    /// Kept below `frame_radius` so the screenshot corners sit inside the bezel arc.
    pub screenshot_radius: f64,
    pub outline_width: f64,
    pub fill: Rgb8,
    pub outline: Rgb8,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            padding: 16,
            frame_radius: 44.0,
            screenshot_radius: 36.0,
            outline_width: 3.0,
            fill: Rgb8::new(38, 38, 40),
            outline: Rgb8::new(58, 58, 62),
        }
    }
}

impl FrameStyle {
    /// Outer frame size for a screenshot of `(width, height)`.
    pub fn frame_size(&self, width: u32, height: u32) -> (u32, u32) {
        (width + 2 * self.padding, height + 2 * self.padding)
    }
}

/// Render the bezel with the rounded screenshot composited inside the padding.
#[tracing::instrument(skip(scaled, style), fields(w = scaled.target_width, h = scaled.target_height))]
pub fn device_frame(scaled: &ScaledImage, style: &FrameStyle) -> StoreshotsResult<Surface> {
    let (fw, fh) = style.frame_size(scaled.target_width, scaled.target_height);
    let (w, h) = (f64::from(fw), f64::from(fh));
    let ow = style.outline_width.clamp(0.0, w.min(h) / 2.0);

    // Outline ring = outer shape in the outline color, inner shape in the fill color.
    let mut frame = render_scene(fw, fh, |ctx| {
        fill_rounded_rect(
            ctx,
            (0.0, 0.0, w, h),
            style.frame_radius,
            style.outline.with_alpha(255),
        );
        fill_rounded_rect(
            ctx,
            (ow, ow, w - ow, h - ow),
            (style.frame_radius - ow).max(0.0),
            style.fill.with_alpha(255),
        );
        Ok(())
    })?;

    let mut shot = Surface::from_rgba_image(&scaled.image)?;
    rounded_mask(
        scaled.target_width,
        scaled.target_height,
        style.screenshot_radius,
    )?
    .apply_to(&mut shot)?;

    let pad = i64::from(style.padding);
    over_at(&mut frame, &shot, pad, pad);
    Ok(frame)
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
