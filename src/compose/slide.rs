use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::compose::config::{LayoutConfig, SlideSpec};
use crate::effects::composite::{flatten_to_rgb, over_at};
use crate::foundation::core::Surface;
use crate::foundation::error::StoreshotsResult;
use crate::layout::fit::scale_image;
use crate::render::frame::device_frame;
use crate::render::gradient::{glow_band, vertical_gradient};
use crate::render::shapes::{fill_rounded_rect, render_scene};
use crate::text::engine::{TextBlock, TextLayoutEngine, center_x};
use crate::text::fonts::{FontDescriptor, FontResolver, ResolvedFont};

/// Terminal state of one slide.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlideOutcome {
    /// The composed PNG was written to `output`.
    Built { output: PathBuf },
    /// `source` was not found in the source directory; nothing was written.
    MissingSource { source: String },
    /// Decoding, composing or writing failed; the rest of the batch still runs.
    Failed { error: String },
}

impl SlideOutcome {
    pub fn is_built(&self) -> bool {
        matches!(self, Self::Built { .. })
    }
}

/// Builds slides for one layout with one font strategy.
pub struct SlideComposer<'a> {
    layout: &'a LayoutConfig,
    fonts: &'a dyn FontResolver,
}

impl<'a> SlideComposer<'a> {
    pub fn new(layout: &'a LayoutConfig, fonts: &'a dyn FontResolver) -> Self {
        Self { layout, fonts }
    }

    /// Compose a slide in memory from an already-decoded screenshot.
    ///
    /// Layers, bottom to top: gradient, glow, framed screenshot, headline, subhead,
    /// divider. The result is opaque and exactly `canvas_width` x `canvas_height`.
    #[tracing::instrument(skip(self, spec, screenshot), fields(slide = spec.label()))]
    pub fn compose(
        &self,
        spec: &SlideSpec,
        screenshot: &image::RgbaImage,
    ) -> StoreshotsResult<image::RgbImage> {
        let layout = self.layout;
        layout.validate()?;
        let (cw, ch) = (layout.canvas_width, layout.canvas_height);

        let mut canvas = vertical_gradient(cw, ch, spec.gradient_top, spec.gradient_bottom)?;

        let glow = glow_band(
            cw,
            layout.glow_height.min(ch),
            spec.accent,
            layout.glow_max_alpha,
        )?;
        over_at(&mut canvas, &glow, 0, 0);

        let scaled = scale_image(
            screenshot,
            layout.screenshot_width_budget(),
            layout.screenshot_max_height(),
        )?;
        let frame = device_frame(&scaled, &layout.frame)?;
        let frame_x = center_x(cw, frame.width());
        over_at(
            &mut canvas,
            &frame,
            frame_x,
            i64::from(layout.screenshot_y),
        );

        let overlay = self.text_overlay(spec)?;
        over_at(&mut canvas, &overlay, 0, 0);

        flatten_to_rgb(&canvas)
    }

    /// Headline, subhead and divider on a transparent canvas-sized surface.
    fn text_overlay(&self, spec: &SlideSpec) -> StoreshotsResult<Surface> {
        let layout = self.layout;
        let cw = layout.canvas_width;
        let headline_font = self.resolve_font(layout.headline_font);
        let subhead_font = self.resolve_font(layout.subhead_font);

        let headline = TextBlock {
            lines: spec.headline.clone(),
            font: layout.headline_font,
            color: layout.headline_color,
            y: layout.headline_y,
            advance: layout.headline_advance,
            shadow: layout.headline_shadow,
        };

        let mut engine = TextLayoutEngine::new();
        render_scene(cw, layout.canvas_height, |ctx| {
            let y = engine.draw_block(ctx, &headline, headline_font.as_ref(), cw)?;

            let subhead = TextBlock {
                lines: spec.subhead.clone(),
                font: layout.subhead_font,
                color: layout.subhead_color,
                y: y + layout.subhead_gap,
                advance: layout.subhead_advance,
                shadow: None,
            };
            let y = engine.draw_block(ctx, &subhead, subhead_font.as_ref(), cw)?;

            let d = layout.divider;
            let x0 = center_x(cw, d.width.max(0.0).round() as u32) as f64;
            let y0 = y + d.gap;
            tracing::trace!(x0, y0, "divider");
            fill_rounded_rect(
                ctx,
                (x0, y0, x0 + d.width, y0 + d.height),
                d.radius,
                spec.accent.with_alpha(255),
            );
            Ok(())
        })
    }

    fn resolve_font(&self, desc: FontDescriptor) -> Option<ResolvedFont> {
        let font = self.fonts.resolve(desc);
        match &font {
            Some(f) => tracing::debug!(
                origin = %f.origin,
                size = desc.size_px,
                weight = desc.weight,
                "resolved font"
            ),
            None => tracing::warn!(
                size = desc.size_px,
                weight = desc.weight,
                "no font available; text will not be drawn"
            ),
        }
        font
    }

    /// Build one slide from disk and write it as a PNG.
    ///
    /// A missing source is reported as [`SlideOutcome::MissingSource`]; decode and write
    /// failures are errors.
    #[tracing::instrument(skip(self, spec), fields(source = %spec.source, output = %spec.output))]
    pub fn build(
        &self,
        spec: &SlideSpec,
        source_dir: &Path,
        output_dir: &Path,
    ) -> StoreshotsResult<SlideOutcome> {
        let source_path = source_dir.join(&spec.source);
        if !source_path.exists() {
            tracing::info!(path = %source_path.display(), "source screenshot missing");
            return Ok(SlideOutcome::MissingSource {
                source: spec.source.clone(),
            });
        }

        let screenshot = image::open(&source_path)
            .with_context(|| format!("decode screenshot '{}'", source_path.display()))?
            .to_rgba8();
        let slide = self.compose(spec, &screenshot)?;

        let output = output_dir.join(&spec.output);
        slide
            .save_with_format(&output, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", output.display()))?;
        Ok(SlideOutcome::Built { output })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/slide.rs"]
mod tests;
