use std::collections::HashMap;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{StoreshotsError, StoreshotsResult};
use crate::render::shapes::render_scene;
use crate::text::fonts::{FontDescriptor, ResolvedFont};

/// Offset copy drawn beneath each line before the solid pass.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextShadow {
    pub offset: f64,
    pub color: Rgba8,
}

/// Centered multi-line text block.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub font: FontDescriptor,
    pub color: Rgba8,
    /// Top of the first line.
    pub y: f64,
    /// Fixed vertical distance between consecutive line tops.
    pub advance: f64,
    pub shadow: Option<TextShadow>,
}

/// One line after measurement and centering.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x: i64,
    pub y: f64,
    pub width: u32,
}

/// Left edge that centers a `text_width` run on a `canvas_width` canvas.
///
/// Floor division keeps odd remainders biased left, and overflowing text goes negative
/// symmetrically.
pub fn center_x(canvas_width: u32, text_width: u32) -> i64 {
    (i64::from(canvas_width) - i64::from(text_width)).div_euclid(2)
}

/// Center each measured line and step down by `advance`; returns the y after the block.
pub fn place_lines<'a>(
    lines: impl IntoIterator<Item = (&'a str, u32)>,
    canvas_width: u32,
    y0: f64,
    advance: f64,
) -> (Vec<PlacedLine>, f64) {
    let mut y = y0;
    let mut out = Vec::new();
    for (text, width) in lines {
        out.push(PlacedLine {
            text: text.to_string(),
            x: center_x(canvas_width, width),
            y,
            width,
        });
        y += advance;
    }
    (out, y)
}

/// Painted horizontal extent of a shaped line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InkSpan {
    /// Offset of the first painted column from the pen origin (negative for overhangs).
    pub left: i64,
    /// Painted columns from first to last, inclusive; 0 for blank text.
    pub width: u32,
}

/// Stateful helper for shaping lines with Parley from resolved font bytes.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    families: HashMap<(String, u32), String>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            families: HashMap::new(),
        }
    }

    fn family_for(&mut self, font: &ResolvedFont) -> StoreshotsResult<String> {
        let key = (font.origin.clone(), font.index);
        if let Some(name) = self.families.get(&key) {
            return Ok(name.clone());
        }

        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(font.bytes.as_ref().clone()),
            None,
        );
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            StoreshotsError::render(format!("no font families registered from '{}'", font.origin))
        })?;
        let name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| StoreshotsError::render("registered font family has no name"))?
            .to_string();

        self.families.insert(key, name.clone());
        Ok(name)
    }

    /// Shape one line without wrapping.
    pub fn layout_line(
        &mut self,
        text: &str,
        font: &ResolvedFont,
        desc: FontDescriptor,
        brush: Rgba8,
    ) -> StoreshotsResult<parley::Layout<Rgba8>> {
        if !desc.size_px.is_finite() || desc.size_px <= 0.0 {
            return Err(StoreshotsError::validation(
                "font size_px must be finite and > 0",
            ));
        }
        let family = self.family_for(font)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(desc.size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(f32::from(desc.weight)),
        ));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    /// Horizontal ink extent of `text`: the width of its painted pixels and where they
    /// start relative to the pen origin.
    pub fn measure(
        &mut self,
        text: &str,
        font: &ResolvedFont,
        desc: FontDescriptor,
    ) -> StoreshotsResult<InkSpan> {
        let layout = self.layout_line(text, font, desc, Rgba8::default())?;
        ink_span(&layout, &font_data(font), desc.size_px)
    }

    /// Measure, center and draw every line of `block`; returns the y after the block.
    ///
    /// Without a font the line positions still advance but nothing is drawn.
    pub fn draw_block(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        block: &TextBlock,
        font: Option<&ResolvedFont>,
        canvas_width: u32,
    ) -> StoreshotsResult<f64> {
        let Some(font) = font else {
            let lines = block.lines.iter().map(|l| (l.as_str(), 0));
            let (_, next_y) = place_lines(lines, canvas_width, block.y, block.advance);
            return Ok(next_y);
        };

        let data = font_data(font);
        let mut layouts = Vec::with_capacity(block.lines.len());
        let mut spans = Vec::with_capacity(block.lines.len());
        for line in &block.lines {
            let layout = self.layout_line(line, font, block.font, block.color)?;
            spans.push(ink_span(&layout, &data, block.font.size_px)?);
            layouts.push(layout);
        }
        let (placed, next_y) = place_lines(
            block
                .lines
                .iter()
                .zip(&spans)
                .map(|(l, span)| (l.as_str(), span.width)),
            canvas_width,
            block.y,
            block.advance,
        );

        for ((line, layout), span) in placed.iter().zip(&layouts).zip(&spans) {
            // `line.x` is where the ink starts; the pen sits `span.left` before it.
            let x = (line.x - span.left) as f64;
            if let Some(shadow) = block.shadow {
                draw_layout(
                    ctx,
                    layout,
                    &data,
                    (x + shadow.offset, line.y + shadow.offset),
                    shadow.color,
                );
            }
            draw_layout(ctx, layout, &data, (x, line.y), block.color);
        }
        Ok(next_y)
    }
}

fn font_data(font: &ResolvedFont) -> vello_cpu::peniko::FontData {
    vello_cpu::peniko::FontData::new(
        vello_cpu::peniko::Blob::from(font.bytes.as_ref().clone()),
        font.index,
    )
}

/// Rasterize `layout` off-screen and scan for painted columns.
///
/// The scratch surface is padded by one em on every side so overhanging glyphs are
/// not clipped.
fn ink_span(
    layout: &parley::Layout<Rgba8>,
    font: &vello_cpu::peniko::FontData,
    size_px: f32,
) -> StoreshotsResult<InkSpan> {
    let advance = f64::from(layout.width());
    let height = f64::from(layout.height());
    if !(advance.is_finite() && height.is_finite()) || advance <= 0.0 || height <= 0.0 {
        return Ok(InkSpan::default());
    }

    let pad = f64::from(size_px).ceil().max(1.0);
    let w = (advance + 2.0 * pad).ceil() as u32;
    let h = (height + 2.0 * pad).ceil() as u32;
    let scratch = render_scene(w, h, |ctx| {
        draw_layout(ctx, layout, font, (pad, pad), Rgba8::new(255, 255, 255, 255));
        Ok(())
    })?;

    let stride = (w as usize) * 4;
    let painted = |x: u32| {
        scratch
            .data()
            .chunks_exact(stride)
            .any(|row| row[(x as usize) * 4 + 3] > 0)
    };
    let Some(first) = (0..w).find(|&x| painted(x)) else {
        return Ok(InkSpan::default());
    };
    let last = (first..w).rev().find(|&x| painted(x)).unwrap_or(first);

    Ok(InkSpan {
        left: i64::from(first) - pad as i64,
        width: last - first + 1,
    })
}

fn draw_layout(
    ctx: &mut vello_cpu::RenderContext,
    layout: &parley::Layout<Rgba8>,
    font: &vello_cpu::peniko::FontData,
    origin: (f64, f64),
    color: Rgba8,
) {
    ctx.set_transform(vello_cpu::kurbo::Affine::translate(origin));
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        color.r, color.g, color.b, color.a,
    ));
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/engine.rs"]
mod tests;
