use std::{borrow::Cow, collections::HashMap, sync::Mutex};

use crate::{
    foundation::{
        core::{Rect, Rgb8},
        error::{PosterError, PosterResult},
    },
    render::canvas::{Canvas, PremulLayer},
    text::fonts::{FontSet, FontWeight},
};

/// Vertical metrics of a single line at one weight and size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineMetrics {
    pub ascent: f64,
    pub descent: f64,
}

impl LineMetrics {
    pub fn height(&self) -> f64 {
        self.ascent + self.descent
    }
}

/// One line of a laid-out block.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    /// Left edge of the line's advance box.
    pub x: f64,
    pub baseline: f64,
    pub width: f64,
}

/// Fully positioned text, ready to rasterize.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<PlacedLine>,
    pub weight: FontWeight,
    pub size_px: f32,
    pub color: Rgb8,
    /// Union of the lines' ascent-to-descent boxes.
    pub bounds: Rect,
    /// Set when the source text was shortened to fit its width budget.
    pub truncated: bool,
}

impl TextBlock {
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Measuring and drawing backend for laid-out text.
///
/// Measurements must be deterministic for a given `(text, weight, size)`; layout decisions are
/// made from them alone.
pub trait Typesetter: Send + Sync {
    /// Advance width of a single line.
    fn line_width(&self, text: &str, weight: FontWeight, size_px: f32) -> PosterResult<f64>;

    fn metrics(&self, weight: FontWeight, size_px: f32) -> PosterResult<LineMetrics>;

    fn rasterize(&self, block: &TextBlock, canvas: &mut Canvas) -> PosterResult<()>;
}

struct Face {
    font_ctx: parley::FontContext,
    family: String,
}

struct Shaper {
    faces: Vec<Face>,
    layout_ctx: parley::LayoutContext<Rgb8>,
    metrics: HashMap<(FontWeight, u32), LineMetrics>,
}

impl Shaper {
    fn layout(
        &mut self,
        text: &str,
        weight: FontWeight,
        size_px: f32,
        brush: Rgb8,
    ) -> parley::Layout<Rgb8> {
        let Shaper {
            faces, layout_ctx, ..
        } = self;
        let face = &mut faces[weight.index()];

        let mut builder = layout_ctx.ranged_builder(&mut face.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(face.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<Rgb8> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

/// Production [`Typesetter`]: parley shaping, vello_cpu glyph rasterization.
pub struct FontTypesetter {
    shaper: Mutex<Shaper>,
    glyph_fonts: Vec<vello_cpu::peniko::FontData>,
}

impl std::fmt::Debug for FontTypesetter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontTypesetter").finish_non_exhaustive()
    }
}

impl FontTypesetter {
    pub fn new(fonts: &FontSet) -> PosterResult<Self> {
        let mut faces = Vec::with_capacity(FontWeight::ALL.len());
        let mut glyph_fonts = Vec::with_capacity(FontWeight::ALL.len());
        for weight in FontWeight::ALL {
            let bytes = fonts.bytes(weight);

            let mut font_ctx = parley::FontContext::default();
            let families = font_ctx
                .collection
                .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
            let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
                PosterError::font(format!("no font families registered from {weight} font"))
            })?;
            let family = font_ctx
                .collection
                .family_name(family_id)
                .ok_or_else(|| PosterError::font(format!("{weight} font family has no name")))?
                .to_string();
            tracing::debug!(%weight, %family, "registered font");

            faces.push(Face { font_ctx, family });
            glyph_fonts.push(vello_cpu::peniko::FontData::new(
                vello_cpu::peniko::Blob::from(bytes.to_vec()),
                0,
            ));
        }

        Ok(Self {
            shaper: Mutex::new(Shaper {
                faces,
                layout_ctx: parley::LayoutContext::new(),
                metrics: HashMap::new(),
            }),
            glyph_fonts,
        })
    }

    fn shaper(&self) -> PosterResult<std::sync::MutexGuard<'_, Shaper>> {
        self.shaper
            .lock()
            .map_err(|_| PosterError::font("text shaper lock poisoned"))
    }
}

fn check_size(size_px: f32) -> PosterResult<()> {
    if !size_px.is_finite() || size_px <= 0.0 {
        return Err(PosterError::validation(
            "text size_px must be finite and > 0",
        ));
    }
    Ok(())
}

impl Typesetter for FontTypesetter {
    fn line_width(&self, text: &str, weight: FontWeight, size_px: f32) -> PosterResult<f64> {
        check_size(size_px)?;
        if text.is_empty() {
            return Ok(0.0);
        }
        let layout = self
            .shaper()?
            .layout(text, weight, size_px, Rgb8::default());
        Ok(f64::from(layout.width()))
    }

    fn metrics(&self, weight: FontWeight, size_px: f32) -> PosterResult<LineMetrics> {
        check_size(size_px)?;
        let mut shaper = self.shaper()?;
        let key = (weight, size_px.to_bits());
        if let Some(m) = shaper.metrics.get(&key) {
            return Ok(*m);
        }

        let layout = shaper.layout("Hg", weight, size_px, Rgb8::default());
        let line = layout
            .lines()
            .next()
            .ok_or_else(|| PosterError::font("metrics probe produced no lines"))?;
        let m = line.metrics();
        let metrics = LineMetrics {
            ascent: f64::from(m.ascent),
            descent: f64::from(m.descent),
        };
        shaper.metrics.insert(key, metrics);
        Ok(metrics)
    }

    fn rasterize(&self, block: &TextBlock, canvas: &mut Canvas) -> PosterResult<()> {
        check_size(block.size_px)?;
        // Glyph ink can overhang the advance box (italic tails, accents).
        let pad = f64::from(block.size_px) * 0.25;
        let area = block
            .bounds
            .inflate(pad, pad)
            .intersect(Rect::new(
                0.0,
                0.0,
                f64::from(canvas.width()),
                f64::from(canvas.height()),
            ));
        let x0 = area.x0.floor();
        let y0 = area.y0.floor();
        let w = (area.x1.ceil() - x0).max(0.0);
        let h = (area.y1.ceil() - y0).max(0.0);
        if w < 1.0 || h < 1.0 {
            return Ok(());
        }
        if w > f64::from(u16::MAX) || h > f64::from(u16::MAX) {
            return Err(PosterError::render("text layer exceeds u16 dimensions"));
        }
        let (w, h) = (w as u16, h as u16);

        let font = &self.glyph_fonts[block.weight.index()];
        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            block.color.r,
            block.color.g,
            block.color.b,
            255,
        ));

        let mut shaper = self.shaper()?;
        for placed in block.lines.iter().filter(|l| !l.text.is_empty()) {
            let layout = shaper.layout(&placed.text, block.weight, block.size_px, block.color);
            for line in layout.lines() {
                let baseline = f64::from(line.metrics().baseline);
                ctx.set_transform(vello_cpu::kurbo::Affine::translate((
                    placed.x - x0,
                    placed.baseline - baseline - y0,
                )));
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
        drop(shaper);

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);
        let layer = PremulLayer::new(
            u32::from(w),
            u32::from(h),
            pixmap.data_as_u8_slice().to_vec(),
        )?;
        canvas.composite(&layer, x0 as i64, y0 as i64);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/typeset.rs"]
mod tests;
