//! Font-free typesetter for unit tests: every glyph is a box half as wide as the font size.

use crate::{
    foundation::{core::Rect, error::PosterResult},
    render::canvas::Canvas,
    text::{
        fonts::FontWeight,
        typeset::{LineMetrics, TextBlock, Typesetter},
    },
};

pub(crate) struct BoxTypesetter;

impl BoxTypesetter {
    pub(crate) const ADVANCE: f64 = 0.5;
    pub(crate) const ASCENT: f64 = 0.8;
    pub(crate) const DESCENT: f64 = 0.2;
}

impl Typesetter for BoxTypesetter {
    fn line_width(&self, text: &str, _weight: FontWeight, size_px: f32) -> PosterResult<f64> {
        Ok(text.chars().count() as f64 * Self::ADVANCE * f64::from(size_px))
    }

    fn metrics(&self, _weight: FontWeight, size_px: f32) -> PosterResult<LineMetrics> {
        let size = f64::from(size_px);
        Ok(LineMetrics {
            ascent: Self::ASCENT * size,
            descent: Self::DESCENT * size,
        })
    }

    fn rasterize(&self, block: &TextBlock, canvas: &mut Canvas) -> PosterResult<()> {
        let size = f64::from(block.size_px);
        for line in &block.lines {
            canvas.fill_rect(
                Rect::new(
                    line.x,
                    line.baseline - Self::ASCENT * size,
                    line.x + line.width,
                    line.baseline + Self::DESCENT * size,
                ),
                block.color,
            );
        }
        Ok(())
    }
}
