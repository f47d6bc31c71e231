//! Fixed geometry of the poster template.
//!
//! Region coordinates are constant across themes; only the background template and colors vary.
//! The engine trusts these values and never computes them.

use crate::foundation::{
    core::{Rect, Region},
    error::{PosterError, PosterResult},
};

/// A text region plus the nominal font size used inside it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextSlot {
    pub region: Region,
    pub size_px: f32,
}

impl TextSlot {
    const fn new(region: Region, size_px: f32) -> Self {
        Self { region, size_px }
    }
}

/// Track-list packing parameters for the album variant.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrackListSlot {
    pub region: Region,
    pub size_px: f32,
    /// Maximum lines per column before a new column starts.
    pub max_lines: usize,
    /// Horizontal gap between columns.
    pub column_gap: f64,
    /// Extra vertical space between lines.
    pub line_spacing: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PosterLayout {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub cover: Region,
    pub palette: Region,
    pub palette_swatches: u32,
    pub accent_strip: Region,
    pub code: Region,
    pub heading: TextSlot,
    /// Smallest size the heading may shrink to before it is truncated instead.
    pub heading_min_size_px: f32,
    pub artist: TextSlot,
    pub duration: TextSlot,
    pub label: TextSlot,
    pub lyrics: TextSlot,
    pub lyrics_line_spacing: f64,
    pub tracks: TrackListSlot,
}

impl Default for PosterLayout {
    fn default() -> Self {
        Self {
            canvas_width: 1280,
            canvas_height: 1920,
            cover: Region::sized(104.0, 104.0, 1072.0, 1072.0),
            palette: Region::sized(104.0, 1200.0, 1072.0, 36.0),
            palette_swatches: 6,
            accent_strip: Region::sized(0.0, 1896.0, 1280.0, 24.0),
            code: Region::sized(90.0, 1760.0, 400.0, 100.0),
            heading: TextSlot::new(Region::at(104.0, 1320.0).with_width(860.0), 74.0),
            heading_min_size_px: 56.0,
            artist: TextSlot::new(Region::at(104.0, 1384.0), 48.0),
            duration: TextSlot::new(Region::at(1176.0, 1320.0), 40.0),
            label: TextSlot::new(Region::at(1176.0, 1768.0), 28.0),
            lyrics: TextSlot::new(Region::sized(104.0, 1440.0, 1072.0, 260.0), 38.0),
            lyrics_line_spacing: 6.0,
            tracks: TrackListSlot {
                region: Region::sized(104.0, 1440.0, 1072.0, 260.0),
                size_px: 32.0,
                max_lines: 5,
                column_gap: 50.0,
                line_spacing: 2.0,
            },
        }
    }
}

impl PosterLayout {
    /// Check that fixed slots fit the canvas and never overlap each other.
    pub fn validate(&self) -> PosterResult<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(PosterError::validation("canvas must be non-empty"));
        }
        if self.palette_swatches == 0 {
            return Err(PosterError::validation("palette needs at least one swatch"));
        }
        if self.tracks.max_lines == 0 {
            return Err(PosterError::validation(
                "track columns need at least one line",
            ));
        }
        if !(self.heading_min_size_px > 0.0 && self.heading_min_size_px <= self.heading.size_px) {
            return Err(PosterError::validation(
                "heading_min_size_px must be in (0, heading.size_px]",
            ));
        }

        let canvas = Rect::new(
            0.0,
            0.0,
            f64::from(self.canvas_width),
            f64::from(self.canvas_height),
        );
        let slots = self.fixed_slots()?;
        for (name, rect) in &slots {
            if rect.union(canvas) != canvas {
                return Err(PosterError::validation(format!(
                    "{name} slot lies outside the canvas"
                )));
            }
        }
        for (i, (a_name, a)) in slots.iter().enumerate() {
            for (b_name, b) in &slots[i + 1..] {
                if a.intersect(*b).area() > 0.0 {
                    return Err(PosterError::validation(format!(
                        "{a_name} slot overlaps {b_name} slot"
                    )));
                }
            }
        }
        Ok(())
    }

    fn fixed_slots(&self) -> PosterResult<Vec<(&'static str, Rect)>> {
        let rect = |name: &'static str, region: &Region| {
            region
                .rect()
                .map(|r| (name, r))
                .ok_or_else(|| PosterError::validation(format!("{name} slot needs a fixed size")))
        };
        Ok(vec![
            rect("cover", &self.cover)?,
            rect("palette", &self.palette)?,
            rect("accent strip", &self.accent_strip)?,
            rect("code", &self.code)?,
        ])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/template.rs"]
mod tests;
