//! Pure text placement.
//!
//! Functions here only measure through a [`Typesetter`] and return positioned [`TextBlock`]s;
//! nothing is drawn until the composer hands the block back to the typesetter.

use std::str::FromStr;

use crate::{
    foundation::{
        core::{Point, Rect, Rgb8},
        error::{PosterError, PosterResult},
    },
    text::{
        fonts::FontWeight,
        typeset::{PlacedLine, TextBlock, Typesetter},
    },
};

pub const ELLIPSIS: &str = "…";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Middle,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Middle,
    /// Baseline of the last line.
    Baseline,
    Bottom,
}

/// Which point of a text block sits on the layout origin.
///
/// Parsed from two letters: `l`/`m`/`r` then `t`/`m`/`s`/`b` (`"ls"` is left-baseline).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Anchor {
    pub h: HAlign,
    pub v: VAlign,
}

impl Anchor {
    pub const LEFT_TOP: Self = Self::new(HAlign::Left, VAlign::Top);
    pub const LEFT_BASELINE: Self = Self::new(HAlign::Left, VAlign::Baseline);
    pub const RIGHT_TOP: Self = Self::new(HAlign::Right, VAlign::Top);
    pub const RIGHT_BASELINE: Self = Self::new(HAlign::Right, VAlign::Baseline);

    pub const fn new(h: HAlign, v: VAlign) -> Self {
        Self { h, v }
    }
}

impl FromStr for Anchor {
    type Err = PosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(PosterError::validation(format!(
                "anchor '{s}' must be two letters"
            )));
        }
        let h = match bytes[0] {
            b'l' => HAlign::Left,
            b'm' => HAlign::Middle,
            b'r' => HAlign::Right,
            _ => {
                return Err(PosterError::validation(format!(
                    "anchor '{s}': horizontal part must be l, m or r"
                )));
            }
        };
        let v = match bytes[1] {
            b't' => VAlign::Top,
            b'm' => VAlign::Middle,
            b's' => VAlign::Baseline,
            b'b' => VAlign::Bottom,
            _ => {
                return Err(PosterError::validation(format!(
                    "anchor '{s}': vertical part must be t, m, s or b"
                )));
            }
        };
        Ok(Self { h, v })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub weight: FontWeight,
    pub size_px: f32,
    pub color: Rgb8,
}

impl TextStyle {
    pub fn new(weight: FontWeight, size_px: f32, color: Rgb8) -> Self {
        Self {
            weight,
            size_px,
            color,
        }
    }
}

/// Place `text` (lines separated by `\n`) so that `anchor` of the block lands on `origin`.
///
/// Lines advance by ascent + descent + `spacing`; each line is aligned horizontally on its own.
pub fn layout_text(
    typesetter: &dyn Typesetter,
    origin: Point,
    text: &str,
    style: TextStyle,
    anchor: Anchor,
    spacing: f64,
) -> PosterResult<TextBlock> {
    let metrics = typesetter.metrics(style.weight, style.size_px)?;
    let advance = metrics.height() + spacing;

    let mut measured = Vec::new();
    for line in text.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let width = typesetter.line_width(line, style.weight, style.size_px)?;
        measured.push((line.to_string(), width));
    }
    let n = measured.len() as f64;
    let block_width = measured.iter().map(|(_, w)| *w).fold(0.0, f64::max);
    let block_height = n * metrics.height() + (n - 1.0) * spacing;

    let top = match anchor.v {
        VAlign::Top => origin.y,
        VAlign::Middle => origin.y - block_height / 2.0,
        VAlign::Bottom => origin.y - block_height,
        VAlign::Baseline => origin.y - metrics.ascent - (n - 1.0) * advance,
    };
    let left_of = |width: f64| match anchor.h {
        HAlign::Left => origin.x,
        HAlign::Middle => origin.x - width / 2.0,
        HAlign::Right => origin.x - width,
    };

    let lines = measured
        .into_iter()
        .enumerate()
        .map(|(i, (text, width))| PlacedLine {
            text,
            x: left_of(width),
            baseline: top + metrics.ascent + i as f64 * advance,
            width,
        })
        .collect();

    let left = left_of(block_width);
    Ok(TextBlock {
        lines,
        weight: style.weight,
        size_px: style.size_px,
        color: style.color,
        bounds: Rect::new(left, top, left + block_width, top + block_height),
        truncated: false,
    })
}

/// Heading placement: upper-cased, bold, left-baseline anchored at `origin`.
///
/// The size steps down from `size_px` toward `min_size_px` until the heading fits `max_width`;
/// if it still overflows at the minimum size it is cut and suffixed with an ellipsis.
pub fn layout_heading(
    typesetter: &dyn Typesetter,
    origin: Point,
    max_width: f64,
    text: &str,
    color: Rgb8,
    size_px: f32,
    min_size_px: f32,
) -> PosterResult<TextBlock> {
    let upper = text.trim().to_uppercase();
    let weight = FontWeight::Bold;
    let min_size_px = min_size_px.min(size_px);

    let mut size = size_px;
    let mut width = typesetter.line_width(&upper, weight, size)?;
    while width > max_width && size > min_size_px {
        size = (size - 1.0).max(min_size_px);
        width = typesetter.line_width(&upper, weight, size)?;
    }

    let (shown, truncated) = if width > max_width {
        let cut = truncate_to_width(typesetter, &upper, weight, size, max_width)?;
        tracing::debug!(heading = %upper, shown = %cut, size, "heading truncated");
        (cut, true)
    } else {
        (upper, false)
    };

    let mut block = layout_text(
        typesetter,
        origin,
        &shown,
        TextStyle::new(weight, size, color),
        Anchor::LEFT_BASELINE,
        0.0,
    )?;
    block.truncated = truncated;
    Ok(block)
}

/// Longest prefix of `text` that, with [`ELLIPSIS`] appended, fits `max_width`.
pub fn truncate_to_width(
    typesetter: &dyn Typesetter,
    text: &str,
    weight: FontWeight,
    size_px: f32,
    max_width: f64,
) -> PosterResult<String> {
    let chars: Vec<char> = text.chars().collect();
    let candidate = |n: usize| -> String {
        let prefix: String = chars[..n].iter().collect();
        format!("{}{ELLIPSIS}", prefix.trim_end())
    };

    // Largest n in [0, len) whose candidate fits; width grows with n.
    let (mut lo, mut hi) = (0usize, chars.len());
    while lo + 1 < hi {
        let mid = (lo + hi) / 2;
        if typesetter.line_width(&candidate(mid), weight, size_px)? <= max_width {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    Ok(candidate(lo))
}

#[cfg(test)]
#[path = "../../tests/unit/text/layout.rs"]
mod tests;
