//! Bar-style scan code for catalog ids.
//!
//! Layout, left to right: a round logo mark, a kind bar (short for tracks, tall for albums), two
//! 3-bit bars per id character, two checksum bars, and a short end bar. Bars have eight height
//! levels.

use std::fmt::Write as _;

use anyhow::Context;

use crate::{
    foundation::{
        core::Rgb8,
        error::{PosterError, PosterResult},
        math::fnv1a64,
    },
    render::canvas::PremulLayer,
    theme::resolver::Theme,
};

const BASE62: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const MAX_LEVEL: u8 = 7;

/// What the catalog id refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodeKind {
    Track,
    Album,
}

impl CodeKind {
    fn tag(self) -> u8 {
        match self {
            CodeKind::Track => b'T',
            CodeKind::Album => b'A',
        }
    }

    fn lead_level(self) -> u8 {
        match self {
            CodeKind::Track => 0,
            CodeKind::Album => MAX_LEVEL,
        }
    }
}

/// Bar levels encoding one catalog id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanCode {
    levels: Vec<u8>,
}

impl ScanCode {
    pub fn encode(catalog_id: &str, kind: CodeKind) -> PosterResult<Self> {
        let id = catalog_id.trim();
        if id.is_empty() {
            return Err(PosterError::validation("catalog id must be non-empty"));
        }

        let mut levels = Vec::with_capacity(id.len() * 2 + 4);
        levels.push(kind.lead_level());
        for b in id.bytes() {
            let v = symbol_value(b);
            levels.push(v >> 3);
            levels.push(v & 0b111);
        }

        let check = (fnv1a64([[kind.tag()].as_slice(), id.as_bytes()]) & 0b11_1111) as u8;
        levels.push(check >> 3);
        levels.push(check & 0b111);
        levels.push(0);

        Ok(Self { levels })
    }

    pub fn levels(&self) -> &[u8] {
        &self.levels
    }

    /// SVG document of the code drawn in `ink` on a transparent background.
    pub fn to_svg(&self, width: u32, height: u32, ink: Rgb8) -> String {
        let (w, h) = (f64::from(width), f64::from(height));
        let hex = ink.to_hex();

        let radius = h * 0.4;
        let (cx, cy) = (h * 0.5, h * 0.5);
        let wave = radius * 0.12;

        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {w} {h}">"#
        );
        let _ = write!(
            svg,
            r#"<defs><mask id="logo" maskUnits="userSpaceOnUse" x="0" y="0" width="{w}" height="{h}"><rect width="{w}" height="{h}" fill="white"/>"#
        );
        for (i, spread) in [0.55f64, 0.42, 0.3].iter().enumerate() {
            let y = cy - radius * 0.35 + (i as f64) * radius * 0.35;
            let half = radius * spread;
            let _ = write!(
                svg,
                r#"<path d="M{:.2},{:.2} Q{cx:.2},{:.2} {:.2},{:.2}" stroke="black" stroke-width="{wave:.2}" stroke-linecap="round" fill="none"/>"#,
                cx - half,
                y,
                y - radius * 0.18,
                cx + half,
                y + radius * 0.06,
            );
        }
        svg.push_str("</mask></defs>");
        let _ = write!(
            svg,
            r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{radius:.2}" fill="{hex}" mask="url(#logo)"/>"#
        );

        let start = h * 1.1;
        let avail = (w - start - h * 0.1).max(1.0);
        let slot = avail / self.levels.len() as f64;
        let bar_w = slot * 0.55;
        let max_h = h * 0.8;
        let min_h = bar_w.min(max_h);
        for (i, &level) in self.levels.iter().enumerate() {
            let bar_h = min_h + (max_h - min_h) * f64::from(level) / f64::from(MAX_LEVEL);
            let x = start + slot * i as f64 + (slot - bar_w) / 2.0;
            let y = (h - bar_h) / 2.0;
            let _ = write!(
                svg,
                r#"<rect x="{x:.2}" y="{y:.2}" width="{bar_w:.2}" height="{bar_h:.2}" rx="{:.2}" fill="{hex}"/>"#,
                bar_w / 2.0
            );
        }
        svg.push_str("</svg>");
        svg
    }
}

fn symbol_value(b: u8) -> u8 {
    match BASE62.iter().position(|&c| c == b) {
        Some(i) => i as u8,
        None => b % 64,
    }
}

/// Render the themed scan code for `catalog_id` as a transparent `width x height` layer.
pub fn render_scannable(
    catalog_id: &str,
    theme: Theme,
    is_album: bool,
    width: u32,
    height: u32,
) -> PosterResult<PremulLayer> {
    let kind = if is_album {
        CodeKind::Album
    } else {
        CodeKind::Track
    };
    let code = ScanCode::encode(catalog_id, kind)?;
    let svg = code.to_svg(width, height, theme.spec().foreground);

    let tree = usvg::Tree::from_str(&svg, &usvg::Options::default()).context("parse scan code svg")?;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| PosterError::render("failed to allocate scan code pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );
    PremulLayer::new(width, height, pixmap.data().to_vec())
}

#[cfg(test)]
#[path = "../../tests/unit/scannable/code.rs"]
mod tests;
