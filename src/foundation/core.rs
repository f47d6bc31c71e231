use crate::foundation::error::{PosterError, PosterResult};

pub use kurbo::{Point, Rect};

/// Straight (non-premultiplied) opaque RGB color.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(s: &str) -> PosterResult<Self> {
        let s = s.trim().trim_start_matches('#');
        if s.len() != 6 || !s.is_ascii() {
            return Err(PosterError::validation(format!("invalid hex color '{s}'")));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&s[i..i + 2], 16)
                .map_err(|_| PosterError::validation(format!("invalid hex color '{s}'")))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, 255])
    }
}

/// Fixed rectangle on the canvas reserved for one semantic element.
///
/// Text regions usually carry only an origin and a width budget; image slots carry both limits.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Region {
    pub origin: Point,
    pub max_width: Option<f64>,
    pub max_height: Option<f64>,
}

impl Region {
    pub const fn at(x: f64, y: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            max_width: None,
            max_height: None,
        }
    }

    pub const fn with_width(mut self, w: f64) -> Self {
        self.max_width = Some(w);
        self
    }

    pub const fn sized(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            max_width: Some(w),
            max_height: Some(h),
        }
    }

    /// Rectangle covered by this region, when both limits are known.
    pub fn rect(&self) -> Option<Rect> {
        let (w, h) = (self.max_width?, self.max_height?);
        Some(Rect::from_origin_size(self.origin, (w, h)))
    }

    /// Integer pixel size of a fully bounded region.
    pub fn pixel_size(&self) -> PosterResult<(u32, u32)> {
        let rect = self
            .rect()
            .ok_or_else(|| PosterError::validation("region has no fixed size"))?;
        let w = rect.width().round();
        let h = rect.height().round();
        if w < 1.0 || h < 1.0 {
            return Err(PosterError::validation("region must be at least 1x1 px"));
        }
        Ok((w as u32, h as u32))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
