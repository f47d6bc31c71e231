use std::io::Cursor;

use anyhow::Context;

use crate::{
    foundation::core::{Rect, Rgb8},
    foundation::error::{PosterError, PosterResult},
    render::composite::over_opaque,
};

/// Premultiplied RGBA8 layer produced by a rasterizing step (text, scan code).
#[derive(Clone, Debug)]
pub struct PremulLayer {
    pub width: u32,
    pub height: u32,
    /// Row-major premultiplied RGBA8.
    pub data: Vec<u8>,
}

impl PremulLayer {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> PosterResult<Self> {
        if data.len() != width as usize * height as usize * 4 {
            return Err(PosterError::render(format!(
                "layer byte length {} does not match {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }
}

/// Opaque poster canvas.
///
/// Every pixel keeps alpha 255, so straight and premultiplied forms coincide and premultiplied
/// layers can be composited directly.
#[derive(Clone, Debug)]
pub struct Canvas {
    image: image::RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgb8) -> Self {
        Self {
            image: image::RgbaImage::from_pixel(width, height, background.to_rgba()),
        }
    }

    /// Adopt a decoded template, flattening any transparency onto white.
    pub fn from_template(template: image::DynamicImage) -> Self {
        let mut image = template.to_rgba8();
        for px in image.pixels_mut() {
            let a = u16::from(px[3]);
            if a == 255 {
                continue;
            }
            for c in 0..3 {
                let v = u16::from(px[c]) * a + 255 * (255 - a);
                px[c] = ((v + 127) / 255) as u8;
            }
            px[3] = 255;
        }
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgb8 {
        let p = self.image.get_pixel(x, y);
        Rgb8::new(p[0], p[1], p[2])
    }

    /// Copy an opaque image onto the canvas with its top-left corner at `(x, y)`.
    pub fn paste(&mut self, src: &image::RgbaImage, x: i64, y: i64) {
        image::imageops::replace(&mut self.image, src, x, y);
    }

    /// Fill the pixels whose centers fall inside `rect`.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgb8) {
        let (w, h) = (f64::from(self.width()), f64::from(self.height()));
        let x0 = rect.x0.round().clamp(0.0, w) as u32;
        let x1 = rect.x1.round().clamp(0.0, w) as u32;
        let y0 = rect.y0.round().clamp(0.0, h) as u32;
        let y1 = rect.y1.round().clamp(0.0, h) as u32;
        let px = color.to_rgba();
        for y in y0..y1 {
            for x in x0..x1 {
                self.image.put_pixel(x, y, px);
            }
        }
    }

    /// Composite a premultiplied layer with its top-left corner at `(x, y)`; out-of-bounds parts
    /// are clipped.
    pub fn composite(&mut self, layer: &PremulLayer, x: i64, y: i64) {
        let (dst_w, dst_h) = (i64::from(self.width()), i64::from(self.height()));
        for ly in 0..layer.height {
            let dy = y + i64::from(ly);
            if dy < 0 || dy >= dst_h {
                continue;
            }
            for lx in 0..layer.width {
                let dx = x + i64::from(lx);
                if dx < 0 || dx >= dst_w {
                    continue;
                }
                let src = layer.pixel(lx, ly);
                if src[3] == 0 {
                    continue;
                }
                let dst = self.image.get_pixel_mut(dx as u32, dy as u32);
                dst.0 = over_opaque(dst.0, src);
            }
        }
    }

    /// Encode as an RGB PNG.
    pub fn encode_png(&self) -> PosterResult<Vec<u8>> {
        let rgb = image::DynamicImage::ImageRgba8(self.image.clone()).to_rgb8();
        let mut buf = Vec::new();
        rgb.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode poster png")?;
        Ok(buf)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
