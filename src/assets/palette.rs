//! Deterministic median-cut palette extraction.

use crate::foundation::core::Rgb8;

/// Longest side the cover is reduced to before quantizing.
const SAMPLE_DIM: u32 = 64;

/// One palette entry and the number of sampled pixels it represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Swatch {
    pub color: Rgb8,
    pub population: usize,
}

/// Representative colors of an image, most populous first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Palette {
    pub swatches: Vec<Swatch>,
}

impl Palette {
    /// Most populous color, if the source had any visible pixels.
    pub fn dominant(&self) -> Option<Rgb8> {
        self.swatches.first().map(|s| s.color)
    }

    pub fn colors(&self) -> impl ExactSizeIterator<Item = Rgb8> + '_ {
        self.swatches.iter().map(|s| s.color)
    }
}

/// Extract up to `count` colors; when the image has fewer distinct clusters the last swatch is
/// repeated so callers always get `count` entries for a non-empty image.
pub fn extract_palette(img: &image::RgbaImage, count: usize) -> Palette {
    if count == 0 || img.width() == 0 || img.height() == 0 {
        return Palette::default();
    }

    let sample = downsample(img);
    let pixels: Vec<[u8; 3]> = sample
        .pixels()
        .filter(|p| p[3] >= 128)
        .map(|p| [p[0], p[1], p[2]])
        .collect();
    if pixels.is_empty() {
        return Palette::default();
    }

    let mut boxes = vec![ColorBox::new(pixels)];
    while boxes.len() < count {
        let Some(idx) = next_split(&boxes) else {
            break;
        };
        let (a, b) = boxes.swap_remove(idx).split();
        boxes.push(a);
        boxes.push(b);
    }

    let mut swatches: Vec<Swatch> = boxes
        .iter()
        .map(|b| Swatch {
            color: b.average(),
            population: b.pixels.len(),
        })
        .collect();
    swatches.sort_by(|a, b| {
        b.population
            .cmp(&a.population)
            .then_with(|| (a.color.r, a.color.g, a.color.b).cmp(&(b.color.r, b.color.g, b.color.b)))
    });
    if let Some(&last) = swatches.last() {
        swatches.resize(count, last);
    }
    Palette { swatches }
}

fn downsample(img: &image::RgbaImage) -> image::RgbaImage {
    let (w, h) = img.dimensions();
    if w <= SAMPLE_DIM && h <= SAMPLE_DIM {
        return img.clone();
    }
    let scale = f64::from(SAMPLE_DIM) / f64::from(w.max(h));
    let sw = ((f64::from(w) * scale).round() as u32).max(1);
    let sh = ((f64::from(h) * scale).round() as u32).max(1);
    image::imageops::resize(img, sw, sh, image::imageops::FilterType::Triangle)
}

/// Largest splittable box; ties go to the earliest box so the result never depends on hashing.
fn next_split(boxes: &[ColorBox]) -> Option<usize> {
    boxes
        .iter()
        .enumerate()
        .filter(|(_, b)| b.pixels.len() > 1 && b.widest_channel().1 > 0)
        .max_by(|(ia, a), (ib, b)| {
            a.pixels
                .len()
                .cmp(&b.pixels.len())
                .then_with(|| ib.cmp(ia))
        })
        .map(|(i, _)| i)
}

struct ColorBox {
    pixels: Vec<[u8; 3]>,
}

impl ColorBox {
    fn new(pixels: Vec<[u8; 3]>) -> Self {
        Self { pixels }
    }

    /// `(channel, range)` of the channel with the widest spread.
    fn widest_channel(&self) -> (usize, u8) {
        let mut best = (0usize, 0u8);
        for c in 0..3 {
            let (lo, hi) = self
                .pixels
                .iter()
                .fold((u8::MAX, u8::MIN), |(lo, hi), p| (lo.min(p[c]), hi.max(p[c])));
            let range = hi.saturating_sub(lo);
            if range > best.1 {
                best = (c, range);
            }
        }
        best
    }

    fn split(mut self) -> (ColorBox, ColorBox) {
        let (c, _) = self.widest_channel();
        self.pixels.sort_unstable_by_key(|p| (p[c], p[0], p[1], p[2]));
        // Cut at the median value rather than the median index so equal colors stay together.
        let pivot = self.pixels[self.pixels.len() / 2][c];
        let mut cut = self.pixels.partition_point(|p| p[c] < pivot);
        if cut == 0 {
            cut = self.pixels.partition_point(|p| p[c] <= pivot);
        }
        let upper = self.pixels.split_off(cut);
        (self, ColorBox::new(upper))
    }

    fn average(&self) -> Rgb8 {
        let n = self.pixels.len().max(1) as u64;
        let mut sum = [0u64; 3];
        for p in &self.pixels {
            for c in 0..3 {
                sum[c] += u64::from(p[c]);
            }
        }
        let avg = |c: usize| ((sum[c] + n / 2) / n) as u8;
        Rgb8::new(avg(0), avg(1), avg(2))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/palette.rs"]
mod tests;
