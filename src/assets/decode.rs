use anyhow::Context;

use crate::foundation::error::{PosterError, PosterResult};

const MAX_DIM: u32 = 16_384;

/// Decode encoded image bytes (any format the `image` crate recognizes).
pub fn decode_image(bytes: &[u8]) -> PosterResult<image::DynamicImage> {
    let img = image::load_from_memory(bytes).context("decode image from memory")?;
    if img.width() == 0 || img.height() == 0 {
        return Err(PosterError::validation("decoded image is empty"));
    }
    // Avoid pathological allocations further down the pipeline.
    if img.width() > MAX_DIM || img.height() > MAX_DIM {
        return Err(PosterError::validation(format!(
            "image too large: {}x{} (max {MAX_DIM}x{MAX_DIM})",
            img.width(),
            img.height()
        )));
    }
    Ok(img)
}

/// Aspect-preserving crop-and-scale that exactly fills `width x height` (no letterboxing).
pub fn fill_exact(img: &image::DynamicImage, width: u32, height: u32) -> image::RgbaImage {
    img.resize_to_fill(width, height, image::imageops::FilterType::Lanczos3)
        .to_rgba8()
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
