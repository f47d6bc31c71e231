use crate::foundation::math::scale_channel;

/// Premultiplied `[r, g, b, a]`.
pub type PremulRgba8 = [u8; 4];

/// Source-over of a premultiplied pixel onto an opaque one; the result stays opaque.
pub fn over_opaque(dst: [u8; 4], src: PremulRgba8) -> [u8; 4] {
    match src[3] {
        0 => dst,
        255 => [src[0], src[1], src[2], 255],
        a => {
            let keep = 255 - a;
            let mix = |i: usize| src[i].saturating_add(scale_channel(dst[i], keep));
            [mix(0), mix(1), mix(2), 255]
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
