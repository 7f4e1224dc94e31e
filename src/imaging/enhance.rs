use crate::foundation::core::{ColorModel, Image};
use crate::foundation::math::{clamp_u8, lerp_u8};

/// Scale color channels by `factor` (black at 0, identity at 1), clamped to `0..=255`.
/// Alpha is left untouched.
pub fn brightness(mut image: Image, factor: f32) -> Image {
    if factor == 1.0 {
        return image;
    }
    let c = image.model.channels();
    let color = color_channels(image.model);
    for px in image.data.chunks_exact_mut(c) {
        for v in &mut px[..color] {
            *v = clamp_u8(f32::from(*v) * factor);
        }
    }
    image
}

/// Sharpness enhancement: blend between a smoothed copy (`factor = 0`) and the original
/// (`factor = 1`); factors above 1 extrapolate away from the smoothed copy.
///
/// The smoothing kernel is the 3x3 `[1 1 1; 1 5 1; 1 1 1] / 13`. Border pixels have no full
/// neighbourhood and are passed through unchanged.
pub fn sharpness(image: Image, factor: f32) -> Image {
    if factor == 1.0 || image.width < 3 || image.height < 3 {
        return image;
    }
    let smoothed = smooth(&image);
    let c = image.model.channels();
    let color = color_channels(image.model);
    let mut out = image;
    for (px, sm) in out.data.chunks_exact_mut(c).zip(smoothed.chunks_exact(c)) {
        for i in 0..color {
            px[i] = lerp_u8(sm[i], px[i], factor);
        }
    }
    out
}

fn smooth(image: &Image) -> Vec<u8> {
    let (w, h) = (image.width as usize, image.height as usize);
    let c = image.model.channels();
    let src = &image.data;
    let mut out = src.clone();
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            for ch in 0..c {
                let mut acc = 0u32;
                for dy in 0..3 {
                    for dx in 0..3 {
                        let weight = if dx == 1 && dy == 1 { 5 } else { 1 };
                        let idx = ((y + dy - 1) * w + (x + dx - 1)) * c + ch;
                        acc += weight * u32::from(src[idx]);
                    }
                }
                out[(y * w + x) * c + ch] = ((acc + 6) / 13).min(255) as u8;
            }
        }
    }
    out
}

fn color_channels(model: ColorModel) -> usize {
    match model {
        ColorModel::Gray => 1,
        ColorModel::Rgb | ColorModel::Rgba => 3,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/imaging/enhance.rs"]
mod tests;
