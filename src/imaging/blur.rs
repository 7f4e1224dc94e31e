use crate::foundation::core::Image;
use crate::foundation::error::{FramemodError, FramemodResult};

const PASSES: usize = 3;

/// Gaussian blur with standard deviation `sigma`, approximated by three successive box blurs.
///
/// All channels (alpha included) are filtered independently; edges are clamped. `sigma == 0`
/// returns the input unchanged.
pub fn gaussian_blur(image: Image, sigma: f32) -> FramemodResult<Image> {
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(FramemodError::validation("blur sigma must be finite and >= 0"));
    }
    if sigma == 0.0 {
        return Ok(image);
    }

    let Image {
        width,
        height,
        model,
        data,
    } = image;
    let channels = model.channels();
    let mut src = data;
    let mut tmp = vec![0u8; src.len()];

    for radius in box_radii(sigma) {
        if radius == 0 {
            continue;
        }
        horizontal_pass(&src, &mut tmp, width, height, channels, radius);
        vertical_pass(&tmp, &mut src, width, height, channels, radius);
    }

    Ok(Image {
        width,
        height,
        model,
        data: src,
    })
}

/// Box radii whose successive application approximates a Gaussian of `sigma`.
fn box_radii(sigma: f32) -> [usize; PASSES] {
    let n = PASSES as f64;
    let s2 = f64::from(sigma) * f64::from(sigma);
    let w_ideal = (12.0 * s2 / n + 1.0).sqrt();
    let mut wl = w_ideal.floor() as i64;
    if wl % 2 == 0 {
        wl -= 1;
    }
    let wl = wl.max(1);
    let wu = wl + 2;
    let wlf = wl as f64;
    let m_ideal = (12.0 * s2 - n * wlf * wlf - 4.0 * n * wlf - 3.0 * n) / (-4.0 * wlf - 4.0);
    let m = m_ideal.round().clamp(0.0, n) as usize;

    let mut out = [0usize; PASSES];
    for (i, r) in out.iter_mut().enumerate() {
        let w = if i < m { wl } else { wu };
        *r = ((w - 1) / 2) as usize;
    }
    out
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, c: usize, radius: usize) {
    let w = width as i64;
    let r = radius as i64;
    let win = (2 * radius + 1) as u32;
    for y in 0..height as usize {
        let row = y * width as usize * c;
        for ch in 0..c {
            let at = |x: i64| u32::from(src[row + (x.clamp(0, w - 1) as usize) * c + ch]);
            let mut acc: u32 = (-r..=r).map(at).sum();
            for x in 0..w {
                dst[row + x as usize * c + ch] = ((acc + win / 2) / win) as u8;
                acc = acc + at(x + r + 1) - at(x - r);
            }
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, c: usize, radius: usize) {
    let h = height as i64;
    let r = radius as i64;
    let stride = width as usize * c;
    let win = (2 * radius + 1) as u32;
    for x in 0..width as usize {
        for ch in 0..c {
            let col = x * c + ch;
            let at = |y: i64| u32::from(src[(y.clamp(0, h - 1) as usize) * stride + col]);
            let mut acc: u32 = (-r..=r).map(at).sum();
            for y in 0..h {
                dst[y as usize * stride + col] = ((acc + win / 2) / win) as u8;
                acc = acc + at(y + r + 1) - at(y - r);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/imaging/blur.rs"]
mod tests;
