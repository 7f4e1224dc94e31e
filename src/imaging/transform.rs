use crate::foundation::core::{Image, MAX_DIM};
use crate::foundation::error::{FramemodError, FramemodResult};

/// Resampling filter for [`resize`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resample {
    /// Windowed sinc, used for display-quality downscales.
    Lanczos3,
    /// Bicubic (Catmull-Rom).
    Bicubic,
}

impl Resample {
    fn filter(self) -> image::imageops::FilterType {
        match self {
            Self::Lanczos3 => image::imageops::FilterType::Lanczos3,
            Self::Bicubic => image::imageops::FilterType::CatmullRom,
        }
    }
}

/// Resize to exactly `width x height`, ignoring aspect ratio. Color model is preserved.
pub fn resize(image: &Image, width: u32, height: u32, filter: Resample) -> FramemodResult<Image> {
    if width == 0 || height == 0 || width > MAX_DIM || height > MAX_DIM {
        return Err(FramemodError::validation(format!(
            "resize target {width}x{height} is out of range"
        )));
    }
    if image.dimensions() == (width, height) {
        return Ok(image.clone());
    }
    let resized = image.to_dynamic()?.resize_exact(width, height, filter.filter());
    Ok(Image::from_dynamic(resized).into_model(image.model))
}

/// Copy the `width x height` region whose top-left corner is `(x, y)`.
///
/// Oversized sources are accepted; only stages that produce final frames enforce [`MAX_DIM`].
pub fn crop(image: &Image, x: u32, y: u32, width: u32, height: u32) -> FramemodResult<Image> {
    let fits = x.checked_add(width).is_some_and(|r| r <= image.width)
        && y.checked_add(height).is_some_and(|b| b <= image.height);
    if width == 0 || height == 0 || !fits {
        return Err(FramemodError::validation(format!(
            "crop {width}x{height}+{x}+{y} is outside a {}x{} image",
            image.width, image.height
        )));
    }
    let c = image.model.channels();
    let stride = image.width as usize * c;
    let row_len = width as usize * c;
    let mut data = Vec::with_capacity(row_len * height as usize);
    for row in y..y + height {
        let start = row as usize * stride + x as usize * c;
        data.extend_from_slice(&image.data[start..start + row_len]);
    }
    Ok(Image {
        width,
        height,
        model: image.model,
        data,
    })
}

/// Rotate counter-clockwise by `angle_deg`, growing the canvas so no corner is cut off.
///
/// Sampling is nearest-neighbour; uncovered pixels are black (transparent for RGBA).
/// Multiples of 90 degrees are exact transposes.
pub fn rotate_expand(image: Image, angle_deg: f64) -> FramemodResult<Image> {
    if !angle_deg.is_finite() {
        return Err(FramemodError::validation("rotation angle must be finite"));
    }
    let angle = angle_deg.rem_euclid(360.0);
    if angle == 0.0 {
        return Ok(image);
    }
    if angle == 90.0 || angle == 180.0 || angle == 270.0 {
        return quarter_turns(image, (angle / 90.0) as u32);
    }

    let theta = angle.to_radians();
    let cos = round15(theta.cos());
    let sin = round15(theta.sin());
    let (w, h) = (f64::from(image.width), f64::from(image.height));

    // Output-to-input mapping about the centers; the forward map of the corners gives the
    // expanded canvas.
    let corners = [(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)];
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (f64::MAX, f64::MIN, f64::MAX, f64::MIN);
    for (x, y) in corners {
        let (dx, dy) = (x - w / 2.0, y - h / 2.0);
        let fx = cos * dx + sin * dy;
        let fy = -sin * dx + cos * dy;
        min_x = min_x.min(fx);
        max_x = max_x.max(fx);
        min_y = min_y.min(fy);
        max_y = max_y.max(fy);
    }
    let nw = (max_x.ceil() - min_x.floor()) as u32;
    let nh = (max_y.ceil() - min_y.floor()) as u32;
    if nw == 0 || nh == 0 || nw > MAX_DIM || nh > MAX_DIM {
        return Err(FramemodError::validation(format!(
            "rotated size {nw}x{nh} is out of range"
        )));
    }

    let c = image.model.channels();
    let mut out = vec![0u8; nw as usize * nh as usize * c];
    let (ncx, ncy) = (f64::from(nw) / 2.0, f64::from(nh) / 2.0);
    let (iw, ih) = (image.width as i64, image.height as i64);
    for oy in 0..nh {
        let dy = f64::from(oy) + 0.5 - ncy;
        for ox in 0..nw {
            let dx = f64::from(ox) + 0.5 - ncx;
            let sx = (cos * dx - sin * dy + w / 2.0).floor() as i64;
            let sy = (sin * dx + cos * dy + h / 2.0).floor() as i64;
            if sx < 0 || sy < 0 || sx >= iw || sy >= ih {
                continue;
            }
            let s = ((sy * iw + sx) as usize) * c;
            let d = (oy as usize * nw as usize + ox as usize) * c;
            out[d..d + c].copy_from_slice(&image.data[s..s + c]);
        }
    }
    Image::new(nw, nh, image.model, out)
}

fn quarter_turns(image: Image, turns: u32) -> FramemodResult<Image> {
    let src = image.to_dynamic()?;
    // The `image` crate turns clockwise.
    let rotated = match turns {
        1 => src.rotate270(),
        2 => src.rotate180(),
        _ => src.rotate90(),
    };
    Ok(Image::from_dynamic(rotated))
}

fn round15(v: f64) -> f64 {
    (v * 1e15).round() / 1e15
}

#[cfg(test)]
#[path = "../../tests/unit/imaging/transform.rs"]
mod tests;
