use std::borrow::Cow;

use crate::foundation::config::EngineConfig;
use crate::foundation::core::{ColorModel, Image};
use crate::foundation::error::FramemodResult;
use crate::imaging::blur::gaussian_blur;
use crate::imaging::composite::paste;
use crate::imaging::enhance::brightness;
use crate::imaging::transform::{Resample, resize};
use crate::style::canvas::{BackgroundStyle, CanvasSpec, Platform};
use crate::style::layout::contain_fit;

/// Builds the final canvas: background per style, then the contain-fit source on top.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Compositor {
    /// Gaussian radius of the blurred backdrop.
    pub blur_radius: f32,
    /// Brightness factor of the blurred backdrop.
    pub brightness: f32,
}

impl Default for Compositor {
    fn default() -> Self {
        Self {
            blur_radius: 10.0,
            brightness: 0.7,
        }
    }
}

impl Compositor {
    /// Backdrop settings from `config`.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            blur_radius: config.backdrop_blur_radius,
            brightness: config.backdrop_brightness,
        }
    }

    /// Compose from raw tags. Unknown platforms fall back to the square canvas and unknown
    /// styles to plain black.
    pub fn compose_tags(
        &self,
        image: &Image,
        platform: &str,
        style: &str,
    ) -> FramemodResult<Image> {
        let canvas = CanvasSpec::new(
            Platform::from_tag(platform),
            BackgroundStyle::from_tag(style),
        );
        self.compose(image, canvas)
    }

    /// Return an RGB image of exactly `canvas.width x canvas.height`.
    #[tracing::instrument(skip(self, image), fields(src_w = image.width, src_h = image.height))]
    pub fn compose(&self, image: &Image, canvas: CanvasSpec) -> FramemodResult<Image> {
        let src: Cow<'_, Image> = if image.model == ColorModel::Rgb {
            Cow::Borrowed(image)
        } else {
            Cow::Owned(image.clone().into_rgb())
        };
        let (cw, ch) = (canvas.width, canvas.height);

        let mut out = match canvas.style {
            BackgroundStyle::PlainBlack => Image::solid_rgb(cw, ch, [0, 0, 0])?,
            BackgroundStyle::BlurredBackdrop => {
                let stretched = resize(&src, cw, ch, Resample::Lanczos3)?;
                brightness(gaussian_blur(stretched, self.blur_radius)?, self.brightness)
            }
            BackgroundStyle::DominantColorFrame => {
                Image::solid_rgb(cw, ch, dominant_color(&src))?
            }
        };

        let fit = contain_fit(src.dimensions(), (cw, ch));
        tracing::debug!(?fit, style = %canvas.style, "contain-fit");
        let fg = resize(&src, fit.width, fit.height, Resample::Lanczos3)?;
        paste(&mut out, &fg, i64::from(fit.offset_x), i64::from(fit.offset_y));
        Ok(out)
    }
}

/// Representative color of `image`: the area mean of its color channels (a 1x1 box downsample).
pub fn dominant_color(image: &Image) -> [u8; 3] {
    let c = image.model.channels();
    let n = image.pixel_count() as u64;
    if n == 0 {
        return [0, 0, 0];
    }
    let mut sums = [0u64; 3];
    for px in image.data.chunks_exact(c) {
        match image.model {
            ColorModel::Gray => {
                for s in &mut sums {
                    *s += u64::from(px[0]);
                }
            }
            ColorModel::Rgb | ColorModel::Rgba => {
                for (s, v) in sums.iter_mut().zip(px) {
                    *s += u64::from(*v);
                }
            }
        }
    }
    sums.map(|s| ((s + n / 2) / n) as u8)
}

#[cfg(test)]
#[path = "../../tests/unit/style/compositor.rs"]
mod tests;
