use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{FramemodError, FramemodResult};

/// Largest edge length any stage is allowed to produce.
pub const MAX_DIM: u32 = 16_384;

/// Pixel layout of an [`Image`] buffer. All models are 8 bits per channel.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ColorModel {
    /// Single luminance channel.
    Gray,
    /// Red, green, blue.
    Rgb,
    /// Red, green, blue, straight (non-premultiplied) alpha.
    Rgba,
}

impl ColorModel {
    /// Bytes per pixel.
    pub fn channels(self) -> usize {
        match self {
            Self::Gray => 1,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// Whether the model carries an alpha channel.
    pub fn has_alpha(self) -> bool {
        matches!(self, Self::Rgba)
    }
}

/// Owned raster image: row-major, tightly packed, 8 bits per channel.
///
/// Fields are public so plugins can build buffers directly; [`Image::validate`] is what the
/// pipeline uses to reject inconsistent results.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Channel layout of `data`.
    pub model: ColorModel,
    /// Pixel bytes.
    pub data: Vec<u8>,
}

impl Image {
    /// Wrap an existing buffer, checking that its length matches the dimensions.
    pub fn new(width: u32, height: u32, model: ColorModel, data: Vec<u8>) -> FramemodResult<Self> {
        let img = Self {
            width,
            height,
            model,
            data,
        };
        img.validate().map_err(FramemodError::validation)?;
        Ok(img)
    }

    /// Image where every pixel equals `px` (`px.len()` must match the model's channel count).
    pub fn filled(width: u32, height: u32, model: ColorModel, px: &[u8]) -> FramemodResult<Self> {
        if px.len() != model.channels() {
            return Err(FramemodError::validation(format!(
                "fill pixel has {} channels, {:?} needs {}",
                px.len(),
                model,
                model.channels()
            )));
        }
        let len = byte_len(width, height, model).map_err(FramemodError::validation)?;
        let data = px.repeat(len / model.channels().max(1));
        Self::new(width, height, model, data)
    }

    /// Opaque RGB image filled with one color.
    pub fn solid_rgb(width: u32, height: u32, rgb: [u8; 3]) -> FramemodResult<Self> {
        Self::filled(width, height, ColorModel::Rgb, &rgb)
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Borrow the bytes of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let c = self.model.channels();
        let idx = (y as usize * self.width as usize + x as usize) * c;
        &self.data[idx..idx + c]
    }

    /// Check structural consistency: non-zero bounded dimensions and a matching buffer length.
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!(
                "image dimensions must be non-zero (got {}x{})",
                self.width, self.height
            ));
        }
        if self.width > MAX_DIM || self.height > MAX_DIM {
            return Err(format!(
                "image dimensions {}x{} exceed {MAX_DIM}x{MAX_DIM}",
                self.width, self.height
            ));
        }
        let expected = byte_len(self.width, self.height, self.model)?;
        if self.data.len() != expected {
            return Err(format!(
                "buffer holds {} bytes, {}x{} {:?} needs {}",
                self.data.len(),
                self.width,
                self.height,
                self.model,
                expected
            ));
        }
        Ok(())
    }

    /// Convert to RGB. Alpha is dropped without flattening, gray is replicated.
    pub fn into_rgb(self) -> Self {
        let data = match self.model {
            ColorModel::Rgb => return self,
            ColorModel::Gray => self.data.iter().flat_map(|&v| [v, v, v]).collect(),
            ColorModel::Rgba => self
                .data
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect(),
        };
        Self {
            width: self.width,
            height: self.height,
            model: ColorModel::Rgb,
            data,
        }
    }

    /// Convert to RGBA with opaque alpha where the source had none.
    pub fn into_rgba(self) -> Self {
        let data = match self.model {
            ColorModel::Rgba => return self,
            ColorModel::Gray => self.data.iter().flat_map(|&v| [v, v, v, 255]).collect(),
            ColorModel::Rgb => self
                .data
                .chunks_exact(3)
                .flat_map(|px| [px[0], px[1], px[2], 255])
                .collect(),
        };
        Self {
            width: self.width,
            height: self.height,
            model: ColorModel::Rgba,
            data,
        }
    }

    /// Convert to the given color model.
    pub fn into_model(self, model: ColorModel) -> Self {
        match model {
            ColorModel::Rgb => self.into_rgb(),
            ColorModel::Rgba => self.into_rgba(),
            ColorModel::Gray => {
                if self.model == ColorModel::Gray {
                    return self;
                }
                let c = self.model.channels();
                // ITU-R 601-2 luma, as used by most 8-bit "L" conversions.
                let data = self
                    .data
                    .chunks_exact(c)
                    .map(|px| {
                        let l = (299 * u32::from(px[0])
                            + 587 * u32::from(px[1])
                            + 114 * u32::from(px[2])
                            + 500)
                            / 1000;
                        l.min(255) as u8
                    })
                    .collect();
                Self {
                    width: self.width,
                    height: self.height,
                    model: ColorModel::Gray,
                    data,
                }
            }
        }
    }

    /// Build from a decoded `image` crate buffer, narrowing anything exotic to RGB(A)8.
    pub fn from_dynamic(img: image::DynamicImage) -> Self {
        let (width, height) = (img.width(), img.height());
        let (model, data) = match img {
            image::DynamicImage::ImageLuma8(buf) => (ColorModel::Gray, buf.into_raw()),
            image::DynamicImage::ImageRgb8(buf) => (ColorModel::Rgb, buf.into_raw()),
            image::DynamicImage::ImageRgba8(buf) => (ColorModel::Rgba, buf.into_raw()),
            other if other.color().has_alpha() => (ColorModel::Rgba, other.to_rgba8().into_raw()),
            other => (ColorModel::Rgb, other.to_rgb8().into_raw()),
        };
        Self {
            width,
            height,
            model,
            data,
        }
    }

    /// Copy into an `image` crate buffer for resampling and encoding.
    pub fn to_dynamic(&self) -> FramemodResult<image::DynamicImage> {
        let (w, h) = (self.width, self.height);
        let data = self.data.clone();
        let img = match self.model {
            ColorModel::Gray => image::GrayImage::from_raw(w, h, data).map(image::DynamicImage::from),
            ColorModel::Rgb => image::RgbImage::from_raw(w, h, data).map(image::DynamicImage::from),
            ColorModel::Rgba => {
                image::RgbaImage::from_raw(w, h, data).map(image::DynamicImage::from)
            }
        };
        img.ok_or_else(|| FramemodError::validation("image buffer does not match its dimensions"))
    }

    /// Decode an image file from disk.
    pub fn open(path: &Path) -> FramemodResult<Self> {
        let img = image::open(path).with_context(|| format!("open image '{}'", path.display()))?;
        Ok(Self::from_dynamic(img))
    }

    /// Decode encoded image bytes.
    pub fn decode(bytes: &[u8]) -> FramemodResult<Self> {
        let img = image::load_from_memory(bytes).context("decode image from memory")?;
        Ok(Self::from_dynamic(img))
    }

    /// Encode as PNG at `path`, creating parent directories.
    pub fn save_png(&self, path: &Path) -> FramemodResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        self.to_dynamic()?
            .save_with_format(path, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

fn byte_len(width: u32, height: u32, model: ColorModel) -> Result<usize, String> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(model.channels()))
        .ok_or_else(|| "image buffer size overflow".to_string())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
