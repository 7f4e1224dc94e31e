use crate::foundation::config::{EngineConfig, UndersizedPolicy};
use crate::foundation::core::Image;
use crate::foundation::error::{FramemodError, FramemodResult};
use crate::imaging::transform::{Resample, crop, resize};
use crate::style::layout::cover_crop;

/// Center-crops sources to a square and resizes them to the working resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Normalizer {
    /// Edge of the square working frame.
    pub working_size: u32,
    /// Minimum accepted source height.
    pub min_source_height: u32,
    /// What to do below `min_source_height`.
    pub policy: UndersizedPolicy,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl Normalizer {
    /// Settings from `config`.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            working_size: config.working_size,
            min_source_height: config.min_source_height,
            policy: config.undersized,
        }
    }

    /// Cover-fit `image` into a `working_size` square.
    #[tracing::instrument(skip(self, image), fields(src_w = image.width, src_h = image.height))]
    pub fn normalize(&self, image: Image) -> FramemodResult<Image> {
        if image.height < self.min_source_height {
            match self.policy {
                UndersizedPolicy::Reject => {
                    return Err(FramemodError::ImageTooSmall {
                        height: image.height,
                        min_height: self.min_source_height,
                    });
                }
                UndersizedPolicy::Upscale => tracing::info!(
                    height = image.height,
                    min_height = self.min_source_height,
                    "upscaling undersized source"
                ),
            }
        }

        let image = image.into_rgb();
        let side = self.working_size;
        let rect = cover_crop(image.dimensions(), (side, side));
        if (rect.width, rect.height) == image.dimensions() {
            return resize(&image, side, side, Resample::Bicubic);
        }
        let square = crop(&image, rect.x, rect.y, rect.width, rect.height)?;
        resize(&square, side, side, Resample::Bicubic)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/normalize.rs"]
mod tests;
