use crate::foundation::core::Image;
use crate::foundation::error::{FramemodError, FramemodResult};
use crate::imaging::composite::blend_over;
use crate::imaging::transform::{Resample, resize};
use crate::mods::descriptor::{ModDescriptor, ParamSpec};
use crate::mods::params::ModParams;
use crate::mods::plugin::{ModPlugin, PluginContext};

/// Catalog entry.
pub fn descriptor() -> ModDescriptor {
    ModDescriptor::new("image_overlay", "Image overlay")
        .describe("Overlay another image with adjustable position and scale.")
        .param(ParamSpec::file("overlay_path", "Overlay image", "image/*"))
        .param(ParamSpec::slider("x", "X", -1.0, 1080.0, -1.0))
        .param(ParamSpec::slider("y", "Y", -1.0, 1080.0, -1.0))
        .param(ParamSpec::slider("scale", "Scale (%)", 10.0, 200.0, 100.0))
}

/// Factory.
pub fn create(_: &PluginContext) -> Box<dyn ModPlugin> {
    Box::new(ImageOverlay)
}

/// Alpha-composites a scaled secondary image; a negative `x`/`y` centers on that axis.
///
/// An unset or unreadable overlay leaves the input untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageOverlay;

impl ModPlugin for ImageOverlay {
    fn apply(&self, image: Image, params: &ModParams) -> FramemodResult<Image> {
        let Some(path) = params.file("overlay_path")? else {
            return Ok(image);
        };
        let overlay = match Image::open(path) {
            Ok(img) => img.into_rgba(),
            Err(e) => {
                let err = FramemodError::overlay_missing(
                    params.mod_name(),
                    path.display().to_string(),
                    format!("{e:#}"),
                );
                tracing::warn!(error = %err, "overlay skipped");
                return Ok(image);
            }
        };

        let scale = params.number("scale")? / 100.0;
        let ow = ((f64::from(overlay.width) * scale) as u32).max(1);
        let oh = ((f64::from(overlay.height) * scale) as u32).max(1);
        let overlay = resize(&overlay, ow, oh, Resample::Lanczos3)?;

        let mut base = image.into_rgb();
        let x = position(params.int("x")?, base.width, ow);
        let y = position(params.int("y")?, base.height, oh);
        blend_over(&mut base, &overlay, x, y)?;
        Ok(base)
    }
}

fn position(requested: i64, base: u32, overlay: u32) -> i64 {
    if requested >= 0 {
        requested
    } else {
        (i64::from(base) - i64::from(overlay)).div_euclid(2)
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/mods/builtin/image_overlay.rs"]
mod tests;
