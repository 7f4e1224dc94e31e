use crate::foundation::core::Image;
use crate::foundation::error::FramemodResult;
use crate::imaging::blur::gaussian_blur;
use crate::mods::descriptor::{ModDescriptor, ParamSpec};
use crate::mods::params::ModParams;
use crate::mods::plugin::{ModPlugin, PluginContext};

/// Catalog entry.
pub fn descriptor() -> ModDescriptor {
    ModDescriptor::new("blur", "Blur")
        .describe("Gaussian blur.")
        .param(ParamSpec::slider("radius", "Radius", 0.0, 50.0, 0.0))
}

/// Factory.
pub fn create(_: &PluginContext) -> Box<dyn ModPlugin> {
    Box::new(Blur)
}

/// Gaussian blur with `radius` as the standard deviation; 0 is a no-op.
#[derive(Clone, Copy, Debug, Default)]
pub struct Blur;

impl ModPlugin for Blur {
    fn apply(&self, image: Image, params: &ModParams) -> FramemodResult<Image> {
        gaussian_blur(image, params.number("radius")? as f32)
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/mods/builtin/blur.rs"]
mod tests;
