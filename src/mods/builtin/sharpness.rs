use crate::foundation::core::Image;
use crate::foundation::error::FramemodResult;
use crate::imaging::enhance::sharpness;
use crate::mods::descriptor::{ModDescriptor, ParamSpec};
use crate::mods::params::ModParams;
use crate::mods::plugin::{ModPlugin, PluginContext};

/// Catalog entry.
pub fn descriptor() -> ModDescriptor {
    ModDescriptor::new("sharpness", "Sharpness")
        .describe("Adjust image sharpness.")
        .param(ParamSpec::slider("amount", "Amount", 0.0, 300.0, 100.0))
}

/// Factory.
pub fn create(_: &PluginContext) -> Box<dyn ModPlugin> {
    Box::new(Sharpness)
}

/// `amount` percent sharpening; 100 is the identity, 0 the smoothed image.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sharpness;

impl ModPlugin for Sharpness {
    fn apply(&self, image: Image, params: &ModParams) -> FramemodResult<Image> {
        let factor = params.number("amount")? / 100.0;
        Ok(sharpness(image.into_rgb(), factor as f32))
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/mods/builtin/sharpness.rs"]
mod tests;
