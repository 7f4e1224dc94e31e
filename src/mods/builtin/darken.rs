use crate::foundation::core::Image;
use crate::foundation::error::FramemodResult;
use crate::imaging::enhance::brightness;
use crate::mods::descriptor::{ModDescriptor, ParamSpec};
use crate::mods::params::ModParams;
use crate::mods::plugin::{ModPlugin, PluginContext};

/// Catalog entry.
pub fn descriptor() -> ModDescriptor {
    ModDescriptor::new("darken", "Darken")
        .describe("Scale image brightness.")
        .param(ParamSpec::slider("enhance", "Brightness", 0.0, 2.0, 1.0))
}

/// Factory.
pub fn create(_: &PluginContext) -> Box<dyn ModPlugin> {
    Box::new(Darken)
}

/// Multiplies color channels by `enhance`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Darken;

impl ModPlugin for Darken {
    fn apply(&self, image: Image, params: &ModParams) -> FramemodResult<Image> {
        Ok(brightness(image, params.number("enhance")? as f32))
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/mods/builtin/darken.rs"]
mod tests;
