use crate::foundation::core::Image;
use crate::foundation::error::FramemodResult;
use crate::imaging::transform::rotate_expand;
use crate::mods::descriptor::{ModDescriptor, ParamSpec};
use crate::mods::params::ModParams;
use crate::mods::plugin::{ModPlugin, PluginContext};

/// Catalog entry.
pub fn descriptor() -> ModDescriptor {
    ModDescriptor::new("rotate", "Rotate")
        .describe("Rotate counter-clockwise, growing the canvas to keep the corners.")
        .param(ParamSpec::slider("angle", "Angle (deg)", -180.0, 180.0, 0.0))
}

/// Factory.
pub fn create(_: &PluginContext) -> Box<dyn ModPlugin> {
    Box::new(Rotate)
}

/// Expanding rotation.
#[derive(Clone, Copy, Debug, Default)]
pub struct Rotate;

impl ModPlugin for Rotate {
    fn apply(&self, image: Image, params: &ModParams) -> FramemodResult<Image> {
        rotate_expand(image, params.number("angle")?)
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/mods/builtin/rotate.rs"]
mod tests;
