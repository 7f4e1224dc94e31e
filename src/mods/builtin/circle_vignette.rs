use crate::foundation::core::Image;
use crate::foundation::error::FramemodResult;
use crate::mods::builtin::shape_vignette::{Shape, vignette};
use crate::mods::descriptor::{ModDescriptor, ParamSpec};
use crate::mods::params::ModParams;
use crate::mods::plugin::{ModPlugin, PluginContext};

/// Catalog entry.
pub fn descriptor() -> ModDescriptor {
    ModDescriptor::new("circle_vignette", "Circle vignette")
        .describe("Round vignette with configurable radius and backdrop opacity.")
        .param(ParamSpec::slider("radius", "Circle radius", 10.0, 500.0, 100.0))
        .param(ParamSpec::slider("opacity", "Backdrop opacity", 0.0, 255.0, 128.0))
}

/// Factory.
pub fn create(_: &PluginContext) -> Box<dyn ModPlugin> {
    Box::new(CircleVignette)
}

/// Circle-only vignette.
#[derive(Clone, Copy, Debug, Default)]
pub struct CircleVignette;

impl ModPlugin for CircleVignette {
    fn apply(&self, image: Image, params: &ModParams) -> FramemodResult<Image> {
        let radius = params.number("radius")?;
        let opacity = params.int("opacity")?.clamp(0, 255) as u8;
        vignette(image, Shape::Circle, radius, opacity)
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/mods/builtin/circle_vignette.rs"]
mod tests;
