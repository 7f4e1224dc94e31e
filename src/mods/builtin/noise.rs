use rand::Rng as _;

use crate::foundation::core::Image;
use crate::foundation::error::FramemodResult;
use crate::mods::descriptor::{ModDescriptor, ParamSpec};
use crate::mods::params::ModParams;
use crate::mods::plugin::{ActionResult, ModPlugin, PluginContext};

/// Action that suggests a fresh random intensity.
pub const REGENERATE_ACTION: &str = "regenerate_noise";

/// Catalog entry.
pub fn descriptor() -> ModDescriptor {
    ModDescriptor::new("noise", "Noise")
        .describe("Add uniform per-channel noise of the given intensity.")
        .param(ParamSpec::slider("intensity", "Intensity", 0.0, 100.0, 0.0))
        .param(ParamSpec::button(
            REGENERATE_ACTION,
            "Regenerate noise",
            Some("fa-refresh"),
        ))
}

/// Factory.
pub fn create(_: &PluginContext) -> Box<dyn ModPlugin> {
    Box::new(Noise)
}

/// Adds an independent offset in `[-k, k]` to each of R, G and B, where
/// `k = trunc(intensity / 100 * 64)`. Output is RGB.
#[derive(Clone, Copy, Debug, Default)]
pub struct Noise;

impl ModPlugin for Noise {
    fn apply(&self, image: Image, params: &ModParams) -> FramemodResult<Image> {
        let mut image = image.into_rgb();
        let k = (params.number("intensity")? / 100.0 * 64.0).trunc() as i16;
        if k <= 0 {
            return Ok(image);
        }
        let mut rng = rand::thread_rng();
        for v in &mut image.data {
            let offset = rng.gen_range(-k..=k);
            *v = (i16::from(*v) + offset).clamp(0, 255) as u8;
        }
        Ok(image)
    }

    fn on_action(&self, action: &str, _params: &ModParams) -> Option<ActionResult> {
        if action != REGENERATE_ACTION {
            return Some(ActionResult::Message(format!("Action '{action}' acknowledged")));
        }
        let intensity: u32 = rand::thread_rng().gen_range(10..=80);
        Some(ActionResult::Update {
            message: format!("New noise generated with intensity {intensity}"),
            new_value: serde_json::Value::from(intensity),
            update_param: "intensity".to_string(),
        })
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/mods/builtin/noise.rs"]
mod tests;
