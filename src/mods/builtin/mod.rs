//! Transforms shipped with the engine.
//!
//! Each module exposes `descriptor()` and `create(&PluginContext)`; [`builtins`] wires them into
//! the registry in catalog order.

/// Gaussian blur.
pub mod blur;
/// Circular vignette.
pub mod circle_vignette;
/// Brightness scaling.
pub mod darken;
/// Image overlay.
pub mod image_overlay;
/// Uniform noise with a regenerate action.
pub mod noise;
/// Rotation with canvas expansion.
pub mod rotate;
/// Shape-masked vignette.
pub mod shape_vignette;
/// Sharpness enhancement.
pub mod sharpness;
/// Text overlay.
pub mod text_overlay;

use crate::mods::registry::BuiltinMod;

/// Every built-in transform.
pub fn builtins() -> Vec<BuiltinMod> {
    vec![
        BuiltinMod {
            descriptor: blur::descriptor(),
            factory: blur::create,
        },
        BuiltinMod {
            descriptor: circle_vignette::descriptor(),
            factory: circle_vignette::create,
        },
        BuiltinMod {
            descriptor: darken::descriptor(),
            factory: darken::create,
        },
        BuiltinMod {
            descriptor: image_overlay::descriptor(),
            factory: image_overlay::create,
        },
        BuiltinMod {
            descriptor: noise::descriptor(),
            factory: noise::create,
        },
        BuiltinMod {
            descriptor: rotate::descriptor(),
            factory: rotate::create,
        },
        BuiltinMod {
            descriptor: shape_vignette::descriptor(),
            factory: shape_vignette::create,
        },
        BuiltinMod {
            descriptor: sharpness::descriptor(),
            factory: sharpness::create,
        },
        BuiltinMod {
            descriptor: text_overlay::descriptor(),
            factory: text_overlay::create,
        },
    ]
}

#[cfg(test)]
#[path = "../../../tests/unit/mods/builtin/mod.rs"]
mod tests;
