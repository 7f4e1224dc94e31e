use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::foundation::core::Image;
use crate::foundation::error::{FramemodError, FramemodResult};
use crate::imaging::text::{FontChoice, TextSpec, draw_text};
use crate::mods::descriptor::{ModDescriptor, ParamSpec};
use crate::mods::params::ModParams;
use crate::mods::plugin::{ModPlugin, PluginContext};

/// Catalog entry.
pub fn descriptor() -> ModDescriptor {
    ModDescriptor::new("text_overlay", "Text overlay")
        .describe("Draw text with adjustable font, color, position and scale.")
        .param(ParamSpec::text("text", "Text", "Your text here"))
        .param(ParamSpec::slider("font_size", "Font size", 10.0, 130.0, 70.0))
        .param(ParamSpec::color("color", "Color", "#FFFFFF"))
        .param(ParamSpec::file(
            "font_path",
            "Font file",
            ".ttf, .otf, .woff, .woff2",
        ))
        .param(ParamSpec::slider("x", "X", -1.0, 1080.0, -1.0))
        .param(ParamSpec::slider("y", "Y", -1.0, 1080.0, -1.0))
        .param(ParamSpec::slider("scale", "Scale (%)", 10.0, 200.0, 100.0))
}

/// Factory.
pub fn create(ctx: &PluginContext) -> Box<dyn ModPlugin> {
    Box::new(TextOverlay::new(ctx.fallback_font.clone()))
}

/// Draws `text` at `font_size * scale / 100` px, centered on any axis whose coordinate is
/// negative.
///
/// A `font_path` that cannot be loaded falls back to the configured fallback font, then to
/// the system sans-serif family.
#[derive(Debug, Default)]
pub struct TextOverlay {
    fallback_path: Option<PathBuf>,
    fallback: OnceLock<FontChoice>,
}

impl TextOverlay {
    /// Overlay using `fallback_path` when no usable font is given.
    pub fn new(fallback_path: Option<PathBuf>) -> Self {
        Self {
            fallback_path,
            fallback: OnceLock::new(),
        }
    }

    fn fallback_font(&self, mod_name: &str) -> &FontChoice {
        self.fallback.get_or_init(|| match &self.fallback_path {
            Some(path) => load_font(mod_name, path).unwrap_or_else(FontChoice::system),
            None => FontChoice::system(),
        })
    }

    fn font_for(&self, mod_name: &str, requested: Option<&Path>) -> FontChoice {
        requested
            .and_then(|path| load_font(mod_name, path))
            .unwrap_or_else(|| self.fallback_font(mod_name).clone())
    }
}

fn load_font(mod_name: &str, path: &Path) -> Option<FontChoice> {
    match FontChoice::from_file(path) {
        Ok(font) => Some(font),
        Err(e) => {
            let err = FramemodError::overlay_missing(
                mod_name,
                path.display().to_string(),
                format!("{e:#}"),
            );
            tracing::warn!(error = %err, "font unavailable; using fallback");
            None
        }
    }
}

impl ModPlugin for TextOverlay {
    fn apply(&self, image: Image, params: &ModParams) -> FramemodResult<Image> {
        let text = params.text("text")?;
        if text.is_empty() {
            return Ok(image);
        }
        let size = (params.number("font_size")? * params.number("scale")? / 100.0).trunc();
        let font = self.font_for(params.mod_name(), params.file("font_path")?);
        let axis = |v: i64| (v >= 0).then_some(v as f64);
        let spec = TextSpec {
            text,
            size_px: size.max(1.0) as f32,
            rgb: params.color("color")?,
            x: axis(params.int("x")?),
            y: axis(params.int("y")?),
        };
        draw_text(image, &spec, &font)
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/mods/builtin/text_overlay.rs"]
mod tests;
