use std::path::Path;

use anyhow::Context as _;
use serde_json::Value;

use crate::foundation::error::{FramemodError, FramemodResult};
use crate::mods::descriptor::{ModDescriptor, ParamKind, ParamSpec};

/// On-disk preset: a new catalog entry that reuses a built-in transform with its own
/// identity and a narrowed or re-defaulted parameter schema.
///
/// ```json
/// {
///   "base": "blur",
///   "name": "soft_blur",
///   "label": "Soft blur",
///   "params": [{ "name": "radius", "type": "slider", "min": 0, "max": 8, "default": 3 }]
/// }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginManifest {
    /// Built-in transform executed for this entry.
    pub base: String,
    /// Catalog key.
    pub name: String,
    /// Display name; defaults to the base label.
    #[serde(default)]
    pub label: Option<String>,
    /// Description; defaults to the base description.
    #[serde(default)]
    pub description: Option<String>,
    /// Parameter overrides, merged over the base schema by name.
    #[serde(default)]
    pub params: Vec<ParamSpec>,
}

impl PluginManifest {
    /// Parse a manifest from JSON.
    pub fn from_json_str(s: &str) -> FramemodResult<Self> {
        serde_json::from_str(s).map_err(|e| FramemodError::serde(format!("invalid manifest: {e}")))
    }

    /// Read and parse a manifest file.
    pub fn from_path(path: &Path) -> FramemodResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read manifest '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Build the entry's descriptor by merging this manifest over `base`.
    ///
    /// Every overridden parameter must exist on the base with the same kind, and dropdown
    /// overrides may only offer a subset of the base options.
    pub fn resolve(&self, base: &ModDescriptor) -> Result<ModDescriptor, String> {
        let mut params = base.params.clone();
        for ov in &self.params {
            let slot = params
                .iter_mut()
                .find(|p| p.name == ov.name)
                .ok_or_else(|| {
                    format!("parameter '{}' does not exist on base '{}'", ov.name, base.name)
                })?;
            if slot.kind.type_name() != ov.kind.type_name() {
                return Err(format!(
                    "parameter '{}' is a {} on base '{}', not a {}",
                    ov.name,
                    slot.kind.type_name(),
                    base.name,
                    ov.kind.type_name()
                ));
            }
            if let (
                ParamKind::Dropdown { options: base_opts },
                ParamKind::Dropdown { options: ov_opts },
            ) = (&slot.kind, &ov.kind)
                && let Some(extra) = ov_opts
                    .iter()
                    .find(|o| !base_opts.iter().any(|b| b.value == o.value))
            {
                return Err(format!(
                    "dropdown '{}' offers '{}', which base '{}' does not handle",
                    ov.name, extra.value, base.name
                ));
            }
            let mut merged = ov.clone();
            if merged.label.is_empty() {
                merged.label = slot.label.clone();
            }
            if merged.default.is_none() {
                merged.default = inherited_default(slot, &merged.kind);
            }
            *slot = merged;
        }

        let descriptor = ModDescriptor {
            name: self.name.clone(),
            label: self.label.clone().unwrap_or_else(|| base.label.clone()),
            description: self.description.clone().or_else(|| base.description.clone()),
            params,
        };
        descriptor.validate()?;
        Ok(descriptor)
    }
}

/// The base default carried over to an override that does not restate one: clamped into a
/// narrowed slider range, dropped when a narrowed dropdown no longer offers it.
fn inherited_default(base: &ParamSpec, kind: &ParamKind) -> Option<Value> {
    let default = base.default.clone()?;
    match kind {
        ParamKind::Slider { min, max, .. } => {
            let n = default.as_f64()?;
            Some(Value::from(n.max(*min).min(*max)))
        }
        ParamKind::Dropdown { options } => {
            let v = default.as_str()?;
            options.iter().any(|o| o.value == v).then_some(default)
        }
        _ => Some(default),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mods/manifest.rs"]
mod tests;
