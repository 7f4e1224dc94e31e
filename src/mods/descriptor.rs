use std::collections::HashSet;

use serde_json::Value;

use crate::mods::params::{coerce_value, parse_hex_color};

/// One entry of a dropdown parameter.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DropdownOption {
    /// Display text.
    pub label: String,
    /// Value passed to the transform.
    pub value: String,
}

impl DropdownOption {
    /// Option whose label and value differ.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Kind of a parameter plus its kind-specific constraints.
///
/// Serialized with a `type` tag to match the catalog wire shape
/// (`{"name": "radius", "type": "slider", "min": 0, ...}`).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParamKind {
    /// Numeric value clamped to `[min, max]`.
    Slider {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
        /// UI step hint.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        step: Option<f64>,
    },
    /// Free text.
    Text,
    /// `#RRGGBB` color.
    Color,
    /// Path to a file the caller uploaded.
    File {
        /// Accept pattern for the UI file picker (e.g. `image/*`).
        #[serde(default)]
        accept: String,
    },
    /// One of a fixed set of string values.
    Dropdown {
        /// Allowed values.
        options: Vec<DropdownOption>,
    },
    /// UI button that triggers a plugin action; carries no value.
    Button {
        /// Icon hint.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
    },
}

impl ParamKind {
    /// Wire name of the kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Slider { .. } => "slider",
            Self::Text => "text",
            Self::Color => "color",
            Self::File { .. } => "file",
            Self::Dropdown { .. } => "dropdown",
            Self::Button { .. } => "button",
        }
    }
}

/// Declarative description of one parameter.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParamSpec {
    /// Key in invocation parameter maps.
    pub name: String,
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Kind and constraints.
    #[serde(flatten)]
    pub kind: ParamKind,
    /// Value used when an invocation omits the parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl ParamSpec {
    /// Numeric slider.
    pub fn slider(name: &str, label: &str, min: f64, max: f64, default: f64) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: ParamKind::Slider {
                min,
                max,
                step: None,
            },
            default: Some(Value::from(default)),
        }
    }

    /// Free text field.
    pub fn text(name: &str, label: &str, default: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: ParamKind::Text,
            default: Some(Value::from(default)),
        }
    }

    /// Color picker.
    pub fn color(name: &str, label: &str, default: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: ParamKind::Color,
            default: Some(Value::from(default)),
        }
    }

    /// File upload with no default.
    pub fn file(name: &str, label: &str, accept: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: ParamKind::File {
                accept: accept.to_string(),
            },
            default: None,
        }
    }

    /// Dropdown over `(label, value)` pairs.
    pub fn dropdown(name: &str, label: &str, options: &[(&str, &str)], default: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: ParamKind::Dropdown {
                options: options
                    .iter()
                    .map(|(l, v)| DropdownOption::new(*l, *v))
                    .collect(),
            },
            default: Some(Value::from(default)),
        }
    }

    /// Action button.
    pub fn button(name: &str, label: &str, icon: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: ParamKind::Button {
                icon: icon.map(str::to_string),
            },
            default: None,
        }
    }

    /// Check the spec's own invariants (bounds, default in range / in options).
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("parameter name must be non-empty".to_string());
        }
        match &self.kind {
            ParamKind::Slider { min, max, step } => {
                if !min.is_finite() || !max.is_finite() || min > max {
                    return Err(format!(
                        "slider '{}' needs finite min <= max (got {min}..{max})",
                        self.name
                    ));
                }
                if let Some(step) = step
                    && !(step.is_finite() && *step > 0.0)
                {
                    return Err(format!("slider '{}' step must be > 0", self.name));
                }
                if let Some(d) = &self.default {
                    let d = d
                        .as_f64()
                        .ok_or_else(|| format!("slider '{}' default must be a number", self.name))?;
                    if d < *min || d > *max {
                        return Err(format!(
                            "slider '{}' default {d} lies outside [{min}, {max}]",
                            self.name
                        ));
                    }
                }
            }
            ParamKind::Dropdown { options } => {
                if options.is_empty() {
                    return Err(format!("dropdown '{}' has no options", self.name));
                }
                if let Some(d) = &self.default {
                    let d = d.as_str().unwrap_or_default();
                    if !options.iter().any(|o| o.value == d) {
                        return Err(format!(
                            "dropdown '{}' default '{d}' is not one of its options",
                            self.name
                        ));
                    }
                }
            }
            ParamKind::Color => {
                if let Some(d) = &self.default
                    && d.as_str().and_then(parse_hex_color).is_none()
                {
                    return Err(format!("color '{}' default is not a hex color", self.name));
                }
            }
            ParamKind::Text | ParamKind::File { .. } => {
                if let Some(d) = &self.default {
                    coerce_value("<descriptor>", self, d).map_err(|e| e.to_string())?;
                }
            }
            ParamKind::Button { .. } => {}
        }
        Ok(())
    }
}

/// Declarative metadata of a mod: identity plus ordered parameter schema.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ModDescriptor {
    /// Unique, stable key.
    pub name: String,
    /// Display name.
    pub label: String,
    /// Optional longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parameter schema in display order.
    #[serde(default)]
    pub params: Vec<ParamSpec>,
}

impl ModDescriptor {
    /// Descriptor with no parameters.
    pub fn new(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            description: None,
            params: Vec::new(),
        }
    }

    /// Set the description.
    pub fn describe(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Append a parameter.
    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    /// Look up a parameter spec by name.
    pub fn param_spec(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Check name syntax, parameter-name uniqueness and every parameter's invariants.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.is_empty()
            || !self
                .name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(format!(
                "mod name '{}' must be non-empty and use only [A-Za-z0-9_-]",
                self.name
            ));
        }
        let mut seen = HashSet::new();
        for p in &self.params {
            if !seen.insert(p.name.as_str()) {
                return Err(format!("duplicate parameter '{}'", p.name));
            }
            p.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mods/descriptor.rs"]
mod tests;
