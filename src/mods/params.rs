use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::foundation::error::{FramemodError, FramemodResult};
use crate::mods::descriptor::{ModDescriptor, ParamKind, ParamSpec};

/// Raw, caller-supplied parameter map of one invocation.
pub type RawParams = serde_json::Map<String, Value>;

/// A parameter value after coercion against its [`ParamSpec`].
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    /// Slider value, already clamped.
    Number(f64),
    /// Text value.
    Text(String),
    /// RGB color.
    Color([u8; 3]),
    /// Uploaded file; `None` when unset.
    FilePath(Option<PathBuf>),
    /// Selected dropdown value.
    Enum(String),
}

impl ParamValue {
    fn kind_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Text(_) => "text",
            Self::Color(_) => "color",
            Self::FilePath(_) => "file",
            Self::Enum(_) => "choice",
        }
    }
}

/// Validated parameters handed to a transform. Every non-button parameter of the descriptor
/// that has a value or a default is present.
#[derive(Clone, Debug, PartialEq)]
pub struct ModParams {
    mod_name: String,
    values: BTreeMap<String, ParamValue>,
}

impl ModParams {
    /// Empty parameter set attributed to `mod_name`.
    pub fn empty(mod_name: &str) -> Self {
        Self {
            mod_name: mod_name.to_string(),
            values: BTreeMap::new(),
        }
    }

    /// Set a value directly, bypassing coercion.
    pub fn with(mut self, name: &str, value: ParamValue) -> Self {
        self.values.insert(name.to_string(), value);
        self
    }

    /// Mod these parameters were validated for.
    pub fn mod_name(&self) -> &str {
        &self.mod_name
    }

    /// Raw access to a coerced value.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Number of present values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// `true` when no value is present.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Slider value.
    pub fn number(&self, name: &str) -> FramemodResult<f64> {
        match self.require(name)? {
            ParamValue::Number(v) => Ok(*v),
            other => Err(self.wrong_kind(name, "number", other)),
        }
    }

    /// Slider value truncated toward zero.
    pub fn int(&self, name: &str) -> FramemodResult<i64> {
        Ok(self.number(name)?.trunc() as i64)
    }

    /// Text value.
    pub fn text(&self, name: &str) -> FramemodResult<&str> {
        match self.require(name)? {
            ParamValue::Text(v) => Ok(v),
            other => Err(self.wrong_kind(name, "text", other)),
        }
    }

    /// Color value.
    pub fn color(&self, name: &str) -> FramemodResult<[u8; 3]> {
        match self.require(name)? {
            ParamValue::Color(v) => Ok(*v),
            other => Err(self.wrong_kind(name, "color", other)),
        }
    }

    /// File value; missing and empty both read as `None`.
    pub fn file(&self, name: &str) -> FramemodResult<Option<&Path>> {
        match self.values.get(name) {
            None => Ok(None),
            Some(ParamValue::FilePath(p)) => Ok(p.as_deref()),
            Some(other) => Err(self.wrong_kind(name, "file", other)),
        }
    }

    /// Dropdown value.
    pub fn choice(&self, name: &str) -> FramemodResult<&str> {
        match self.require(name)? {
            ParamValue::Enum(v) => Ok(v),
            other => Err(self.wrong_kind(name, "choice", other)),
        }
    }

    fn require(&self, name: &str) -> FramemodResult<&ParamValue> {
        self.values.get(name).ok_or_else(|| {
            FramemodError::invalid_parameter(&self.mod_name, name, "required value is missing")
        })
    }

    fn wrong_kind(&self, name: &str, expected: &str, got: &ParamValue) -> FramemodError {
        FramemodError::invalid_parameter(
            &self.mod_name,
            name,
            format!("expected {expected}, got {}", got.kind_name()),
        )
    }
}

/// Validate and coerce `raw` against `descriptor`.
///
/// Unknown names are ignored, `null` or missing values fall back to the spec default, slider
/// values are clamped to `[min, max]`, and anything that cannot be coerced to the declared
/// kind fails with `InvalidParameter`.
pub fn validate_params(descriptor: &ModDescriptor, raw: &RawParams) -> FramemodResult<ModParams> {
    let mut params = ModParams::empty(&descriptor.name);
    for spec in &descriptor.params {
        let provided = raw.get(&spec.name).filter(|v| !v.is_null());
        let value = match provided {
            Some(v) => coerce_value(&descriptor.name, spec, v)?,
            None => default_value(&descriptor.name, spec)?,
        };
        if let Some(value) = value {
            params.values.insert(spec.name.clone(), value);
        }
    }
    for name in raw.keys() {
        if descriptor.param_spec(name).is_none() {
            tracing::debug!(
                mod_name = descriptor.name.as_str(),
                param = name.as_str(),
                "ignoring unknown parameter"
            );
        }
    }
    Ok(params)
}

fn default_value(mod_name: &str, spec: &ParamSpec) -> FramemodResult<Option<ParamValue>> {
    if let Some(d) = spec.default.as_ref().filter(|d| !d.is_null()) {
        return coerce_value(mod_name, spec, d);
    }
    Ok(match &spec.kind {
        ParamKind::Text => Some(ParamValue::Text(String::new())),
        ParamKind::File { .. } => Some(ParamValue::FilePath(None)),
        ParamKind::Dropdown { options } => options.first().map(|o| ParamValue::Enum(o.value.clone())),
        ParamKind::Slider { .. } | ParamKind::Color | ParamKind::Button { .. } => None,
    })
}

/// Coerce one raw value to the kind declared by `spec`. Buttons and `null` yield `None`.
pub(crate) fn coerce_value(
    mod_name: &str,
    spec: &ParamSpec,
    raw: &Value,
) -> FramemodResult<Option<ParamValue>> {
    if raw.is_null() {
        return Ok(None);
    }
    let invalid = |reason: String| FramemodError::invalid_parameter(mod_name, &spec.name, reason);
    let value = match &spec.kind {
        ParamKind::Button { .. } => return Ok(None),
        ParamKind::Slider { min, max, .. } => {
            let v = match raw {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            }
            .filter(|v| v.is_finite())
            .ok_or_else(|| invalid(format!("expected a number, got {raw}")))?;
            ParamValue::Number(v.clamp(*min, *max))
        }
        ParamKind::Text => match raw {
            Value::String(s) => ParamValue::Text(s.clone()),
            Value::Number(n) => ParamValue::Text(n.to_string()),
            Value::Bool(b) => ParamValue::Text(b.to_string()),
            _ => return Err(invalid(format!("expected text, got {raw}"))),
        },
        ParamKind::Color => {
            let rgb = raw
                .as_str()
                .and_then(parse_hex_color)
                .ok_or_else(|| invalid(format!("expected a #RRGGBB color, got {raw}")))?;
            ParamValue::Color(rgb)
        }
        ParamKind::File { .. } => match raw {
            Value::String(s) if s.trim().is_empty() => ParamValue::FilePath(None),
            Value::String(s) => ParamValue::FilePath(Some(PathBuf::from(s))),
            _ => return Err(invalid(format!("expected a file path, got {raw}"))),
        },
        ParamKind::Dropdown { options } => {
            let s = raw
                .as_str()
                .ok_or_else(|| invalid(format!("expected one of the options, got {raw}")))?;
            if !options.iter().any(|o| o.value == s) {
                let allowed: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
                return Err(invalid(format!(
                    "'{s}' is not one of [{}]",
                    allowed.join(", ")
                )));
            }
            ParamValue::Enum(s.to_string())
        }
    };
    Ok(Some(value))
}

/// Parse `#RRGGBB` or `#RGB` (the `#` is optional).
pub fn parse_hex_color(s: &str) -> Option<[u8; 3]> {
    let hex = s.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some([channel(0)?, channel(2)?, channel(4)?])
        }
        3 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some([channel(0)?, channel(1)?, channel(2)?])
        }
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mods/params.rs"]
mod tests;
