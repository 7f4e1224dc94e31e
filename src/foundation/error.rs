/// Convenience result type used across framemod.
pub type FramemodResult<T> = Result<T, FramemodError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum FramemodError {
    /// A chain referenced a mod name that is not in the catalog.
    #[error("mod not found: '{0}'")]
    ModNotFound(String),

    /// A parameter value could not be coerced to its declared kind.
    #[error("invalid parameter '{param}' for mod '{mod_name}': {reason}")]
    InvalidParameter {
        /// Mod the parameter belongs to.
        mod_name: String,
        /// Parameter name.
        param: String,
        /// Human-readable cause.
        reason: String,
    },

    /// A transform returned something that is not a well-formed image.
    #[error("mod '{mod_name}' returned a malformed image: {reason}")]
    MalformedResult {
        /// Offending mod.
        mod_name: String,
        /// What was wrong with the output.
        reason: String,
    },

    /// A plugin unit could not be loaded during discovery.
    #[error("plugin load failure in '{source_name}': {reason}")]
    PluginLoad {
        /// Built-in name or manifest path.
        source_name: String,
        /// Why the unit was rejected.
        reason: String,
    },

    /// Source image is below the minimum supported height.
    #[error("image too small: height {height}px is below the minimum of {min_height}px")]
    ImageTooSmall {
        /// Observed source height.
        height: u32,
        /// Required minimum height.
        min_height: u32,
    },

    /// Platform tag is not recognized.
    #[error("unsupported platform tag '{0}'")]
    UnsupportedPlatformTag(String),

    /// An overlay asset (image or font) could not be read.
    #[error("overlay asset for mod '{mod_name}' is missing ('{path}'): {reason}")]
    OverlayAssetMissing {
        /// Mod that requested the asset.
        mod_name: String,
        /// Requested asset path.
        path: String,
        /// IO or decode cause.
        reason: String,
    },

    /// The mod has no handler for the requested action.
    #[error("mod '{mod_name}' does not support action '{action}'")]
    UnsupportedAction {
        /// Mod the action was sent to.
        mod_name: String,
        /// Requested action name.
        action: String,
    },

    /// A transform ran past the configured per-transform budget.
    #[error("mod '{mod_name}' took {elapsed_ms}ms, over the {budget_ms}ms budget")]
    TransformTimeout {
        /// Offending mod.
        mod_name: String,
        /// Measured wall time.
        elapsed_ms: u64,
        /// Configured budget.
        budget_ms: u64,
    },

    /// Failure reported by the external encoder, passed through verbatim.
    #[error("encoder failure: {0}")]
    EncoderFailure(String),

    /// Invalid user-provided or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FramemodError {
    /// Build a [`FramemodError::ModNotFound`] value.
    pub fn mod_not_found(name: impl Into<String>) -> Self {
        Self::ModNotFound(name.into())
    }

    /// Build a [`FramemodError::InvalidParameter`] value.
    pub fn invalid_parameter(
        mod_name: impl Into<String>,
        param: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            mod_name: mod_name.into(),
            param: param.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`FramemodError::MalformedResult`] value.
    pub fn malformed(mod_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedResult {
            mod_name: mod_name.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`FramemodError::PluginLoad`] value.
    pub fn plugin_load(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PluginLoad {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`FramemodError::OverlayAssetMissing`] value.
    pub fn overlay_missing(
        mod_name: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::OverlayAssetMissing {
            mod_name: mod_name.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`FramemodError::EncoderFailure`] value.
    pub fn encoder(msg: impl Into<String>) -> Self {
        Self::EncoderFailure(msg.into())
    }

    /// Build a [`FramemodError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FramemodError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Stable machine-readable kind tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ModNotFound(_) => "mod_not_found",
            Self::InvalidParameter { .. } => "invalid_parameter",
            Self::MalformedResult { .. } => "malformed_result",
            Self::PluginLoad { .. } => "plugin_load_failure",
            Self::ImageTooSmall { .. } => "image_too_small",
            Self::UnsupportedPlatformTag(_) => "unsupported_platform_tag",
            Self::OverlayAssetMissing { .. } => "overlay_asset_missing",
            Self::UnsupportedAction { .. } => "unsupported_action",
            Self::TransformTimeout { .. } => "transform_timeout",
            Self::EncoderFailure(_) => "encoder_failure",
            Self::Validation(_) => "validation",
            Self::Serde(_) => "serialization",
            Self::Other(_) => "internal",
        }
    }

    /// Mod name this error is attributed to, if any.
    pub fn mod_name(&self) -> Option<&str> {
        match self {
            Self::ModNotFound(name) => Some(name),
            Self::InvalidParameter { mod_name, .. }
            | Self::MalformedResult { mod_name, .. }
            | Self::OverlayAssetMissing { mod_name, .. }
            | Self::UnsupportedAction { mod_name, .. }
            | Self::TransformTimeout { mod_name, .. } => Some(mod_name),
            _ => None,
        }
    }

    /// Structured, user-facing form of this error.
    pub fn report(&self) -> ErrorReport {
        let param = match self {
            Self::InvalidParameter { param, .. } => Some(param.clone()),
            _ => None,
        };
        ErrorReport {
            kind: self.kind().to_string(),
            message: format!("{self:#}"),
            mod_name: self.mod_name().map(str::to_string),
            param,
        }
    }
}

/// Serializable error payload handed to the HTTP/UI layer.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ErrorReport {
    /// Stable kind tag (see [`FramemodError::kind`]).
    pub kind: String,
    /// Human-readable message.
    pub message: String,
    /// Offending mod, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mod_name: Option<String>,
    /// Offending parameter, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
