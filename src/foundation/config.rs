use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{FramemodError, FramemodResult};

/// What to do with sources shorter than [`EngineConfig::min_source_height`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndersizedPolicy {
    /// Fail with `ImageTooSmall`.
    #[default]
    Reject,
    /// Crop and upscale to the working resolution anyway.
    Upscale,
}

/// Engine-wide settings. Every field has a default, so a partial JSON file is valid.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory scanned for JSON mod manifests. `None` means built-ins only.
    pub plugin_dir: Option<PathBuf>,
    /// Edge length of the square working frame produced by normalization.
    pub working_size: u32,
    /// Minimum accepted source height in pixels.
    pub min_source_height: u32,
    /// Policy for sources below `min_source_height`.
    pub undersized: UndersizedPolicy,
    /// Gaussian radius of the blurred backdrop.
    pub backdrop_blur_radius: f32,
    /// Brightness factor of the blurred backdrop.
    pub backdrop_brightness: f32,
    /// Directory for rendered videos.
    pub output_dir: PathBuf,
    /// Directory for final frames handed to the encoder.
    pub frame_dir: PathBuf,
    /// `ffmpeg` executable.
    pub ffmpeg_bin: PathBuf,
    /// `ffprobe` executable.
    pub ffprobe_bin: PathBuf,
    /// Per-transform wall-time budget; an overrun fails the request.
    pub transform_budget_ms: Option<u64>,
    /// Font used by text mods when none is given or the given one fails to load.
    pub fallback_font: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            plugin_dir: None,
            working_size: 1080,
            min_source_height: 1080,
            undersized: UndersizedPolicy::Reject,
            backdrop_blur_radius: 10.0,
            backdrop_brightness: 0.7,
            output_dir: PathBuf::from("output"),
            frame_dir: PathBuf::from("temp"),
            ffmpeg_bin: PathBuf::from("ffmpeg"),
            ffprobe_bin: PathBuf::from("ffprobe"),
            transform_budget_ms: None,
            fallback_font: None,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON config string and validate it.
    pub fn from_json_str(s: &str) -> FramemodResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| FramemodError::serde(format!("invalid engine config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load and validate a JSON config file.
    pub fn from_path(path: &Path) -> FramemodResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read engine config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Reject settings no stage can work with.
    pub fn validate(&self) -> FramemodResult<()> {
        if self.working_size == 0 || self.working_size > crate::foundation::core::MAX_DIM {
            return Err(FramemodError::validation(format!(
                "working_size must be in 1..={}",
                crate::foundation::core::MAX_DIM
            )));
        }
        if !self.working_size.is_multiple_of(2) {
            return Err(FramemodError::validation(
                "working_size must be even (required for yuv420p output)",
            ));
        }
        if !self.backdrop_blur_radius.is_finite() || self.backdrop_blur_radius < 0.0 {
            return Err(FramemodError::validation(
                "backdrop_blur_radius must be finite and >= 0",
            ));
        }
        if !self.backdrop_brightness.is_finite() || self.backdrop_brightness < 0.0 {
            return Err(FramemodError::validation(
                "backdrop_brightness must be finite and >= 0",
            ));
        }
        if self.transform_budget_ms == Some(0) {
            return Err(FramemodError::validation(
                "transform_budget_ms must be > 0 when set",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
