use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::encode::{EncodeJob, Encoder};
use crate::foundation::config::EngineConfig;
use crate::foundation::error::{FramemodError, FramemodResult};

/// [`Encoder`] backed by the system `ffmpeg` and `ffprobe` binaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FfmpegEncoder {
    ffmpeg: PathBuf,
    ffprobe: PathBuf,
}

impl Default for FfmpegEncoder {
    fn default() -> Self {
        Self::new("ffmpeg", "ffprobe")
    }
}

impl FfmpegEncoder {
    /// Encoder using the given executables.
    pub fn new(ffmpeg: impl Into<PathBuf>, ffprobe: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
        }
    }

    /// Encoder using the executables named in `config`.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(&config.ffmpeg_bin, &config.ffprobe_bin)
    }

    /// `true` when `ffmpeg -version` runs successfully.
    pub fn is_available(&self) -> bool {
        Command::new(&self.ffmpeg)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }
}

/// `ffprobe` arguments that print the container duration as JSON.
pub fn probe_args(path: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = [
        "-v",
        "error",
        "-show_entries",
        "format=duration",
        "-of",
        "json",
    ]
    .map(OsString::from)
    .into();
    args.push(path.into());
    args
}

/// Extract `format.duration` from `ffprobe -of json` output.
pub fn parse_probe_duration(stdout: &[u8]) -> FramemodResult<f64> {
    #[derive(serde::Deserialize)]
    struct ProbeFormat {
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        format: Option<ProbeFormat>,
    }

    let parsed: ProbeOut = serde_json::from_slice(stdout)
        .map_err(|e| FramemodError::encoder(format!("ffprobe json parse failed: {e}")))?;
    let duration = parsed
        .format
        .and_then(|f| f.duration)
        .ok_or_else(|| FramemodError::encoder("ffprobe reported no duration"))?;
    duration
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite() && *d > 0.0)
        .ok_or_else(|| {
            FramemodError::encoder(format!("invalid duration '{duration}' from ffprobe"))
        })
}

/// `ffmpeg` arguments that loop the still frame over the audio track.
pub fn render_args(job: &EncodeJob<'_>) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-loop", "1", "-i"].map(OsString::from).into();
    args.push(job.frame_path.into());
    args.push("-i".into());
    args.push(job.audio_path.into());
    let tail = [
        "-filter_complex".to_string(),
        job.filter.filter_complex(),
        "-map".to_string(),
        "[v]".to_string(),
        "-map".to_string(),
        "1:a".to_string(),
        "-t".to_string(),
        job.duration_sec.to_string(),
        "-c:v".to_string(),
        "libx264".to_string(),
        "-c:a".to_string(),
        "aac".to_string(),
        "-pix_fmt".to_string(),
        "yuv420p".to_string(),
        "-shortest".to_string(),
        "-y".to_string(),
    ];
    args.extend(tail.into_iter().map(OsString::from));
    args.push(job.output_path.into());
    args
}

/// Create the parent directory of `path` if it has one.
pub fn ensure_parent_dir(path: &Path) -> FramemodResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

impl Encoder for FfmpegEncoder {
    #[tracing::instrument(skip(self))]
    fn probe_duration(&self, path: &Path) -> FramemodResult<f64> {
        let out = Command::new(&self.ffprobe)
            .args(probe_args(path))
            .output()
            .map_err(|e| FramemodError::encoder(format!("failed to run ffprobe: {e}")))?;
        if !out.status.success() {
            return Err(FramemodError::encoder(format!(
                "ffprobe failed for '{}': {}",
                path.display(),
                String::from_utf8_lossy(&out.stderr).trim()
            )));
        }
        parse_probe_duration(&out.stdout)
    }

    #[tracing::instrument(skip(self, job), fields(out = %job.output_path.display()))]
    fn render(&self, job: &EncodeJob<'_>) -> FramemodResult<()> {
        ensure_parent_dir(job.output_path)?;
        let out = Command::new(&self.ffmpeg)
            .args(render_args(job))
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                FramemodError::encoder(format!(
                    "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
                ))
            })?;
        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            let msg = if stderr.trim().is_empty() {
                format!("ffmpeg exited with {}", out.status)
            } else {
                stderr.trim().to_string()
            };
            return Err(FramemodError::encoder(msg));
        }
        tracing::info!(duration_sec = job.duration_sec, "video encoded");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
