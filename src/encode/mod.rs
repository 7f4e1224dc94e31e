//! Handoff of the final frame to an external video encoder.
//!
//! The engine never spawns processes itself; it talks to an [`Encoder`]. [`ffmpeg`] provides
//! the system `ffmpeg`/`ffprobe` implementation.

/// System ffmpeg/ffprobe encoder.
pub mod ffmpeg;

use std::path::Path;

use crate::foundation::error::FramemodResult;
use crate::style::canvas::{CanvasSpec, Platform};

/// Platform-specific scale/pad directive applied by the encoder to the still frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterDirective {
    /// Output width.
    pub width: u32,
    /// Output height.
    pub height: u32,
}

impl FilterDirective {
    /// Directive for a platform canvas.
    pub fn for_platform(platform: Platform) -> Self {
        let (width, height) = platform.dimensions();
        Self { width, height }
    }

    /// Directive matching `canvas`.
    pub fn for_canvas(canvas: &CanvasSpec) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
        }
    }

    /// Bare filter chain: aspect-preserving scale into the box, then centered black padding.
    pub fn filter_chain(&self) -> String {
        let (w, h) = (self.width, self.height);
        format!(
            "scale={w}:{h}:force_original_aspect_ratio=decrease,pad={w}:{h}:(ow-iw)/2:(oh-ih)/2:color=black"
        )
    }

    /// The chain wired from the first input's video to the `[v]` label.
    pub fn filter_complex(&self) -> String {
        format!("[0:v]{}[v]", self.filter_chain())
    }
}

impl std::fmt::Display for FilterDirective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.filter_chain())
    }
}

/// Everything an encoder needs to turn one frame and an audio track into a video.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EncodeJob<'a> {
    /// Still frame (PNG).
    pub frame_path: &'a Path,
    /// Audio track.
    pub audio_path: &'a Path,
    /// Video to write.
    pub output_path: &'a Path,
    /// Scale/pad directive.
    pub filter: FilterDirective,
    /// Video length in seconds.
    pub duration_sec: f64,
}

/// External encoder collaborator.
pub trait Encoder {
    /// Duration of the media at `path`, in seconds.
    fn probe_duration(&self, path: &Path) -> FramemodResult<f64>;

    /// Encode `job`. Failures are reported as `EncoderFailure` with the encoder's own message.
    fn render(&self, job: &EncodeJob<'_>) -> FramemodResult<()>;
}

#[cfg(test)]
#[path = "../../tests/unit/encode/mod.rs"]
mod tests;
