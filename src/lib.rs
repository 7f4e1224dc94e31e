//! framemod turns a still image and an audio track into a platform-ready video.
//!
//! A request flows through four stages:
//!
//! - Normalize the source into a square working frame ([`render::normalize`])
//! - Apply a [`ModChain`] of pluggable image transforms ([`mods`])
//! - Compose the result onto a platform canvas ([`style`])
//! - Hand the final frame to an external [`Encoder`] ([`encode`])
//!
//! [`Studio`] ties the stages together for the orchestrating layer.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Encoder handoff.
pub mod encode;
/// Shared types: images, errors, configuration.
pub mod foundation;
/// Pixel kernels.
pub mod imaging;
pub mod mods;
/// Request orchestration.
pub mod render;
pub mod style;

pub use crate::encode::ffmpeg::FfmpegEncoder;
pub use crate::encode::{EncodeJob, Encoder, FilterDirective};
pub use crate::foundation::config::{EngineConfig, UndersizedPolicy};
pub use crate::foundation::core::{ColorModel, Image};
pub use crate::foundation::error::{ErrorReport, FramemodError, FramemodResult};
pub use crate::mods::descriptor::{ModDescriptor, ParamKind, ParamSpec};
pub use crate::mods::params::{ModParams, ParamValue, RawParams};
pub use crate::mods::pipeline::{ModChain, ModInvocation, ModPipeline};
pub use crate::mods::plugin::{ActionResult, ModPlugin, PluginContext};
pub use crate::mods::registry::{Catalog, ModRegistry, PluginSource};
pub use crate::render::studio::{RenderOutput, RenderRequest, Studio};
pub use crate::style::canvas::{BackgroundStyle, CanvasSpec, Platform};
pub use crate::style::compositor::Compositor;
pub use crate::style::layout::FitGeometry;
