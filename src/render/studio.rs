use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::encode::{EncodeJob, Encoder, FilterDirective};
use crate::foundation::config::EngineConfig;
use crate::foundation::core::Image;
use crate::foundation::error::FramemodResult;
use crate::mods::descriptor::ModDescriptor;
use crate::mods::params::{RawParams, validate_params};
use crate::mods::pipeline::{ModChain, ModPipeline};
use crate::mods::plugin::ActionResult;
use crate::mods::registry::{Catalog, ModRegistry, PluginSource};
use crate::render::normalize::Normalizer;
use crate::style::canvas::Platform;
use crate::style::compositor::Compositor;

/// One render request: source, audio track, target canvas and the chain to apply.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderRequest {
    /// Source image.
    pub image_path: PathBuf,
    /// Audio track laid under the frame.
    pub audio_path: PathBuf,
    /// Video to write; a unique name under `output_dir` when absent.
    #[serde(default)]
    pub output_path: Option<PathBuf>,
    /// Platform tag (`youtube`, `tiktok`, `square`).
    #[serde(default)]
    pub platform: String,
    /// Background style tag.
    #[serde(default)]
    pub style: String,
    /// Mods to apply.
    #[serde(default)]
    pub chain: ModChain,
}

/// Where a render left its artifacts.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderOutput {
    /// Final frame handed to the encoder.
    pub frame_path: PathBuf,
    /// Encoded video.
    pub video_path: PathBuf,
    /// Video length in seconds, probed from the audio track.
    pub duration_sec: f64,
}

/// Entry point for the orchestrating layer: catalog access, previews, renders and actions.
///
/// Holds only read-mostly state, so one `Studio` can serve concurrent requests.
#[derive(Debug)]
pub struct Studio {
    config: EngineConfig,
    registry: ModRegistry,
    compositor: Compositor,
    normalizer: Normalizer,
}

impl Studio {
    /// Validate `config` and discover the mod catalog.
    pub fn new(config: EngineConfig) -> FramemodResult<Self> {
        let source = PluginSource::from_config(&config);
        Self::with_source(config, source)
    }

    /// Like [`Studio::new`] with an explicit plugin source.
    pub fn with_source(config: EngineConfig, source: PluginSource) -> FramemodResult<Self> {
        config.validate()?;
        Ok(Self {
            compositor: Compositor::from_config(&config),
            normalizer: Normalizer::from_config(&config),
            registry: ModRegistry::new(source),
            config,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current catalog snapshot.
    pub fn catalog(&self) -> Arc<Catalog> {
        self.registry.catalog()
    }

    /// Serializable descriptor list.
    pub fn list_mods(&self) -> Vec<ModDescriptor> {
        self.registry.catalog().list()
    }

    /// Re-run discovery and swap in the fresh catalog.
    pub fn reload_mods(&self) -> Arc<Catalog> {
        self.registry.reload()
    }

    fn pipeline(&self) -> ModPipeline {
        ModPipeline::new(self.registry.catalog())
            .with_budget(self.config.transform_budget_ms.map(Duration::from_millis))
    }

    /// Normalize, apply `chain`, then compose onto the canvas named by the tags.
    pub fn process(
        &self,
        image: Image,
        platform: &str,
        style: &str,
        chain: &ModChain,
    ) -> FramemodResult<Image> {
        let working = self.normalizer.normalize(image)?;
        let modded = self.pipeline().apply(working, chain)?;
        self.compositor.compose_tags(&modded, platform, style)
    }

    /// The final frame for `image_path`, without encoding.
    #[tracing::instrument(skip(self, chain), fields(image = %image_path.display()))]
    pub fn preview(
        &self,
        image_path: &Path,
        platform: &str,
        style: &str,
        chain: &ModChain,
    ) -> FramemodResult<Image> {
        let image = Image::open(image_path)?;
        self.process(image, platform, style, chain)
    }

    /// Produce the final frame, write it under `frame_dir` and hand it to `encoder`.
    #[tracing::instrument(skip(self, request, encoder), fields(image = %request.image_path.display()))]
    pub fn render(
        &self,
        request: &RenderRequest,
        encoder: &dyn Encoder,
    ) -> FramemodResult<RenderOutput> {
        let frame = self.preview(
            &request.image_path,
            &request.platform,
            &request.style,
            &request.chain,
        )?;

        let stem = unique_stem();
        let frame_path = self.config.frame_dir.join(format!("frame_{stem}.png"));
        frame.save_png(&frame_path)?;
        tracing::debug!(frame = %frame_path.display(), "final frame written");

        let duration_sec = encoder.probe_duration(&request.audio_path)?;
        let video_path = request
            .output_path
            .clone()
            .unwrap_or_else(|| self.config.output_dir.join(format!("video_{stem}.mp4")));
        let job = EncodeJob {
            frame_path: &frame_path,
            audio_path: &request.audio_path,
            output_path: &video_path,
            filter: FilterDirective::for_platform(Platform::from_tag(&request.platform)),
            duration_sec,
        };
        encoder.render(&job)?;

        tracing::info!(video = %video_path.display(), duration_sec, "render complete");
        Ok(RenderOutput {
            frame_path,
            video_path,
            duration_sec,
        })
    }

    /// Validate `params` against the mod's descriptor and run one of its actions.
    #[tracing::instrument(skip(self, params))]
    pub fn invoke_action(
        &self,
        mod_name: &str,
        action: &str,
        params: &RawParams,
    ) -> FramemodResult<ActionResult> {
        let handle = self.registry.catalog().resolve_executable(mod_name)?;
        let params = validate_params(handle.descriptor(), params)?;
        handle.invoke_action(action, &params)
    }
}

fn unique_stem() -> String {
    static SEQ: AtomicU64 = AtomicU64::new(0);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let seq = SEQ.fetch_add(1, Ordering::Relaxed);
    format!("{}_{nanos}_{seq}", std::process::id())
}

#[cfg(test)]
#[path = "../../tests/unit/render/studio.rs"]
mod tests;
