use std::path::PathBuf;
use std::sync::Arc;

use crate::foundation::core::Image;
use crate::foundation::error::{FramemodError, FramemodResult};
use crate::mods::descriptor::ModDescriptor;
use crate::mods::params::ModParams;

/// Executable half of a mod.
///
/// `apply` receives parameters already validated against the mod's descriptor. Implementations
/// own the image they are given and return ownership of the result.
pub trait ModPlugin: Send + Sync {
    /// Transform `image`.
    fn apply(&self, image: Image, params: &ModParams) -> FramemodResult<Image>;

    /// Handle a UI-triggered action. `None` means the plugin has no action capability.
    fn on_action(&self, _action: &str, _params: &ModParams) -> Option<ActionResult> {
        None
    }
}

/// Response of a plugin action.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ActionResult {
    /// Plain acknowledgement.
    Message(String),
    /// Suggests a new value for one parameter; the caller owns the parameter state.
    Update {
        /// Human-readable message.
        message: String,
        /// Suggested value.
        new_value: serde_json::Value,
        /// Parameter the UI should refresh.
        update_param: String,
    },
}

/// Environment handed to plugin factories.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PluginContext {
    /// Font text mods fall back to.
    pub fallback_font: Option<PathBuf>,
}

/// Instantiates a plugin. Called once per mod per pipeline run.
pub type PluginFactory = fn(&PluginContext) -> Box<dyn ModPlugin>;

/// A loaded plugin bound to its descriptor.
#[derive(Clone)]
pub struct PluginHandle {
    descriptor: Arc<ModDescriptor>,
    plugin: Arc<dyn ModPlugin>,
}

impl std::fmt::Debug for PluginHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginHandle")
            .field("name", &self.descriptor.name)
            .finish_non_exhaustive()
    }
}

impl PluginHandle {
    pub(crate) fn new(descriptor: Arc<ModDescriptor>, plugin: Box<dyn ModPlugin>) -> Self {
        Self {
            descriptor,
            plugin: Arc::from(plugin),
        }
    }

    /// Mod name.
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// Descriptor the handle validates against.
    pub fn descriptor(&self) -> &ModDescriptor {
        &self.descriptor
    }

    /// Run the transform.
    pub fn apply(&self, image: Image, params: &ModParams) -> FramemodResult<Image> {
        self.plugin.apply(image, params)
    }

    /// Run an action, failing with `UnsupportedAction` when the plugin has no handler.
    pub fn invoke_action(&self, action: &str, params: &ModParams) -> FramemodResult<ActionResult> {
        self.plugin
            .on_action(action, params)
            .ok_or_else(|| FramemodError::UnsupportedAction {
                mod_name: self.descriptor.name.clone(),
                action: action.to_string(),
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mods/plugin.rs"]
mod tests;
