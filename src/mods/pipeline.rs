use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context as _;
use serde_json::Value;

use crate::foundation::core::Image;
use crate::foundation::error::{FramemodError, FramemodResult};
use crate::mods::params::{RawParams, validate_params};
use crate::mods::plugin::PluginHandle;
use crate::mods::registry::Catalog;

/// One step of a chain: a mod name plus its raw parameter map.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ModInvocation {
    /// Catalog key.
    pub name: String,
    /// Raw parameters; validated against the descriptor at apply time.
    #[serde(default)]
    pub params: RawParams,
}

impl ModInvocation {
    /// Invocation with no parameters (all defaults).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: RawParams::new(),
        }
    }

    /// Set one raw parameter.
    pub fn with_param(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.params.insert(name.to_string(), value.into());
        self
    }
}

/// Ordered list of invocations. Serialized as a bare JSON array.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ModChain(pub Vec<ModInvocation>);

impl ModChain {
    /// Empty chain.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append an invocation.
    pub fn then(mut self, invocation: ModInvocation) -> Self {
        self.0.push(invocation);
        self
    }

    /// Parse a chain from JSON.
    pub fn from_json_str(s: &str) -> FramemodResult<Self> {
        serde_json::from_str(s).map_err(|e| FramemodError::serde(format!("invalid mod chain: {e}")))
    }

    /// Read a chain from a JSON file.
    pub fn from_path(path: &Path) -> FramemodResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read mod chain '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Invocations in order.
    pub fn invocations(&self) -> &[ModInvocation] {
        &self.0
    }

    /// Number of invocations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when the chain has no invocations.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<ModInvocation> for ModChain {
    fn from_iter<T: IntoIterator<Item = ModInvocation>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Loaded plugin instances of one run, keyed by name. Never shared between runs.
#[derive(Debug)]
pub struct PluginCache {
    catalog: Arc<Catalog>,
    loaded: HashMap<String, PluginHandle>,
}

impl PluginCache {
    /// Empty cache over `catalog`.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            loaded: HashMap::new(),
        }
    }

    /// Handle for `name`, instantiating it on first use.
    pub fn resolve(&mut self, name: &str) -> FramemodResult<&PluginHandle> {
        if !self.loaded.contains_key(name) {
            let handle = self.catalog.resolve_executable(name)?;
            self.loaded.insert(name.to_string(), handle);
        }
        self.loaded
            .get(name)
            .ok_or_else(|| FramemodError::mod_not_found(name))
    }

    /// Number of distinct instances loaded so far.
    pub fn loaded(&self) -> usize {
        self.loaded.len()
    }
}

/// Applies chains against one catalog snapshot.
#[derive(Clone, Debug)]
pub struct ModPipeline {
    catalog: Arc<Catalog>,
    budget: Option<Duration>,
}

impl ModPipeline {
    /// Pipeline over `catalog` with no time budget.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            budget: None,
        }
    }

    /// Fail any transform that runs longer than `budget`.
    pub fn with_budget(mut self, budget: Option<Duration>) -> Self {
        self.budget = budget;
        self
    }

    /// Catalog the pipeline resolves against.
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Run `chain` over `image` in order with a fresh per-run cache.
    ///
    /// The first failing step aborts the run; no partial image is returned.
    #[tracing::instrument(skip(self, image, chain), fields(steps = chain.len()))]
    pub fn apply(&self, image: Image, chain: &ModChain) -> FramemodResult<Image> {
        let mut cache = PluginCache::new(self.catalog.clone());
        self.apply_with_cache(image, chain, &mut cache)
    }

    /// Like [`ModPipeline::apply`] but reusing a caller-owned cache.
    pub fn apply_with_cache(
        &self,
        mut image: Image,
        chain: &ModChain,
        cache: &mut PluginCache,
    ) -> FramemodResult<Image> {
        for (step, invocation) in chain.invocations().iter().enumerate() {
            image = self.apply_one(image, invocation, cache).inspect_err(|e| {
                tracing::warn!(
                    step,
                    mod_name = invocation.name.as_str(),
                    error = %e,
                    "chain aborted"
                );
            })?;
        }
        Ok(image)
    }

    fn apply_one(
        &self,
        image: Image,
        invocation: &ModInvocation,
        cache: &mut PluginCache,
    ) -> FramemodResult<Image> {
        let name = invocation.name.as_str();
        let handle = cache.resolve(name)?;
        let params = validate_params(handle.descriptor(), &invocation.params)?;

        let started = Instant::now();
        let out = handle.apply(image, &params).map_err(|e| match e {
            FramemodError::Other(inner) => {
                FramemodError::Other(inner.context(format!("mod '{name}' failed")))
            }
            other => other,
        })?;
        let elapsed = started.elapsed();
        tracing::debug!(
            mod_name = name,
            elapsed_ms = elapsed.as_millis() as u64,
            "mod applied"
        );

        if let Some(budget) = self.budget
            && elapsed > budget
        {
            return Err(FramemodError::TransformTimeout {
                mod_name: name.to_string(),
                elapsed_ms: elapsed.as_millis() as u64,
                budget_ms: budget.as_millis() as u64,
            });
        }

        out.validate()
            .map_err(|reason| FramemodError::malformed(name, reason))?;
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mods/pipeline.rs"]
mod tests;
