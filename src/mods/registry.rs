use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use crate::foundation::config::EngineConfig;
use crate::foundation::error::{FramemodError, FramemodResult};
use crate::mods::builtin;
use crate::mods::descriptor::ModDescriptor;
use crate::mods::manifest::PluginManifest;
use crate::mods::plugin::{PluginContext, PluginFactory, PluginHandle};

/// A transform compiled into the binary.
#[derive(Clone, Debug)]
pub struct BuiltinMod {
    /// Catalog metadata.
    pub descriptor: ModDescriptor,
    /// Executable factory.
    pub factory: PluginFactory,
}

/// Where an entry came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryOrigin {
    /// Registered in code.
    Builtin,
    /// Loaded from a manifest file.
    Manifest(PathBuf),
}

/// Discovery-time failure, recorded instead of aborting the scan.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoadFailure {
    /// Built-in name or manifest path.
    pub source_name: String,
    /// Why the unit was skipped.
    pub reason: String,
}

impl LoadFailure {
    /// The failure as a `PluginLoad` error.
    pub fn to_error(&self) -> FramemodError {
        FramemodError::plugin_load(&self.source_name, &self.reason)
    }
}

/// One catalog entry: descriptor plus how to instantiate it.
#[derive(Clone, Debug)]
pub struct CatalogEntry {
    descriptor: Arc<ModDescriptor>,
    factory: PluginFactory,
    origin: EntryOrigin,
}

impl CatalogEntry {
    /// Catalog metadata.
    pub fn descriptor(&self) -> &ModDescriptor {
        &self.descriptor
    }

    /// Where the entry came from.
    pub fn origin(&self) -> &EntryOrigin {
        &self.origin
    }
}

/// Immutable result of one discovery pass.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    entries: BTreeMap<String, CatalogEntry>,
    failures: Vec<LoadFailure>,
    context: PluginContext,
}

impl Catalog {
    /// Descriptors in name order.
    pub fn descriptors(&self) -> impl Iterator<Item = &ModDescriptor> {
        self.entries.values().map(|e| e.descriptor.as_ref())
    }

    /// Owned, serializable descriptor list.
    pub fn list(&self) -> Vec<ModDescriptor> {
        self.descriptors().cloned().collect()
    }

    /// Entry by name.
    pub fn entry(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.get(name)
    }

    /// Descriptor by name.
    pub fn get(&self, name: &str) -> FramemodResult<&ModDescriptor> {
        self.entries
            .get(name)
            .map(|e| e.descriptor.as_ref())
            .ok_or_else(|| FramemodError::mod_not_found(name))
    }

    /// Instantiate the transform registered under `name`.
    pub fn resolve_executable(&self, name: &str) -> FramemodResult<PluginHandle> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| FramemodError::mod_not_found(name))?;
        tracing::debug!(mod_name = name, "loading plugin instance");
        Ok(PluginHandle::new(
            entry.descriptor.clone(),
            (entry.factory)(&self.context),
        ))
    }

    /// `true` when `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Units skipped during discovery.
    pub fn failures(&self) -> &[LoadFailure] {
        &self.failures
    }

    fn insert(&mut self, descriptor: ModDescriptor, factory: PluginFactory, origin: EntryOrigin) {
        let name = descriptor.name.clone();
        let entry = CatalogEntry {
            descriptor: Arc::new(descriptor),
            factory,
            origin,
        };
        if self.entries.insert(name.clone(), entry).is_some() {
            tracing::info!(mod_name = name.as_str(), "mod re-registered; replacing previous entry");
        }
    }

    fn record_failure(&mut self, source_name: impl Into<String>, reason: impl Into<String>) {
        let failure = LoadFailure {
            source_name: source_name.into(),
            reason: reason.into(),
        };
        tracing::warn!(error = %failure.to_error(), "skipping plugin unit");
        self.failures.push(failure);
    }
}

/// Configured plugin source: code-registered transforms plus an optional manifest directory.
#[derive(Clone, Debug)]
pub struct PluginSource {
    builtins: Vec<BuiltinMod>,
    manifest_dir: Option<PathBuf>,
    context: PluginContext,
}

impl Default for PluginSource {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PluginSource {
    /// The standard built-in transforms, no manifests.
    pub fn builtin() -> Self {
        Self {
            builtins: builtin::builtins(),
            manifest_dir: None,
            context: PluginContext::default(),
        }
    }

    /// A source with no transforms at all.
    pub fn empty() -> Self {
        Self {
            builtins: Vec::new(),
            manifest_dir: None,
            context: PluginContext::default(),
        }
    }

    /// Built-ins plus the config's plugin directory and fallback font.
    pub fn from_config(config: &EngineConfig) -> Self {
        let mut source = Self::builtin().with_context(PluginContext {
            fallback_font: config.fallback_font.clone(),
        });
        source.manifest_dir = config.plugin_dir.clone();
        source
    }

    /// Scan `dir` for `*.json` manifests on discovery.
    pub fn with_manifest_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.manifest_dir = Some(dir.into());
        self
    }

    /// Replace the plugin context.
    pub fn with_context(mut self, context: PluginContext) -> Self {
        self.context = context;
        self
    }

    /// Add a code-registered transform; a later registration under the same name wins.
    pub fn register(&mut self, descriptor: ModDescriptor, factory: PluginFactory) {
        self.builtins.push(BuiltinMod {
            descriptor,
            factory,
        });
    }

    /// Manifest directory, if any.
    pub fn manifest_dir(&self) -> Option<&Path> {
        self.manifest_dir.as_deref()
    }

    /// Build a fresh catalog. Never fails: broken units are recorded on the catalog.
    #[tracing::instrument(skip(self), fields(manifest_dir = ?self.manifest_dir))]
    pub fn discover(&self) -> Catalog {
        let mut catalog = Catalog {
            context: self.context.clone(),
            ..Catalog::default()
        };

        for b in &self.builtins {
            match b.descriptor.validate() {
                Ok(()) => catalog.insert(b.descriptor.clone(), b.factory, EntryOrigin::Builtin),
                Err(reason) => catalog.record_failure(&b.descriptor.name, reason),
            }
        }

        if let Some(dir) = &self.manifest_dir {
            match manifest_files(dir) {
                Ok(paths) => {
                    for path in paths {
                        load_manifest_into(&mut catalog, &path);
                    }
                }
                Err(e) => catalog.record_failure(dir.display().to_string(), format!("{e:#}")),
            }
        }

        tracing::info!(
            mods = catalog.len(),
            failures = catalog.failures.len(),
            "mod catalog discovered"
        );
        catalog
    }
}

fn manifest_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    use anyhow::Context as _;

    let mut paths = Vec::new();
    for entry in
        std::fs::read_dir(dir).with_context(|| format!("read plugin dir '{}'", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|e| e == "json") {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

fn load_manifest_into(catalog: &mut Catalog, path: &Path) {
    let source_name = path.display().to_string();
    let manifest = match PluginManifest::from_path(path) {
        Ok(m) => m,
        Err(e) => return catalog.record_failure(source_name, format!("{e:#}")),
    };
    let base = catalog
        .entries
        .get(&manifest.base)
        .map(|e| (e.descriptor.clone(), e.factory));
    let Some((base_descriptor, factory)) = base else {
        return catalog.record_failure(
            source_name,
            format!("unknown base transform '{}'", manifest.base),
        );
    };
    match manifest.resolve(&base_descriptor) {
        Ok(descriptor) => {
            tracing::debug!(
                mod_name = descriptor.name.as_str(),
                base = manifest.base.as_str(),
                "loaded manifest"
            );
            catalog.insert(descriptor, factory, EntryOrigin::Manifest(path.to_path_buf()));
        }
        Err(reason) => catalog.record_failure(source_name, reason),
    }
}

/// Process-wide catalog holder. Readers get a consistent snapshot; `reload` swaps the whole
/// catalog at once.
#[derive(Debug)]
pub struct ModRegistry {
    source: PluginSource,
    catalog: RwLock<Arc<Catalog>>,
}

impl ModRegistry {
    /// Discover `source` and hold the result.
    pub fn new(source: PluginSource) -> Self {
        let catalog = Arc::new(source.discover());
        Self {
            source,
            catalog: RwLock::new(catalog),
        }
    }

    /// Current snapshot.
    pub fn catalog(&self) -> Arc<Catalog> {
        self.catalog
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Re-run discovery and swap in the result.
    pub fn reload(&self) -> Arc<Catalog> {
        let fresh = Arc::new(self.source.discover());
        *self.catalog.write().unwrap_or_else(PoisonError::into_inner) = fresh.clone();
        fresh
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mods/registry.rs"]
mod tests;
