//! Mod plugins: declarative descriptors, parameter validation, the plugin contract, discovery
//! and the sequential pipeline that applies a chain of mods to one image.

pub mod builtin;
/// Catalog metadata and parameter schemas.
pub mod descriptor;
/// JSON presets layered over built-in transforms.
pub mod manifest;
/// Typed parameter values and validation.
pub mod params;
/// Chains and the sequential pipeline.
pub mod pipeline;
/// The plugin contract.
pub mod plugin;
/// Discovery and the process-wide catalog.
pub mod registry;
