/// Engine settings loaded from JSON.
pub mod config;
/// Pixel buffers and color models.
pub mod core;
/// Error taxonomy and structured reports.
pub mod error;
pub(crate) mod math;
