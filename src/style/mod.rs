//! Layout and styling of the final canvas: platform sizes, fit geometry and backdrops.

/// Platform canvases and background styles.
pub mod canvas;
/// Final canvas composition.
pub mod compositor;
/// Contain-fit and cover-crop geometry.
pub mod layout;
