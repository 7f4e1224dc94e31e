//! Pixel kernels shared by the built-in mods and the style compositor.
//!
//! Everything here operates on owned [`Image`](crate::Image) buffers and is free of IO, except
//! [`text`] which may read font files.

/// Gaussian blur.
pub mod blur;
/// Masked fills, alpha blending and pasting.
pub mod composite;
/// Brightness and sharpness.
pub mod enhance;
/// 8-bit coverage masks and shape rasterization.
pub mod mask;
/// Text rendering through usvg/resvg.
pub mod text;
/// Resize, crop and rotation.
pub mod transform;
