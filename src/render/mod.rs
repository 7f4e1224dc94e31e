//! Request orchestration: normalization, the mod chain, composition and encoder handoff.

/// Square working-frame normalization.
pub mod normalize;
/// Request-level entry points.
pub mod studio;
