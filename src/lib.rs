//! Curviest Curve: multi-curve float assets.
//!
//! One asset, many named float curves:
//! - Per-curve display colors (always opaque)
//! - Hierarchical identifier tags (`"Ability.Damage"`) as an alternate
//!   lookup key, shared with time-invariant scalar parameters
//! - Parent-set fallback: a tag the child misses is resolved up the chain
//! - Deterministic unique names maintained across every edit
//!
//! The crate is the data model and resolution engine only. Keyframe
//! interpolation, editor UI and asset persistence belong to the host; the
//! host's curve primitive plugs in through the [`Curve`] trait.

pub mod color;
pub mod curve;

pub use color::Color;
pub use curve::{
    Curve, CurveEntry, CurveHandle, CurveLibrary, CurveSet, EditEvent, ObserverId, ParamEntry,
    SetId, DEFAULT_CURVE_NAME,
};
