//! Curve and parameter entries - the rows a [`CurveSet`] stores.
//!
//! [`CurveSet`]: super::CurveSet

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Default name given to a freshly added curve entry, before the
/// uniqueness pass renames it.
pub const DEFAULT_CURVE_NAME: &str = "Curve_0";

/// The external piecewise-curve primitive.
///
/// The engine owns keyframe storage and interpolation; this crate only
/// decides *which* curve to evaluate. `PartialEq` compares curve shape
/// (the keys), which is what [`CurveSet::curves_equal`] is defined over.
///
/// [`CurveSet::curves_equal`]: super::CurveSet::curves_equal
pub trait Curve: Clone + PartialEq {
    /// Evaluate the curve at the given time.
    fn value_at(&self, time: f32) -> f32;
}

/// Opaque stable identity for a curve entry.
///
/// Handles let external editors keep referring to "this specific curve"
/// across renames. A handle is scoped to the set that issued it and is
/// never reused within that set, even after the entry is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurveHandle(pub(crate) u64);

/// One named curve in a set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveEntry<C> {
    pub(crate) name: String,
    /// Hierarchical dotted-path tag (e.g. `"Ability.Damage"`); empty = untagged.
    pub(crate) tag: String,
    pub(crate) color: Color,
    pub(crate) curve: C,
    pub(crate) handle: CurveHandle,
}

impl<C> CurveEntry<C> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn curve(&self) -> &C {
        &self.curve
    }

    pub fn handle(&self) -> CurveHandle {
        self.handle
    }
}

/// One named scalar parameter.
///
/// Parameters share the tag namespace with curves and act as time-invariant
/// fallback values during tag resolution. They carry no curve and no color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamEntry {
    pub(crate) tag: String,
    pub(crate) value: f32,
}

impl ParamEntry {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn value(&self) -> f32 {
        self.value
    }
}
