//! Multi-curve collections with tagged lookup.
//!
//! The data model behind the multi-curve asset type:
//! - A [`CurveSet`] holds an ordered list of named, tagged, colored curves
//!   plus a list of scalar parameters, and optionally links to a parent set.
//! - A [`CurveLibrary`] owns all sets; parent links are [`SetId`]s into it.
//! - Queries resolve names and tags through lazily rebuilt lookup maps;
//!   tag lookups fall back local curve → local param → parent chain.
//! - All mutation flows through [`EditEvent`] dispatch, which keeps names
//!   unique, colors opaque, the index fresh-or-dirty, and observers posted.
//!
//! The piecewise-curve primitive itself stays external: anything
//! implementing [`Curve`] can be stored and evaluated.

mod edit;
mod entry;
mod index;
mod library;
mod resolve;
mod set;

pub use edit::EditEvent;
pub use entry::{Curve, CurveEntry, CurveHandle, ParamEntry, DEFAULT_CURVE_NAME};
pub use library::{CurveLibrary, SetId};
pub use set::{CurveSet, ObserverId};

#[cfg(test)]
pub(crate) mod test_support {
    use serde::{Deserialize, Serialize};

    use super::{Curve, CurveLibrary, EditEvent, SetId};

    /// Flat curve: the same value at every time.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct ConstCurve(pub f32);

    impl Curve for ConstCurve {
        fn value_at(&self, _time: f32) -> f32 {
            self.0
        }
    }

    /// Line through the origin, for tests that care about the time argument.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct LineCurve {
        pub slope: f32,
    }

    impl Curve for LineCurve {
        fn value_at(&self, time: f32) -> f32 {
            self.slope * time
        }
    }

    /// Build a library holding one set with the given (name, tag, value)
    /// curves, driven through the edit surface like the host would.
    pub fn set_with_curves(
        curves: &[(&str, &str, f32)],
    ) -> (CurveLibrary<ConstCurve>, SetId) {
        let mut library = CurveLibrary::new();
        let id = library.create_set();
        let set = library.get_mut(id).expect("set was just created");
        for (i, (name, tag, value)) in curves.iter().enumerate() {
            set.apply_edit(EditEvent::Added { index: i, curve: ConstCurve(*value) });
            set.apply_edit(EditEvent::Renamed { index: i, name: name.to_string() });
            if !tag.is_empty() {
                set.apply_edit(EditEvent::Retagged { index: i, tag: tag.to_string() });
            }
        }
        (library, id)
    }
}
