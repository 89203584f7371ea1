//! Name and tag resolution, including the parent-chain walk.
//!
//! Resolution order for a tag lookup: a local curve tag beats a local
//! param tag, and anything local beats the parent chain. The chain is
//! walked recursively with the same tag, time and fallback flag, so a
//! grandparent's param can satisfy a lookup the child and parent both
//! miss. A visited set bounds the walk: if a cycle of parent links ever
//! gets configured, the lookup terminates as a miss instead of recursing
//! forever.

use std::collections::BTreeSet;

use super::entry::Curve;
use super::library::{CurveLibrary, SetId};
use super::set::CurveSet;

impl<C: Curve> CurveSet<C> {
    /// Evaluate the curve named `name` at `time`, or 0.0 when there is no
    /// such curve. The legacy query surface: it never fails.
    pub fn evaluate(&self, name: &str, time: f32) -> f32 {
        self.value_by_name(name, time).unwrap_or(0.0)
    }

    /// Evaluate the curve named `name` at `time`. Local names only; the
    /// parent chain is not consulted for name lookups.
    pub fn value_by_name(&self, name: &str, time: f32) -> Option<f32> {
        let pos = self.with_index(|index| index.curve_position_by_name(name))?;
        Some(self.entries[pos].curve.value_at(time))
    }

    /// Resolve `tag` to a value at `time`.
    ///
    /// A local curve with the tag wins. Otherwise, when
    /// `allow_param_fallback` is set, a local param with the tag answers
    /// (its value is time-invariant). Otherwise the parent chain is asked
    /// the same question.
    pub fn value_by_tag(
        &self,
        library: &CurveLibrary<C>,
        tag: &str,
        time: f32,
        allow_param_fallback: bool,
    ) -> Option<f32> {
        let mut visited = Vec::new();
        self.value_by_tag_walk(library, tag, time, allow_param_fallback, &mut visited)
    }

    fn value_by_tag_walk(
        &self,
        library: &CurveLibrary<C>,
        tag: &str,
        time: f32,
        allow_param_fallback: bool,
        visited: &mut Vec<SetId>,
    ) -> Option<f32> {
        visited.push(self.id());

        if let Some(pos) = self.with_index(|index| index.curve_position_by_tag(tag)) {
            return Some(self.entries[pos].curve.value_at(time));
        }
        if allow_param_fallback {
            if let Some(pos) = self.with_index(|index| index.param_position_by_tag(tag)) {
                return Some(self.params[pos].value);
            }
        }

        let parent = self.next_in_chain(library, visited)?;
        parent.value_by_tag_walk(library, tag, time, allow_param_fallback, visited)
    }

    /// Resolve `tag` against the parameter list only. Curves are not
    /// consulted; the parent chain is, on a local miss.
    pub fn param_by_tag(&self, library: &CurveLibrary<C>, tag: &str) -> Option<f32> {
        let mut visited = Vec::new();
        self.param_by_tag_walk(library, tag, &mut visited)
    }

    fn param_by_tag_walk(
        &self,
        library: &CurveLibrary<C>,
        tag: &str,
        visited: &mut Vec<SetId>,
    ) -> Option<f32> {
        visited.push(self.id());

        if let Some(pos) = self.with_index(|index| index.param_position_by_tag(tag)) {
            return Some(self.params[pos].value);
        }

        let parent = self.next_in_chain(library, visited)?;
        parent.param_by_tag_walk(library, tag, visited)
    }

    /// All identifier tags carried by this set's curves, plus its params
    /// when `include_params` is set.
    ///
    /// Local only: the parent chain is NOT walked, unlike the value
    /// lookups above. Asymmetric on purpose; callers enumerate a set's own
    /// tag surface, inherited tags stay invisible here.
    pub fn identifier_tags(&self, include_params: bool) -> BTreeSet<String> {
        self.with_index(|index| {
            let mut tags: BTreeSet<String> =
                index.curve_tags().map(str::to_string).collect();
            if include_params {
                tags.extend(index.param_tags().map(str::to_string));
            }
            tags
        })
    }

    /// The parent set to continue a walk in, if one is linked, live in the
    /// library, and not already visited. A dangling parent id (set since
    /// removed from the library) behaves as no parent at all.
    fn next_in_chain<'a>(
        &self,
        library: &'a CurveLibrary<C>,
        visited: &[SetId],
    ) -> Option<&'a CurveSet<C>> {
        let parent = self.parent()?;
        if visited.contains(&parent) {
            log::debug!("parent cycle through {:?} detected, stopping lookup", parent);
            return None;
        }
        library.get(parent)
    }
}
