//! Lazily rebuilt lookup maps over a set's entries.
//!
//! The index is derived, disposable state: it is either dirty (must be
//! rebuilt before use) or it exactly reflects the current curve and
//! parameter lists. Structural edits (add/remove/rename of a name or tag,
//! clear) mark it dirty; reshaping a curve or changing a parameter's value
//! does not touch any key and leaves it fresh.

use std::collections::HashMap;

use super::entry::{Curve, CurveEntry, ParamEntry};

#[derive(Debug)]
pub(crate) struct LookupIndex {
    dirty: bool,
    curve_by_name: HashMap<String, usize>,
    curve_by_tag: HashMap<String, usize>,
    param_by_tag: HashMap<String, usize>,
}

impl Default for LookupIndex {
    fn default() -> Self {
        // Starts dirty so a set restored from storage rebuilds on first query
        Self {
            dirty: true,
            curve_by_name: HashMap::new(),
            curve_by_tag: HashMap::new(),
            param_by_tag: HashMap::new(),
        }
    }
}

impl LookupIndex {
    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    #[cfg(test)]
    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Rebuild all three maps if dirty; a no-op otherwise.
    ///
    /// One scan over each list. Entries with an empty tag are not indexed
    /// by tag. When two entries share a tag, the later one wins.
    pub(crate) fn ensure_fresh<C: Curve>(&mut self, entries: &[CurveEntry<C>], params: &[ParamEntry]) {
        if !self.dirty {
            return;
        }

        self.curve_by_name.clear();
        self.curve_by_tag.clear();
        self.param_by_tag.clear();

        for (pos, entry) in entries.iter().enumerate() {
            self.curve_by_name.insert(entry.name.clone(), pos);
            if !entry.tag.is_empty() {
                self.curve_by_tag.insert(entry.tag.clone(), pos);
            }
        }
        for (pos, param) in params.iter().enumerate() {
            if !param.tag.is_empty() {
                self.param_by_tag.insert(param.tag.clone(), pos);
            }
        }

        self.dirty = false;
        log::debug!(
            "rebuilt curve lookup index: {} curves, {} tagged, {} params",
            self.curve_by_name.len(),
            self.curve_by_tag.len(),
            self.param_by_tag.len()
        );
    }

    pub(crate) fn curve_position_by_name(&self, name: &str) -> Option<usize> {
        debug_assert!(!self.dirty);
        self.curve_by_name.get(name).copied()
    }

    pub(crate) fn curve_position_by_tag(&self, tag: &str) -> Option<usize> {
        debug_assert!(!self.dirty);
        self.curve_by_tag.get(tag).copied()
    }

    pub(crate) fn param_position_by_tag(&self, tag: &str) -> Option<usize> {
        debug_assert!(!self.dirty);
        self.param_by_tag.get(tag).copied()
    }

    pub(crate) fn curve_tags(&self) -> impl Iterator<Item = &str> {
        self.curve_by_tag.keys().map(String::as_str)
    }

    pub(crate) fn param_tags(&self) -> impl Iterator<Item = &str> {
        self.param_by_tag.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::curve::test_support::ConstCurve;
    use crate::curve::CurveHandle;

    fn entry(name: &str, tag: &str, value: f32, handle: u64) -> CurveEntry<ConstCurve> {
        CurveEntry {
            name: name.to_string(),
            tag: tag.to_string(),
            color: Color::WHITE,
            curve: ConstCurve(value),
            handle: CurveHandle(handle),
        }
    }

    #[test]
    fn test_rebuild_maps_names_and_tags() {
        let entries = vec![
            entry("A", "Tag.A", 1.0, 1),
            entry("B", "", 2.0, 2),
            entry("C", "Tag.C", 3.0, 3),
        ];
        let params = vec![ParamEntry { tag: "Tag.P".to_string(), value: 9.0 }];

        let mut index = LookupIndex::default();
        index.ensure_fresh(&entries, &params);

        assert_eq!(index.curve_position_by_name("B"), Some(1));
        assert_eq!(index.curve_position_by_tag("Tag.C"), Some(2));
        assert_eq!(index.param_position_by_tag("Tag.P"), Some(0));
        // Untagged entries are not reachable by tag
        assert_eq!(index.curve_position_by_tag(""), None);
    }

    #[test]
    fn test_rebuild_is_lazy_and_idempotent() {
        let entries = vec![entry("A", "", 1.0, 1)];
        let mut index = LookupIndex::default();
        assert!(index.is_dirty());

        index.ensure_fresh(&entries, &[]);
        assert!(!index.is_dirty());

        // A second call with no edits must be a no-op
        index.ensure_fresh(&entries, &[]);
        assert_eq!(index.curve_position_by_name("A"), Some(0));

        index.mark_dirty();
        assert!(index.is_dirty());
    }

    #[test]
    fn test_duplicate_tag_later_entry_wins() {
        let entries = vec![
            entry("First", "Shared", 1.0, 1),
            entry("Second", "Shared", 2.0, 2),
        ];
        let mut index = LookupIndex::default();
        index.ensure_fresh(&entries, &[]);

        assert_eq!(index.curve_position_by_tag("Shared"), Some(1));
    }
}
