//! The edit surface: structural edits, name-uniqueness enforcement,
//! change notification.
//!
//! The host's property-change plumbing reduces every edit to one
//! [`EditEvent`], dispatched through [`CurveSet::apply_edit`]. A completed
//! structural edit to the curve list does two things: marks the lookup
//! index dirty and broadcasts the curve-map-changed event to observers.
//! No-op edits (unknown name, out-of-range index) do neither.

use crate::color::Color;

use super::entry::{Curve, CurveEntry, CurveHandle, ParamEntry, DEFAULT_CURVE_NAME};
use super::library::SetId;
use super::set::CurveSet;

/// One structural edit to a curve set.
#[derive(Debug, Clone, PartialEq)]
pub enum EditEvent<C> {
    /// A curve was added at `index` (clamped to the list length). The new
    /// entry gets the sentinel default name, an empty tag and a fresh
    /// random color, then the uniqueness pass renames it.
    Added { index: usize, curve: C },
    /// The entry at `index` was duplicated. The copy is inserted
    /// immediately before the original and only the copy is renamed.
    Duplicated { index: usize },
    /// The entry whose name matches was removed.
    Removed { name: String },
    /// The entry at `index` had its name field set to `name` (which may
    /// collide or be empty; the uniqueness pass runs afterwards).
    Renamed { index: usize, name: String },
    /// The entry at `index` had its identifier tag set to `tag`.
    Retagged { index: usize, tag: String },
    /// The entry at `index` had its color set. Alpha is stored as 1.0
    /// regardless of the input.
    Recolored { index: usize, color: Color },
    /// All curve entries were removed. Parameters are unaffected.
    Cleared,
    /// The parent link was set. A set can never be its own parent; such an
    /// edit stores `None` instead.
    ParentChanged { parent: Option<SetId> },
}

impl<C: Curve> CurveSet<C> {
    /// Dispatch one edit event.
    pub fn apply_edit(&mut self, event: EditEvent<C>) {
        log::trace!("curve set {:?}: applying {} edit", self.id, edit_kind(&event));
        match event {
            EditEvent::Added { index, curve } => {
                let index = index.min(self.entries.len());
                let handle = self.alloc_handle();
                self.entries.insert(
                    index,
                    CurveEntry {
                        name: DEFAULT_CURVE_NAME.to_string(),
                        tag: String::new(),
                        color: Color::random(),
                        curve,
                        handle,
                    },
                );
                self.make_name_unique(index);
                self.structural_change();
            }
            EditEvent::Duplicated { index } => {
                if index >= self.entries.len() {
                    return;
                }
                let mut copy = self.entries[index].clone();
                copy.handle = self.alloc_handle();
                // The copy lands before the original; the original keeps
                // its name and the copy gets renamed.
                self.entries.insert(index, copy);
                self.make_name_unique(index);
                self.structural_change();
            }
            EditEvent::Removed { name } => {
                if let Some(pos) = self.entries.iter().position(|e| e.name == name) {
                    self.entries.remove(pos);
                    self.structural_change();
                }
            }
            EditEvent::Renamed { index, name } => {
                if index >= self.entries.len() {
                    return;
                }
                self.entries[index].name = name;
                self.make_name_unique(index);
                self.structural_change();
            }
            EditEvent::Retagged { index, tag } => {
                if index >= self.entries.len() {
                    return;
                }
                self.entries[index].tag = tag;
                // An entry still on its default name picks up the new tag
                // as its name seed.
                self.make_name_unique(index);
                self.structural_change();
            }
            EditEvent::Recolored { index, color } => {
                if index >= self.entries.len() {
                    return;
                }
                self.entries[index].color = color.opaque();
                // Color is not a lookup key; the index stays fresh.
                self.broadcast();
            }
            EditEvent::Cleared => {
                self.entries.clear();
                self.structural_change();
            }
            EditEvent::ParentChanged { parent } => {
                self.parent = if parent == Some(self.id) { None } else { parent };
                // Parent data is never cached locally, so no dirty flag.
                self.broadcast();
            }
        }
    }

    /// Add a scalar parameter. Structural edit to the param list: the
    /// index goes dirty, but the curve map did not change, so observers
    /// are not notified.
    pub fn add_param(&mut self, tag: impl Into<String>, value: f32) {
        self.params.push(ParamEntry { tag: tag.into(), value });
        self.index.get_mut().mark_dirty();
    }

    /// Remove the parameter whose tag matches. Returns false on a miss.
    pub fn remove_param(&mut self, tag: &str) -> bool {
        match self.params.iter().position(|p| p.tag == tag) {
            Some(pos) => {
                self.params.remove(pos);
                self.index.get_mut().mark_dirty();
                true
            }
            None => false,
        }
    }

    /// Change a parameter's value in place. Not a structural edit: the
    /// tag key is untouched, so the index stays fresh.
    pub fn set_param_value(&mut self, tag: &str, value: f32) -> bool {
        match self.params.iter_mut().find(|p| p.tag == tag) {
            Some(param) => {
                param.value = value;
                true
            }
            None => false,
        }
    }

    fn alloc_handle(&mut self) -> CurveHandle {
        self.next_handle += 1;
        CurveHandle(self.next_handle)
    }

    fn structural_change(&mut self) {
        self.index.get_mut().mark_dirty();
        self.broadcast();
    }

    /// Rewrite the entry's name at `index` so that no other entry in the
    /// set shares it.
    ///
    /// An empty or default-sentinel name is reseeded from the entry's tag
    /// when it has one. A trailing `_<number>` is treated as a counter and
    /// counting continues from it, so re-running the pass on `"Foo_3"`
    /// yields `"Foo_3"` (or the next free `"Foo_<n>"`), never `"Foo_3_1"`.
    fn make_name_unique(&mut self, index: usize) {
        let entry = &self.entries[index];

        let mut working = entry.name.clone();
        if working.is_empty() || working == DEFAULT_CURVE_NAME {
            if !entry.tag.is_empty() {
                working = entry.tag.clone();
            } else {
                working = DEFAULT_CURVE_NAME.to_string();
            }
        }

        // Recover "base_counter" from a numeric suffix
        let (base, mut counter) = match working.rsplit_once('_') {
            Some((left, right)) if !right.is_empty() && right.bytes().all(|b| b.is_ascii_digit()) => {
                match right.parse::<u64>() {
                    Ok(n) => (left.to_string(), n),
                    Err(_) => (working.clone(), 0),
                }
            }
            _ => (working.clone(), 0),
        };

        let taken: Vec<&str> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, e)| e.name.as_str())
            .collect();

        let mut candidate = working;
        while taken.contains(&candidate.as_str()) {
            counter += 1;
            candidate = format!("{}_{}", base, counter);
        }

        self.entries[index].name = candidate;
    }
}

fn edit_kind<C>(event: &EditEvent<C>) -> &'static str {
    match event {
        EditEvent::Added { .. } => "add",
        EditEvent::Duplicated { .. } => "duplicate",
        EditEvent::Removed { .. } => "remove",
        EditEvent::Renamed { .. } => "rename",
        EditEvent::Retagged { .. } => "retag",
        EditEvent::Recolored { .. } => "recolor",
        EditEvent::Cleared => "clear",
        EditEvent::ParentChanged { .. } => "reparent",
    }
}
