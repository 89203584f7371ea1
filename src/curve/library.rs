//! Registry of curve sets.
//!
//! The library owns every [`CurveSet`]; parent links between sets are
//! plain [`SetId`]s into it. That keeps the parent reference non-owning: a
//! set never extends its parent's lifetime, and a parent that has been
//! removed simply stops answering (lookups treat the dangling id as "no
//! parent").

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::entry::Curve;
use super::set::CurveSet;

/// Stable identity of a curve set within its library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SetId(pub(crate) u64);

/// Owns curve sets and hands out ids for cross-set references.
#[derive(Debug, Serialize, Deserialize)]
pub struct CurveLibrary<C: Curve> {
    sets: HashMap<SetId, CurveSet<C>>,
    next_id: u64,
}

impl<C: Curve> CurveLibrary<C> {
    pub fn new() -> Self {
        Self { sets: HashMap::new(), next_id: 0 }
    }

    /// Create an empty set and return its id.
    pub fn create_set(&mut self) -> SetId {
        self.next_id += 1;
        let id = SetId(self.next_id);
        self.sets.insert(id, CurveSet::new(id));
        id
    }

    /// Remove a set. Children pointing at it keep their dangling parent
    /// id, which query walks treat as unset.
    pub fn remove_set(&mut self, id: SetId) -> Option<CurveSet<C>> {
        self.sets.remove(&id)
    }

    pub fn get(&self, id: SetId) -> Option<&CurveSet<C>> {
        self.sets.get(&id)
    }

    pub fn get_mut(&mut self, id: SetId) -> Option<&mut CurveSet<C>> {
        self.sets.get_mut(&id)
    }

    pub fn contains(&self, id: SetId) -> bool {
        self.sets.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SetId, &CurveSet<C>)> {
        self.sets.iter().map(|(id, set)| (*id, set))
    }

    /// Tag lookup on the set with the given id. `None` for an unknown id.
    pub fn value_by_tag(
        &self,
        id: SetId,
        tag: &str,
        time: f32,
        allow_param_fallback: bool,
    ) -> Option<f32> {
        self.get(id)?.value_by_tag(self, tag, time, allow_param_fallback)
    }

    /// Param lookup on the set with the given id. `None` for an unknown id.
    pub fn param_by_tag(&self, id: SetId, tag: &str) -> Option<f32> {
        self.get(id)?.param_by_tag(self, tag)
    }
}

impl<C: Curve> Default for CurveLibrary<C> {
    fn default() -> Self {
        Self::new()
    }
}
