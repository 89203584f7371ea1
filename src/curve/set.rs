//! The curve set: an ordered collection of named curves plus parameters.
//!
//! A set owns its entries and its (lazily rebuilt) lookup index, and holds a
//! weak link to an optional parent set by [`SetId`]. It never owns the
//! parent; resolving through the parent chain goes via the
//! [`CurveLibrary`] that owns every set.
//!
//! [`CurveLibrary`]: super::CurveLibrary

use std::cell::RefCell;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::Color;

use super::entry::{Curve, CurveEntry, CurveHandle, ParamEntry};
use super::index::LookupIndex;
use super::library::SetId;

/// Identity of a registered curve-map-changed observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type ObserverFn = Box<dyn FnMut(SetId)>;

/// An ordered collection of named, tagged, colored curves and scalar
/// parameters, with an optional parent set consulted when a local tag
/// lookup misses.
///
/// All mutation goes through the edit surface ([`apply_edit`] and the
/// param-list methods); queries take `&self` and rebuild the lookup index
/// behind a `RefCell` when it is dirty. The host drives everything from one
/// thread, so no locking is involved.
///
/// [`apply_edit`]: CurveSet::apply_edit
#[derive(Serialize, Deserialize)]
pub struct CurveSet<C: Curve> {
    pub(crate) id: SetId,
    pub(crate) entries: Vec<CurveEntry<C>>,
    pub(crate) params: Vec<ParamEntry>,
    pub(crate) parent: Option<SetId>,
    /// Monotonic source for entry handles; never reset so handles are not reused.
    pub(crate) next_handle: u64,
    #[serde(skip)]
    pub(crate) index: RefCell<LookupIndex>,
    #[serde(skip)]
    pub(crate) observers: Vec<(ObserverId, ObserverFn)>,
    #[serde(skip)]
    pub(crate) next_observer: u64,
}

impl<C: Curve> CurveSet<C> {
    pub(crate) fn new(id: SetId) -> Self {
        Self {
            id,
            entries: Vec::new(),
            params: Vec::new(),
            parent: None,
            next_handle: 0,
            index: RefCell::new(LookupIndex::default()),
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    pub fn id(&self) -> SetId {
        self.id
    }

    pub fn parent(&self) -> Option<SetId> {
        self.parent
    }

    /// Number of curve entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Curve entries in insertion order.
    pub fn entries(&self) -> &[CurveEntry<C>] {
        &self.entries
    }

    /// Parameter entries in insertion order.
    pub fn params(&self) -> &[ParamEntry] {
        &self.params
    }

    /// Curve names in insertion order.
    pub fn curve_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// The "list of editable curves" surface: `(name, handle, curve)` per entry.
    pub fn curves(&self) -> impl Iterator<Item = (&str, CurveHandle, &C)> {
        self.entries.iter().map(|e| (e.name.as_str(), e.handle, &e.curve))
    }

    /// Mutable variant of [`curves`](CurveSet::curves), for curve-editing UI.
    ///
    /// Only the curve value is handed out mutably. Reshaping a curve changes
    /// no lookup key, so the index stays fresh.
    pub fn curves_mut(&mut self) -> impl Iterator<Item = (&str, CurveHandle, &mut C)> {
        self.entries.iter_mut().map(|entry| {
            let CurveEntry { name, handle, curve, .. } = entry;
            (name.as_str(), *handle, curve)
        })
    }

    /// True iff `handle` identifies a live entry in this set.
    pub fn is_valid_handle(&self, handle: CurveHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    /// The entry's display color, or white for an unknown handle.
    pub fn color_of(&self, handle: CurveHandle) -> Color {
        self.entries
            .iter()
            .find(|e| e.handle == handle)
            .map(|e| e.color)
            .unwrap_or(Color::WHITE)
    }

    /// Structural equality over curve shapes only.
    ///
    /// Two sets compare equal when they hold the same number of entries and
    /// each pair of entries at the same position has equal curves. Names,
    /// tags and colors are NOT compared: two sets with identical curve data
    /// but different labels are equal. Long-standing behavior that callers
    /// rely on; do not tighten.
    pub fn curves_equal(&self, other: &CurveSet<C>) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(&other.entries)
                .all(|(a, b)| a.curve == b.curve)
    }

    /// Register an observer for the curve-map-changed event.
    ///
    /// Observers fire synchronously, in registration order, after every
    /// completed structural edit, receiving the id of the edited set.
    pub fn observe(&mut self, callback: impl FnMut(SetId) + 'static) -> ObserverId {
        self.next_observer += 1;
        let id = ObserverId(self.next_observer);
        self.observers.push((id, Box::new(callback)));
        id
    }

    /// Remove a registered observer. Returns false if it was not registered.
    pub fn unobserve(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer, _)| *observer != id);
        self.observers.len() != before
    }

    pub(crate) fn broadcast(&mut self) {
        let id = self.id;
        for (_, callback) in &mut self.observers {
            callback(id);
        }
    }

    /// Run `f` against a freshly rebuilt index.
    ///
    /// This is the read-through contract: every query lands here first, so
    /// lookups always see a fully scanned snapshot of the current lists.
    pub(crate) fn with_index<R>(&self, f: impl FnOnce(&LookupIndex) -> R) -> R {
        let mut index = self.index.borrow_mut();
        index.ensure_fresh(&self.entries, &self.params);
        f(&*index)
    }
}

impl<C: Curve + fmt::Debug> fmt::Debug for CurveSet<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurveSet")
            .field("id", &self.id)
            .field("entries", &self.entries)
            .field("params", &self.params)
            .field("parent", &self.parent)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::curve::test_support::{set_with_curves, ConstCurve};
    use crate::curve::{CurveLibrary, EditEvent};

    #[test]
    fn test_handles_stay_valid_until_removal() {
        let (mut library, id) = set_with_curves(&[("Jump", "", 1.0), ("Fall", "", 2.0)]);
        let set = library.get_mut(id).unwrap();

        let handles: Vec<_> = set.curves().map(|(_, h, _)| h).collect();
        assert!(handles.iter().all(|&h| set.is_valid_handle(h)));

        set.apply_edit(EditEvent::Removed { name: "Jump".to_string() });
        assert!(!set.is_valid_handle(handles[0]));
        assert!(set.is_valid_handle(handles[1]));
    }

    #[test]
    fn test_color_of_unknown_handle_is_white() {
        let (mut library, id) = set_with_curves(&[("Jump", "", 1.0)]);
        let set = library.get_mut(id).unwrap();

        let (_, handle, _) = set.curves().next().unwrap();
        let stale = CurveHandle(handle.0 + 100);
        assert_eq!(set.color_of(stale), Color::WHITE);
        // The live handle reports the entry's own color
        assert_ne!(set.color_of(handle), Color::WHITE);
    }

    #[test]
    fn test_curves_equal_ignores_names_tags_and_colors() {
        let (library_a, a) = set_with_curves(&[("Jump", "Move.Jump", 1.0), ("Fall", "", 2.0)]);
        let (library_b, b) = set_with_curves(&[("Walk", "", 1.0), ("Run", "Move.Run", 2.0)]);

        let a = library_a.get(a).unwrap();
        let b = library_b.get(b).unwrap();
        assert!(a.curves_equal(b));
        assert!(b.curves_equal(a));
    }

    #[test]
    fn test_curves_equal_compares_count_and_shape() {
        let (library_a, a) = set_with_curves(&[("A", "", 1.0), ("B", "", 2.0)]);
        let (library_b, b) = set_with_curves(&[("A", "", 1.0)]);
        let (library_c, c) = set_with_curves(&[("A", "", 1.0), ("B", "", 3.0)]);

        let a = library_a.get(a).unwrap();
        assert!(!a.curves_equal(library_b.get(b).unwrap()));
        assert!(!a.curves_equal(library_c.get(c).unwrap()));
    }

    #[test]
    fn test_curves_mut_reshapes_in_place() {
        let (mut library, id) = set_with_curves(&[("Jump", "", 1.0)]);
        let set = library.get_mut(id).unwrap();

        for (_, _, curve) in set.curves_mut() {
            *curve = ConstCurve(7.0);
        }
        assert_eq!(set.evaluate("Jump", 0.0), 7.0);
    }

    #[test]
    fn test_observers_fire_in_registration_order() {
        let mut library: CurveLibrary<ConstCurve> = CurveLibrary::new();
        let id = library.create_set();
        let set = library.get_mut(id).unwrap();

        let calls = Rc::new(RefCell::new(Vec::new()));
        let first = Rc::clone(&calls);
        let second = Rc::clone(&calls);
        set.observe(move |set_id| first.borrow_mut().push(("first", set_id)));
        set.observe(move |set_id| second.borrow_mut().push(("second", set_id)));

        set.apply_edit(EditEvent::Added { index: 0, curve: ConstCurve(1.0) });

        assert_eq!(calls.borrow().as_slice(), &[("first", id), ("second", id)]);
    }

    #[test]
    fn test_unobserve_stops_delivery() {
        let mut library: CurveLibrary<ConstCurve> = CurveLibrary::new();
        let id = library.create_set();
        let set = library.get_mut(id).unwrap();

        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let observer = set.observe(move |_| *counter.borrow_mut() += 1);

        set.apply_edit(EditEvent::Added { index: 0, curve: ConstCurve(1.0) });
        assert_eq!(*calls.borrow(), 1);

        assert!(set.unobserve(observer));
        assert!(!set.unobserve(observer));
        set.apply_edit(EditEvent::Added { index: 1, curve: ConstCurve(2.0) });
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_serde_round_trip_rebuilds_index_and_keeps_handles() {
        let (mut library, id) = set_with_curves(&[("Jump", "Move.Jump", 4.0)]);
        let set = library.get_mut(id).unwrap();
        set.add_param("Move.Speed", 2.5);

        // Warm the index, then snapshot
        assert_eq!(set.evaluate("Jump", 0.0), 4.0);
        let handles: Vec<_> = set.curves().map(|(_, h, _)| h).collect();

        let text = ron::to_string(&*set).unwrap();
        let restored: CurveSet<ConstCurve> = ron::from_str(&text).unwrap();

        // Derived state is not persisted: the restored index starts dirty
        // and is rebuilt by the first query.
        assert!(restored.index.borrow().is_dirty());
        assert_eq!(restored.evaluate("Jump", 0.0), 4.0);
        assert_eq!(restored.param_by_tag(&library, "Move.Speed"), Some(2.5));

        let restored_handles: Vec<_> = restored.curves().map(|(_, h, _)| h).collect();
        assert_eq!(restored_handles, handles);
    }
}
