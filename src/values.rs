//! Dense value storage indexed by term id.

use parking_lot::{RwLock, RwLockReadGuard};
use termtrie::TermId;
use tracing::trace;

/// Values attached to terms, one slot per [`TermId`].
///
/// Slots that were never written read as `None`. The store only grows: a
/// write past the end extends it with empty slots, and nothing ever shrinks
/// it, matching the trie's never-reused ids.
///
/// Every [`crate::MapNode`] and [`crate::Entry`] reads and writes through the
/// same store, so a write through one is visible through all of them.
pub struct ValueStore<V> {
    slots: RwLock<Vec<Option<V>>>,
}

impl<V> ValueStore<V> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty store with room for `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: RwLock::new(Vec::with_capacity(capacity)),
        }
    }

    /// Create a store from slots in id order.
    pub fn from_vec(slots: Vec<Option<V>>) -> Self {
        Self {
            slots: RwLock::new(slots),
        }
    }

    /// Take the slots out, in id order.
    pub fn into_vec(self) -> Vec<Option<V>> {
        self.slots.into_inner()
    }

    /// Number of allocated slots (not the number of values present).
    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    /// Returns true if no slot has been allocated.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Store `value` for `id`, returning the previous value.
    pub fn set(&self, id: TermId, value: V) -> Option<V> {
        self.slot_mut(id, |slot| slot.replace(value))
    }

    /// Clear the value for `id`, returning it. The slot stays allocated.
    pub fn remove(&self, id: TermId) -> Option<V> {
        let mut slots = self.slots.write();
        slots.get_mut(id.index()).and_then(Option::take)
    }

    /// Read-locked view of all slots. Holding it blocks every write.
    pub(crate) fn slots(&self) -> RwLockReadGuard<'_, Vec<Option<V>>> {
        self.slots.read()
    }

    fn slot_mut<R>(&self, id: TermId, f: impl FnOnce(&mut Option<V>) -> R) -> R {
        let mut slots = self.slots.write();
        let idx = id.index();
        if idx >= slots.len() {
            trace!(from = slots.len(), to = idx + 1, "growing value store");
            slots.resize_with(idx + 1, || None);
        }
        f(&mut slots[idx])
    }
}

impl<V: Clone> ValueStore<V> {
    /// Value for `id`, if one was stored.
    pub fn get(&self, id: TermId) -> Option<V> {
        self.slots.read().get(id.index()).cloned().flatten()
    }
}

impl<V> Default for ValueStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: std::fmt::Debug> std::fmt::Debug for ValueStore<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.slots.read().iter()).finish()
    }
}
