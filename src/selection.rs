//! Checked rows for bulk actions.

use std::collections::BTreeSet;

use crate::collection::Collection;
use crate::domain::Record;

/// Identifiers marked for a bulk operation.
///
/// Ids of records that disappear on refresh are not pruned; callers only act
/// on the selection relative to the current collection.
#[derive(Clone, Debug)]
pub struct SelectionSet<Id> {
    ids: BTreeSet<Id>,
}

impl<Id> Default for SelectionSet<Id> {
    fn default() -> Self {
        Self {
            ids: BTreeSet::new(),
        }
    }
}

impl<Id: Copy + Ord> SelectionSet<Id> {
    /// Flips the checked state of `id`. Returns the new state.
    pub fn toggle(&mut self, id: Id) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn contains(&self, id: Id) -> bool {
        self.ids.contains(&id)
    }

    /// Checks every record of the collection, replacing the previous
    /// selection.
    pub fn select_all<T>(&mut self, collection: &Collection<T>)
    where
        T: Record<Id = Id>,
    {
        self.ids = collection.ids().into_iter().collect();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn remove(&mut self, ids: &[Id]) {
        for id in ids {
            self.ids.remove(id);
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in ascending order.
    pub fn ids(&self) -> Vec<Id> {
        self.ids.iter().copied().collect()
    }

    /// Header checkbox state: every record of a non-empty collection is
    /// checked.
    pub fn is_all_selected<T>(&self, collection: &Collection<T>) -> bool
    where
        T: Record<Id = Id>,
    {
        !collection.is_empty() && collection.ids().iter().all(|id| self.ids.contains(id))
    }
}
