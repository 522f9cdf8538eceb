//! In-memory store of the records currently known to a view.

use std::collections::BTreeSet;

use crate::domain::Record;

/// Ordered records as returned by the backend.
///
/// Uniqueness of ids is trusted to the server; patch operations act on every
/// entry carrying the id.
#[derive(Clone, Debug)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Record> Collection<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn ids(&self) -> Vec<T::Id> {
        self.items.iter().map(T::id).collect()
    }

    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Replaces the whole collection with a fresh fetch result.
    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Swaps the entry with the same id for `item`. Returns `false` when the
    /// id is not present.
    pub fn replace(&mut self, item: T) -> bool {
        let id = item.id();
        match self.items.iter_mut().find(|existing| existing.id() == id) {
            Some(existing) => {
                *existing = item;
                true
            }
            None => false,
        }
    }

    /// Applies `f` to the entry with the given id in place.
    pub fn update<F>(&mut self, id: T::Id, f: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        match self.items.iter_mut().find(|existing| existing.id() == id) {
            Some(existing) => {
                f(existing);
                true
            }
            None => false,
        }
    }

    /// Drops every entry whose id is in `ids`, returning how many were removed.
    pub fn remove_ids(&mut self, ids: &[T::Id]) -> usize {
        let ids: BTreeSet<T::Id> = ids.iter().copied().collect();
        let before = self.items.len();
        self.items.retain(|item| !ids.contains(&item.id()));
        before - self.items.len()
    }
}
