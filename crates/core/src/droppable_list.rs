//! Ordered, duplicate-free collection of droppables.
//!
//! Insertion order is the iteration order of every grid pass, so it is kept
//! stable: removal shifts later entries down instead of swapping.

use crate::droppable::{Droppable, DroppableId};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DroppableList {
    items: Vec<Droppable>,
}

impl DroppableList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append `droppable`; returns false (and drops nothing) if its identity is already listed.
    pub fn add(&mut self, droppable: Droppable) -> bool {
        if self.contains(droppable.id()) {
            return false;
        }
        self.items.push(droppable);
        true
    }

    /// Remove by identity. Absent identities are a no-op.
    pub fn remove(&mut self, id: DroppableId) -> Option<Droppable> {
        let index = self.position(id)?;
        Some(self.items.remove(index))
    }

    pub fn contains(&self, id: DroppableId) -> bool {
        self.items.iter().any(|d| d.id() == id)
    }

    pub fn position(&self, id: DroppableId) -> Option<usize> {
        self.items.iter().position(|d| d.id() == id)
    }

    pub fn get(&self, id: DroppableId) -> Option<&Droppable> {
        self.items.iter().find(|d| d.id() == id)
    }

    pub fn get_mut(&mut self, id: DroppableId) -> Option<&mut Droppable> {
        self.items.iter_mut().find(|d| d.id() == id)
    }

    pub fn id_at(&self, index: usize) -> Option<DroppableId> {
        self.items.get(index).map(Droppable::id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Droppable> {
        self.items.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Droppable> {
        self.items.iter_mut()
    }

    /// Identities in list order, detached from the list so it can be restructured
    /// while the snapshot is walked.
    pub fn snapshot(&self) -> Vec<DroppableId> {
        self.items.iter().map(Droppable::id).collect()
    }
}

impl<'a> IntoIterator for &'a DroppableList {
    type Item = &'a Droppable;
    type IntoIter = std::slice::Iter<'a, Droppable>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
