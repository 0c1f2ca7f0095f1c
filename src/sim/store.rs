//! Insertion-ordered entity collections
//!
//! Removal during a pass is mark-and-compact: [`EntityStore::kill`] marks an
//! entity, every iterator skips marked entities, and [`EntityStore::sweep`]
//! compacts the collection once the pass is over. Nothing is resized while a
//! pass walks the collection forward.

use glam::Vec3;
use serde::Serialize;

use super::collision::within;
use super::entities::{Entity, EntityId};

#[derive(Debug, Clone, Serialize)]
pub struct EntityStore<T> {
    items: Vec<T>,
    /// Entities marked for removal at the next sweep
    #[serde(skip)]
    doomed: Vec<EntityId>,
}

impl<T> Default for EntityStore<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            doomed: Vec::new(),
        }
    }
}

impl<T: Entity> EntityStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity (iterated after everything already stored)
    pub fn add(&mut self, item: T) {
        self.items.push(item);
    }

    /// Number of live (unmarked) entities
    pub fn len(&self) -> usize {
        self.items.len() - self.doomed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        !self.doomed.contains(&id) && self.items.iter().any(|e| e.id() == id)
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.iter().find(|e| e.id() == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.iter_mut().find(|e| e.id() == id)
    }

    /// Live entities in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let doomed = &self.doomed;
        self.items.iter().filter(move |e| !doomed.contains(&e.id()))
    }

    /// Live entities in insertion order, mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        let doomed = &self.doomed;
        self.items.iter_mut().filter(move |e| !doomed.contains(&e.id()))
    }

    /// Visit every live entity
    pub fn for_each_alive(&mut self, mut f: impl FnMut(&mut T)) {
        for item in self.iter_mut() {
            f(item);
        }
    }

    /// Mark an entity for removal. Returns false if it is unknown or already marked.
    pub fn kill(&mut self, id: EntityId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        self.doomed.push(id);
        true
    }

    /// Drop every marked entity, preserving the order of the rest
    pub fn sweep(&mut self) -> usize {
        if self.doomed.is_empty() {
            return 0;
        }
        let before = self.items.len();
        let doomed = std::mem::take(&mut self.doomed);
        self.items.retain(|e| !doomed.contains(&e.id()));
        before - self.items.len()
    }

    /// Remove the entity at `index` immediately (None when out of range)
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        if index >= self.items.len() {
            return None;
        }
        let item = self.items.remove(index);
        self.doomed.retain(|id| *id != item.id());
        Some(item)
    }

    /// Remove an entity immediately. Unknown IDs are skipped silently.
    pub fn remove_by_id(&mut self, id: EntityId) -> Option<T> {
        let index = self.items.iter().position(|e| e.id() == id)?;
        self.remove_at(index)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.doomed.clear();
    }

    /// First live entity (in insertion order) strictly within `radius` of `pos`
    pub fn first_within(&self, pos: Vec3, radius: f32) -> Option<&T> {
        self.iter().find(|e| within(pos, e.position(), radius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::Wormhole;

    fn store_of(n: u32) -> EntityStore<Wormhole> {
        let mut store = EntityStore::new();
        for i in 0..n {
            store.add(Wormhole {
                id: EntityId(i),
                position: Vec3::new(i as f32, 0.0, 0.0),
            });
        }
        store
    }

    #[test]
    fn test_kill_during_pass_does_not_skip() {
        let mut store = store_of(5);
        let mut visited = Vec::new();
        let ids: Vec<EntityId> = store.iter().map(|w| w.id).collect();
        for id in ids {
            visited.push(id);
            if id.0 % 2 == 0 {
                store.kill(id);
            }
        }
        assert_eq!(visited.len(), 5);
        assert_eq!(store.len(), 2);

        assert_eq!(store.sweep(), 3);
        let left: Vec<u32> = store.iter().map(|w| w.id.0).collect();
        assert_eq!(left, vec![1, 3]);
    }

    #[test]
    fn test_killed_entities_are_hidden_before_sweep() {
        let mut store = store_of(3);
        assert!(store.kill(EntityId(1)));
        assert!(!store.kill(EntityId(1)));
        assert!(!store.is_alive(EntityId(1)));
        assert!(store.get(EntityId(1)).is_none());
        assert_eq!(store.iter().count(), 2);
    }

    #[test]
    fn test_first_within_skips_marked_and_prefers_earliest() {
        // Wormholes sit at x = 0, 1, 2, 3
        let mut store = store_of(4);
        let hit = store.first_within(Vec3::new(1.4, 0.0, 0.0), 1.0).map(|w| w.id);
        assert_eq!(hit, Some(EntityId(1)));

        store.kill(EntityId(1));
        let hit = store.first_within(Vec3::new(1.4, 0.0, 0.0), 1.0).map(|w| w.id);
        assert_eq!(hit, Some(EntityId(2)));
        assert!(store.first_within(Vec3::new(20.0, 0.0, 0.0), 1.0).is_none());
    }

    #[test]
    fn test_remove_missing_is_silent() {
        let mut store = store_of(2);
        assert!(store.remove_by_id(EntityId(9)).is_none());
        assert!(store.remove_at(7).is_none());
        assert!(!store.kill(EntityId(9)));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_remove_by_id_clears_mark() {
        let mut store = store_of(3);
        store.kill(EntityId(2));
        let removed = store.remove_by_id(EntityId(2)).unwrap();
        assert_eq!(removed.id, EntityId(2));
        assert_eq!(store.len(), 2);
        assert_eq!(store.sweep(), 0);
    }

    #[test]
    fn test_insertion_order_is_stable() {
        let mut store = store_of(4);
        store.remove_at(0);
        store.add(Wormhole {
            id: EntityId(10),
            position: Vec3::ZERO,
        });
        let order: Vec<u32> = store.iter().map(|w| w.id.0).collect();
        assert_eq!(order, vec![1, 2, 3, 10]);
    }
}
