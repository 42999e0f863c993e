//! Dense component storage keyed by [`EntityId`].
//!
//! Components live in a packed `Vec<T>` with a parallel `Vec<EntityId>`; an index map
//! resolves an id to its dense slot in O(1). Removal swaps the last element into the
//! hole, so slots are not stable: callers re-resolve by id every tick and never hold a
//! component reference across a step.

// Rapier exposes a much faster HashMap than std's default SipHash one.
use rapier3d::parry::utils::hashmap::HashMap;

use crate::entity::EntityId;
use crate::error::PhysicsError;

#[derive(Debug)]
pub struct ComponentTable<T> {
    ids: Vec<EntityId>,
    items: Vec<T>,
    slots: HashMap<EntityId, usize>,
}

impl<T> Default for ComponentTable<T> {
    fn default() -> Self {
        Self {
            ids: Vec::new(),
            items: Vec::new(),
            slots: HashMap::default(),
        }
    }
}

impl<T> ComponentTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: EntityId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Insert a component for `id`.
    ///
    /// Growth goes through `try_reserve` so allocation failure is reported as
    /// [`PhysicsError::OutOfMemory`] instead of aborting.
    pub fn insert(&mut self, id: EntityId, value: T) -> Result<&mut T, PhysicsError> {
        if self.slots.contains_key(&id) {
            return Err(PhysicsError::DuplicateComponent(id));
        }

        self.ids.try_reserve(1).map_err(|_| PhysicsError::OutOfMemory)?;
        self.items.try_reserve(1).map_err(|_| PhysicsError::OutOfMemory)?;
        self.slots.try_reserve(1).map_err(|_| PhysicsError::OutOfMemory)?;

        let slot = self.items.len();
        self.ids.push(id);
        self.items.push(value);
        self.slots.insert(id, slot);

        Ok(&mut self.items[slot])
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.slots.get(&id).map(|&slot| &self.items[slot])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        match self.slots.get(&id) {
            Some(&slot) => Some(&mut self.items[slot]),
            None => None,
        }
    }

    /// Remove and return the component for `id`, if any.
    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        let slot = self.slots.remove(&id)?;
        let last = self.items.len() - 1;

        self.ids.swap_remove(slot);
        let value = self.items.swap_remove(slot);

        // The former last element now lives in `slot`.
        if slot != last {
            let moved = self.ids[slot];
            self.slots.insert(moved, slot);
        }

        Some(value)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.items.clear();
        self.slots.clear();
    }

    /// Ids in dense (slot) order.
    #[inline]
    pub fn ids(&self) -> &[EntityId] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.ids.iter().copied().zip(self.items.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        self.ids.iter().copied().zip(self.items.iter_mut())
    }
}
