// storage.rs - Typed per-kind component storage
//
// One store per component kind. Values live in a slot-indexed arena keyed by
// the entity's registry index; the stored generation guards against a stale
// handle reading a value that belongs to the slot's next occupant.

use crate::ecs::Entity;

#[derive(Debug, Clone)]
struct Stored<T> {
    generation: u32,
    value: T,
}

/// Arena of `T` values indexed by entity slot.
#[derive(Debug, Clone)]
pub struct ComponentStore<T> {
    slots: Vec<Option<Stored<T>>>,
    len: usize,
}

impl<T> ComponentStore<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            len: 0,
        }
    }

    /// Insert or replace the value for `entity`, returning the previous one.
    ///
    /// Liveness is the caller's concern; [`crate::ecs::World::insert`] rejects
    /// dead handles before reaching the store.
    pub fn insert(&mut self, entity: Entity, value: T) -> Option<T> {
        let index = entity.index() as usize;
        if index >= self.slots.len() {
            self.slots.resize_with(index + 1, || None);
        }

        let stored = Stored {
            generation: entity.generation(),
            value,
        };
        match self.slots[index].replace(stored) {
            Some(prev) if prev.generation == entity.generation() => Some(prev.value),
            Some(_) => None,
            None => {
                self.len += 1;
                None
            }
        }
    }

    #[inline]
    pub fn get(&self, entity: Entity) -> Option<&T> {
        match self.slots.get(entity.index() as usize)? {
            Some(stored) if stored.generation == entity.generation() => Some(&stored.value),
            _ => None,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        match self.slots.get_mut(entity.index() as usize)? {
            Some(stored) if stored.generation == entity.generation() => Some(&mut stored.value),
            _ => None,
        }
    }

    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let slot = self.slots.get_mut(entity.index() as usize)?;
        if slot.as_ref()?.generation != entity.generation() {
            return None;
        }
        self.len -= 1;
        slot.take().map(|stored| stored.value)
    }

    #[inline]
    pub fn contains(&self, entity: Entity) -> bool {
        self.get(entity).is_some()
    }

    /// Value stored at `index` together with the entity that owns it.
    #[inline]
    pub(crate) fn at(&self, index: usize) -> Option<(Entity, &T)> {
        let stored = self.slots.get(index)?.as_ref()?;
        Some((Entity::new(index as u32, stored.generation), &stored.value))
    }

    /// Number of slots the store spans (not the number of values).
    #[inline]
    pub(crate) fn span(&self) -> usize {
        self.slots.len()
    }

    /// Number of stored values.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// `(entity, &value)` pairs in ascending slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.as_ref()
                .map(|stored| (Entity::new(index as u32, stored.generation), &stored.value))
        })
    }

    /// `(entity, &mut value)` pairs in ascending slot order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> + '_ {
        self.slots.iter_mut().enumerate().filter_map(|(index, slot)| {
            slot.as_mut().map(|stored| {
                (
                    Entity::new(index as u32, stored.generation),
                    &mut stored.value,
                )
            })
        })
    }

    /// Entities holding a value, ascending.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.iter().map(|(entity, _)| entity)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.len = 0;
    }
}

impl<T> Default for ComponentStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_and_returns_previous() {
        let mut store = ComponentStore::new();
        let e = Entity::new(3, 0);

        assert_eq!(store.insert(e, 1), None);
        assert_eq!(store.insert(e, 2), Some(1));
        assert_eq!(store.get(e), Some(&2));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn stale_generation_does_not_read_new_value() {
        let mut store = ComponentStore::new();
        let old = Entity::new(0, 0);
        let new = Entity::new(0, 1);
        store.insert(new, "fresh");

        assert_eq!(store.get(old), None);
        assert_eq!(store.remove(old), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn overwriting_leftover_from_old_generation_counts_once() {
        let mut store = ComponentStore::new();
        store.insert(Entity::new(0, 0), 'a');
        assert_eq!(store.insert(Entity::new(0, 1), 'b'), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn iterates_in_slot_order() {
        let mut store = ComponentStore::new();
        store.insert(Entity::new(5, 0), 'c');
        store.insert(Entity::new(1, 0), 'a');
        store.insert(Entity::new(3, 2), 'b');

        let values: Vec<char> = store.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec!['a', 'b', 'c']);

        let ids: Vec<u32> = store.entities().map(|e| e.index()).collect();
        assert_eq!(ids, vec![1, 3, 5]);
        assert_eq!(store.span(), 6);
    }

    #[test]
    fn iter_mut_updates_in_place() {
        let mut store = ComponentStore::new();
        store.insert(Entity::new(0, 0), 1);
        store.insert(Entity::new(2, 0), 10);
        for (_, value) in store.iter_mut() {
            *value *= 2;
        }
        assert_eq!(store.get(Entity::new(2, 0)), Some(&20));
    }

    #[test]
    fn remove_and_clear() {
        let mut store = ComponentStore::new();
        let e = Entity::new(0, 0);
        store.insert(e, 5u8);
        assert_eq!(store.remove(e), Some(5));
        assert!(store.is_empty());
        assert_eq!(store.remove(e), None);

        store.insert(e, 6);
        store.clear();
        assert!(!store.contains(e));
    }
}
