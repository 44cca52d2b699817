//! Entity allocation with generation tracking
//!
//! - Free list for reusing entity slots
//! - Generation counter prevents use-after-free
//! - O(1) spawn, despawn and liveness checks

use crate::ecs::Entity;
use crate::error::{Error, Result};

/// Generation at which a slot is retired instead of recycled, so a wrapped
/// counter can never alias a handle from the slot's first life.
const RETIRED_GENERATION: u32 = u32::MAX;

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    alive: bool,
}

/// Allocates and recycles entity identities.
#[derive(Debug, Clone)]
pub struct EntityRegistry {
    slots: Vec<Slot>,
    free: Vec<u32>,
    alive: usize,
    capacity: u32,
}

impl EntityRegistry {
    /// Create a registry bounded only by the 32-bit index space.
    pub fn new() -> Self {
        Self::with_capacity(u32::MAX)
    }

    /// Create a registry that refuses to hold more than `capacity` live entities.
    pub fn with_capacity(capacity: u32) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            alive: 0,
            capacity,
        }
    }

    /// Allocate a fresh entity id, reusing a freed slot when one is available.
    ///
    /// Fails with [`Error::ResourceExhausted`] once `capacity` entities are live
    /// or the index space is saturated.
    pub fn spawn(&mut self) -> Result<Entity> {
        if self.alive >= self.capacity as usize {
            return Err(self.exhausted());
        }

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.alive = true;
            self.alive += 1;
            return Ok(Entity::new(index, slot.generation));
        }

        let index = u32::try_from(self.slots.len()).map_err(|_| self.exhausted())?;
        if index == u32::MAX {
            return Err(self.exhausted());
        }
        self.slots.push(Slot {
            generation: 0,
            alive: true,
        });
        self.alive += 1;
        Ok(Entity::new(index, 0))
    }

    /// Free the entity's slot and bump its generation.
    ///
    /// A stale or never-allocated id fails with [`Error::InvalidHandle`], so a
    /// second despawn of the same handle is always detected.
    pub fn despawn(&mut self, entity: Entity) -> Result<()> {
        if !self.is_alive(entity) {
            return Err(Error::InvalidHandle { entity });
        }

        self.release(entity.index());
        Ok(())
    }

    /// Mark a live slot free. The caller has checked liveness.
    fn release(&mut self, index: u32) {
        let slot = &mut self.slots[index as usize];
        debug_assert!(slot.alive, "releasing a free slot");
        slot.alive = false;
        slot.generation = slot.generation.saturating_add(1);
        if slot.generation != RETIRED_GENERATION {
            self.free.push(index);
        }
        self.alive -= 1;
    }

    #[inline]
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.slots
            .get(entity.index() as usize)
            .is_some_and(|slot| slot.alive && slot.generation == entity.generation())
    }

    /// Return [`Error::InvalidHandle`] unless `entity` is live.
    #[inline]
    pub fn ensure_alive(&self, entity: Entity) -> Result<()> {
        if self.is_alive(entity) {
            Ok(())
        } else {
            Err(Error::InvalidHandle { entity })
        }
    }

    /// Number of live entities.
    #[inline]
    pub fn len(&self) -> usize {
        self.alive
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.alive == 0
    }

    /// Maximum number of simultaneously live entities.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Number of slots ever allocated (live, free and retired).
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Live entities in ascending slot order.
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.alive)
            .map(|(index, slot)| Entity::new(index as u32, slot.generation))
    }

    /// Despawn every live entity. Outstanding handles stay stale afterwards.
    pub fn clear(&mut self) {
        let live: Vec<u32> = self.iter().map(|entity| entity.index()).collect();
        for index in live {
            self.release(index);
        }
    }

    fn exhausted(&self) -> Error {
        Error::ResourceExhausted {
            resource: "entity ids",
            capacity: u64::from(self.capacity),
        }
    }
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn despawned_slot_is_reused_with_bumped_generation() {
        let mut registry = EntityRegistry::new();
        let first = registry.spawn().unwrap();
        registry.despawn(first).unwrap();

        let second = registry.spawn().unwrap();
        assert_eq!(second.index(), first.index());
        assert_eq!(second.generation(), first.generation() + 1);
        assert!(!registry.is_alive(first));
        assert!(registry.is_alive(second));
    }

    #[test]
    fn double_despawn_is_rejected() {
        let mut registry = EntityRegistry::new();
        let entity = registry.spawn().unwrap();
        registry.despawn(entity).unwrap();

        let err = registry.despawn(entity).unwrap_err();
        assert!(matches!(err, Error::InvalidHandle { entity: e } if e == entity));
    }

    #[test]
    fn never_allocated_ids_are_dead() {
        let registry = EntityRegistry::new();
        assert!(!registry.is_alive(Entity::new(0, 0)));
        assert!(registry.ensure_alive(Entity::new(42, 0)).is_err());
    }

    #[test]
    fn capacity_limit_reports_exhaustion() {
        let mut registry = EntityRegistry::with_capacity(2);
        let a = registry.spawn().unwrap();
        registry.spawn().unwrap();

        let err = registry.spawn().unwrap_err();
        assert!(matches!(
            err,
            Error::ResourceExhausted { capacity: 2, .. }
        ));

        // Freeing one makes room again.
        registry.despawn(a).unwrap();
        assert!(registry.spawn().is_ok());
    }

    #[test]
    fn retired_slots_are_not_recycled() {
        let mut registry = EntityRegistry::new();
        let entity = registry.spawn().unwrap();
        registry.slots[0].generation = RETIRED_GENERATION - 1;
        let entity = Entity::new(entity.index(), RETIRED_GENERATION - 1);

        registry.despawn(entity).unwrap();
        let next = registry.spawn().unwrap();
        assert_eq!(next.index(), 1);
        assert_eq!(registry.slot_count(), 2);
    }

    #[test]
    fn iter_and_clear() {
        let mut registry = EntityRegistry::new();
        let ids: Vec<Entity> = (0..4).map(|_| registry.spawn().unwrap()).collect();
        registry.despawn(ids[1]).unwrap();

        let live: Vec<Entity> = registry.iter().collect();
        assert_eq!(live, vec![ids[0], ids[2], ids[3]]);

        registry.clear();
        assert!(registry.is_empty());
        assert!(ids.iter().all(|id| !registry.is_alive(*id)));
    }

    #[test]
    fn clear_frees_every_slot_for_reuse() {
        let mut registry = EntityRegistry::with_capacity(3);
        let ids: Vec<Entity> = (0..3).map(|_| registry.spawn().unwrap()).collect();
        registry.clear();

        let reused: Vec<Entity> = (0..3).map(|_| registry.spawn().unwrap()).collect();
        assert_eq!(registry.slot_count(), 3);
        assert!(reused.iter().all(|entity| entity.generation() == 1));
        assert!(ids.iter().all(|id| !registry.is_alive(*id)));
        assert!(registry.spawn().is_err());
    }
}
