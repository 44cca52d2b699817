//! Entity handle with generational index
//!
//! Entities are lightweight handles (8 bytes) that reference data in the World.
//! The generation counter prevents use-after-free bugs.

use std::fmt;

/// Entity handle (generation-indexed for safety)
///
/// Bits: [32-bit generation | 32-bit index], generation in the high half
/// - Index: Slot in the entity registry
/// - Generation: Incremented on entity destruction (prevents use-after-free)
///
/// Example:
/// ```ignore
/// let entity = world.spawn()?;
/// world.despawn(entity)?;
/// // entity handle is now invalid (generation mismatch)
/// assert!(!world.is_alive(entity));
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity {
    index: u32,
    generation: u32,
}

impl Entity {
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Serialize to 64-bit integer (for the engine boundary and save files)
    pub fn to_bits(&self) -> u64 {
        ((self.generation as u64) << 32) | (self.index as u64)
    }

    /// Deserialize from 64-bit integer
    pub fn from_bits(bits: u64) -> Self {
        Self {
            index: bits as u32,
            generation: (bits >> 32) as u32,
        }
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({}v{})", self.index, self.generation)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_round_trip_keeps_generation_high() {
        let entity = Entity::new(7, 3);
        let bits = entity.to_bits();
        assert_eq!(bits, (3u64 << 32) | 7);
        assert_eq!(Entity::from_bits(bits), entity);
    }

    #[test]
    fn formats_index_and_generation() {
        let entity = Entity::new(12, 1);
        assert_eq!(entity.to_string(), "12v1");
        assert_eq!(format!("{entity:?}"), "Entity(12v1)");
    }

    #[test]
    fn ordering_is_by_slot_first() {
        assert!(Entity::new(1, 9) < Entity::new(2, 0));
    }
}
