// world.rs - ECS World owning the entity registry and every component store

use crate::ecs::{Component, ComponentKind, Components, Entity, EntityBuilder, EntityRegistry, Name};
use crate::error::Result;

/// The main ECS world containing all entities and components.
///
/// A component only ever exists for a live entity: inserts on dead ids are
/// rejected and despawn purges every kind before freeing the slot.
#[derive(Debug, Default)]
pub struct World {
    entities: EntityRegistry,
    pub(crate) components: Components,
}

impl World {
    /// Create a new empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a world that holds at most `max_entities` live entities.
    pub fn with_capacity(max_entities: u32) -> Self {
        Self {
            entities: EntityRegistry::with_capacity(max_entities),
            components: Components::default(),
        }
    }

    /// Spawn an entity with no components.
    pub fn spawn(&mut self) -> Result<Entity> {
        let entity = self.entities.spawn()?;
        tracing::trace!(%entity, "spawned entity");
        Ok(entity)
    }

    /// Spawn an entity and attach components to it through the returned builder.
    ///
    /// ```ignore
    /// let player = world
    ///     .build_entity()?
    ///     .with(Transform::default())
    ///     .with(Name::new("player"))
    ///     .id();
    /// ```
    pub fn build_entity(&mut self) -> Result<EntityBuilder<'_>> {
        let entity = self.spawn()?;
        Ok(EntityBuilder::new(self, entity))
    }

    /// Despawn an entity and drop all of its components.
    ///
    /// The entity leaves its parent's [`Children`](crate::ecs::Children) and
    /// its own children become roots; see [`World::despawn_recursive`].
    pub fn despawn(&mut self, entity: Entity) -> Result<()> {
        self.entities.ensure_alive(entity)?;
        self.detach_hierarchy(entity);
        self.components.purge(entity);
        self.entities.despawn(entity)?;
        tracing::trace!(%entity, "despawned entity");
        Ok(())
    }

    #[inline]
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    /// Attach `component` to `entity`, returning the value it replaced.
    pub fn insert<C: Component>(&mut self, entity: Entity, component: C) -> Result<Option<C>> {
        self.entities.ensure_alive(entity)?;
        Ok(C::store_mut(&mut self.components).insert(entity, component))
    }

    /// Borrow the `C` component of a live entity.
    pub fn get<C: Component>(&self, entity: Entity) -> Result<Option<&C>> {
        self.entities.ensure_alive(entity)?;
        Ok(C::store(&self.components).get(entity))
    }

    pub fn get_mut<C: Component>(&mut self, entity: Entity) -> Result<Option<&mut C>> {
        self.entities.ensure_alive(entity)?;
        Ok(C::store_mut(&mut self.components).get_mut(entity))
    }

    /// Detach and return the `C` component of a live entity.
    pub fn remove<C: Component>(&mut self, entity: Entity) -> Result<Option<C>> {
        self.entities.ensure_alive(entity)?;
        Ok(C::store_mut(&mut self.components).remove(entity))
    }

    /// Whether a live `entity` holds a `C`. Dead ids never do.
    pub fn has<C: Component>(&self, entity: Entity) -> bool {
        C::store(&self.components).contains(entity)
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Live entities in ascending slot order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter()
    }

    /// Kinds attached to `entity`, in declaration order.
    pub fn kinds_of(&self, entity: Entity) -> Result<Vec<ComponentKind>> {
        self.entities.ensure_alive(entity)?;
        Ok(self.components.kinds_of(entity))
    }

    /// First entity (lowest slot) whose [`Name`] equals `name`.
    pub fn find_by_name(&self, name: &str) -> Option<Entity> {
        self.query::<Name>()
            .find(|(_, n)| n.as_str() == name)
            .map(|(entity, _)| entity)
    }

    /// Total number of component values across all kinds.
    pub fn component_count(&self) -> usize {
        self.components.total()
    }

    /// Despawn every entity. Handles issued before the call stay stale.
    pub fn clear(&mut self) {
        let count = self.entities.len();
        self.components.clear();
        self.entities.clear();
        tracing::debug!(count, "cleared world");
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.entities
    }
}

/// Spawn an entity with the given components.
///
/// Expands to a `Result<Entity>`.
#[macro_export]
macro_rules! spawn {
    ($world:expr $(, $component:expr)* $(,)?) => {
        $world.build_entity().map(|builder| builder $(.with($component))* .id())
    };
}
