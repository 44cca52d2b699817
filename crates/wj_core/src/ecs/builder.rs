use crate::ecs::{Component, Entity, World};

/// Attaches components to a freshly spawned entity.
///
/// Created by [`World::build_entity`]. The entity is live for the builder's
/// whole lifetime, so attaching cannot fail.
pub struct EntityBuilder<'w> {
    world: &'w mut World,
    entity: Entity,
}

impl<'w> EntityBuilder<'w> {
    pub(crate) fn new(world: &'w mut World, entity: Entity) -> Self {
        Self { world, entity }
    }

    /// Attach a component, replacing any earlier value of the same kind.
    pub fn with<C: Component>(self, component: C) -> Self {
        C::store_mut(&mut self.world.components).insert(self.entity, component);
        self
    }

    /// Finish building and return the entity id.
    #[inline]
    pub fn id(self) -> Entity {
        self.entity
    }
}

#[cfg(test)]
mod tests {
    use crate::ecs::{Transform, Velocity, World};
    use crate::math::Vec3;

    #[test]
    fn later_with_replaces_earlier_value() {
        let mut world = World::new();
        let e = world
            .build_entity()
            .unwrap()
            .with(Velocity::linear(Vec3::X))
            .with(Velocity::linear(Vec3::Y))
            .with(Transform::default())
            .id();

        assert_eq!(world.get::<Velocity>(e).unwrap().unwrap().linear, Vec3::Y);
        assert_eq!(world.component_count(), 2);
    }
}
