// query.rs - Component iteration over one or more kinds
//
// Every query yields entities in ascending slot order. Multi-kind queries
// walk the stores slot by slot up to the shortest span, letting the store
// with fewer values decide which slots are worth probing.

use crate::ecs::{Component, Entity, World};
use std::any::TypeId;

impl World {
    /// `(entity, &A)` for every entity holding an `A`.
    pub fn query<A: Component>(&self) -> impl Iterator<Item = (Entity, &A)> + '_ {
        A::store(&self.components).iter()
    }

    /// Entities holding both an `A` and a `B`.
    pub fn query2<A: Component, B: Component>(&self) -> impl Iterator<Item = (Entity, &A, &B)> + '_ {
        let a = A::store(&self.components);
        let b = B::store(&self.components);
        let drive_with_a = a.len() <= b.len();
        let span = a.span().min(b.span());

        (0..span).filter_map(move |slot| {
            if drive_with_a {
                let (entity, va) = a.at(slot)?;
                Some((entity, va, b.get(entity)?))
            } else {
                let (entity, vb) = b.at(slot)?;
                Some((entity, a.get(entity)?, vb))
            }
        })
    }

    /// Entities holding an `A`, a `B` and a `C`.
    pub fn query3<A: Component, B: Component, C: Component>(
        &self,
    ) -> impl Iterator<Item = (Entity, &A, &B, &C)> + '_ {
        let a = A::store(&self.components);
        let b = B::store(&self.components);
        let c = C::store(&self.components);
        let span = a.span().min(b.span()).min(c.span());

        (0..span).filter_map(move |slot| {
            let (entity, va) = a.at(slot)?;
            Some((entity, va, b.get(entity)?, c.get(entity)?))
        })
    }

    /// Mutate every `A` in place.
    pub fn for_each_mut<A: Component>(&mut self, mut f: impl FnMut(Entity, &mut A)) {
        for (entity, value) in A::store_mut(&mut self.components).iter_mut() {
            f(entity, value);
        }
    }

    /// Mutate every `A` of entities that also hold a `B`, reading the `B`.
    ///
    /// `A` and `B` must be different kinds; asking for the same kind twice
    /// visits nothing.
    pub fn for_each2_mut<A: Component, B: Component>(&mut self, mut f: impl FnMut(Entity, &mut A, &B)) {
        if TypeId::of::<A>() == TypeId::of::<B>() {
            let kind = A::KIND;
            tracing::warn!(%kind, "for_each2_mut called with the same kind twice");
            return;
        }

        // B is moved out for the duration of the walk so A can be borrowed
        // mutably from the same aggregate.
        let readonly = std::mem::take(B::store_mut(&mut self.components));
        for (entity, value) in A::store_mut(&mut self.components).iter_mut() {
            if let Some(other) = readonly.get(entity) {
                f(entity, value, other);
            }
        }
        *B::store_mut(&mut self.components) = readonly;
    }
}
