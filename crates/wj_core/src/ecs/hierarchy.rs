// hierarchy.rs - Parent/child links and world-matrix propagation
//
// A link is stored on both ends: the child holds `Parent`, the parent holds
// `Children`. Only the functions here edit either end. Roots are entities
// with a `Transform` and no `Parent`; a node without a `Transform` cuts its
// subtree off from propagation.

use crate::ecs::{
    Children, Component, Entity, GlobalTransform, Parent, System, SystemContext, Transform, World,
};
use crate::error::{Error, Result};
use crate::math::Mat4;

impl World {
    /// Attach `child` under `parent`, detaching it from any previous parent.
    ///
    /// Fails with [`Error::HierarchyCycle`] when `parent` is `child` itself
    /// or one of its descendants.
    pub fn set_parent(&mut self, child: Entity, parent: Entity) -> Result<()> {
        self.registry().ensure_alive(child)?;
        self.registry().ensure_alive(parent)?;
        if child == parent || self.is_ancestor(child, parent) {
            return Err(Error::HierarchyCycle { child, parent });
        }

        match self.parent_of(child) {
            Some(old) if old == parent => return Ok(()),
            Some(old) => self.unlink_child(old, child),
            None => {}
        }

        self.insert(child, Parent(parent))?;
        match self.get_mut::<Children>(parent)? {
            Some(children) => {
                children.add(child);
            }
            None => {
                let mut children = Children::default();
                children.add(child);
                self.insert(parent, children)?;
            }
        }
        self.mark_dirty(child);
        tracing::trace!(%child, %parent, "parented entity");
        Ok(())
    }

    /// Detach `child` from its parent, making it a root. Returns the old parent.
    pub fn remove_parent(&mut self, child: Entity) -> Result<Option<Entity>> {
        let Some(Parent(parent)) = self.remove::<Parent>(child)? else {
            return Ok(None);
        };
        self.unlink_child(parent, child);
        self.mark_dirty(child);
        tracing::trace!(%child, %parent, "unparented entity");
        Ok(Some(parent))
    }

    /// Parent of a live entity, `None` for roots and dead ids.
    pub fn parent_of(&self, entity: Entity) -> Option<Entity> {
        self.get::<Parent>(entity).ok().flatten().map(|parent| parent.get())
    }

    /// Direct children in attach order, empty for leaves and dead ids.
    pub fn children_of(&self, entity: Entity) -> &[Entity] {
        self.get::<Children>(entity)
            .ok()
            .flatten()
            .map(Children::as_slice)
            .unwrap_or(&[])
    }

    /// Whether `ancestor` lies on the parent chain of `entity`.
    pub fn is_ancestor(&self, ancestor: Entity, entity: Entity) -> bool {
        let mut current = self.parent_of(entity);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.parent_of(parent);
        }
        false
    }

    /// Despawn `entity` together with every descendant.
    pub fn despawn_recursive(&mut self, entity: Entity) -> Result<()> {
        self.registry().ensure_alive(entity)?;
        let mut pending = vec![entity];
        let mut doomed = Vec::new();
        while let Some(next) = pending.pop() {
            pending.extend_from_slice(self.children_of(next));
            doomed.push(next);
        }
        for entity in doomed {
            self.despawn(entity)?;
        }
        Ok(())
    }

    /// Recompute [`GlobalTransform`]s from the roots down.
    ///
    /// An entity is recomputed when it is marked dirty, its `Transform`
    /// changed since the last pass, or its parent was recomputed; anything
    /// else keeps its cached matrix. Returns how many were recomputed.
    pub fn update_transforms(&mut self) -> usize {
        let roots: Vec<Entity> = self
            .query::<Transform>()
            .filter(|(entity, _)| !self.has::<Parent>(*entity))
            .map(|(entity, _)| entity)
            .collect();

        let mut pending: Vec<(Entity, Mat4, bool)> = roots
            .into_iter()
            .rev()
            .map(|root| (root, Mat4::IDENTITY, false))
            .collect();
        let mut recomputed = 0;

        while let Some((entity, parent_matrix, parent_changed)) = pending.pop() {
            let Some(local) = Transform::store(&self.components).get(entity).copied() else {
                continue;
            };
            let cached = GlobalTransform::store(&self.components).get(entity).copied();
            let (matrix, changed) = match cached {
                Some(global) if !parent_changed && global.is_current(&local) => (global.matrix(), false),
                _ => {
                    let matrix = parent_matrix * local.matrix();
                    GlobalTransform::store_mut(&mut self.components)
                        .insert(entity, GlobalTransform::computed(matrix, local));
                    recomputed += 1;
                    (matrix, true)
                }
            };
            for &child in self.children_of(entity).iter().rev() {
                pending.push((child, matrix, changed));
            }
        }
        recomputed
    }

    /// Unlink a dying entity from its parent and turn its children into roots.
    pub(crate) fn detach_hierarchy(&mut self, entity: Entity) {
        if let Some(parent) = self.parent_of(entity) {
            self.unlink_child(parent, entity);
        }
        let Some(children) = Children::store_mut(&mut self.components).remove(entity) else {
            return;
        };
        for orphan in children.as_slice() {
            Parent::store_mut(&mut self.components).remove(*orphan);
            self.mark_dirty(*orphan);
        }
        tracing::trace!(%entity, orphans = children.len(), "orphaned children");
    }

    fn unlink_child(&mut self, parent: Entity, child: Entity) {
        let store = Children::store_mut(&mut self.components);
        if let Some(children) = store.get_mut(parent) {
            children.remove(child);
            if children.is_empty() {
                store.remove(parent);
            }
        }
    }

    fn mark_dirty(&mut self, entity: Entity) {
        if let Some(global) = GlobalTransform::store_mut(&mut self.components).get_mut(entity) {
            global.mark_dirty();
        }
    }
}

/// [`World::update_transforms`] as an update system; register it after
/// whatever moves local transforms and before anything reading world space.
#[derive(Debug, Default, Clone, Copy)]
pub struct TransformPropagation;

impl System for TransformPropagation {
    fn name(&self) -> &str {
        "transform_propagation"
    }

    fn execute(&mut self, ctx: &mut SystemContext<'_>) -> Result<()> {
        let recomputed = ctx.world.update_transforms();
        tracing::trace!(recomputed, "propagated transforms");
        Ok(())
    }
}
