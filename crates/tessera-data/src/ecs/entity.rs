// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::BTreeMap;

use tessera_core::ecs::entity::EntityId;

use super::component::{
    Component, ComponentClass, ComponentContext, ComponentId, ComponentLifecycle,
};
use super::scene::SceneId;

/// Per-entity state bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntityFlags(u8);

impl EntityFlags {
    /// The entity itself is enabled.
    pub const ACTIVE_SELF: Self = Self(1 << 0);
    /// An ancestor disabled the entity.
    pub const DISABLED_BY_HIERARCHY: Self = Self(1 << 1);
    /// The awakening hooks have run.
    pub const AWAKENED: Self = Self(1 << 2);
    /// Awakening is postponed (set while a copy is in progress).
    pub const AWAKE_FORBIDDEN: Self = Self(1 << 3);

    /// Returns `true` if every bit of `other` is set.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Sets or clears the bits of `other`.
    pub fn set(&mut self, other: Self, value: bool) {
        if value {
            self.0 |= other.0;
        } else {
            self.0 &= !other.0;
        }
    }
}

/// A lifecycle transition. Order of components is handled by [`Entity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LifecycleHook {
    ComponentAdded,
    ComponentRemoved,
    SceneSet,
    SceneReset,
    EntityEnabled,
    EntityDisabled,
    EntityAwakened,
}

impl LifecycleHook {
    fn call(self, lifecycle: &mut dyn ComponentLifecycle, ctx: &ComponentContext) {
        match self {
            LifecycleHook::ComponentAdded => lifecycle.process_component_added(ctx),
            LifecycleHook::ComponentRemoved => lifecycle.process_component_removed(ctx),
            LifecycleHook::SceneSet => lifecycle.process_scene_set(ctx),
            LifecycleHook::SceneReset => lifecycle.process_scene_reset(ctx),
            LifecycleHook::EntityEnabled => lifecycle.process_entity_enabled(ctx),
            LifecycleHook::EntityDisabled => lifecycle.process_entity_disabled(ctx),
            LifecycleHook::EntityAwakened => lifecycle.process_entity_awakened(ctx),
        }
    }
}

/// A container of components inside an [`EcsWorld`](super::EcsWorld).
///
/// An entity holds at most one component per type. Structural changes go
/// through the world so that lifecycle hooks and events fire; the entity
/// itself only exposes read access and typed mutable access to its components.
#[derive(Debug)]
pub struct Entity {
    id: EntityId,
    flags: EntityFlags,
    scene: Option<SceneId>,
    components: BTreeMap<ComponentId, Box<dyn Component>>,
    mask: u64,
}

impl Entity {
    pub(crate) fn new(id: EntityId, flags: EntityFlags, scene: Option<SceneId>) -> Self {
        Self {
            id,
            flags,
            scene,
            components: BTreeMap::new(),
            mask: 0,
        }
    }

    /// The handle of this entity.
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// The raw state bits.
    pub fn flags(&self) -> EntityFlags {
        self.flags
    }

    /// The scene the entity belongs to.
    pub fn scene(&self) -> Option<SceneId> {
        self.scene
    }

    /// Whether the entity itself is enabled.
    pub fn active_self(&self) -> bool {
        self.flags.contains(EntityFlags::ACTIVE_SELF)
    }

    /// Whether an ancestor disabled the entity.
    pub fn disabled_by_hierarchy(&self) -> bool {
        self.flags.contains(EntityFlags::DISABLED_BY_HIERARCHY)
    }

    /// Whether the entity is enabled and not disabled by an ancestor.
    pub fn active_in_hierarchy(&self) -> bool {
        self.active_self() && !self.disabled_by_hierarchy()
    }

    /// Whether the awakening hooks have run.
    pub fn awakened(&self) -> bool {
        self.flags.contains(EntityFlags::AWAKENED)
    }

    /// Returns the component of type `T`.
    pub fn component<T: ComponentClass>(&self) -> Option<&T> {
        self.components
            .get(&T::static_component_id())
            .and_then(|c| c.as_any().downcast_ref::<T>())
    }

    /// Returns the component of type `T` mutably.
    pub fn component_mut<T: ComponentClass>(&mut self) -> Option<&mut T> {
        self.components
            .get_mut(&T::static_component_id())
            .and_then(|c| c.as_any_mut().downcast_mut::<T>())
    }

    /// Returns the component with type id `id`.
    pub fn component_by_id(&self, id: ComponentId) -> Option<&dyn Component> {
        self.components.get(&id).map(|c| c.as_ref())
    }

    /// Returns the component with type id `id` mutably.
    pub fn component_by_id_mut(&mut self, id: ComponentId) -> Option<&mut dyn Component> {
        match self.components.get_mut(&id) {
            Some(component) => Some(component.as_mut()),
            None => None,
        }
    }

    /// Returns `true` if a component of type `T` is attached.
    pub fn has_component<T: ComponentClass>(&self) -> bool {
        self.component::<T>().is_some()
    }

    /// Returns `true` if a component with type id `id` is attached.
    pub fn has_component_id(&self, id: ComponentId) -> bool {
        self.components.contains_key(&id)
    }

    /// The attached component type ids, in id order.
    pub fn component_ids(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.components.keys().copied()
    }

    /// The attached components, in id order.
    pub fn components(&self) -> impl Iterator<Item = &dyn Component> + '_ {
        self.components.values().map(|c| c.as_ref())
    }

    /// The number of attached components.
    pub fn components_count(&self) -> usize {
        self.components.len()
    }

    /// The OR of the mask bits of every attached component.
    pub fn components_mask(&self) -> u64 {
        self.mask
    }

    pub(crate) fn set_flag(&mut self, flag: EntityFlags, value: bool) {
        self.flags.set(flag, value);
    }

    pub(crate) fn set_scene(&mut self, scene: Option<SceneId>) {
        self.scene = scene;
    }

    pub(crate) fn context(&self) -> ComponentContext {
        ComponentContext {
            entity: self.id,
            scene: self.scene,
            active_in_hierarchy: self.active_in_hierarchy(),
        }
    }

    /// Inserts `component` with this entity as its owner, or gives it back
    /// untouched if its type is already present.
    pub(crate) fn insert_component(
        &mut self,
        component: Box<dyn Component>,
    ) -> Result<ComponentId, Box<dyn Component>> {
        let id = component.component_id();
        if self.components.contains_key(&id) {
            return Err(component);
        }
        self.mask |= component.mask_flag();
        self.components.insert(id, component.attach_to_entity(self.id));
        Ok(id)
    }

    /// Removes the `id` component. The returned box no longer has an owner.
    pub(crate) fn remove_component(&mut self, id: ComponentId) -> Option<Box<dyn Component>> {
        let removed = self.components.remove(&id)?;
        self.mask = self
            .components
            .values()
            .fold(0, |mask, c| mask | c.mask_flag());
        Some(removed.detach_from_entity())
    }

    pub(crate) fn take_components(&mut self) -> BTreeMap<ComponentId, Box<dyn Component>> {
        self.mask = 0;
        std::mem::take(&mut self.components)
            .into_iter()
            .map(|(id, component)| (id, component.detach_from_entity()))
            .collect()
    }

    /// Attached ids in lifecycle order: ascending priority, then ascending id.
    pub(crate) fn lifecycle_order(&self) -> Vec<ComponentId> {
        let mut ids: Vec<(i32, ComponentId)> = self
            .components
            .iter()
            .map(|(id, c)| (c.priority(), *id))
            .collect();
        ids.sort_unstable();
        ids.into_iter().map(|(_, id)| id).collect()
    }

    /// Runs `hook` on one component.
    pub(crate) fn notify(&mut self, id: ComponentId, hook: LifecycleHook) {
        let ctx = self.context();
        if let Some(lifecycle) = self
            .components
            .get_mut(&id)
            .and_then(|c| c.lifecycle_mut())
        {
            hook.call(lifecycle, &ctx);
        }
    }

    /// Runs `hook` on every component in lifecycle order.
    pub(crate) fn notify_all(&mut self, hook: LifecycleHook) {
        log::trace!("Entity {}: {:?}", self.id, hook);
        for id in self.lifecycle_order() {
            self.notify(id, hook);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::Component;

    #[derive(Debug, Clone, Component)]
    #[component(priority = 5)]
    struct Late;

    #[derive(Debug, Clone, Component)]
    #[component(priority = -5)]
    struct Early;

    #[derive(Debug, Clone, Component)]
    struct Middle;

    fn entity() -> Entity {
        Entity::new(EntityId::new(0, 0), EntityFlags::ACTIVE_SELF, None)
    }

    #[test]
    fn flags_set_and_clear() {
        let mut flags = EntityFlags::default();
        flags.set(EntityFlags::ACTIVE_SELF, true);
        flags.set(EntityFlags::AWAKENED, true);
        assert!(flags.contains(EntityFlags::ACTIVE_SELF));
        flags.set(EntityFlags::ACTIVE_SELF, false);
        assert!(!flags.contains(EntityFlags::ACTIVE_SELF));
        assert!(flags.contains(EntityFlags::AWAKENED));
    }

    #[test]
    fn mask_is_the_or_of_component_bits() {
        let mut e = entity();
        e.insert_component(Box::new(Late)).unwrap();
        e.insert_component(Box::new(Early)).unwrap();
        assert_eq!(
            e.components_mask(),
            Late::static_mask_flag() | Early::static_mask_flag()
        );

        e.remove_component(Late::static_component_id());
        assert_eq!(e.components_mask(), Early::static_mask_flag());
    }

    #[test]
    fn duplicate_type_is_given_back() {
        let mut e = entity();
        assert!(e.insert_component(Box::new(Middle)).is_ok());
        let rejected = e.insert_component(Box::new(Middle));
        assert_eq!(rejected.map_err(|c| c.entity_id()).err(), Some(None));
        assert_eq!(e.components_count(), 1);
    }

    #[test]
    fn owner_is_set_on_insert_and_cleared_on_removal() {
        let mut e = entity();
        e.insert_component(Box::new(Late)).unwrap();
        e.insert_component(Box::new(Early)).unwrap();
        assert!(e.components().all(|c| c.entity_id() == Some(e.id())));

        let removed = e.remove_component(Late::static_component_id()).unwrap();
        assert_eq!(removed.entity_id(), None);

        let taken = e.take_components();
        assert_eq!(taken.len(), 1);
        assert!(taken.values().all(|c| c.entity_id().is_none()));
    }

    #[test]
    fn lifecycle_order_follows_priority() {
        let mut e = entity();
        e.insert_component(Box::new(Late)).unwrap();
        e.insert_component(Box::new(Middle)).unwrap();
        e.insert_component(Box::new(Early)).unwrap();

        assert_eq!(
            e.lifecycle_order(),
            vec![
                Early::static_component_id(),
                Middle::static_component_id(),
                Late::static_component_id()
            ]
        );
    }

    #[test]
    fn active_in_hierarchy_needs_both_flags() {
        let mut e = entity();
        assert!(e.active_in_hierarchy());
        e.set_flag(EntityFlags::DISABLED_BY_HIERARCHY, true);
        assert!(e.active_self());
        assert!(!e.active_in_hierarchy());
    }
}
