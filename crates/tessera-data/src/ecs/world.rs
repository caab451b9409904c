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

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap, HashSet};

use tessera_core::ecs::entity::EntityId;
use tessera_core::event::EventBus;

use super::aspect::EntityAspect;
use super::component::{Component, ComponentClass, ComponentId};
use super::config::WorldConfig;
use super::copy::{EntityCopyData, PropertyPatch};
use super::entity::{Entity, EntityFlags, LifecycleHook};
use super::error::EcsError;
use super::events::{WorldEvent, WorldEvents};
use super::factory::ComponentFactory;
use super::reference::{ComponentRef, ReferenceProperty};
use super::scene::{EcsScene, SceneId};

/// The owner of a set of entities, their components and scenes.
///
/// All mutation is synchronous and single-threaded. Lifecycle hooks run inside
/// the mutating call; [`WorldEvents`] subscribers run when [`update`](Self::update)
/// drains the event queue.
pub struct EcsWorld {
    config: WorldConfig,
    /// Every entity slot ever allocated. The index is the `index` part of an
    /// `EntityId`; the `Option` is `Some` only while the slot is alive.
    entities: Vec<(EntityId, Option<Entity>)>,
    /// Slot indices available for reuse.
    freed_entities: Vec<u32>,
    scenes: BTreeMap<SceneId, EcsScene>,
    next_scene: u32,
    event_queue: EventBus<WorldEvent>,
    /// Entities with a `ComponentsChanged` already queued.
    pending_changes: HashSet<EntityId>,
    /// Entities with an `ActiveChanged` already queued, with their
    /// `active_in_hierarchy` state as of the last [`update`](Self::update).
    pending_active: HashMap<EntityId, bool>,
    events: WorldEvents,
}

/// Where a deep copy reads its source entities from.
#[derive(Clone, Copy)]
enum CopySource<'w> {
    Local,
    Other(&'w EcsWorld),
}

/// The cloned state of one source entity, detached from its world.
struct EntitySnapshot {
    flags: EntityFlags,
    scene: Option<SceneId>,
    components: Vec<Box<dyn Component>>,
    owned: Vec<EntityId>,
}

impl EcsWorld {
    /// Creates an empty world.
    pub fn new(config: WorldConfig) -> Self {
        log::info!("Creating ECS world '{}'", config.name);
        Self {
            entities: Vec::with_capacity(config.reserved_entities),
            freed_entities: Vec::new(),
            scenes: BTreeMap::new(),
            next_scene: 0,
            event_queue: EventBus::new(),
            pending_changes: HashSet::new(),
            pending_active: HashMap::new(),
            events: WorldEvents::new(),
            config,
        }
    }

    /// The configuration this world was created with.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Reserves room for `additional` more entity slots.
    pub fn reserve_entity_indices(&mut self, additional: usize) {
        self.entities.reserve(additional);
    }

    // --- Entities ---

    /// Creates an active, empty entity outside any scene and awakens it.
    pub fn create_entity(&mut self) -> EntityId {
        let id = self.allocate_entity(EntityFlags::ACTIVE_SELF, None);
        self.try_awake(id);
        id
    }

    /// Creates an active, empty entity in `scene` and awakens it.
    pub fn create_entity_in_scene(&mut self, scene: SceneId) -> Result<EntityId, EcsError> {
        self.check_scene(scene)?;
        let id = self.allocate_entity(EntityFlags::ACTIVE_SELF, Some(scene));
        self.try_awake(id);
        Ok(id)
    }

    fn allocate_entity(&mut self, flags: EntityFlags, scene: Option<SceneId>) -> EntityId {
        let id = if let Some(index) = self.freed_entities.pop() {
            let (id_slot, entity_slot) = &mut self.entities[index as usize];
            id_slot.generation += 1;
            *entity_slot = Some(Entity::new(*id_slot, flags, scene));
            *id_slot
        } else {
            let id = EntityId::new(self.entities.len() as u32, 0);
            self.entities.push((id, Some(Entity::new(id, flags, scene))));
            id
        };

        if let Some(scene) = scene.and_then(|s| self.scenes.get_mut(&s)) {
            scene.insert(id);
        }
        log::trace!("Entity {id} created");
        self.publish(WorldEvent::EntityAdded(id));
        id
    }

    /// Removes an entity and all of its components.
    ///
    /// Scene members are notified with `process_scene_reset` first, then every
    /// component gets `process_component_removed`. Returns `false` for a stale id.
    pub fn remove_entity(&mut self, id: EntityId) -> bool {
        let Some(entity) = self.entity_mut(id) else {
            log::warn!("Cannot remove entity {id}: not found");
            return false;
        };

        let scene = entity.scene();
        if scene.is_some() {
            entity.notify_all(LifecycleHook::SceneReset);
        }
        entity.notify_all(LifecycleHook::ComponentRemoved);
        drop(entity.take_components());

        if let Some(scene) = scene.and_then(|s| self.scenes.get_mut(&s)) {
            scene.remove(id);
        }
        self.entities[id.index as usize].1 = None;
        self.freed_entities.push(id.index);
        self.pending_changes.remove(&id);

        log::trace!("Entity {id} removed");
        self.publish(WorldEvent::EntityRemoved(id));
        true
    }

    /// Returns `true` if `id` refers to a live entity.
    pub fn contains_entity(&self, id: EntityId) -> bool {
        self.entity(id).is_some()
    }

    /// Returns the entity behind `id`, if it is alive.
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities
            .get(id.index as usize)
            .and_then(|(slot_id, entity)| {
                if slot_id.generation == id.generation {
                    entity.as_ref()
                } else {
                    None
                }
            })
    }

    /// Returns the entity behind `id` mutably, if it is alive.
    ///
    /// Structural changes still go through the world; this only grants typed
    /// mutable access to the components.
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities
            .get_mut(id.index as usize)
            .and_then(|(slot_id, entity)| {
                if slot_id.generation == id.generation {
                    entity.as_mut()
                } else {
                    None
                }
            })
    }

    /// The live entity ids in slot order.
    pub fn entity_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities
            .iter()
            .filter(|(_, entity)| entity.is_some())
            .map(|(id, _)| *id)
    }

    /// The live entities in slot order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.iter().filter_map(|(_, entity)| entity.as_ref())
    }

    /// The number of live entities.
    pub fn entities_count(&self) -> usize {
        self.entities.len() - self.freed_entities.len()
    }

    fn find_entity_mut(&mut self, id: EntityId) -> Result<&mut Entity, EcsError> {
        match self.entity_mut(id) {
            Some(entity) => Ok(entity),
            None => {
                log::error!("Entity {id} not found");
                Err(EcsError::EntityNotFound { id })
            }
        }
    }

    // --- Components ---

    /// Attaches `component` to `entity`.
    ///
    /// The component gets `process_component_added`, then
    /// `process_entity_awakened` if the entity is already awake, then
    /// `process_scene_set` if the entity is in a scene. A component whose type
    /// is already present is rejected and dropped; the existing one is kept.
    pub fn add_component(
        &mut self,
        entity: EntityId,
        component: Box<dyn Component>,
    ) -> Result<ComponentRef, EcsError> {
        let target = self.find_entity_mut(entity)?;
        let id = match target.insert_component(component) {
            Ok(id) => id,
            Err(rejected) => {
                let name = rejected.meta().name();
                log::error!("Component '{name}' already exists on entity {entity}");
                return Err(EcsError::ComponentAlreadyExists {
                    entity,
                    component: name,
                });
            }
        };

        target.notify(id, LifecycleHook::ComponentAdded);
        if target.awakened() {
            target.notify(id, LifecycleHook::EntityAwakened);
        }
        if target.scene().is_some() {
            target.notify(id, LifecycleHook::SceneSet);
        }

        log::trace!("Component {id} attached to entity {entity}");
        self.publish(WorldEvent::ComponentsChanged(entity));
        Ok(ComponentRef::new(entity, id))
    }

    /// Attaches a default `T` and returns it.
    pub fn create_component<T: ComponentClass + Default>(
        &mut self,
        entity: EntityId,
    ) -> Result<&mut T, EcsError> {
        self.add_component(entity, Box::new(T::default()))?;
        self.get_component_mut::<T>(entity)
            .ok_or(EcsError::ComponentNotFound {
                entity,
                component: T::static_component_id(),
            })
    }

    /// Creates the component registered as `name` in `factory` and attaches it.
    pub fn create_component_by_name(
        &mut self,
        factory: &ComponentFactory,
        entity: EntityId,
        name: &str,
    ) -> Result<ComponentRef, EcsError> {
        let Some(component) = factory.create_component(name) else {
            return Err(EcsError::UnknownComponent {
                name: name.to_string(),
            });
        };
        self.add_component(entity, component)
    }

    /// Returns the `T` of `entity`, attaching a default one first if needed.
    pub fn ensure_component<T: ComponentClass + Default>(
        &mut self,
        entity: EntityId,
    ) -> Result<&mut T, EcsError> {
        let present = self
            .entity(entity)
            .is_some_and(|e| e.has_component::<T>());
        if present {
            self.get_component_mut::<T>(entity)
                .ok_or(EcsError::ComponentNotFound {
                    entity,
                    component: T::static_component_id(),
                })
        } else {
            self.create_component::<T>(entity)
        }
    }

    /// Returns the `T` of `entity`.
    pub fn get_component<T: ComponentClass>(&self, entity: EntityId) -> Option<&T> {
        self.entity(entity)?.component::<T>()
    }

    /// Returns the `T` of `entity` mutably.
    pub fn get_component_mut<T: ComponentClass>(&mut self, entity: EntityId) -> Option<&mut T> {
        self.entity_mut(entity)?.component_mut::<T>()
    }

    /// Resolves a component handle.
    pub fn component(&self, component: ComponentRef) -> Option<&dyn Component> {
        self.entity(component.entity)?
            .component_by_id(component.component)
    }

    /// Resolves a component handle mutably.
    pub fn component_mut(&mut self, component: ComponentRef) -> Option<&mut dyn Component> {
        self.entity_mut(component.entity)?
            .component_by_id_mut(component.component)
    }

    /// Detaches and drops the `T` of `entity`. Returns `false` if there was none.
    pub fn remove_component<T: ComponentClass>(&mut self, entity: EntityId) -> bool {
        self.remove_component_by_id(entity, T::static_component_id())
    }

    /// Detaches and drops the component of type `id`. Returns `false` if there was none.
    pub fn remove_component_by_id(&mut self, entity: EntityId, id: ComponentId) -> bool {
        self.take_component(ComponentRef::new(entity, id)).is_some()
    }

    /// Detaches the referenced component from its entity.
    ///
    /// Returns `false`, changing nothing, if the component is already detached.
    pub fn remove_from_entity(&mut self, component: ComponentRef) -> bool {
        self.take_component(component).is_some()
    }

    /// Detaches the referenced component and hands it to the caller.
    ///
    /// `process_component_removed` runs while the component is still attached.
    pub fn take_component(&mut self, component: ComponentRef) -> Option<Box<dyn Component>> {
        let entity = self.entity_mut(component.entity)?;
        if !entity.has_component_id(component.component) {
            return None;
        }

        entity.notify(component.component, LifecycleHook::ComponentRemoved);
        let removed = entity.remove_component(component.component)?;

        log::trace!(
            "Component {} detached from entity {}",
            component.component,
            component.entity
        );
        self.publish(WorldEvent::ComponentsChanged(component.entity));
        Some(removed)
    }

    // --- Activation ---

    /// Enables or disables the entity itself. Returns `false` for a stale id.
    pub fn set_active_self(&mut self, entity: EntityId, active: bool) -> bool {
        self.set_flag(entity, EntityFlags::ACTIVE_SELF, active)
    }

    /// Marks the entity as disabled (or not) by an ancestor. Returns `false` for a stale id.
    pub fn set_disabled_by_hierarchy(&mut self, entity: EntityId, disabled: bool) -> bool {
        self.set_flag(entity, EntityFlags::DISABLED_BY_HIERARCHY, disabled)
    }

    fn set_flag(&mut self, id: EntityId, flag: EntityFlags, value: bool) -> bool {
        let Some(entity) = self.entity_mut(id) else {
            log::warn!("Cannot change flags of entity {id}: not found");
            return false;
        };

        let was_active = entity.active_in_hierarchy();
        entity.set_flag(flag, value);
        let is_active = entity.active_in_hierarchy();
        if was_active != is_active {
            if is_active {
                entity.notify_all(LifecycleHook::EntityEnabled);
            } else {
                entity.notify_all(LifecycleHook::EntityDisabled);
            }
            if let Entry::Vacant(slot) = self.pending_active.entry(id) {
                slot.insert(was_active);
                self.publish(WorldEvent::ActiveChanged(id));
            }
        }
        true
    }

    fn try_awake(&mut self, id: EntityId) {
        let Some(entity) = self.entity_mut(id) else {
            return;
        };
        if entity.awakened() || entity.flags().contains(EntityFlags::AWAKE_FORBIDDEN) {
            return;
        }
        entity.set_flag(EntityFlags::AWAKENED, true);
        entity.notify_all(LifecycleHook::EntityAwakened);
    }

    // --- Scenes ---

    /// Creates an empty scene.
    pub fn create_scene(&mut self, name: impl Into<String>) -> SceneId {
        let id = SceneId(self.next_scene);
        self.next_scene += 1;
        let scene = EcsScene::new(id, name);
        log::debug!("Scene {id} '{}' created", scene.name());
        self.scenes.insert(id, scene);
        id
    }

    /// Returns a scene of this world.
    pub fn scene(&self, id: SceneId) -> Option<&EcsScene> {
        self.scenes.get(&id)
    }

    /// The scenes of this world in creation order.
    pub fn scenes(&self) -> impl Iterator<Item = &EcsScene> + '_ {
        self.scenes.values()
    }

    fn check_scene(&self, id: SceneId) -> Result<(), EcsError> {
        if self.scenes.contains_key(&id) {
            Ok(())
        } else {
            log::error!("Scene {id} not found");
            Err(EcsError::SceneNotFound { id })
        }
    }

    /// Moves `entity` to `scene`, or out of any scene with `None`.
    ///
    /// Components get `process_scene_reset` when leaving a scene and
    /// `process_scene_set` when entering one.
    pub fn set_entity_scene(
        &mut self,
        entity: EntityId,
        scene: Option<SceneId>,
    ) -> Result<(), EcsError> {
        if let Some(scene) = scene {
            self.check_scene(scene)?;
        }
        let target = self.find_entity_mut(entity)?;
        let previous = target.scene();
        if previous == scene {
            return Ok(());
        }

        if previous.is_some() {
            target.notify_all(LifecycleHook::SceneReset);
        }
        target.set_scene(scene);
        if scene.is_some() {
            target.notify_all(LifecycleHook::SceneSet);
        }

        if let Some(old) = previous.and_then(|s| self.scenes.get_mut(&s)) {
            old.remove(entity);
        }
        if let Some(new) = scene.and_then(|s| self.scenes.get_mut(&s)) {
            new.insert(entity);
        }
        Ok(())
    }

    /// Removes a scene and every entity in it. Returns the number of removed entities.
    pub fn destroy_scene(&mut self, id: SceneId) -> Result<usize, EcsError> {
        self.check_scene(id)?;
        let members: Vec<EntityId> = self
            .scenes
            .get(&id)
            .map(|scene| scene.entities().collect())
            .unwrap_or_default();
        let removed = members
            .into_iter()
            .filter(|entity| self.remove_entity(*entity))
            .count();
        self.scenes.remove(&id);
        log::debug!("Scene {id} destroyed with {removed} entities");
        Ok(removed)
    }

    // --- Queries and events ---

    /// The active entities matching `aspect`, in slot order.
    pub fn query(&self, aspect: &EntityAspect) -> Vec<EntityId> {
        self.entities()
            .filter(|entity| aspect.has_intersection(entity))
            .map(Entity::id)
            .collect()
    }

    /// The event subscriber lists.
    pub fn events(&self) -> &WorldEvents {
        &self.events
    }

    /// The event subscriber lists, for subscribing.
    pub fn events_mut(&mut self) -> &mut WorldEvents {
        &mut self.events
    }

    /// The number of events waiting for [`update`](Self::update).
    pub fn pending_events(&self) -> usize {
        self.event_queue.len()
    }

    /// Delivers the queued events to their subscribers, in publication order.
    /// Returns the number of delivered events.
    ///
    /// An `ActiveChanged` is dropped when the entity is gone or is back in the
    /// state it had at the previous update.
    pub fn update(&mut self) -> usize {
        let events = self.event_queue.drain();
        self.pending_changes.clear();
        let previous_active = std::mem::take(&mut self.pending_active);

        let mut delivered = 0;
        for event in events {
            if let WorldEvent::ActiveChanged(id) = event {
                let changed = match (self.entity(id), previous_active.get(&id)) {
                    (Some(entity), Some(&was_active)) => {
                        entity.active_in_hierarchy() != was_active
                    }
                    _ => false,
                };
                if !changed {
                    log::trace!("Dropping net-zero activation change of entity {id}");
                    continue;
                }
            }
            self.events.dispatch(event);
            delivered += 1;
        }
        delivered
    }

    fn publish(&mut self, event: WorldEvent) {
        if let WorldEvent::ComponentsChanged(id) = event {
            if !self.pending_changes.insert(id) {
                return;
            }
        }
        self.event_queue.publish(event);
    }

    // --- Deep copy ---

    /// Copies `source` and every entity it owns through `#[reference(owned)]`
    /// properties. References inside the copied graph are redirected to the
    /// clones. The clones are awakened once every reference is resolved.
    pub fn copy_entity(&mut self, source: EntityId) -> Result<EntityId, EcsError> {
        let mut copy_data = EntityCopyData::with_max_depth(self.config.max_copy_depth);
        self.copy_entity_with(source, &mut copy_data)
    }

    /// Same as [`copy_entity`](Self::copy_entity) with a caller-provided
    /// context, whose maps can be inspected afterwards.
    ///
    /// The context must be empty. Call [`EntityCopyData::clear`] to reuse one.
    pub fn copy_entity_with(
        &mut self,
        source: EntityId,
        copy_data: &mut EntityCopyData,
    ) -> Result<EntityId, EcsError> {
        Self::check_fresh_context(copy_data)?;
        self.copy_recursive(CopySource::Local, source, copy_data)
    }

    /// Copies `source` out of `other` into this world.
    ///
    /// Copied entities keep no scene unless `copy_data` names one of this
    /// world's scenes. References to entities that were not copied are kept as
    /// they are and resolve against this world.
    pub fn copy_entity_from(
        &mut self,
        other: &EcsWorld,
        source: EntityId,
        copy_data: &mut EntityCopyData,
    ) -> Result<EntityId, EcsError> {
        Self::check_fresh_context(copy_data)?;
        self.copy_recursive(CopySource::Other(other), source, copy_data)
    }

    fn check_fresh_context(copy_data: &EntityCopyData) -> Result<(), EcsError> {
        if copy_data.is_empty() {
            return Ok(());
        }
        log::error!(
            "Entity copy context already maps {} entities",
            copy_data.entities().len()
        );
        Err(EcsError::CopyContextInUse)
    }

    fn copy_recursive(
        &mut self,
        source: CopySource<'_>,
        old: EntityId,
        copy_data: &mut EntityCopyData,
    ) -> Result<EntityId, EcsError> {
        if let Some(new) = copy_data.entity(old) {
            return Ok(new);
        }

        copy_data.push_stack_depth()?;
        let result = self.copy_single(source, old, copy_data);
        if copy_data.pop_stack_depth() == 0 {
            match &result {
                Ok(_) => self.resolve_copy(copy_data),
                Err(_) => self.abort_copy(copy_data),
            }
        }
        result
    }

    fn copy_single(
        &mut self,
        source: CopySource<'_>,
        old: EntityId,
        copy_data: &mut EntityCopyData,
    ) -> Result<EntityId, EcsError> {
        let (snapshot, scene) = match source {
            CopySource::Local => {
                let snapshot = Self::snapshot(self, old, copy_data)?;
                let scene = copy_data.scene().or(snapshot.scene);
                (snapshot, scene)
            }
            CopySource::Other(world) => {
                let snapshot = Self::snapshot(world, old, copy_data)?;
                (snapshot, copy_data.scene())
            }
        };
        let scene = match scene {
            Some(scene) => {
                self.check_scene(scene)?;
                Some(scene)
            }
            None => None,
        };

        let new = self.allocate_entity(snapshot.flags, scene);
        copy_data.insert_entity(old, new);
        copy_data.push_copied_entity(new);
        log::debug!("Copying entity {old} into {new}");

        for component in snapshot.components {
            let id = component.component_id();
            let properties: Vec<ReferenceProperty> = component
                .reference_properties()
                .iter()
                .filter(|p| component.is_property_copyable(p.name()))
                .copied()
                .collect();

            self.add_component(new, component)?;

            let source_ref = ComponentRef::new(old, id);
            let target_ref = ComponentRef::new(new, id);
            copy_data.insert_component(source_ref, target_ref);
            for property in properties {
                copy_data.push_component_property(PropertyPatch {
                    property,
                    source: source_ref,
                    target: target_ref,
                });
            }
        }

        for owned in snapshot.owned {
            let exists = match source {
                CopySource::Local => self.contains_entity(owned),
                CopySource::Other(world) => world.contains_entity(owned),
            };
            if !exists {
                log::warn!("Entity {old} owns missing entity {owned}; it is not copied");
                continue;
            }
            self.copy_recursive(source, owned, copy_data)?;
        }

        Ok(new)
    }

    fn snapshot(
        world: &EcsWorld,
        id: EntityId,
        copy_data: &mut EntityCopyData,
    ) -> Result<EntitySnapshot, EcsError> {
        let Some(entity) = world.entity(id) else {
            log::error!("Cannot copy entity {id}: not found");
            return Err(EcsError::EntityNotFound { id });
        };

        let mut flags = EntityFlags::AWAKE_FORBIDDEN;
        flags.set(EntityFlags::ACTIVE_SELF, entity.active_self());
        flags.set(
            EntityFlags::DISABLED_BY_HIERARCHY,
            entity.disabled_by_hierarchy(),
        );

        let mut components = Vec::with_capacity(entity.components_count());
        let mut owned = Vec::new();
        for component in entity.components() {
            for property in component.reference_properties().iter().filter(|p| p.owned()) {
                if let Some(value) = component.reference(property.name()) {
                    owned.extend(value.referenced_entities());
                }
            }
            components.push(component.create_copy(copy_data));
        }

        Ok(EntitySnapshot {
            flags,
            scene: entity.scene(),
            components,
            owned,
        })
    }

    /// Rewrites every queued reference through the maps, then awakens the clones.
    fn resolve_copy(&mut self, copy_data: &mut EntityCopyData) {
        for patch in copy_data.take_component_properties() {
            let name = patch.property.name();
            let Some(component) = self.component_mut(patch.target) else {
                log::warn!(
                    "Copied component {} vanished before its references were resolved",
                    patch.target
                );
                continue;
            };
            let Some(value) = component.reference(name) else {
                continue;
            };
            if !component.set_reference(name, copy_data.remap(value)) {
                log::warn!("Failed to redirect property '{name}' of {}", patch.target);
            }
        }

        let copied = copy_data.take_copied_entities();
        log::debug!("Resolved copy of {} entities", copied.len());
        for id in copied {
            if let Some(entity) = self.entity_mut(id) {
                entity.set_flag(EntityFlags::AWAKE_FORBIDDEN, false);
            }
            self.try_awake(id);
        }
    }

    /// Discards every entity a failed copy created and empties the context.
    fn abort_copy(&mut self, copy_data: &mut EntityCopyData) {
        let copied = copy_data.take_copied_entities();
        copy_data.clear();
        log::error!("Entity copy failed; discarding {} partial copies", copied.len());
        for id in copied {
            self.remove_entity(id);
        }
    }
}

impl Default for EcsWorld {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

impl Drop for EcsWorld {
    fn drop(&mut self) {
        let ids: Vec<EntityId> = self.entity_ids().collect();
        log::debug!(
            "Destroying ECS world '{}' with {} entities",
            self.config.name,
            ids.len()
        );
        for id in ids {
            self.remove_entity(id);
        }
    }
}
