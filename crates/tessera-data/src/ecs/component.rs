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

//! Component identity, metaclasses and the object-safe component interface.

use std::any::Any;
use std::fmt;

use tessera_core::ecs::entity::EntityId;

use super::copy::EntityCopyData;
use super::reference::{ReferenceProperty, ReferenceValue};
use super::scene::SceneId;

/// A stable identifier for a concrete component type.
///
/// Ids are hashed (FNV-1a) from the fully qualified type path at compile time.
/// The same type always has the same id within one build; ids are not meant to
/// be persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(u32);

impl ComponentId {
    /// Hashes a type path into an id.
    pub const fn from_name(name: &str) -> Self {
        const OFFSET_BASIS: u32 = 0x811c_9dc5;
        const PRIME: u32 = 0x0100_0193;

        let bytes = name.as_bytes();
        let mut hash = OFFSET_BASIS;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u32;
            hash = hash.wrapping_mul(PRIME);
            i += 1;
        }
        Self(hash)
    }

    /// Wraps a raw id value.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw id value.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns the single-bit type mask `1 << (id % 64)`.
    ///
    /// Distinct types can share a bit, so the mask only ever rules types *out*.
    pub const fn mask_flag(self) -> u64 {
        1u64 << (self.0 % 64)
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// The reflection metaclass of a component type.
#[derive(Debug, Clone, Copy)]
pub struct ComponentMeta {
    name: &'static str,
    id: ComponentId,
    priority: i32,
    type_name: fn() -> &'static str,
}

impl ComponentMeta {
    /// Creates a metaclass. Normally emitted by `#[derive(Component)]`.
    pub const fn new(
        name: &'static str,
        id: ComponentId,
        priority: i32,
        type_name: fn() -> &'static str,
    ) -> Self {
        Self {
            name,
            id,
            priority,
            type_name,
        }
    }

    /// The class name, used as the factory key.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The component type id.
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// The lifecycle ordering key; lower priorities are notified first.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// The full Rust type name of the component.
    pub fn type_name(&self) -> &'static str {
        (self.type_name)()
    }

    /// Shorthand for `self.id().mask_flag()`.
    pub fn mask_flag(&self) -> u64 {
        self.id.mask_flag()
    }
}

impl PartialEq for ComponentMeta {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.name == other.name
    }
}

impl Eq for ComponentMeta {}

/// The state a lifecycle hook observes about the owning entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentContext {
    /// The owning entity.
    pub entity: EntityId,
    /// The scene the entity belongs to, if any.
    pub scene: Option<SceneId>,
    /// Whether the entity is active in the hierarchy.
    pub active_in_hierarchy: bool,
}

/// Notifications a component can opt into.
///
/// Every hook defaults to a no-op. The owning world invokes them at the
/// transitions named by each method; a component never calls them on itself.
/// Among the components of one entity, hooks run in ascending
/// `(priority, ComponentId)` order and exactly once per transition.
pub trait ComponentLifecycle {
    /// The component was attached to `ctx.entity`.
    fn process_component_added(&mut self, _ctx: &ComponentContext) {}

    /// The component is being detached from `ctx.entity`.
    fn process_component_removed(&mut self, _ctx: &ComponentContext) {}

    /// The owning entity entered a scene.
    fn process_scene_set(&mut self, _ctx: &ComponentContext) {}

    /// The owning entity is leaving its scene.
    fn process_scene_reset(&mut self, _ctx: &ComponentContext) {}

    /// The owning entity became active in the hierarchy.
    fn process_entity_enabled(&mut self, _ctx: &ComponentContext) {}

    /// The owning entity stopped being active in the hierarchy.
    fn process_entity_disabled(&mut self, _ctx: &ComponentContext) {}

    /// The owning entity was awakened. Happens once, after creation or copy.
    fn process_entity_awakened(&mut self, _ctx: &ComponentContext) {}
}

/// The object-safe interface of every component.
///
/// Implement it with `#[derive(Component)]`; the derive also provides
/// [`ComponentClass`]. Components are duplicated only through
/// [`clone_component`](Component::clone_component), never through `Clone` on the
/// trait object.
pub trait Component: Any {
    /// Returns the metaclass of the concrete type.
    fn meta(&self) -> &'static ComponentMeta;

    /// Returns `self` as `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Returns `self` as `&mut dyn Any` for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Converts an owned component into `Box<dyn Any>` for downcasting.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// The entity this component is attached to, `None` while it is detached.
    ///
    /// The handle is weak: it goes stale once the entity is removed.
    fn entity_id(&self) -> Option<EntityId> {
        None
    }

    /// Records `entity` as the owner. Called by [`Entity`](super::Entity) on attach.
    #[doc(hidden)]
    fn attach_to_entity(self: Box<Self>, entity: EntityId) -> Box<dyn Component>;

    /// Drops the owner record. Called by [`Entity`](super::Entity) on detach.
    #[doc(hidden)]
    fn detach_from_entity(self: Box<Self>) -> Box<dyn Component>;

    /// Clones this component's state for a deep copy.
    fn clone_component(&self, copy_data: &mut EntityCopyData) -> Box<dyn Component>;

    /// Describes the fields holding entity or component handles.
    fn reference_properties(&self) -> &'static [ReferenceProperty] {
        &[]
    }

    /// Reads a reference property by name.
    fn reference(&self, _name: &str) -> Option<ReferenceValue> {
        None
    }

    /// Writes a reference property by name. Returns `false` if the name or kind did not match.
    fn set_reference(&mut self, _name: &str, _value: ReferenceValue) -> bool {
        false
    }

    /// Whether a deep copy redirects this property to the cloned graph.
    fn is_property_copyable(&self, name: &str) -> bool {
        self.reference_properties()
            .iter()
            .any(|p| p.name() == name && p.copyable())
    }

    /// Returns the lifecycle hooks, if this component wants them.
    fn lifecycle_mut(&mut self) -> Option<&mut dyn ComponentLifecycle> {
        None
    }
}

/// The static side of a component type.
pub trait ComponentClass: Component + Sized {
    /// Returns the metaclass shared by every instance of the type.
    fn class_meta() -> &'static ComponentMeta;

    /// Returns the type's id.
    fn static_component_id() -> ComponentId {
        Self::class_meta().id()
    }

    /// Returns the type's mask bit.
    fn static_mask_flag() -> u64 {
        Self::static_component_id().mask_flag()
    }
}

/// Returns the id of component type `T`.
pub fn static_component_id<T: ComponentClass>() -> ComponentId {
    T::static_component_id()
}

impl dyn Component {
    /// The id of the concrete type.
    pub fn component_id(&self) -> ComponentId {
        self.meta().id()
    }

    /// The mask bit of the concrete type.
    pub fn mask_flag(&self) -> u64 {
        self.meta().mask_flag()
    }

    /// The lifecycle priority of the concrete type.
    pub fn priority(&self) -> i32 {
        self.meta().priority()
    }

    /// Returns `true` if the concrete type is `T`.
    pub fn is<T: ComponentClass>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Downcasts to `T`, logging an error on mismatch.
    pub fn safe_cast<T: ComponentClass>(&self) -> Option<&T> {
        let cast = self.as_any().downcast_ref::<T>();
        if cast.is_none() {
            log_incompatible_cast::<T>(self.meta());
        }
        cast
    }

    /// Mutable counterpart of [`safe_cast`](Self::safe_cast).
    pub fn safe_cast_mut<T: ComponentClass>(&mut self) -> Option<&mut T> {
        let meta = self.meta();
        match self.as_any_mut().downcast_mut::<T>() {
            Some(cast) => Some(cast),
            None => {
                log_incompatible_cast::<T>(meta);
                None
            }
        }
    }

    /// Downcasts an owned component, logging an error on mismatch.
    pub fn safe_cast_boxed<T: ComponentClass>(self: Box<Self>) -> Option<Box<T>> {
        let meta = self.meta();
        match self.into_any().downcast::<T>() {
            Ok(cast) => Some(cast),
            Err(_) => {
                log_incompatible_cast::<T>(meta);
                None
            }
        }
    }

    /// Clones this component through its copy thunk.
    pub fn create_copy(&self, copy_data: &mut EntityCopyData) -> Box<dyn Component> {
        self.clone_component(copy_data)
    }
}

fn log_incompatible_cast<T: ComponentClass>(from: &ComponentMeta) {
    log::error!(
        "Incompatible cast '{}' to '{}'!",
        from.name(),
        T::class_meta().name()
    );
}

/// A component while it sits on an entity. Detaching unwraps it again, so owned
/// boxes handed out by the world never carry an owner.
struct Attached<T> {
    entity: EntityId,
    component: T,
}

/// Wraps `component` with `entity` as its owner. Emitted by `#[derive(Component)]`.
#[doc(hidden)]
pub fn attach_component<T: ComponentClass>(
    component: Box<T>,
    entity: EntityId,
) -> Box<dyn Component> {
    Box::new(Attached {
        entity,
        component: *component,
    })
}

impl<T: ComponentClass> Component for Attached<T> {
    fn meta(&self) -> &'static ComponentMeta {
        self.component.meta()
    }

    fn as_any(&self) -> &dyn Any {
        self.component.as_any()
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self.component.as_any_mut()
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        Box::new(self.component)
    }

    fn entity_id(&self) -> Option<EntityId> {
        Some(self.entity)
    }

    fn attach_to_entity(mut self: Box<Self>, entity: EntityId) -> Box<dyn Component> {
        self.entity = entity;
        self
    }

    fn detach_from_entity(self: Box<Self>) -> Box<dyn Component> {
        Box::new(self.component)
    }

    fn clone_component(&self, copy_data: &mut EntityCopyData) -> Box<dyn Component> {
        self.component.clone_component(copy_data)
    }

    fn reference_properties(&self) -> &'static [ReferenceProperty] {
        self.component.reference_properties()
    }

    fn reference(&self, name: &str) -> Option<ReferenceValue> {
        self.component.reference(name)
    }

    fn set_reference(&mut self, name: &str, value: ReferenceValue) -> bool {
        self.component.set_reference(name, value)
    }

    fn is_property_copyable(&self, name: &str) -> bool {
        self.component.is_property_copyable(name)
    }

    fn lifecycle_mut(&mut self) -> Option<&mut dyn ComponentLifecycle> {
        self.component.lifecycle_mut()
    }
}

impl fmt::Debug for dyn Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("name", &self.meta().name())
            .field("id", &self.component_id())
            .field("entity", &self.entity_id())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::Component;

    #[derive(Debug, Clone, PartialEq, Component)]
    struct Transform {
        x: f32,
    }

    #[derive(Debug, Clone, Component)]
    #[component(priority = -10)]
    struct Camera;

    #[test]
    fn mask_flag_is_one_bit_from_id() {
        let id = Transform::static_component_id();
        assert_eq!(Transform::static_mask_flag(), 1u64 << (id.raw() % 64));
        assert_eq!(Transform::static_mask_flag().count_ones(), 1);
        assert_eq!(Transform::static_mask_flag(), Transform::static_mask_flag());
    }

    #[test]
    fn id_is_hashed_from_the_module_path() {
        let expected = ComponentId::from_name(concat!(module_path!(), "::", "Transform"));
        assert_eq!(static_component_id::<Transform>(), expected);
        assert_ne!(static_component_id::<Transform>(), static_component_id::<Camera>());
    }

    #[test]
    fn fnv_hash_of_empty_name_is_offset_basis() {
        assert_eq!(ComponentId::from_name("").raw(), 0x811c_9dc5);
    }

    #[test]
    fn meta_reports_name_priority_and_type() {
        let meta = Camera::class_meta();
        assert_eq!(meta.name(), "Camera");
        assert_eq!(meta.priority(), -10);
        assert!(meta.type_name().ends_with("Camera"));
        assert_eq!(Transform::class_meta().priority(), 0);
    }

    #[test]
    fn safe_cast_to_the_right_type() {
        let mut boxed: Box<dyn Component> = Box::new(Transform { x: 1.5 });
        assert!(boxed.is::<Transform>());
        assert_eq!(boxed.safe_cast::<Transform>(), Some(&Transform { x: 1.5 }));

        if let Some(t) = boxed.safe_cast_mut::<Transform>() {
            t.x = 3.0;
        }
        assert_eq!(boxed.safe_cast::<Transform>().map(|t| t.x), Some(3.0));
    }

    #[test]
    fn safe_cast_to_an_unrelated_type_is_none() {
        let mut boxed: Box<dyn Component> = Box::new(Transform { x: 0.0 });
        assert!(!boxed.is::<Camera>());
        assert!(boxed.safe_cast::<Camera>().is_none());
        assert!(boxed.safe_cast_mut::<Camera>().is_none());
    }

    #[test]
    fn boxed_cast_to_the_right_type_keeps_state() {
        let boxed: Box<dyn Component> = Box::new(Transform { x: 2.0 });
        let transform = boxed.safe_cast_boxed::<Transform>().expect("Cast should succeed");
        assert_eq!(*transform, Transform { x: 2.0 });

        let boxed: Box<dyn Component> = Box::new(Transform { x: 2.0 });
        assert!(boxed.safe_cast_boxed::<Camera>().is_none());
    }

    #[test]
    fn attached_component_reports_its_owner_until_detached() {
        let owner = EntityId::new(3, 1);
        let boxed: Box<dyn Component> = Box::new(Transform { x: 1.0 });
        assert_eq!(boxed.entity_id(), None);

        let mut attached = boxed.attach_to_entity(owner);
        assert_eq!(attached.entity_id(), Some(owner));
        assert!(attached.is::<Transform>());
        if let Some(t) = attached.safe_cast_mut::<Transform>() {
            t.x = 5.0;
        }

        let mut copy_data = EntityCopyData::new();
        assert_eq!(attached.create_copy(&mut copy_data).entity_id(), None);

        let detached = attached.detach_from_entity();
        assert_eq!(detached.entity_id(), None);
        let transform = detached.safe_cast_boxed::<Transform>().expect("Cast should succeed");
        assert_eq!(*transform, Transform { x: 5.0 });
    }

    #[test]
    fn attached_box_casts_to_the_inner_type() {
        let attached = Box::new(Camera).attach_to_entity(EntityId::new(0, 0));
        assert_eq!(attached.priority(), -10);
        assert!(attached.safe_cast_boxed::<Camera>().is_some());
    }

    #[test]
    fn create_copy_clones_state() {
        let original: Box<dyn Component> = Box::new(Transform { x: 4.0 });
        let mut copy_data = EntityCopyData::new();
        let copy = original.create_copy(&mut copy_data);
        assert_eq!(copy.safe_cast::<Transform>(), Some(&Transform { x: 4.0 }));
    }
}
