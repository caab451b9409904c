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

//! Handles between components and the reflection of fields that hold them.

use std::fmt;

use tessera_core::ecs::entity::EntityId;

use super::component::{ComponentClass, ComponentId};

/// A handle to the component of type `component` on `entity`.
///
/// Like [`EntityId`], it is weak: it resolves only while the entity is alive and
/// still carries a component of that type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentRef {
    /// The owning entity.
    pub entity: EntityId,
    /// The component type on that entity.
    pub component: ComponentId,
}

impl ComponentRef {
    /// Creates a handle from its parts.
    pub const fn new(entity: EntityId, component: ComponentId) -> Self {
        Self { entity, component }
    }

    /// Creates a handle to the `T` component of `entity`.
    pub fn of<T: ComponentClass>(entity: EntityId) -> Self {
        Self::new(entity, T::static_component_id())
    }
}

impl fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.component, self.entity)
    }
}

/// The shape of a reference property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// A single (optional) entity.
    Entity,
    /// A list of entities.
    Entities,
    /// A single (optional) component.
    Component,
    /// A list of components.
    Components,
}

/// The value of a reference property, detached from the field that holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceValue {
    /// See [`ReferenceKind::Entity`].
    Entity(Option<EntityId>),
    /// See [`ReferenceKind::Entities`].
    Entities(Vec<EntityId>),
    /// See [`ReferenceKind::Component`].
    Component(Option<ComponentRef>),
    /// See [`ReferenceKind::Components`].
    Components(Vec<ComponentRef>),
}

impl ReferenceValue {
    /// Returns the kind of this value.
    pub fn kind(&self) -> ReferenceKind {
        match self {
            ReferenceValue::Entity(_) => ReferenceKind::Entity,
            ReferenceValue::Entities(_) => ReferenceKind::Entities,
            ReferenceValue::Component(_) => ReferenceKind::Component,
            ReferenceValue::Components(_) => ReferenceKind::Components,
        }
    }

    /// Returns every entity this value points at, including component owners.
    pub fn referenced_entities(&self) -> Vec<EntityId> {
        match self {
            ReferenceValue::Entity(entity) => entity.iter().copied().collect(),
            ReferenceValue::Entities(entities) => entities.clone(),
            ReferenceValue::Component(component) => component.iter().map(|c| c.entity).collect(),
            ReferenceValue::Components(components) => {
                components.iter().map(|c| c.entity).collect()
            }
        }
    }

    /// Rewrites every handle through the given maps. Handles a map does not
    /// know are kept as they are.
    pub fn remap<E, C>(self, map_entity: E, map_component: C) -> Self
    where
        E: Fn(EntityId) -> Option<EntityId>,
        C: Fn(ComponentRef) -> Option<ComponentRef>,
    {
        let entity = |e: EntityId| map_entity(e).unwrap_or(e);
        let component = |c: ComponentRef| map_component(c).unwrap_or(c);
        match self {
            ReferenceValue::Entity(e) => ReferenceValue::Entity(e.map(entity)),
            ReferenceValue::Entities(es) => {
                ReferenceValue::Entities(es.into_iter().map(entity).collect())
            }
            ReferenceValue::Component(c) => ReferenceValue::Component(c.map(component)),
            ReferenceValue::Components(cs) => {
                ReferenceValue::Components(cs.into_iter().map(component).collect())
            }
        }
    }
}

/// Describes one reference field of a component type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceProperty {
    name: &'static str,
    kind: ReferenceKind,
    owned: bool,
    copyable: bool,
}

impl ReferenceProperty {
    /// Creates a property description. Normally emitted by `#[derive(Component)]`.
    pub const fn new(name: &'static str, kind: ReferenceKind, owned: bool, copyable: bool) -> Self {
        Self {
            name,
            kind,
            owned,
            copyable,
        }
    }

    /// The field name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The shape of the field.
    pub fn kind(&self) -> ReferenceKind {
        self.kind
    }

    /// Whether the referenced entities are copied along with the owner.
    pub fn owned(&self) -> bool {
        self.owned
    }

    /// Whether a copy redirects the field to the cloned graph.
    pub fn copyable(&self) -> bool {
        self.copyable
    }
}

/// A field type that can be declared `#[reference]`.
pub trait ReferenceField {
    /// The shape of the field.
    const KIND: ReferenceKind;

    /// Reads the field.
    fn to_reference(&self) -> ReferenceValue;

    /// Overwrites the field. Returns `false`, leaving it untouched, if the kind differs.
    fn assign_reference(&mut self, value: ReferenceValue) -> bool;
}

fn kind_mismatch(expected: ReferenceKind, value: &ReferenceValue) -> bool {
    log::warn!(
        "Reference of kind {:?} cannot be assigned to a {:?} field",
        value.kind(),
        expected
    );
    false
}

impl ReferenceField for EntityId {
    const KIND: ReferenceKind = ReferenceKind::Entity;

    fn to_reference(&self) -> ReferenceValue {
        ReferenceValue::Entity(Some(*self))
    }

    fn assign_reference(&mut self, value: ReferenceValue) -> bool {
        match value {
            ReferenceValue::Entity(Some(entity)) => {
                *self = entity;
                true
            }
            other => kind_mismatch(Self::KIND, &other),
        }
    }
}

impl ReferenceField for Option<EntityId> {
    const KIND: ReferenceKind = ReferenceKind::Entity;

    fn to_reference(&self) -> ReferenceValue {
        ReferenceValue::Entity(*self)
    }

    fn assign_reference(&mut self, value: ReferenceValue) -> bool {
        match value {
            ReferenceValue::Entity(entity) => {
                *self = entity;
                true
            }
            other => kind_mismatch(Self::KIND, &other),
        }
    }
}

impl ReferenceField for Vec<EntityId> {
    const KIND: ReferenceKind = ReferenceKind::Entities;

    fn to_reference(&self) -> ReferenceValue {
        ReferenceValue::Entities(self.clone())
    }

    fn assign_reference(&mut self, value: ReferenceValue) -> bool {
        match value {
            ReferenceValue::Entities(entities) => {
                *self = entities;
                true
            }
            other => kind_mismatch(Self::KIND, &other),
        }
    }
}

impl ReferenceField for ComponentRef {
    const KIND: ReferenceKind = ReferenceKind::Component;

    fn to_reference(&self) -> ReferenceValue {
        ReferenceValue::Component(Some(*self))
    }

    fn assign_reference(&mut self, value: ReferenceValue) -> bool {
        match value {
            ReferenceValue::Component(Some(component)) => {
                *self = component;
                true
            }
            other => kind_mismatch(Self::KIND, &other),
        }
    }
}

impl ReferenceField for Option<ComponentRef> {
    const KIND: ReferenceKind = ReferenceKind::Component;

    fn to_reference(&self) -> ReferenceValue {
        ReferenceValue::Component(*self)
    }

    fn assign_reference(&mut self, value: ReferenceValue) -> bool {
        match value {
            ReferenceValue::Component(component) => {
                *self = component;
                true
            }
            other => kind_mismatch(Self::KIND, &other),
        }
    }
}

impl ReferenceField for Vec<ComponentRef> {
    const KIND: ReferenceKind = ReferenceKind::Components;

    fn to_reference(&self) -> ReferenceValue {
        ReferenceValue::Components(self.clone())
    }

    fn assign_reference(&mut self, value: ReferenceValue) -> bool {
        match value {
            ReferenceValue::Components(components) => {
                *self = components;
                true
            }
            other => kind_mismatch(Self::KIND, &other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: EntityId = EntityId::new(0, 0);
    const B: EntityId = EntityId::new(1, 0);
    const A_COPY: EntityId = EntityId::new(5, 0);

    fn map_a(e: EntityId) -> Option<EntityId> {
        (e == A).then_some(A_COPY)
    }

    #[test]
    fn remap_rewrites_known_handles_and_keeps_the_rest() {
        let value = ReferenceValue::Entities(vec![A, B]);
        let mapped = value.remap(map_a, |_| None);
        assert_eq!(mapped, ReferenceValue::Entities(vec![A_COPY, B]));
    }

    #[test]
    fn remap_of_component_handles_uses_component_map() {
        let id = ComponentId::from_raw(3);
        let value = ReferenceValue::Component(Some(ComponentRef::new(A, id)));
        let mapped = value.remap(map_a, |c| Some(ComponentRef::new(A_COPY, c.component)));
        assert_eq!(
            mapped,
            ReferenceValue::Component(Some(ComponentRef::new(A_COPY, id)))
        );
    }

    #[test]
    fn referenced_entities_includes_component_owners() {
        let id = ComponentId::from_raw(1);
        let value =
            ReferenceValue::Components(vec![ComponentRef::new(A, id), ComponentRef::new(B, id)]);
        assert_eq!(value.referenced_entities(), vec![A, B]);
        assert!(ReferenceValue::Entity(None).referenced_entities().is_empty());
    }

    #[test]
    fn fields_reject_values_of_another_kind() {
        let mut target: Option<EntityId> = Some(A);
        assert!(!target.assign_reference(ReferenceValue::Entities(vec![B])));
        assert_eq!(target, Some(A));

        assert!(target.assign_reference(ReferenceValue::Entity(None)));
        assert_eq!(target, None);
    }

    #[test]
    fn required_entity_field_refuses_none() {
        let mut target = A;
        assert!(!target.assign_reference(ReferenceValue::Entity(None)));
        assert!(target.assign_reference(ReferenceValue::Entity(Some(B))));
        assert_eq!(target, B);
    }
}
