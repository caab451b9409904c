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

//! The name and id keyed component construction registry.

use std::collections::{BTreeMap, HashMap};

use super::component::{Component, ComponentClass, ComponentId, ComponentMeta};
use super::error::EcsError;

/// Everything the factory knows about one registered component type.
#[derive(Debug, Clone)]
pub struct ComponentCreationData {
    name: &'static str,
    id: ComponentId,
    create: fn() -> Box<dyn Component>,
    meta: &'static ComponentMeta,
    group: String,
}

impl ComponentCreationData {
    /// The class name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The type id.
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// The metaclass.
    pub fn meta(&self) -> &'static ComponentMeta {
        self.meta
    }

    /// The group the type was registered under.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Constructs a default instance.
    pub fn create(&self) -> Box<dyn Component> {
        (self.create)()
    }
}

fn create_default<T: ComponentClass + Default>() -> Box<dyn Component> {
    Box::new(T::default())
}

/// Strips the module path and generic arguments from a type name.
fn short_type_name(type_name: &str) -> &str {
    let base = type_name.split('<').next().unwrap_or(type_name);
    base.rsplit("::").next().unwrap_or(base)
}

/// A registry that creates components from their name or id.
///
/// The factory is an ordinary value: a world configuration or an application
/// owns one and hands out `&ComponentFactory` where components are created
/// by name.
#[derive(Debug, Default)]
pub struct ComponentFactory {
    components: BTreeMap<ComponentId, ComponentCreationData>,
    by_name: HashMap<&'static str, ComponentId>,
}

impl ComponentFactory {
    /// Creates an empty factory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a factory holding every type submitted with
    /// `#[component(group = "...")]` in the final binary.
    pub fn with_registered_components() -> Self {
        let mut factory = Self::new();
        for registration in inventory::iter::<ComponentRegistration> {
            // Failures are logged by `register_component`.
            let _ = registration.register(&mut factory);
        }
        log::debug!(
            "Component factory built with {} registered components",
            factory.len()
        );
        factory
    }

    /// Registers `T` under `group`.
    ///
    /// Fails without modifying the factory if the metaclass name differs from
    /// the type's name, or if the id or name is already taken.
    pub fn register_component<T: ComponentClass + Default>(
        &mut self,
        group: impl Into<String>,
    ) -> Result<(), EcsError> {
        let meta = T::class_meta();
        let type_name = meta.type_name();
        if meta.name() != short_type_name(type_name) {
            log::error!(
                "Invalid metaclass '{}' for component type '{}'",
                meta.name(),
                type_name
            );
            return Err(EcsError::MetaClassMismatch {
                meta_name: meta.name(),
                type_name,
            });
        }

        let existing = self.components.get(&meta.id()).or_else(|| {
            self.by_name
                .get(meta.name())
                .and_then(|id| self.components.get(id))
        });
        if let Some(existing) = existing {
            log::error!(
                "Component '{}' ({}) is already registered as '{}'",
                meta.name(),
                meta.id(),
                existing.name()
            );
            return Err(EcsError::DuplicateComponent {
                id: meta.id(),
                name: meta.name(),
                existing: existing.name(),
            });
        }

        let data = ComponentCreationData {
            name: meta.name(),
            id: meta.id(),
            create: create_default::<T>,
            meta,
            group: group.into(),
        };
        log::debug!(
            "Registered component '{}' ({}) in group '{}'",
            data.name,
            data.id,
            data.group
        );
        self.by_name.insert(data.name, data.id);
        self.components.insert(data.id, data);
        Ok(())
    }

    /// Creates a default instance of the component registered as `name`.
    pub fn create_component(&self, name: &str) -> Option<Box<dyn Component>> {
        match self.by_name.get(name) {
            Some(id) => self.create_component_by_id(*id),
            None => {
                log::warn!("Undefined component '{name}'");
                None
            }
        }
    }

    /// Creates a default instance of the component registered under `id`.
    pub fn create_component_by_id(&self, id: ComponentId) -> Option<Box<dyn Component>> {
        match self.components.get(&id) {
            Some(data) => Some(data.create()),
            None => {
                log::warn!("Undefined component id {id}");
                None
            }
        }
    }

    /// Creates a registered `T` through its creation thunk.
    pub fn create<T: ComponentClass>(&self) -> Option<Box<T>> {
        self.create_component_by_id(T::static_component_id())?
            .safe_cast_boxed::<T>()
    }

    /// The id registered under `name`.
    pub fn component_id(&self, name: &str) -> Option<ComponentId> {
        self.by_name.get(name).copied()
    }

    /// The class name registered under `id`.
    pub fn component_name(&self, id: ComponentId) -> Option<&'static str> {
        self.components.get(&id).map(|data| data.name)
    }

    /// The metaclass registered under `id`.
    pub fn component_meta(&self, id: ComponentId) -> Option<&'static ComponentMeta> {
        self.components.get(&id).map(|data| data.meta)
    }

    /// The group `id` was registered under.
    pub fn component_group(&self, id: ComponentId) -> Option<&str> {
        self.components.get(&id).map(|data| data.group.as_str())
    }

    /// The full creation record of `id`.
    pub fn creation_data(&self, id: ComponentId) -> Option<&ComponentCreationData> {
        self.components.get(&id)
    }

    /// The ids registered under `group`, in id order.
    pub fn components_in_group<'a>(
        &'a self,
        group: &'a str,
    ) -> impl Iterator<Item = ComponentId> + 'a {
        self.components
            .values()
            .filter(move |data| data.group == group)
            .map(|data| data.id)
    }

    /// Every creation record, in id order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentCreationData> {
        self.components.values()
    }

    /// Returns `true` if `id` is registered.
    pub fn contains(&self, id: ComponentId) -> bool {
        self.components.contains_key(&id)
    }

    /// The number of registered types.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// A component type submitted for automatic registration.
///
/// `#[component(group = "...")]` submits one of these through `inventory`;
/// [`ComponentFactory::with_registered_components`] collects them.
pub struct ComponentRegistration {
    group: &'static str,
    register: fn(&mut ComponentFactory, &'static str) -> Result<(), EcsError>,
}

fn register_submitted<T: ComponentClass + Default>(
    factory: &mut ComponentFactory,
    group: &'static str,
) -> Result<(), EcsError> {
    factory.register_component::<T>(group)
}

impl ComponentRegistration {
    /// Describes the registration of `T` under `group`.
    pub const fn of<T: ComponentClass + Default>(group: &'static str) -> Self {
        Self {
            group,
            register: register_submitted::<T>,
        }
    }

    /// The group the type is registered under.
    pub fn group(&self) -> &'static str {
        self.group
    }

    /// Registers the type in `factory`.
    pub fn register(&self, factory: &mut ComponentFactory) -> Result<(), EcsError> {
        (self.register)(factory, self.group)
    }
}

inventory::collect!(ComponentRegistration);
