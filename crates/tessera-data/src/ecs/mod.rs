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

//! Implements Tessera's entity-component runtime.
//!
//! An [`EcsWorld`] owns entities; every [`Entity`] owns at most one component of
//! each type. Components are polymorphic trait objects identified by a
//! [`ComponentId`] hashed from their type path, which also yields the 64-bit
//! mask used by [`EntityAspect`] as a fast pre-filter.
//!
//! Component types are declared with `#[derive(Component)]`. They can opt into
//! the [`ComponentLifecycle`] hooks, be created by name through a
//! [`ComponentFactory`], and take part in deep copies: fields marked
//! `#[reference]` are redirected to the cloned graph by the two-pass protocol
//! driven through [`EntityCopyData`].

mod aspect;
mod component;
mod config;
mod copy;
mod entity;
mod error;
mod events;
mod factory;
mod reference;
mod scene;
pub mod serialization;
mod world;

pub use aspect::EntityAspect;
pub use component::{
    static_component_id, Component, ComponentClass, ComponentContext, ComponentId,
    ComponentLifecycle, ComponentMeta,
};
#[doc(hidden)]
pub use component::attach_component;
pub use config::{WorldConfig, DEFAULT_MAX_COPY_DEPTH};
pub use copy::{EntityCopyData, PropertyPatch};
pub use entity::{Entity, EntityFlags};
pub use error::EcsError;
pub use events::{WorldEvent, WorldEvents};
pub use factory::{ComponentCreationData, ComponentFactory, ComponentRegistration};
pub use reference::{
    ComponentRef, ReferenceField, ReferenceKind, ReferenceProperty, ReferenceValue,
};
pub use scene::{EcsScene, SceneId};
pub use tessera_core::ecs::entity::EntityId;
pub use tessera_macros::Component;
pub use world::EcsWorld;
