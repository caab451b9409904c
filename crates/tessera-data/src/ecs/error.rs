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

//! Defines the error type shared by the ECS runtime.

use std::fmt;

use tessera_core::ecs::entity::EntityId;

use super::component::ComponentId;
use super::scene::SceneId;

/// An error raised by a world, a factory or a copy operation.
///
/// Every variant is logged at error level where it is raised, so callers may
/// simply propagate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// The entity handle is stale or was never allocated.
    EntityNotFound {
        /// The handle that did not resolve.
        id: EntityId,
    },
    /// The entity exists but does not carry the requested component.
    ComponentNotFound {
        /// The entity that was searched.
        entity: EntityId,
        /// The id of the missing component type.
        component: ComponentId,
    },
    /// The entity already carries a component of this type.
    ComponentAlreadyExists {
        /// The entity the component was offered to.
        entity: EntityId,
        /// The class name of the rejected component.
        component: &'static str,
    },
    /// A second component type was registered under an id already in the factory.
    DuplicateComponent {
        /// The contested id.
        id: ComponentId,
        /// The class name of the rejected registration.
        name: &'static str,
        /// The class name of the registration that was kept.
        existing: &'static str,
    },
    /// A component's metaclass name does not match its Rust type name.
    MetaClassMismatch {
        /// The name declared by the metaclass.
        meta_name: &'static str,
        /// The full Rust type name of the component.
        type_name: &'static str,
    },
    /// No component type is registered under this name.
    UnknownComponent {
        /// The name that was looked up.
        name: String,
    },
    /// A deep copy nested deeper than the configured limit.
    CopyDepthExceeded {
        /// The configured maximum depth.
        limit: usize,
    },
    /// A deep copy was started with a context that holds state from an earlier copy.
    CopyContextInUse,
    /// The scene handle does not belong to this world.
    SceneNotFound {
        /// The handle that did not resolve.
        id: SceneId,
    },
    /// A byte buffer does not have the size of the component it should hold.
    SizeMismatch {
        /// The size of the component type.
        expected: usize,
        /// The length of the provided buffer.
        actual: usize,
    },
}

impl fmt::Display for EcsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EcsError::EntityNotFound { id } => write!(f, "Entity {id} not found"),
            EcsError::ComponentNotFound { entity, component } => {
                write!(f, "Component {component} not found on entity {entity}")
            }
            EcsError::ComponentAlreadyExists { entity, component } => {
                write!(f, "Component '{component}' already exists on entity {entity}")
            }
            EcsError::DuplicateComponent { id, name, existing } => {
                write!(
                    f,
                    "Component '{name}' has the same id {id} as registered component '{existing}'"
                )
            }
            EcsError::MetaClassMismatch {
                meta_name,
                type_name,
            } => {
                write!(
                    f,
                    "Invalid metaclass '{meta_name}' for component type '{type_name}'"
                )
            }
            EcsError::UnknownComponent { name } => {
                write!(f, "Undefined component '{name}'")
            }
            EcsError::CopyDepthExceeded { limit } => {
                write!(f, "Entity copy exceeded the maximum depth of {limit}")
            }
            EcsError::CopyContextInUse => {
                write!(f, "Entity copy context already holds an earlier copy")
            }
            EcsError::SceneNotFound { id } => write!(f, "Scene {id} not found"),
            EcsError::SizeMismatch { expected, actual } => {
                write!(
                    f,
                    "Component data has size {actual} bytes, expected {expected}"
                )
            }
        }
    }
}

impl std::error::Error for EcsError {}
