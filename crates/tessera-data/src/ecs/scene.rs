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

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tessera_core::ecs::entity::EntityId;

/// Identifies a scene inside one world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SceneId(pub u32);

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scene#{}", self.0)
    }
}

/// A named grouping of entities within a world.
///
/// An entity belongs to at most one scene. Destroying a scene removes its entities.
#[derive(Debug, Clone)]
pub struct EcsScene {
    id: SceneId,
    name: String,
    entities: BTreeSet<EntityId>,
}

impl EcsScene {
    pub(crate) fn new(id: SceneId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            entities: BTreeSet::new(),
        }
    }

    /// The scene handle.
    pub fn id(&self) -> SceneId {
        self.id
    }

    /// The scene name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if `entity` belongs to this scene.
    pub fn contains(&self, entity: EntityId) -> bool {
        self.entities.contains(&entity)
    }

    /// The member entities in handle order.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.iter().copied()
    }

    /// The number of member entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if the scene has no member.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub(crate) fn insert(&mut self, entity: EntityId) {
        self.entities.insert(entity);
    }

    pub(crate) fn remove(&mut self, entity: EntityId) {
        self.entities.remove(&entity);
    }
}
