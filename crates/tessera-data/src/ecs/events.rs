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

//! World-level notifications.
//!
//! Structural changes are queued as [`WorldEvent`]s while they happen and
//! delivered to [`WorldEvents`] subscribers when the world is updated.

use tessera_core::delegate::MultiDelegate;
use tessera_core::ecs::entity::EntityId;

/// A structural change of a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldEvent {
    /// An entity was created.
    EntityAdded(EntityId),
    /// An entity was removed. Its id no longer resolves.
    EntityRemoved(EntityId),
    /// A component was attached to or detached from an entity.
    ComponentsChanged(EntityId),
    /// An entity's active-in-hierarchy state changed.
    ActiveChanged(EntityId),
}

impl WorldEvent {
    /// The entity the event is about.
    pub fn entity(&self) -> EntityId {
        match *self {
            WorldEvent::EntityAdded(id)
            | WorldEvent::EntityRemoved(id)
            | WorldEvent::ComponentsChanged(id)
            | WorldEvent::ActiveChanged(id) => id,
        }
    }
}

/// Subscriber lists for world events, one per event kind.
#[derive(Debug, Default)]
pub struct WorldEvents {
    /// Receives [`WorldEvent::EntityAdded`].
    pub entity_added: MultiDelegate<EntityId>,
    /// Receives [`WorldEvent::EntityRemoved`].
    pub entity_removed: MultiDelegate<EntityId>,
    /// Receives [`WorldEvent::ComponentsChanged`].
    pub entity_changed: MultiDelegate<EntityId>,
    /// Receives [`WorldEvent::ActiveChanged`].
    pub entity_active_changed: MultiDelegate<EntityId>,
}

impl WorldEvents {
    /// Creates empty subscriber lists.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers one event to the matching list.
    pub fn dispatch(&self, event: WorldEvent) {
        log::trace!("Dispatching {event:?}");
        match event {
            WorldEvent::EntityAdded(id) => self.entity_added.invoke(id),
            WorldEvent::EntityRemoved(id) => self.entity_removed.invoke(id),
            WorldEvent::ComponentsChanged(id) => self.entity_changed.invoke(id),
            WorldEvent::ActiveChanged(id) => self.entity_active_changed.invoke(id),
        }
    }
}
