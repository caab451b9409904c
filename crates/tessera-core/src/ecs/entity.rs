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

//! Defines the entity handle used by every layer of the engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A unique identifier for an entity in a world.
///
/// It combines a slot index with a generation count. When an entity is removed,
/// its slot can be recycled for a new entity, but the generation is incremented,
/// so handles to the old occupant stop resolving instead of silently pointing at
/// the new one. Components hold these handles as their back-reference to the
/// owning entity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EntityId {
    /// The index of the entity's slot in the world's entity table.
    pub index: u32,
    /// A generation counter that is incremented each time the index is recycled.
    pub generation: u32,
}

impl EntityId {
    /// Creates a handle from its raw parts.
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_generation() {
        assert_eq!(EntityId::new(3, 1).to_string(), "3v1");
    }

    #[test]
    fn ordering_is_index_major() {
        assert!(EntityId::new(1, 9) < EntityId::new(2, 0));
        assert!(EntityId::new(1, 0) < EntityId::new(1, 1));
    }

    #[test]
    fn serde_round_trip_keeps_both_parts() {
        let id = EntityId::new(7, 2);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#"{"index":7,"generation":2}"#);
        let back: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
