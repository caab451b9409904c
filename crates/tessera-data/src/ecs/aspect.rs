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

use super::component::ComponentId;
use super::entity::Entity;

/// A component-set filter over entities.
///
/// Matching first compares the entity's component mask against the aspect's
/// masks, which can only reject. Entities that survive are checked against the
/// exact id sets, so two types sharing a mask bit never cause a false match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityAspect {
    all_of: Vec<ComponentId>,
    any_of: Vec<ComponentId>,
    none_of: Vec<ComponentId>,
    all_mask: u64,
    any_mask: u64,
}

fn mask_of(ids: &[ComponentId]) -> u64 {
    ids.iter().fold(0, |mask, id| mask | id.mask_flag())
}

impl EntityAspect {
    /// Matches entities carrying every one of `ids`.
    pub fn have_all_of(ids: impl IntoIterator<Item = ComponentId>) -> Self {
        Self::default().and_all_of(ids)
    }

    /// Matches entities carrying at least one of `ids`.
    pub fn have_any_of(ids: impl IntoIterator<Item = ComponentId>) -> Self {
        Self::default().and_any_of(ids)
    }

    /// Matches entities carrying none of `ids`.
    pub fn have_none_of(ids: impl IntoIterator<Item = ComponentId>) -> Self {
        Self::default().and_none_of(ids)
    }

    /// Adds required ids.
    pub fn and_all_of(mut self, ids: impl IntoIterator<Item = ComponentId>) -> Self {
        self.all_of.extend(ids);
        self.all_mask = mask_of(&self.all_of);
        self
    }

    /// Adds alternative ids; at least one must be present.
    pub fn and_any_of(mut self, ids: impl IntoIterator<Item = ComponentId>) -> Self {
        self.any_of.extend(ids);
        self.any_mask = mask_of(&self.any_of);
        self
    }

    /// Adds excluded ids.
    pub fn and_none_of(mut self, ids: impl IntoIterator<Item = ComponentId>) -> Self {
        self.none_of.extend(ids);
        self
    }

    /// Returns `true` if `entity` is active in the hierarchy and matches every set.
    pub fn has_intersection(&self, entity: &Entity) -> bool {
        if !entity.active_in_hierarchy() {
            return false;
        }

        let mask = entity.components_mask();
        if mask & self.all_mask != self.all_mask {
            return false;
        }
        if !self.any_of.is_empty() && mask & self.any_mask == 0 {
            return false;
        }

        self.all_of.iter().all(|id| entity.has_component_id(*id))
            && (self.any_of.is_empty() || self.any_of.iter().any(|id| entity.has_component_id(*id)))
            && !self.none_of.iter().any(|id| entity.has_component_id(*id))
    }
}
