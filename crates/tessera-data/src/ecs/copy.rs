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

//! The transaction context of a deep entity copy.
//!
//! A copy runs in two passes. The first pass clones every reachable entity and
//! component, recording `old -> new` in the maps and queueing one
//! [`PropertyPatch`] per reference field. The second pass, run once the
//! outermost copy returns, rewrites each queued field through the maps. Cycles
//! terminate because an entity already in the map is never cloned twice.

use std::collections::HashMap;

use tessera_core::ecs::entity::EntityId;

use super::config::DEFAULT_MAX_COPY_DEPTH;
use super::error::EcsError;
use super::reference::{ComponentRef, ReferenceProperty, ReferenceValue};
use super::scene::SceneId;

/// A reference field whose value must be redirected once the copy completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyPatch {
    /// The field to rewrite.
    pub property: ReferenceProperty,
    /// The component the value was cloned from.
    pub source: ComponentRef,
    /// The cloned component holding the value to rewrite.
    pub target: ComponentRef,
}

/// State threaded through one top-level copy operation.
#[derive(Debug)]
pub struct EntityCopyData {
    entities: HashMap<EntityId, EntityId>,
    components: HashMap<ComponentRef, ComponentRef>,
    component_properties: Vec<PropertyPatch>,
    /// Entities created by this copy, in creation order. Their awakening is
    /// deferred to the resolution pass.
    copied_entities: Vec<EntityId>,
    stack_depth: usize,
    max_depth: usize,
    scene: Option<SceneId>,
}

impl EntityCopyData {
    /// Creates an empty context with the default depth limit.
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_COPY_DEPTH)
    }

    /// Creates an empty context with the given depth limit.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            entities: HashMap::new(),
            components: HashMap::new(),
            component_properties: Vec::new(),
            copied_entities: Vec::new(),
            stack_depth: 0,
            max_depth,
            scene: None,
        }
    }

    /// Places every copied entity in `scene` instead of the source's scene.
    pub fn with_scene(mut self, scene: SceneId) -> Self {
        self.scene = Some(scene);
        self
    }

    /// The scene override, if any.
    pub fn scene(&self) -> Option<SceneId> {
        self.scene
    }

    /// The clone of `old`, if it has been copied already.
    pub fn entity(&self, old: EntityId) -> Option<EntityId> {
        self.entities.get(&old).copied()
    }

    /// Records that `new` is the clone of `old`.
    pub fn insert_entity(&mut self, old: EntityId, new: EntityId) {
        self.entities.insert(old, new);
    }

    /// The clone of `old`, if it has been copied already.
    pub fn component(&self, old: ComponentRef) -> Option<ComponentRef> {
        self.components.get(&old).copied()
    }

    /// Records that `new` is the clone of `old`.
    pub fn insert_component(&mut self, old: ComponentRef, new: ComponentRef) {
        self.components.insert(old, new);
    }

    /// Every `old -> new` entity mapping recorded so far.
    pub fn entities(&self) -> &HashMap<EntityId, EntityId> {
        &self.entities
    }

    /// Every `old -> new` component mapping recorded so far.
    pub fn components(&self) -> &HashMap<ComponentRef, ComponentRef> {
        &self.components
    }

    /// Queues a reference field for the resolution pass.
    pub fn push_component_property(&mut self, patch: PropertyPatch) {
        self.component_properties.push(patch);
    }

    /// The reference fields queued so far.
    pub fn component_properties(&self) -> &[PropertyPatch] {
        &self.component_properties
    }

    /// The entities created so far.
    pub fn copied_entities(&self) -> &[EntityId] {
        &self.copied_entities
    }

    pub(crate) fn push_copied_entity(&mut self, new: EntityId) {
        self.copied_entities.push(new);
    }

    /// The current nesting depth.
    pub fn stack_depth(&self) -> usize {
        self.stack_depth
    }

    /// The configured depth limit.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Enters one level of nested copy.
    pub fn push_stack_depth(&mut self) -> Result<(), EcsError> {
        if self.stack_depth >= self.max_depth {
            log::error!(
                "Entity copy exceeded the maximum depth of {}",
                self.max_depth
            );
            return Err(EcsError::CopyDepthExceeded {
                limit: self.max_depth,
            });
        }
        self.stack_depth += 1;
        Ok(())
    }

    /// Leaves one level of nested copy and returns the new depth.
    pub fn pop_stack_depth(&mut self) -> usize {
        if self.stack_depth == 0 {
            log::warn!("Unbalanced pop of the entity copy stack");
        } else {
            self.stack_depth -= 1;
        }
        self.stack_depth
    }

    /// Redirects a reference value to the cloned graph. Handles outside the
    /// copied subgraph are kept.
    pub fn remap(&self, value: ReferenceValue) -> ReferenceValue {
        value.remap(|e| self.entity(e), |c| self.component(c))
    }

    /// Returns `true` if no copy has recorded anything in this context.
    pub fn is_empty(&self) -> bool {
        self.stack_depth == 0
            && self.entities.is_empty()
            && self.components.is_empty()
            && self.component_properties.is_empty()
            && self.copied_entities.is_empty()
    }

    /// Forgets every recorded mapping so the context can start a new copy.
    /// The depth limit and scene override are kept.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.components.clear();
        self.component_properties.clear();
        self.copied_entities.clear();
        self.stack_depth = 0;
    }

    pub(crate) fn take_component_properties(&mut self) -> Vec<PropertyPatch> {
        std::mem::take(&mut self.component_properties)
    }

    pub(crate) fn take_copied_entities(&mut self) -> Vec<EntityId> {
        std::mem::take(&mut self.copied_entities)
    }
}

impl Default for EntityCopyData {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_is_bounded() {
        let mut copy_data = EntityCopyData::with_max_depth(2);
        assert!(copy_data.push_stack_depth().is_ok());
        assert!(copy_data.push_stack_depth().is_ok());
        assert_eq!(
            copy_data.push_stack_depth(),
            Err(EcsError::CopyDepthExceeded { limit: 2 })
        );
        assert_eq!(copy_data.stack_depth(), 2);

        assert_eq!(copy_data.pop_stack_depth(), 1);
        assert_eq!(copy_data.pop_stack_depth(), 0);
        assert_eq!(copy_data.pop_stack_depth(), 0, "Popping at zero stays at zero");
    }

    #[test]
    fn clear_keeps_limit_and_scene() {
        let scene = SceneId(4);
        let mut copy_data = EntityCopyData::with_max_depth(3).with_scene(scene);
        assert!(copy_data.is_empty());

        copy_data.insert_entity(EntityId::new(1, 0), EntityId::new(2, 0));
        copy_data.push_copied_entity(EntityId::new(2, 0));
        assert!(!copy_data.is_empty());

        copy_data.clear();
        assert!(copy_data.is_empty());
        assert!(copy_data.entities().is_empty());
        assert_eq!(copy_data.max_depth(), 3);
        assert_eq!(copy_data.scene(), Some(scene));
    }

    #[test]
    fn remap_uses_recorded_mappings() {
        let old = EntityId::new(1, 0);
        let new = EntityId::new(9, 0);
        let outside = EntityId::new(2, 0);

        let mut copy_data = EntityCopyData::new();
        copy_data.insert_entity(old, new);

        let value = copy_data.remap(ReferenceValue::Entities(vec![old, outside]));
        assert_eq!(value, ReferenceValue::Entities(vec![new, outside]));
    }
}
