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

use std::cell::Cell;
use std::rc::Rc;

use tessera_data::ecs::{
    Component, ComponentContext, ComponentLifecycle, ComponentRef, EcsWorld, EntityAspect,
    EntityCopyData, EntityId, WorldConfig,
};

// --- DUMMY COMPONENTS FOR THIS TEST ---
#[derive(Debug, Clone, Default, PartialEq, Component)]
struct Transform {
    x: f32,
    y: f32,
}

/// A weapon attached to its wielder.
#[derive(Debug, Clone, Default, Component)]
struct Weapon {
    #[reference]
    wielder: Option<ComponentRef>,
}

/// A character owning its equipment.
#[derive(Debug, Clone, Default, Component)]
#[component(lifecycle)]
struct Inventory {
    #[reference(owned)]
    items: Vec<EntityId>,
    #[reference]
    ally: Option<EntityId>,
    awakenings: Rc<Cell<u32>>,
}

impl ComponentLifecycle for Inventory {
    fn process_entity_awakened(&mut self, _ctx: &ComponentContext) {
        self.awakenings.set(self.awakenings.get() + 1);
    }
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn spawn_character(world: &mut EcsWorld, ally: Option<EntityId>) -> (EntityId, EntityId) {
    let character = world.create_entity();
    let transform = world
        .add_component(character, Box::new(Transform { x: 1.0, y: 2.0 }))
        .unwrap();

    let sword = world.create_entity();
    world
        .add_component(
            sword,
            Box::new(Weapon {
                wielder: Some(transform),
            }),
        )
        .unwrap();

    world
        .add_component(
            character,
            Box::new(Inventory {
                items: vec![sword],
                ally,
                awakenings: Rc::new(Cell::new(0)),
            }),
        )
        .unwrap();
    (character, sword)
}

#[test]
fn test_copied_character_owns_a_copied_weapon() {
    // --- 1. ARRANGE ---
    init_logging();
    let mut world = EcsWorld::default();
    let ally = world.create_entity();
    let (character, sword) = spawn_character(&mut world, Some(ally));

    // --- 2. ACT ---
    let mut copy_data = EntityCopyData::new();
    let clone = world.copy_entity_with(character, &mut copy_data).unwrap();

    // --- 3. ASSERT ---
    let sword_clone = copy_data.entity(sword).expect("The sword is owned");
    let inventory = world.get_component::<Inventory>(clone).unwrap();
    assert_eq!(inventory.items, vec![sword_clone]);
    assert_eq!(inventory.ally, Some(ally), "The ally was not copied");

    let weapon = world.get_component::<Weapon>(sword_clone).unwrap();
    assert_eq!(
        weapon.wielder,
        Some(ComponentRef::of::<Transform>(clone)),
        "The copied weapon points at the copied wielder"
    );
    assert_eq!(
        world.get_component::<Transform>(clone),
        Some(&Transform { x: 1.0, y: 2.0 })
    );
    assert_eq!(inventory.awakenings.get(), 2, "Once for the original, once for the copy");
    assert_eq!(world.entities_count(), 5);
}

#[test]
fn test_copies_show_up_in_queries_and_events() {
    init_logging();
    let mut world = EcsWorld::default();
    let (character, _) = spawn_character(&mut world, None);
    world.update();

    let added = Rc::new(Cell::new(0));
    let counter = added.clone();
    world
        .events_mut()
        .entity_added
        .subscribe_functor(move |_| counter.set(counter.get() + 1));

    world.copy_entity(character).unwrap();
    world.update();

    let aspect = EntityAspect::have_all_of([tessera_data::ecs::static_component_id::<Inventory>()]);
    assert_eq!(world.query(&aspect).len(), 2);
    assert_eq!(added.get(), 2);
}

#[test]
fn test_copy_into_a_target_scene() {
    init_logging();
    let mut prefabs = EcsWorld::new(WorldConfig {
        name: "Prefabs".to_string(),
        ..WorldConfig::default()
    });
    let (character, _) = spawn_character(&mut prefabs, None);

    let mut level = EcsWorld::default();
    let scene = level.create_scene("Level 1");
    let mut copy_data = EntityCopyData::new().with_scene(scene);
    let clone = level
        .copy_entity_from(&prefabs, character, &mut copy_data)
        .unwrap();

    assert_eq!(level.entity(clone).unwrap().scene(), Some(scene));
    assert_eq!(level.scene(scene).unwrap().len(), 2);
    assert_eq!(prefabs.entities_count(), 2);
}
