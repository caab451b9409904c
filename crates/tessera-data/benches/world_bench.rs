use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use tessera_data::ecs::{
    static_component_id, Component, EcsWorld, EntityAspect, EntityCopyData, EntityId,
};

#[derive(Debug, Clone, Copy, Default, Component)]
struct Position(u32);

#[derive(Debug, Clone, Copy, Default, Component)]
struct RenderTag;

#[derive(Debug, Clone, Default, Component)]
struct Children {
    #[reference(owned)]
    entities: Vec<EntityId>,
}

fn bench_attach(c: &mut Criterion) {
    let mut group = c.benchmark_group("ECS Attach");

    group.bench_function("Create 1000 entities with two components", |b| {
        b.iter(|| {
            let mut world = EcsWorld::default();
            for i in 0..1_000 {
                let entity = world.create_entity();
                world.add_component(entity, Box::new(Position(i))).ok();
                world.add_component(entity, Box::new(RenderTag)).ok();
            }
            black_box(world.entities_count());
        });
    });

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut world = EcsWorld::default();
    for i in 0..10_000 {
        let entity = world.create_entity();
        world.add_component(entity, Box::new(Position(i))).ok();
        if i % 2 == 0 {
            world.add_component(entity, Box::new(RenderTag)).ok();
        }
    }
    let aspect = EntityAspect::have_all_of([
        static_component_id::<Position>(),
        static_component_id::<RenderTag>(),
    ]);

    c.bench_function("Aspect query (Position & RenderTag)", |b| {
        b.iter(|| black_box(world.query(&aspect).len()));
    });
}

fn bench_deep_copy(c: &mut Criterion) {
    let mut world = EcsWorld::default();
    let children: Vec<EntityId> = (0..100)
        .map(|i| {
            let child = world.create_entity();
            world.add_component(child, Box::new(Position(i))).ok();
            child
        })
        .collect();
    let root = world.create_entity();
    world
        .add_component(root, Box::new(Children { entities: children }))
        .ok();

    c.bench_function("Deep copy of a root owning 100 entities", |b| {
        b.iter(|| {
            let mut copy_data = EntityCopyData::new();
            if world.copy_entity_with(root, &mut copy_data).is_ok() {
                for copy in copy_data.entities().values() {
                    world.remove_entity(black_box(*copy));
                }
            }
        });
    });
}

criterion_group!(benches, bench_attach, bench_queries, bench_deep_copy);
criterion_main!(benches);
