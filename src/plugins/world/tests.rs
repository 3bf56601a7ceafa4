use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;
use crate::common::test_utils::run_system_once;
use crate::plugins::ai::{PatrolLane, PATROL_LANES};

use super::Ledge;

#[test]
fn spawns_walls_on_enter() {
    let mut world = World::new();
    run_system_once(&mut world, super::spawn_arena);

    let walls = world
        .query::<(&Name, &RigidBody)>()
        .iter(&world)
        .filter(|(n, rb)| n.as_str().starts_with("Wall") && matches!(**rb, RigidBody::Static))
        .count();
    assert_eq!(walls, 4);
}

#[test]
fn one_ledge_per_patrol_lane() {
    let mut world = World::new();
    run_system_once(&mut world, super::spawn_ledges);

    let mut q = world.query_filtered::<&CollisionLayers, With<Ledge>>();
    assert_eq!(q.iter(&world).count(), PATROL_LANES.len());
    for layers in q.iter(&world) {
        assert!(layers.memberships.has_all(Layer::World));
        assert!(layers.filters.has_all(Layer::EnemyBullet));
    }
}

#[test]
fn ledge_sits_under_the_lane_and_covers_it() {
    let lane = PatrolLane { start_x: -100.0, end_x: 300.0, y: 50.0, fire_weapon: false };
    let (center, size) = super::ledge_rect(&lane);

    assert!(center.y + size.y * 0.5 < lane.y);
    assert!(center.x - size.x * 0.5 < lane.start_x);
    assert!(center.x + size.x * 0.5 > lane.end_x);
}
