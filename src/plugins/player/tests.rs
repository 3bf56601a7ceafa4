use std::time::Duration;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::test_utils::run_system_once;
use crate::common::tunables::Tunables;
use crate::plugins::pawns::{AmmoReadout, Equipped, Facing, Pawn, PawnLifeState};
use crate::plugins::weapons::{Aim, Weapon, WeaponAction, WeaponCommand};

use super::{Player, PlayerInput};

fn command_world(input: PlayerInput) -> (World, Entity) {
    let mut world = World::new();
    world.init_resource::<Messages<WeaponCommand>>();
    world.insert_resource(input);
    let weapon = world.spawn(Weapon::default()).id();
    world.spawn((Player, Equipped(weapon), PawnLifeState::Alive));
    (world, weapon)
}

fn drain_commands(world: &mut World) -> Vec<WeaponCommand> {
    world
        .resource_mut::<Messages<WeaponCommand>>()
        .drain()
        .collect()
}

#[test]
fn spawn_creates_armed_player() {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    run_system_once(&mut world, super::spawn);

    let (pawn, equipped, readout) = world
        .query_filtered::<(&Pawn, &Equipped, &AmmoReadout), With<Player>>()
        .single(&world)
        .expect("player spawned");
    assert_eq!(pawn.facing, Facing::Right);
    assert_eq!(*readout, AmmoReadout { shots: 0, fire_limit: 6 });

    let weapon = world.get::<Weapon>(equipped.0).expect("weapon entity");
    assert_eq!(weapon.fire_limit(), 6);
}

#[test]
fn apply_movement_sets_velocity() {
    let mut world = World::new();
    world.insert_resource(Tunables { player_speed: 100.0, ..default() });
    world.insert_resource(PlayerInput { move_axis: Vec2::new(1.0, 0.0), ..default() });
    world.spawn((Player, PawnLifeState::Alive, LinearVelocity::ZERO));

    run_system_once(&mut world, super::apply_movement);

    let v = world.query::<&LinearVelocity>().single(&world).unwrap();
    assert_eq!(v.0, Vec2::new(100.0, 0.0));
}

#[test]
fn dead_player_does_not_move() {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.insert_resource(PlayerInput { move_axis: Vec2::Y, ..default() });
    world.spawn((Player, PawnLifeState::Dead, LinearVelocity(Vec2::ONE)));

    run_system_once(&mut world, super::apply_movement);

    let v = world.query::<&LinearVelocity>().single(&world).unwrap();
    assert_eq!(v.0, Vec2::ZERO);
}

#[test]
fn facing_follows_cursor() {
    let mut world = World::new();
    world.insert_resource(PlayerInput { aim: Some(Vec2::new(-50.0, 0.0)), ..default() });
    world.spawn((Player, Pawn::default(), Transform::default()));

    run_system_once(&mut world, super::update_facing);

    let pawn = world.query::<&Pawn>().single(&world).unwrap();
    assert_eq!(pawn.facing, Facing::Left);
}

#[test]
fn facing_falls_back_to_movement_and_keeps_when_idle() {
    let mut world = World::new();
    world.insert_resource(PlayerInput { move_axis: Vec2::NEG_X, ..default() });
    world.spawn((Player, Pawn::default(), Transform::default()));

    run_system_once(&mut world, super::update_facing);
    world.resource_mut::<PlayerInput>().move_axis = Vec2::ZERO;
    run_system_once(&mut world, super::update_facing);

    let pawn = world.query::<&Pawn>().single(&world).unwrap();
    assert_eq!(pawn.facing, Facing::Left);
}

#[test]
fn trigger_press_fires_at_cursor() {
    let (mut world, weapon) = command_world(PlayerInput {
        trigger_pressed: true,
        aim: Some(Vec2::new(30.0, 40.0)),
        ..default()
    });

    run_system_once(&mut world, super::issue_weapon_commands);

    let cmds = drain_commands(&mut world);
    assert_eq!(cmds.len(), 1);
    assert_eq!(cmds[0].weapon, weapon);
    let WeaponAction::Fire(order) = cmds[0].action else {
        panic!("expected a fire command, got {:?}", cmds[0].action);
    };
    assert_eq!(order.aim, Aim::At(Vec2::new(30.0, 40.0)));
}

#[test]
fn trigger_without_cursor_fires_ahead() {
    let (mut world, _) = command_world(PlayerInput { trigger_pressed: true, ..default() });

    run_system_once(&mut world, super::issue_weapon_commands);

    let cmds = drain_commands(&mut world);
    let WeaponAction::Fire(order) = cmds[0].action else {
        panic!("expected a fire command");
    };
    assert_eq!(order.aim, Aim::Facing);
}

#[test]
fn release_and_reload_key_issue_commands() {
    let (mut world, _) = command_world(PlayerInput {
        trigger_released: true,
        reload: true,
        ..default()
    });

    run_system_once(&mut world, super::issue_weapon_commands);

    let actions: Vec<_> = drain_commands(&mut world).into_iter().map(|c| c.action).collect();
    assert!(matches!(actions.as_slice(), [WeaponAction::StopFiring, WeaponAction::Reload]));
}

#[test]
fn dying_player_cannot_fire() {
    let (mut world, _) = command_world(PlayerInput { trigger_pressed: true, ..default() });
    let mut q = world.query_filtered::<&mut PawnLifeState, With<Player>>();
    *q.single_mut(&mut world).unwrap() = PawnLifeState::Dying {
        timer: Timer::new(Duration::from_millis(350), TimerMode::Once),
    };

    run_system_once(&mut world, super::issue_weapon_commands);

    assert!(drain_commands(&mut world).is_empty());
}
