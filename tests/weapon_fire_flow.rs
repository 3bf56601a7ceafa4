//! End-to-end weapon flow on a headless app:
//! command -> weapon tick -> pool allocation -> owner notification -> reload.

mod common;

use bevy::prelude::*;
use cybr_game::plugins::pawns::{AmmoReadout, Equipped, LastShot};
use cybr_game::plugins::player::Player;
use cybr_game::plugins::projectiles::components::{Bullet, BulletState};
use cybr_game::plugins::projectiles::messages::BulletKind;
use cybr_game::plugins::weapons::{FireOrder, WeaponCommand};

fn player(app: &mut App) -> (Entity, Entity) {
    let (e, equipped) = app
        .world_mut()
        .query_filtered::<(Entity, &Equipped), With<Player>>()
        .single(app.world())
        .expect("player spawned");
    (e, equipped.0)
}

fn active_player_bullets(app: &mut App) -> usize {
    app.world_mut()
        .query::<(&Bullet, &BulletState)>()
        .iter(app.world())
        .filter(|(b, s)| b.kind == BulletKind::Player && **s == BulletState::Active)
        .count()
}

#[test]
fn fire_spawns_a_bullet_and_updates_ammo() {
    let mut app = common::app_in_game();
    let (pawn, weapon) = player(&mut app);

    app.world_mut()
        .write_message(WeaponCommand::fire(weapon, FireOrder::facing()));
    app.update();

    assert_eq!(active_player_bullets(&mut app), 1);
    assert_eq!(
        app.world().get::<AmmoReadout>(pawn),
        Some(&AmmoReadout { shots: 1, fire_limit: 6 })
    );
    let last = app.world().get::<LastShot>(pawn).expect("LastShot");
    assert_eq!(last.total, 1);
    assert!(last.bullet.is_some());
}

#[test]
fn releasing_the_trigger_reloads_to_full() {
    let mut app = common::app_in_game();
    let (pawn, weapon) = player(&mut app);

    // Two shots, spaced past the 240 ms fire rate.
    for _ in 0..2 {
        app.world_mut()
            .write_message(WeaponCommand::fire(weapon, FireOrder::facing()));
        for _ in 0..6 {
            app.update();
        }
    }
    assert_eq!(app.world().get::<AmmoReadout>(pawn).map(|r| r.shots), Some(2));

    app.world_mut()
        .write_message(WeaponCommand::stop_firing(weapon));
    for _ in 0..8 {
        app.update();
    }

    assert_eq!(app.world().get::<AmmoReadout>(pawn).map(|r| r.shots), Some(0));
}
