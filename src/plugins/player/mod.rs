//! Player plugin.
//!
//! Pipeline:
//! - Update: sample input into `PlayerInput`, turn trigger edges into `WeaponCommand`s
//! - FixedUpdate: apply velocity to kinematic rigid body
//!
//! Trigger model: each press fires once (toward the cursor when it is known, straight
//! ahead otherwise); releasing the trigger starts the reload cycle; `R` reloads.
//!
//! Input resources are optional so the whole pipeline is a no-op in headless apps.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};
use crate::plugins::camera::MainCamera;
use crate::plugins::pawns::systems::{apply_walk, track_equipped_weapons};
use crate::plugins::pawns::{equip_weapon, Equipped, Facing, HandOffset, Health, Pawn, PawnLifeState};
use crate::plugins::projectiles::messages::BulletKind;
use crate::plugins::weapons::systems::apply_weapon_commands;
use crate::plugins::weapons::{FireOrder, WeaponCommand, WeaponPreset};

#[derive(Component)]
pub struct Player;

#[derive(Resource, Default, Debug)]
struct PlayerInput {
    move_axis: Vec2,
    trigger_pressed: bool,
    trigger_released: bool,
    reload: bool,
    aim: Option<Vec2>,
}

pub const PLAYER_MAX_HP: i32 = 30;

pub fn plugin(app: &mut App) {
    app.insert_resource(PlayerInput::default())
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(
            Update,
            (
                gather_input,
                update_facing
                    .after(gather_input)
                    .before(track_equipped_weapons),
                issue_weapon_commands
                    .after(gather_input)
                    .before(apply_weapon_commands),
            )
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            FixedUpdate,
            apply_movement
                .after(apply_walk)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn(mut commands: Commands, tunables: Res<Tunables>) {
    let layers = CollisionLayers::new(
        Layer::Player,
        [Layer::World, Layer::Enemy, Layer::EnemyBullet],
    );

    let player = commands
        .spawn((
            Name::new("Player"),
            Player,
            Pawn::default(),
            PawnLifeState::Alive,
            Health { hp: PLAYER_MAX_HP },
            HandOffset(Vec2::new(10.0, -2.0)),
            Sprite {
                color: Color::srgb(0.2, 0.75, 0.9),
                custom_size: Some(Vec2::splat(26.0)),
                ..default()
            },
            Transform::from_xyz(0.0, -200.0, 1.0),
            RigidBody::Kinematic,
            Collider::circle(13.0),
            layers,
            LinearVelocity::ZERO,
            TranslationInterpolation,
            DespawnOnExit(GameState::InGame),
        ))
        .id();

    let preset = WeaponPreset::CyberPistol;
    equip_weapon(
        &mut commands,
        player,
        preset.build(&tunables, BulletKind::Player),
        preset.sprite_size(),
    );
}

fn gather_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    windows: Query<&Window>,
    q_camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut input: ResMut<PlayerInput>,
) {
    let mut axis = Vec2::ZERO;
    if let Some(keys) = &keys {
        if keys.pressed(KeyCode::KeyW) {
            axis.y += 1.0;
        }
        if keys.pressed(KeyCode::KeyS) {
            axis.y -= 1.0;
        }
        if keys.pressed(KeyCode::KeyA) {
            axis.x -= 1.0;
        }
        if keys.pressed(KeyCode::KeyD) {
            axis.x += 1.0;
        }
    }

    input.move_axis = if axis.length_squared() > 0.0 {
        axis.normalize()
    } else {
        Vec2::ZERO
    };

    input.reload = keys.is_some_and(|k| k.just_pressed(KeyCode::KeyR));
    input.trigger_pressed = buttons.as_ref().is_some_and(|b| b.just_pressed(MouseButton::Left));
    input.trigger_released = buttons.as_ref().is_some_and(|b| b.just_released(MouseButton::Left));
    input.aim = cursor_world(&windows, &q_camera);
}

fn cursor_world(
    windows: &Query<&Window>,
    q_camera: &Query<(&Camera, &GlobalTransform), With<MainCamera>>,
) -> Option<Vec2> {
    let window = windows.single().ok()?;
    let cursor = window.cursor_position()?;
    let (camera, camera_tf) = q_camera.single().ok()?;
    match camera.viewport_to_world_2d(camera_tf, cursor) {
        Ok(p) => Some(p),
        Err(e) => {
            debug!("viewport_to_world_2d failed: {e:?}");
            None
        }
    }
}

/// Face the cursor when it is known, else the direction of horizontal movement.
fn update_facing(input: Res<PlayerInput>, mut q_player: Query<(&mut Pawn, &Transform), With<Player>>) {
    let Ok((mut pawn, tf)) = q_player.single_mut() else {
        return;
    };

    let dx = match input.aim {
        Some(aim) => aim.x - tf.translation.x,
        None => input.move_axis.x,
    };

    let facing = if dx < 0.0 {
        Facing::Left
    } else if dx > 0.0 {
        Facing::Right
    } else {
        pawn.facing
    };

    if pawn.facing != facing {
        pawn.facing = facing;
    }
}

fn issue_weapon_commands(
    input: Res<PlayerInput>,
    q_player: Query<(&Equipped, &PawnLifeState), With<Player>>,
    mut writer: MessageWriter<WeaponCommand>,
) {
    let Ok((Equipped(weapon), life)) = q_player.single() else {
        return;
    };
    if !life.is_alive() {
        return;
    }

    if input.trigger_pressed {
        let order = input.aim.map_or_else(FireOrder::facing, FireOrder::at);
        writer.write(WeaponCommand::fire(*weapon, order));
    }
    if input.trigger_released {
        writer.write(WeaponCommand::stop_firing(*weapon));
    }
    if input.reload {
        writer.write(WeaponCommand::reload(*weapon));
    }
}

fn apply_movement(
    tunables: Res<Tunables>,
    input: Res<PlayerInput>,
    mut q_player: Query<(&mut LinearVelocity, &PawnLifeState), With<Player>>,
) {
    let Ok((mut vel, life)) = q_player.single_mut() else {
        return;
    };
    vel.0 = if life.is_alive() {
        input.move_axis * tunables.player_speed
    } else {
        Vec2::ZERO
    };
}

#[cfg(test)]
mod tests;
