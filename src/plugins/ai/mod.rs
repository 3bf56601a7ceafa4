//! AI plugin: patrol enemies.
//!
//! ```text
//! OnEnter(InGame): spawn_patrols (one pawn per lane, armed lanes get a Sentry + AutoFire)
//! FixedUpdate:     patrol_update -> pawns::apply_walk
//! Update:          auto_fire -> weapons::apply_weapon_commands
//! ```

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};
use crate::plugins::pawns::systems::apply_walk;
use crate::plugins::pawns::{equip_weapon, HandOffset, Health, Pawn, PawnLifeState};
use crate::plugins::projectiles::messages::BulletKind;
use crate::plugins::weapons::systems::apply_weapon_commands;
use crate::plugins::weapons::WeaponPreset;

pub mod patrol;

pub use patrol::{patrol_facing, AutoFire, PatrolAi, PatrolPath, PatrolPathError};

pub const PATROL_MAX_HP: i32 = 15;

/// A patrol lane: horizontal bounds at a fixed height.
#[derive(Debug, Clone, Copy)]
pub struct PatrolLane {
    pub start_x: f32,
    pub end_x: f32,
    pub y: f32,
    pub fire_weapon: bool,
}

pub const PATROL_LANES: [PatrolLane; 3] = [
    PatrolLane { start_x: -600.0, end_x: -200.0, y: 200.0, fire_weapon: true },
    PatrolLane { start_x: 150.0, end_x: 650.0, y: 320.0, fire_weapon: true },
    PatrolLane { start_x: -300.0, end_x: 300.0, y: 0.0, fire_weapon: false },
];

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_patrols)
        .add_systems(
            FixedUpdate,
            patrol::patrol_update
                .before(apply_walk)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            Update,
            patrol::auto_fire
                .before(apply_weapon_commands)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn_patrols(mut commands: Commands, tunables: Res<Tunables>) {
    let layers = CollisionLayers::new(
        Layer::Enemy,
        [Layer::World, Layer::Player, Layer::PlayerBullet],
    );

    for (i, lane) in PATROL_LANES.iter().enumerate() {
        let path = match PatrolPath::new(lane.start_x, lane.end_x) {
            Ok(path) => path,
            Err(e) => {
                error!("Skipping patrol lane {i}: {e}");
                continue;
            }
        };

        let pawn = commands
            .spawn((
                Name::new(format!("Patrol{i}")),
                PatrolAi::patrolling(path),
                Pawn::default(),
                PawnLifeState::Alive,
                Health { hp: PATROL_MAX_HP },
                HandOffset(Vec2::new(9.0, -3.0)),
                Sprite {
                    color: Color::srgb(0.9, 0.3, 0.35),
                    custom_size: Some(Vec2::splat(24.0)),
                    ..default()
                },
                Transform::from_xyz(lane.start_x, lane.y, 1.0),
                RigidBody::Kinematic,
                Collider::circle(12.0),
                layers,
                LinearVelocity::ZERO,
                TranslationInterpolation,
                DespawnOnExit(GameState::InGame),
            ))
            .id();

        if lane.fire_weapon {
            let preset = WeaponPreset::Sentry;
            equip_weapon(
                &mut commands,
                pawn,
                preset.build(&tunables, BulletKind::Enemy),
                preset.sprite_size(),
            );
            commands.entity(pawn).insert(AutoFire::every(tunables.auto_fire_delay));
        }
    }
}
