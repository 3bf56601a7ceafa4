//! World plugin: arena walls and the ledges patrol enemies walk on.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState};
use crate::plugins::ai::{PatrolLane, PATROL_LANES};

pub const HALF_W: f32 = 960.0;
pub const HALF_H: f32 = 540.0;
const WALL_THICKNESS: f32 = 30.0;
const LEDGE_THICKNESS: f32 = 16.0;
/// Distance between a lane's height and the top of its ledge.
const LEDGE_DROP: f32 = 12.0;

#[derive(Component)]
pub struct Ledge;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), (spawn_arena, spawn_ledges));
}

fn world_layers() -> CollisionLayers {
    CollisionLayers::new(
        Layer::World,
        [
            Layer::Player,
            Layer::Enemy,
            Layer::PlayerBullet,
            Layer::EnemyBullet,
        ],
    )
}

fn static_block(name: String, color: Color, pos: Vec2, size: Vec2) -> impl Bundle {
    (
        Name::new(name),
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_translation(pos.extend(0.0)),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        world_layers(),
        DespawnOnExit(GameState::InGame),
    )
}

fn spawn_arena(mut commands: Commands) {
    let wall_color = Color::srgb(0.25, 0.27, 0.33);
    let t = WALL_THICKNESS;

    let walls = [
        ("WallTop", Vec2::new(0.0, HALF_H + t * 0.5), Vec2::new(HALF_W * 2.0 + t * 2.0, t)),
        ("WallBottom", Vec2::new(0.0, -HALF_H - t * 0.5), Vec2::new(HALF_W * 2.0 + t * 2.0, t)),
        ("WallLeft", Vec2::new(-HALF_W - t * 0.5, 0.0), Vec2::new(t, HALF_H * 2.0)),
        ("WallRight", Vec2::new(HALF_W + t * 0.5, 0.0), Vec2::new(t, HALF_H * 2.0)),
    ];

    for (name, pos, size) in walls {
        commands.spawn(static_block(name.into(), wall_color, pos, size));
    }
}

/// Ledge spanning a lane, with a little overhang past both turn points.
pub fn ledge_rect(lane: &PatrolLane) -> (Vec2, Vec2) {
    let overhang = 24.0;
    let width = lane.end_x - lane.start_x + overhang * 2.0;
    let center = Vec2::new(
        (lane.start_x + lane.end_x) * 0.5,
        lane.y - LEDGE_DROP - LEDGE_THICKNESS * 0.5,
    );
    (center, Vec2::new(width, LEDGE_THICKNESS))
}

fn spawn_ledges(mut commands: Commands) {
    let ledge_color = Color::srgb(0.3, 0.22, 0.4);

    for (i, lane) in PATROL_LANES.iter().enumerate() {
        let (pos, size) = ledge_rect(lane);
        commands.spawn((static_block(format!("Ledge{i}"), ledge_color, pos, size), Ledge));
    }
}

#[cfg(test)]
mod tests;
