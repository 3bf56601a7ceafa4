use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;
use crate::common::tunables::Tunables;

use super::components::{Bullet, BulletEntity, BulletLifespan, BulletState, PooledBullet};
use super::messages::BulletKind;

#[derive(Resource, Debug)]
pub struct BulletPool {
    pub free: Vec<BulletEntity>,
    pub capacity: usize,
}

impl BulletPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            free: Vec::with_capacity(capacity),
            capacity,
        }
    }

    #[inline]
    pub fn pop_free(&mut self) -> Option<BulletEntity> {
        self.free.pop()
    }

    #[inline]
    pub fn push_free(&mut self, e: BulletEntity) {
        self.free.push(e);
    }
}

impl FromWorld for BulletPool {
    fn from_world(world: &mut World) -> Self {
        let cap = world
            .get_resource::<Tunables>()
            .map_or(512, |t| t.bullet_pool_capacity);
        Self::new(cap)
    }
}

#[inline]
pub fn active_layers(kind: BulletKind) -> CollisionLayers {
    match kind {
        BulletKind::Player => CollisionLayers::new(Layer::PlayerBullet, [Layer::World, Layer::Enemy]),
        BulletKind::Enemy => CollisionLayers::new(Layer::EnemyBullet, [Layer::World, Layer::Player]),
    }
}

/// “Disabled” without structural changes: empty filters means we collide with nothing.
#[inline]
pub fn inactive_bullet_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::PlayerBullet, [] as [Layer; 0])
}

/// Pre-spawn pooled bullets (inactive).
///
/// Physics components stay present; collision layers make inactive bullets collide with
/// nothing (and therefore never generate collision events). Bullets ignore world gravity.
pub fn init_bullet_pool(mut commands: Commands, mut pool: ResMut<BulletPool>) {
    pool.free.clear();
    let cap = pool.capacity;
    pool.free.reserve(cap);

    let restitution = Restitution::new(0.95).with_combine_rule(CoefficientCombine::Max);
    let friction = Friction::ZERO;

    for _ in 0..cap {
        let e = commands
            .spawn((
                Name::new("Bullet(Pooled)"),
                PooledBullet,
                BulletState::Inactive,
                Bullet::new(BulletKind::Player, 1),
                BulletLifespan::default(),
                Sprite {
                    color: Color::srgb(1.0, 0.85, 0.3),
                    custom_size: Some(Vec2::splat(6.0)),
                    ..default()
                },
                Transform::from_xyz(0.0, 0.0, 2.0),
                Visibility::Hidden,
                (
                    RigidBody::Dynamic,
                    Collider::circle(3.0),
                    GravityScale(0.0),
                    inactive_bullet_layers(),
                    restitution,
                    friction,
                    LinearVelocity(Vec2::ZERO),
                    CollisionEventsEnabled,
                ),
            ))
            .id();

        pool.push_free(BulletEntity(e));
    }
}
