//! Spawn consumer: activate bullets from the pool.
//!
//! # Fail-fast invariants
//! - The pool free list contains only valid pooled bullet entities.
//! - Therefore, a pooled entity must match the bullet query.
//!
//! If this is violated, we `expect()` and crash loudly.
//! This removes branches from the hot loop and makes invariant violations obvious.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use super::components::{Bullet, BulletEntity, BulletLifespan, BulletState, PooledBullet};
use super::messages::{BulletSpawned, SpawnBulletRequest};
use super::pool::{active_layers, BulletPool};

pub fn allocate_bullets_from_pool(
    mut pool: ResMut<BulletPool>,
    mut reader: MessageReader<SpawnBulletRequest>,
    mut spawned: MessageWriter<BulletSpawned>,
    mut q: Query<(
        &mut BulletState,
        &mut Bullet,
        &mut BulletLifespan,
        &mut Transform,
        &mut LinearVelocity,
        &mut Visibility,
        &mut CollisionLayers,
    ), With<PooledBullet>>,
) {
    for req in reader.read() {
        let Some(BulletEntity(e)) = pool.pop_free() else {
            // Capacity decision, not a correctness failure.
            debug!("Bullet pool exhausted, dropping {:?} request", req.kind);
            continue;
        };

        let (mut state, mut bullet, mut lifespan, mut tf, mut vel, mut vis, mut layers) =
            q.get_mut(e).expect("BulletPool contained an entity missing pooled bullet components");

        *state = BulletState::Active;
        bullet.reset_for_fire(req.kind, req.damage);
        *lifespan = BulletLifespan(Timer::new(req.lifespan, TimerMode::Once));
        tf.translation = req.pos.extend(2.0);
        vel.0 = req.vel;
        *vis = Visibility::Visible;
        *layers = active_layers(req.kind);

        if let Some(weapon) = req.weapon {
            spawned.write(BulletSpawned { weapon, bullet: e });
        }
    }
}
