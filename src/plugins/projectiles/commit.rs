//! Recycle: bullets marked `PendingReturn` (hit, out of bounces, or lifespan over) go back
//! on the free list.
//!
//! A recycled bullet carries nothing from its last flight:
//! - hidden, at rest, colliding with nothing,
//! - disarmed (`damage` 0, no bounces left),
//! - lifespan cleared.
//!
//! The allocator re-arms every one of these fields from the next `SpawnBulletRequest`.
//! No other system writes them for an inactive bullet.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::components::{Bullet, BulletEntity, BulletLifespan, BulletState, PooledBullet};
use super::pool::{inactive_bullet_layers, BulletPool};

pub fn recycle_returned_bullets(
    mut pool: ResMut<BulletPool>,
    mut q: Query<(
        Entity,
        &mut BulletState,
        &mut Bullet,
        &mut BulletLifespan,
        &mut Visibility,
        &mut LinearVelocity,
        &mut CollisionLayers,
    ), With<PooledBullet>>,
) {
    let returned = q
        .iter_mut()
        .filter(|(_, state, ..)| **state == BulletState::PendingReturn);

    for (e, mut state, mut bullet, mut lifespan, mut vis, mut vel, mut layers) in returned {
        debug_assert!(
            pool.free.len() < pool.capacity,
            "bullet {e:?} returned to a full pool"
        );

        *state = BulletState::Inactive;
        bullet.disarm();
        *lifespan = BulletLifespan::default();
        *vis = Visibility::Hidden;
        vel.0 = Vec2::ZERO;
        *layers = inactive_bullet_layers();

        pool.push_free(BulletEntity(e));
    }
}
