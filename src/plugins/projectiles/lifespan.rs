//! Lifespan kill: active bullets whose timer ran out go back to the pool.

use bevy::prelude::*;

use super::components::{BulletLifespan, BulletState, PooledBullet};

pub fn expire_bullets(
    time: Res<Time>,
    mut q: Query<(&mut BulletLifespan, &mut BulletState), With<PooledBullet>>,
) {
    let dt = time.delta();
    for (mut lifespan, mut state) in &mut q {
        if *state != BulletState::Active {
            continue;
        }
        lifespan.tick(dt);
        if lifespan.is_finished() {
            *state = BulletState::PendingReturn;
        }
    }
}
