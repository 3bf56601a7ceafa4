//! Projectiles plugin: **Message-based producer → consumer** spawning + data-driven pooling.
//!
//! This is the projectile facility weapons delegate to. Weapons decide *whether* a shot
//! happens (clip, fire rate, stagger); this module decides *which* bullet serves it and
//! owns the bullet lifecycle from there.
//!
//! # Data flow
//! ```text
//!   Update schedule (variable dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (A) Producer: weapons::trigger_due_shots                                  │
//!│      - writes: SpawnBulletRequest (kind, pos, vel, damage, lifespan, weapon)│
//!│                                                                            │
//!│  (B) Consumer: allocate_bullets_from_pool                                  │
//!│      - mutates: BulletPool.free, BulletState, Bullet, BulletLifespan,      │
//!│                 Transform, Velocity, Visibility, CollisionLayers           │
//!│      - writes: BulletSpawned { weapon, bullet }                            │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!FixedPostUpdate (fixed dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (C) Physics emits CollisionStart messages (Avian)                         │
//!│  (D) process_bullet_collisions: bounce budget / damage -> PendingReturn    │
//!│  (E) expire_bullets: lifespan elapsed -> PendingReturn                     │
//!│  (F) recycle_returned_bullets: disarm, hide, push back to the pool         │
//!└────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Where do we still branch?
//! - Capacity: pool can be empty → allocator drops request (capacity decision).
//! Everything else is treated as an invariant violation.

pub mod allocator;
pub mod collision;
pub mod commit;
pub mod components;
pub mod lifespan;
pub mod messages;
pub mod pool;

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::ecs::message::Messages;
use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::weapons::systems::trigger_due_shots;

pub struct ProjectilesPlugin;

/// Maintain spawn request message buffers.
///
/// Messages are double-buffered; `update()` advances buffers.
fn update_spawn_messages(
    mut requests: ResMut<Messages<messages::SpawnBulletRequest>>,
    mut spawned: ResMut<Messages<messages::BulletSpawned>>,
) {
    requests.update();
    spawned.update();
}

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<pool::BulletPool>()
            .add_systems(Startup, pool::init_bullet_pool);

        app.init_resource::<Messages<messages::SpawnBulletRequest>>();
        app.init_resource::<Messages<messages::BulletSpawned>>();
        app.add_systems(PostUpdate, update_spawn_messages);

        app.add_systems(
            Update,
            allocator::allocate_bullets_from_pool
                .after(trigger_due_shots)
                .run_if(in_state(GameState::InGame)),
        );

        app.add_systems(
            FixedPostUpdate,
            (
                collision::process_bullet_collisions.after(CollisionEventSystems),
                lifespan::expire_bullets,
                commit::recycle_returned_bullets
                    .after(collision::process_bullet_collisions)
                    .after(lifespan::expire_bullets),
            )
                .run_if(in_state(GameState::InGame)),
        );
    }
}
