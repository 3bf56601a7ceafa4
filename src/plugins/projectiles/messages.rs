//! Buffered spawn requests.
//!
//! We use Bevy **Messages** here instead of direct pool access.
//! The key idea is separation of concerns:
//! - producers (weapons) create *intent*
//! - consumer applies intent (pool pop + component writes)
//! - consumer reports back which bullet served which weapon
//!
//! This is a producer → queue → consumer pipeline.

use std::time::Duration;

use bevy::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BulletKind {
    #[default]
    Player,
    Enemy,
}

#[derive(Message, Clone, Copy, Debug)]
pub struct SpawnBulletRequest {
    pub kind: BulletKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: i32,
    pub lifespan: Duration,
    /// Weapon to notify once the bullet is live.
    pub weapon: Option<Entity>,
}

/// A weapon-owned request was served by `bullet`.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BulletSpawned {
    pub weapon: Entity,
    pub bullet: Entity,
}
