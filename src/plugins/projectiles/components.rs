use bevy::prelude::*;

use super::messages::BulletKind;

#[derive(Component)]
pub struct PooledBullet;

/// Newtype for entities that are known to be pooled bullets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BulletEntity(pub Entity);

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BulletState {
    #[default]
    Inactive,
    Active,
    PendingReturn,
}

#[derive(Component, Debug, Clone)]
pub struct Bullet {
    pub damage: i32,
    pub wall_bounces_left: u8,
    pub kind: BulletKind,
}

impl Bullet {
    pub const DEFAULT_WALL_BOUNCES: u8 = 3;

    pub fn new(kind: BulletKind, damage: i32) -> Self {
        Self {
            damage,
            wall_bounces_left: Self::DEFAULT_WALL_BOUNCES,
            kind,
        }
    }

    #[inline]
    pub fn reset_for_fire(&mut self, kind: BulletKind, damage: i32) {
        self.kind = kind;
        self.damage = damage;
        self.wall_bounces_left = Self::DEFAULT_WALL_BOUNCES;
    }

    /// Pooled and harmless until the next `reset_for_fire`.
    #[inline]
    pub fn disarm(&mut self) {
        self.damage = 0;
        self.wall_bounces_left = 0;
    }
}

/// Time left before an active bullet is killed (kill type: lifespan).
#[derive(Component, Debug, Clone, Deref, DerefMut)]
pub struct BulletLifespan(pub Timer);

impl Default for BulletLifespan {
    fn default() -> Self {
        Self(Timer::from_seconds(0.0, TimerMode::Once))
    }
}
