//! Collision layers.
//!
//! Pawns collide with the world and with the opposing side's bullets. Bullets collide
//! with the world and with the opposing side's pawns, never with each other.

use avian2d::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    /// Arena walls and ledges.
    World,
    Player,
    /// Patrol pawns.
    Enemy,
    PlayerBullet,
    EnemyBullet,
}
