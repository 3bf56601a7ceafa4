//! Tunable gameplay constants.

use std::time::Duration;

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    /// World gravity. Pawns are kinematic and bullets opt out, so only loose dynamic bodies feel it.
    pub gravity: Vec2,
    pub player_speed: f32,
    /// Horizontal speed of walking pawns (patrol AI).
    pub walk_speed: f32,
    pub bullet_pool_capacity: usize,
    /// One round is restored per reload step.
    pub reload_step: Duration,
    /// Delay between two bullets of the same multi-shot fire.
    pub shot_stagger: Duration,
    pub auto_fire_delay: Duration,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 20.0,
            gravity: Vec2::new(0.0, -980.0),
            player_speed: 420.0,
            walk_speed: 120.0,
            bullet_pool_capacity: 512,
            reload_step: Duration::from_millis(100),
            shot_stagger: Duration::from_millis(300),
            auto_fire_delay: Duration::from_millis(1000),
        }
    }
}
