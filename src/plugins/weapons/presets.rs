//! Weapon presets.

use std::time::Duration;

use bevy::math::Vec2;

use crate::common::tunables::Tunables;
use crate::plugins::projectiles::messages::BulletKind;

use super::weapon::Weapon;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeaponPreset {
    /// Player sidearm: six-round clip, heavy rounds.
    CyberPistol,
    /// Turret-style weapon carried by patrol enemies.
    Sentry,
}

impl WeaponPreset {
    pub fn build(self, tunables: &Tunables, kind: BulletKind) -> Weapon {
        let mut weapon = Weapon::default().with_timing(tunables.reload_step, tunables.shot_stagger);
        weapon.kind = kind;

        match self {
            Self::CyberPistol => {
                weapon.bullet_speed = 750.0;
                weapon.damage = 5;
                weapon
                    .set_fire_rate(Duration::from_millis(240))
                    .set_fire_limit(6)
                    .set_grip_position(-4.0, -2.0)
                    .set_muzzle_position(15.0, 2.0);
            }
            Self::Sentry => {
                weapon.bullet_speed = 500.0;
                weapon.damage = 1;
                weapon.set_fire_rate(Duration::from_millis(100));
            }
        }

        weapon
    }

    /// Placeholder art size.
    pub fn sprite_size(self) -> Vec2 {
        match self {
            Self::CyberPistol => Vec2::new(22.0, 10.0),
            Self::Sentry => Vec2::new(16.0, 8.0),
        }
    }
}
