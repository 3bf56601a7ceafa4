//! Weapon messages.
//!
//! Intent flows in through `WeaponCommand` (players and AI are producers, the weapon
//! systems are the only consumer). Notifications flow out to the owning pawn through
//! `ShotsChanged` and `WeaponFired`, delivered in the same frame they happen.

use bevy::prelude::*;

use super::weapon::FireOrder;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WeaponAction {
    Fire(FireOrder),
    StopFiring,
    Reload,
}

#[derive(Message, Clone, Copy, Debug)]
pub struct WeaponCommand {
    pub weapon: Entity,
    pub action: WeaponAction,
}

impl WeaponCommand {
    pub fn fire(weapon: Entity, order: FireOrder) -> Self {
        Self { weapon, action: WeaponAction::Fire(order) }
    }

    pub fn stop_firing(weapon: Entity) -> Self {
        Self { weapon, action: WeaponAction::StopFiring }
    }

    pub fn reload(weapon: Entity) -> Self {
        Self { weapon, action: WeaponAction::Reload }
    }
}

/// Ammunition changed for the weapon held by `pawn`.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShotsChanged {
    pub pawn: Entity,
    pub shots: u32,
    pub fire_limit: u32,
}

/// `pawn`'s weapon put `bullet` into play.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeaponFired {
    pub pawn: Entity,
    pub weapon: Entity,
    pub bullet: Entity,
}
