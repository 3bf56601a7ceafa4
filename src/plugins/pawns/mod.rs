//! Pawns plugin: the shared actor layer under the player and the patrol AI.
//!
//! A pawn owns facing/walking state, health, and a handle to the weapon it holds.
//! It places the weapon on its hand every frame and listens to the weapon's
//! notifications (`ShotsChanged`, `WeaponFired`).
//!
//! Schedules:
//! - Update: weapon tracking (before the weapon tick), notification receivers.
//! - FixedUpdate: walking.
//! - FixedPostUpdate: death lifecycle after bullet collisions.
//! - PostUpdate: structural cleanup.

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::projectiles::collision::process_bullet_collisions;
use crate::plugins::weapons::systems::{apply_weapon_commands, notify_weapon_fired, trigger_due_shots};

mod components;
pub mod systems;

pub use components::*;
pub use systems::equip_weapon;

pub fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (
            systems::track_equipped_weapons
                .after(apply_weapon_commands)
                .before(trigger_due_shots),
            (systems::receive_shots_changed, systems::receive_weapon_fired)
                .after(notify_weapon_fired),
        )
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        FixedUpdate,
        systems::apply_walk.run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        FixedPostUpdate,
        (
            systems::pawn_death_trigger.after(process_bullet_collisions),
            systems::pawn_death_progress.after(systems::pawn_death_trigger),
        )
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        PostUpdate,
        systems::despawn_marked_pawns.run_if(in_state(GameState::InGame)),
    );
}
