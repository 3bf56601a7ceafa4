//! Weapons plugin: ammunition, reload, multi-shot bursts and muzzle/grip geometry.
//!
//! A weapon is its own entity (`Weapon` + `WeaponAnimation` + `Transform`), held by a
//! pawn through `Equipped`. The weapon never spawns bullets itself; it writes
//! `SpawnBulletRequest` and lets the projectile pool allocate.
//!
//! Frame order (Update, InGame):
//! 1. `advance_weapons`: time passes for orders given in earlier frames
//! 2. producers (player input, patrol AI) write `WeaponCommand`
//! 3. `apply_weapon_commands`, then pawns place their weapons (`track_equipped_weapons`)
//! 4. `trigger_due_shots`
//! 5. projectile allocator
//! 6. `notify_weapon_fired` -> `advance_weapon_animation` -> `sync_weapon_sprites`

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::projectiles::allocator::allocate_bullets_from_pool;

pub mod animation;
pub mod messages;
pub mod presets;
pub mod systems;
pub mod weapon;

pub use animation::WeaponAnimation;
pub use messages::{ShotsChanged, WeaponAction, WeaponCommand, WeaponFired};
pub use presets::WeaponPreset;
pub use weapon::{Aim, FireOrder, ReloadState, Weapon};

pub fn plugin(app: &mut App) {
    app.add_message::<WeaponCommand>()
        .add_message::<ShotsChanged>()
        .add_message::<WeaponFired>();

    app.add_systems(
        Update,
        (
            systems::advance_weapons,
            systems::apply_weapon_commands.after(systems::advance_weapons),
            systems::trigger_due_shots.after(systems::apply_weapon_commands),
        )
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        Update,
        (
            systems::notify_weapon_fired.after(allocate_bullets_from_pool),
            systems::advance_weapon_animation.after(systems::notify_weapon_fired),
            systems::sync_weapon_sprites.after(systems::advance_weapon_animation),
        )
            .run_if(in_state(GameState::InGame)),
    );
}
