//! Weapon systems.
//!
//! ```text
//! Update:
//!   advance_weapons (reload step ──> ShotsChanged)
//!   WeaponCommand ──> apply_weapon_commands ──> trigger_due_shots ──> SpawnBulletRequest
//!                                                                 └─> ShotsChanged
//!   BulletSpawned ──> notify_weapon_fired ──> ShotsChanged + WeaponFired (+ firing clip)
//! ```

use bevy::prelude::*;

use crate::plugins::projectiles::messages::{BulletSpawned, SpawnBulletRequest};

use super::animation::WeaponAnimation;
use super::messages::{ShotsChanged, WeaponAction, WeaponCommand, WeaponFired};
use super::weapon::Weapon;

/// Ammunition notification for the weapon's owner.
///
/// A weapon without an owner has nobody to notify; that is logged and skipped.
fn shots_changed_for(weapon_e: Entity, weapon: &Weapon) -> Option<ShotsChanged> {
    let Some(pawn) = weapon.owner() else {
        warn!("Weapon {weapon_e:?} has no owner, dropping ammunition notification");
        return None;
    };

    Some(ShotsChanged {
        pawn,
        shots: weapon.shots(),
        fire_limit: weapon.fire_limit(),
    })
}

/// Consumer of weapon intent.
pub fn apply_weapon_commands(
    mut reader: MessageReader<WeaponCommand>,
    mut q: Query<&mut Weapon>,
) {
    for cmd in reader.read() {
        let Ok(mut weapon) = q.get_mut(cmd.weapon) else {
            debug!("WeaponCommand for missing weapon {:?}", cmd.weapon);
            continue;
        };

        match cmd.action {
            WeaponAction::Fire(order) => {
                weapon.fire(order);
            }
            WeaponAction::StopFiring => weapon.stop_firing(),
            WeaponAction::Reload => weapon.reload(),
        }
    }
}

/// Let the frame's time pass for every weapon. Runs before this frame's commands.
pub fn advance_weapons(
    time: Res<Time>,
    mut q: Query<(Entity, &mut Weapon)>,
    mut changed: MessageWriter<ShotsChanged>,
) {
    let dt = time.delta();

    for (e, mut weapon) in &mut q {
        if weapon.advance(dt) == 0 {
            continue;
        }
        if let Some(msg) = shots_changed_for(e, &weapon) {
            changed.write(msg);
        }
    }
}

/// Turn due shots into spawn requests, from where the weapon is now.
///
/// Ammo is reported here as well as on `BulletSpawned`: a round spent on an exhausted
/// pool never reaches `notify_weapon_fired`.
pub fn trigger_due_shots(
    mut q: Query<(Entity, &mut Weapon, &Transform)>,
    mut spawn: MessageWriter<SpawnBulletRequest>,
    mut changed: MessageWriter<ShotsChanged>,
) {
    for (e, mut weapon, tf) in &mut q {
        let shots = weapon.trigger_due(tf.translation.truncate());
        if shots.is_empty() {
            continue;
        }

        for shot in &shots {
            spawn.write(SpawnBulletRequest {
                kind: weapon.kind,
                pos: shot.pos,
                vel: shot.vel,
                damage: shot.damage,
                lifespan: shot.lifespan,
                weapon: Some(e),
            });
        }

        if let Some(msg) = shots_changed_for(e, &weapon) {
            changed.write(msg);
        }
    }
}

/// React to bullets the pool actually handed out.
pub fn notify_weapon_fired(
    mut spawned: MessageReader<BulletSpawned>,
    mut q: Query<(&Weapon, &mut WeaponAnimation)>,
    mut changed: MessageWriter<ShotsChanged>,
    mut fired: MessageWriter<WeaponFired>,
) {
    for ev in spawned.read() {
        let Ok((weapon, mut anim)) = q.get_mut(ev.weapon) else {
            continue;
        };

        anim.play_firing();

        let Some(msg) = shots_changed_for(ev.weapon, weapon) else {
            continue;
        };
        changed.write(msg);
        fired.write(WeaponFired {
            pawn: msg.pawn,
            weapon: ev.weapon,
            bullet: ev.bullet,
        });
    }
}

pub fn advance_weapon_animation(time: Res<Time>, mut q: Query<&mut WeaponAnimation>) {
    let dt = time.delta();
    for mut anim in &mut q {
        anim.advance(dt);
    }
}

/// Presentation: flip follows the weapon, muzzle flash brightens the firing frames.
pub fn sync_weapon_sprites(mut q: Query<(&Weapon, &WeaponAnimation, &mut Sprite)>) {
    for (weapon, anim, mut sprite) in &mut q {
        sprite.flip_x = weapon.flip_x();
        sprite.color = match anim.frame() {
            0 if matches!(anim, WeaponAnimation::Idle) => Color::srgb(0.55, 0.6, 0.7),
            f => {
                let glow = 1.0 - f as f32 / WeaponAnimation::FIRING_FRAMES as f32;
                Color::srgb(0.55 + 0.45 * glow, 0.6 + 0.3 * glow, 0.7)
            }
        };
    }
}
