use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{state::GameState, tunables::Tunables};
use crate::plugins::weapons::{ShotsChanged, Weapon, WeaponAnimation, WeaponFired};

use super::components::{
    AmmoReadout, Equipped, HandOffset, Health, LastShot, Pawn, PawnLifeState, PendingDespawn,
};

/// Spawn `weapon` as its own entity, owned by `pawn`, and hand it over.
pub fn equip_weapon(commands: &mut Commands, pawn: Entity, mut weapon: Weapon, size: Vec2) -> Entity {
    weapon.set_owner(pawn);
    let readout = AmmoReadout {
        shots: weapon.shots(),
        fire_limit: weapon.fire_limit(),
    };

    let e = commands
        .spawn((
            Name::new("Weapon"),
            weapon,
            WeaponAnimation::default(),
            Sprite {
                color: Color::srgb(0.55, 0.6, 0.7),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(0.0, 0.0, 1.5),
            DespawnOnExit(GameState::InGame),
        ))
        .id();

    commands
        .entity(pawn)
        .insert((Equipped(e), readout, LastShot::default()));
    e
}

/// Keep each held weapon on its pawn's hand and facing the same way.
pub fn track_equipped_weapons(
    q_pawns: Query<(&Pawn, &Transform, &Equipped, Option<&HandOffset>), Without<Weapon>>,
    mut q_weapons: Query<(&mut Weapon, &mut Transform), Without<Pawn>>,
) {
    for (pawn, tf, equipped, hand) in &q_pawns {
        let Ok((mut weapon, mut weapon_tf)) = q_weapons.get_mut(equipped.0) else {
            continue;
        };

        let flip = pawn.facing.is_left();
        if weapon.flip_x() != flip {
            weapon.set_flip_x(flip);
        }

        let hand = tf.translation.truncate() + hand.map_or(Vec2::ZERO, |h| h.for_facing(pawn.facing));
        let pos = weapon.visual_position(hand);
        weapon_tf.translation.x = pos.x;
        weapon_tf.translation.y = pos.y;
    }
}

/// Walking pawns advance at a fixed rate in their facing. Stopped and non-living pawns stand still.
pub fn apply_walk(
    tunables: Res<Tunables>,
    mut q: Query<(&Pawn, &PawnLifeState, &mut LinearVelocity)>,
) {
    for (pawn, life, mut vel) in &mut q {
        if !life.is_alive() {
            vel.0 = Vec2::ZERO;
            continue;
        }
        vel.x = if pawn.walking {
            pawn.facing.sign() * tunables.walk_speed
        } else {
            0.0
        };
    }
}

pub fn receive_shots_changed(mut reader: MessageReader<ShotsChanged>, mut q: Query<&mut AmmoReadout>) {
    for msg in reader.read() {
        let Ok(mut readout) = q.get_mut(msg.pawn) else {
            continue;
        };
        readout.shots = msg.shots;
        readout.fire_limit = msg.fire_limit;
    }
}

pub fn receive_weapon_fired(mut reader: MessageReader<WeaponFired>, mut q: Query<&mut LastShot>) {
    for msg in reader.read() {
        let Ok(mut last) = q.get_mut(msg.pawn) else {
            continue;
        };
        last.bullet = Some(msg.bullet);
        last.total += 1;
    }
}

/// Transition Alive -> Dying when HP drops to 0.
///
/// Keeps collision membership but clears filters, so the pawn stops interacting at once.
pub fn pawn_death_trigger(
    mut q: Query<(
        &Health,
        &mut Pawn,
        &mut PawnLifeState,
        &mut CollisionLayers,
        &mut Sprite,
    ), Without<PendingDespawn>>,
) {
    for (hp, mut pawn, mut life, mut layers, mut sprite) in &mut q {
        if !life.is_alive() || hp.hp > 0 {
            continue;
        }

        *life = PawnLifeState::Dying {
            timer: Timer::from_seconds(0.35, TimerMode::Once),
        };
        *layers = CollisionLayers::new(layers.memberships, LayerMask::NONE);
        pawn.stop();
        sprite.color = Color::srgba(0.8, 0.8, 0.8, 1.0);
    }
}

/// Animate Dying state and mark PendingDespawn once finished.
pub fn pawn_death_progress(
    time: Res<Time<Fixed>>,
    mut commands: Commands,
    mut q: Query<(Entity, &mut PawnLifeState, &mut Sprite, &mut Transform), Without<PendingDespawn>>,
) {
    for (e, mut life, mut sprite, mut tf) in &mut q {
        let PawnLifeState::Dying { timer } = &mut *life else {
            continue;
        };

        timer.tick(time.delta());

        let dur = timer.duration().as_secs_f32().max(0.0001);
        let t = (timer.elapsed_secs() / dur).clamp(0.0, 1.0);

        tf.scale = Vec3::splat(1.0 - t);
        let mut c = sprite.color.to_srgba();
        c.alpha = 1.0 - t;
        sprite.color = c.into();

        if timer.is_finished() {
            *life = PawnLifeState::Dead;
            commands.entity(e).insert(PendingDespawn);
        }
    }
}

/// Despawn marked pawns together with the weapon they hold.
pub fn despawn_marked_pawns(
    mut commands: Commands,
    q: Query<(Entity, Option<&Equipped>), With<PendingDespawn>>,
) {
    for (e, equipped) in &q {
        if let Some(Equipped(weapon)) = equipped {
            commands.entity(*weapon).despawn();
        }
        commands.entity(e).despawn();
    }
}
