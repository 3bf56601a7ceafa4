//! Weapon state: ammunition, fire geometry, staggered shots and the reload state machine.
//!
//! This type is plain data + methods. Systems feed it `Duration` deltas, so every rule
//! here can be exercised in unit tests without a running app.
//!
//! # Ammunition
//! `shots` counts shots fired since the clip was last full:
//! - `shots == 0` is a full clip,
//! - `shots == fire_limit` is an empty clip,
//! - reloading walks `shots` back down by one round per reload step.
//!
//! A `fire_limit` of 0 means unlimited ammunition; such weapons never count shots.
//!
//! # Reload state machine
//! ```text
//!              reload() while shots > 0
//!   Idle ─────────────────────────────────> Reloading { timer }
//!    ^                                          │ every elapsed step: shots -= 1
//!    │   fire()  |  shots reached 0             │ (stays Reloading while shots > 0)
//!    └──────────────────────────────────────────┘
//! ```
//!
//! # Staggered shots
//! `fire()` does not spawn anything. It queues `bullets_per_fire` pending shots due at
//! `0, stagger, 2 * stagger, ...` after the call. `advance()` lets time pass,
//! `trigger_due()` triggers the shots whose delay elapsed and returns a `ShotRequest` for
//! every trigger the clip and fire rate allow. The first shot of a fire is due at once.

use std::time::Duration;

use bevy::prelude::*;

use crate::plugins::projectiles::messages::BulletKind;

pub const DEFAULT_RELOAD_STEP: Duration = Duration::from_millis(100);
pub const DEFAULT_SHOT_STAGGER: Duration = Duration::from_millis(300);

/// Where a shot goes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Aim {
    /// Straight ahead in the weapon's facing (left when flipped).
    Facing,
    /// Toward a world point.
    At(Vec2),
}

/// One fire call: aim plus an extra spawn offset on top of the muzzle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FireOrder {
    pub aim: Aim,
    pub offset: Vec2,
}

impl FireOrder {
    pub fn facing() -> Self {
        Self { aim: Aim::Facing, offset: Vec2::ZERO }
    }

    pub fn at(point: Vec2) -> Self {
        Self { aim: Aim::At(point), offset: Vec2::ZERO }
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingShot {
    pub due_in: Duration,
    pub order: FireOrder,
}

#[derive(Debug, Clone, Default)]
pub enum ReloadState {
    #[default]
    Idle,
    Reloading { timer: Timer },
}

impl ReloadState {
    #[inline]
    pub fn is_reloading(&self) -> bool {
        matches!(self, Self::Reloading { .. })
    }
}

/// A triggered shot, ready to become a spawn request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShotRequest {
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: i32,
    pub lifespan: Duration,
}

/// Output of one `Weapon::tick`.
#[derive(Debug, Default)]
pub struct WeaponTick {
    pub shots: Vec<ShotRequest>,
    pub rounds_restored: u32,
}

impl WeaponTick {
    #[inline]
    pub fn shots_changed(&self) -> bool {
        self.rounds_restored > 0
    }
}

#[derive(Component, Debug, Clone)]
pub struct Weapon {
    pub damage: i32,
    pub bullet_speed: f32,
    pub bullet_lifespan: Duration,
    pub kind: BulletKind,

    shots: u32,
    fire_limit: u32,
    fire_rate: Duration,
    cooldown: Duration,
    bullets_per_fire: u32,

    muzzle: Vec2,
    grip: Vec2,
    flip_x: bool,

    owner: Option<Entity>,

    reload_step: Duration,
    shot_stagger: Duration,
    reload: ReloadState,
    pending: Vec<PendingShot>,
}

impl Default for Weapon {
    fn default() -> Self {
        Self {
            damage: 1,
            bullet_speed: 600.0,
            bullet_lifespan: Duration::from_secs(2),
            kind: BulletKind::Player,
            shots: 0,
            fire_limit: 0,
            fire_rate: Duration::from_millis(100),
            cooldown: Duration::ZERO,
            bullets_per_fire: 1,
            muzzle: Vec2::ZERO,
            grip: Vec2::ZERO,
            flip_x: false,
            owner: None,
            reload_step: DEFAULT_RELOAD_STEP,
            shot_stagger: DEFAULT_SHOT_STAGGER,
            reload: ReloadState::Idle,
            pending: Vec::new(),
        }
    }
}

impl Weapon {
    /// Override the reload step and multi-shot stagger (defaults: 100 ms / 300 ms).
    ///
    /// A zero reload step would make the repeating timer degenerate, so it is raised to 1 ms.
    pub fn with_timing(mut self, reload_step: Duration, shot_stagger: Duration) -> Self {
        self.reload_step = reload_step.max(Duration::from_millis(1));
        self.shot_stagger = shot_stagger;
        self
    }

    // -------------------------------------------------------------------------
    // Firing
    // -------------------------------------------------------------------------

    /// Queue `bullets_per_fire` staggered shots and interrupt any reload.
    ///
    /// Returns how many shots were queued. Spawned bullets are reported later, once the
    /// pool hands them out.
    pub fn fire(&mut self, order: FireOrder) -> usize {
        self.stop_reloading();

        for i in 0..self.bullets_per_fire {
            self.pending.push(PendingShot {
                due_in: self.shot_stagger * i,
                order,
            });
        }

        self.bullets_per_fire as usize
    }

    /// Releasing the trigger starts (or continues) the reload cycle.
    pub fn stop_firing(&mut self) {
        self.reload();
    }

    pub fn reload(&mut self) {
        if self.shots == 0 {
            self.stop_reloading();
            return;
        }

        if !self.reload.is_reloading() {
            self.reload = ReloadState::Reloading {
                timer: Timer::new(self.reload_step, TimerMode::Repeating),
            };
        }
    }

    pub fn stop_reloading(&mut self) {
        self.reload = ReloadState::Idle;
    }

    /// `advance` followed by `trigger_due`.
    ///
    /// `origin` is the weapon's current world position; muzzle and order offsets are
    /// applied on top of it at trigger time.
    pub fn tick(&mut self, dt: Duration, origin: Vec2) -> WeaponTick {
        let rounds_restored = self.advance(dt);
        WeaponTick {
            shots: self.trigger_due(origin),
            rounds_restored,
        }
    }

    /// Let `dt` pass for the cooldown, the pending shots and the reload.
    ///
    /// Only time elapsed after a `fire()` or `reload()` counts toward its delays, so this
    /// must run before new orders are applied. Returns the rounds restored.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        self.cooldown = self.cooldown.saturating_sub(dt);
        for shot in &mut self.pending {
            shot.due_in = shot.due_in.saturating_sub(dt);
        }
        self.tick_reload(dt)
    }

    /// Trigger every pending shot whose delay has run out, in queue order.
    pub fn trigger_due(&mut self, origin: Vec2) -> Vec<ShotRequest> {
        let mut due = Vec::new();
        self.pending.retain(|shot| {
            if shot.due_in.is_zero() {
                due.push(shot.order);
                false
            } else {
                true
            }
        });

        due.into_iter()
            .filter_map(|order| self.trigger(order, origin))
            .collect()
    }

    /// Accept or drop a single due shot.
    fn trigger(&mut self, order: FireOrder, origin: Vec2) -> Option<ShotRequest> {
        if self.clip_empty() || !self.cooldown.is_zero() {
            return None;
        }

        if self.fire_limit > 0 {
            self.shots += 1;
        }
        self.cooldown = self.fire_rate;

        let pos = origin + self.muzzle_offset() + order.offset;
        let ahead = self.facing_dir();
        let dir = match order.aim {
            Aim::Facing => ahead,
            Aim::At(point) => {
                let d = point - pos;
                if d.length_squared() < 1e-4 { ahead } else { d.normalize() }
            }
        };

        Some(ShotRequest {
            pos,
            vel: dir * self.bullet_speed,
            damage: self.damage,
            lifespan: self.bullet_lifespan,
        })
    }

    fn tick_reload(&mut self, dt: Duration) -> u32 {
        let ReloadState::Reloading { timer } = &mut self.reload else {
            return 0;
        };

        timer.tick(dt);
        let restored = timer.times_finished_this_tick().min(self.shots);
        self.shots -= restored;

        if self.shots == 0 {
            self.reload = ReloadState::Idle;
        }
        restored
    }

    // -------------------------------------------------------------------------
    // Ammunition
    // -------------------------------------------------------------------------

    #[inline]
    pub fn shots(&self) -> u32 {
        self.shots
    }

    #[inline]
    pub fn fire_limit(&self) -> u32 {
        self.fire_limit
    }

    /// Rounds left in the clip, `None` for unlimited weapons.
    pub fn rounds_left(&self) -> Option<u32> {
        (self.fire_limit > 0).then(|| self.fire_limit - self.shots)
    }

    #[inline]
    pub fn clip_empty(&self) -> bool {
        self.fire_limit > 0 && self.shots >= self.fire_limit
    }

    pub fn set_shots(&mut self, shots: u32) -> &mut Self {
        self.shots = if self.fire_limit > 0 { shots.min(self.fire_limit) } else { 0 };
        self
    }

    pub fn set_fire_limit(&mut self, fire_limit: u32) -> &mut Self {
        self.fire_limit = fire_limit;
        self.shots = if fire_limit > 0 { self.shots.min(fire_limit) } else { 0 };
        self
    }

    pub fn set_fire_rate(&mut self, fire_rate: Duration) -> &mut Self {
        self.fire_rate = fire_rate;
        self
    }

    #[inline]
    pub fn fire_rate(&self) -> Duration {
        self.fire_rate
    }

    pub fn set_bullets_per_fire(&mut self, bullets: u32) -> &mut Self {
        self.bullets_per_fire = bullets.max(1);
        self
    }

    #[inline]
    pub fn bullets_per_fire(&self) -> u32 {
        self.bullets_per_fire
    }

    #[inline]
    pub fn reload_state(&self) -> &ReloadState {
        &self.reload
    }

    #[inline]
    pub fn pending_shots(&self) -> &[PendingShot] {
        &self.pending
    }

    // -------------------------------------------------------------------------
    // Ownership
    // -------------------------------------------------------------------------

    pub fn set_owner(&mut self, owner: Entity) -> &mut Self {
        self.owner = Some(owner);
        self
    }

    #[inline]
    pub fn owner(&self) -> Option<Entity> {
        self.owner
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    pub fn set_grip_position(&mut self, x: f32, y: f32) -> &mut Self {
        self.grip = Vec2::new(x, y);
        self
    }

    pub fn set_muzzle_position(&mut self, x: f32, y: f32) -> &mut Self {
        self.muzzle = Vec2::new(x, y);
        self
    }

    /// Must follow every facing change, otherwise the muzzle offset is applied unmirrored.
    pub fn set_flip_x(&mut self, flip: bool) -> &mut Self {
        self.flip_x = flip;
        self
    }

    #[inline]
    pub fn flip_x(&self) -> bool {
        self.flip_x
    }

    /// Projectile spawn offset from the weapon origin, mirrored on X when flipped.
    pub fn muzzle_offset(&self) -> Vec2 {
        mirror_x(self.muzzle, self.flip_x)
    }

    pub fn grip_offset(&self) -> Vec2 {
        mirror_x(self.grip, self.flip_x)
    }

    /// Weapon origin that puts the grip point exactly on `hand`.
    ///
    /// The sprite mirrors around its own origin, so mirroring the grip offset keeps the
    /// anchor independent of sprite width.
    pub fn visual_position(&self, hand: Vec2) -> Vec2 {
        hand - self.grip_offset()
    }

    #[inline]
    fn facing_dir(&self) -> Vec2 {
        if self.flip_x { Vec2::NEG_X } else { Vec2::X }
    }
}

#[inline]
fn mirror_x(v: Vec2, flip: bool) -> Vec2 {
    if flip { Vec2::new(-v.x, v.y) } else { v }
}
