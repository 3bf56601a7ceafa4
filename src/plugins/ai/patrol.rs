//! Patrol behaviour: boundary-bounce walking plus periodic auto-fire.
//!
//! Both behaviours are plain state advanced from systems; cancelling auto-fire on death
//! is a state check, not a timer teardown.

use std::time::Duration;

use bevy::prelude::*;

use crate::plugins::pawns::{Equipped, Facing, Pawn, PawnLifeState};
use crate::plugins::weapons::{FireOrder, WeaponCommand};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PatrolPathError {
    NotFinite { start: f32, end: f32 },
    Inverted { start: f32, end: f32 },
}

impl std::fmt::Display for PatrolPathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatrolPathError::NotFinite { start, end } => {
                write!(f, "patrol bounds must be finite (start: {start}, end: {end})")
            }
            PatrolPathError::Inverted { start, end } => {
                write!(f, "patrol start {start} must be lower than end {end}")
            }
        }
    }
}

impl std::error::Error for PatrolPathError {}

/// Horizontal interval `[start_x, end_x]`; `start_x < end_x` once assigned.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PatrolPath {
    start_x: f32,
    end_x: f32,
}

impl PatrolPath {
    pub fn new(start_x: f32, end_x: f32) -> Result<Self, PatrolPathError> {
        if !start_x.is_finite() || !end_x.is_finite() {
            return Err(PatrolPathError::NotFinite { start: start_x, end: end_x });
        }
        if start_x >= end_x {
            return Err(PatrolPathError::Inverted { start: start_x, end: end_x });
        }
        Ok(Self { start_x, end_x })
    }

    /// Replace both bounds, or keep the current ones if the new pair is invalid.
    pub fn set(&mut self, start_x: f32, end_x: f32) -> Result<(), PatrolPathError> {
        *self = Self::new(start_x, end_x)?;
        Ok(())
    }

    #[inline]
    pub fn start_x(&self) -> f32 {
        self.start_x
    }

    #[inline]
    pub fn end_x(&self) -> f32 {
        self.end_x
    }
}

#[derive(Component, Debug, Clone, Default)]
pub struct PatrolAi {
    pub patrol: bool,
    path: PatrolPath,
}

impl PatrolAi {
    pub fn patrolling(path: PatrolPath) -> Self {
        Self { patrol: true, path }
    }

    #[inline]
    pub fn path(&self) -> PatrolPath {
        self.path
    }

    /// Invalid bounds are logged and rejected; the previous path stays in effect.
    pub fn set_path(&mut self, start_x: f32, end_x: f32) {
        if let Err(e) = self.path.set(start_x, end_x) {
            error!("Rejected patrol path: {e}");
        }
    }
}

/// Bounce rule: at or past the start face right, at or past the end face left,
/// anywhere in between keep going.
pub fn patrol_facing(x: f32, path: PatrolPath, current: Facing) -> Facing {
    if x <= path.start_x {
        Facing::Right
    } else if x >= path.end_x {
        Facing::Left
    } else {
        current
    }
}

/// Recurring fire order for the equipped weapon, one per elapsed period.
#[derive(Component, Debug, Clone)]
pub struct AutoFire {
    pub timer: Timer,
}

impl AutoFire {
    pub fn every(delay: Duration) -> Self {
        Self {
            timer: Timer::new(delay, TimerMode::Repeating),
        }
    }
}

pub fn patrol_update(mut q: Query<(&PatrolAi, &mut Pawn, &Transform, &PawnLifeState)>) {
    for (ai, mut pawn, tf, life) in &mut q {
        if !life.is_alive() {
            continue;
        }
        if !ai.patrol {
            if pawn.walking {
                pawn.stop();
            }
            continue;
        }

        let facing = patrol_facing(tf.translation.x, ai.path, pawn.facing);
        if pawn.facing != facing {
            pawn.facing = facing;
        }
        if !pawn.walking {
            pawn.walk();
        }
    }
}

pub fn auto_fire(
    time: Res<Time>,
    mut q: Query<(&mut AutoFire, &Equipped, &PawnLifeState)>,
    mut writer: MessageWriter<WeaponCommand>,
) {
    let dt = time.delta();
    for (mut auto, Equipped(weapon), life) in &mut q {
        if !life.is_alive() {
            continue;
        }

        auto.timer.tick(dt);
        for _ in 0..auto.timer.times_finished_this_tick() {
            writer.write(WeaponCommand::fire(*weapon, FireOrder::facing()));
        }
    }
}
