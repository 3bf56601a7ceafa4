//! Weapon firing animation: a three-frame clip at 10 fps, then back to idle.

use bevy::prelude::*;

#[derive(Component, Debug, Clone, Default)]
pub enum WeaponAnimation {
    #[default]
    Idle,
    Firing { timer: Timer },
}

impl WeaponAnimation {
    pub const FIRING_FRAMES: usize = 3;
    pub const FIRING_FPS: f32 = 10.0;

    /// Restart the firing clip from its first frame.
    pub fn play_firing(&mut self) {
        *self = Self::Firing {
            timer: Timer::from_seconds(Self::FIRING_FRAMES as f32 / Self::FIRING_FPS, TimerMode::Once),
        };
    }

    /// Current frame index; idle is frame 0.
    pub fn frame(&self) -> usize {
        match self {
            Self::Idle => 0,
            Self::Firing { timer } => {
                let f = (timer.elapsed_secs() * Self::FIRING_FPS) as usize;
                f.min(Self::FIRING_FRAMES - 1)
            }
        }
    }

    pub fn advance(&mut self, dt: std::time::Duration) {
        let Self::Firing { timer } = self else {
            return;
        };
        timer.tick(dt);
        if timer.is_finished() {
            *self = Self::Idle;
        }
    }
}
