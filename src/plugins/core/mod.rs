//! Core plugin: shared resources and global settings.
//!
//! `Tunables` is only defaulted when absent, so an app (or a test) can insert its own
//! before the plugins are registered.

use bevy::prelude::*;

use crate::common::tunables::Tunables;

pub const FIXED_HZ: f64 = 64.0;

pub fn plugin(app: &mut App) {
    app.init_resource::<Tunables>()
        .insert_resource(Time::<Fixed>::from_hz(FIXED_HZ))
        .insert_resource(ClearColor(Color::srgb(0.09, 0.09, 0.13)));
}

#[cfg(test)]
mod tests;
