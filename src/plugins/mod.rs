//! Feature plugins.

use bevy::prelude::*;

use crate::plugins::projectiles::ProjectilesPlugin;

pub mod ai;
pub mod core;
pub mod pawns;
pub mod physics;
pub mod player;
pub mod projectiles;
pub mod ui;
pub mod weapons;
pub mod world;

// Render-only
pub mod camera;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    world::plugin(app);
    pawns::plugin(app);
    weapons::plugin(app);
    player::plugin(app);
    ai::plugin(app);
    ui::plugin(app);
    app.add_plugins(ProjectilesPlugin);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    camera::plugin(app);
}
