//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `cybr_game::game::configure_headless` to install gameplay plugins.
//! - time advances by a fixed amount per `update()` so timers are deterministic.

#![allow(dead_code)]

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use cybr_game::common::state::GameState;

pub const FRAME: Duration = Duration::from_millis(50);

pub fn app_headless() -> App {
    let mut app = App::new();

    // Add AssetPlugin + ScenePlugin so SceneSpawner exists.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));

    cybr_game::game::configure_headless(&mut app);
    // `App::run` does this; manual `update()` loops must finish plugin setup themselves.
    app.finish();
    app.cleanup();
    app
}

/// Headless app that already went through `OnEnter(InGame)`.
pub fn app_in_game() -> App {
    let mut app = app_headless();
    app.update();
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::InGame);
    app.update();
    app
}
