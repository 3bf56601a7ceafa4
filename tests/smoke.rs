mod common;

use avian2d::prelude::*;
use bevy::prelude::*;
use cybr_game::common::state::GameState;
use cybr_game::plugins::ai::{AutoFire, PatrolAi, PATROL_LANES};
use cybr_game::plugins::pawns::Equipped;
use cybr_game::plugins::player::Player;
use cybr_game::plugins::ui::register_panel::RegisterPanel;

#[test]
fn boots_into_main_menu() {
    let mut app = common::app_headless();

    for _ in 0..3 {
        app.update();
    }

    assert_eq!(*app.world().resource::<State<GameState>>().get(), GameState::MainMenu);
    let panels = app
        .world_mut()
        .query_filtered::<(), With<RegisterPanel>>()
        .iter(app.world())
        .count();
    assert_eq!(panels, 1);
}

#[test]
fn entering_game_spawns_armed_pawns() {
    let mut app = common::app_in_game();

    for _ in 0..5 {
        app.update();
    }

    let players = app
        .world_mut()
        .query_filtered::<(&Equipped, &TranslationInterpolation), With<Player>>()
        .iter(app.world())
        .count();
    assert_eq!(players, 1, "Player should be spawned with a weapon and smoothing");

    let patrols = app
        .world_mut()
        .query::<&PatrolAi>()
        .iter(app.world())
        .count();
    assert_eq!(patrols, PATROL_LANES.len());

    let armed = app
        .world_mut()
        .query_filtered::<(), (With<PatrolAi>, With<AutoFire>, With<Equipped>)>()
        .iter(app.world())
        .count();
    assert!(armed > 0);

    // Menu is gone.
    let panels = app
        .world_mut()
        .query_filtered::<(), With<RegisterPanel>>()
        .iter(app.world())
        .count();
    assert_eq!(panels, 0);
}

#[test]
fn patrols_start_walking() {
    let mut app = common::app_in_game();

    for _ in 0..4 {
        app.update();
    }

    let moving = app
        .world_mut()
        .query_filtered::<&LinearVelocity, With<PatrolAi>>()
        .iter(app.world())
        .filter(|v| v.x.abs() > 0.0)
        .count();
    assert_eq!(moving, PATROL_LANES.len());
}
