//! Player ammo readout.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::plugins::pawns::{AmmoReadout, Equipped};
use crate::plugins::player::Player;
use crate::plugins::weapons::Weapon;

#[derive(Component)]
pub struct AmmoHud;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(
            Update,
            update_ammo_hud.run_if(in_state(GameState::InGame)),
        );
}

fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Name::new("AmmoHud"),
        AmmoHud,
        Text::new(""),
        TextFont {
            font_size: 22.0,
            ..default()
        },
        TextColor(Color::srgb(1.0, 1.0, 0.0)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(16.0),
            top: Val::Px(12.0),
            ..default()
        },
        DespawnOnExit(GameState::InGame),
    ));
}

pub fn ammo_text(readout: AmmoReadout, reloading: bool) -> String {
    let mut s = if readout.fire_limit == 0 {
        "Ammo: unlimited".to_string()
    } else {
        format!("Ammo: {}/{}", readout.fire_limit - readout.shots.min(readout.fire_limit), readout.fire_limit)
    };
    if reloading {
        s.push_str(" (reloading)");
    }
    s
}

fn update_ammo_hud(
    q_player: Query<(&AmmoReadout, &Equipped), With<Player>>,
    q_weapons: Query<&Weapon>,
    mut q_hud: Query<&mut Text, With<AmmoHud>>,
) {
    let Ok((readout, Equipped(weapon))) = q_player.single() else {
        return;
    };
    let Ok(mut text) = q_hud.single_mut() else {
        return;
    };

    let reloading = q_weapons
        .get(*weapon)
        .is_ok_and(|w| w.reload_state().is_reloading());
    let label = ammo_text(*readout, reloading);
    if text.0 != label {
        text.0 = label;
    }
}
