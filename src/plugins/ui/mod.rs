//! UI plugin: main menu, registration panel, account glue and the in-game HUD.
//!
//! Widgets report through messages (`ButtonClicked`, `PanelEvent`) instead of callbacks;
//! the menu systems turn those into state changes and `AuthRequest`s.

use bevy::input::keyboard::KeyboardInput;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;

pub mod auth;
pub mod button;
pub mod debug_hud;
pub mod register_panel;
pub mod text_field;

use auth::{AuthRequest, AuthResponse, AuthSession};
use button::{spawn_menu_button, ButtonAction, ButtonClicked};
use register_panel::PanelEvent;
use text_field::FocusedField;

pub fn plugin(app: &mut App) {
    app.add_message::<ButtonClicked>()
        .add_message::<PanelEvent>()
        .add_message::<AuthRequest>()
        .add_message::<AuthResponse>()
        // Present under DefaultPlugins already; headless apps need the buffer for the reader.
        .add_message::<KeyboardInput>()
        .init_resource::<FocusedField>()
        .init_resource::<AuthSession>();

    app.add_systems(OnEnter(GameState::MainMenu), spawn_main_menu)
        .add_systems(OnExit(GameState::MainMenu), clear_focus)
        .add_systems(
            Update,
            (
                button::button_interactions,
                text_field::focus_text_fields,
                text_field::type_into_focused_field.after(text_field::focus_text_fields),
                register_panel::handle_menu_clicks.after(button::button_interactions),
                register_panel::handle_panel_events.after(register_panel::handle_menu_clicks),
                text_field::sync_text_fields
                    .after(text_field::type_into_focused_field)
                    .after(register_panel::handle_panel_events),
            )
                .run_if(in_state(GameState::MainMenu)),
        )
        .add_systems(Update, (auth::log_auth_requests, auth::apply_auth_responses));

    debug_hud::plugin(app);
}

fn spawn_main_menu(mut commands: Commands) {
    commands
        .spawn((
            Name::new("MainMenu"),
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgb(0.05, 0.05, 0.07)),
            DespawnOnExit(GameState::MainMenu),
        ))
        .with_children(|root| {
            root.spawn((
                Text::new("CYBR"),
                TextFont {
                    font_size: 96.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 1.0, 0.0)),
                Node {
                    margin: UiRect::bottom(Val::Px(48.0)),
                    ..default()
                },
            ));

            root.spawn(Node {
                flex_direction: FlexDirection::Row,
                ..default()
            })
            .with_children(|row| {
                spawn_menu_button(row, "Play", ButtonAction::Play);
                spawn_menu_button(row, "Connect", ButtonAction::Connect);
            });
        });

    let panel = register_panel::spawn_register_panel(&mut commands);
    commands.entity(panel).insert(DespawnOnExit(GameState::MainMenu));
}

fn clear_focus(mut focus: ResMut<FocusedField>) {
    focus.0 = None;
}

#[cfg(test)]
mod tests;
