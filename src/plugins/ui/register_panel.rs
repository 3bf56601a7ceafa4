//! Registration / login panel shown from the main menu.
//!
//! ```text
//! Connect   -> show panel (fields cleared)
//! Cancel    -> PanelEvent::PlayerCancelledConnection -> hide panel
//! Login     -> AuthRequest::Login + PanelEvent::PlayerConnected -> InGame
//! Sign Up   -> AuthRequest::Register
//! Play      -> InGame
//! ```

use bevy::prelude::*;

use crate::common::state::GameState;

use super::auth::{AuthRequest, Credentials};
use super::button::{spawn_menu_button, ButtonAction, ButtonClicked};
use super::text_field::{spawn_text_field, FocusedField, TextField};

#[derive(Component)]
pub struct RegisterPanel;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelField {
    Username,
    Email,
    Password,
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelEvent {
    PlayerConnected,
    PlayerCancelledConnection,
}

/// Spawn the panel hidden, as a full-screen overlay.
pub fn spawn_register_panel(commands: &mut Commands) -> Entity {
    commands
        .spawn((
            Name::new("RegisterPanel"),
            RegisterPanel,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.05, 0.05, 0.07, 0.95)),
            Visibility::Hidden,
        ))
        .with_children(|panel| {
            spawn_text_field(panel, "Username", TextField::default(), PanelField::Username);
            spawn_text_field(panel, "Email", TextField::default(), PanelField::Email);
            spawn_text_field(panel, "Password", TextField::masked(), PanelField::Password);

            panel
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    margin: UiRect::top(Val::Px(32.0)),
                    ..default()
                })
                .with_children(|row| {
                    spawn_menu_button(row, "Cancel", ButtonAction::Cancel);
                    spawn_menu_button(row, "Login", ButtonAction::Login);
                    spawn_menu_button(row, "Sign Up", ButtonAction::SignUp);
                });
        })
        .id()
}

fn credentials(q_fields: &Query<(&PanelField, &mut TextField)>) -> Credentials {
    let mut creds = Credentials::default();
    for (kind, field) in q_fields {
        let value = field.value().to_owned();
        match kind {
            PanelField::Username => creds.username = value,
            PanelField::Email => creds.email = value,
            PanelField::Password => creds.password = value,
        }
    }
    creds
}

/// Show or hide the panel. Showing always starts from empty fields.
pub fn set_panel_visible(
    visible: bool,
    panel: &mut Visibility,
    q_fields: &mut Query<(&PanelField, &mut TextField)>,
    focus: &mut FocusedField,
) {
    *panel = if visible { Visibility::Inherited } else { Visibility::Hidden };
    focus.0 = None;
    if visible {
        for (_, mut field) in q_fields.iter_mut() {
            field.clear();
        }
    }
}

pub fn handle_menu_clicks(
    mut clicks: MessageReader<ButtonClicked>,
    mut q_panel: Query<&mut Visibility, With<RegisterPanel>>,
    mut q_fields: Query<(&PanelField, &mut TextField)>,
    mut focus: ResMut<FocusedField>,
    mut auth: MessageWriter<AuthRequest>,
    mut panel_events: MessageWriter<PanelEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for click in clicks.read() {
        match click.action {
            ButtonAction::Play => next_state.set(GameState::InGame),
            ButtonAction::Connect => {
                let Ok(mut vis) = q_panel.single_mut() else {
                    debug!("Connect clicked without a register panel");
                    continue;
                };
                set_panel_visible(true, &mut vis, &mut q_fields, &mut focus);
            }
            ButtonAction::Cancel => {
                panel_events.write(PanelEvent::PlayerCancelledConnection);
            }
            ButtonAction::Login => {
                auth.write(AuthRequest::Login(credentials(&q_fields)));
                panel_events.write(PanelEvent::PlayerConnected);
            }
            ButtonAction::SignUp => {
                auth.write(AuthRequest::Register(credentials(&q_fields)));
            }
        }
    }
}

pub fn handle_panel_events(
    mut events: MessageReader<PanelEvent>,
    mut q_panel: Query<&mut Visibility, With<RegisterPanel>>,
    mut q_fields: Query<(&PanelField, &mut TextField)>,
    mut focus: ResMut<FocusedField>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for ev in events.read() {
        match ev {
            PanelEvent::PlayerConnected => next_state.set(GameState::InGame),
            PanelEvent::PlayerCancelledConnection => {
                if let Ok(mut vis) = q_panel.single_mut() {
                    set_panel_visible(false, &mut vis, &mut q_fields, &mut focus);
                }
            }
        }
    }
}
