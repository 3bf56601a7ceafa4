//! Menu button widget: background + centered label.
//!
//! Hovering or pressing shows the hovered look; releasing over the button restores the
//! normal look and writes `ButtonClicked`. Dragging off a pressed button cancels the click.

use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

pub const BUTTON_NORMAL: Color = Color::srgb(0.85, 0.85, 0.2);
pub const BUTTON_HOVERED: Color = Color::srgb(1.0, 1.0, 0.45);
const BUTTON_TEXT: Color = Color::srgb(0.09, 0.09, 0.13);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonAction {
    Play,
    Connect,
    Cancel,
    Login,
    SignUp,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct MenuButton {
    pub action: ButtonAction,
    pressed: bool,
}

impl MenuButton {
    pub fn new(action: ButtonAction) -> Self {
        Self { action, pressed: false }
    }
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ButtonClicked {
    pub button: Entity,
    pub action: ButtonAction,
}

pub fn spawn_menu_button(parent: &mut ChildSpawnerCommands, label: &str, action: ButtonAction) -> Entity {
    parent
        .spawn((
            Name::new(format!("Button({label})")),
            Button,
            MenuButton::new(action),
            Node {
                width: Val::Px(220.0),
                height: Val::Px(64.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                margin: UiRect::horizontal(Val::Px(12.0)),
                ..default()
            },
            BackgroundColor(BUTTON_NORMAL),
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(label),
                TextFont {
                    font_size: 40.0,
                    ..default()
                },
                TextColor(BUTTON_TEXT),
            ));
        })
        .id()
}

#[allow(clippy::type_complexity)]
pub fn button_interactions(
    mut q: Query<(Entity, &Interaction, &mut MenuButton, &mut BackgroundColor), Changed<Interaction>>,
    mut clicked: MessageWriter<ButtonClicked>,
) {
    for (e, interaction, mut button, mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => {
                button.pressed = true;
                *bg = BackgroundColor(BUTTON_HOVERED);
            }
            Interaction::Hovered if button.pressed => {
                button.pressed = false;
                *bg = BackgroundColor(BUTTON_NORMAL);
                clicked.write(ButtonClicked {
                    button: e,
                    action: button.action,
                });
            }
            Interaction::Hovered => {
                *bg = BackgroundColor(BUTTON_HOVERED);
            }
            Interaction::None => {
                button.pressed = false;
                *bg = BackgroundColor(BUTTON_NORMAL);
            }
        }
    }
}
