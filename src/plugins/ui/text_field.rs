//! Single-line text entry.
//!
//! Clicking a field focuses it; keyboard input goes to the focused field only.
//! Password fields store the real value and display `*` per character.

use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::input::ButtonState;
use bevy::prelude::*;

const FIELD_IDLE: Color = Color::srgb(0.12, 0.12, 0.16);
const FIELD_FOCUSED: Color = Color::srgb(0.2, 0.2, 0.28);

#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    value: String,
    pub masked: bool,
    pub max_len: usize,
}

impl Default for TextField {
    fn default() -> Self {
        Self {
            value: String::new(),
            masked: false,
            max_len: 64,
        }
    }
}

impl TextField {
    pub fn masked() -> Self {
        Self { masked: true, ..default() }
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Append a printable character. Returns false when full or not printable.
    pub fn push(&mut self, c: char) -> bool {
        if c.is_control() || self.value.chars().count() >= self.max_len {
            return false;
        }
        self.value.push(c);
        true
    }

    pub fn pop(&mut self) -> Option<char> {
        self.value.pop()
    }

    /// What the label shows.
    pub fn display(&self) -> String {
        if self.masked {
            "*".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

/// Child label of a text field.
#[derive(Component)]
pub struct TextFieldLabel;

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FocusedField(pub Option<Entity>);

/// Spawn a captioned field; returns the field entity.
pub fn spawn_text_field(parent: &mut ChildSpawnerCommands, caption: &str, field: TextField, extra: impl Bundle) -> Entity {
    parent.spawn((
        Text::new(caption),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::srgb(1.0, 1.0, 0.0)),
        Node {
            margin: UiRect::bottom(Val::Px(8.0)),
            ..default()
        },
    ));

    parent
        .spawn((
            Name::new(format!("TextField({caption})")),
            Button,
            field,
            extra,
            Node {
                width: Val::Px(420.0),
                height: Val::Px(44.0),
                padding: UiRect::horizontal(Val::Px(10.0)),
                align_items: AlignItems::Center,
                margin: UiRect::bottom(Val::Px(24.0)),
                ..default()
            },
            BackgroundColor(FIELD_IDLE),
        ))
        .with_children(|f| {
            f.spawn((
                TextFieldLabel,
                Text::new(""),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        })
        .id()
}

pub fn focus_text_fields(
    q: Query<(Entity, &Interaction), (Changed<Interaction>, With<TextField>)>,
    mut focus: ResMut<FocusedField>,
) {
    for (e, interaction) in &q {
        if *interaction == Interaction::Pressed && focus.0 != Some(e) {
            focus.0 = Some(e);
        }
    }
}

pub fn type_into_focused_field(
    mut keys: MessageReader<KeyboardInput>,
    focus: Res<FocusedField>,
    mut q: Query<&mut TextField>,
) {
    let Some(Ok(mut field)) = focus.0.map(|e| q.get_mut(e)) else {
        keys.clear();
        return;
    };

    for ev in keys.read() {
        if ev.state != ButtonState::Pressed {
            continue;
        }
        match &ev.logical_key {
            Key::Backspace => {
                field.pop();
            }
            Key::Space => {
                field.push(' ');
            }
            Key::Character(s) => {
                for c in s.chars() {
                    field.push(c);
                }
            }
            _ => {}
        }
    }
}

/// Presentation: label text follows the field value, background follows focus.
pub fn sync_text_fields(
    focus: Res<FocusedField>,
    mut q_fields: Query<(Entity, Ref<TextField>, &Children, &mut BackgroundColor)>,
    mut q_labels: Query<&mut Text, With<TextFieldLabel>>,
) {
    for (e, field, children, mut bg) in &mut q_fields {
        let color = if focus.0 == Some(e) { FIELD_FOCUSED } else { FIELD_IDLE };
        if bg.0 != color {
            bg.0 = color;
        }

        if !field.is_changed() {
            continue;
        }
        for child in children.iter() {
            if let Ok(mut text) = q_labels.get_mut(child) {
                text.0 = field.display();
            }
        }
    }
}
