use bevy::ecs::message::Messages;
use bevy::input::keyboard::{Key, KeyCode, KeyboardInput};
use bevy::input::ButtonState;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use crate::common::state::GameState;
use crate::common::test_utils::run_system_once;
use crate::plugins::pawns::AmmoReadout;

use super::auth::*;
use super::button::*;
use super::register_panel::*;
use super::text_field::*;
use super::debug_hud::ammo_text;

fn drain<M: Message>(world: &mut World) -> Vec<M> {
    world.resource_mut::<Messages<M>>().drain().collect()
}

// -----------------------------------------------------------------------------
// Button
// -----------------------------------------------------------------------------

fn button_world(interaction: Interaction) -> (World, Entity) {
    let mut world = World::new();
    world.init_resource::<Messages<ButtonClicked>>();
    let e = world
        .spawn((
            MenuButton::new(ButtonAction::Login),
            interaction,
            BackgroundColor(BUTTON_NORMAL),
        ))
        .id();
    (world, e)
}

fn set_interaction(world: &mut World, e: Entity, interaction: Interaction) {
    *world.get_mut::<Interaction>(e).unwrap() = interaction;
}

#[test]
fn hover_and_press_show_hovered_look() {
    let (mut world, e) = button_world(Interaction::Hovered);
    run_system_once(&mut world, button_interactions);
    assert_eq!(world.get::<BackgroundColor>(e).unwrap().0, BUTTON_HOVERED);

    set_interaction(&mut world, e, Interaction::Pressed);
    run_system_once(&mut world, button_interactions);
    assert_eq!(world.get::<BackgroundColor>(e).unwrap().0, BUTTON_HOVERED);
    assert!(drain::<ButtonClicked>(&mut world).is_empty());
}

#[test]
fn release_over_button_clicks() {
    let (mut world, e) = button_world(Interaction::Pressed);
    run_system_once(&mut world, button_interactions);

    set_interaction(&mut world, e, Interaction::Hovered);
    run_system_once(&mut world, button_interactions);

    assert_eq!(world.get::<BackgroundColor>(e).unwrap().0, BUTTON_NORMAL);
    assert_eq!(
        drain::<ButtonClicked>(&mut world),
        vec![ButtonClicked { button: e, action: ButtonAction::Login }]
    );
}

#[test]
fn dragging_off_cancels_the_click() {
    let (mut world, e) = button_world(Interaction::Pressed);
    run_system_once(&mut world, button_interactions);

    set_interaction(&mut world, e, Interaction::None);
    run_system_once(&mut world, button_interactions);
    set_interaction(&mut world, e, Interaction::Hovered);
    run_system_once(&mut world, button_interactions);

    assert!(drain::<ButtonClicked>(&mut world).is_empty());
}

// -----------------------------------------------------------------------------
// Text field
// -----------------------------------------------------------------------------

#[test]
fn text_field_edits_and_masks() {
    let mut field = TextField::masked();
    assert!(field.push('a'));
    assert!(field.push('b'));
    assert!(!field.push('\n'));
    assert_eq!(field.value(), "ab");
    assert_eq!(field.display(), "**");

    assert_eq!(field.pop(), Some('b'));
    field.clear();
    assert_eq!(field.value(), "");
    assert_eq!(field.pop(), None);
}

#[test]
fn text_field_respects_max_len() {
    let mut field = TextField::default();
    field.max_len = 2;
    assert!(field.push('x'));
    assert!(field.push('y'));
    assert!(!field.push('z'));
    assert_eq!(field.display(), "xy");
}

fn key_event(logical_key: Key, key_code: KeyCode, window: Entity) -> KeyboardInput {
    KeyboardInput {
        key_code,
        logical_key,
        state: ButtonState::Pressed,
        text: None,
        repeat: false,
        window,
    }
}

#[test]
fn typing_goes_to_focused_field_only() {
    let mut world = World::new();
    world.init_resource::<Messages<KeyboardInput>>();
    let focused = world.spawn(TextField::default()).id();
    let other = world.spawn(TextField::default()).id();
    world.insert_resource(FocusedField(Some(focused)));
    let window = world.spawn_empty().id();

    world.write_message(key_event(Key::Character("h".into()), KeyCode::KeyH, window));
    world.write_message(key_event(Key::Character("i".into()), KeyCode::KeyI, window));
    world.write_message(key_event(Key::Space, KeyCode::Space, window));
    world.write_message(key_event(Key::Character("x".into()), KeyCode::KeyX, window));
    world.write_message(key_event(Key::Backspace, KeyCode::Backspace, window));

    run_system_once(&mut world, type_into_focused_field);

    assert_eq!(world.get::<TextField>(focused).unwrap().value(), "hi ");
    assert_eq!(world.get::<TextField>(other).unwrap().value(), "");
}

#[test]
fn pressing_a_field_focuses_it() {
    let mut world = World::new();
    world.init_resource::<FocusedField>();
    let e = world.spawn((TextField::default(), Interaction::Pressed)).id();

    run_system_once(&mut world, focus_text_fields);

    assert_eq!(world.resource::<FocusedField>().0, Some(e));
}

// -----------------------------------------------------------------------------
// Register panel
// -----------------------------------------------------------------------------

fn panel_app() -> App {
    let mut app = App::new();
    app.add_plugins(StatesPlugin);
    app.init_state::<GameState>();
    app.add_message::<ButtonClicked>()
        .add_message::<PanelEvent>()
        .add_message::<AuthRequest>()
        .init_resource::<FocusedField>();
    app.add_systems(
        Update,
        (handle_menu_clicks, handle_panel_events.after(handle_menu_clicks)),
    );

    let panel = app.world_mut().spawn((RegisterPanel, Visibility::Hidden)).id();
    for (kind, value) in [
        (PanelField::Username, "neo"),
        (PanelField::Email, "neo@cybr.io"),
        (PanelField::Password, "trinity"),
    ] {
        let mut field = TextField::default();
        for c in value.chars() {
            field.push(c);
        }
        app.world_mut().spawn((kind, field)).insert(ChildOf(panel));
    }
    app.update();
    app
}

fn click(app: &mut App, action: ButtonAction) {
    let button = app.world_mut().spawn_empty().id();
    app.world_mut().write_message(ButtonClicked { button, action });
    app.update();
}

fn panel_visibility(app: &mut App) -> Visibility {
    *app.world_mut()
        .query_filtered::<&Visibility, With<RegisterPanel>>()
        .single(app.world())
        .unwrap()
}

fn field_values(app: &mut App) -> Vec<String> {
    app.world_mut()
        .query::<&TextField>()
        .iter(app.world())
        .map(|f| f.value().to_owned())
        .collect()
}

#[test]
fn connect_shows_panel_with_cleared_fields() {
    let mut app = panel_app();

    click(&mut app, ButtonAction::Connect);

    assert_ne!(panel_visibility(&mut app), Visibility::Hidden);
    assert!(field_values(&mut app).iter().all(String::is_empty));
}

#[test]
fn login_requests_auth_and_enters_game() {
    let mut app = panel_app();

    click(&mut app, ButtonAction::Login);
    app.update();

    let requests = drain::<AuthRequest>(app.world_mut());
    assert_eq!(
        requests,
        vec![AuthRequest::Login(Credentials {
            username: "neo".into(),
            email: "neo@cybr.io".into(),
            password: "trinity".into(),
        })]
    );
    assert_eq!(*app.world().resource::<State<GameState>>().get(), GameState::InGame);
}

#[test]
fn sign_up_requests_registration_and_stays_in_menu() {
    let mut app = panel_app();

    click(&mut app, ButtonAction::SignUp);
    app.update();

    let requests = drain::<AuthRequest>(app.world_mut());
    assert!(matches!(requests.as_slice(), [AuthRequest::Register(c)] if c.username == "neo"));
    assert_eq!(*app.world().resource::<State<GameState>>().get(), GameState::MainMenu);
}

#[test]
fn cancel_hides_panel() {
    let mut app = panel_app();
    click(&mut app, ButtonAction::Connect);

    click(&mut app, ButtonAction::Cancel);

    assert_eq!(panel_visibility(&mut app), Visibility::Hidden);
    assert_eq!(*app.world().resource::<State<GameState>>().get(), GameState::MainMenu);
}

// -----------------------------------------------------------------------------
// Auth parsing
// -----------------------------------------------------------------------------

#[test]
fn parses_login_redirect() {
    let url = parse_login_url(r#"{"url":"https://auth.example/oauth?state=1"}"#).unwrap();
    assert_eq!(url, "https://auth.example/oauth?state=1");
}

#[test]
fn parses_register_token() {
    let token = parse_token(r#"{"message":{"token":"abc.def"}}"#).unwrap();
    assert_eq!(token, "abc.def");
}

#[test]
fn parses_player_data_with_defaults() {
    let player = parse_player_data(r#"{"playerData":{"playerId":"p1","level":3,"score":120}}"#).unwrap();
    assert_eq!(player.player_id, "p1");
    assert_eq!(player.level, 3);
    assert_eq!(player.score, 120);
    assert_eq!(player.cybr_coin_amount, 0);
    assert_eq!(player.best_time, DEFAULT_BEST_TIME_MS);
}

#[test]
fn malformed_bodies_report_context() {
    let err = parse_token(r#"{"message":{}}"#).unwrap_err();
    assert!(format!("{err:#}").contains("invalid register response"));
    assert!(parse_login_url("not json").is_err());
}

#[test]
fn session_folds_responses() {
    let mut session = AuthSession::default();

    session
        .apply(&AuthResponse::Register { body: r#"{"message":{"token":"t0"}}"#.into() })
        .unwrap();
    assert_eq!(session.token.as_deref(), Some("t0"));
    assert_eq!(session.player, Some(PlayerData::new_player("t0")));

    session
        .apply(&AuthResponse::PlayerData {
            body: r#"{"playerData":{"playerId":"t0","level":7,"best_time":1000}}"#.into(),
        })
        .unwrap();
    assert_eq!(session.player.as_ref().map(|p| p.level), Some(7));
    assert_eq!(session.player.as_ref().map(|p| p.best_time), Some(1000));

    assert!(session.apply(&AuthResponse::Login { body: "{}".into() }).is_err());
    assert_eq!(session.redirect_url, None);
}

// -----------------------------------------------------------------------------
// HUD
// -----------------------------------------------------------------------------

#[test]
fn ammo_text_shows_rounds_left() {
    assert_eq!(ammo_text(AmmoReadout { shots: 2, fire_limit: 6 }, false), "Ammo: 4/6");
    assert_eq!(ammo_text(AmmoReadout { shots: 6, fire_limit: 6 }, true), "Ammo: 0/6 (reloading)");
    assert_eq!(ammo_text(AmmoReadout::default(), false), "Ammo: unlimited");
}
