//! Account service glue: request intents out, response bodies in.
//!
//! The HTTP transport is not part of this crate. Whatever performs the requests writes
//! the raw bodies back as `AuthResponse`, and this module parses the few fields the game
//! cares about into `AuthSession`.
//!
//! Response shapes:
//! - login:       `{ "url": "<oauth redirect>" }`
//! - register:    `{ "message": { "token": "<token>" } }`
//! - player data: `{ "playerData": { "playerId": ..., "level": ..., ... } }`

use anyhow::{Context, Result};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Best time for a player who never finished a level: nine hours, in milliseconds.
pub const DEFAULT_BEST_TIME_MS: u64 = 9 * 3_600_000;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Message, Clone, Debug, PartialEq, Eq)]
pub enum AuthRequest {
    Login(Credentials),
    Register(Credentials),
}

#[derive(Message, Clone, Debug, PartialEq, Eq)]
pub enum AuthResponse {
    Login { body: String },
    Register { body: String },
    PlayerData { body: String },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PlayerData {
    #[serde(rename = "playerId")]
    pub player_id: String,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub score: u64,
    #[serde(default)]
    pub cybr_coin_amount: u64,
    #[serde(default)]
    pub cybr_coin_per_level: u64,
    #[serde(default = "default_best_time")]
    pub best_time: u64,
}

fn default_best_time() -> u64 {
    DEFAULT_BEST_TIME_MS
}

impl PlayerData {
    /// Fresh record for a newly registered account.
    pub fn new_player(player_id: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            level: 0,
            score: 0,
            cybr_coin_amount: 0,
            cybr_coin_per_level: 0,
            best_time: DEFAULT_BEST_TIME_MS,
        }
    }
}

#[derive(Deserialize)]
struct LoginBody {
    url: String,
}

#[derive(Deserialize)]
struct TokenMessage {
    token: String,
}

#[derive(Deserialize)]
struct RegisterBody {
    message: TokenMessage,
}

#[derive(Deserialize)]
struct PlayerDataBody {
    #[serde(rename = "playerData")]
    player_data: PlayerData,
}

pub fn parse_login_url(body: &str) -> Result<String> {
    let parsed: LoginBody = serde_json::from_str(body).context("invalid login response")?;
    Ok(parsed.url)
}

pub fn parse_token(body: &str) -> Result<String> {
    let parsed: RegisterBody = serde_json::from_str(body).context("invalid register response")?;
    Ok(parsed.message.token)
}

pub fn parse_player_data(body: &str) -> Result<PlayerData> {
    let parsed: PlayerDataBody = serde_json::from_str(body).context("invalid player data response")?;
    Ok(parsed.player_data)
}

#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct AuthSession {
    /// OAuth page the player must visit to finish logging in.
    pub redirect_url: Option<String>,
    pub token: Option<String>,
    pub player: Option<PlayerData>,
}

impl AuthSession {
    /// Fold one response body into the session.
    pub fn apply(&mut self, response: &AuthResponse) -> Result<()> {
        match response {
            AuthResponse::Login { body } => {
                self.redirect_url = Some(parse_login_url(body)?);
            }
            AuthResponse::Register { body } => {
                let token = parse_token(body)?;
                if self.player.is_none() {
                    self.player = Some(PlayerData::new_player(token.clone()));
                }
                self.token = Some(token);
            }
            AuthResponse::PlayerData { body } => {
                self.player = Some(parse_player_data(body)?);
            }
        }
        Ok(())
    }
}

pub fn log_auth_requests(mut reader: MessageReader<AuthRequest>) {
    for req in reader.read() {
        match req {
            AuthRequest::Login(c) => info!("Login requested for {:?}", c.email),
            AuthRequest::Register(c) => info!("Registration requested for {:?} ({:?})", c.username, c.email),
        }
    }
}

pub fn apply_auth_responses(mut reader: MessageReader<AuthResponse>, mut session: ResMut<AuthSession>) {
    for response in reader.read() {
        if let Err(e) = session.apply(response) {
            warn!("Ignoring auth response: {e:#}");
        }
    }
}
