//! Seams to the host game server. The framework never talks to the network
//! or the simulation directly; everything goes through these traits.

use crate::player::{OfflinePlayer, Player, PlayerId, Team};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Named game-mode configuration. Permissions and requirements can gate on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Attack,
    Survival,
    Pvp,
    Sandbox,
}

impl Mode {
    pub fn parse(token: &str) -> Option<Mode> {
        Some(match token.to_lowercase().as_str() {
            "attack" => Mode::Attack,
            "survival" => Mode::Survival,
            "pvp" => Mode::Pvp,
            "sandbox" => Mode::Sandbox,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Attack => "attack",
            Mode::Survival => "survival",
            Mode::Pvp => "pvp",
            Mode::Sandbox => "sandbox",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where registered commands are announced. The host wires these into its
/// own chat and console handlers.
pub trait CommandSink {
    fn register(&mut self, name: &str, usage: &str, description: &str);
    fn remove_command(&mut self, name: &str);
}

/// Read access to the actors and content catalogs arguments resolve against.
pub trait Lookup {
    fn online_players(&self) -> Vec<Player>;
    fn offline_player(&self, token: &str) -> Option<OfflinePlayer>;
    fn teams(&self) -> Vec<Team>;
    fn unit_types(&self) -> Vec<String>;
    fn block_names(&self) -> Vec<String>;
    fn map_names(&self) -> Vec<String>;
    fn item_names(&self) -> Vec<String>;
}

/// Current match state. `now_millis` lives here so cooldown requirements can
/// run against a fake clock in tests.
pub trait GameView {
    fn mode(&self) -> Mode;
    fn game_over(&self) -> bool;
    fn team_alive(&self, team: &Team) -> bool;

    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Delivery channel for command output. Messages are rendered for the right
/// audience before they get here.
pub trait Output {
    fn message(&mut self, target: PlayerId, text: &str);
    fn error(&mut self, target: PlayerId, text: &str);
    fn console(&mut self, text: &str);
    fn console_error(&mut self, text: &str);
}

pub trait Host: Lookup + GameView + Output {}

impl<T: Lookup + GameView + Output> Host for T {}
