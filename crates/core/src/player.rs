use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered authorization levels. Permission shorthands compare against this
/// ordering, so variant order matters.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    #[default]
    Player,
    Trusted,
    Mod,
    Admin,
    Console,
}

impl Rank {
    pub fn parse(token: &str) -> Option<Rank> {
        Some(match token.to_lowercase().as_str() {
            "player" => Rank::Player,
            "trusted" => Rank::Trusted,
            "mod" | "moderator" => Rank::Mod,
            "admin" => Rank::Admin,
            "console" => Rank::Console,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Rank::Player => "player",
            Rank::Trusted => "trusted",
            Rank::Mod => "mod",
            Rank::Admin => "admin",
            Rank::Console => "console",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Marker flags attached to a player record by moderation or events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleFlag {
    Muted,
    Frozen,
    Marked,
    Developer,
}

impl RoleFlag {
    pub fn parse(token: &str) -> Option<RoleFlag> {
        Some(match token.to_lowercase().as_str() {
            "muted" => RoleFlag::Muted,
            "frozen" => RoleFlag::Frozen,
            "marked" => RoleFlag::Marked,
            "developer" => RoleFlag::Developer,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            RoleFlag::Muted => "muted",
            RoleFlag::Frozen => "frozen",
            RoleFlag::Marked => "marked",
            RoleFlag::Developer => "developer",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Team(pub String);

impl Team {
    pub fn new(name: impl Into<String>) -> Team {
        Team(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A connected actor as the host game server sees it. The framework only
/// reads this state; mutation stays with the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub uuid: String,
    pub username: String,
    pub rank: Rank,
    pub team: Team,
    pub flags: Vec<RoleFlag>,
    pub connected: bool,
    pub unit_alive: bool,
    pub lang: String,
}

impl Player {
    pub fn has_flag(&self, flag: RoleFlag) -> bool {
        self.flags.contains(&flag)
    }
}

/// A player record known from persistence but not necessarily connected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfflinePlayer {
    pub uuid: String,
    pub username: String,
    pub rank: Rank,
}
