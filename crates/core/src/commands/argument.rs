use super::argument_parser::*;
use crate::commands::value::Value;
use crate::host::Lookup;

/// The fixed argument type enumeration of the declaration grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentType {
    String,
    Number,
    Boolean,
    Player,
    Team,
    Time,
    UnitType,
    Block,
    Uuid,
    OfflinePlayer,
    Map,
    Rank,
    RoleFlag,
    Item,
}

impl ArgumentType {
    /// Resolves a grammar token (`"player"`, `"time"`, ...) to a type.
    pub fn from_token(token: &str) -> Option<ArgumentType> {
        Some(match token {
            "string" => ArgumentType::String,
            "number" => ArgumentType::Number,
            "boolean" => ArgumentType::Boolean,
            "player" => ArgumentType::Player,
            "team" => ArgumentType::Team,
            "time" => ArgumentType::Time,
            "unittype" => ArgumentType::UnitType,
            "block" => ArgumentType::Block,
            "uuid" => ArgumentType::Uuid,
            "offlinePlayer" => ArgumentType::OfflinePlayer,
            "map" => ArgumentType::Map,
            "rank" => ArgumentType::Rank,
            "roleflag" => ArgumentType::RoleFlag,
            "item" => ArgumentType::Item,
            _ => return None,
        })
    }

    pub fn token_name(self) -> &'static str {
        match self {
            ArgumentType::String => "string",
            ArgumentType::Number => "number",
            ArgumentType::Boolean => "boolean",
            ArgumentType::Player => "player",
            ArgumentType::Team => "team",
            ArgumentType::Time => "time",
            ArgumentType::UnitType => "unittype",
            ArgumentType::Block => "block",
            ArgumentType::Uuid => "uuid",
            ArgumentType::OfflinePlayer => "offlinePlayer",
            ArgumentType::Map => "map",
            ArgumentType::Rank => "rank",
            ArgumentType::RoleFlag => "roleflag",
            ArgumentType::Item => "item",
        }
    }

    /// What the "invalid argument" message tells the actor this type wanted.
    pub fn expected(self) -> &'static str {
        match self {
            ArgumentType::String => "text",
            ArgumentType::Number => "a number",
            ArgumentType::Boolean => "true or false",
            ArgumentType::Player => "a connected player",
            ArgumentType::Team => "a team name",
            ArgumentType::Time => "a duration such as 10m or 1h30m",
            ArgumentType::UnitType => "a unit type",
            ArgumentType::Block => "a block name",
            ArgumentType::Uuid => "an account id",
            ArgumentType::OfflinePlayer => "a known player",
            ArgumentType::Map => "a map name",
            ArgumentType::Rank => "a rank name",
            ArgumentType::RoleFlag => "a role flag",
            ArgumentType::Item => "an item name",
        }
    }

    pub(super) fn coerce(self, token: &str, lookup: &dyn Lookup) -> Result<Value, ()> {
        match self {
            ArgumentType::String => coerce_string(token),
            ArgumentType::Number => coerce_number(token),
            ArgumentType::Boolean => coerce_boolean(token),
            ArgumentType::Player => coerce_player(token, lookup),
            ArgumentType::Team => coerce_team(token, lookup),
            ArgumentType::Time => coerce_time(token),
            ArgumentType::UnitType => coerce_unit_type(token, lookup),
            ArgumentType::Block => coerce_block(token, lookup),
            ArgumentType::Uuid => coerce_uuid(token),
            ArgumentType::OfflinePlayer => coerce_offline_player(token, lookup),
            ArgumentType::Map => coerce_map(token, lookup),
            ArgumentType::Rank => coerce_rank(token),
            ArgumentType::RoleFlag => coerce_role_flag(token),
            ArgumentType::Item => coerce_item(token, lookup),
        }
    }
}
