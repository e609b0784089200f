use crate::commands::error::{CommandResult, InternalError};
use crate::player::{OfflinePlayer, Player, Rank, RoleFlag, Team};

/// A coerced argument value. One variant per declared argument type.
#[derive(Debug, Clone)]
pub enum Value {
    String(String),
    Number(f64),
    Boolean(bool),
    Player(Player),
    Team(Team),
    Time(u64),
    UnitType(String),
    Block(String),
    Uuid(String),
    OfflinePlayer(OfflinePlayer),
    Map(String),
    Rank(Rank),
    RoleFlag(RoleFlag),
    Item(String),
}

impl Value {
    fn type_error(&self, expected: &str) -> InternalError {
        InternalError::WrongArgumentType {
            name: format!("{:?}", self),
            expected: expected.to_string(),
        }
    }

    pub(super) fn as_string(&self) -> CommandResult<&String> {
        match self {
            Value::String(s) => Ok(s),
            _ => Err(self.type_error("String").into()),
        }
    }

    pub(super) fn as_number(&self) -> CommandResult<f64> {
        match self {
            Value::Number(n) => Ok(*n),
            _ => Err(self.type_error("Number").into()),
        }
    }

    pub(super) fn as_boolean(&self) -> CommandResult<bool> {
        match self {
            Value::Boolean(b) => Ok(*b),
            _ => Err(self.type_error("Boolean").into()),
        }
    }

    pub(super) fn as_player(&self) -> CommandResult<&Player> {
        match self {
            Value::Player(p) => Ok(p),
            _ => Err(self.type_error("Player").into()),
        }
    }

    pub(super) fn as_team(&self) -> CommandResult<&Team> {
        match self {
            Value::Team(t) => Ok(t),
            _ => Err(self.type_error("Team").into()),
        }
    }

    pub(super) fn as_time(&self) -> CommandResult<u64> {
        match self {
            Value::Time(millis) => Ok(*millis),
            _ => Err(self.type_error("Time").into()),
        }
    }

    pub(super) fn as_unit_type(&self) -> CommandResult<&String> {
        match self {
            Value::UnitType(u) => Ok(u),
            _ => Err(self.type_error("UnitType").into()),
        }
    }

    pub(super) fn as_block(&self) -> CommandResult<&String> {
        match self {
            Value::Block(b) => Ok(b),
            _ => Err(self.type_error("Block").into()),
        }
    }

    pub(super) fn as_uuid(&self) -> CommandResult<&String> {
        match self {
            Value::Uuid(u) => Ok(u),
            _ => Err(self.type_error("Uuid").into()),
        }
    }

    pub(super) fn as_offline_player(&self) -> CommandResult<&OfflinePlayer> {
        match self {
            Value::OfflinePlayer(p) => Ok(p),
            _ => Err(self.type_error("OfflinePlayer").into()),
        }
    }

    pub(super) fn as_map(&self) -> CommandResult<&String> {
        match self {
            Value::Map(m) => Ok(m),
            _ => Err(self.type_error("Map").into()),
        }
    }

    pub(super) fn as_rank(&self) -> CommandResult<Rank> {
        match self {
            Value::Rank(r) => Ok(*r),
            _ => Err(self.type_error("Rank").into()),
        }
    }

    pub(super) fn as_role_flag(&self) -> CommandResult<RoleFlag> {
        match self {
            Value::RoleFlag(f) => Ok(*f),
            _ => Err(self.type_error("RoleFlag").into()),
        }
    }

    pub(super) fn as_item(&self) -> CommandResult<&String> {
        match self {
            Value::Item(i) => Ok(i),
            _ => Err(self.type_error("Item").into()),
        }
    }
}
