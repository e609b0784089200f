use crate::commands::error::{CommandResult, InternalError};
use crate::commands::value::Value;
use crate::player::{OfflinePlayer, Player, Rank, RoleFlag, Team};
use rustc_hash::FxHashMap;

/// Coerced arguments keyed by declared name. Absent optionals have no entry,
/// so the `opt_*` accessors are the ones to use for them; the `get_*`
/// accessors treat absence as a registration bug.
pub struct ArgumentSet {
    args: FxHashMap<String, Value>,
}

impl ArgumentSet {
    pub(super) fn empty() -> Self {
        Self {
            args: FxHashMap::default(),
        }
    }

    pub(super) fn new(args: Vec<(String, Value)>) -> Self {
        Self {
            args: args.into_iter().collect(),
        }
    }

    pub fn has(&self, name: &str) -> bool {
        self.args.contains_key(name)
    }

    fn get(&self, name: &str) -> CommandResult<&Value> {
        self.args.get(name).ok_or_else(|| {
            InternalError::MissingArgument {
                name: name.to_string(),
            }
            .into()
        })
    }

    pub fn get_string(&self, name: &str) -> CommandResult<String> {
        Ok(self.get(name)?.as_string()?.clone())
    }

    pub fn get_number(&self, name: &str) -> CommandResult<f64> {
        self.get(name)?.as_number()
    }

    pub fn get_boolean(&self, name: &str) -> CommandResult<bool> {
        self.get(name)?.as_boolean()
    }

    pub fn get_player(&self, name: &str) -> CommandResult<Player> {
        Ok(self.get(name)?.as_player()?.clone())
    }

    pub fn get_team(&self, name: &str) -> CommandResult<Team> {
        Ok(self.get(name)?.as_team()?.clone())
    }

    pub fn get_time(&self, name: &str) -> CommandResult<u64> {
        self.get(name)?.as_time()
    }

    pub fn get_unit_type(&self, name: &str) -> CommandResult<String> {
        Ok(self.get(name)?.as_unit_type()?.clone())
    }

    pub fn get_block(&self, name: &str) -> CommandResult<String> {
        Ok(self.get(name)?.as_block()?.clone())
    }

    pub fn get_uuid(&self, name: &str) -> CommandResult<String> {
        Ok(self.get(name)?.as_uuid()?.clone())
    }

    pub fn get_offline_player(&self, name: &str) -> CommandResult<OfflinePlayer> {
        Ok(self.get(name)?.as_offline_player()?.clone())
    }

    pub fn get_map(&self, name: &str) -> CommandResult<String> {
        Ok(self.get(name)?.as_map()?.clone())
    }

    pub fn get_rank(&self, name: &str) -> CommandResult<Rank> {
        self.get(name)?.as_rank()
    }

    pub fn get_role_flag(&self, name: &str) -> CommandResult<RoleFlag> {
        self.get(name)?.as_role_flag()
    }

    pub fn get_item(&self, name: &str) -> CommandResult<String> {
        Ok(self.get(name)?.as_item()?.clone())
    }

    pub fn opt_string(&self, name: &str) -> CommandResult<Option<String>> {
        self.opt(name, Value::as_string).map(|v| v.cloned())
    }

    pub fn opt_number(&self, name: &str) -> CommandResult<Option<f64>> {
        match self.args.get(name) {
            Some(value) => Ok(Some(value.as_number()?)),
            None => Ok(None),
        }
    }

    pub fn opt_player(&self, name: &str) -> CommandResult<Option<Player>> {
        Ok(self.opt(name, Value::as_player)?.cloned())
    }

    pub fn opt_team(&self, name: &str) -> CommandResult<Option<Team>> {
        Ok(self.opt(name, Value::as_team)?.cloned())
    }

    pub fn opt_time(&self, name: &str) -> CommandResult<Option<u64>> {
        match self.args.get(name) {
            Some(value) => Ok(Some(value.as_time()?)),
            None => Ok(None),
        }
    }

    pub fn opt_rank(&self, name: &str) -> CommandResult<Option<Rank>> {
        match self.args.get(name) {
            Some(value) => Ok(Some(value.as_rank()?)),
            None => Ok(None),
        }
    }

    fn opt<'a, T: ?Sized>(
        &'a self,
        name: &str,
        as_type: impl Fn(&'a Value) -> CommandResult<&'a T>,
    ) -> CommandResult<Option<&'a T>> {
        match self.args.get(name) {
            Some(value) => Ok(Some(as_type(value)?)),
            None => Ok(None),
        }
    }
}
