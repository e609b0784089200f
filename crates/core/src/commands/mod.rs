pub mod argument;
mod argument_parser;
mod argument_set;
mod context;
pub mod error;
mod executor;
mod registry;
pub mod requirements;
pub mod spec;
pub mod value;

pub use argument_set::ArgumentSet;
pub use context::ExecutionContext;
pub use registry::{CommandSet, CommandSpec, Handler, UnauthorizedHook};

use crate::player::PlayerId;

/// The actor an invocation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandSender {
    Player(PlayerId),
    Console,
}
