use crate::player::PlayerId;
use outpost_text::{Audience, Message};
use thiserror::Error;

/// User-facing aborts. Everything here is rendered and delivered to the
/// invoking actor; nothing else a handler returns ever is.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Usage: {usage}")]
    BadUsage { usage: String },
    #[error("Invalid argument '{name}': expected {expected}")]
    InvalidArgument { name: String, expected: &'static str },
    #[error("This command can only be used by players")]
    PlayerOnly,
    #[error("{0}")]
    Unauthorized(Message),
    #[error("{0}")]
    Requirement(Message),
    #[error("{0}")]
    Message(Message),
}

impl RuntimeError {
    pub fn render(&self, audience: Audience) -> String {
        match self {
            RuntimeError::Unauthorized(msg)
            | RuntimeError::Requirement(msg)
            | RuntimeError::Message(msg) => msg.render(audience),
            other => match audience {
                Audience::Client => other.to_string(),
                Audience::Server => outpost_text::strip_tags(&other.to_string()),
            },
        }
    }
}

/// Bugs. Logged for operators and replaced with a generic notice; the actor
/// never sees these verbatim.
#[derive(Debug, Error)]
pub enum InternalError {
    #[error("Internal error: Argument '{name}' not found in ArgumentSet (command registration bug)")]
    MissingArgument { name: String },
    #[error("Internal error: Argument '{name}' has wrong type, expected {expected} (command registration bug)")]
    WrongArgumentType { name: String, expected: String },
    #[error("Internal error: Sender {id} is not connected (state management bug)")]
    UnknownSender { id: PlayerId },
    #[error("Internal error (bug): {message}")]
    Message { message: String },
}

/// Configuration errors raised while declaring commands or permissions.
/// These abort plugin load and must never surface to a player.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("malformed argument spec '{spec}', expected 'name:type' or 'name:type?'")]
    BadArgumentSpec { spec: String },
    #[error("unknown argument type '{token}' in spec '{spec}'")]
    UnknownArgumentType { token: String, spec: String },
    #[error("optional argument '{optional}' is followed by required argument '{required}'")]
    OptionalBeforeRequired { optional: String, required: String },
    #[error("a command named '{name}' is already registered")]
    DuplicateCommand { name: String },
    #[error("chat command '{name}' declares no permission")]
    MissingPerm { name: String },
    #[error("a permission named '{name}' is already registered")]
    DuplicatePermission { name: String },
    #[error("no permission named '{name}'")]
    UnknownPermission { name: String },
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl CommandError {
    pub fn runtime(message: impl Into<Message>) -> Self {
        CommandError::Runtime(RuntimeError::Message(message.into()))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CommandError::Internal(InternalError::Message {
            message: message.into(),
        })
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

/// Aborts the current handler with a user-facing message.
#[macro_export]
macro_rules! fail {
    ($msg:literal $(,)?) => {
        return Err($crate::commands::error::CommandError::runtime($msg))
    };
    ($fmt:literal, $($arg:tt)*) => {
        return Err($crate::commands::error::CommandError::runtime(format!($fmt, $($arg)*)))
    };
}
