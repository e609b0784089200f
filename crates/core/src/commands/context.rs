use super::{CommandSender, argument_set::ArgumentSet};
use crate::commands::error::{CommandResult, RuntimeError};
use crate::host::Host;
use crate::player::Player;
use outpost_text::{Audience, Message};

/// Everything a handler gets: the coerced arguments, the resolved sender and
/// mutable access to the host. One per invocation, discarded afterwards.
pub struct ExecutionContext<'a> {
    pub host: &'a mut dyn Host,
    sender: CommandSender,
    sender_player: Option<Player>,
    arguments: ArgumentSet,
}

impl<'a> ExecutionContext<'a> {
    pub(super) fn new(
        host: &'a mut dyn Host,
        sender: CommandSender,
        sender_player: Option<Player>,
        arguments: ArgumentSet,
    ) -> Self {
        Self {
            host,
            sender,
            sender_player,
            arguments,
        }
    }

    pub fn args(&self) -> &ArgumentSet {
        &self.arguments
    }

    pub fn sender(&self) -> CommandSender {
        self.sender
    }

    pub fn audience(&self) -> Audience {
        match self.sender {
            CommandSender::Player(_) => Audience::Client,
            CommandSender::Console => Audience::Server,
        }
    }

    /// The invoking player, or a user-facing failure for console senders.
    pub fn player(&self) -> CommandResult<&Player> {
        self.sender_player
            .as_ref()
            .ok_or_else(|| RuntimeError::PlayerOnly.into())
    }

    pub fn reply(&mut self, message: impl Into<Message>) {
        let message = message.into();
        match self.sender {
            CommandSender::Player(id) => {
                self.host.message(id, &message.render(Audience::Client));
            }
            CommandSender::Console => {
                self.host.console(&message.render(Audience::Server));
            }
        }
    }

    pub fn error(&mut self, message: impl Into<Message>) {
        let message = message.into();
        match self.sender {
            CommandSender::Player(id) => {
                self.host.error(id, &message.render(Audience::Client));
            }
            CommandSender::Console => {
                self.host.console_error(&message.render(Audience::Server));
            }
        }
    }
}
