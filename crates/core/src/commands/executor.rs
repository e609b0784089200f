use super::registry::{CommandSet, Scope};
use super::requirements::{Cooldowns, RequirementContext};
use super::spec;
use super::{CommandSender, argument::ArgumentType, argument_set::ArgumentSet};
use crate::commands::context::ExecutionContext;
use crate::commands::error::{CommandError, InternalError, RuntimeError};
use crate::host::{GameView, Host, Lookup};
use crate::player::PlayerId;
use outpost_text::{Audience, Message};
use tracing::{error, warn};

impl CommandSet {
    /// Runs one chat command invocation end to end. Every failure mode is
    /// resolved here; callers never observe an error.
    pub fn execute_chat(&mut self, host: &mut dyn Host, sender: PlayerId, line: &str) {
        let line = line.trim();
        let line = line.strip_prefix(self.command_prefix.as_str()).unwrap_or(line);
        if line.is_empty() {
            return;
        }
        let (name, rest) = split_command(line);
        self.dispatch(Scope::Chat, host, CommandSender::Player(sender), name, rest);
    }

    /// Accepts one raw console input line and dispatches it against the
    /// console registry.
    pub fn handle_console_message(&mut self, host: &mut dyn Host, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        let (name, rest) = split_command(line);
        self.dispatch(Scope::Console, host, CommandSender::Console, name, rest);
    }

    fn dispatch(
        &mut self,
        scope: Scope,
        host: &mut dyn Host,
        sender: CommandSender,
        name: &str,
        rest: &str,
    ) {
        // A chat sender that is not connected is a state management bug; there
        // is nobody to deliver a message to, so log and stop.
        let sender_player = match sender {
            CommandSender::Player(id) => {
                let player = host
                    .online_players()
                    .into_iter()
                    .find(|p| p.connected && p.id == id);
                match player {
                    Some(player) => Some(player),
                    None => {
                        error!("{}", InternalError::UnknownSender { id });
                        return;
                    }
                }
            }
            CommandSender::Console => None,
        };

        let registry = match scope {
            Scope::Chat => &self.chat,
            Scope::Console => &self.console,
        };
        let Some(command) = registry.get(name) else {
            deliver_error(host, sender, &Message::plain("[red]Command not found."));
            return;
        };

        let display_name = match scope {
            Scope::Chat => format!("{}{}", self.command_prefix, name),
            Scope::Console => name.to_string(),
        };

        // 1. Parse: the token count has to satisfy the required-argument
        // count, and may exceed the declared count only into a greedy tail.
        let tokens: Vec<&str> = rest.split_whitespace().collect();
        let required = command.args.iter().filter(|arg| !arg.optional).count();
        let greedy_tail = command
            .args
            .last()
            .map(|arg| arg.arg_type == ArgumentType::String)
            .unwrap_or(false);

        if tokens.len() < required || (tokens.len() > command.args.len() && !greedy_tail) {
            let too_few = tokens.len() < required;
            let usage = RuntimeError::BadUsage {
                usage: spec::usage_string(&display_name, &command.args),
            };
            let message = if too_few {
                "[red]Not enough arguments."
            } else {
                "[red]Too many arguments."
            };
            deliver_error(host, sender, &Message::plain(message));
            deliver_reply(host, sender, &Message::plain(usage.to_string()));
            return;
        }

        // 2. Coerce: positional against the schema; absent optionals simply
        // get no entry and their coercer never runs.
        let mut values = Vec::with_capacity(command.args.len());
        for (index, arg) in command.args.iter().enumerate() {
            if index >= tokens.len() {
                break;
            }
            // A trailing string argument swallows the rest of the line.
            let token = if greedy_tail && index == command.args.len() - 1 {
                tokens[index..].join(" ")
            } else {
                tokens[index].to_string()
            };
            let lookup: &dyn Lookup = &*host;
            match arg.arg_type.coerce(&token, lookup) {
                Ok(value) => values.push((arg.name.clone(), value)),
                Err(()) => {
                    let err = RuntimeError::InvalidArgument {
                        name: arg.name.clone(),
                        expected: arg.arg_type.expected(),
                    };
                    deliver_runtime(host, sender, &err);
                    return;
                }
            }
        }

        // 3. Authorize. Console senders skip this; console commands carry no
        // permission in the first place.
        if let (Some(perm), Some(player)) = (&command.perm, &sender_player) {
            if !perm.allows(player, host.mode()) {
                warn!(
                    command = name,
                    player = %player.username,
                    "unauthorized command attempt"
                );
                if let Some(hook) = &self.unauthorized_hook {
                    hook(name, player);
                }
                let message = command
                    .unauthorized_message
                    .clone()
                    .unwrap_or_else(|| perm.unauthorized_message().clone());
                deliver_error(host, sender, &message);
                return;
            }
        }

        // 4. Requirements, in declaration order. First failure wins.
        let args = ArgumentSet::new(values);
        let key = (scope, name.to_string());
        let entry = self.cooldowns.get(&key);
        let cooldowns = Cooldowns {
            last_sender: match sender {
                CommandSender::Player(id) => {
                    entry.and_then(|e| e.per_sender.get(&id).copied())
                }
                CommandSender::Console => None,
            },
            last_global: entry.and_then(|e| e.global),
            now: host.now_millis(),
        };

        let game: &dyn GameView = &*host;
        let context = RequirementContext {
            sender: sender_player.as_ref(),
            args: &args,
            game,
            cooldowns,
        };
        for requirement in &command.requirements {
            if let Err(err) = requirement(&context) {
                match err {
                    CommandError::Runtime(err) => deliver_runtime(host, sender, &err),
                    CommandError::Internal(err) => {
                        error!(command = name, "requirement failed: {err}");
                        deliver_error(host, sender, &self.failure_notice);
                    }
                }
                return;
            }
        }

        // 5. Invoke.
        let handler = command.handler;
        let mut context = ExecutionContext::new(host, sender, sender_player, args);
        let result = handler(&mut context);

        // 6. Finalize. Timestamps only move on success, and to the
        // invocation's completion time.
        match result {
            Ok(()) => {
                let now = context.host.now_millis();
                let entry = self.cooldowns.entry(key).or_default();
                if let CommandSender::Player(id) = sender {
                    entry.per_sender.insert(id, now);
                }
                entry.global = Some(now);
            }
            Err(CommandError::Runtime(err)) => {
                deliver_runtime(context.host, sender, &err);
            }
            Err(CommandError::Internal(err)) => {
                error!(command = name, "command failed: {err}");
                deliver_error(context.host, sender, &self.failure_notice);
            }
        }
    }
}

fn split_command(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest),
        None => (line, ""),
    }
}

fn deliver_reply(host: &mut dyn Host, sender: CommandSender, message: &Message) {
    match sender {
        CommandSender::Player(id) => host.message(id, &message.render(Audience::Client)),
        CommandSender::Console => host.console(&message.render(Audience::Server)),
    }
}

fn deliver_error(host: &mut dyn Host, sender: CommandSender, message: &Message) {
    match sender {
        CommandSender::Player(id) => host.error(id, &message.render(Audience::Client)),
        CommandSender::Console => host.console_error(&message.render(Audience::Server)),
    }
}

fn deliver_runtime(host: &mut dyn Host, sender: CommandSender, err: &RuntimeError) {
    match sender {
        CommandSender::Player(id) => host.error(id, &err.render(Audience::Client)),
        CommandSender::Console => host.console_error(&err.render(Audience::Server)),
    }
}
