use super::requirements::Requirement;
use super::spec::{self, ArgSpec};
use crate::commands::context::ExecutionContext;
use crate::commands::error::{CommandResult, RegistryError};
use crate::host::CommandSink;
use crate::perm::Perm;
use crate::player::{Player, PlayerId};
use indexmap::IndexMap;
use outpost_text::Message;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::warn;

pub type Handler = fn(&mut ExecutionContext<'_>) -> CommandResult<()>;

/// Observer for denied invocations, for external logging or moderation.
pub type UnauthorizedHook = Box<dyn Fn(&str, &Player) + Send + Sync>;

/// A command declaration. Argument specs are kept raw here and validated when
/// the spec is registered, so registration is the single point where
/// configuration errors surface.
pub struct CommandSpec {
    name: String,
    args: Vec<String>,
    description: String,
    perm: Option<Arc<Perm>>,
    unauthorized_message: Option<Message>,
    requirements: Vec<Requirement>,
    handler: Handler,
}

impl CommandSpec {
    pub fn new(name: impl Into<String>, handler: Handler) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            description: String::new(),
            perm: None,
            unauthorized_message: None,
            requirements: Vec::new(),
            handler,
        }
    }

    pub fn args(mut self, specs: &[&str]) -> Self {
        self.args = specs.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn perm(mut self, perm: Arc<Perm>) -> Self {
        self.perm = Some(perm);
        self
    }

    pub fn unauthorized_message(mut self, message: impl Into<Message>) -> Self {
        self.unauthorized_message = Some(message.into());
        self
    }

    pub fn require(mut self, requirement: Requirement) -> Self {
        self.requirements.push(requirement);
        self
    }
}

/// The registered, validated form. Immutable once registered.
pub(super) struct Command {
    pub(super) name: String,
    pub(super) args: Vec<ArgSpec>,
    pub(super) description: String,
    pub(super) perm: Option<Arc<Perm>>,
    pub(super) unauthorized_message: Option<Message>,
    pub(super) requirements: Vec<Requirement>,
    pub(super) handler: Handler,
}

/// One named registry. Chat and console commands live in separate instances,
/// so a name may exist in both. Insertion order is preserved so that a reset
/// and re-registration replays identical sink calls.
pub(super) struct CommandRegistry {
    commands: IndexMap<String, Command>,
}

impl CommandRegistry {
    pub(super) fn new() -> Self {
        Self {
            commands: IndexMap::new(),
        }
    }

    pub(super) fn register(&mut self, spec: CommandSpec) -> Result<(), RegistryError> {
        if self.commands.contains_key(&spec.name) {
            return Err(RegistryError::DuplicateCommand { name: spec.name });
        }
        let args = spec::parse_arg_specs(&spec.args)?;
        let command = Command {
            name: spec.name,
            args,
            description: spec.description,
            perm: spec.perm,
            unauthorized_message: spec.unauthorized_message,
            requirements: spec.requirements,
            handler: spec.handler,
        };
        self.commands.insert(command.name.clone(), command);
        Ok(())
    }

    pub(super) fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    pub(super) fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }

    pub(super) fn clear(&mut self) {
        self.commands.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) enum Scope {
    Chat,
    Console,
}

#[derive(Default)]
pub(super) struct CooldownEntry {
    pub(super) per_sender: FxHashMap<PlayerId, u64>,
    pub(super) global: Option<u64>,
}

/// The set of declared chat and console commands plus the dispatch state that
/// goes with them. The host owns one of these; `initialize` and `reset` make
/// the registration lifecycle explicit so test suites can isolate runs.
pub struct CommandSet {
    pub(super) chat: CommandRegistry,
    pub(super) console: CommandRegistry,
    pub(super) cooldowns: FxHashMap<(Scope, String), CooldownEntry>,
    pub(super) unauthorized_hook: Option<UnauthorizedHook>,
    pub(super) command_prefix: String,
    pub(super) failure_notice: Message,
    initialized: bool,
}

impl CommandSet {
    pub fn new() -> Self {
        Self {
            chat: CommandRegistry::new(),
            console: CommandRegistry::new(),
            cooldowns: FxHashMap::default(),
            unauthorized_hook: None,
            command_prefix: "/".to_string(),
            failure_notice: Message::plain("[red]Something went wrong running that command."),
            initialized: false,
        }
    }

    /// Prefix recognized on chat lines and shown in usage strings.
    pub fn set_command_prefix(&mut self, prefix: impl Into<String>) {
        self.command_prefix = prefix.into();
    }

    /// Notice shown to the actor when a command fails on an internal fault.
    pub fn set_failure_notice(&mut self, notice: impl Into<Message>) {
        self.failure_notice = notice.into();
    }

    /// Chat commands must carry a permission; an omitted one is a
    /// configuration error, not an open command.
    pub fn register_chat(&mut self, spec: CommandSpec) -> Result<(), RegistryError> {
        if spec.perm.is_none() {
            return Err(RegistryError::MissingPerm { name: spec.name });
        }
        self.chat.register(spec)
    }

    pub fn register_console(&mut self, spec: CommandSpec) -> Result<(), RegistryError> {
        self.console.register(spec)
    }

    pub fn on_unauthorized(&mut self, hook: UnauthorizedHook) {
        self.unauthorized_hook = Some(hook);
    }

    /// Announces every registered command to the host sinks, in registration
    /// order. Meant to be called once after all declarations.
    pub fn initialize(&mut self, chat: &mut dyn CommandSink, console: &mut dyn CommandSink) {
        if self.initialized {
            warn!("command set initialized twice, ignoring");
            return;
        }
        for command in self.chat.iter() {
            let display = format!("{}{}", self.command_prefix, command.name);
            let usage = spec::usage_string(&display, &command.args);
            chat.register(&command.name, &usage, &command.description);
        }
        for command in self.console.iter() {
            let usage = spec::usage_string(&command.name, &command.args);
            console.register(&command.name, &usage, &command.description);
        }
        self.initialized = true;
    }

    /// Unregisters everything from the sinks and clears all dispatch state.
    /// A subsequent re-registration replays the same sink calls as the first.
    pub fn reset(&mut self, chat: &mut dyn CommandSink, console: &mut dyn CommandSink) {
        for command in self.chat.iter() {
            chat.remove_command(&command.name);
        }
        for command in self.console.iter() {
            console.remove_command(&command.name);
        }
        self.chat.clear();
        self.console.clear();
        self.cooldowns.clear();
        self.initialized = false;
    }
}

impl Default for CommandSet {
    fn default() -> Self {
        Self::new()
    }
}
