//! Named permission objects. A flat registry plus composition via
//! `except_modes`; there is no permission hierarchy.

use crate::commands::error::RegistryError;
use crate::host::Mode;
use crate::player::{Player, Rank};
use outpost_text::Message;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
enum Check {
    /// Shorthand: actor rank must be at least this rank.
    Rank(Rank),
    Predicate(Arc<dyn Fn(&Player) -> bool + Send + Sync>),
    /// Per-mode delegation produced by `except_modes`.
    ModeOverrides {
        base: Arc<Perm>,
        overrides: FxHashMap<Mode, Arc<Perm>>,
    },
}

#[derive(Clone)]
pub struct Perm {
    name: String,
    color: String,
    message: Message,
    check: Check,
}

impl Perm {
    /// A permission granted to actors of at least `rank`.
    pub fn rank(name: impl Into<String>, rank: Rank) -> Perm {
        Perm {
            name: name.into(),
            color: "accent".to_string(),
            message: Message::plain(format!(
                "[red]This command requires {} rank or higher.",
                rank
            )),
            check: Check::Rank(rank),
        }
    }

    /// A permission decided by an arbitrary predicate over the actor.
    pub fn check(
        name: impl Into<String>,
        predicate: impl Fn(&Player) -> bool + Send + Sync + 'static,
    ) -> Perm {
        Perm {
            name: name.into(),
            color: "accent".to_string(),
            message: Message::plain("[red]You are not authorized to use this command."),
            check: Check::Predicate(Arc::new(predicate)),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Perm {
        self.color = color.into();
        self
    }

    pub fn with_message(mut self, message: impl Into<Message>) -> Perm {
        self.message = message.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn unauthorized_message(&self) -> &Message {
        &self.message
    }

    pub fn allows(&self, actor: &Player, mode: Mode) -> bool {
        match &self.check {
            Check::Rank(rank) => actor.rank >= *rank,
            Check::Predicate(predicate) => predicate(actor),
            Check::ModeOverrides { base, overrides } => match overrides.get(&mode) {
                Some(perm) => perm.allows(actor, mode),
                None => base.allows(actor, mode),
            },
        }
    }

    /// Returns a new, unregistered permission that delegates entirely to the
    /// matching override while one of `overrides` is the current mode, and to
    /// `self` otherwise. `self` is not mutated.
    pub fn except_modes(
        &self,
        overrides: impl IntoIterator<Item = (Mode, Perm)>,
        message: Option<Message>,
    ) -> Perm {
        let overrides: FxHashMap<Mode, Arc<Perm>> = overrides
            .into_iter()
            .map(|(mode, perm)| (mode, Arc::new(perm)))
            .collect();

        Perm {
            name: self.name.clone(),
            color: self.color.clone(),
            message: message.unwrap_or_else(|| self.message.clone()),
            check: Check::ModeOverrides {
                base: Arc::new(self.clone()),
                overrides,
            },
        }
    }
}

impl fmt::Debug for Perm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.check {
            Check::Rank(rank) => format!("rank >= {}", rank),
            Check::Predicate(_) => "predicate".to_string(),
            Check::ModeOverrides { overrides, .. } => {
                format!("mode overrides ({})", overrides.len())
            }
        };
        f.debug_struct("Perm")
            .field("name", &self.name)
            .field("check", &kind)
            .finish()
    }
}

/// The flat, name-keyed permission registry. Created once at startup,
/// immutable afterwards.
#[derive(Debug, Default)]
pub struct PermRegistry {
    perms: FxHashMap<String, Arc<Perm>>,
}

impl PermRegistry {
    pub fn new() -> PermRegistry {
        PermRegistry::default()
    }

    /// A registry preloaded with the standard permissions: `none`, `trusted`,
    /// `mod`, `admin` and `console`.
    pub fn with_defaults() -> PermRegistry {
        let mut registry = PermRegistry::new();
        for perm in [
            Perm::rank("none", Rank::Player).with_color("gray"),
            Perm::rank("trusted", Rank::Trusted).with_color("green"),
            Perm::rank("mod", Rank::Mod).with_color("orange"),
            Perm::rank("admin", Rank::Admin).with_color("scarlet"),
            Perm::rank("console", Rank::Console).with_color("purple"),
        ] {
            // Names are distinct literals, registration cannot collide.
            let _ = registry.register(perm);
        }
        registry
    }

    pub fn register(&mut self, perm: Perm) -> Result<Arc<Perm>, RegistryError> {
        if self.perms.contains_key(&perm.name) {
            return Err(RegistryError::DuplicatePermission {
                name: perm.name.clone(),
            });
        }
        let perm = Arc::new(perm);
        self.perms.insert(perm.name.clone(), perm.clone());
        Ok(perm)
    }

    pub fn get_by_name(&self, name: &str) -> Result<Arc<Perm>, RegistryError> {
        self.perms.get(name).cloned().ok_or_else(|| {
            RegistryError::UnknownPermission {
                name: name.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{PlayerId, Team};

    fn actor(rank: Rank) -> Player {
        Player {
            id: PlayerId(7),
            uuid: "AAAAAAAAAAAAAAAAAAAAAA==".to_string(),
            username: "quell".to_string(),
            rank,
            team: Team::new("sharded"),
            flags: Vec::new(),
            connected: true,
            unit_alive: true,
            lang: "en".to_string(),
        }
    }

    #[test]
    fn rank_shorthand_grants_at_and_above_threshold() {
        let perm = Perm::rank("mod", Rank::Mod);
        assert!(!perm.allows(&actor(Rank::Player), Mode::Survival));
        assert!(!perm.allows(&actor(Rank::Trusted), Mode::Survival));
        assert!(perm.allows(&actor(Rank::Mod), Mode::Survival));
        assert!(perm.allows(&actor(Rank::Admin), Mode::Survival));
    }

    #[test]
    fn predicate_perm() {
        let perm = Perm::check("unit-alive", |p| p.unit_alive);
        let mut dead = actor(Rank::Admin);
        dead.unit_alive = false;
        assert!(perm.allows(&actor(Rank::Player), Mode::Attack));
        assert!(!perm.allows(&dead, Mode::Attack));
    }

    #[test]
    fn except_modes_delegates_only_in_overridden_mode() {
        let base = Perm::rank("mod", Rank::Mod);
        let relaxed = base.except_modes([(Mode::Sandbox, Perm::rank("none", Rank::Player))], None);

        // Sandbox uses the override's predicate.
        assert!(relaxed.allows(&actor(Rank::Player), Mode::Sandbox));
        // Every other mode uses the base predicate.
        assert!(!relaxed.allows(&actor(Rank::Player), Mode::Survival));
        assert!(relaxed.allows(&actor(Rank::Mod), Mode::Survival));

        // The base itself is untouched.
        assert!(!base.allows(&actor(Rank::Player), Mode::Sandbox));
    }

    #[test]
    fn registry_rejects_duplicates_and_unknown_lookups() {
        let mut registry = PermRegistry::with_defaults();
        assert!(registry.get_by_name("mod").is_ok());
        assert!(matches!(
            registry.get_by_name("missing"),
            Err(RegistryError::UnknownPermission { name }) if name == "missing"
        ));
        assert!(matches!(
            registry.register(Perm::rank("mod", Rank::Admin)),
            Err(RegistryError::DuplicatePermission { name }) if name == "mod"
        ));
    }
}
