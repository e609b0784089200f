//! Composable preconditions evaluated after the permission check and before
//! the handler. Each factory captures its configuration and returns a boxed
//! checker over the narrow slice of context it needs.

use crate::commands::argument_set::ArgumentSet;
use crate::commands::error::{CommandError, CommandResult, RuntimeError};
use crate::host::{GameView, Mode};
use crate::player::{Player, Rank};
use outpost_text::Message;

/// Last-successful-invocation timestamps for the command being dispatched,
/// snapshotted by the dispatcher before requirements run.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cooldowns {
    pub last_sender: Option<u64>,
    pub last_global: Option<u64>,
    pub now: u64,
}

/// The context slice requirements may observe. `sender` is `None` for
/// console invocations.
pub struct RequirementContext<'a> {
    pub sender: Option<&'a Player>,
    pub args: &'a ArgumentSet,
    pub game: &'a dyn GameView,
    pub cooldowns: Cooldowns,
}

pub type Requirement = Box<dyn Fn(&RequirementContext<'_>) -> CommandResult<()> + Send + Sync>;

fn deny(message: Message) -> CommandError {
    RuntimeError::Requirement(message).into()
}

/// Passes only while the current game mode is `required`.
pub fn mode(required: Mode) -> Requirement {
    Box::new(move |ctx| {
        if ctx.game.mode() == required {
            Ok(())
        } else {
            Err(deny(Message::template(
                "[red]This command is only available in {} mode.",
                [required.name()],
            )))
        }
    })
}

/// Passes in every game mode except `banned`.
pub fn mode_not(banned: Mode) -> Requirement {
    Box::new(move |ctx| {
        if ctx.game.mode() != banned {
            Ok(())
        } else {
            Err(deny(Message::template(
                "[red]This command is not available in {} mode.",
                [banned.name()],
            )))
        }
    })
}

/// Rate limit per sender, measured from the last successful invocation.
/// Console invocations are exempt.
pub fn cooldown(duration_ms: u64) -> Requirement {
    Box::new(move |ctx| {
        if ctx.sender.is_none() {
            return Ok(());
        }
        check_cooldown(ctx.cooldowns.last_sender, duration_ms, ctx.cooldowns.now).map_err(
            |remaining| {
                deny(Message::template(
                    "[red]You must wait {} before using this command again.",
                    [outpost_text::format_duration(remaining)],
                ))
            },
        )
    })
}

/// Rate limit shared by all senders of the command.
pub fn cooldown_global(duration_ms: u64) -> Requirement {
    Box::new(move |ctx| {
        check_cooldown(ctx.cooldowns.last_global, duration_ms, ctx.cooldowns.now).map_err(
            |remaining| {
                deny(Message::template(
                    "[red]This command was used recently, wait {} and try again.",
                    [outpost_text::format_duration(remaining)],
                ))
            },
        )
    })
}

fn check_cooldown(last: Option<u64>, duration_ms: u64, now: u64) -> Result<(), u64> {
    match last {
        Some(last) if now < last + duration_ms => Err(last + duration_ms - now),
        _ => Ok(()),
    }
}

/// Requires the match not to be over.
pub fn game_running() -> Requirement {
    Box::new(|ctx| {
        if ctx.game.game_over() {
            Err(deny(Message::plain("[red]The match is already over.")))
        } else {
            Ok(())
        }
    })
}

/// Requires the sender's team to still have a presence in the match.
pub fn team_alive() -> Requirement {
    Box::new(|ctx| {
        let Some(player) = ctx.sender else {
            return Ok(());
        };
        if ctx.game.team_alive(&player.team) {
            Ok(())
        } else {
            Err(deny(Message::template(
                "[red]Team {} is no longer in the match.",
                [player.team.name()],
            )))
        }
    })
}

/// Requires the sender to be connected with a live controlled unit.
pub fn unit_exists(message: Option<Message>) -> Requirement {
    Box::new(move |ctx| {
        let alive = ctx
            .sender
            .map(|player| player.connected && player.unit_alive)
            .unwrap_or(false);
        if alive {
            Ok(())
        } else {
            Err(deny(message.clone().unwrap_or_else(|| {
                Message::plain("[red]You do not have a unit right now.")
            })))
        }
    })
}

/// If the argument named `arg` resolved to a player, requires the sender to
/// be authorized to moderate that target. A no-op when the argument is
/// absent or the invocation came from the console.
pub fn moderate(
    arg: impl Into<String>,
    allow_same_rank: bool,
    min_rank: Rank,
    allow_self_if_unauthorized: bool,
) -> Requirement {
    let arg = arg.into();
    Box::new(move |ctx| {
        let Some(target) = ctx.args.opt_player(&arg)? else {
            return Ok(());
        };
        let Some(sender) = ctx.sender else {
            return Ok(());
        };

        if allow_self_if_unauthorized && target.id == sender.id {
            return Ok(());
        }

        let outranks = sender.rank > target.rank || (allow_same_rank && sender.rank >= target.rank);
        if sender.rank >= min_rank && outranks {
            Ok(())
        } else {
            Err(deny(Message::template(
                "[red]You are not authorized to moderate {}.",
                [target.username.as_str()],
            )))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::value::Value;
    use crate::player::{PlayerId, Team};

    struct FakeGame {
        mode: Mode,
        over: bool,
        dead_team: Option<Team>,
        now: u64,
    }

    impl GameView for FakeGame {
        fn mode(&self) -> Mode {
            self.mode
        }
        fn game_over(&self) -> bool {
            self.over
        }
        fn team_alive(&self, team: &Team) -> bool {
            self.dead_team.as_ref() != Some(team)
        }
        fn now_millis(&self) -> u64 {
            self.now
        }
    }

    fn game() -> FakeGame {
        FakeGame {
            mode: Mode::Survival,
            over: false,
            dead_team: None,
            now: 0,
        }
    }

    fn player(id: u32, rank: Rank) -> Player {
        Player {
            id: PlayerId(id),
            uuid: format!("uuid-{id}"),
            username: format!("player{id}"),
            rank,
            team: Team::new("sharded"),
            flags: Vec::new(),
            connected: true,
            unit_alive: true,
            lang: "en".to_string(),
        }
    }

    fn ctx<'a>(
        sender: Option<&'a Player>,
        args: &'a ArgumentSet,
        game: &'a FakeGame,
        cooldowns: Cooldowns,
    ) -> RequirementContext<'a> {
        RequirementContext {
            sender,
            args,
            game,
            cooldowns,
        }
    }

    fn assert_denied(result: CommandResult<()>) -> String {
        match result {
            Err(CommandError::Runtime(err)) => err.render(outpost_text::Audience::Server),
            other => panic!("expected a requirement failure, got {:?}", other.err()),
        }
    }

    #[test]
    fn mode_gating() {
        let args = ArgumentSet::empty();
        let mut game = game();
        let sender = player(1, Rank::Player);

        game.mode = Mode::Survival;
        let context = ctx(Some(&sender), &args, &game, Cooldowns::default());
        assert!(mode(Mode::Survival)(&context).is_ok());
        assert!(mode_not(Mode::Survival)(&context).is_err());
        assert!(mode(Mode::Pvp)(&context).is_err());
        assert!(mode_not(Mode::Pvp)(&context).is_ok());
    }

    #[test]
    fn cooldown_passes_exactly_at_threshold() {
        let args = ArgumentSet::empty();
        let game = game();
        let sender = player(1, Rank::Player);
        let last = 10_000;
        let duration = 5_000;

        for (now, expect_ok) in [(14_999, false), (15_000, true), (15_001, true)] {
            let cooldowns = Cooldowns {
                last_sender: Some(last),
                last_global: None,
                now,
            };
            let context = ctx(Some(&sender), &args, &game, cooldowns);
            assert_eq!(cooldown(duration)(&context).is_ok(), expect_ok, "now={now}");
        }
    }

    #[test]
    fn cooldown_message_names_remaining_wait() {
        let args = ArgumentSet::empty();
        let game = game();
        let sender = player(1, Rank::Player);
        let cooldowns = Cooldowns {
            last_sender: Some(0),
            last_global: None,
            now: 1_000,
        };
        let context = ctx(Some(&sender), &args, &game, cooldowns);
        let message = assert_denied(cooldown(61_000)(&context));
        assert!(message.contains("1m"), "got: {message}");
    }

    #[test]
    fn global_cooldown_applies_to_console_too() {
        let args = ArgumentSet::empty();
        let game = game();
        let cooldowns = Cooldowns {
            last_sender: None,
            last_global: Some(0),
            now: 1_000,
        };
        let context = ctx(None, &args, &game, cooldowns);
        assert!(cooldown_global(5_000)(&context).is_err());
        assert!(cooldown(5_000)(&context).is_ok());
    }

    #[test]
    fn game_running_and_team_alive() {
        let args = ArgumentSet::empty();
        let mut game = game();
        let sender = player(1, Rank::Player);

        let context = ctx(Some(&sender), &args, &game, Cooldowns::default());
        assert!(game_running()(&context).is_ok());
        assert!(team_alive()(&context).is_ok());

        game.over = true;
        game.dead_team = Some(Team::new("sharded"));
        let context = ctx(Some(&sender), &args, &game, Cooldowns::default());
        assert!(game_running()(&context).is_err());
        assert!(team_alive()(&context).is_err());
    }

    #[test]
    fn unit_exists_custom_message() {
        let args = ArgumentSet::empty();
        let game = game();
        let mut sender = player(1, Rank::Player);
        sender.unit_alive = false;

        let context = ctx(Some(&sender), &args, &game, Cooldowns::default());
        let message = assert_denied(unit_exists(Some(Message::plain("[red]Respawn first.")))(
            &context,
        ));
        assert_eq!(message, "Respawn first.");
        assert!(unit_exists(None)(&context).is_err());

        sender.unit_alive = true;
        let context = ctx(Some(&sender), &args, &game, Cooldowns::default());
        assert!(unit_exists(None)(&context).is_ok());
    }

    #[test]
    fn moderate_rank_rules() {
        let game = game();
        let target = player(2, Rank::Mod);
        let args = ArgumentSet::new(vec![(
            "target".to_string(),
            Value::Player(target.clone()),
        )]);

        // Equal rank is refused unless allow_same_rank.
        let sender = player(1, Rank::Mod);
        let context = ctx(Some(&sender), &args, &game, Cooldowns::default());
        assert!(moderate("target", false, Rank::Mod, false)(&context).is_err());
        assert!(moderate("target", true, Rank::Mod, false)(&context).is_ok());

        // Below the minimum level is always refused.
        let sender = player(1, Rank::Trusted);
        let context = ctx(Some(&sender), &args, &game, Cooldowns::default());
        assert!(moderate("target", true, Rank::Mod, false)(&context).is_err());

        // Higher rank over lower target is allowed.
        let sender = player(1, Rank::Admin);
        let context = ctx(Some(&sender), &args, &game, Cooldowns::default());
        assert!(moderate("target", false, Rank::Mod, false)(&context).is_ok());
    }

    #[test]
    fn moderate_self_and_absent_target() {
        let game = game();
        let sender = player(2, Rank::Player);

        // Absent argument: no-op.
        let args = ArgumentSet::empty();
        let context = ctx(Some(&sender), &args, &game, Cooldowns::default());
        assert!(moderate("target", false, Rank::Mod, false)(&context).is_ok());

        // Self-targeting is allowed only with the escape hatch.
        let args = ArgumentSet::new(vec![(
            "target".to_string(),
            Value::Player(sender.clone()),
        )]);
        let context = ctx(Some(&sender), &args, &game, Cooldowns::default());
        assert!(moderate("target", false, Rank::Mod, true)(&context).is_ok());
        assert!(moderate("target", false, Rank::Mod, false)(&context).is_err());
    }
}
