use clap::Parser;
use outpost_core::commands::{CommandSet, CommandSpec};
use outpost_core::config::CONFIG;
use outpost_core::host::{CommandSink, GameView, Lookup, Mode, Output};
use outpost_core::player::{OfflinePlayer, Player, PlayerId, Team};
use std::io::BufRead;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Stand-in console host for the Outpost command framework. The real game
/// server embeds `outpost_core` the same way this binary does.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Directory for rolling log files, overriding the config value.
    #[arg(long)]
    log_dir: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    // Setup logging
    let log_dir = cli.log_dir.unwrap_or_else(|| CONFIG.log_dir.clone());
    let logfile = tracing_appender::rolling::daily(&log_dir, "outpost.log");
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var("OUTPOST_LOG")
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_writer(logfile.and(std::io::stdout))
        .with_env_filter(env_filter)
        .init();

    run_console();
}

struct ConsoleHost {
    mode: Mode,
}

impl Lookup for ConsoleHost {
    fn online_players(&self) -> Vec<Player> {
        Vec::new()
    }
    fn offline_player(&self, _token: &str) -> Option<OfflinePlayer> {
        None
    }
    fn teams(&self) -> Vec<Team> {
        vec![Team::new("sharded"), Team::new("crux")]
    }
    fn unit_types(&self) -> Vec<String> {
        Vec::new()
    }
    fn block_names(&self) -> Vec<String> {
        Vec::new()
    }
    fn map_names(&self) -> Vec<String> {
        Vec::new()
    }
    fn item_names(&self) -> Vec<String> {
        Vec::new()
    }
}

impl GameView for ConsoleHost {
    fn mode(&self) -> Mode {
        self.mode
    }
    fn game_over(&self) -> bool {
        false
    }
    fn team_alive(&self, _team: &Team) -> bool {
        true
    }
}

impl Output for ConsoleHost {
    fn message(&mut self, target: PlayerId, text: &str) {
        info!("[to {}] {}", target, text);
    }
    fn error(&mut self, target: PlayerId, text: &str) {
        info!("[to {}] {}", target, text);
    }
    fn console(&mut self, text: &str) {
        println!("{}", text);
    }
    fn console_error(&mut self, text: &str) {
        eprintln!("Error: {}", text);
    }
}

struct LoggingSink(&'static str);

impl CommandSink for LoggingSink {
    fn register(&mut self, name: &str, usage: &str, _description: &str) {
        info!("registered {} command {} ({})", self.0, name, usage);
    }
    fn remove_command(&mut self, name: &str) {
        info!("removed {} command {}", self.0, name);
    }
}

fn run_console() {
    let mode = Mode::parse(&CONFIG.default_mode).unwrap_or(Mode::Survival);
    let mut host = ConsoleHost { mode };

    let mut set = CommandSet::new();
    set.set_command_prefix(CONFIG.command_prefix.clone());
    set.set_failure_notice(CONFIG.failure_notice.clone());
    declare_console_commands(&mut set);

    let mut chat_sink = LoggingSink("chat");
    let mut console_sink = LoggingSink("console");
    set.initialize(&mut chat_sink, &mut console_sink);

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        set.handle_console_message(&mut host, &line);
    }
}

fn declare_console_commands(set: &mut CommandSet) {
    let declarations = [
        CommandSpec::new("say", |ctx| {
            let message = ctx.args().get_string("message")?;
            ctx.reply(message);
            Ok(())
        })
        .args(&["message:string"])
        .description("Echo a message back to the console."),
        CommandSpec::new("mode", |ctx| {
            let mode = ctx.host.mode();
            ctx.reply(format!("Current game mode: {}", mode));
            Ok(())
        })
        .description("Show the current game mode."),
        CommandSpec::new("stop", |ctx| {
            ctx.reply("Stopping.");
            std::process::exit(0)
        })
        .description("Stop the console host."),
    ];

    for spec in declarations {
        if let Err(err) = set.register_console(spec) {
            panic!("console command declaration failed: {err}");
        }
    }
}
