use outpost_core::host::{CommandSink, GameView, Lookup, Mode, Output};
use outpost_core::player::{OfflinePlayer, Player, PlayerId, Rank, Team};

/// In-memory host used by the dispatch tests. Records everything the
/// framework sends and serves a fixed roster of players.
pub struct TestHost {
    pub players: Vec<Player>,
    pub offline: Vec<OfflinePlayer>,
    pub mode: Mode,
    pub over: bool,
    pub dead_teams: Vec<Team>,
    pub clock: u64,
    pub sent: Vec<(PlayerId, String)>,
    pub errors: Vec<(PlayerId, String)>,
    pub console_lines: Vec<String>,
    pub console_errors: Vec<String>,
}

impl Default for TestHost {
    fn default() -> Self {
        Self {
            players: Vec::new(),
            offline: Vec::new(),
            mode: Mode::Survival,
            over: false,
            dead_teams: Vec::new(),
            clock: 0,
            sent: Vec::new(),
            errors: Vec::new(),
            console_lines: Vec::new(),
            console_errors: Vec::new(),
        }
    }
}

impl TestHost {
    pub fn with_players(players: Vec<Player>) -> Self {
        Self {
            players,
            ..Self::default()
        }
    }

    pub fn errors_for(&self, id: PlayerId) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|(target, _)| *target == id)
            .map(|(_, text)| text.as_str())
            .collect()
    }

    pub fn sent_for(&self, id: PlayerId) -> Vec<&str> {
        self.sent
            .iter()
            .filter(|(target, _)| *target == id)
            .map(|(_, text)| text.as_str())
            .collect()
    }
}

impl Lookup for TestHost {
    fn online_players(&self) -> Vec<Player> {
        self.players.clone()
    }
    fn offline_player(&self, token: &str) -> Option<OfflinePlayer> {
        self.offline
            .iter()
            .find(|p| p.username.eq_ignore_ascii_case(token) || p.uuid == token)
            .cloned()
    }
    fn teams(&self) -> Vec<Team> {
        vec![Team::new("sharded"), Team::new("crux")]
    }
    fn unit_types(&self) -> Vec<String> {
        vec!["dagger".to_string(), "flare".to_string()]
    }
    fn block_names(&self) -> Vec<String> {
        vec!["router".to_string(), "duo".to_string()]
    }
    fn map_names(&self) -> Vec<String> {
        vec!["glacier".to_string()]
    }
    fn item_names(&self) -> Vec<String> {
        vec!["copper".to_string(), "lead".to_string()]
    }
}

impl GameView for TestHost {
    fn mode(&self) -> Mode {
        self.mode
    }
    fn game_over(&self) -> bool {
        self.over
    }
    fn team_alive(&self, team: &Team) -> bool {
        !self.dead_teams.contains(team)
    }
    fn now_millis(&self) -> u64 {
        self.clock
    }
}

impl Output for TestHost {
    fn message(&mut self, target: PlayerId, text: &str) {
        self.sent.push((target, text.to_string()));
    }
    fn error(&mut self, target: PlayerId, text: &str) {
        self.errors.push((target, text.to_string()));
    }
    fn console(&mut self, text: &str) {
        self.console_lines.push(text.to_string());
    }
    fn console_error(&mut self, text: &str) {
        self.console_errors.push(text.to_string());
    }
}

/// Records sink calls verbatim so tests can compare registration runs.
#[derive(Default)]
pub struct RecordingSink {
    pub calls: Vec<String>,
}

impl CommandSink for RecordingSink {
    fn register(&mut self, name: &str, usage: &str, description: &str) {
        self.calls
            .push(format!("register {name} | {usage} | {description}"));
    }
    fn remove_command(&mut self, name: &str) {
        self.calls.push(format!("remove {name}"));
    }
}

pub fn player(id: u32, username: &str, rank: Rank) -> Player {
    Player {
        id: PlayerId(id),
        uuid: format!("uuid-{id}"),
        username: username.to_string(),
        rank,
        team: Team::new("sharded"),
        flags: Vec::new(),
        connected: true,
        unit_alive: true,
        lang: "en".to_string(),
    }
}
