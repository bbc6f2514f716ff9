//! Client configuration read from the environment.

use std::env;
use std::path::PathBuf;

/// Settings for one client session.
///
/// | Variable            | Default   |
/// |---------------------|-----------|
/// | `BATTLE_DATA_DIR`   | `data`    |
/// | `BATTLE_PLAYER`     | `hero`    |
/// | `BATTLE_ENEMY`      | `dragon`  |
/// | `BATTLE_SEED`       | from `config.toml` |
/// | `BATTLE_AUTOPLAY`   | `false`   |
/// | `BATTLE_SESSION_ID` | timestamp |
/// | `BATTLE_SHOW_DEBUG` | `false`   |
/// | `BATTLE_MAX_ROUNDS` | unlimited |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub data_dir: PathBuf,
    /// Roster id of the player's combatant.
    pub player: String,
    /// Roster id of the opponent.
    pub enemy: String,
    /// Overrides the seed from `config.toml`.
    pub seed: Option<u64>,
    /// Attack every round instead of reading choices from stdin.
    pub autoplay: bool,
    pub session_id: Option<String>,
    /// Print AI and engine diagnostics alongside the narration.
    pub show_debug: bool,
    pub max_rounds: Option<u32>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            player: "hero".into(),
            enemy: "dragon".into(),
            seed: None,
            autoplay: false,
            session_id: None,
            show_debug: false,
            max_rounds: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup("BATTLE_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(player) = lookup("BATTLE_PLAYER") {
            config.player = player;
        }
        if let Some(enemy) = lookup("BATTLE_ENEMY") {
            config.enemy = enemy;
        }
        config.seed = lookup("BATTLE_SEED").and_then(|v| v.trim().parse().ok());
        if let Some(autoplay) = lookup("BATTLE_AUTOPLAY").as_deref().and_then(parse_bool) {
            config.autoplay = autoplay;
        }
        config.session_id = lookup("BATTLE_SESSION_ID").filter(|id| !id.trim().is_empty());
        if let Some(show) = lookup("BATTLE_SHOW_DEBUG").as_deref().and_then(parse_bool) {
            config.show_debug = show;
        }
        config.max_rounds = lookup("BATTLE_MAX_ROUNDS").and_then(|v| v.trim().parse().ok());

        config
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
