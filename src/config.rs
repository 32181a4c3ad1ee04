//! Runtime configuration.
//!
//! Settings come from an optional `chessdesk.json` next to the executable
//! (or in the working directory), with environment variables taking
//! precedence. Anything unreadable falls back to the defaults.

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::{DEFAULT_FRAME_MS, DEFAULT_STEPS};

const CONFIG_FILE: &str = "chessdesk.json";

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// UCI engine binary to spawn.
    pub engine_path: String,
    /// Wall-clock budget per engine move, in milliseconds.
    pub move_time_ms: u64,
    /// When set, limits engine strength via UCI_LimitStrength/UCI_Elo.
    pub engine_elo: Option<u32>,
    /// Number of interpolation steps per move animation.
    pub animation_steps: usize,
    /// Delay between animation frames, in milliseconds.
    pub animation_frame_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine_path: "stockfish".to_string(),
            move_time_ms: 1000,
            engine_elo: None,
            animation_steps: DEFAULT_STEPS,
            animation_frame_ms: DEFAULT_FRAME_MS,
        }
    }
}

impl Config {
    /// Load configuration from disk and the environment.
    pub fn load() -> Self {
        let mut config = Self::from_file().unwrap_or_default();
        config.apply_env();
        config
    }

    fn from_file() -> Option<Self> {
        for path in Self::candidate_paths() {
            let Ok(data) = fs::read_to_string(&path) else {
                continue;
            };
            match serde_json::from_str(&data) {
                Ok(config) => {
                    log::info!("loaded config from {}", path.display());
                    return Some(config);
                }
                Err(e) => {
                    log::warn!("ignoring malformed {}: {}", path.display(), e);
                    return None;
                }
            }
        }
        None
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(dir) = std::env::current_exe().ok().and_then(|p| p.parent().map(|p| p.to_path_buf())) {
            paths.push(dir.join(CONFIG_FILE));
        }
        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd.join(CONFIG_FILE));
        }
        paths
    }

    fn apply_env(&mut self) {
        if let Ok(path) = std::env::var("CHESSDESK_ENGINE") {
            self.engine_path = path;
        }
        if let Some(ms) = parse_env("CHESSDESK_MOVE_TIME_MS") {
            self.move_time_ms = ms;
        }
        if let Some(elo) = parse_env("CHESSDESK_ELO") {
            self.engine_elo = Some(elo);
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    let value = std::env::var(name).ok()?;
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            log::warn!("ignoring unparseable {}={}", name, value);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.engine_path, "stockfish");
        assert_eq!(config.move_time_ms, 1000);
        assert_eq!(config.engine_elo, None);
    }

    #[test]
    fn test_parse_full_file() {
        let json = r#"{
            "engine_path": "/usr/local/bin/stockfish",
            "move_time_ms": 250,
            "engine_elo": 1320,
            "animation_steps": 5,
            "animation_frame_ms": 30
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.engine_path, "/usr/local/bin/stockfish");
        assert_eq!(config.move_time_ms, 250);
        assert_eq!(config.engine_elo, Some(1320));
        assert_eq!(config.animation_steps, 5);
        assert_eq!(config.animation_frame_ms, 30);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = serde_json::from_str(r#"{"move_time_ms": 50}"#).unwrap();
        assert_eq!(config.move_time_ms, 50);
        assert_eq!(config.engine_path, "stockfish");
        assert_eq!(config.animation_steps, DEFAULT_STEPS);
    }
}
