//! TOML-based application configuration.
//!
//! Stores game tuning, the pledge texts, and the memory-lane rounds.
//! Configuration is stored at `<data_dir>/config.toml`; a missing or
//! unparseable file loads the built-in defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::games::Choice;
use crate::storage::data_dir;

/// Game tuning knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamesConfig {
    /// Petals to collect for the rose-day win.
    #[serde(default = "default_petal_target")]
    pub petal_target: u32,
    /// Bars to drop for the chocolate-day win.
    #[serde(default = "default_stack_target")]
    pub stack_target: u32,
    /// Hold duration for the hug win, in milliseconds.
    #[serde(default = "default_hug_hold_ms")]
    pub hug_hold_ms: u64,
    /// Charge lost the instant a hug is released early.
    #[serde(default = "default_hug_release_penalty_ms")]
    pub hug_release_penalty_ms: u64,
    /// Inclusive percent band for the perfect kiss.
    #[serde(default = "default_kiss_band")]
    pub kiss_band: [f32; 2],
}

impl Default for GamesConfig {
    fn default() -> Self {
        Self {
            petal_target: default_petal_target(),
            stack_target: default_stack_target(),
            hug_hold_ms: default_hug_hold_ms(),
            hug_release_penalty_ms: default_hug_release_penalty_ms(),
            kiss_band: default_kiss_band(),
        }
    }
}

/// The selectable promise texts for the pledge card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PledgeConfig {
    #[serde(default = "default_pledges")]
    pub pledges: Vec<String>,
}

impl Default for PledgeConfig {
    fn default() -> Self {
        Self {
            pledges: default_pledges(),
        }
    }
}

/// One memory-lane round: a shared photo plus two captions, one true.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryRound {
    pub photo_id: String,
    pub caption_a: String,
    pub caption_b: String,
    pub correct: Choice,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub games: GamesConfig,
    #[serde(default)]
    pub pledge: PledgeConfig,
    #[serde(default = "default_memory_rounds")]
    pub memory: Vec<MemoryRound>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            games: GamesConfig::default(),
            pledge: PledgeConfig::default(),
            memory: default_memory_rounds(),
        }
    }
}

impl Config {
    /// Load from the data directory; any failure loads defaults.
    pub fn load() -> Self {
        match Self::path() {
            Ok(path) => Self::load_from(&path),
            Err(_) => Self::default(),
        }
    }

    pub fn load_from(path: &PathBuf) -> Self {
        match std::fs::read_to_string(path) {
            Ok(raw) => toml::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "config unparseable, using defaults");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// # Errors
    /// Returns an error if serialization or the file write fails.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path().map_err(|e| ConfigError::SaveFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        let raw = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, raw).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    pub fn path() -> Result<PathBuf, crate::error::CoreError> {
        Ok(data_dir()?.join("config.toml"))
    }
}

// Default functions
fn default_petal_target() -> u32 {
    20
}
fn default_stack_target() -> u32 {
    10
}
fn default_hug_hold_ms() -> u64 {
    6000
}
fn default_hug_release_penalty_ms() -> u64 {
    800
}
fn default_kiss_band() -> [f32; 2] {
    [45.0, 65.0]
}

fn default_pledges() -> Vec<String> {
    vec![
        "I will always make you coffee in the mornings".to_string(),
        "I will hold your hand in crowded places".to_string(),
        "I will laugh at your bad jokes".to_string(),
        "I will make time for us every week".to_string(),
    ]
}

fn default_memory_rounds() -> Vec<MemoryRound> {
    vec![
        MemoryRound {
            photo_id: "2".to_string(),
            caption_a: "Our first photo".to_string(),
            caption_b: "Our second photo".to_string(),
            correct: Choice::A,
        },
        MemoryRound {
            photo_id: "3".to_string(),
            caption_a: "Upvan".to_string(),
            caption_b: "Airoli Park Walk".to_string(),
            correct: Choice::A,
        },
        MemoryRound {
            photo_id: "4".to_string(),
            caption_a: "Our first concert".to_string(),
            caption_b: "Our only concert".to_string(),
            correct: Choice::A,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_week() {
        let cfg = Config::default();
        assert_eq!(cfg.games.petal_target, 20);
        assert_eq!(cfg.games.stack_target, 10);
        assert_eq!(cfg.games.hug_hold_ms, 6000);
        assert_eq!(cfg.games.kiss_band, [45.0, 65.0]);
        assert_eq!(cfg.pledge.pledges.len(), 4);
        assert_eq!(cfg.memory.len(), 3);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: Config = toml::from_str(
            "[games]\npetal_target = 5\n",
        )
        .unwrap();
        assert_eq!(cfg.games.petal_target, 5);
        assert_eq!(cfg.games.stack_target, 10);
        assert_eq!(cfg.pledge.pledges.len(), 4);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let cfg = Config::default();
        let raw = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&raw).unwrap();
        assert_eq!(back.games.hug_hold_ms, cfg.games.hug_hold_ms);
        assert_eq!(back.memory.len(), cfg.memory.len());
        assert_eq!(back.memory[1].caption_a, "Upvan");
    }
}
