use std::path::{Path, PathBuf};

use tracing::warn;

use crate::ai::{Difficulty, DEFAULT_EASY_RANDOM_CHANCE};
use crate::error::ConfigError;
use crate::game::Mark;
use crate::score::ScoreStoreConfig;

/// Longest CPU "thinking" pause accepted from configuration.
pub const MAX_CPU_DELAY_MS: u64 = 5_000;

/// Gameplay settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub difficulty: Difficulty,
    pub human_mark: Mark,
    /// Pause before the CPU replies, for pacing only.
    pub cpu_delay_ms: u64,
    pub easy_random_chance: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            difficulty: Difficulty::Hard,
            human_mark: Mark::X,
            cpu_delay_ms: 220,
            easy_random_chance: DEFAULT_EASY_RANDOM_CHANCE,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// The TUI owns the terminal, so logs go to a file.
    pub file: PathBuf,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            file: PathBuf::from("tictactoe.log"),
            filter: "info".to_string(),
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub score: ScoreStoreConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let chance = self.game.easy_random_chance;
        if !(0.0..=1.0).contains(&chance) {
            return Err(ConfigError::Validation(
                "game.easy_random_chance must be in [0, 1]".into(),
            ));
        }
        if self.game.cpu_delay_ms > MAX_CPU_DELAY_MS {
            return Err(ConfigError::Validation(format!(
                "game.cpu_delay_ms must be <= {MAX_CPU_DELAY_MS}"
            )));
        }
        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::Validation(
                "logging.filter must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
