//! TOML configuration for players and the move search.

use crate::game::{DEFAULT_FIRST_COLOR, DEFAULT_SECOND_COLOR};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Default search horizon in plies.
pub const DEFAULT_HORIZON: u32 = 2;

/// Top-level configuration.
///
/// Every section and key is optional; missing values fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct QuantikConfig {
    /// Player colors.
    #[serde(default)]
    players: PlayersConfig,

    /// Move search settings.
    #[serde(default)]
    ai: AiConfig,
}

/// Display colors for the two seats.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PlayersConfig {
    /// Color of player 1, who moves first.
    #[serde(default = "default_first_color")]
    first_color: String,

    /// Color of player 2.
    #[serde(default = "default_second_color")]
    second_color: String,
}

/// How candidate moves are scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ScoringMode {
    /// Minimax look-ahead to the configured horizon.
    #[default]
    Lookahead,
    /// 100 for an immediate win, 50 for anything else.
    Immediate,
}

/// Move search settings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AiConfig {
    /// Plies explored before a position is scored as neutral.
    #[serde(default = "default_horizon")]
    horizon: u32,

    /// Seed for the tie-breaking random source. Unset means OS entropy.
    #[serde(default)]
    seed: Option<u64>,

    /// Scoring strategy.
    #[serde(default)]
    scoring: ScoringMode,

    /// Among the best moves, prefer shapes the opponent still holds.
    #[serde(default = "default_prefer_contested_shapes")]
    prefer_contested_shapes: bool,

    /// Maximum positions scored per root move. Unset means unbounded.
    #[serde(default)]
    node_budget: Option<u64>,
}

fn default_first_color() -> String {
    DEFAULT_FIRST_COLOR.to_string()
}

fn default_second_color() -> String {
    DEFAULT_SECOND_COLOR.to_string()
}

fn default_horizon() -> u32 {
    DEFAULT_HORIZON
}

fn default_prefer_contested_shapes() -> bool {
    true
}

impl Default for PlayersConfig {
    fn default() -> Self {
        Self {
            first_color: default_first_color(),
            second_color: default_second_color(),
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            horizon: default_horizon(),
            seed: None,
            scoring: ScoringMode::default(),
            prefer_contested_shapes: default_prefer_contested_shapes(),
            node_budget: None,
        }
    }
}

impl AiConfig {
    /// Returns a copy with the given seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns a copy with the given horizon.
    pub fn with_horizon(mut self, horizon: u32) -> Self {
        self.horizon = horizon;
        self
    }

    /// Returns a copy with the given scoring mode.
    pub fn with_scoring(mut self, scoring: ScoringMode) -> Self {
        self.scoring = scoring;
        self
    }

    /// Returns a copy with the given node budget.
    pub fn with_node_budget(mut self, node_budget: u64) -> Self {
        self.node_budget = Some(node_budget);
        self
    }

    /// Returns a copy with the opponent-shape preference switched on or off.
    pub fn with_prefer_contested_shapes(mut self, prefer: bool) -> Self {
        self.prefer_contested_shapes = prefer;
        self
    }
}

impl QuantikConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml_str(&content)?;
        info!(
            horizon = config.ai.horizon,
            scoring = %config.ai.scoring,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Replaces the search settings.
    pub fn with_ai(mut self, ai: AiConfig) -> Self {
        self.ai = ai;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
