//! Board and session configuration.
//!
//! Precedence, lowest first: built-in defaults, the JSON file named by
//! `MATCH3_CONFIG`, then the individual `MATCH3_*` environment variables.

use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, ConfigError};
use crate::types::{
    COLOR_COUNT, BOARD_HEIGHT, BOARD_WIDTH, DEFAULT_BOMB_RADIUS, INIT_RETRY_LIMIT, MAX_BOARD_DIM,
    MIN_BOARD_DIM, MIN_COLORS,
};

pub const ENV_CONFIG: &str = "MATCH3_CONFIG";
pub const ENV_WIDTH: &str = "MATCH3_WIDTH";
pub const ENV_HEIGHT: &str = "MATCH3_HEIGHT";
pub const ENV_COLORS: &str = "MATCH3_COLORS";
pub const ENV_SEED: &str = "MATCH3_SEED";
pub const ENV_MODE: &str = "MATCH3_MODE";

/// Inbound configuration of one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: u8,
    pub height: u8,
    /// Palette size (first `colors` entries of [`Color::ALL`](crate::types::Color::ALL))
    pub colors: u8,
    pub bomb_radius: u8,
    /// Redraws allowed when a placed tile would complete a run
    pub init_retry_limit: u8,
    pub seed: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            colors: COLOR_COUNT,
            bomb_radius: DEFAULT_BOMB_RADIUS,
            init_retry_limit: INIT_RETRY_LIMIT,
            seed: 1,
        }
    }
}

impl BoardConfig {
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_colors(mut self, colors: u8) -> Self {
        self.colors = colors;
        self
    }

    pub fn validate(&self) -> Result<(), BoardError> {
        let dims = MIN_BOARD_DIM..=MAX_BOARD_DIM;
        if !dims.contains(&self.width) || !dims.contains(&self.height) {
            return Err(BoardError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !(MIN_COLORS..=COLOR_COUNT).contains(&self.colors) {
            return Err(BoardError::InvalidPalette(self.colors));
        }
        if !(1..=MAX_BOARD_DIM).contains(&self.bomb_radius) {
            return Err(BoardError::InvalidBombRadius(self.bomb_radius));
        }
        Ok(())
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup (the environment in
    /// production, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = match non_empty(lookup(ENV_CONFIG)) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(v) = non_empty(lookup(ENV_WIDTH)) {
            config.width = parse_var(ENV_WIDTH, &v)?;
        }
        if let Some(v) = non_empty(lookup(ENV_HEIGHT)) {
            config.height = parse_var(ENV_HEIGHT, &v)?;
        }
        if let Some(v) = non_empty(lookup(ENV_COLORS)) {
            config.colors = parse_var(ENV_COLORS, &v)?;
        }
        if let Some(v) = non_empty(lookup(ENV_SEED)) {
            config.seed = parse_var(ENV_SEED, &v)?;
        }
        config.validate()?;
        Ok(config)
    }
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn parse_var<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}

/// How a session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    /// No move limit, never ends
    #[default]
    Endless,
    /// Ends when `limit` moves have been played
    Moves { limit: u32 },
    /// Reach `score` (and finish every objective) within `moves`
    Target { moves: u32, score: u32 },
}

impl GameMode {
    /// Parse `endless`, `moves:N` or `target:N:SCORE`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        let mut parts = s.split(':');
        match parts.next()? {
            "endless" => parts.next().is_none().then_some(GameMode::Endless),
            "moves" => {
                let limit = parts.next()?.parse().ok()?;
                parts.next().is_none().then_some(GameMode::Moves { limit })
            }
            "target" => {
                let moves = parts.next()?.parse().ok()?;
                let score = parts.next()?.parse().ok()?;
                parts
                    .next()
                    .is_none()
                    .then_some(GameMode::Target { moves, score })
            }
            _ => None,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        match non_empty(lookup(ENV_MODE)) {
            None => Ok(GameMode::Endless),
            Some(v) => Self::parse(&v).ok_or(ConfigError::Invalid {
                key: ENV_MODE,
                value: v,
            }),
        }
    }

    /// Move budget, if the mode has one.
    pub fn move_limit(&self) -> Option<u32> {
        match *self {
            GameMode::Endless => None,
            GameMode::Moves { limit } => Some(limit),
            GameMode::Target { moves, .. } => Some(moves),
        }
    }

    pub fn target_score(&self) -> Option<u32> {
        match *self {
            GameMode::Target { score, .. } => Some(score),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Endless => "endless",
            GameMode::Moves { .. } => "moves",
            GameMode::Target { .. } => "target",
        }
    }
}
