//! Error types for the board engine.

use thiserror::Error;

use crate::types::Pos;

/// Failures of grid access and player swap requests.
///
/// All of these are recoverable: the board is left untouched whenever one is
/// returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("position ({}, {}) is outside the {width}x{height} board", pos.x, pos.y)]
    InvalidPosition { pos: Pos, width: u8, height: u8 },

    /// Caller-contract violation, distinct from "adjacent but no match".
    #[error("cells ({}, {}) and ({}, {}) are not adjacent", a.x, a.y, b.x, b.y)]
    NotAdjacent { a: Pos, b: Pos },

    /// Input arrived while a cascade is still being resolved.
    #[error("a cascade is in progress")]
    Busy,

    #[error("board dimensions {width}x{height} are out of range")]
    InvalidDimensions { width: u8, height: u8 },

    #[error("palette size {0} is out of range")]
    InvalidPalette(u8),

    #[error("bomb radius {0} is out of range")]
    InvalidBombRadius(u8),

    #[error("unrecognised cell {ch:?} at ({}, {})", pos.x, pos.y)]
    InvalidCell { pos: Pos, ch: char },
}

impl BoardError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            BoardError::InvalidPosition { .. } => "invalid_position",
            BoardError::NotAdjacent { .. } => "not_adjacent",
            BoardError::Busy => "busy",
            BoardError::InvalidDimensions { .. } => "invalid_dimensions",
            BoardError::InvalidPalette(_) => "invalid_palette",
            BoardError::InvalidBombRadius(_) => "invalid_bomb_radius",
            BoardError::InvalidCell { .. } => "invalid_cell",
        }
    }
}

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    /// A setting from the environment or the config file is out of range
    /// or unparsable.
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
    #[error(transparent)]
    Board(#[from] BoardError),
}
