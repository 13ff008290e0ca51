//! Core board engine - pure, deterministic, and testable
//!
//! This crate contains the match-3 rules and the cascade state machine.
//! It has **no dependencies** on terminal, input, or wall-clock time, making it:
//!
//! - **Deterministic**: the same config and seed produce identical games
//! - **Testable**: every rule is reachable from plain function calls
//! - **Portable**: any frontend can drive it by stepping and draining events
//!
//! # Module Structure
//!
//! - [`tile`]: tile color and kind (normal, rocket, bomb, rainbow)
//! - [`grid`]: bounds-checked 2D array of tiles
//! - [`detect`]: run detection, compound (T/L) merging, special classification
//! - [`effects`]: activation and combination areas
//! - [`resolve`]: removals, special creation, chain reactions
//! - [`gravity`]: column compaction, refill, initial fill
//! - [`board`]: swap validation and the single owner of grid mutations
//! - [`cascade`]: the resolve / fall / rescan state machine
//! - [`moves`]: productive-swap enumeration
//! - [`game_state`]: modes, objectives, scoring and combo commit
//!
//! # Example
//!
//! ```
//! use tui_match3_core::{Board, BoardConfig, Grid};
//! use tui_match3_core::types::Pos;
//!
//! let grid = Grid::from_ascii(&[
//!     "RRRBG", //
//!     "GGBRO", //
//!     "BOGYB", //
//!     "YBOGR",
//! ])
//! .unwrap();
//! let mut board = Board::from_grid(grid.clone(), BoardConfig::default());
//! board.resolve(&[]).unwrap();
//! assert_eq!(board.grid(), &grid);
//!
//! let matches = board.find_matches();
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].cells()[0], Pos::new(0, 0));
//!
//! let result = board.resolve(&matches).unwrap();
//! assert_eq!(result.removed.len(), 3);
//! board.apply_gravity().unwrap();
//! assert_eq!(board.grid().empty_count(), 0);
//! ```
//!
//! # Driving a cascade
//!
//! After an accepted [`Board::swap`], call [`Board::step`] until it returns
//! `None` (or [`Board::run_to_idle`]), draining [`BoardEvent`]s as you go.

pub mod board;
pub mod cascade;
pub mod config;
pub mod detect;
pub mod effects;
pub mod error;
pub mod events;
pub mod game_state;
pub mod gravity;
pub mod grid;
pub mod moves;
pub mod resolve;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod tile;

pub use tui_match3_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, SwapOutcome};
pub use cascade::{CascadeReport, CascadeStep};
pub use config::{BoardConfig, GameMode};
pub use detect::{find_matches, has_any_match, Match};
pub use effects::{classify_pair, ComboKind, Effect};
pub use error::{BoardError, ConfigError};
pub use events::{BoardEvent, EventPayload, EventRecord};
pub use game_state::{GameState, Objective};
pub use gravity::{BlockedCells, Movement, PassThrough, RefillHook};
pub use grid::Grid;
pub use moves::{has_valid_move, valid_swaps, SwapCandidate};
pub use resolve::{
    AppliedEffect, CreatedSpecial, RemovalCause, RemovedTile, ResolutionPlan, ResolutionResult,
};
pub use rng::SimpleRng;
pub use scoring::{calculate_round_score, ScoreResult};
pub use snapshot::{GameSnapshot, ObjectiveSnapshot};
pub use tile::{Tile, TileKind};
