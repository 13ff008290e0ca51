//! Move planner.
//!
//! Ranks productive swaps by simulating each one on a cloned board and
//! running the cascade to completion. The live board is never touched.

pub mod hint;

pub use tui_match3_core as core;
pub use tui_match3_types as types;

pub use hint::{apply_hint, plan_best_swap, plan_hint, Hint, HintError};
