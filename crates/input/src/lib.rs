//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::BoardAction`]. Cursor movement
//! relies on the terminal's own key repeat; there is no held-key state.

pub mod map;

pub use tui_match3_types as types;

pub use map::{handle_key_event, should_quit};
