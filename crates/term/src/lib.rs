//! Terminal board renderer.
//!
//! Renders a [`core::GameSnapshot`] into a plain framebuffer that is then
//! flushed to the terminal, diffed against the previous frame. No widget
//! library is involved, which keeps the 2-columns-per-cell layout exact.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_match3_core as core;
pub use tui_match3_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{decode_cell, AnchorY, BoardOverlay, GameView, Glyph, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
