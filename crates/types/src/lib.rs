//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (board engine, terminal view, move planner).
//!
//! # Board Dimensions
//!
//! The default board is an 8x8 grid:
//!
//! - **Width**: 8 columns (indexed 0-7, left to right)
//! - **Height**: 8 rows (indexed 0-7, top to bottom)
//! - **Origin**: `(0, 0)` is the top-left cell
//!
//! Boards can be configured anywhere between [`MIN_BOARD_DIM`] and [`MAX_BOARD_DIM`]
//! cells per side.
//!
//! # Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TILE_SCORE` | 10 | Points per tile cleared by a line match |
//! | `EFFECT_TILE_SCORE` | 20 | Points per tile cleared by a special activation |
//! | `SPECIAL_BONUS` | 0/60/90/150 | Bonus per special created (none/rocket/bomb/rainbow) |
//!
//! Every round's points are multiplied by the combo depth of that round.
//!
//! # Examples
//!
//! ```
//! use tui_match3_types::{BoardAction, Color, Pos, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! // Parse a color (case-insensitive)
//! assert_eq!(Color::from_str("red"), Some(Color::Red));
//! assert_eq!(Color::from_char('B'), Some(Color::Blue));
//!
//! // Positions know their neighbours
//! assert!(Pos::new(3, 0).is_adjacent(Pos::new(3, 1)));
//! assert!(!Pos::new(3, 0).is_adjacent(Pos::new(4, 1)));
//!
//! // Parse a board action
//! assert_eq!(BoardAction::from_str("select"), Some(BoardAction::Select));
//!
//! // Board dimensions
//! assert_eq!(BOARD_WIDTH, 8);
//! assert_eq!(BOARD_HEIGHT, 8);
//! ```

/// Default board width in cells (8 columns)
pub const BOARD_WIDTH: u8 = 8;

/// Default board height in cells (8 rows)
pub const BOARD_HEIGHT: u8 = 8;

/// Smallest accepted board side.
pub const MIN_BOARD_DIM: u8 = 3;

/// Largest accepted board side (keeps coordinates inside `i8`).
pub const MAX_BOARD_DIM: u8 = 32;

/// Number of distinct tile colors in the full palette.
pub const COLOR_COUNT: u8 = 6;

/// Smallest palette that still lets the anti-run placement make progress.
pub const MIN_COLORS: u8 = 3;

/// Minimum run length that counts as a match.
pub const MIN_MATCH_LEN: usize = 3;

/// Redraw budget used when placing a tile without completing a run.
pub const INIT_RETRY_LIMIT: u8 = 10;

/// Blast radius of a freshly created bomb (radius 1 = 3x3).
pub const DEFAULT_BOMB_RADIUS: u8 = 1;

/// Minimum merged tile count for a compound (T/L) match to spawn a bomb.
pub const COMPOUND_BOMB_MIN: usize = 5;

/// Attempts made by a shuffle before falling back to a fresh fill.
pub const SHUFFLE_ATTEMPTS: u32 = 64;

/// Presentation pacing: one cascade transition per this many milliseconds.
pub const CASCADE_STEP_MS: u32 = 120;

/// Fixed timestep interval of the terminal runner in milliseconds.
pub const TICK_MS: u32 = 16;

/// Points per tile removed by a line match.
pub const TILE_SCORE: u32 = 10;

/// Points per tile removed by a special activation or combination.
pub const EFFECT_TILE_SCORE: u32 = 20;

/// Bonus per created special, indexed by [`SpecialKind::index`].
pub const SPECIAL_BONUS: [u32; 4] = [0, 60, 90, 150];

/// A cell coordinate on the board.
///
/// `x` is the column, `y` the row. Coordinates are signed so that requests
/// left of or above the board are representable (and rejected) rather than
/// wrapping around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Pos {
    pub x: i8,
    pub y: i8,
}

impl Pos {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Offset by `(dx, dy)`, saturating at the `i8` range.
    pub fn offset(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// True for the four orthogonal neighbours (never for the cell itself).
    pub fn is_adjacent(self, other: Pos) -> bool {
        let dx = (self.x as i16 - other.x as i16).abs();
        let dy = (self.y as i16 - other.y as i16).abs();
        dx + dy == 1
    }
}

impl From<(i8, i8)> for Pos {
    fn from((x, y): (i8, i8)) -> Self {
        Self { x, y }
    }
}

/// The six tile colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl Color {
    pub const ALL: [Color; 6] = [
        Color::Red,
        Color::Orange,
        Color::Yellow,
        Color::Green,
        Color::Blue,
        Color::Purple,
    ];

    /// Palette index (0..6).
    pub fn index(self) -> u8 {
        match self {
            Color::Red => 0,
            Color::Orange => 1,
            Color::Yellow => 2,
            Color::Green => 3,
            Color::Blue => 4,
            Color::Purple => 5,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Parse color from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_match3_types::Color;
    ///
    /// assert_eq!(Color::from_str("Purple"), Some(Color::Purple));
    /// assert_eq!(Color::from_str("teal"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(Color::Red),
            "orange" => Some(Color::Orange),
            "yellow" => Some(Color::Yellow),
            "green" => Some(Color::Green),
            "blue" => Some(Color::Blue),
            "purple" => Some(Color::Purple),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Orange => "orange",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Purple => "purple",
        }
    }

    /// Single-letter fixture code (`R O Y G B P`, case-insensitive).
    pub fn from_char(ch: char) -> Option<Self> {
        match ch.to_ascii_uppercase() {
            'R' => Some(Color::Red),
            'O' => Some(Color::Orange),
            'Y' => Some(Color::Yellow),
            'G' => Some(Color::Green),
            'B' => Some(Color::Blue),
            'P' => Some(Color::Purple),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Color::Red => 'R',
            Color::Orange => 'O',
            Color::Yellow => 'Y',
            Color::Green => 'G',
            Color::Blue => 'B',
            Color::Purple => 'P',
        }
    }
}

/// Rocket sweep direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Clears the rocket's row
    Horizontal,
    /// Clears the rocket's column
    Vertical,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        }
    }
}

/// The special tile a match spawns (or `None` for a plain match).
///
/// Classification of a detected match:
/// - line of 3: **None**
/// - line of 4: **Rocket**
/// - line of 5+: **Rainbow**
/// - compound (T/L) with 5+ merged tiles: **Bomb**, otherwise **None**
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialKind {
    None,
    Rocket,
    Bomb,
    Rainbow,
}

impl SpecialKind {
    /// Index into [`SPECIAL_BONUS`].
    pub fn index(self) -> usize {
        match self {
            SpecialKind::None => 0,
            SpecialKind::Rocket => 1,
            SpecialKind::Bomb => 2,
            SpecialKind::Rainbow => 3,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" => Some(SpecialKind::None),
            "rocket" => Some(SpecialKind::Rocket),
            "bomb" => Some(SpecialKind::Bomb),
            "rainbow" => Some(SpecialKind::Rainbow),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpecialKind::None => "none",
            SpecialKind::Rocket => "rocket",
            SpecialKind::Bomb => "bomb",
            SpecialKind::Rainbow => "rainbow",
        }
    }
}

/// Geometry of a detected match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchShape {
    Horizontal,
    Vertical,
    /// Perpendicular runs sharing a cell (T- and L-shapes)
    Compound,
}

impl MatchShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchShape::Horizontal => "horizontal",
            MatchShape::Vertical => "vertical",
            MatchShape::Compound => "compound",
        }
    }
}

/// Cascade controller states.
///
/// The cycle goes: Idle → Resolving → Falling → Rescanning → (Resolving | Idle)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CascadePhase {
    /// Grid stable, no pending matches
    #[default]
    Idle,
    /// Pending matches/effects are being turned into removals and creations
    Resolving,
    /// Gravity and refill; the only phase where new tiles enter the grid
    Falling,
    /// Match detection on the settled grid
    Rescanning,
}

impl CascadePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            CascadePhase::Idle => "idle",
            CascadePhase::Resolving => "resolving",
            CascadePhase::Falling => "falling",
            CascadePhase::Rescanning => "rescanning",
        }
    }
}

/// Player-facing actions produced by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardAction {
    /// Move the cursor one cell left
    CursorLeft,
    /// Move the cursor one cell right
    CursorRight,
    /// Move the cursor one cell up
    CursorUp,
    /// Move the cursor one cell down
    CursorDown,
    /// Select the cursor cell, or swap it with the current selection
    Select,
    /// Cancel the current selection
    Cancel,
    /// Ask the planner for a hint
    Hint,
    /// Toggle pause state
    Pause,
    /// Restart the game
    Restart,
}

impl BoardAction {
    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_match3_types::BoardAction;
    ///
    /// assert_eq!(BoardAction::from_str("cursorLeft"), Some(BoardAction::CursorLeft));
    /// assert_eq!(BoardAction::from_str("hint"), Some(BoardAction::Hint));
    /// assert_eq!(BoardAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cursorleft" => Some(BoardAction::CursorLeft),
            "cursorright" => Some(BoardAction::CursorRight),
            "cursorup" => Some(BoardAction::CursorUp),
            "cursordown" => Some(BoardAction::CursorDown),
            "select" => Some(BoardAction::Select),
            "cancel" => Some(BoardAction::Cancel),
            "hint" => Some(BoardAction::Hint),
            "pause" => Some(BoardAction::Pause),
            "restart" => Some(BoardAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardAction::CursorLeft => "cursorLeft",
            BoardAction::CursorRight => "cursorRight",
            BoardAction::CursorUp => "cursorUp",
            BoardAction::CursorDown => "cursorDown",
            BoardAction::Select => "select",
            BoardAction::Cancel => "cancel",
            BoardAction::Hint => "hint",
            BoardAction::Pause => "pause",
            BoardAction::Restart => "restart",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_roundtrips_through_index_and_char() {
        for color in Color::ALL {
            assert_eq!(Color::from_index(color.index()), Some(color));
            assert_eq!(Color::from_char(color.as_char()), Some(color));
            assert_eq!(Color::from_str(color.as_str()), Some(color));
        }
        assert_eq!(Color::from_index(COLOR_COUNT), None);
    }

    #[test]
    fn adjacency_is_orthogonal_only() {
        let p = Pos::new(3, 3);
        assert!(p.is_adjacent(Pos::new(2, 3)));
        assert!(p.is_adjacent(Pos::new(3, 4)));
        assert!(!p.is_adjacent(p));
        assert!(!p.is_adjacent(Pos::new(4, 4)));
        assert!(!p.is_adjacent(Pos::new(5, 3)));
    }

    #[test]
    fn special_bonus_table_matches_kinds() {
        assert_eq!(SPECIAL_BONUS[SpecialKind::None.index()], 0);
        assert!(SPECIAL_BONUS[SpecialKind::Rocket.index()] < SPECIAL_BONUS[SpecialKind::Bomb.index()]);
        assert!(SPECIAL_BONUS[SpecialKind::Bomb.index()] < SPECIAL_BONUS[SpecialKind::Rainbow.index()]);
    }

    #[test]
    fn default_dimensions_fit_in_range() {
        assert!((MIN_BOARD_DIM..=MAX_BOARD_DIM).contains(&BOARD_WIDTH));
        assert!((MIN_BOARD_DIM..=MAX_BOARD_DIM).contains(&BOARD_HEIGHT));
    }
}
