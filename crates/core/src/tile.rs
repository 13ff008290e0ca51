//! Tile module - the content of a single grid cell
//!
//! A tile is a color plus a kind. Special kinds carry their own payload
//! (rocket orientation, bomb radius) so activation logic can match on the
//! kind exhaustively.

use crate::types::{Color, Orientation, Pos, SpecialKind};

/// What a tile is, beyond its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    Normal,
    Rocket(Orientation),
    Bomb { radius: u8 },
    /// Matches nothing automatically; only an explicit swap activates it
    Rainbow,
}

impl TileKind {
    pub fn is_special(&self) -> bool {
        !matches!(self, TileKind::Normal)
    }

    /// Rockets and bombs are the kinds that activate when caught in a match
    /// or inside another effect's area.
    pub fn is_area_special(&self) -> bool {
        matches!(self, TileKind::Rocket(_) | TileKind::Bomb { .. })
    }

    pub fn special_kind(&self) -> SpecialKind {
        match self {
            TileKind::Normal => SpecialKind::None,
            TileKind::Rocket(_) => SpecialKind::Rocket,
            TileKind::Bomb { .. } => SpecialKind::Bomb,
            TileKind::Rainbow => SpecialKind::Rainbow,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.special_kind().as_str()
    }
}

/// A tile owned by exactly one grid cell.
///
/// Deliberately not `Copy`: tiles move between cells, and the grid rewrites
/// the stored position on every placement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tile {
    pub color: Color,
    pub kind: TileKind,
    pos: Pos,
}

impl Tile {
    pub fn new(color: Color, kind: TileKind) -> Self {
        Self {
            color,
            kind,
            pos: Pos::default(),
        }
    }

    pub fn normal(color: Color) -> Self {
        Self::new(color, TileKind::Normal)
    }

    pub fn rocket(color: Color, orientation: Orientation) -> Self {
        Self::new(color, TileKind::Rocket(orientation))
    }

    pub fn bomb(color: Color, radius: u8) -> Self {
        Self::new(color, TileKind::Bomb { radius })
    }

    /// The color of a rainbow is never consulted for matching.
    pub fn rainbow(color: Color) -> Self {
        Self::new(color, TileKind::Rainbow)
    }

    /// The cell this tile was last placed in.
    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub(crate) fn place_at(&mut self, pos: Pos) {
        self.pos = pos;
    }

    pub fn is_rainbow(&self) -> bool {
        matches!(self.kind, TileKind::Rainbow)
    }

    /// Whether this tile can take part in an automatic run.
    pub fn is_matchable(&self) -> bool {
        !self.is_rainbow()
    }

    /// Two tiles match iff neither is a rainbow and their colors are equal.
    pub fn can_match_with(&self, other: &Tile) -> bool {
        self.is_matchable() && other.is_matchable() && self.color == other.color
    }
}
