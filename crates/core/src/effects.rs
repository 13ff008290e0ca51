//! Special-tile activation and combination effects
//!
//! Every effect computes an affected-cell list from a read-only grid; the
//! resolution engine decides what to do with it. Affected lists contain only
//! occupied cells, in raster order, without duplicates.
//!
//! # Single activations
//!
//! - **Rocket**: its whole row (horizontal) or column (vertical)
//! - **Bomb**: the square of the given radius centred on the bomb
//! - **Rainbow**: every matchable tile of the swap partner's color
//!
//! # Combinations (two specials swapped into each other)
//!
//! | Pair | Effect |
//! |------|--------|
//! | Rocket + Rocket | full row and full column through the combo cell |
//! | Rocket + Bomb | `2r+1` rows or columns (rocket orientation) |
//! | Bomb + Bomb | square of radius `r1 + r2` (5x5 for two default bombs) |
//! | Rainbow + Rocket | every tile of the paired color becomes a rocket and fires |
//! | Rainbow + Bomb | two colors removed entirely |
//! | Rainbow + Rainbow | entire board |

use crate::grid::Grid;
use crate::tile::{Tile, TileKind};
use crate::types::{Color, Orientation, Pos, MAX_BOARD_DIM};

/// An area effect, single or combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    Rocket { orientation: Orientation },
    Bomb { radius: u8 },
    Rainbow { color: Color },
    RocketRocket,
    RocketBomb { orientation: Orientation, radius: u8 },
    BombBomb { radius: u8 },
    RainbowRocket { color: Color, orientation: Orientation },
    RainbowBomb { colors: [Color; 2] },
    RainbowRainbow,
}

/// Which pairing a special swap falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComboKind {
    /// A rainbow swapped with a normal tile
    RainbowSingle,
    RocketRocket,
    RocketBomb,
    BombBomb,
    RainbowRocket,
    RainbowBomb,
    RainbowRainbow,
}

impl ComboKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComboKind::RainbowSingle => "rainbow",
            ComboKind::RocketRocket => "rocket_rocket",
            ComboKind::RocketBomb => "rocket_bomb",
            ComboKind::BombBomb => "bomb_bomb",
            ComboKind::RainbowRocket => "rainbow_rocket",
            ComboKind::RainbowBomb => "rainbow_bomb",
            ComboKind::RainbowRainbow => "rainbow_rainbow",
        }
    }
}

/// Classify a swap of two tiles into a combination, if any.
///
/// Rockets and bombs swapped with a normal tile are not combinations; they
/// only fire when the swap produces a line match.
pub fn classify_pair(a: &Tile, b: &Tile) -> Option<ComboKind> {
    use TileKind::*;
    match (a.kind, b.kind) {
        (Rainbow, Rainbow) => Some(ComboKind::RainbowRainbow),
        (Rainbow, Rocket(_)) | (Rocket(_), Rainbow) => Some(ComboKind::RainbowRocket),
        (Rainbow, Bomb { .. }) | (Bomb { .. }, Rainbow) => Some(ComboKind::RainbowBomb),
        (Rainbow, Normal) | (Normal, Rainbow) => Some(ComboKind::RainbowSingle),
        (Rocket(_), Rocket(_)) => Some(ComboKind::RocketRocket),
        (Rocket(_), Bomb { .. }) | (Bomb { .. }, Rocket(_)) => Some(ComboKind::RocketBomb),
        (Bomb { .. }, Bomb { .. }) => Some(ComboKind::BombBomb),
        (Normal, _) | (_, Normal) => None,
    }
}

impl Effect {
    /// The effect a rocket or bomb fires on its own.
    pub fn single(tile: &Tile) -> Option<Effect> {
        match tile.kind {
            TileKind::Rocket(orientation) => Some(Effect::Rocket { orientation }),
            TileKind::Bomb { radius } => Some(Effect::Bomb { radius }),
            TileKind::Normal | TileKind::Rainbow => None,
        }
    }

    /// Build the combined effect for two swapped tiles.
    ///
    /// `rainbow_bomb_colors` supplies the two colors for a rainbow + bomb
    /// pairing; the caller owns the randomness.
    pub fn combine(
        a: &Tile,
        b: &Tile,
        rainbow_bomb_colors: impl FnOnce() -> [Color; 2],
    ) -> Option<Effect> {
        let kind = classify_pair(a, b)?;
        // The rainbow's partner decides the color.
        let other = if a.is_rainbow() { b } else { a };
        let effect = match kind {
            ComboKind::RainbowSingle => Effect::Rainbow { color: other.color },
            ComboKind::RainbowRainbow => Effect::RainbowRainbow,
            ComboKind::RainbowRocket => Effect::RainbowRocket {
                color: other.color,
                orientation: rocket_orientation(other.kind).unwrap_or(Orientation::Horizontal),
            },
            ComboKind::RainbowBomb => Effect::RainbowBomb {
                colors: rainbow_bomb_colors(),
            },
            ComboKind::RocketRocket => Effect::RocketRocket,
            ComboKind::RocketBomb => {
                let orientation = rocket_orientation(a.kind)
                    .or_else(|| rocket_orientation(b.kind))
                    .unwrap_or(Orientation::Horizontal);
                Effect::RocketBomb {
                    orientation,
                    radius: bomb_radius(a.kind).max(bomb_radius(b.kind)),
                }
            }
            ComboKind::BombBomb => Effect::BombBomb {
                radius: bomb_radius(a.kind).saturating_add(bomb_radius(b.kind)),
            },
        };
        Some(effect)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Effect::Rocket { .. } => "rocket",
            Effect::Bomb { .. } => "bomb",
            Effect::Rainbow { .. } => "rainbow",
            Effect::RocketRocket => "rocket_rocket",
            Effect::RocketBomb { .. } => "rocket_bomb",
            Effect::BombBomb { .. } => "bomb_bomb",
            Effect::RainbowRocket { .. } => "rainbow_rocket",
            Effect::RainbowBomb { .. } => "rainbow_bomb",
            Effect::RainbowRainbow => "rainbow_rainbow",
        }
    }

    /// Occupied cells this effect clears when fired at `origin`.
    pub fn affected_cells(&self, grid: &Grid, origin: Pos) -> Vec<Pos> {
        let mut mask = CellMask::new(grid);
        match *self {
            Effect::Rocket { orientation } => mask.line(origin, orientation),
            Effect::Bomb { radius } => mask.square(origin, radius),
            Effect::Rainbow { color } => {
                mask.insert(origin);
                mask.color(color);
            }
            Effect::RocketRocket => {
                mask.line(origin, Orientation::Horizontal);
                mask.line(origin, Orientation::Vertical);
            }
            Effect::RocketBomb {
                orientation,
                radius,
            } => {
                let r = reach(radius);
                for d in -r..=r {
                    let through = match orientation {
                        Orientation::Horizontal => origin.offset(0, d),
                        Orientation::Vertical => origin.offset(d, 0),
                    };
                    mask.line(through, orientation);
                }
            }
            Effect::BombBomb { radius } => mask.square(origin, radius),
            Effect::RainbowRocket { color, orientation } => {
                mask.insert(origin);
                for target in conversion_targets(grid, color) {
                    mask.line(target, orientation);
                }
            }
            Effect::RainbowBomb { colors } => {
                mask.insert(origin);
                for color in colors {
                    mask.color(color);
                }
            }
            Effect::RainbowRainbow => {
                for pos in grid.positions() {
                    mask.insert(pos);
                }
            }
        }
        mask.into_cells()
    }
}

/// Tiles a rainbow + rocket combination turns into rockets: every matchable
/// tile of `color`, in raster order.
pub fn conversion_targets(grid: &Grid, color: Color) -> Vec<Pos> {
    grid.positions()
        .filter(|&p| {
            grid.tile(p)
                .map_or(false, |t| t.is_matchable() && t.color == color)
        })
        .collect()
}

fn rocket_orientation(kind: TileKind) -> Option<Orientation> {
    match kind {
        TileKind::Rocket(o) => Some(o),
        _ => None,
    }
}

fn bomb_radius(kind: TileKind) -> u8 {
    match kind {
        TileKind::Bomb { radius } => radius,
        _ => 0,
    }
}

/// Signed reach of a radius. Nothing beyond the largest board matters, and
/// clamping keeps `-r` in range.
fn reach(radius: u8) -> i8 {
    radius.min(MAX_BOARD_DIM) as i8
}

/// Dense per-cell membership set; keeps output in raster order.
struct CellMask<'a> {
    grid: &'a Grid,
    hit: Vec<bool>,
}

impl<'a> CellMask<'a> {
    fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            hit: vec![false; grid.area()],
        }
    }

    fn insert(&mut self, pos: Pos) {
        if self.grid.contains(pos) {
            let idx = pos.y as usize * self.grid.width() as usize + pos.x as usize;
            self.hit[idx] = true;
        }
    }

    fn line(&mut self, through: Pos, orientation: Orientation) {
        match orientation {
            Orientation::Horizontal => {
                if through.y < 0 || through.y as u8 >= self.grid.height() {
                    return;
                }
                for x in 0..self.grid.width() as i8 {
                    self.insert(Pos::new(x, through.y));
                }
            }
            Orientation::Vertical => {
                if through.x < 0 || through.x as u8 >= self.grid.width() {
                    return;
                }
                for y in 0..self.grid.height() as i8 {
                    self.insert(Pos::new(through.x, y));
                }
            }
        }
    }

    fn square(&mut self, center: Pos, radius: u8) {
        let r = reach(radius);
        for dy in -r..=r {
            for dx in -r..=r {
                self.insert(center.offset(dx, dy));
            }
        }
    }

    fn color(&mut self, color: Color) {
        for pos in conversion_targets(self.grid, color) {
            self.insert(pos);
        }
    }

    fn into_cells(self) -> Vec<Pos> {
        let grid = self.grid;
        grid.positions()
            .zip(self.hit)
            .filter(|(pos, hit)| *hit && grid.tile(*pos).is_some())
            .map(|(pos, _)| pos)
            .collect()
    }
}
