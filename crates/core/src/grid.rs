//! Grid module - fixed-size 2D array of tiles
//!
//! The grid is `width x height` cells, each empty or holding exactly one tile.
//! Uses a flat vector in row-major order (y * width + x) for cache locality.
//! Coordinates: (x, y) where x is the column (left to right) and y the row
//! (top to bottom); (0, 0) is the top-left cell.
//!
//! Every access is bounds-checked and out-of-range positions fail with
//! [`BoardError::InvalidPosition`]; nothing wraps or clamps.

use crate::error::BoardError;
use crate::tile::{Tile, TileKind};
use crate::types::{Color, Orientation, Pos, MAX_BOARD_DIM, MIN_BOARD_DIM};

/// The game grid using flat storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Option<Tile>>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(width: u8, height: u8) -> Result<Self, BoardError> {
        let range = MIN_BOARD_DIM..=MAX_BOARD_DIM;
        if !range.contains(&width) || !range.contains(&height) {
            return Err(BoardError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        })
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Total number of cells
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(&self, pos: Pos) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 || pos.x as u8 >= self.width || pos.y as u8 >= self.height {
            return None;
        }
        Some(pos.y as usize * self.width as usize + pos.x as usize)
    }

    fn checked_index(&self, pos: Pos) -> Result<usize, BoardError> {
        self.index(pos).ok_or(BoardError::InvalidPosition {
            pos,
            width: self.width,
            height: self.height,
        })
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.index(pos).is_some()
    }

    /// Get the tile at `pos` (`Ok(None)` for an empty cell)
    pub fn get(&self, pos: Pos) -> Result<Option<&Tile>, BoardError> {
        let idx = self.checked_index(pos)?;
        Ok(self.cells[idx].as_ref())
    }

    /// Convenience lookup: `None` for empty and out-of-bounds alike.
    pub fn tile(&self, pos: Pos) -> Option<&Tile> {
        self.index(pos).and_then(|idx| self.cells[idx].as_ref())
    }

    /// Mutable access for in-place kind/color changes. The tile's position
    /// stays private so it cannot drift from its cell.
    pub fn tile_mut(&mut self, pos: Pos) -> Option<&mut Tile> {
        let idx = self.index(pos)?;
        self.cells[idx].as_mut()
    }

    /// Place `tile` (or clear the cell) and return the previous occupant.
    pub fn set(&mut self, pos: Pos, tile: Option<Tile>) -> Result<Option<Tile>, BoardError> {
        let idx = self.checked_index(pos)?;
        let tile = tile.map(|mut t| {
            t.place_at(pos);
            t
        });
        Ok(std::mem::replace(&mut self.cells[idx], tile))
    }

    /// Remove and return the tile at `pos`.
    pub fn take(&mut self, pos: Pos) -> Result<Option<Tile>, BoardError> {
        let idx = self.checked_index(pos)?;
        Ok(self.cells[idx].take())
    }

    /// Exchange the contents of two cells (either may be empty).
    ///
    /// Adjacency is not checked here; that is a swap-request rule.
    pub fn swap(&mut self, a: Pos, b: Pos) -> Result<(), BoardError> {
        let ia = self.checked_index(a)?;
        let ib = self.checked_index(b)?;
        self.cells.swap(ia, ib);
        if let Some(t) = self.cells[ia].as_mut() {
            t.place_at(a);
        }
        if let Some(t) = self.cells[ib].as_mut() {
            t.place_at(b);
        }
        Ok(())
    }

    /// `set` for positions taken from this grid's own walk.
    ///
    /// Out-of-bounds input is a caller bug: it trips a debug assertion and is
    /// otherwise ignored.
    pub(crate) fn place(&mut self, pos: Pos, tile: Option<Tile>) -> Option<Tile> {
        let Some(idx) = self.index(pos) else {
            debug_assert!(false, "place outside {}x{}: {pos:?}", self.width, self.height);
            return None;
        };
        let tile = tile.map(|mut t| {
            t.place_at(pos);
            t
        });
        std::mem::replace(&mut self.cells[idx], tile)
    }

    /// `swap` for two positions known to be in bounds. See [`Grid::place`].
    pub(crate) fn exchange(&mut self, a: Pos, b: Pos) {
        if let Err(e) = self.swap(a, b) {
            debug_assert!(false, "exchange: {e}");
        }
    }

    pub fn is_empty_at(&self, pos: Pos) -> bool {
        matches!(self.get(pos), Ok(None))
    }

    /// All positions in raster order (row by row, left to right).
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let (w, h) = (self.width as i8, self.height as i8);
        (0..h).flat_map(move |y| (0..w).map(move |x| Pos::new(x, y)))
    }

    /// All tiles in raster order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().flatten()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn empty_count(&self) -> usize {
        self.area() - self.occupied_count()
    }

    /// Tiles of one column, top to bottom.
    pub fn column_tiles(&self, x: i8) -> Vec<&Tile> {
        (0..self.height as i8)
            .filter_map(|y| self.tile(Pos::new(x, y)))
            .collect()
    }

    /// Distinct matchable colors currently on the board, in palette order.
    pub fn colors_present(&self) -> Vec<Color> {
        let mut seen = [false; Color::ALL.len()];
        for tile in self.tiles().filter(|t| t.is_matchable()) {
            seen[tile.color.index() as usize] = true;
        }
        Color::ALL
            .iter()
            .copied()
            .filter(|c| seen[c.index() as usize])
            .collect()
    }

    /// Check the invariant that every tile reports its own cell.
    pub fn positions_consistent(&self) -> bool {
        self.positions()
            .all(|pos| self.tile(pos).map_or(true, |t| t.pos() == pos))
    }

    /// Run lengths (horizontal, vertical) that `candidate` would form if it
    /// sat at `pos`, counting only the neighbours it can match with.
    ///
    /// The cell at `pos` itself is ignored, so this works both for probing an
    /// empty cell and for re-checking an occupied one.
    pub fn line_lengths(&self, pos: Pos, candidate: &Tile) -> (usize, usize) {
        if !candidate.is_matchable() {
            return (1, 1);
        }
        let count = |dx: i8, dy: i8| {
            let mut n = 0;
            let mut p = pos.offset(dx, dy);
            while let Some(t) = self.tile(p) {
                if !t.can_match_with(candidate) {
                    break;
                }
                n += 1;
                p = p.offset(dx, dy);
            }
            n
        };
        (1 + count(-1, 0) + count(1, 0), 1 + count(0, -1) + count(0, 1))
    }

    /// True if `candidate` at `pos` would complete a run of 3 or more.
    pub fn completes_run(&self, pos: Pos, candidate: &Tile) -> bool {
        let (h, v) = self.line_lengths(pos, candidate);
        h >= crate::types::MIN_MATCH_LEN || v >= crate::types::MIN_MATCH_LEN
    }

    /// Compact numeric code for a cell (0 = empty).
    ///
    /// `1 + color` for normal tiles, plus `8 * n` for the special kinds
    /// (1 = horizontal rocket, 2 = vertical rocket, 3 = bomb, 4 = rainbow).
    pub fn cell_code(&self, pos: Pos) -> u8 {
        match self.tile(pos) {
            None => 0,
            Some(t) => {
                let kind = match t.kind {
                    TileKind::Normal => 0,
                    TileKind::Rocket(Orientation::Horizontal) => 1,
                    TileKind::Rocket(Orientation::Vertical) => 2,
                    TileKind::Bomb { .. } => 3,
                    TileKind::Rainbow => 4,
                };
                1 + t.color.index() + 8 * kind
            }
        }
    }

    /// FNV-1a 64-bit hash over every cell, used for cheap equality checks.
    pub fn fingerprint(&self) -> u64 {
        let mut h: u64 = 0xcbf29ce484222325;
        let mut write = |b: u8| {
            h ^= b as u64;
            h = h.wrapping_mul(0x00000100000001B3);
        };
        write(self.width);
        write(self.height);
        for pos in self.positions() {
            write(self.cell_code(pos));
            if let Some(TileKind::Bomb { radius }) = self.tile(pos).map(|t| t.kind) {
                write(radius);
            }
        }
        h
    }

    /// Build a grid from text rows.
    ///
    /// `R O Y G B P` (any case) are normal tiles of that color, `*` is a
    /// rainbow and `.` an empty cell. All rows must have the same length.
    pub fn from_ascii(rows: &[&str]) -> Result<Self, BoardError> {
        let height = rows.len().min(u8::MAX as usize) as u8;
        let width = rows
            .first()
            .map(|r| r.chars().count().min(u8::MAX as usize))
            .unwrap_or(0) as u8;
        let mut grid = Self::new(width, height)?;
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width as usize {
                return Err(BoardError::InvalidDimensions { width, height });
            }
            for (x, ch) in row.chars().enumerate() {
                let pos = Pos::new(x as i8, y as i8);
                let tile = match ch {
                    '.' => None,
                    '*' => Some(Tile::rainbow(Color::Red)),
                    c => Some(Tile::normal(
                        Color::from_char(c).ok_or(BoardError::InvalidCell { pos, ch: c })?,
                    )),
                };
                grid.set(pos, tile)?;
            }
        }
        Ok(grid)
    }

    /// Render as text rows: normal tiles uppercase, rockets and bombs
    /// lowercase, rainbows `*`, empty cells `.`.
    pub fn to_ascii(&self) -> Vec<String> {
        (0..self.height as i8)
            .map(|y| {
                (0..self.width as i8)
                    .map(|x| match self.tile(Pos::new(x, y)) {
                        None => '.',
                        Some(t) => match t.kind {
                            TileKind::Normal => t.color.as_char(),
                            TileKind::Rainbow => '*',
                            _ => t.color.as_char().to_ascii_lowercase(),
                        },
                    })
                    .collect()
            })
            .collect()
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }
}
