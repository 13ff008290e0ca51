//! Gravity/Refill - column compaction and tile generation
//!
//! Compaction walks each column bottom-up with a write cursor, so surviving
//! tiles keep their relative order and only ever move down. Refill then fills
//! the vacated top cells bottom-up, re-drawing colors (bounded) that would
//! complete a run with the settled tiles around them.
//!
//! The surrounding game mode can veto or replace spawned tiles through a
//! [`RefillHook`]. Cells the hook reports as blocked split their column into
//! segments: nothing falls through them and they are never refilled. A segment
//! under a blocked cell is fed from that cell, so its spawns start at the
//! blocker's row instead of above the board.

use std::fmt;

use crate::grid::Grid;
use crate::rng::SimpleRng;
use crate::tile::Tile;
use crate::types::Pos;

/// Game-mode hook consulted for every tile about to enter the grid.
///
/// Hooks must be `Clone` so a board can be copied for speculative play.
pub trait RefillHook: HookClone + fmt::Debug + Send {
    /// Return `None` to leave `pos` empty this round, or the tile to place
    /// (usually `proposed`, possibly a replacement).
    fn spawn(&mut self, pos: Pos, proposed: Tile) -> Option<Tile>;

    /// Whether `pos` is permanently closed to tiles. Blocked cells are skipped
    /// by refill and act as a floor for the tiles above them.
    fn blocks(&self, _pos: Pos) -> bool {
        false
    }
}

/// Object-safe cloning for boxed hooks. Implemented for every `Clone` hook.
pub trait HookClone {
    fn clone_box(&self) -> Box<dyn RefillHook>;
}

impl<T> HookClone for T
where
    T: RefillHook + Clone + 'static,
{
    fn clone_box(&self) -> Box<dyn RefillHook> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn RefillHook> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Hook that accepts every proposed tile.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl RefillHook for PassThrough {
    fn spawn(&mut self, _pos: Pos, proposed: Tile) -> Option<Tile> {
        Some(proposed)
    }
}

/// Hook that never spawns into a fixed set of cells (overlays, blockers).
#[derive(Debug, Clone, Default)]
pub struct BlockedCells {
    cells: Vec<Pos>,
}

impl BlockedCells {
    pub fn new(cells: impl IntoIterator<Item = Pos>) -> Self {
        Self {
            cells: cells.into_iter().collect(),
        }
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.cells.contains(&pos)
    }
}

impl RefillHook for BlockedCells {
    fn spawn(&mut self, pos: Pos, proposed: Tile) -> Option<Tile> {
        if self.contains(pos) {
            None
        } else {
            Some(proposed)
        }
    }

    fn blocks(&self, pos: Pos) -> bool {
        self.contains(pos)
    }
}

/// One tile moving within its column.
///
/// Spawned tiles start above the board: the lowest spawn in a column starts at
/// row -1, the next at -2, and so on. Spawns beneath a blocked cell start at
/// the blocker's row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Movement {
    pub x: i8,
    pub from_y: i8,
    pub to_y: i8,
    pub spawned: bool,
}

impl Movement {
    pub fn distance(&self) -> i8 {
        self.to_y - self.from_y
    }
}

/// Settle every column. Returns one movement per tile that fell.
///
/// The write cursor restarts under each blocked cell, so tiles settle onto
/// the blocker rather than passing it.
pub fn compact(grid: &mut Grid, hook: &dyn RefillHook) -> Vec<Movement> {
    let mut moves = Vec::new();
    for x in 0..grid.width() as i8 {
        let mut write = grid.height() as i8 - 1;
        for read in (0..grid.height() as i8).rev() {
            let from = Pos::new(x, read);
            if hook.blocks(from) {
                write = read - 1;
                continue;
            }
            if grid.is_empty_at(from) {
                continue;
            }
            if read != write {
                grid.exchange(from, Pos::new(x, write));
                moves.push(Movement {
                    x,
                    from_y: read,
                    to_y: write,
                    spawned: false,
                });
            }
            write -= 1;
        }
    }
    moves
}

/// Draw a color for `pos`, avoiding colors that would complete a run with the
/// current neighbours. After `retry_limit` redraws the last draw is kept.
pub fn draw_tile(grid: &Grid, pos: Pos, rng: &mut SimpleRng, palette: u8, retry_limit: u8) -> Tile {
    let mut tile = Tile::normal(rng.next_color(palette));
    for _ in 0..retry_limit {
        if !grid.completes_run(pos, &tile) {
            break;
        }
        tile = Tile::normal(rng.next_color(palette));
    }
    tile
}

/// Fill the empty cells left above each settled column segment.
///
/// Top-segment spawns stack upward from row -1. Spawns beneath a blocked cell
/// all emerge from the blocker's row.
pub fn refill(
    grid: &mut Grid,
    rng: &mut SimpleRng,
    palette: u8,
    retry_limit: u8,
    hook: &mut dyn RefillHook,
) -> Vec<Movement> {
    let mut moves = Vec::new();
    for x in 0..grid.width() as i8 {
        // (ceiling, empty cells top-down) per segment.
        let mut segments: Vec<(i8, Vec<Pos>)> = Vec::new();
        let mut ceiling = -1;
        let mut cells = Vec::new();
        for y in 0..grid.height() as i8 {
            let pos = Pos::new(x, y);
            if hook.blocks(pos) {
                segments.push((ceiling, std::mem::take(&mut cells)));
                ceiling = y;
            } else if grid.is_empty_at(pos) {
                cells.push(pos);
            }
        }
        segments.push((ceiling, cells));

        for (ceiling, cells) in segments.into_iter().rev() {
            let mut spawned = 0i8;
            for pos in cells.into_iter().rev() {
                let proposed = draw_tile(grid, pos, rng, palette, retry_limit);
                if let Some(tile) = hook.spawn(pos, proposed) {
                    grid.place(pos, Some(tile));
                    let from_y = if ceiling < 0 { ceiling - spawned } else { ceiling };
                    moves.push(Movement {
                        x,
                        from_y,
                        to_y: pos.y,
                        spawned: true,
                    });
                    spawned += 1;
                }
            }
        }
    }
    moves
}

/// Compact then refill.
pub fn apply_gravity(
    grid: &mut Grid,
    rng: &mut SimpleRng,
    palette: u8,
    retry_limit: u8,
    hook: &mut dyn RefillHook,
) -> Vec<Movement> {
    let mut moves = compact(grid, hook);
    moves.extend(refill(grid, rng, palette, retry_limit, hook));
    moves
}

/// Populate every empty cell in raster order with the anti-run rule.
///
/// Only left/above neighbours exist at placement time, so on an empty grid
/// this checks exactly the cells already placed.
pub fn fill_initial(
    grid: &mut Grid,
    rng: &mut SimpleRng,
    palette: u8,
    retry_limit: u8,
    hook: &mut dyn RefillHook,
) {
    let positions: Vec<Pos> = grid.positions().collect();
    for pos in positions {
        if hook.blocks(pos) || !grid.is_empty_at(pos) {
            continue;
        }
        let proposed = draw_tile(grid, pos, rng, palette, retry_limit);
        if let Some(tile) = hook.spawn(pos, proposed) {
            grid.place(pos, Some(tile));
        }
    }
}
