//! Productive-swap enumeration ("any moves left?" and hint candidates).

use crate::board::{Board, SwapOutcome};
use crate::types::Pos;

/// A swap candidate and what it would do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapCandidate {
    pub a: Pos,
    pub b: Pos,
    pub outcome: SwapOutcome,
}

/// Every productive swap, scanning each cell's right and down neighbour in
/// raster order.
pub fn valid_swaps(board: &Board) -> Vec<SwapCandidate> {
    let mut out = Vec::new();
    for a in board.grid().positions() {
        for b in [a.offset(1, 0), a.offset(0, 1)] {
            if !board.grid().contains(b) {
                continue;
            }
            if let Ok(outcome) = board.classify_swap(a, b) {
                if outcome.is_productive() {
                    out.push(SwapCandidate { a, b, outcome });
                }
            }
        }
    }
    out
}

/// True if at least one productive swap exists. Stops at the first one.
pub fn has_valid_move(board: &Board) -> bool {
    board.grid().positions().any(|a| {
        [a.offset(1, 0), a.offset(0, 1)].into_iter().any(|b| {
            board.grid().contains(b) && board.would_match_after_swap(a, b).unwrap_or(false)
        })
    })
}
