//! Scoring module - points per resolving round
//!
//! A round's base points are:
//! - [`TILE_SCORE`] per tile removed as a match member
//! - [`EFFECT_TILE_SCORE`] per tile removed by an activation or combination
//! - [`SPECIAL_BONUS`] per special tile created, by kind
//!
//! The base is then multiplied by the combo depth of the round (1 for the
//! player's own swap, 2 for the first cascade, ...).

use crate::resolve::{RemovalCause, ResolutionResult};
use crate::types::{EFFECT_TILE_SCORE, SPECIAL_BONUS, TILE_SCORE};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub match_points: u32,
    pub effect_points: u32,
    pub special_bonus: u32,
    /// Combo depth applied to the base
    pub multiplier: u32,
    pub total: u32,
}

/// Points for `count` tiles removed with `cause`.
pub fn calculate_removal_score(count: usize, cause: RemovalCause) -> u32 {
    let per_tile = match cause {
        RemovalCause::Match => TILE_SCORE,
        RemovalCause::Effect => EFFECT_TILE_SCORE,
    };
    per_tile.saturating_mul(count as u32)
}

/// Score one resolving round at the given combo depth.
///
/// A depth of 0 is treated as 1 so that manual resolutions outside a cascade
/// still score.
pub fn calculate_round_score(result: &ResolutionResult, depth: u32) -> ScoreResult {
    let match_points =
        calculate_removal_score(result.removed_by(RemovalCause::Match), RemovalCause::Match);
    let effect_points =
        calculate_removal_score(result.removed_by(RemovalCause::Effect), RemovalCause::Effect);
    let special_bonus = result
        .created
        .iter()
        .map(|c| SPECIAL_BONUS[c.kind.special_kind().index()])
        .fold(0u32, u32::saturating_add);

    let multiplier = depth.max(1);
    let total = match_points
        .saturating_add(effect_points)
        .saturating_add(special_bonus)
        .saturating_mul(multiplier);

    ScoreResult {
        match_points,
        effect_points,
        special_bonus,
        multiplier,
        total,
    }
}
