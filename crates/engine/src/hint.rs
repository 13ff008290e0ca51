use crate::core::{valid_swaps, Board, CascadeReport, GameState, SwapOutcome};
use crate::types::Pos;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintError {
    NoMoves,
    NotPlayable,
    Busy,
}

impl HintError {
    pub fn code(self) -> &'static str {
        match self {
            HintError::NoMoves => "no_moves",
            HintError::NotPlayable => "not_playable",
            HintError::Busy => "busy",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            HintError::NoMoves => "no productive swap exists",
            HintError::NotPlayable => "game is not playable",
            HintError::Busy => "a cascade is in progress",
        }
    }
}

/// The recommended swap and what simulating it produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hint {
    pub a: Pos,
    pub b: Pos,
    pub outcome: SwapOutcome,
    pub effects: usize,
    pub removed: usize,
    pub created: usize,
    pub max_combo: u32,
}

impl Hint {
    fn from_report(a: Pos, b: Pos, outcome: SwapOutcome, report: &CascadeReport) -> Self {
        Self {
            a,
            b,
            outcome,
            effects: report.effects,
            removed: report.removed,
            created: report.created,
            max_combo: report.max_combo,
        }
    }

    fn rank(&self) -> (usize, usize, usize) {
        (self.effects, self.removed, self.created)
    }
}

/// Simulate every productive swap on a copy of the board and pick the one
/// that triggers the most effects, then removes the most tiles, then creates
/// the most specials. Ties go to the earliest swap in raster order.
pub fn plan_best_swap(board: &Board) -> Result<Hint, HintError> {
    if board.is_resolving() {
        return Err(HintError::Busy);
    }

    let mut best: Option<Hint> = None;
    for candidate in valid_swaps(board) {
        let mut sim = board.clone();
        if !matches!(sim.swap(candidate.a, candidate.b), Ok(true)) {
            continue;
        }
        let report = sim.run_to_idle();
        let hint = Hint::from_report(candidate.a, candidate.b, candidate.outcome, &report);
        if best.map_or(true, |b| hint.rank() > b.rank()) {
            best = Some(hint);
        }
    }
    best.ok_or(HintError::NoMoves)
}

/// Plan for a session, refusing paused or finished games.
pub fn plan_hint(state: &GameState) -> Result<Hint, HintError> {
    if state.paused() || state.game_over() {
        return Err(HintError::NotPlayable);
    }
    plan_best_swap(state.board())
}

/// Play the best swap on the session. The cascade is left for the caller to
/// advance.
pub fn apply_hint(state: &mut GameState) -> Result<Hint, HintError> {
    let hint = plan_hint(state)?;
    match state.swap(hint.a, hint.b) {
        Ok(true) => Ok(hint),
        Ok(false) => Err(HintError::NotPlayable),
        Err(_) => Err(HintError::Busy),
    }
}
