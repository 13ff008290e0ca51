//! Board - the grid plus everything needed to play it
//!
//! A [`Board`] owns the grid, the RNG, the refill hook and the cascade state
//! machine. It is the single owner of all grid mutations: player swaps enter
//! through [`Board::swap`], and the cascade advances through
//! [`Board::step`](crate::cascade) one transition at a time.
//!
//! Swap validation order:
//!
//! 1. both positions in bounds, else [`BoardError::InvalidPosition`]
//! 2. the cells are orthogonal neighbours, else [`BoardError::NotAdjacent`]
//! 3. no cascade in progress, else [`BoardError::Busy`]
//! 4. the swap is productive (match or special combination), else `Ok(false)`
//!
//! Nothing is mutated unless every check passes.

use arrayvec::ArrayVec;

use crate::config::BoardConfig;
use crate::detect::{find_matches, Match};
use crate::effects::{classify_pair, ComboKind};
use crate::error::BoardError;
use crate::events::BoardEvent;
use crate::gravity::{self, Movement, PassThrough, RefillHook};
use crate::grid::Grid;
use crate::moves::has_valid_move;
use crate::resolve::{self, ResolutionResult};
use crate::rng::SimpleRng;
use crate::types::{CascadePhase, Pos, SHUFFLE_ATTEMPTS};

/// What a swap would do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapOutcome {
    /// The swapped tiles form at least one run
    Match,
    /// Two specials (or a rainbow and any tile) combine
    Effect(ComboKind),
    NoMatch,
}

impl SwapOutcome {
    pub fn is_productive(&self) -> bool {
        !matches!(self, SwapOutcome::NoMatch)
    }
}

/// Work queued for the next resolving round.
#[derive(Debug, Clone, Default)]
pub(crate) enum Pending {
    #[default]
    Nothing,
    Matches(Vec<Match>),
    /// Combination fired at the first cell, consuming both.
    Combo { origin: Pos, partner: Pos },
}

#[derive(Debug, Clone)]
pub struct Board {
    pub(crate) grid: Grid,
    pub(crate) config: BoardConfig,
    pub(crate) rng: SimpleRng,
    pub(crate) hook: Box<dyn RefillHook>,
    pub(crate) phase: CascadePhase,
    pub(crate) pending: Pending,
    /// Depth of the current (or last finished) cascade
    pub(crate) combo: u32,
    pub(crate) rounds: u32,
    pub(crate) removed_in_cascade: usize,
    /// Cells the player just moved tiles into, most recent first
    pub(crate) moved: ArrayVec<Pos, 2>,
    pub(crate) events: Vec<BoardEvent>,
}

impl Board {
    /// Build and fill a board. The result has no matches (barring retry
    /// exhaustion) and at least one productive swap.
    pub fn new(config: BoardConfig) -> Result<Self, BoardError> {
        Self::with_hook(config, Box::new(PassThrough))
    }

    pub fn with_hook(config: BoardConfig, hook: Box<dyn RefillHook>) -> Result<Self, BoardError> {
        config.validate()?;
        let grid = Grid::new(config.width, config.height)?;
        let mut board = Self::from_parts(grid, config, hook);
        board.fill();
        if !has_valid_move(&board) {
            board.reshuffle();
        }
        board.events.clear();
        Ok(board)
    }

    /// Wrap an existing grid without filling it (fixtures, replays).
    pub fn from_grid(grid: Grid, config: BoardConfig) -> Self {
        let config = BoardConfig {
            width: grid.width(),
            height: grid.height(),
            ..config
        };
        Self::from_parts(grid, config, Box::new(PassThrough))
    }

    fn from_parts(grid: Grid, config: BoardConfig, hook: Box<dyn RefillHook>) -> Self {
        Self {
            grid,
            rng: SimpleRng::new(config.seed),
            config,
            hook,
            phase: CascadePhase::Idle,
            pending: Pending::Nothing,
            combo: 0,
            rounds: 0,
            removed_in_cascade: 0,
            moved: ArrayVec::new(),
            events: Vec::new(),
        }
    }

    pub fn set_hook(&mut self, hook: Box<dyn RefillHook>) {
        self.hook = hook;
    }

    fn fill(&mut self) {
        gravity::fill_initial(
            &mut self.grid,
            &mut self.rng,
            self.config.colors,
            self.config.init_retry_limit,
            self.hook.as_mut(),
        );
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn width(&self) -> u8 {
        self.grid.width()
    }

    pub fn height(&self) -> u8 {
        self.grid.height()
    }

    pub fn phase(&self) -> CascadePhase {
        self.phase
    }

    /// True while a cascade is in progress; swaps are refused until Idle.
    pub fn is_resolving(&self) -> bool {
        self.phase != CascadePhase::Idle
    }

    /// Combo depth of the current round, or of the last cascade once Idle
    /// (until [`commit_combo`](Self::commit_combo)).
    pub fn combo_depth(&self) -> u32 {
        self.combo
    }

    /// Take the finished cascade's depth and reset the counter. Does nothing
    /// mid-cascade.
    pub fn commit_combo(&mut self) -> u32 {
        if self.is_resolving() {
            return 0;
        }
        std::mem::take(&mut self.combo)
    }

    /// RNG state; seeding a new board with it continues the sequence.
    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }

    /// Queued notifications in emission order.
    pub fn drain_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[BoardEvent] {
        &self.events
    }

    fn check_pair(&self, a: Pos, b: Pos) -> Result<(), BoardError> {
        self.grid.get(a)?;
        self.grid.get(b)?;
        if !a.is_adjacent(b) {
            return Err(BoardError::NotAdjacent { a, b });
        }
        Ok(())
    }

    /// Classify a swap without performing it.
    pub fn classify_swap(&self, a: Pos, b: Pos) -> Result<SwapOutcome, BoardError> {
        self.check_pair(a, b)?;
        let (Some(ta), Some(tb)) = (self.grid.tile(a), self.grid.tile(b)) else {
            return Ok(SwapOutcome::NoMatch);
        };
        if let Some(kind) = classify_pair(ta, tb) {
            return Ok(SwapOutcome::Effect(kind));
        }
        // Speculate on a scratch copy; the live grid is never touched.
        let mut scratch = self.grid.clone();
        scratch.swap(a, b)?;
        let forms_run = [a, b]
            .iter()
            .any(|&p| scratch.tile(p).map_or(false, |t| scratch.completes_run(p, t)));
        Ok(if forms_run {
            SwapOutcome::Match
        } else {
            SwapOutcome::NoMatch
        })
    }

    /// Pure predicate: would swapping `a` and `b` do anything?
    pub fn would_match_after_swap(&self, a: Pos, b: Pos) -> Result<bool, BoardError> {
        Ok(self.classify_swap(a, b)?.is_productive())
    }

    /// Player swap. Returns whether it was accepted; an accepted swap leaves
    /// the board in [`CascadePhase::Resolving`].
    pub fn swap(&mut self, a: Pos, b: Pos) -> Result<bool, BoardError> {
        self.check_pair(a, b)?;
        if self.is_resolving() {
            return Err(BoardError::Busy);
        }
        match self.classify_swap(a, b)? {
            SwapOutcome::NoMatch => Ok(false),
            SwapOutcome::Match => {
                self.grid.swap(a, b)?;
                let matches = find_matches(&self.grid);
                self.begin_cascade(Pending::Matches(matches), [b, a]);
                Ok(true)
            }
            SwapOutcome::Effect(_) => {
                self.begin_cascade(Pending::Combo { origin: a, partner: b }, [a, b]);
                Ok(true)
            }
        }
    }

    fn begin_cascade(&mut self, pending: Pending, moved: [Pos; 2]) {
        self.pending = pending;
        self.moved = ArrayVec::from(moved);
        self.phase = CascadePhase::Resolving;
        self.combo = 0;
        self.rounds = 0;
        self.removed_in_cascade = 0;
    }

    /// Match detector entry point.
    pub fn find_matches(&self) -> Vec<Match> {
        find_matches(&self.grid)
    }

    /// Resolve `matches` immediately, outside the cascade state machine.
    /// Refused while a cascade is running.
    pub fn resolve(&mut self, matches: &[Match]) -> Result<ResolutionResult, BoardError> {
        if self.is_resolving() {
            return Err(BoardError::Busy);
        }
        let result = resolve::resolve(
            &mut self.grid,
            matches,
            &self.moved,
            self.config.bomb_radius,
        );
        self.moved.clear();
        self.push_resolution_events(&result);
        Ok(result)
    }

    /// Settle columns and refill, outside the cascade state machine.
    pub fn apply_gravity(&mut self) -> Result<Vec<Movement>, BoardError> {
        if self.is_resolving() {
            return Err(BoardError::Busy);
        }
        Ok(self.settle())
    }

    pub(crate) fn settle(&mut self) -> Vec<Movement> {
        gravity::apply_gravity(
            &mut self.grid,
            &mut self.rng,
            self.config.colors,
            self.config.init_retry_limit,
            self.hook.as_mut(),
        )
    }

    pub(crate) fn push_resolution_events(&mut self, result: &ResolutionResult) {
        for effect in &result.effects {
            self.events.push(BoardEvent::EffectTriggered {
                origin: effect.origin,
                effect: effect.effect,
                affected: effect.affected.len(),
            });
        }
        for r in &result.removed {
            self.events.push(BoardEvent::TileRemoved {
                pos: r.pos,
                color: r.color,
                kind: r.kind,
                match_size: r.match_size,
                cause: r.cause,
            });
        }
        for c in &result.created {
            self.events.push(BoardEvent::SpecialCreated {
                pos: c.pos,
                color: c.color,
                kind: c.kind,
            });
        }
    }

    /// Redistribute the existing tiles so that no match exists and at least
    /// one productive swap does. Falls back to a fresh fill after
    /// [`SHUFFLE_ATTEMPTS`]. Returns whether the fallback was used.
    pub fn shuffle(&mut self) -> Result<bool, BoardError> {
        if self.is_resolving() {
            return Err(BoardError::Busy);
        }
        Ok(self.reshuffle())
    }

    fn reshuffle(&mut self) -> bool {
        let cells: Vec<Pos> = self
            .grid
            .positions()
            .filter(|&p| !self.grid.is_empty_at(p))
            .collect();
        let mut tiles = Vec::with_capacity(cells.len());
        for &p in &cells {
            if let Ok(Some(tile)) = self.grid.take(p) {
                tiles.push(tile);
            }
        }

        for _ in 0..SHUFFLE_ATTEMPTS {
            self.rng.shuffle(&mut tiles);
            for (&p, tile) in cells.iter().zip(&tiles) {
                self.grid.place(p, Some(tile.clone()));
            }
            if find_matches(&self.grid).is_empty() && has_valid_move(self) {
                self.events.push(BoardEvent::Shuffled { refilled: false });
                return false;
            }
        }

        self.grid.clear();
        self.fill();
        self.events.push(BoardEvent::Shuffled { refilled: true });
        true
    }
}
