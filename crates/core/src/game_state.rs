//! Game state module - the game-mode/scoring layer over one board
//!
//! [`GameState`] consumes the board's events and decides policy:
//!
//! - **Scoring**: each resolving round is scored with
//!   [`calculate_round_score`] at that round's combo depth.
//! - **Combo commit**: when a cascade reaches Idle the best depth is recorded
//!   and the board counter is reset.
//! - **Objectives**: collect tiles of a color, create specials of a kind.
//! - **Modes**: endless, a move budget, or a score target within a budget.
//! - **Dead boards**: a move that leaves no productive swap triggers a shuffle.
//!
//! Pausing stops [`advance`](GameState::advance) between transitions, which is
//! always a consistent point.

use crate::board::Board;
use crate::cascade::CascadeStep;
use crate::config::{BoardConfig, GameMode};
use crate::error::BoardError;
use crate::events::BoardEvent;
use crate::moves::has_valid_move;
use crate::scoring::{calculate_round_score, ScoreResult};
use crate::snapshot::{GameSnapshot, ObjectiveSnapshot};
use crate::tile::TileKind;
use crate::types::{BoardAction, CascadePhase, Color, Pos, SpecialKind};

/// A goal tracked from board events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Objective {
    /// Remove `count` tiles of `color`
    CollectColor { color: Color, count: u32 },
    /// Create `count` specials of `kind`
    CreateSpecial { kind: SpecialKind, count: u32 },
}

impl Objective {
    pub fn goal(&self) -> u32 {
        match *self {
            Objective::CollectColor { count, .. } | Objective::CreateSpecial { count, .. } => count,
        }
    }

    /// How much `event` advances this objective.
    fn credit(&self, event: &BoardEvent) -> u32 {
        match (*self, event) {
            (
                Objective::CollectColor { color, .. },
                BoardEvent::TileRemoved {
                    color: removed,
                    kind,
                    ..
                },
            ) if *kind != TileKind::Rainbow => u32::from(*removed == color),
            (Objective::CreateSpecial { kind, .. }, BoardEvent::SpecialCreated { kind: made, .. }) => {
                u32::from(made.special_kind() == kind)
            }
            _ => 0,
        }
    }

    /// What the objective counts, e.g. `red` or `rocket`.
    pub fn subject(&self) -> &'static str {
        match self {
            Objective::CollectColor { color, .. } => color.as_str(),
            Objective::CreateSpecial { kind, .. } => kind.as_str(),
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    config: BoardConfig,
    mode: GameMode,
    /// Goals with their progress
    objectives: Vec<(Objective, u32)>,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    score: u32,
    moves_made: u32,
    best_combo: u32,
    last_round: Option<ScoreResult>,
    shuffles: u32,
    paused: bool,
    game_over: bool,
    won: bool,
    /// Board events not yet taken by an observer
    outbox: Vec<BoardEvent>,
}

impl GameState {
    pub fn new(config: BoardConfig, mode: GameMode) -> Result<Self, BoardError> {
        Ok(Self {
            board: Board::new(config)?,
            config,
            mode,
            objectives: Vec::new(),
            episode_id: 0,
            score: 0,
            moves_made: 0,
            best_combo: 0,
            last_round: None,
            shuffles: 0,
            paused: false,
            game_over: false,
            won: false,
            outbox: Vec::new(),
        })
    }

    /// Wrap a prepared board (fixtures, replays).
    pub fn from_board(board: Board, mode: GameMode) -> Self {
        Self {
            config: *board.config(),
            board,
            mode,
            objectives: Vec::new(),
            episode_id: 0,
            score: 0,
            moves_made: 0,
            best_combo: 0,
            last_round: None,
            shuffles: 0,
            paused: false,
            game_over: false,
            won: false,
            outbox: Vec::new(),
        }
    }

    pub fn with_objectives(mut self, objectives: impl IntoIterator<Item = Objective>) -> Self {
        self.objectives = objectives.into_iter().map(|o| (o, 0)).collect();
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves_made(&self) -> u32 {
        self.moves_made
    }

    pub fn moves_left(&self) -> Option<u32> {
        self.mode
            .move_limit()
            .map(|limit| limit.saturating_sub(self.moves_made))
    }

    pub fn best_combo(&self) -> u32 {
        self.best_combo
    }

    pub fn last_round(&self) -> Option<ScoreResult> {
        self.last_round
    }

    pub fn shuffles(&self) -> u32 {
        self.shuffles
    }

    pub fn objectives(&self) -> &[(Objective, u32)] {
        &self.objectives
    }

    pub fn objectives_complete(&self) -> bool {
        self.objectives.iter().all(|(o, done)| *done >= o.goal())
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn is_resolving(&self) -> bool {
        self.board.is_resolving()
    }

    /// Swaps are accepted only when running, not over and the board is Idle.
    pub fn playable(&self) -> bool {
        !self.paused && !self.game_over && !self.board.is_resolving()
    }

    /// Player swap. A paused or finished game ignores it (`Ok(false)`); a
    /// board mid-cascade refuses it with [`BoardError::Busy`].
    pub fn swap(&mut self, a: Pos, b: Pos) -> Result<bool, BoardError> {
        if self.paused || self.game_over {
            return Ok(false);
        }
        let accepted = self.board.swap(a, b)?;
        if accepted {
            self.moves_made += 1;
            self.last_round = None;
        }
        Ok(accepted)
    }

    /// Take one cascade transition and apply its consequences.
    pub fn advance(&mut self) -> Option<CascadeStep> {
        if self.paused {
            return None;
        }
        let step = self.board.step()?;
        if let CascadeStep::Resolved { depth, result } = &step {
            let round = calculate_round_score(result, *depth);
            self.score = self.score.saturating_add(round.total);
            self.last_round = Some(round);
        }
        self.collect_events();
        if self.board.phase() == CascadePhase::Idle {
            self.finish_cascade();
        }
        Some(step)
    }

    /// Advance until the board is Idle (or the game is paused).
    pub fn run_to_idle(&mut self) -> u32 {
        let mut steps = 0;
        while self.advance().is_some() {
            steps += 1;
        }
        steps
    }

    fn collect_events(&mut self) {
        for event in self.board.drain_events() {
            for (objective, progress) in &mut self.objectives {
                *progress = progress.saturating_add(objective.credit(&event));
            }
            self.outbox.push(event);
        }
    }

    fn finish_cascade(&mut self) {
        self.best_combo = self.best_combo.max(self.board.commit_combo());
        self.check_end();
        if !self.game_over && !has_valid_move(&self.board) {
            if self.board.shuffle().is_ok() {
                self.shuffles += 1;
            }
            self.collect_events();
        }
    }

    fn check_end(&mut self) {
        let out_of_moves = self.moves_left() == Some(0);
        match self.mode {
            GameMode::Endless => {}
            GameMode::Moves { .. } => {
                if out_of_moves {
                    self.game_over = true;
                    self.won = !self.objectives.is_empty() && self.objectives_complete();
                }
            }
            GameMode::Target { score, .. } => {
                if self.score >= score && self.objectives_complete() {
                    self.game_over = true;
                    self.won = true;
                } else if out_of_moves {
                    self.game_over = true;
                }
            }
        }
    }

    pub fn toggle_pause(&mut self) -> bool {
        if !self.game_over {
            self.paused = !self.paused;
        }
        self.paused
    }

    /// New board from the same config, seeded where the old RNG left off.
    pub fn restart(&mut self) -> Result<(), BoardError> {
        let config = self.config.with_seed(self.board.rng_state());
        let objectives: Vec<Objective> = self.objectives.iter().map(|(o, _)| *o).collect();
        let next_episode = self.episode_id.wrapping_add(1);
        *self = Self::new(config, self.mode)?.with_objectives(objectives);
        self.episode_id = next_episode;
        Ok(())
    }

    /// Session-level actions; cursor actions belong to the frontend.
    pub fn apply_action(&mut self, action: BoardAction) -> bool {
        match action {
            BoardAction::Pause => {
                self.toggle_pause();
                true
            }
            BoardAction::Restart => self.restart().is_ok(),
            _ => false,
        }
    }

    /// Board events since the last call, in emission order.
    pub fn drain_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.outbox)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        let grid = self.board.grid();
        out.clear();
        out.width = grid.width();
        out.height = grid.height();
        for pos in grid.positions() {
            out.cells[pos.y as usize][pos.x as usize] = grid.cell_code(pos);
        }
        out.board_hash = grid.fingerprint();
        out.phase = self.board.phase();
        out.combo = self.board.combo_depth();
        out.best_combo = self.best_combo;
        out.score = self.score;
        out.moves_made = self.moves_made;
        out.moves_left = self.moves_left();
        out.target_score = self.mode.target_score();
        out.objectives.extend(
            self.objectives
                .iter()
                .map(|&(objective, progress)| ObjectiveSnapshot {
                    objective,
                    progress,
                }),
        );
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.won = self.won;
        out.episode_id = self.episode_id;
        out.seed = self.config.seed;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut out = GameSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }
}
