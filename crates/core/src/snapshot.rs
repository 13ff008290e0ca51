use crate::game_state::{GameState, Objective};
use crate::types::{CascadePhase, MAX_BOARD_DIM};

/// Flat per-cell codes (see [`Grid::cell_code`](crate::grid::Grid::cell_code)).
pub type CellCodes = [[u8; MAX_BOARD_DIM as usize]; MAX_BOARD_DIM as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectiveSnapshot {
    pub objective: Objective,
    pub progress: u32,
}

/// Read-only copy of everything a view needs, refreshed in place each frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    pub cells: CellCodes,
    pub board_hash: u64,
    pub phase: CascadePhase,
    pub combo: u32,
    pub best_combo: u32,
    pub score: u32,
    pub moves_made: u32,
    pub moves_left: Option<u32>,
    pub target_score: Option<u32>,
    pub objectives: Vec<ObjectiveSnapshot>,
    pub paused: bool,
    pub game_over: bool,
    pub won: bool,
    pub episode_id: u32,
    pub seed: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.width = 0;
        self.height = 0;
        self.cells = [[0u8; MAX_BOARD_DIM as usize]; MAX_BOARD_DIM as usize];
        self.board_hash = 0;
        self.phase = CascadePhase::Idle;
        self.combo = 0;
        self.best_combo = 0;
        self.score = 0;
        self.moves_made = 0;
        self.moves_left = None;
        self.target_score = None;
        self.objectives.clear();
        self.paused = false;
        self.game_over = false;
        self.won = false;
        self.episode_id = 0;
        self.seed = 0;
    }

    pub fn cell(&self, x: u8, y: u8) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.cells[y as usize][x as usize]
    }

    /// Accepting swaps right now.
    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused && self.phase == CascadePhase::Idle
    }

    pub fn fill_from(&mut self, state: &GameState) {
        state.snapshot_into(self);
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            cells: [[0u8; MAX_BOARD_DIM as usize]; MAX_BOARD_DIM as usize],
            board_hash: 0,
            phase: CascadePhase::Idle,
            combo: 0,
            best_combo: 0,
            score: 0,
            moves_made: 0,
            moves_left: None,
            target_score: None,
            objectives: Vec::new(),
            paused: false,
            game_over: false,
            won: false,
            episode_id: 0,
            seed: 0,
        }
    }
}
