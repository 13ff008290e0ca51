//! Frontend state around one [`GameState`]: cursor, selection, hint, and the
//! pacing that turns wall-clock time into cascade steps.
//!
//! The core never looks at the clock. [`App::tick`] is handed elapsed
//! milliseconds and advances the board one transition per
//! [`CASCADE_STEP_MS`], so a cascade plays out visibly.

use crate::core::{BoardEvent, GameSnapshot, GameState};
use crate::engine::{plan_hint, Hint};
use crate::term::BoardOverlay;
use crate::types::{BoardAction, Pos, CASCADE_STEP_MS};

pub struct App {
    state: GameState,
    cursor: Pos,
    selected: Option<Pos>,
    hint: Option<Hint>,
    /// Elapsed time not yet spent on a cascade step
    step_accum_ms: u32,
    status: Option<&'static str>,
}

impl App {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            cursor: Pos::new(0, 0),
            selected: None,
            hint: None,
            step_accum_ms: 0,
            status: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn cursor(&self) -> Pos {
        self.cursor
    }

    pub fn selected(&self) -> Option<Pos> {
        self.selected
    }

    pub fn hint(&self) -> Option<&Hint> {
        self.hint.as_ref()
    }

    /// Short code describing why the last action did nothing.
    pub fn status(&self) -> Option<&'static str> {
        self.status
    }

    pub fn overlay(&self) -> BoardOverlay {
        BoardOverlay {
            cursor: Some(self.cursor),
            selected: self.selected,
            hint: self.hint.map(|h| (h.a, h.b)),
        }
    }

    /// Apply one input action. Returns true when visible state changed.
    pub fn handle_action(&mut self, action: BoardAction) -> bool {
        self.status = None;
        match action {
            BoardAction::CursorLeft => self.move_cursor(-1, 0),
            BoardAction::CursorRight => self.move_cursor(1, 0),
            BoardAction::CursorUp => self.move_cursor(0, -1),
            BoardAction::CursorDown => self.move_cursor(0, 1),
            BoardAction::Select => self.select(),
            BoardAction::Cancel => {
                let changed = self.selected.is_some() || self.hint.is_some();
                self.selected = None;
                self.hint = None;
                changed
            }
            BoardAction::Hint => match plan_hint(&self.state) {
                Ok(hint) => {
                    self.hint = Some(hint);
                    true
                }
                Err(e) => {
                    self.status = Some(e.code());
                    false
                }
            },
            BoardAction::Pause => self.state.apply_action(action),
            BoardAction::Restart => {
                if !self.state.apply_action(action) {
                    self.status = Some("restart_failed");
                    return false;
                }
                self.selected = None;
                self.hint = None;
                self.step_accum_ms = 0;
                self.clamp_cursor();
                true
            }
        }
    }

    fn move_cursor(&mut self, dx: i8, dy: i8) -> bool {
        let board = self.state.board();
        let next = self.cursor.offset(dx, dy);
        if next.x < 0 || next.y < 0 || next.x >= board.width() as i8 || next.y >= board.height() as i8 {
            return false;
        }
        self.cursor = next;
        true
    }

    fn clamp_cursor(&mut self) {
        let board = self.state.board();
        self.cursor = Pos::new(
            self.cursor.x.clamp(0, board.width() as i8 - 1),
            self.cursor.y.clamp(0, board.height() as i8 - 1),
        );
    }

    /// First press selects; a press on a neighbour swaps; a press elsewhere
    /// moves the selection.
    fn select(&mut self) -> bool {
        if !self.state.playable() {
            self.status = Some(if self.state.is_resolving() {
                "busy"
            } else {
                "not_playable"
            });
            return false;
        }
        let Some(from) = self.selected else {
            self.selected = Some(self.cursor);
            return true;
        };
        if from == self.cursor {
            self.selected = None;
            return true;
        }
        if !from.is_adjacent(self.cursor) {
            self.selected = Some(self.cursor);
            return true;
        }

        self.selected = None;
        match self.state.swap(from, self.cursor) {
            Ok(true) => {
                self.hint = None;
                self.step_accum_ms = 0;
            }
            Ok(false) => self.status = Some("no_match"),
            Err(e) => self.status = Some(e.code()),
        }
        true
    }

    /// Spend `elapsed_ms` on cascade steps. Returns the number of steps taken.
    pub fn tick(&mut self, elapsed_ms: u32) -> u32 {
        if self.state.paused() || !self.state.is_resolving() {
            self.step_accum_ms = 0;
            return 0;
        }
        self.step_accum_ms = self.step_accum_ms.saturating_add(elapsed_ms);
        let mut steps = 0;
        while self.step_accum_ms >= CASCADE_STEP_MS && self.state.advance().is_some() {
            self.step_accum_ms -= CASCADE_STEP_MS;
            steps += 1;
        }
        if !self.state.is_resolving() {
            self.step_accum_ms = 0;
        }
        steps
    }

    pub fn drain_events(&mut self) -> Vec<BoardEvent> {
        self.state.drain_events()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.state.snapshot_into(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, BoardConfig, GameMode, Grid};

    fn app(rows: &[&str]) -> App {
        let board = Board::from_grid(Grid::from_ascii(rows).unwrap(), BoardConfig::default());
        App::new(GameState::from_board(board, GameMode::Endless))
    }

    #[test]
    fn cursor_stays_on_the_board() {
        let mut a = app(&["RGB", "GBR", "BRG"]);
        assert!(!a.handle_action(BoardAction::CursorLeft));
        assert!(!a.handle_action(BoardAction::CursorUp));
        assert!(a.handle_action(BoardAction::CursorRight));
        assert!(a.handle_action(BoardAction::CursorRight));
        assert!(!a.handle_action(BoardAction::CursorRight));
        assert_eq!(a.cursor(), Pos::new(2, 0));
    }

    #[test]
    fn select_then_neighbour_swaps() {
        let mut a = app(&["RRBO", "GORY", "BYOG"]);
        a.handle_action(BoardAction::CursorRight);
        a.handle_action(BoardAction::CursorRight);
        a.handle_action(BoardAction::Select);
        assert_eq!(a.selected(), Some(Pos::new(2, 0)));

        a.handle_action(BoardAction::CursorDown);
        assert!(a.handle_action(BoardAction::Select));
        assert_eq!(a.selected(), None);
        assert_eq!(a.status(), None);
        assert!(a.state().is_resolving());
        assert_eq!(a.state().moves_made(), 1);

        // Input is refused mid-cascade.
        assert!(!a.handle_action(BoardAction::Select));
        assert_eq!(a.status(), Some("busy"));
    }

    #[test]
    fn unproductive_swap_reports_no_match() {
        let mut a = app(&["RGB", "GBR", "BRG"]);
        a.handle_action(BoardAction::Select);
        a.handle_action(BoardAction::CursorRight);
        a.handle_action(BoardAction::Select);
        assert_eq!(a.status(), Some("no_match"));
        assert_eq!(a.state().moves_made(), 0);
    }

    #[test]
    fn tick_paces_cascade_steps() {
        let mut a = app(&["RRBO", "GORY", "BYOG"]);
        a.state.swap(Pos::new(2, 0), Pos::new(2, 1)).unwrap();

        assert_eq!(a.tick(CASCADE_STEP_MS - 1), 0);
        assert_eq!(a.tick(1), 1);
        assert_eq!(a.tick(CASCADE_STEP_MS / 2), 0);

        let mut guard = 0;
        while a.state().is_resolving() {
            a.tick(CASCADE_STEP_MS);
            guard += 1;
            assert!(guard < 1000);
        }
        assert_eq!(a.tick(CASCADE_STEP_MS * 4), 0);
        assert!(a.state().score() > 0);
    }

    #[test]
    fn pause_freezes_pacing() {
        let mut a = app(&["RRBO", "GORY", "BYOG"]);
        a.state.swap(Pos::new(2, 0), Pos::new(2, 1)).unwrap();
        assert!(a.handle_action(BoardAction::Pause));
        assert_eq!(a.tick(CASCADE_STEP_MS * 3), 0);
        assert!(a.state().is_resolving());
        a.handle_action(BoardAction::Pause);
        assert_eq!(a.tick(CASCADE_STEP_MS), 1);
    }

    #[test]
    fn hint_shows_in_overlay_until_cancelled() {
        let mut a = app(&["RRBO", "GORY", "BYOG"]);
        assert!(a.handle_action(BoardAction::Hint));
        let overlay = a.overlay();
        assert_eq!(overlay.hint, Some((Pos::new(2, 0), Pos::new(2, 1))));
        assert!(a.handle_action(BoardAction::Cancel));
        assert_eq!(a.overlay().hint, None);
    }
}
