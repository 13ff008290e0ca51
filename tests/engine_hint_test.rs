use tui_match3::core::{valid_swaps, Board, BoardConfig, GameMode, GameState, Grid};
use tui_match3::engine::{apply_hint, plan_best_swap, plan_hint, HintError};
use tui_match3::types::Pos;

const BASIC: [&str; 8] = [
    "RRRBGOYP", //
    "GOYRPGOY", //
    "BYOGBRPG", //
    "OPGYRBGO", //
    "YGBOPYRB", //
    "PBOGYRBP", //
    "GOYBRPOY", //
    "RYPOGBYR",
];

#[test]
fn hint_is_deterministic_and_leaves_board_untouched() {
    let board = Board::new(BoardConfig::default().with_seed(31337)).unwrap();
    let before = board.grid().fingerprint();

    let first = plan_best_swap(&board).unwrap();
    let second = plan_best_swap(&board).unwrap();
    assert_eq!(first, second);
    assert!(first.outcome.is_productive());
    assert!(first.removed >= 3);
    assert_eq!(board.grid().fingerprint(), before);
}

#[test]
fn hint_is_one_of_the_productive_swaps() {
    let board = Board::from_grid(Grid::from_ascii(&BASIC).unwrap(), BoardConfig::default());
    let hint = plan_best_swap(&board).unwrap();
    assert!(valid_swaps(&board)
        .iter()
        .any(|s| (s.a, s.b, s.outcome) == (hint.a, hint.b, hint.outcome)));
    assert_eq!(board.would_match_after_swap(hint.a, hint.b), Ok(true));
    assert!(hint.max_combo >= 1);
}

#[test]
fn applied_hint_counts_as_a_move() {
    let mut gs = GameState::new(BoardConfig::default().with_seed(5), GameMode::Moves { limit: 3 })
        .unwrap();
    let planned = plan_hint(&gs).unwrap();
    let played = apply_hint(&mut gs).unwrap();
    assert_eq!(planned, played);
    assert_eq!(gs.moves_left(), Some(2));
    assert!(gs.is_resolving());

    assert_eq!(plan_hint(&gs), Err(HintError::Busy));
    gs.run_to_idle();
    assert!(plan_hint(&gs).is_ok() || gs.game_over());
}

#[test]
fn finished_game_gets_no_hint() {
    let board = Board::from_grid(Grid::from_ascii(&BASIC).unwrap(), BoardConfig::default());
    let mut gs = GameState::from_board(board, GameMode::Moves { limit: 1 });
    gs.swap(Pos::new(3, 0), Pos::new(3, 1)).unwrap();
    gs.run_to_idle();
    assert!(gs.game_over());
    let err = plan_hint(&gs).unwrap_err();
    assert_eq!(err, HintError::NotPlayable);
    assert_eq!(err.code(), "not_playable");
}
