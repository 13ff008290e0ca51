//! Keyboard-driven session from key press to event log line.

use crossterm::event::{KeyCode, KeyEvent};

use tui_match3::app::App;
use tui_match3::core::{Board, BoardConfig, GameMode, GameState, Grid};
use tui_match3::event_log::EventLog;
use tui_match3::input::handle_key_event;
use tui_match3::types::{Pos, CASCADE_STEP_MS};

fn basic_app() -> App {
    let grid = Grid::from_ascii(&[
        "RRRBGOYP", //
        "GOYRPGOY", //
        "BYOGBRPG", //
        "OPGYRBGO", //
        "YGBOPYRB", //
        "PBOGYRBP", //
        "GOYBRPOY", //
        "RYPOGBYR",
    ])
    .unwrap();
    let board = Board::from_grid(grid, BoardConfig::default());
    App::new(GameState::from_board(board, GameMode::Moves { limit: 20 }))
}

fn press(app: &mut App, code: KeyCode) {
    if let Some(action) = handle_key_event(KeyEvent::from(code)) {
        app.handle_action(action);
    }
}

#[test]
fn keyboard_swap_runs_the_cascade_and_logs_it() {
    let mut app = basic_app();
    for _ in 0..3 {
        press(&mut app, KeyCode::Right);
    }
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.selected(), Some(Pos::new(3, 0)));
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.selected(), None);
    assert_eq!(app.status(), None);
    assert!(app.state().is_resolving());
    assert_eq!(app.state().moves_left(), Some(19));

    // Input while the cascade runs is refused.
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.status(), Some("busy"));

    let mut ticks = 0;
    while app.state().is_resolving() {
        app.tick(CASCADE_STEP_MS);
        ticks += 1;
        assert!(ticks < 1000, "cascade never settled");
    }
    assert!(app.state().score() > 0);

    let path = std::env::temp_dir().join(format!("match3-events-{}.jsonl", std::process::id()));
    let _ = std::fs::remove_file(&path);
    let mut log = EventLog::open(&path).unwrap();
    let events = app.drain_events();
    log.record_all(app.state().episode_id(), &events);
    assert_eq!(log.seq(), events.len() as u64);
    log.close();

    let text = std::fs::read_to_string(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    let lines: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), events.len());
    assert_eq!(lines[0]["event"]["type"], "combo_depth");
    assert_eq!(lines[0]["seq"], 1);
    assert!(lines
        .iter()
        .any(|l| l["event"]["type"] == "special_created"));
    assert!(lines
        .iter()
        .any(|l| l["event"]["type"] == "cascade_finished"));
    assert!(lines.iter().all(|l| l["episode"] == 0));
}

#[test]
fn pause_key_freezes_the_cascade() {
    let mut app = basic_app();
    app.handle_action(tui_match3::types::BoardAction::CursorRight);
    for code in [KeyCode::Right, KeyCode::Right, KeyCode::Enter, KeyCode::Down, KeyCode::Enter] {
        press(&mut app, code);
    }
    assert!(app.state().is_resolving());

    press(&mut app, KeyCode::Char('p'));
    assert_eq!(app.tick(CASCADE_STEP_MS * 10), 0);
    assert!(app.state().is_resolving());

    press(&mut app, KeyCode::Char('p'));
    assert!(app.tick(CASCADE_STEP_MS) >= 1);
}
