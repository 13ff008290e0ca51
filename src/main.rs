//! Terminal match-3 runner (default binary).
//!
//! Board and mode come from `MATCH3_*` environment variables (see
//! `core::config`). Board events are appended to `MATCH3_EVENT_LOG` when set.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tui_match3::app::App;
use tui_match3::core::{BoardConfig, GameMode, GameSnapshot, GameState};
use tui_match3::event_log::EventLog;
use tui_match3::input::{handle_key_event, should_quit};
use tui_match3::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_match3::types::TICK_MS;

fn main() -> Result<()> {
    let config = BoardConfig::from_env().inspect_err(|e| eprintln!("[Config] {}", e))?;
    let mode = GameMode::from_env().inspect_err(|e| eprintln!("[Config] {}", e))?;
    let state = GameState::new(config, mode)?;
    let mut log = EventLog::from_env();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, App::new(state), &mut log);

    // Always try to restore terminal state.
    let _ = term.exit();
    log.close();
    result
}

fn run(term: &mut TerminalRenderer, mut app: App, log: &mut EventLog) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        app.snapshot_into(&mut snap);
        view.render_into(&snap, &app.overlay(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        app.handle_action(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            app.tick(u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX));
        }

        let events = app.drain_events();
        if !events.is_empty() {
            log.record_all(app.state().episode_id(), &events);
        }
    }
}
