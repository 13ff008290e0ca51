use tui_match3::core::{BoardConfig, GameMode, GameState, Objective};
use tui_match3::term::{AnchorY, BoardOverlay, FrameBuffer, GameView, Viewport};
use tui_match3::types::{Color, Pos};

fn state() -> GameState {
    GameState::new(BoardConfig::default().with_seed(1), GameMode::Endless).unwrap()
}

fn screen_text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        all.push_str(&fb.row_text(y));
        all.push('\n');
    }
    all
}

#[test]
fn term_view_renders_border_corners() {
    let snap = state().snapshot();
    let view = GameView::default();

    // 8 cells of 2 columns plus border => 18 wide, 8 rows plus border => 10 tall.
    assert_eq!(view.frame_size(&snap), (18, 10));
    let fb = view.render(&snap, &BoardOverlay::default(), Viewport::new(18, 10));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(17, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 9).unwrap().ch, '└');
    assert_eq!(fb.get(17, 9).unwrap().ch, '┘');
}

#[test]
fn term_view_draws_every_tile_two_columns_wide() {
    let snap = state().snapshot();
    let fb = GameView::default().render(&snap, &BoardOverlay::default(), Viewport::new(18, 10));

    for y in 0..8u16 {
        for x in 0..8u16 {
            let left = fb.get(1 + x * 2, 1 + y).unwrap().ch;
            let right = fb.get(2 + x * 2, 1 + y).unwrap().ch;
            assert_ne!(left, ' ');
            assert_ne!(right, ' ');
            assert_ne!(left, '·', "settled board has no holes");
        }
    }
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let gs = state().with_objectives([Objective::CollectColor {
        color: Color::Red,
        count: 20,
    }]);
    let mut snap = gs.snapshot();
    snap.score = 1234;

    let fb = GameView::default().render(&snap, &BoardOverlay::default(), Viewport::new(60, 24));
    let all = screen_text(&fb);
    assert!(all.contains("SCORE"));
    assert!(all.contains("1234"));
    assert!(all.contains("MOVES"));
    assert!(all.contains("GOALS"));
    assert!(all.contains("0/20"));
}

#[test]
fn term_view_skips_panel_on_narrow_viewports() {
    let snap = state().snapshot();
    let fb = GameView::default().render(&snap, &BoardOverlay::default(), Viewport::new(18, 10));
    assert!(!screen_text(&fb).contains("SCORE"));
}

#[test]
fn term_view_shows_pause_and_result_overlays() {
    let view = GameView::default();
    let vp = Viewport::new(18, 10);

    let mut snap = state().snapshot();
    snap.paused = true;
    assert!(screen_text(&view.render(&snap, &BoardOverlay::default(), vp)).contains("PAUSED"));

    snap.paused = false;
    snap.game_over = true;
    assert!(screen_text(&view.render(&snap, &BoardOverlay::default(), vp)).contains("GAME OVER"));

    snap.won = true;
    let text = screen_text(&view.render(&snap, &BoardOverlay::default(), vp));
    assert!(text.contains("CLEAR"));
    assert!(!text.contains("GAME OVER"));
}

#[test]
fn term_view_highlights_cursor_and_selection() {
    let snap = state().snapshot();
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let vp = Viewport::new(18, 10);

    let plain = view.render(&snap, &BoardOverlay::default(), vp);
    let overlay = BoardOverlay {
        cursor: Some(Pos::new(2, 2)),
        selected: Some(Pos::new(5, 5)),
        hint: None,
    };
    let marked = view.render(&snap, &overlay, vp);

    let (cx, cy) = view.cell_origin(&snap, vp, Pos::new(2, 2));
    let (sx, sy) = view.cell_origin(&snap, vp, Pos::new(5, 5));
    let cursor_bg = marked.get(cx, cy).unwrap().style.bg;
    let selected_bg = marked.get(sx, sy).unwrap().style.bg;
    assert_ne!(cursor_bg, plain.get(cx, cy).unwrap().style.bg);
    assert_ne!(selected_bg, plain.get(sx, sy).unwrap().style.bg);
    assert_ne!(cursor_bg, selected_bg);

    // Untouched cells keep their look.
    let (ox, oy) = view.cell_origin(&snap, vp, Pos::new(0, 7));
    assert_eq!(marked.get(ox, oy), plain.get(ox, oy));
}

#[test]
fn term_view_centers_board_by_default_on_tall_viewports() {
    let snap = state().snapshot();
    let view = GameView::default();

    // start_y = (20 - 10) / 2 = 5
    let fb = view.render(&snap, &BoardOverlay::default(), Viewport::new(18, 20));
    assert_eq!(fb.get(0, 5).unwrap().ch, '┌');

    let top = view.with_anchor_y(AnchorY::Top);
    let fb = top.render(&snap, &BoardOverlay::default(), Viewport::new(18, 20));
    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
}
