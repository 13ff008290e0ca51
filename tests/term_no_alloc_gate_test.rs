use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tui_match3::core::{valid_swaps, BoardConfig, GameMode, GameSnapshot, GameState, Objective};
use tui_match3::term::{BoardOverlay, FrameBuffer, GameView, Viewport};
use tui_match3::types::{Color, Pos, SpecialKind};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = layout;
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = (layout, new_size);
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

#[test]
fn term_game_view_render_is_allocation_free_after_warmup() {
    let view = GameView::default();
    let viewport = Viewport::new(80, 24);
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);

    let mut gs = GameState::new(BoardConfig::default().with_seed(1), GameMode::Moves { limit: 30 })
        .unwrap()
        .with_objectives([
            Objective::CollectColor {
                color: Color::Red,
                count: 30,
            },
            Objective::CreateSpecial {
                kind: SpecialKind::Bomb,
                count: 2,
            },
        ]);
    let overlay = BoardOverlay {
        cursor: Some(Pos::new(3, 3)),
        selected: Some(Pos::new(3, 4)),
        hint: Some((Pos::new(0, 0), Pos::new(1, 0))),
    };

    // Warm-up (resize/initial clears).
    let mut snap = GameSnapshot::default();
    gs.snapshot_into(&mut snap);
    view.render_into(&snap, &overlay, viewport, &mut fb);

    let mut allocs = 0;
    for _ in 0..200 {
        // Board work allocates; only the frame path is counted.
        if gs.advance().is_none() {
            if let Some(s) = valid_swaps(gs.board()).first().copied() {
                let _ = gs.swap(s.a, s.b);
            }
        }
        allocs += with_alloc_counting(|| {
            gs.snapshot_into(&mut snap);
            view.render_into(&snap, &overlay, viewport, &mut fb);
        });
    }

    assert_eq!(allocs, 0);
}
