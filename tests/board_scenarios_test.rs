//! End-to-end board scenarios through the facade crate.

use tui_match3::core::{
    Board, BoardConfig, BoardError, BlockedCells, CascadeStep, Effect, Grid, RemovalCause,
    ResolutionResult, Tile, TileKind,
};
use tui_match3::types::{Color, MatchShape, Orientation, Pos, SpecialKind};

fn board(rows: &[&str]) -> Board {
    Board::from_grid(Grid::from_ascii(rows).unwrap(), BoardConfig::default())
}

/// Step once and return the resolving round.
fn resolve_round(board: &mut Board) -> ResolutionResult {
    match board.step() {
        Some(CascadeStep::Resolved { result, .. }) => result,
        other => panic!("expected a resolving round, got {other:?}"),
    }
}

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
fn basic_match_creates_rocket_at_swapped_in_cell() {
    let mut b = board(&BASIC);
    assert_eq!(b.swap(Pos::new(3, 0), Pos::new(3, 1)), Ok(true));

    let result = resolve_round(&mut b);
    assert_eq!(result.created.len(), 1);
    let created = result.created[0];
    assert_eq!(created.pos, Pos::new(3, 0));
    assert_eq!(created.kind, TileKind::Rocket(Orientation::Horizontal));
    assert_eq!(created.color, Color::Red);
    assert_eq!(created.match_size, 4);

    let mut removed: Vec<Pos> = result.removed.iter().map(|r| r.pos).collect();
    removed.sort_by_key(|p| p.x);
    assert_eq!(removed, vec![Pos::new(0, 0), Pos::new(1, 0), Pos::new(2, 0)]);
    assert!(result.removed.iter().all(|r| r.match_size == Some(4)));

    let rocket = b.grid().tile(Pos::new(3, 0)).unwrap();
    assert_eq!(rocket.kind, TileKind::Rocket(Orientation::Horizontal));
    assert_eq!(rocket.pos(), Pos::new(3, 0));
}

#[test]
fn rocket_in_a_match_clears_exactly_its_row() {
    let mut grid = Grid::from_ascii(&[
        "RGRBGOYP", //
        "GOYRPGOY", //
        "BYOGBRPG", //
        "RRRYRBGO", //
        "YGBOPYRB", //
        "PBOGYRBP", //
        "GOYBRPOY", //
        "RYPOGBYR",
    ])
    .unwrap();
    grid.set(
        Pos::new(2, 3),
        Some(Tile::rocket(Color::Red, Orientation::Horizontal)),
    )
    .unwrap();
    let mut b = Board::from_grid(grid, BoardConfig::default());

    let matches = b.find_matches();
    assert_eq!(matches.len(), 1);
    let result = b.resolve(&matches).unwrap();

    assert_eq!(result.removed.len(), 8);
    assert!(result.removed.iter().all(|r| r.pos.y == 3));
    assert_eq!(result.removed_by(RemovalCause::Match), 3);
    assert_eq!(result.removed_by(RemovalCause::Effect), 5);
    assert_eq!(result.effects.len(), 1);
    assert_eq!(
        result.effects[0].effect,
        Effect::Rocket {
            orientation: Orientation::Horizontal
        }
    );
    assert!(result.created.is_empty());
    for x in 0..8 {
        assert!(b.grid().is_empty_at(Pos::new(x, 3)));
    }
    assert_eq!(b.grid().empty_count(), 8);
}

#[test]
fn rocket_effect_area_is_its_row() {
    let grid = Grid::from_ascii(&BASIC).unwrap();
    let cells = Effect::Rocket {
        orientation: Orientation::Horizontal,
    }
    .affected_cells(&grid, Pos::new(2, 3));
    assert_eq!(cells, (0..8).map(|x| Pos::new(x, 3)).collect::<Vec<_>>());
}

#[test]
fn bomb_pair_clears_five_by_five() {
    let mut grid = Grid::from_ascii(&[
        "RGBOYPRG", //
        "GBOYPRGB", //
        "BOYPRGBO", //
        "OYPRGBOY", //
        "YPRGBOYP", //
        "PRGBOYPR", //
        "RGBOYPRG", //
        "GBOYPRGB",
    ])
    .unwrap();
    grid.set(Pos::new(3, 3), Some(Tile::bomb(Color::Red, 1))).unwrap();
    grid.set(Pos::new(3, 4), Some(Tile::bomb(Color::Green, 1))).unwrap();
    let mut b = Board::from_grid(grid, BoardConfig::default());

    assert_eq!(b.swap(Pos::new(3, 3), Pos::new(3, 4)), Ok(true));
    let result = resolve_round(&mut b);

    let mut removed: Vec<Pos> = result.removed.iter().map(|r| r.pos).collect();
    removed.sort_by_key(|p| (p.y, p.x));
    let mut expected = Vec::new();
    for y in 1..=5 {
        for x in 1..=5 {
            expected.push(Pos::new(x, y));
        }
    }
    assert_eq!(removed, expected);
    assert!(result.removed.iter().all(|r| r.match_size.is_none()));
    assert_eq!(result.effects[0].effect, Effect::BombBomb { radius: 2 });
}

#[test]
fn bomb_pair_near_corner_is_clipped() {
    let mut grid = Grid::from_ascii(&["RGBO", "GBOY", "BOYP", "OYPR"]).unwrap();
    grid.set(Pos::new(0, 0), Some(Tile::bomb(Color::Red, 1))).unwrap();
    grid.set(Pos::new(1, 0), Some(Tile::bomb(Color::Green, 1))).unwrap();
    let mut b = Board::from_grid(grid, BoardConfig::default());
    b.swap(Pos::new(0, 0), Pos::new(1, 0)).unwrap();
    let result = resolve_round(&mut b);
    assert_eq!(result.removed.len(), 9);
    assert!(result
        .removed
        .iter()
        .all(|r| r.pos.x <= 2 && r.pos.y <= 2));
}

#[test]
fn rainbow_is_never_auto_matched() {
    let grid = Grid::from_ascii(&[
        "RR*RRG", //
        "GBOYPB", //
        "BOYPGO",
    ])
    .unwrap();
    let mut b = Board::from_grid(grid.clone(), BoardConfig::default());
    assert!(b.find_matches().is_empty());
    assert_eq!(b.step(), None);
    assert_eq!(b.grid(), &grid);

    // Only an explicit swap fires it, clearing the partner's color.
    assert_eq!(b.swap(Pos::new(2, 0), Pos::new(2, 1)), Ok(true));
    let result = resolve_round(&mut b);
    let mut removed: Vec<Pos> = result.removed.iter().map(|r| r.pos).collect();
    removed.sort_by_key(|p| (p.y, p.x));
    assert_eq!(
        removed,
        vec![
            Pos::new(2, 0),
            Pos::new(2, 1),
            Pos::new(1, 2),
            Pos::new(5, 2),
        ]
    );
    assert!(result
        .removed
        .iter()
        .any(|r| r.kind == TileKind::Rainbow));
    assert!(result
        .removed
        .iter()
        .filter(|r| r.kind != TileKind::Rainbow)
        .all(|r| r.color == Color::Orange));
}

#[test]
fn run_of_five_creates_rainbow() {
    let mut b = board(&["RRBRRG", "GOROYB", "BYOGBP"]);
    assert_eq!(b.swap(Pos::new(2, 0), Pos::new(2, 1)), Ok(true));
    let result = resolve_round(&mut b);
    assert_eq!(result.created.len(), 1);
    assert_eq!(result.created[0].pos, Pos::new(2, 0));
    assert_eq!(result.created[0].kind, TileKind::Rainbow);
    assert_eq!(result.removed.len(), 4);
}

#[test]
fn perpendicular_runs_merge_into_a_bomb() {
    let grid = Grid::from_ascii(&["GBRYO", "OYRBG", "YRBRO", "BGRGY"]).unwrap();
    let mut swapped = grid.clone();
    swapped.swap(Pos::new(2, 2), Pos::new(2, 3)).unwrap();

    let matches = tui_match3::core::find_matches(&swapped);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].shape(), MatchShape::Compound);
    assert_eq!(matches[0].len(), 5);
    assert_eq!(matches[0].special(), SpecialKind::Bomb);

    let mut b = Board::from_grid(grid, BoardConfig::default());
    assert_eq!(b.swap(Pos::new(2, 2), Pos::new(2, 3)), Ok(true));
    let result = resolve_round(&mut b);
    assert_eq!(result.created.len(), 1);
    assert_eq!(result.created[0].pos, Pos::new(2, 2));
    assert_eq!(result.created[0].kind, TileKind::Bomb { radius: 1 });
    assert_eq!(result.removed.len(), 4);
}

#[test]
fn completed_cascade_leaves_no_matches() {
    for seed in 1..20 {
        let mut b = Board::new(BoardConfig::default().with_seed(seed)).unwrap();
        let swaps = tui_match3::core::valid_swaps(&b);
        let first = swaps[0];
        assert_eq!(b.swap(first.a, first.b), Ok(true));
        let report = b.run_to_idle();
        assert!(report.rounds >= 1);
        assert!(b.find_matches().is_empty());
        assert!(b.grid().positions_consistent());
        assert_eq!(b.grid().empty_count(), 0);
    }
}

#[test]
fn invalid_requests_are_distinct_errors() {
    let mut b = board(&BASIC);
    let before = b.grid().fingerprint();

    assert!(matches!(
        b.swap(Pos::new(-1, 0), Pos::new(0, 0)),
        Err(BoardError::InvalidPosition { .. })
    ));
    assert!(matches!(
        b.swap(Pos::new(7, 7), Pos::new(8, 7)),
        Err(BoardError::InvalidPosition { .. })
    ));
    assert!(matches!(
        b.swap(Pos::new(0, 0), Pos::new(2, 0)),
        Err(BoardError::NotAdjacent { .. })
    ));
    assert!(matches!(
        b.would_match_after_swap(Pos::new(0, 0), Pos::new(1, 1)),
        Err(BoardError::NotAdjacent { .. })
    ));
    assert_eq!(b.grid().fingerprint(), before);

    let empty = b.resolve(&[]).unwrap();
    assert!(empty.is_empty());
    assert_eq!(b.grid().fingerprint(), before);
}

#[test]
fn predicate_matches_swap_outcome() {
    let b = board(&BASIC);
    let before = b.grid().fingerprint();
    assert_eq!(
        b.would_match_after_swap(Pos::new(3, 0), Pos::new(3, 1)),
        Ok(true)
    );
    assert_eq!(
        b.would_match_after_swap(Pos::new(6, 6), Pos::new(7, 6)),
        Ok(false)
    );
    assert_eq!(b.grid().fingerprint(), before);
}

#[test]
fn blocked_cells_stay_empty_after_refill() {
    let mut b = board(&["RRRG", "GBOY", "BOYP", "OYPR"]);
    let blocked = Pos::new(1, 0);
    b.set_hook(Box::new(BlockedCells::new([blocked])));

    let matches = b.find_matches();
    b.resolve(&matches).unwrap();
    let moves = b.apply_gravity().unwrap();

    assert!(b.grid().is_empty_at(blocked));
    assert_eq!(b.grid().empty_count(), 1);
    assert!(moves.iter().all(|m| !(m.spawned && m.x == 1)));
    assert_eq!(moves.iter().filter(|m| m.spawned).count(), 2);
    assert!(moves.iter().filter(|m| m.spawned).all(|m| m.from_y == -1));
}

#[test]
fn tiles_never_fall_through_a_blocked_cell() {
    let mut b = board(&["RGBO", "Y.PG", "BOYP", "GRRR"]);
    let blocked = Pos::new(1, 1);
    b.set_hook(Box::new(BlockedCells::new([blocked])));

    let matches = b.find_matches();
    b.resolve(&matches).unwrap();
    let moves = b.apply_gravity().unwrap();

    assert!(b.grid().is_empty_at(blocked));
    assert_eq!(b.grid().tile(Pos::new(1, 0)).map(|t| t.color), Some(Color::Green));
    assert_eq!(b.grid().empty_count(), 1);
    let col1: Vec<_> = moves.iter().filter(|m| m.x == 1).collect();
    assert_eq!(col1.len(), 2);
    assert!(col1.iter().all(|m| m.from_y >= blocked.y));
}

#[test]
fn fresh_board_with_blocked_cell_is_already_settled() {
    let blocked = Pos::new(1, 1);
    let mut b = Board::with_hook(
        BoardConfig::default().with_seed(3),
        Box::new(BlockedCells::new([blocked])),
    )
    .unwrap();
    assert!(b.grid().is_empty_at(blocked));
    assert!(!b.grid().is_empty_at(Pos::new(1, 0)));

    let before = b.grid().fingerprint();
    let moves = b.apply_gravity().unwrap();
    assert!(moves.is_empty());
    assert!(b.grid().is_empty_at(blocked));
    assert_eq!(b.grid().fingerprint(), before);
}

#[test]
fn same_seed_same_game() {
    let play = || {
        let mut b = Board::new(BoardConfig::default().with_seed(4242)).unwrap();
        for _ in 0..5 {
            let Some(s) = tui_match3::core::valid_swaps(&b).first().copied() else {
                break;
            };
            b.swap(s.a, s.b).unwrap();
            b.run_to_idle();
        }
        b.grid().to_ascii()
    };
    assert_eq!(play(), play());
}
