//! Match detector - finds runs of 3+ matchable tiles
//!
//! Detection runs in three passes over a settled grid:
//!
//! 1. **Horizontal**: each row is scanned left to right; a run extends while
//!    the next tile can match the run's anchor tile.
//! 2. **Vertical**: the same scan over columns, top to bottom.
//! 3. **Compound merge**: horizontal and vertical runs sharing a cell are merged
//!    into one compound (T/L) match, unioning their cells.
//!
//! Visited cells are tracked per orientation, so one tile can belong to both a
//! horizontal and a vertical run before the merge joins them.
//!
//! # Classification
//!
//! | Shape | Size | Special |
//! |-------|------|---------|
//! | line | 3 | none |
//! | line | 4 | rocket |
//! | line | 5+ | rainbow |
//! | compound | < 5 | none |
//! | compound | 5+ | bomb |

use crate::grid::Grid;
use crate::types::{
    Color, MatchShape, Orientation, Pos, SpecialKind, COMPOUND_BOMB_MIN, MIN_MATCH_LEN,
};

/// A detected match. References tiles by position only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    cells: Vec<Pos>,
    color: Color,
    shape: MatchShape,
    special: SpecialKind,
}

impl Match {
    fn line(cells: Vec<Pos>, color: Color, shape: MatchShape) -> Self {
        let special = classify_line(cells.len());
        Self {
            cells,
            color,
            shape,
            special,
        }
    }

    /// Member cells: scan order for lines; for compounds the horizontal
    /// members first, then the remaining vertical ones.
    pub fn cells(&self) -> &[Pos] {
        &self.cells
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn shape(&self) -> MatchShape {
        self.shape
    }

    /// The special tile this match spawns.
    pub fn special(&self) -> SpecialKind {
        self.special
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.cells.contains(&pos)
    }

    /// Line orientation (`None` for compounds).
    pub fn orientation(&self) -> Option<Orientation> {
        match self.shape {
            MatchShape::Horizontal => Some(Orientation::Horizontal),
            MatchShape::Vertical => Some(Orientation::Vertical),
            MatchShape::Compound => None,
        }
    }
}

/// Special kind for a straight run of `len` tiles.
pub fn classify_line(len: usize) -> SpecialKind {
    match len {
        0..=3 => SpecialKind::None,
        4 => SpecialKind::Rocket,
        _ => SpecialKind::Rainbow,
    }
}

/// Special kind for a compound match of `len` merged tiles.
pub fn classify_compound(len: usize) -> SpecialKind {
    if len >= COMPOUND_BOMB_MIN {
        SpecialKind::Bomb
    } else {
        SpecialKind::None
    }
}

/// Find every match on the grid.
///
/// The grid must be settled (no removal in progress). Returns horizontal
/// matches first, then vertical ones, with compounds reported at the position
/// of their first member run.
pub fn find_matches(grid: &Grid) -> Vec<Match> {
    let mut runs = scan_runs(grid, Orientation::Horizontal);
    runs.extend(scan_runs(grid, Orientation::Vertical));
    merge_compounds(runs)
}

/// True if any run of 3+ exists. Cheaper than [`find_matches`] because it
/// stops at the first run and allocates nothing.
pub fn has_any_match(grid: &Grid) -> bool {
    grid.positions().any(|pos| match grid.tile(pos) {
        Some(tile) => {
            let (h, v) = grid.line_lengths(pos, tile);
            h >= MIN_MATCH_LEN || v >= MIN_MATCH_LEN
        }
        None => false,
    })
}

fn scan_runs(grid: &Grid, orientation: Orientation) -> Vec<Match> {
    let (w, h) = (grid.width() as i8, grid.height() as i8);
    let (lines, span) = match orientation {
        Orientation::Horizontal => (h, w),
        Orientation::Vertical => (w, h),
    };
    let at = |line: i8, i: i8| match orientation {
        Orientation::Horizontal => Pos::new(i, line),
        Orientation::Vertical => Pos::new(line, i),
    };
    let shape = match orientation {
        Orientation::Horizontal => MatchShape::Horizontal,
        Orientation::Vertical => MatchShape::Vertical,
    };

    let mut visited = vec![false; grid.area()];
    let flat = |p: Pos| p.y as usize * w as usize + p.x as usize;
    let mut out = Vec::new();

    for line in 0..lines {
        let mut i = 0;
        while i < span {
            let start = at(line, i);
            let anchor = match grid.tile(start) {
                Some(t) if t.is_matchable() && !visited[flat(start)] => t,
                _ => {
                    i += 1;
                    continue;
                }
            };

            let mut end = i + 1;
            while end < span
                && grid
                    .tile(at(line, end))
                    .map_or(false, |t| anchor.can_match_with(t))
            {
                end += 1;
            }

            if (end - i) as usize >= MIN_MATCH_LEN {
                let cells: Vec<Pos> = (i..end).map(|k| at(line, k)).collect();
                for &p in &cells {
                    visited[flat(p)] = true;
                }
                out.push(Match::line(cells, anchor.color, shape));
            }
            i = end;
        }
    }
    out
}

/// Join perpendicular runs that share a cell.
///
/// Runs are grouped transitively, so a horizontal run crossed by two vertical
/// runs becomes a single compound. Parallel runs never share cells.
fn merge_compounds(runs: Vec<Match>) -> Vec<Match> {
    let n = runs.len();
    let mut parent: Vec<usize> = (0..n).collect();

    fn root(parent: &mut [usize], mut i: usize) -> usize {
        while parent[i] != i {
            parent[i] = parent[parent[i]];
            i = parent[i];
        }
        i
    }

    for a in 0..n {
        for b in (a + 1)..n {
            if runs[a].shape == runs[b].shape {
                continue;
            }
            if runs[a].cells.iter().any(|p| runs[b].contains(*p)) {
                let (ra, rb) = (root(&mut parent, a), root(&mut parent, b));
                if ra != rb {
                    // Keep the earliest run as the group root.
                    let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
                    parent[hi] = lo;
                }
            }
        }
    }

    let mut groups: Vec<Vec<usize>> = vec![Vec::new(); n];
    for i in 0..n {
        let r = root(&mut parent, i);
        groups[r].push(i);
    }

    let mut runs: Vec<Option<Match>> = runs.into_iter().map(Some).collect();
    let mut out = Vec::new();
    for members in groups.into_iter().filter(|g| !g.is_empty()) {
        if members.len() == 1 {
            if let Some(m) = runs[members[0]].take() {
                out.push(m);
            }
            continue;
        }

        let mut cells: Vec<Pos> = Vec::new();
        let mut color = None;
        for i in members {
            if let Some(run) = runs[i].take() {
                color.get_or_insert(run.color);
                for p in run.cells {
                    if !cells.contains(&p) {
                        cells.push(p);
                    }
                }
            }
        }
        if let Some(color) = color {
            let special = classify_compound(cells.len());
            out.push(Match {
                cells,
                color,
                shape: MatchShape::Compound,
                special,
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_classification_table() {
        assert_eq!(classify_line(3), SpecialKind::None);
        assert_eq!(classify_line(4), SpecialKind::Rocket);
        assert_eq!(classify_line(5), SpecialKind::Rainbow);
        assert_eq!(classify_line(7), SpecialKind::Rainbow);
        assert_eq!(classify_compound(4), SpecialKind::None);
        assert_eq!(classify_compound(5), SpecialKind::Bomb);
    }

    #[test]
    fn quiet_board_has_no_matches() {
        let grid = Grid::from_ascii(&["RGBO", "GBOR", "BORG", "ORGB"]).unwrap();
        assert!(find_matches(&grid).is_empty());
        assert!(!has_any_match(&grid));
    }

    #[test]
    fn horizontal_and_vertical_runs() {
        let grid = Grid::from_ascii(&[
            "RRRG", //
            "GBOB", //
            "OBYP", //
            "YBGO",
        ])
        .unwrap();
        let matches = find_matches(&grid);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].shape(), MatchShape::Horizontal);
        assert_eq!(matches[0].color(), Color::Red);
        assert_eq!(matches[1].shape(), MatchShape::Vertical);
        assert_eq!(matches[1].color(), Color::Blue);
        assert_eq!(matches[1].cells(), &[Pos::new(1, 1), Pos::new(1, 2), Pos::new(1, 3)]);
        assert!(has_any_match(&grid));
    }

    #[test]
    fn l_shape_merges_into_compound() {
        let grid = Grid::from_ascii(&[
            "RRRG", //
            "RBOB", //
            "RGYP", //
            "YBGO",
        ])
        .unwrap();
        let matches = find_matches(&grid);
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(m.shape(), MatchShape::Compound);
        assert_eq!(m.len(), 5);
        assert_eq!(m.special(), SpecialKind::Bomb);
        assert!(m.orientation().is_none());
    }

    #[test]
    fn rainbow_breaks_runs() {
        let grid = Grid::from_ascii(&["RR*RR", "GBOGB", "BOGBO"]).unwrap();
        assert!(find_matches(&grid).is_empty());
    }

    #[test]
    fn empty_cells_break_runs() {
        let grid = Grid::from_ascii(&["RR.RR", "GBOGB", "BOGBO"]).unwrap();
        assert!(find_matches(&grid).is_empty());
    }
}
