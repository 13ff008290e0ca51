//! Resolution engine - turns matches and swap effects into grid changes
//!
//! Resolution is split in two:
//!
//! - **Planning** ([`plan_resolution`], [`plan_swap_effect`]) reads the grid and
//!   decides which cells are removed, where specials are created and which
//!   existing specials activate. Planning never mutates.
//! - **Applying** ([`apply_plan`]) performs the removals and creations and
//!   reports what happened.
//!
//! # Rules
//!
//! - Each match with a special kind gets one creation cell: the most recently
//!   moved cell inside the match, else the member nearest the centroid
//!   (compound), else the middle member (line).
//! - Creation cells are protected: they are never removed, not even by an
//!   activation from elsewhere.
//! - Rockets and bombs caught in a match activate; rockets and bombs caught in
//!   an activation area activate too (chain reaction). A rainbow caught in an
//!   area is removed without firing, since it has no partner color.

use std::collections::VecDeque;

use crate::detect::Match;
use crate::effects::{conversion_targets, Effect};
use crate::grid::Grid;
use crate::tile::{Tile, TileKind};
use crate::types::{Color, Orientation, Pos, SpecialKind};

/// Why a tile left the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemovalCause {
    /// Member of a line or compound match
    Match,
    /// Inside the area of an activation or combination
    Effect,
}

impl RemovalCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemovalCause::Match => "match",
            RemovalCause::Effect => "effect",
        }
    }
}

/// A tile removed during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovedTile {
    pub pos: Pos,
    pub color: Color,
    pub kind: TileKind,
    /// Size of the match this removal traces back to (`None` for removals
    /// caused by a player-swapped combination).
    pub match_size: Option<usize>,
    pub cause: RemovalCause,
}

/// A special tile placed by resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedSpecial {
    pub pos: Pos,
    pub color: Color,
    pub kind: TileKind,
    pub match_size: usize,
}

/// One activation: where it fired, what it was, what it hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedEffect {
    pub origin: Pos,
    pub effect: Effect,
    pub affected: Vec<Pos>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedRemoval {
    pub pos: Pos,
    pub match_size: Option<usize>,
    pub cause: RemovalCause,
}

/// Everything a resolution will do, computed without touching the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionPlan {
    /// Tiles changing kind before anything is removed (rainbow + rocket)
    pub conversions: Vec<(Pos, TileKind)>,
    /// Raster order
    pub removals: Vec<PlannedRemoval>,
    pub creations: Vec<CreatedSpecial>,
    /// Firing order
    pub effects: Vec<AppliedEffect>,
}

impl ResolutionPlan {
    pub fn is_empty(&self) -> bool {
        self.removals.is_empty() && self.creations.is_empty() && self.conversions.is_empty()
    }
}

/// What a resolution did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionResult {
    pub removed: Vec<RemovedTile>,
    pub created: Vec<CreatedSpecial>,
    pub effects: Vec<AppliedEffect>,
}

impl ResolutionResult {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.created.is_empty()
    }

    pub fn removed_by(&self, cause: RemovalCause) -> usize {
        self.removed.iter().filter(|r| r.cause == cause).count()
    }
}

/// Per-cell bookkeeping for one plan.
struct Marks {
    width: usize,
    removal: Vec<Option<(Option<usize>, RemovalCause)>>,
    protected: Vec<bool>,
    activated: Vec<bool>,
}

impl Marks {
    fn new(grid: &Grid) -> Self {
        Self {
            width: grid.width() as usize,
            removal: vec![None; grid.area()],
            protected: vec![false; grid.area()],
            activated: vec![false; grid.area()],
        }
    }

    fn idx(&self, pos: Pos) -> usize {
        pos.y as usize * self.width + pos.x as usize
    }

    /// First mark wins: a cell removed by a match keeps its match cause.
    fn remove(&mut self, pos: Pos, match_size: Option<usize>, cause: RemovalCause) {
        let i = self.idx(pos);
        if !self.protected[i] && self.removal[i].is_none() {
            self.removal[i] = Some((match_size, cause));
        }
    }

    fn protect(&mut self, pos: Pos) {
        let i = self.idx(pos);
        self.protected[i] = true;
    }

    /// Returns false if the cell had already fired.
    fn activate(&mut self, pos: Pos) -> bool {
        let i = self.idx(pos);
        !std::mem::replace(&mut self.activated[i], true)
    }

    fn removals(&self, grid: &Grid) -> Vec<PlannedRemoval> {
        grid.positions()
            .filter_map(|pos| {
                self.removal[self.idx(pos)].map(|(match_size, cause)| PlannedRemoval {
                    pos,
                    match_size,
                    cause,
                })
            })
            .collect()
    }
}

/// Choose where a match's special tile appears.
///
/// `moved` lists the cells the player just moved tiles into, most recent
/// first.
pub fn creation_cell(m: &Match, moved: &[Pos]) -> Option<Pos> {
    if m.is_empty() {
        return None;
    }
    if let Some(&p) = moved.iter().find(|p| m.contains(**p)) {
        return Some(p);
    }
    match m.orientation() {
        Some(_) => Some(m.cells()[m.len() / 2]),
        None => {
            // Integer centroid distance, scaled by n to stay exact.
            let n = m.len() as i32;
            let (sx, sy) = m.cells().iter().fold((0i32, 0i32), |(sx, sy), p| {
                (sx + p.x as i32, sy + p.y as i32)
            });
            m.cells()
                .iter()
                .copied()
                .min_by_key(|p| {
                    let dx = p.x as i32 * n - sx;
                    let dy = p.y as i32 * n - sy;
                    dx * dx + dy * dy
                })
        }
    }
}

fn created_kind(m: &Match, bomb_radius: u8) -> Option<TileKind> {
    match m.special() {
        SpecialKind::None => None,
        SpecialKind::Rocket => Some(TileKind::Rocket(
            m.orientation().unwrap_or(Orientation::Horizontal),
        )),
        SpecialKind::Bomb => Some(TileKind::Bomb {
            radius: bomb_radius,
        }),
        SpecialKind::Rainbow => Some(TileKind::Rainbow),
    }
}

/// Plan the resolution of one detection pass.
///
/// An empty match list yields an empty plan.
pub fn plan_resolution(
    grid: &Grid,
    matches: &[Match],
    moved: &[Pos],
    bomb_radius: u8,
) -> ResolutionPlan {
    let mut plan = ResolutionPlan::default();
    if matches.is_empty() {
        return plan;
    }
    let mut marks = Marks::new(grid);

    for m in matches {
        if let (Some(kind), Some(pos)) = (created_kind(m, bomb_radius), creation_cell(m, moved)) {
            marks.protect(pos);
            plan.creations.push(CreatedSpecial {
                pos,
                color: m.color(),
                kind,
                match_size: m.len(),
            });
        }
    }

    let mut queue = VecDeque::new();
    for m in matches {
        for &pos in m.cells() {
            marks.remove(pos, Some(m.len()), RemovalCause::Match);
            if grid.tile(pos).map_or(false, |t| t.kind.is_area_special()) && marks.activate(pos) {
                queue.push_back((pos, Some(m.len())));
            }
        }
    }

    run_chain(grid, &mut marks, queue, &mut plan.effects);
    plan.removals = marks.removals(grid);
    plan
}

/// Plan a player-triggered combination (or rainbow activation) fired at
/// `origin`. Both swapped cells are consumed by the effect.
pub fn plan_swap_effect(
    grid: &Grid,
    effect: Effect,
    origin: Pos,
    participants: [Pos; 2],
) -> ResolutionPlan {
    let mut plan = ResolutionPlan::default();
    let mut marks = Marks::new(grid);
    for p in participants {
        if grid.contains(p) {
            marks.activate(p);
            marks.remove(p, None, RemovalCause::Effect);
        }
    }

    let affected = effect.affected_cells(grid, origin);
    plan.effects.push(AppliedEffect {
        origin,
        effect,
        affected: affected.clone(),
    });

    if let Effect::RainbowRocket { color, orientation } = effect {
        let rocket = Effect::Rocket { orientation };
        for target in conversion_targets(grid, color) {
            plan.conversions
                .push((target, TileKind::Rocket(orientation)));
            marks.activate(target);
            plan.effects.push(AppliedEffect {
                origin: target,
                effect: rocket,
                affected: rocket.affected_cells(grid, target),
            });
        }
    }

    let mut queue = VecDeque::new();
    for pos in affected {
        marks.remove(pos, None, RemovalCause::Effect);
        if grid.tile(pos).map_or(false, |t| t.kind.is_area_special()) && marks.activate(pos) {
            queue.push_back((pos, None));
        }
    }

    run_chain(grid, &mut marks, queue, &mut plan.effects);
    plan.removals = marks.removals(grid);
    plan
}

/// Fire queued rockets/bombs breadth-first, enqueueing any further rockets or
/// bombs inside their areas.
fn run_chain(
    grid: &Grid,
    marks: &mut Marks,
    mut queue: VecDeque<(Pos, Option<usize>)>,
    effects: &mut Vec<AppliedEffect>,
) {
    while let Some((origin, match_size)) = queue.pop_front() {
        let Some(effect) = grid.tile(origin).and_then(Effect::single) else {
            continue;
        };
        let affected = effect.affected_cells(grid, origin);
        for &pos in &affected {
            marks.remove(pos, match_size, RemovalCause::Effect);
            if grid.tile(pos).map_or(false, |t| t.kind.is_area_special()) && marks.activate(pos) {
                queue.push_back((pos, match_size));
            }
        }
        effects.push(AppliedEffect {
            origin,
            effect,
            affected,
        });
    }
}

/// Carry out a plan: conversions, then removals, then creations.
pub fn apply_plan(grid: &mut Grid, plan: ResolutionPlan) -> ResolutionResult {
    for (pos, kind) in &plan.conversions {
        if let Some(tile) = grid.tile_mut(*pos) {
            tile.kind = *kind;
        }
    }

    let mut removed = Vec::with_capacity(plan.removals.len());
    for r in &plan.removals {
        if let Ok(Some(tile)) = grid.take(r.pos) {
            removed.push(RemovedTile {
                pos: r.pos,
                color: tile.color,
                kind: tile.kind,
                match_size: r.match_size,
                cause: r.cause,
            });
        }
    }

    for c in &plan.creations {
        // Replaces the matched tile that occupied the creation cell.
        grid.place(c.pos, Some(Tile::new(c.color, c.kind)));
    }

    ResolutionResult {
        removed,
        created: plan.creations,
        effects: plan.effects,
    }
}

/// Plan and apply in one go.
pub fn resolve(
    grid: &mut Grid,
    matches: &[Match],
    moved: &[Pos],
    bomb_radius: u8,
) -> ResolutionResult {
    let plan = plan_resolution(grid, matches, moved, bomb_radius);
    apply_plan(grid, plan)
}
