//! Cascade controller - the resolve / fall / rescan loop
//!
//! ```text
//! Idle --swap--> Resolving --> Falling --> Rescanning --+--> Resolving (matches)
//!                                                       +--> Idle (stable)
//! ```
//!
//! [`Board::step`] performs exactly one transition and returns what happened,
//! so a presentation layer can pace the cascade however it likes. Every
//! transition leaves the grid fully consistent, which makes the gap between
//! two steps a safe pause point.
//!
//! Combo depth starts at 1 for the round triggered by the player and grows by
//! one per cascaded round.

use crate::board::{Board, Pending};
use crate::detect::find_matches;
use crate::effects::Effect;
use crate::events::BoardEvent;
use crate::gravity::Movement;
use crate::resolve::{self, ResolutionPlan, ResolutionResult};
use crate::types::{CascadePhase, Pos};

/// One transition of the cascade state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CascadeStep {
    /// Resolving -> Falling
    Resolved {
        depth: u32,
        result: ResolutionResult,
    },
    /// Falling -> Rescanning
    Fell { movements: Vec<Movement> },
    /// Rescanning -> Resolving (`matches > 0`) or Idle
    Rescanned { matches: usize },
}

/// Totals for a cascade driven to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadeReport {
    pub rounds: u32,
    pub max_combo: u32,
    pub removed: usize,
    pub created: usize,
    pub effects: usize,
    pub steps: u32,
}

impl Board {
    /// Advance the cascade by one transition. `None` when Idle.
    pub fn step(&mut self) -> Option<CascadeStep> {
        match self.phase {
            CascadePhase::Idle => None,
            CascadePhase::Resolving => Some(self.resolve_round()),
            CascadePhase::Falling => {
                let movements = self.settle();
                self.phase = CascadePhase::Rescanning;
                Some(CascadeStep::Fell { movements })
            }
            CascadePhase::Rescanning => {
                let matches = find_matches(&self.grid);
                let n = matches.len();
                if matches.is_empty() {
                    self.pending = Pending::Nothing;
                    self.phase = CascadePhase::Idle;
                    self.events.push(BoardEvent::CascadeFinished {
                        rounds: self.rounds,
                        max_combo: self.combo,
                        removed: self.removed_in_cascade,
                    });
                } else {
                    self.pending = Pending::Matches(matches);
                    self.phase = CascadePhase::Resolving;
                }
                Some(CascadeStep::Rescanned { matches: n })
            }
        }
    }

    fn resolve_round(&mut self) -> CascadeStep {
        self.combo += 1;
        self.rounds += 1;
        self.events.push(BoardEvent::ComboDepth { depth: self.combo });

        let plan = match std::mem::take(&mut self.pending) {
            Pending::Nothing => ResolutionPlan::default(),
            Pending::Matches(matches) => resolve::plan_resolution(
                &self.grid,
                &matches,
                &self.moved,
                self.config.bomb_radius,
            ),
            Pending::Combo { origin, partner } => self.plan_combo(origin, partner),
        };
        let result = resolve::apply_plan(&mut self.grid, plan);
        self.moved.clear();
        self.removed_in_cascade += result.removed.len();
        self.push_resolution_events(&result);
        self.phase = CascadePhase::Falling;
        CascadeStep::Resolved {
            depth: self.combo,
            result,
        }
    }

    fn plan_combo(&mut self, origin: Pos, partner: Pos) -> ResolutionPlan {
        let palette = self.config.colors;
        let grid = &self.grid;
        let rng = &mut self.rng;
        let (Some(a), Some(b)) = (grid.tile(origin), grid.tile(partner)) else {
            return ResolutionPlan::default();
        };
        let effect = Effect::combine(a, b, || {
            rng.pick_two_colors(&grid.colors_present(), palette)
        });
        match effect {
            Some(effect) => resolve::plan_swap_effect(grid, effect, origin, [origin, partner]),
            None => ResolutionPlan::default(),
        }
    }

    /// Step until Idle and total up the cascade.
    pub fn run_to_idle(&mut self) -> CascadeReport {
        let mut report = CascadeReport::default();
        while let Some(step) = self.step() {
            report.steps += 1;
            if let CascadeStep::Resolved { depth, result } = step {
                report.rounds += 1;
                report.max_combo = report.max_combo.max(depth);
                report.removed += result.removed.len();
                report.created += result.created.len();
                report.effects += result.effects.len();
            }
        }
        report
    }
}
