//! Outbound notifications from the board engine.
//!
//! The engine never calls into presentation code. It queues [`BoardEvent`]s and
//! the caller drains them after each step to drive scoring, objectives,
//! statistics and effects.
//!
//! [`EventPayload`] is the flat, serializable form used for line-delimited JSON
//! logs.

use serde::Serialize;

use crate::effects::Effect;
use crate::resolve::RemovalCause;
use crate::tile::TileKind;
use crate::types::{Color, Pos};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    /// A tile left the board. `match_size` is the size of the match the
    /// removal traces back to (`None` for swap-triggered combinations).
    TileRemoved {
        pos: Pos,
        color: Color,
        kind: TileKind,
        match_size: Option<usize>,
        cause: RemovalCause,
    },
    SpecialCreated {
        pos: Pos,
        color: Color,
        kind: TileKind,
    },
    EffectTriggered {
        origin: Pos,
        effect: Effect,
        affected: usize,
    },
    /// Emitted at the start of every resolving round.
    ComboDepth { depth: u32 },
    CascadeFinished {
        rounds: u32,
        max_combo: u32,
        removed: usize,
    },
    /// Tiles were redistributed. `refilled` is set when no arrangement of the
    /// existing tiles worked and the board was regenerated.
    Shuffled { refilled: bool },
}

impl BoardEvent {
    pub fn name(&self) -> &'static str {
        match self {
            BoardEvent::TileRemoved { .. } => "tile_removed",
            BoardEvent::SpecialCreated { .. } => "special_created",
            BoardEvent::EffectTriggered { .. } => "effect_triggered",
            BoardEvent::ComboDepth { .. } => "combo_depth",
            BoardEvent::CascadeFinished { .. } => "cascade_finished",
            BoardEvent::Shuffled { .. } => "shuffled",
        }
    }

    pub fn payload(&self) -> EventPayload {
        match *self {
            BoardEvent::TileRemoved {
                pos,
                color,
                kind,
                match_size,
                cause,
            } => EventPayload::TileRemoved {
                x: pos.x,
                y: pos.y,
                color: color.as_str(),
                kind: kind.as_str(),
                match_size,
                cause: cause.as_str(),
            },
            BoardEvent::SpecialCreated { pos, color, kind } => EventPayload::SpecialCreated {
                x: pos.x,
                y: pos.y,
                color: color.as_str(),
                kind: kind.as_str(),
            },
            BoardEvent::EffectTriggered {
                origin,
                effect,
                affected,
            } => EventPayload::EffectTriggered {
                x: origin.x,
                y: origin.y,
                effect: effect.as_str(),
                affected,
            },
            BoardEvent::ComboDepth { depth } => EventPayload::ComboDepth { depth },
            BoardEvent::CascadeFinished {
                rounds,
                max_combo,
                removed,
            } => EventPayload::CascadeFinished {
                rounds,
                max_combo,
                removed,
            },
            BoardEvent::Shuffled { refilled } => EventPayload::Shuffled { refilled },
        }
    }
}

/// Serializable event body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventPayload {
    TileRemoved {
        x: i8,
        y: i8,
        color: &'static str,
        kind: &'static str,
        match_size: Option<usize>,
        cause: &'static str,
    },
    SpecialCreated {
        x: i8,
        y: i8,
        color: &'static str,
        kind: &'static str,
    },
    EffectTriggered {
        x: i8,
        y: i8,
        effect: &'static str,
        affected: usize,
    },
    ComboDepth {
        depth: u32,
    },
    CascadeFinished {
        rounds: u32,
        max_combo: u32,
        removed: usize,
    },
    Shuffled {
        refilled: bool,
    },
}

/// One line of the event log.
#[derive(Debug, Clone, Serialize)]
pub struct EventRecord {
    pub seq: u64,
    /// Milliseconds since the Unix epoch
    pub ts: u64,
    pub episode: u32,
    pub event: EventPayload,
}
