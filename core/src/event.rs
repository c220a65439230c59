//! The session event log.
//!
//! RULE: every mutation the store performs is recorded here, in order.
//! Events live in memory only and are dropped with the store.

use crate::{
    clock::{RunState, SimSpeed},
    parameters::{GlobalParameters, ParameterName},
    types::Tick,
};
use serde::{Deserialize, Serialize};

/// Variants are append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    // ── Engine ─────────────────────────────────────
    TickCompleted {
        tick:              Tick,
        total_gdp:         f64,
        floored_countries: usize,
    },

    // ── Parameters ─────────────────────────────────
    ParameterChanged {
        tick:      Tick,
        name:      ParameterName,
        old_value: f64,
        new_value: f64,
    },
    ParametersReplaced {
        tick:       Tick,
        parameters: GlobalParameters,
    },

    // ── Run control ────────────────────────────────
    RunStateChanged {
        tick: Tick,
        from: RunState,
        to:   RunState,
    },
    SpeedChanged {
        tick:  Tick,
        speed: SimSpeed,
    },
    WorldReset {
        tick_before:   Tick,
        restored_seed: bool,
    },
}

impl SimEvent {
    /// Stable string name for the variant.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::TickCompleted { .. }      => "tick_completed",
            Self::ParameterChanged { .. }   => "parameter_changed",
            Self::ParametersReplaced { .. } => "parameters_replaced",
            Self::RunStateChanged { .. }    => "run_state_changed",
            Self::SpeedChanged { .. }       => "speed_changed",
            Self::WorldReset { .. }         => "world_reset",
        }
    }
}

/// A logged event with its position in the session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventLogEntry {
    pub seq:        u64,
    pub event_type: String,
    pub event:      SimEvent,
}
