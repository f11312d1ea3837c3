//! Everything that happens during a run, as recorded in the event log.

use crate::types::{Day, PersonId, RunId};
use serde::{Deserialize, Serialize};

/// Every event emitted during simulation.
/// Variants are only ever appended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    // ── Engine events ──────────────────────────────
    DayStarted {
        day: Day,
    },
    DayCompleted {
        day: Day,
    },
    RunInitialized {
        run_id: RunId,
        seed: u64,
    },
    PopulationSeeded {
        day: Day,
        population: usize,
        households: usize,
        initial_infected: usize,
    },

    // ── Testing and quarantine ─────────────────────
    TestRequested {
        day: Day,
        person: PersonId,
    },
    TestCompleted {
        day: Day,
        person: PersonId,
        positive: bool,
    },
    QuarantineStarted {
        day: Day,
        person: PersonId,
    },
    QuarantineEnded {
        day: Day,
        person: PersonId,
    },

    // ── Disease transitions ────────────────────────
    PersonInfected {
        day: Day,
        person: PersonId,
    },
    PersonRecovered {
        day: Day,
        person: PersonId,
    },
    PersonDied {
        day: Day,
        person: PersonId,
    },
}

impl SimEvent {
    /// Stable string name, used for the event_type field of the log.
    pub fn type_name(&self) -> &'static str {
        match self {
            SimEvent::DayStarted { .. }        => "day_started",
            SimEvent::DayCompleted { .. }      => "day_completed",
            SimEvent::RunInitialized { .. }    => "run_initialized",
            SimEvent::PopulationSeeded { .. }  => "population_seeded",
            SimEvent::TestRequested { .. }     => "test_requested",
            SimEvent::TestCompleted { .. }     => "test_completed",
            SimEvent::QuarantineStarted { .. } => "quarantine_started",
            SimEvent::QuarantineEnded { .. }   => "quarantine_ended",
            SimEvent::PersonInfected { .. }    => "person_infected",
            SimEvent::PersonRecovered { .. }   => "person_recovered",
            SimEvent::PersonDied { .. }        => "person_died",
        }
    }
}

/// One row of the in-memory event log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventLogEntry {
    pub run_id:     RunId,
    pub day:        Day,
    pub subsystem:  String,
    pub event_type: String,
    pub payload:    String, // JSON
}
