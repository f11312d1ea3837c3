//! Per-day aggregate counts, recorded by the engine at the end of each day.

use crate::types::Day;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyCounts {
    pub day:            Day,
    pub susceptible:    usize,
    pub infected:       usize,
    pub recovered:      usize,
    pub dead:           usize,
    pub quarantined:    usize,
    pub knows_infected: usize,
    pub awaiting_test:  usize,
    pub tested:         usize,
}

impl DailyCounts {
    /// Sum of the four disease states. Always equals the population size.
    pub fn total(&self) -> usize {
        self.susceptible + self.infected + self.recovered + self.dead
    }
}
