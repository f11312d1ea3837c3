//! Simulation clock — owns the current day and pause state.

use crate::types::{Day, RunId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimClock {
    pub run_id:      RunId,
    pub current_day: Day,
    pub paused:      bool,
}

impl SimClock {
    pub fn new(run_id: RunId) -> Self {
        Self {
            run_id,
            current_day: 0,
            paused: true,
        }
    }

    /// Advance one day. Returns the new day number.
    /// Panics if called while paused — callers must check.
    pub fn advance(&mut self) -> Day {
        assert!(!self.paused, "advance() called on paused clock");
        self.current_day += 1;
        self.current_day
    }

    pub fn pause(&mut self)  { self.paused = true;  }
    pub fn resume(&mut self) { self.paused = false; }
}
