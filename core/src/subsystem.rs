//! Subsystem trait.
//!
//! RULE: Every daily step implements SimSubsystem.
//! The engine calls update() on each registered subsystem
//! in registration order, every day.
//! Execution order is fixed and documented in engine.rs.

use crate::{
    error::SimResult,
    event::SimEvent,
    population::Population,
    rng::SubsystemRng,
    types::Day,
};

/// The contract every subsystem must fulfill.
pub trait SimSubsystem: Send {
    /// Unique stable name for this subsystem.
    fn name(&self) -> &'static str;

    /// Called once per day by the engine.
    ///
    /// - `day`:        the current day
    /// - `population`: the shared population; mutate it only through its methods
    /// - `rng`:        this subsystem's deterministic RNG stream
    ///
    /// Returns the events to append to the day's event log.
    fn update(
        &mut self,
        day: Day,
        population: &mut Population,
        rng: &mut SubsystemRng,
    ) -> SimResult<Vec<SimEvent>>;
}
