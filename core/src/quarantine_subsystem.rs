use crate::{
    error::SimResult,
    event::SimEvent,
    population::Population,
    rng::SubsystemRng,
    subsystem::SimSubsystem,
    types::Day,
};

/// Releases people whose quarantine has run its course.
#[derive(Default)]
pub struct QuarantineSubsystem;

impl QuarantineSubsystem {
    pub fn new() -> Self {
        Self
    }
}

impl SimSubsystem for QuarantineSubsystem {
    fn name(&self) -> &'static str { "quarantine" }

    fn update(
        &mut self,
        day: Day,
        population: &mut Population,
        _rng: &mut SubsystemRng,
    ) -> SimResult<Vec<SimEvent>> {
        Ok(population
            .update_quarantine(day)
            .into_iter()
            .map(|person| SimEvent::QuarantineEnded { day, person })
            .collect())
    }
}
