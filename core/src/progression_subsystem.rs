use crate::{
    error::SimResult,
    event::SimEvent,
    population::Population,
    rng::SubsystemRng,
    subsystem::SimSubsystem,
    types::Day,
};

/// Moves infected people on to recovery or death when their course says so.
#[derive(Default)]
pub struct ProgressionSubsystem;

impl ProgressionSubsystem {
    pub fn new() -> Self {
        Self
    }
}

impl SimSubsystem for ProgressionSubsystem {
    fn name(&self) -> &'static str { "progression" }

    fn update(
        &mut self,
        day: Day,
        population: &mut Population,
        _rng: &mut SubsystemRng,
    ) -> SimResult<Vec<SimEvent>> {
        let mut events = Vec::new();
        for person in population.get_infected() {
            if population.die(person, day) {
                events.push(SimEvent::PersonDied { day, person });
            } else if population.cure(person, day) {
                events.push(SimEvent::PersonRecovered { day, person });
            }
        }
        Ok(events)
    }
}
