use crate::{
    error::SimResult,
    event::SimEvent,
    population::Population,
    rng::SubsystemRng,
    subsystem::SimSubsystem,
    types::Day,
};

/// Drains the testing queue at a fixed daily capacity.
pub struct TestingSubsystem {
    daily_capacity: usize,
}

impl TestingSubsystem {
    pub fn new(daily_capacity: usize) -> Self {
        Self { daily_capacity }
    }
}

impl SimSubsystem for TestingSubsystem {
    fn name(&self) -> &'static str { "testing" }

    fn update(
        &mut self,
        day: Day,
        population: &mut Population,
        _rng: &mut SubsystemRng,
    ) -> SimResult<Vec<SimEvent>> {
        let outcomes = population.get_tested(self.daily_capacity, day);
        let positives = outcomes.iter().filter(|o| o.positive).count();
        log::debug!(
            "day={day} testing: {} tested, {positives} positive, backlog {}",
            outcomes.len(),
            population.testing_queue().count()
        );

        let mut events = Vec::with_capacity(outcomes.len() + positives);
        for outcome in outcomes {
            events.push(SimEvent::TestCompleted {
                day,
                person: outcome.person,
                positive: outcome.positive,
            });
            if outcome.positive {
                events.push(SimEvent::QuarantineStarted { day, person: outcome.person });
            }
        }
        Ok(events)
    }
}
