use crate::{
    error::SimResult,
    event::SimEvent,
    population::Population,
    rng::SubsystemRng,
    subsystem::SimSubsystem,
    types::Day,
};

/// Refreshes symptoms and queues symptomatic people for testing.
pub struct SymptomSubsystem {
    prob_of_test: f64,
}

impl SymptomSubsystem {
    pub fn new(prob_of_test: f64) -> Self {
        Self { prob_of_test }
    }
}

impl SimSubsystem for SymptomSubsystem {
    fn name(&self) -> &'static str { "symptoms" }

    fn update(
        &mut self,
        day: Day,
        population: &mut Population,
        rng: &mut SubsystemRng,
    ) -> SimResult<Vec<SimEvent>> {
        let admitted = population.update_symptomatic(day, self.prob_of_test, rng);
        Ok(admitted
            .into_iter()
            .map(|person| SimEvent::TestRequested { day, person })
            .collect())
    }
}
