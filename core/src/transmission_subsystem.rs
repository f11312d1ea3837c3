use crate::{
    error::SimResult,
    event::SimEvent,
    population::Population,
    rng::SubsystemRng,
    subsystem::SimSubsystem,
    types::Day,
};

/// Homogeneous-mixing transmission.
///
/// Each susceptible person is infected with probability
/// `1 - exp(-rate * I / N)`, where `I` counts infected people outside
/// quarantine and `N` counts the living.
pub struct TransmissionSubsystem {
    transmission_rate: f64,
}

impl TransmissionSubsystem {
    pub fn new(transmission_rate: f64) -> Self {
        Self { transmission_rate }
    }

    pub fn infection_probability(&self, free_infected: usize, alive: usize) -> f64 {
        if alive == 0 {
            return 0.0;
        }
        let pressure = self.transmission_rate * free_infected as f64 / alive as f64;
        1.0 - (-pressure).exp()
    }
}

impl SimSubsystem for TransmissionSubsystem {
    fn name(&self) -> &'static str { "transmission" }

    fn update(
        &mut self,
        day: Day,
        population: &mut Population,
        rng: &mut SubsystemRng,
    ) -> SimResult<Vec<SimEvent>> {
        let free_infected = population.count_free_infected();
        if free_infected == 0 {
            return Ok(vec![]);
        }
        let alive = population.len() - population.count_dead();
        let p = self.infection_probability(free_infected, alive);

        let mut events = Vec::new();
        for person in population.get_susceptible() {
            if rng.chance(p) && population.infect(person, day) {
                events.push(SimEvent::PersonInfected { day, person });
            }
        }
        log::debug!(
            "day={day} transmission: p={p:.4} from {free_infected} free infected, {} new",
            events.len()
        );
        Ok(events)
    }
}
