//! The simulation engine — advances the population one day at a time.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Symptoms      (refresh symptoms, admit to testing)
//!   2. Testing       (drain the queue at daily capacity)
//!   3. Transmission  (new infections)
//!   4. Progression   (recoveries and deaths)
//!   5. Quarantine    (release expired quarantines)
//!
//! RULES:
//!   - Subsystems execute in registration order, every day.
//!   - Subsystems touch the population only through its methods.
//!   - All randomness flows through the RngBank.
//!   - All state changes are recorded in the event log.

use crate::{
    clock::SimClock,
    config::SimConfig,
    error::SimResult,
    event::{EventLogEntry, SimEvent},
    population::Population,
    progression_subsystem::ProgressionSubsystem,
    quarantine_subsystem::QuarantineSubsystem,
    report::DailyCounts,
    rng::{RngBank, SubsystemRng, SubsystemSlot},
    subsystem::SimSubsystem,
    symptom_subsystem::SymptomSubsystem,
    testing_subsystem::TestingSubsystem,
    transmission_subsystem::TransmissionSubsystem,
    types::{Day, RunId},
};

pub struct SimEngine {
    pub run_id:     RunId,
    pub clock:      SimClock,
    pub rng_bank:   RngBank,
    pub config:     SimConfig,
    pub population: Population,
    subsystems:     Vec<(SubsystemRng, Box<dyn SimSubsystem>)>,
    event_log:      Vec<EventLogEntry>,
    history:        Vec<DailyCounts>,
}

impl SimEngine {
    /// Build the population and record day 0. No subsystems registered.
    pub fn new(run_id: RunId, seed: u64, config: SimConfig) -> SimResult<Self> {
        let rng_bank = RngBank::new(seed);
        let population = Population::generate(&config, &rng_bank)?;
        let mut engine = Self {
            clock: SimClock::new(run_id.clone()),
            rng_bank,
            config,
            population,
            subsystems: Vec::new(),
            event_log: Vec::new(),
            history: Vec::new(),
            run_id,
        };

        let seeded = vec![
            SimEvent::RunInitialized {
                run_id: engine.run_id.clone(),
                seed,
            },
            SimEvent::PopulationSeeded {
                day: 0,
                population: engine.population.len(),
                households: engine.population.households().len(),
                initial_infected: engine.population.count_infected(),
            },
        ];
        engine.append_events(0, "engine", &seeded)?;
        engine.history.push(engine.population.daily_counts(0));
        Ok(engine)
    }

    /// Build a fully wired engine with all subsystems registered.
    /// Call this instead of new() + manual register() calls.
    pub fn build(run_id: RunId, seed: u64, config: SimConfig) -> SimResult<Self> {
        let testing = config.testing.clone();
        let transmission_rate = config.disease.transmission_rate;
        let mut engine = SimEngine::new(run_id, seed, config)?;

        // EXECUTION ORDER — fixed, documented, never reordered.
        engine.register(
            SubsystemSlot::Symptoms,
            Box::new(SymptomSubsystem::new(testing.prob_of_test)),
        );
        engine.register(
            SubsystemSlot::Testing,
            Box::new(TestingSubsystem::new(testing.daily_capacity)),
        );
        engine.register(
            SubsystemSlot::Transmission,
            Box::new(TransmissionSubsystem::new(transmission_rate)),
        );
        engine.register(SubsystemSlot::Progression, Box::new(ProgressionSubsystem::new()));
        engine.register(SubsystemSlot::Quarantine, Box::new(QuarantineSubsystem::new()));
        Ok(engine)
    }

    /// Fully wired engine over SimConfig::default_test().
    pub fn build_test(run_id: RunId, seed: u64) -> SimResult<Self> {
        Self::build(run_id, seed, SimConfig::default_test())
    }

    /// Register a subsystem. Call in the documented execution order.
    /// Its RNG stream lives as long as the engine.
    pub fn register(&mut self, slot: SubsystemSlot, subsystem: Box<dyn SimSubsystem>) {
        let rng = self.rng_bank.for_subsystem(slot);
        self.subsystems.push((rng, subsystem));
    }

    /// Advance one day. This is the core simulation step.
    pub fn tick(&mut self) -> SimResult<Vec<SimEvent>> {
        assert!(!self.clock.paused, "tick() called on paused engine");

        let day = self.clock.advance();
        let mut day_events = vec![SimEvent::DayStarted { day }];
        self.append_events(day, "engine", &day_events)?;

        for (rng, subsystem) in &mut self.subsystems {
            let new_events = subsystem.update(day, &mut self.population, rng)?;
            append_to_log(&mut self.event_log, &self.run_id, day, subsystem.name(), &new_events)?;
            day_events.extend(new_events);
        }

        let completed = SimEvent::DayCompleted { day };
        self.append_events(day, "engine", std::slice::from_ref(&completed))?;
        day_events.push(completed);

        let counts = self.population.daily_counts(day);
        log::debug!(
            "day={day} engine: S={} I={} R={} D={} Q={}",
            counts.susceptible,
            counts.infected,
            counts.recovered,
            counts.dead,
            counts.quarantined
        );
        self.history.push(counts);
        Ok(day_events)
    }

    /// Run n days in a loop.
    pub fn run_days(&mut self, n: u64) -> SimResult<()> {
        self.clock.resume();
        for _ in 0..n {
            self.tick()?;
        }
        self.clock.pause();
        log::info!(
            "run {}: reached day {}, {} infected, {} dead",
            self.run_id,
            self.clock.current_day,
            self.population.count_infected(),
            self.population.count_dead()
        );
        Ok(())
    }

    pub fn event_log(&self) -> &[EventLogEntry] {
        &self.event_log
    }

    pub fn events_for_day(&self, day: Day) -> Vec<&EventLogEntry> {
        self.event_log.iter().filter(|e| e.day == day).collect()
    }

    /// One row per day, starting with day 0.
    pub fn history(&self) -> &[DailyCounts] {
        &self.history
    }

    fn append_events(&mut self, day: Day, subsystem: &str, events: &[SimEvent]) -> SimResult<()> {
        append_to_log(&mut self.event_log, &self.run_id, day, subsystem, events)
    }
}

fn append_to_log(
    log: &mut Vec<EventLogEntry>,
    run_id: &str,
    day: Day,
    subsystem: &str,
    events: &[SimEvent],
) -> SimResult<()> {
    for event in events {
        log.push(EventLogEntry {
            run_id:     run_id.to_string(),
            day,
            subsystem:  subsystem.to_string(),
            event_type: event.type_name().to_string(),
            payload:    serde_json::to_string(event)?,
        });
    }
    Ok(())
}
