//! Daily engine: execution order, event log and daily reports.

use epidemic_core::{
    config::{SimConfig, SEVERITY},
    engine::SimEngine,
    event::SimEvent,
};

fn make_engine(run_id: &str, seed: u64) -> SimEngine {
    SimEngine::build_test(run_id.into(), seed).unwrap()
}

#[test]
fn day_zero_is_recorded_at_construction() {
    let engine = make_engine("day-zero", 42);
    let config = SimConfig::default_test();

    assert_eq!(engine.clock.current_day, 0);
    assert_eq!(engine.history().len(), 1);
    let day0 = engine.history()[0];
    assert_eq!(day0.infected, config.initial_infected);
    assert_eq!(day0.susceptible, config.population - config.initial_infected);

    let types: Vec<_> = engine
        .events_for_day(0)
        .iter()
        .map(|e| e.event_type.as_str())
        .collect();
    assert_eq!(types, vec!["run_initialized", "population_seeded"]);
}

#[test]
fn one_history_row_per_day() {
    let mut engine = make_engine("history", 7);
    engine.run_days(30).unwrap();

    assert_eq!(engine.clock.current_day, 30);
    assert!(engine.clock.paused);
    assert_eq!(engine.history().len(), 31);
    for (day, row) in engine.history().iter().enumerate() {
        assert_eq!(row.day, day as u64);
    }
}

#[test]
fn disease_states_always_partition_the_population() {
    let mut engine = make_engine("partition", 1234);
    engine.run_days(90).unwrap();

    let n = engine.config.population;
    for row in engine.history() {
        assert_eq!(row.total(), n, "day {} does not add up", row.day);
        assert!(row.knows_infected <= row.tested);
        assert!(
            row.knows_infected <= row.infected,
            "day {}: {} know they are infected but only {} are",
            row.day, row.knows_infected, row.infected
        );
    }
}

#[test]
fn dead_and_recovered_never_decrease() {
    let mut engine = make_engine("monotone", 77);
    engine.run_days(90).unwrap();

    for pair in engine.history().windows(2) {
        assert!(pair[1].dead >= pair[0].dead);
        assert!(pair[1].recovered >= pair[0].recovered);
        assert!(pair[1].tested >= pair[0].tested);
    }
}

#[test]
fn daily_tests_never_exceed_capacity() {
    let mut engine = make_engine("capacity", 5);
    engine.run_days(60).unwrap();
    let capacity = engine.config.testing.daily_capacity;

    for day in 1..=60 {
        let tests = engine
            .events_for_day(day)
            .iter()
            .filter(|e| e.event_type == "test_completed")
            .count();
        assert!(tests <= capacity, "day {day}: {tests} tests > capacity {capacity}");
    }
}

#[test]
fn subsystems_run_in_documented_order() {
    let mut engine = make_engine("order", 42);
    engine.run_days(20).unwrap();

    let rank = |subsystem: &str| match subsystem {
        "symptoms" => 1,
        "testing" => 2,
        "transmission" => 3,
        "progression" => 4,
        "quarantine" => 5,
        _ => 0,
    };
    for day in 1..=20 {
        let entries = engine.events_for_day(day);
        assert_eq!(entries.first().unwrap().event_type, "day_started");
        assert_eq!(entries.last().unwrap().event_type, "day_completed");
        let ranks: Vec<_> = entries[1..entries.len() - 1]
            .iter()
            .map(|e| rank(&e.subsystem))
            .collect();
        assert!(ranks.windows(2).all(|w| w[0] <= w[1]), "day {day} out of order: {ranks:?}");
    }
}

#[test]
fn positive_tests_lead_to_quarantine_events() {
    let mut engine = make_engine("positives", 42);
    let mut positives = 0;
    let mut quarantines = 0;
    engine.clock.resume();
    for _ in 0..60 {
        for event in engine.tick().unwrap() {
            match event {
                SimEvent::TestCompleted { positive: true, .. } => positives += 1,
                SimEvent::QuarantineStarted { .. } => quarantines += 1,
                _ => {}
            }
        }
    }
    engine.clock.pause();
    assert_eq!(positives, quarantines);
}

#[test]
fn logged_payloads_round_trip_to_events() {
    let mut engine = make_engine("payloads", 3);
    engine.run_days(10).unwrap();
    for entry in engine.event_log() {
        let event: SimEvent = serde_json::from_str(&entry.payload).unwrap();
        assert_eq!(event.type_name(), entry.event_type);
    }
}

#[test]
fn epidemic_burns_out_without_reviving() {
    let mut config = SimConfig::default_test();
    config.disease.transmission_rate = 0.0;
    let mut engine = SimEngine::build("no-spread".into(), 9, config).unwrap();
    engine.run_days(40).unwrap();

    let last = engine.history().last().copied().unwrap();
    assert_eq!(last.infected, 0);
    assert_eq!(last.recovered + last.dead, 5);
    assert_eq!(last.susceptible, 195);
}

#[test]
fn the_dead_drop_out_of_knows_infected() {
    let mut config = SimConfig::default_test();
    config.distributions.categories.insert(SEVERITY.into(), vec![0.0, 1.0, 0.0, 0.0]);
    config.disease.fatality_rate = [0.0, 1.0, 0.0, 0.0];
    config.disease.days_to_death = [0, 20, 0, 0];
    config.disease.transmission_rate = 0.0;
    config.testing.prob_of_test = 1.0;
    let mut engine = SimEngine::build("fatal-known".into(), 11, config).unwrap();
    engine.run_days(30).unwrap();

    let population = &engine.population;
    assert_eq!(population.count_dead(), 5);
    assert_eq!(population.count_infected(), 0);
    assert!(population.have_been_tested().len() >= 5, "everyone was tested before dying");
    assert!(
        population.get_knows_infected().is_empty(),
        "dead people still marked as knowing: {:?}",
        population.get_knows_infected()
    );
}
