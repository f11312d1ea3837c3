//! sim-runner: headless epidemic simulation runner.
//!
//! Usage:
//!   sim-runner --seed 12345 --days 180 --data-dir ./data
//!   sim-runner --seed 12345 --days 60 --test-config --json

use anyhow::{Context, Result};
use epidemic_core::{config::SimConfig, engine::SimEngine, report::DailyCounts};
use std::env;
use std::io::{self, Write};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let days = parse_arg(&args, "--days", 180u64);
    let json = args.iter().any(|a| a == "--json");
    let test_config = args.iter().any(|a| a == "--test-config");
    let data_dir = args
        .windows(2)
        .find(|w| w[0] == "--data-dir")
        .map(|w| w[1].as_str())
        .unwrap_or("./data");

    let config = if test_config {
        SimConfig::default_test()
    } else {
        SimConfig::load(data_dir)?
    };
    log::info!(
        "sim-runner: seed={seed} days={days} population={} initial_infected={}",
        config.population,
        config.initial_infected
    );

    if !json {
        println!("Epidemic sim-runner");
        println!("  seed:        {seed}");
        println!("  days:        {days}");
        println!("  population:  {}", config.population);
        println!("  config:      {}", if test_config { "built-in test" } else { data_dir });
        println!();
    }

    let run_id = format!("run-{seed}");
    let mut engine = SimEngine::build(run_id.clone(), seed, config)
        .with_context(|| format!("Cannot build engine for {run_id}"))?;
    engine.run_days(days)?;
    log::info!(
        "sim-runner: {run_id} finished on day {}, {} events logged",
        engine.clock.current_day,
        engine.event_log().len()
    );

    if json {
        print_history(engine.history())?;
    } else {
        print_summary(&engine, &run_id);
    }
    Ok(())
}

fn print_history(history: &[DailyCounts]) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for row in history {
        writeln!(out, "{}", serde_json::to_string(row)?)?;
    }
    out.flush()?;
    Ok(())
}

fn print_summary(engine: &SimEngine, run_id: &str) {
    let population = &engine.population;
    let peak = engine
        .history()
        .iter()
        .max_by_key(|row| row.infected)
        .copied();

    println!("=== RUN SUMMARY ===");
    println!("  run_id:         {run_id}");
    println!("  final day:      {}", engine.clock.current_day);
    println!("  households:     {}", population.households().len());
    println!("  susceptible:    {}", population.count_susceptible());
    println!("  infected:       {}", population.count_infected());
    println!("  recovered:      {}", population.count_recovered());
    println!("  dead:           {}", population.count_dead());
    println!("  quarantined:    {}", population.count_quarantined());
    println!("  knows infected: {}", population.count_knows_infected());
    println!("  tested:         {}", population.have_been_tested().len());
    println!("  test backlog:   {}", population.testing_queue().count());
    if let Some(peak) = peak {
        println!("  peak infected:  {} on day {}", peak.infected, peak.day);
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
