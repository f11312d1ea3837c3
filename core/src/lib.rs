//! Day-stepped epidemic simulation over a synthetic population.
//!
//! The `Population` aggregate keeps one membership set per state
//! (susceptible, infected, recovered, dead, quarantined, knows-infected)
//! in step with each individual's own state machine, and runs a
//! finite-capacity FIFO testing pipeline. `SimEngine` drives it one day
//! at a time through a fixed sequence of subsystems.

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod household;
pub mod index_set;
pub mod person;
pub mod population;
pub mod progression_subsystem;
pub mod quarantine_subsystem;
pub mod report;
pub mod rng;
pub mod subsystem;
pub mod symptom_subsystem;
pub mod testing;
pub mod testing_subsystem;
pub mod transmission_subsystem;
pub mod types;
