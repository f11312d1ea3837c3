use crate::error::{SimError, SimResult};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const AGE: &str = "age";
pub const JOB: &str = "job";
pub const HOUSE_SIZE: &str = "house_size";
pub const SEVERITY: &str = "severity";
pub const ISOLATION: &str = "isolation";

/// Isolation tendency buckets used when no `isolation` table is configured.
pub const DEFAULT_ISOLATION_BUCKETS: usize = 5;

/// Number of case-severity classes: asymptomatic, mild, severe, critical.
pub const SEVERITY_CLASSES: usize = 4;

const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Weighted bucket tables, one per demographic category.
///
/// Loaded once before any population is built; read-only afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DistributionConfig {
    pub categories: BTreeMap<String, Vec<f64>>,
}

impl DistributionConfig {
    pub fn weights(&self, category: &str) -> SimResult<&[f64]> {
        self.categories
            .get(category)
            .map(Vec::as_slice)
            .ok_or_else(|| SimError::MissingDistribution { category: category.into() })
    }

    /// Isolation buckets are uniform unless a table is supplied.
    pub fn isolation_weights(&self) -> Vec<f64> {
        match self.categories.get(ISOLATION) {
            Some(w) => w.clone(),
            None => vec![1.0 / DEFAULT_ISOLATION_BUCKETS as f64; DEFAULT_ISOLATION_BUCKETS],
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        for category in [AGE, JOB, HOUSE_SIZE, SEVERITY] {
            self.weights(category)?;
        }
        for (category, weights) in &self.categories {
            check_weights(category, weights)?;
        }
        let severity = self.weights(SEVERITY)?;
        if severity.len() != SEVERITY_CLASSES {
            return Err(SimError::InvalidDistribution {
                category: SEVERITY.into(),
                reason: format!("expected {SEVERITY_CLASSES} buckets, got {}", severity.len()),
            });
        }
        Ok(())
    }
}

fn check_weights(category: &str, weights: &[f64]) -> SimResult<()> {
    let invalid = |reason: String| SimError::InvalidDistribution {
        category: category.into(),
        reason,
    };
    if weights.is_empty() {
        return Err(invalid("no buckets".into()));
    }
    if let Some(w) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(invalid(format!("bad weight {w}")));
    }
    let total: f64 = weights.iter().sum();
    if (total - 1.0).abs() > WEIGHT_TOLERANCE {
        return Err(invalid(format!("weights sum to {total}, expected 1")));
    }
    Ok(())
}

/// Per-individual disease course parameters, indexed by severity class
/// where a table is given.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiseaseParams {
    pub symptom_onset_days: u64,
    pub infectious_days:    u64,
    pub days_to_death:      [u64; SEVERITY_CLASSES],
    pub fatality_rate:      [f64; SEVERITY_CLASSES],
    pub quarantine_days:    u64,
    /// Expected infections per free-roaming infected person per day
    /// in a fully susceptible population.
    pub transmission_rate:  f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestingParams {
    /// Daily probability that an eligible symptomatic person seeks a test.
    pub prob_of_test:   f64,
    pub daily_capacity: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub population:       usize,
    pub initial_infected: usize,
    pub disease:          DiseaseParams,
    pub testing:          TestingParams,
    pub distributions:    DistributionConfig,
}

#[derive(Debug, Clone, Deserialize)]
struct SimulationFile {
    population:       usize,
    initial_infected: usize,
    disease:          DiseaseParams,
    testing:          TestingParams,
}

impl SimConfig {
    /// Load from the data/ directory.
    /// In tests, use SimConfig::default_test().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let sim_path = format!("{data_dir}/simulation.json");
        let sim_content = std::fs::read_to_string(&sim_path)
            .with_context(|| format!("Cannot read {sim_path}"))?;
        let sim: SimulationFile = serde_json::from_str(&sim_content)
            .with_context(|| format!("Cannot parse {sim_path}"))?;

        let dist_path = format!("{data_dir}/distributions.json");
        let dist_content = std::fs::read_to_string(&dist_path)
            .with_context(|| format!("Cannot read {dist_path}"))?;
        let categories: BTreeMap<String, Vec<f64>> = serde_json::from_str(&dist_content)
            .with_context(|| format!("Cannot parse {dist_path}"))?;

        let config = Self {
            population:       sim.population,
            initial_infected: sim.initial_infected,
            disease:          sim.disease,
            testing:          sim.testing,
            distributions:    DistributionConfig { categories },
        };
        config.validate()?;
        log::info!(
            "config: loaded {data_dir} (population={}, initial_infected={})",
            config.population,
            config.initial_infected
        );
        Ok(config)
    }

    /// Small, fully specified config for tests.
    pub fn default_test() -> Self {
        let categories = BTreeMap::from([
            (AGE.to_string(),        vec![0.25, 0.45, 0.30]),
            (JOB.to_string(),        vec![0.2, 0.5, 0.3]),
            (HOUSE_SIZE.to_string(), vec![0.3, 0.3, 0.2, 0.2]),
            (SEVERITY.to_string(),   vec![0.4, 0.4, 0.15, 0.05]),
        ]);
        Self {
            population:       200,
            initial_infected: 5,
            disease: DiseaseParams {
                symptom_onset_days: 2,
                infectious_days:    10,
                days_to_death:      [0, 0, 14, 12],
                fatality_rate:      [0.0, 0.0, 0.1, 0.4],
                quarantine_days:    14,
                transmission_rate:  0.3,
            },
            testing: TestingParams {
                prob_of_test:   0.5,
                daily_capacity: 10,
            },
            distributions: DistributionConfig { categories },
        }
    }

    /// Boundary checks. Everything past this point trusts the config.
    pub fn validate(&self) -> SimResult<()> {
        if self.initial_infected > self.population {
            return Err(SimError::InitialInfectedExceedsPopulation {
                initial:    self.initial_infected,
                population: self.population,
            });
        }
        self.distributions.validate()?;
        check_probability("testing.prob_of_test", self.testing.prob_of_test)?;
        for rate in self.disease.fatality_rate {
            check_probability("disease.fatality_rate", rate)?;
        }
        if !self.disease.transmission_rate.is_finite() || self.disease.transmission_rate < 0.0 {
            return Err(SimError::InvalidParameter {
                name:   "disease.transmission_rate".into(),
                reason: format!("{} is not a non-negative rate", self.disease.transmission_rate),
            });
        }
        if self.testing.daily_capacity == 0 {
            log::warn!("config: testing.daily_capacity is 0, nobody will ever be tested");
        }
        Ok(())
    }
}

fn check_probability(name: &str, p: f64) -> SimResult<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(SimError::InvalidParameter {
            name:   name.into(),
            reason: format!("{p} is outside [0, 1]"),
        })
    }
}
