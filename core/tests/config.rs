//! Configuration loading and boundary validation.

use epidemic_core::{
    config::{DistributionConfig, SimConfig, DEFAULT_ISOLATION_BUCKETS, HOUSE_SIZE, SEVERITY},
    error::SimError,
};

#[test]
fn default_test_config_is_valid() {
    SimConfig::default_test().validate().unwrap();
}

#[test]
fn shipped_data_directory_loads() {
    let data_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/../data");
    let config = SimConfig::load(data_dir).unwrap();
    assert!(config.population > 0);
    assert!(config.initial_infected <= config.population);
}

#[test]
fn missing_data_directory_is_an_error() {
    assert!(SimConfig::load("/definitely/not/here").is_err());
}

#[test]
fn weights_must_sum_to_one() {
    let mut config = SimConfig::default_test();
    config
        .distributions
        .categories
        .insert(HOUSE_SIZE.into(), vec![0.5, 0.4]);
    match config.validate() {
        Err(SimError::InvalidDistribution { category, .. }) => assert_eq!(category, HOUSE_SIZE),
        other => panic!("expected InvalidDistribution, got {other:?}"),
    }
}

#[test]
fn negative_weights_are_rejected() {
    let mut config = SimConfig::default_test();
    config.distributions.categories.insert("job".into(), vec![1.5, -0.5]);
    assert!(matches!(config.validate(), Err(SimError::InvalidDistribution { .. })));
}

#[test]
fn severity_needs_four_classes() {
    let mut config = SimConfig::default_test();
    config.distributions.categories.insert(SEVERITY.into(), vec![0.5, 0.5]);
    assert!(matches!(config.validate(), Err(SimError::InvalidDistribution { .. })));
}

#[test]
fn required_categories_must_be_present() {
    let mut config = SimConfig::default_test();
    config.distributions.categories.remove("age");
    match config.validate() {
        Err(SimError::MissingDistribution { category }) => assert_eq!(category, "age"),
        other => panic!("expected MissingDistribution, got {other:?}"),
    }
}

#[test]
fn initial_infected_cannot_exceed_population() {
    let mut config = SimConfig::default_test();
    config.initial_infected = config.population + 1;
    assert!(matches!(
        config.validate(),
        Err(SimError::InitialInfectedExceedsPopulation { .. })
    ));
}

#[test]
fn probabilities_must_be_in_range() {
    let mut config = SimConfig::default_test();
    config.testing.prob_of_test = 1.2;
    assert!(matches!(config.validate(), Err(SimError::InvalidParameter { .. })));
}

#[test]
fn isolation_defaults_to_uniform_buckets() {
    let dists = DistributionConfig::default();
    let weights = dists.isolation_weights();
    assert_eq!(weights.len(), DEFAULT_ISOLATION_BUCKETS);
    assert!((weights.iter().sum::<f64>() - 1.0).abs() < 1e-9);
}
