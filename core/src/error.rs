use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Initial infected count {initial} exceeds population {population}")]
    InitialInfectedExceedsPopulation { initial: usize, population: usize },

    #[error("Distribution '{category}' is missing")]
    MissingDistribution { category: String },

    #[error("Distribution '{category}' is invalid: {reason}")]
    InvalidDistribution { category: String, reason: String },

    #[error("Parameter '{name}' is invalid: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;
