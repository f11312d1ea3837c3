use crate::{
    rng::SubsystemRng,
    types::{HouseId, PersonId},
};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A contiguous run of person ids sharing a residence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Household {
    pub id:    HouseId,
    pub first: PersonId,
    pub size:  usize,
}

impl Household {
    pub fn members(&self) -> Range<PersonId> {
        self.first..self.first + self.size
    }
}

/// Partition `[0, population)` into households.
///
/// Bucket k of `size_weights` is a household of k+1 people. A new size is
/// drawn whenever the current household fills up; the last household is
/// trimmed to whoever is left.
pub fn assign_households(
    population: usize,
    size_weights: &[f64],
    rng: &mut SubsystemRng,
) -> Vec<Household> {
    let mut households = Vec::new();
    let mut next = 0;
    while next < population {
        let drawn = rng.weighted_index(size_weights) + 1;
        let size = drawn.min(population - next);
        households.push(Household {
            id: households.len(),
            first: next,
            size,
        });
        next += size;
    }
    households
}
