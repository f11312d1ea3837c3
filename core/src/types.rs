//! Shared primitive types used across the entire simulation.

/// A simulation day. Day 0 is the seeding day.
pub type Day = u64;

/// Stable index of an individual, in `[0, population)`.
pub type PersonId = usize;

/// Index of a household, in creation order.
pub type HouseId = usize;

/// The canonical run identifier.
pub type RunId = String;
