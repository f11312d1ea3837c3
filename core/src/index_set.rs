//! Membership index sets.
//!
//! One boolean slot per individual: slot `i` is true iff person `i`
//! currently belongs to the set. A running count is kept alongside the
//! slots so `count()` is O(1); `add`/`remove` only touch it when the
//! slot actually flips, which keeps both idempotent.

use crate::types::PersonId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipSet {
    slots: Vec<bool>,
    count: usize,
}

impl MembershipSet {
    /// Every individual in `[0, capacity)` starts as a member.
    pub fn full(capacity: usize) -> Self {
        Self {
            slots: vec![true; capacity],
            count: capacity,
        }
    }

    /// No individual starts as a member.
    pub fn empty(capacity: usize) -> Self {
        Self {
            slots: vec![false; capacity],
            count: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if `id` was not already a member.
    /// Panics if `id` is out of range.
    pub fn add(&mut self, id: PersonId) -> bool {
        let slot = &mut self.slots[id];
        if *slot {
            return false;
        }
        *slot = true;
        self.count += 1;
        true
    }

    /// Returns true if `id` was a member.
    /// Panics if `id` is out of range.
    pub fn remove(&mut self, id: PersonId) -> bool {
        let slot = &mut self.slots[id];
        if !*slot {
            return false;
        }
        *slot = false;
        self.count -= 1;
        true
    }

    pub fn contains(&self, id: PersonId) -> bool {
        self.slots[id]
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Members in index order, not insertion order.
    pub fn iter(&self) -> impl Iterator<Item = PersonId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(id, member)| member.then_some(id))
    }

    pub fn members(&self) -> Vec<PersonId> {
        self.iter().collect()
    }
}
