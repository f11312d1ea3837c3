//! Testing pipeline.
//!
//! Symptomatic people who do not yet know they are infected join a FIFO
//! queue. Each day at most `capacity` people are drained from the front
//! and tested once; positives learn their status and go into quarantine.
//! Nobody is queued twice and nobody is tested twice.

use crate::{
    person::Individual,
    population::Population,
    rng::SubsystemRng,
    types::{Day, PersonId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestOutcome {
    pub person:   PersonId,
    pub positive: bool,
}

impl<P: Individual> Population<P> {
    /// Queue `id` for a test. False if already queued or already tested.
    pub fn admit_to_testing(&mut self, id: PersonId) -> bool {
        if self.awaiting_test.contains(id) || self.tested.contains(id) {
            return false;
        }
        self.awaiting_test.add(id);
        self.testing.push_back(id);
        true
    }

    /// Refresh every person's symptoms for `day`, then admit eligible
    /// people to the testing queue.
    ///
    /// Eligible means symptomatic, not already aware of the infection,
    /// not queued and never tested. The admission roll is only made for
    /// eligible people, so `prob_of_test` is the daily chance that an
    /// eligible person asks for a test. Returns the admitted ids in
    /// admission order.
    pub fn update_symptomatic(
        &mut self,
        day: Day,
        prob_of_test: f64,
        rng: &mut SubsystemRng,
    ) -> Vec<PersonId> {
        for person in &mut self.people {
            person.check_symptoms(day);
        }

        let mut admitted = Vec::new();
        for id in 0..self.people.len() {
            let person = &self.people[id];
            if self.knows_infected.contains(id) && !person.knows_infected() {
                self.knows_infected.remove(id);
            }
            let eligible = person.shows_symptoms()
                && !person.knows_infected()
                && !self.awaiting_test.contains(id)
                && !self.tested.contains(id);
            if eligible && rng.chance(prob_of_test) && self.admit_to_testing(id) {
                admitted.push(id);
            }
        }
        log::debug!(
            "day={day} symptoms: admitted {} to testing, backlog {}",
            admitted.len(),
            self.testing.len()
        );
        admitted
    }

    /// Test up to `capacity` people, oldest-queued first.
    pub fn get_tested(&mut self, capacity: usize, day: Day) -> Vec<TestOutcome> {
        let batch = capacity.min(self.testing.len());
        let mut outcomes = Vec::with_capacity(batch);
        for _ in 0..batch {
            let Some(id) = self.testing.pop_front() else {
                break;
            };
            self.awaiting_test.remove(id);
            self.tested.add(id);
            self.have_been_tested.push(id);

            let person = &mut self.people[id];
            let positive = person.is_infected();
            if positive {
                person.set_knows_infected(true);
                person.enter_quarantine(day);
                self.quarantined.add(id);
                self.knows_infected.add(id);
            } else {
                person.set_knows_infected(false);
            }
            log::trace!("day={day} person {id} tested, positive={positive}");
            outcomes.push(TestOutcome { person: id, positive });
        }
        outcomes
    }

    /// Ask every quarantined person whether their quarantine is over.
    /// Returns the released ids.
    pub fn update_quarantine(&mut self, day: Day) -> Vec<PersonId> {
        let mut released = Vec::new();
        for id in self.quarantined.members() {
            if self.people[id].check_quarantine(day) {
                self.quarantined.remove(id);
                released.push(id);
            }
        }
        released
    }

    /// Ids waiting for a test, front of the queue first.
    pub fn testing_queue(&self) -> impl Iterator<Item = PersonId> + '_ {
        self.testing.iter().copied()
    }

    pub fn is_awaiting_test(&self, id: PersonId) -> bool {
        self.awaiting_test.contains(id)
    }

    /// Everyone tested so far, in test order.
    pub fn have_been_tested(&self) -> &[PersonId] {
        &self.have_been_tested
    }

    pub fn was_tested(&self, id: PersonId) -> bool {
        self.tested.contains(id)
    }
}
