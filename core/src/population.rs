//! The population aggregate.
//!
//! Owns every individual, the household partition, and the membership
//! sets that mirror each person's epidemiological state. Only the methods
//! here (and the testing pipeline in testing.rs) mutate those sets.
//!
//! INVARIANT: every id in `[0, len)` is in exactly one of
//! susceptible / infected / recovered / dead.

use crate::{
    config::{SimConfig, AGE, HOUSE_SIZE, JOB, SEVERITY},
    error::{SimError, SimResult},
    household::{assign_households, Household},
    index_set::MembershipSet,
    person::{Demographics, DiseaseCourse, Individual, Person, Severity},
    report::DailyCounts,
    rng::{RngBank, SubsystemSlot},
    types::{Day, PersonId},
};
use std::collections::VecDeque;

pub struct Population<P: Individual = Person> {
    pub(crate) people:         Vec<P>,
    households:                Vec<Household>,
    pub(crate) susceptible:    MembershipSet,
    pub(crate) infected:       MembershipSet,
    pub(crate) recovered:      MembershipSet,
    pub(crate) dead:           MembershipSet,
    pub(crate) quarantined:    MembershipSet,
    pub(crate) knows_infected: MembershipSet,
    // Testing pipeline state, driven from testing.rs.
    pub(crate) testing:          VecDeque<PersonId>,
    pub(crate) awaiting_test:    MembershipSet,
    pub(crate) have_been_tested: Vec<PersonId>,
    pub(crate) tested:           MembershipSet,
}

impl Population<Person> {
    /// Build a population from config: households first, then one
    /// sampled demographic profile and disease course per person, then
    /// seed the first `initial_infected` people on day 0.
    pub fn generate(config: &SimConfig, rng_bank: &RngBank) -> SimResult<Self> {
        config.validate()?;
        let dists = &config.distributions;
        let n = config.population;

        let mut house_rng = rng_bank.for_subsystem(SubsystemSlot::Household);
        let households = assign_households(n, dists.weights(HOUSE_SIZE)?, &mut house_rng);

        let mut pop_rng = rng_bank.for_subsystem(SubsystemSlot::Population);
        let mut disease_rng = rng_bank.for_subsystem(SubsystemSlot::Disease);
        let age_weights = dists.weights(AGE)?;
        let job_weights = dists.weights(JOB)?;
        let severity_weights = dists.weights(SEVERITY)?;
        let isolation_weights = dists.isolation_weights();

        let mut people = Vec::with_capacity(n);
        for house in &households {
            for id in house.members() {
                let severity = Severity::from_bucket(pop_rng.weighted_index(severity_weights));
                let demographics = Demographics {
                    age_band:  pop_rng.weighted_index(age_weights),
                    job:       pop_rng.weighted_index(job_weights),
                    house_id:  house.id,
                    isolation: pop_rng.weighted_index(&isolation_weights),
                    severity,
                };
                let course = DiseaseCourse::sample(severity, &config.disease, &mut disease_rng);
                people.push(Person::new(id, demographics, course));
            }
        }

        let population = Self::from_people(people, households, config.initial_infected)?;
        log::info!(
            "population: created {n} people in {} households, {} seeded infections",
            population.households.len(),
            population.count_infected()
        );
        Ok(population)
    }
}

impl<P: Individual> Population<P> {
    /// Wrap already-built individuals. `people[i].id()` must equal `i`.
    pub fn from_people(
        people: Vec<P>,
        households: Vec<Household>,
        initial_infected: usize,
    ) -> SimResult<Self> {
        let n = people.len();
        if initial_infected > n {
            return Err(SimError::InitialInfectedExceedsPopulation {
                initial:    initial_infected,
                population: n,
            });
        }
        debug_assert!(people.iter().enumerate().all(|(i, p)| p.id() == i));

        let mut population = Self {
            people,
            households,
            susceptible:      MembershipSet::full(n),
            infected:         MembershipSet::empty(n),
            recovered:        MembershipSet::empty(n),
            dead:             MembershipSet::empty(n),
            quarantined:      MembershipSet::empty(n),
            knows_infected:   MembershipSet::empty(n),
            testing:          VecDeque::new(),
            awaiting_test:    MembershipSet::empty(n),
            have_been_tested: Vec::new(),
            tested:           MembershipSet::empty(n),
        };
        for id in 0..initial_infected {
            population.infect(id, 0);
        }
        Ok(population)
    }

    // ── Transitions ────────────────────────────────────────────

    pub fn infect(&mut self, id: PersonId, day: Day) -> bool {
        if self.dead.contains(id) || !self.people[id].infect(day) {
            return false;
        }
        self.susceptible.remove(id);
        self.infected.add(id);
        log::trace!("day={day} person {id} infected");
        true
    }

    pub fn cure(&mut self, id: PersonId, day: Day) -> bool {
        if self.dead.contains(id) || !self.people[id].check_cured(day) {
            return false;
        }
        self.infected.remove(id);
        self.recovered.add(id);
        log::trace!("day={day} person {id} recovered");
        true
    }

    pub fn die(&mut self, id: PersonId, day: Day) -> bool {
        if self.dead.contains(id) || !self.people[id].check_dead(day) {
            return false;
        }
        self.mark_dead(id);
        log::trace!("day={day} person {id} died");
        true
    }

    fn mark_dead(&mut self, id: PersonId) {
        self.susceptible.remove(id);
        self.infected.remove(id);
        self.recovered.remove(id);
        self.dead.add(id);
        self.knows_infected.remove(id);
        if !self.people[id].is_quarantined() {
            self.quarantined.remove(id);
        }
    }

    // ── Resynchronization ──────────────────────────────────────
    //
    // Catch the sets up with state the person reached without going
    // through the mutators above. Each returns false when there is
    // nothing to record, so repeated calls never double count.

    pub fn update_infected(&mut self, id: PersonId) -> bool {
        let person = &self.people[id];
        if !person.is_infected()
            || person.is_dead()
            || self.dead.contains(id)
            || self.infected.contains(id)
        {
            return false;
        }
        self.susceptible.remove(id);
        self.infected.add(id);
        true
    }

    pub fn update_cured(&mut self, id: PersonId) -> bool {
        let person = &self.people[id];
        if !person.is_recovered()
            || person.is_dead()
            || self.dead.contains(id)
            || self.recovered.contains(id)
        {
            return false;
        }
        self.susceptible.remove(id);
        self.infected.remove(id);
        self.recovered.add(id);
        true
    }

    pub fn update_dead(&mut self, id: PersonId) -> bool {
        if !self.people[id].is_dead() || self.dead.contains(id) {
            return false;
        }
        self.mark_dead(id);
        true
    }

    // ── Reads ──────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn person(&self, id: PersonId) -> &P {
        &self.people[id]
    }

    /// Direct access to one individual. Any state change made through
    /// this handle must be caught up with `update_infected`,
    /// `update_cured` or `update_dead`.
    pub fn person_mut(&mut self, id: PersonId) -> &mut P {
        &mut self.people[id]
    }

    pub fn people(&self) -> &[P] {
        &self.people
    }

    pub fn households(&self) -> &[Household] {
        &self.households
    }

    pub fn count_susceptible(&self)    -> usize { self.susceptible.count() }
    pub fn count_infected(&self)       -> usize { self.infected.count() }
    pub fn count_recovered(&self)      -> usize { self.recovered.count() }
    pub fn count_dead(&self)           -> usize { self.dead.count() }
    pub fn count_quarantined(&self)    -> usize { self.quarantined.count() }
    pub fn count_knows_infected(&self) -> usize { self.knows_infected.count() }

    pub fn get_susceptible(&self)    -> Vec<PersonId> { self.susceptible.members() }
    pub fn get_infected(&self)       -> Vec<PersonId> { self.infected.members() }
    pub fn get_recovered(&self)      -> Vec<PersonId> { self.recovered.members() }
    pub fn get_dead(&self)           -> Vec<PersonId> { self.dead.members() }
    pub fn get_quarantined(&self)    -> Vec<PersonId> { self.quarantined.members() }
    pub fn get_knows_infected(&self) -> Vec<PersonId> { self.knows_infected.members() }

    pub fn susceptible(&self)    -> &MembershipSet { &self.susceptible }
    pub fn infected(&self)       -> &MembershipSet { &self.infected }
    pub fn recovered(&self)      -> &MembershipSet { &self.recovered }
    pub fn dead(&self)           -> &MembershipSet { &self.dead }
    pub fn quarantined(&self)    -> &MembershipSet { &self.quarantined }
    pub fn knows_infected(&self) -> &MembershipSet { &self.knows_infected }

    /// Infected people who are not in quarantine.
    pub fn count_free_infected(&self) -> usize {
        self.infected
            .iter()
            .filter(|&id| !self.quarantined.contains(id))
            .count()
    }

    pub fn daily_counts(&self, day: Day) -> DailyCounts {
        DailyCounts {
            day,
            susceptible:    self.count_susceptible(),
            infected:       self.count_infected(),
            recovered:      self.count_recovered(),
            dead:           self.count_dead(),
            quarantined:    self.count_quarantined(),
            knows_infected: self.count_knows_infected(),
            awaiting_test:  self.testing.len(),
            tested:         self.have_been_tested.len(),
        }
    }
}
