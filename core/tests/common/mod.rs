//! Shared fixtures: a fully scriptable individual and invariant checks.

#![allow(dead_code)]

use epidemic_core::{
    household::Household,
    person::Individual,
    population::Population,
    types::{Day, PersonId},
};

/// An individual whose transitions fire on days chosen by the test.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPerson {
    pub id:             PersonId,
    pub infected:       bool,
    pub recovered:      bool,
    pub dead:           bool,
    pub quarantined:    bool,
    pub symptomatic:    bool,
    pub knows:          bool,
    pub cure_on:        Option<Day>,
    pub die_on:         Option<Day>,
    pub release_on:     Option<Day>,
    pub symptoms_from:  Option<Day>,
    pub quarantined_on: Option<Day>,
}

impl ScriptedPerson {
    pub fn new(id: PersonId) -> Self {
        Self { id, ..Default::default() }
    }
}

impl Individual for ScriptedPerson {
    fn id(&self) -> PersonId {
        self.id
    }

    fn infect(&mut self, _day: Day) -> bool {
        if self.infected || self.recovered || self.dead {
            return false;
        }
        self.infected = true;
        true
    }

    fn check_cured(&mut self, day: Day) -> bool {
        if !self.infected || self.dead || !self.cure_on.is_some_and(|d| day >= d) {
            return false;
        }
        self.infected = false;
        self.recovered = true;
        self.knows = false;
        true
    }

    fn check_dead(&mut self, day: Day) -> bool {
        if !self.infected || self.dead || !self.die_on.is_some_and(|d| day >= d) {
            return false;
        }
        self.infected = false;
        self.dead = true;
        true
    }

    fn check_quarantine(&mut self, day: Day) -> bool {
        if !self.quarantined || !self.release_on.is_some_and(|d| day >= d) {
            return false;
        }
        self.quarantined = false;
        true
    }

    fn check_symptoms(&mut self, day: Day) {
        self.symptomatic = self.infected && self.symptoms_from.is_some_and(|d| day >= d);
    }

    fn enter_quarantine(&mut self, day: Day) {
        self.quarantined = true;
        self.quarantined_on = Some(day);
    }

    fn set_knows_infected(&mut self, knows: bool) {
        self.knows = knows;
    }

    fn is_infected(&self)    -> bool { self.infected }
    fn is_recovered(&self)   -> bool { self.recovered }
    fn is_dead(&self)        -> bool { self.dead }
    fn is_quarantined(&self) -> bool { self.quarantined }
    fn shows_symptoms(&self) -> bool { self.symptomatic }
    fn knows_infected(&self) -> bool { self.knows }
}

/// `n` scripted people in one household, the first `n0` seeded.
pub fn scripted_population(n: usize, n0: usize) -> Population<ScriptedPerson> {
    let people = (0..n).map(ScriptedPerson::new).collect();
    let households = vec![Household { id: 0, first: 0, size: n }];
    Population::from_people(people, households, n0).expect("valid population")
}

/// Every person is in exactly one disease-state set.
pub fn assert_partitioned<P: Individual>(population: &Population<P>) {
    for id in 0..population.len() {
        let memberships = [
            population.susceptible().contains(id),
            population.infected().contains(id),
            population.recovered().contains(id),
            population.dead().contains(id),
        ]
        .iter()
        .filter(|m| **m)
        .count();
        assert_eq!(memberships, 1, "person {id} is in {memberships} disease-state sets");
    }
    assert_eq!(
        population.count_susceptible()
            + population.count_infected()
            + population.count_recovered()
            + population.count_dead(),
        population.len()
    );
}

/// Membership counts agree with membership lists, all ids in range.
pub fn assert_counts_match_members<P: Individual>(population: &Population<P>) {
    for set in [
        population.susceptible(),
        population.infected(),
        population.recovered(),
        population.dead(),
        population.quarantined(),
        population.knows_infected(),
    ] {
        let members = set.members();
        assert_eq!(set.count(), members.len());
        assert!(members.iter().all(|&id| id < population.len()));
    }
}
