//! Individual state machine.
//!
//! The population only ever talks to people through the `Individual`
//! trait. `Person` is the default implementation: its whole disease
//! course is fixed at construction, so every predicate is a pure
//! function of the day it is asked about.

use crate::{
    config::{DiseaseParams, SEVERITY_CLASSES},
    rng::SubsystemRng,
    types::{Day, HouseId, PersonId},
};
use serde::{Deserialize, Serialize};

/// The contract between the population and one person.
///
/// Transition methods return true only if the transition happened now.
pub trait Individual {
    fn id(&self) -> PersonId;

    fn infect(&mut self, day: Day) -> bool;
    fn check_cured(&mut self, day: Day) -> bool;
    fn check_dead(&mut self, day: Day) -> bool;
    /// Returns true if quarantine ended on `day`.
    fn check_quarantine(&mut self, day: Day) -> bool;
    /// Refresh symptom visibility for `day`.
    fn check_symptoms(&mut self, day: Day);

    fn enter_quarantine(&mut self, day: Day);
    fn set_knows_infected(&mut self, knows: bool);

    fn is_infected(&self) -> bool;
    fn is_recovered(&self) -> bool;
    fn is_dead(&self) -> bool;
    fn is_quarantined(&self) -> bool;
    fn shows_symptoms(&self) -> bool;
    fn knows_infected(&self) -> bool;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Asymptomatic,
    Mild,
    Severe,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; SEVERITY_CLASSES] =
        [Self::Asymptomatic, Self::Mild, Self::Severe, Self::Critical];

    pub fn from_bucket(bucket: usize) -> Self {
        Self::ALL[bucket.min(SEVERITY_CLASSES - 1)]
    }

    pub fn bucket(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Demographics {
    pub age_band:  usize,
    pub job:       usize,
    pub house_id:  HouseId,
    pub isolation: usize,
    pub severity:  Severity,
}

/// Day offsets from infection, decided before the person is ever infected.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiseaseCourse {
    /// None for asymptomatic cases.
    pub symptom_onset: Option<u64>,
    /// Some(d): dies `d` days after infection instead of recovering.
    pub death_after:   Option<u64>,
    pub recover_after: u64,
    pub quarantine_days: u64,
}

impl DiseaseCourse {
    pub fn sample(severity: Severity, params: &DiseaseParams, rng: &mut SubsystemRng) -> Self {
        let class = severity.bucket();
        let fatal = rng.chance(params.fatality_rate[class]);
        Self {
            symptom_onset: match severity {
                Severity::Asymptomatic => None,
                _ => Some(params.symptom_onset_days),
            },
            death_after: fatal.then_some(params.days_to_death[class]),
            recover_after: params.infectious_days,
            quarantine_days: params.quarantine_days,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Person {
    pub id:           PersonId,
    pub demographics: Demographics,
    pub course:       DiseaseCourse,
    infected:         bool,
    recovered:        bool,
    dead:             bool,
    quarantined:      bool,
    symptomatic:      bool,
    knows_infected:   bool,
    infection_day:    Option<Day>,
    recovery_day:     Option<Day>,
    death_day:        Option<Day>,
    quarantine_start: Option<Day>,
}

impl Person {
    pub fn new(id: PersonId, demographics: Demographics, course: DiseaseCourse) -> Self {
        Self {
            id,
            demographics,
            course,
            infected:         false,
            recovered:        false,
            dead:             false,
            quarantined:      false,
            symptomatic:      false,
            knows_infected:   false,
            infection_day:    None,
            recovery_day:     None,
            death_day:        None,
            quarantine_start: None,
        }
    }

    pub fn infection_day(&self)    -> Option<Day> { self.infection_day }
    pub fn recovery_day(&self)     -> Option<Day> { self.recovery_day }
    pub fn death_day(&self)        -> Option<Day> { self.death_day }
    pub fn quarantine_start(&self) -> Option<Day> { self.quarantine_start }

    fn days_infected(&self, day: Day) -> Option<u64> {
        self.infection_day.map(|start| day.saturating_sub(start))
    }
}

impl Individual for Person {
    fn id(&self) -> PersonId {
        self.id
    }

    fn infect(&mut self, day: Day) -> bool {
        if self.infected || self.recovered || self.dead {
            return false;
        }
        self.infected = true;
        self.infection_day = Some(day);
        true
    }

    fn check_cured(&mut self, day: Day) -> bool {
        if !self.infected || self.dead || self.course.death_after.is_some() {
            return false;
        }
        match self.days_infected(day) {
            Some(elapsed) if elapsed >= self.course.recover_after => {
                self.infected = false;
                self.recovered = true;
                self.symptomatic = false;
                self.knows_infected = false;
                self.recovery_day = Some(day);
                true
            }
            _ => false,
        }
    }

    fn check_dead(&mut self, day: Day) -> bool {
        if !self.infected || self.dead {
            return false;
        }
        match (self.course.death_after, self.days_infected(day)) {
            (Some(due), Some(elapsed)) if elapsed >= due => {
                self.infected = false;
                self.dead = true;
                self.symptomatic = false;
                self.quarantined = false;
                self.knows_infected = false;
                self.death_day = Some(day);
                true
            }
            _ => false,
        }
    }

    fn check_quarantine(&mut self, day: Day) -> bool {
        if !self.quarantined {
            return false;
        }
        match self.quarantine_start {
            Some(start) if day.saturating_sub(start) >= self.course.quarantine_days => {
                self.quarantined = false;
                true
            }
            _ => false,
        }
    }

    fn check_symptoms(&mut self, day: Day) {
        self.symptomatic = self.infected
            && match (self.course.symptom_onset, self.days_infected(day)) {
                (Some(onset), Some(elapsed)) => elapsed >= onset,
                _ => false,
            };
    }

    fn enter_quarantine(&mut self, day: Day) {
        if self.dead {
            return;
        }
        self.quarantined = true;
        self.quarantine_start = Some(day);
    }

    fn set_knows_infected(&mut self, knows: bool) {
        self.knows_infected = knows;
    }

    fn is_infected(&self)    -> bool { self.infected }
    fn is_recovered(&self)   -> bool { self.recovered }
    fn is_dead(&self)        -> bool { self.dead }
    fn is_quarantined(&self) -> bool { self.quarantined }
    fn shows_symptoms(&self) -> bool { self.symptomatic }
    fn knows_infected(&self) -> bool { self.knows_infected }
}
