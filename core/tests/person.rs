//! Default individual state machine.

use epidemic_core::person::{Demographics, DiseaseCourse, Individual, Person, Severity};

fn person(severity: Severity, death_after: Option<u64>) -> Person {
    let demographics = Demographics {
        age_band: 1,
        job: 0,
        house_id: 0,
        isolation: 2,
        severity,
    };
    let course = DiseaseCourse {
        symptom_onset: (severity != Severity::Asymptomatic).then_some(2),
        death_after,
        recover_after: 10,
        quarantine_days: 14,
    };
    Person::new(0, demographics, course)
}

#[test]
fn infection_is_a_one_way_door() {
    let mut p = person(Severity::Mild, None);
    assert!(p.infect(3));
    assert!(!p.infect(4));
    assert_eq!(p.infection_day(), Some(3));
}

#[test]
fn symptoms_appear_after_onset() {
    let mut p = person(Severity::Mild, None);
    p.infect(0);
    p.check_symptoms(1);
    assert!(!p.shows_symptoms());
    p.check_symptoms(2);
    assert!(p.shows_symptoms());
}

#[test]
fn asymptomatic_cases_never_show_symptoms() {
    let mut p = person(Severity::Asymptomatic, None);
    p.infect(0);
    for day in 0..10 {
        p.check_symptoms(day);
        assert!(!p.shows_symptoms());
    }
}

#[test]
fn recovery_is_due_after_the_infectious_period() {
    let mut p = person(Severity::Mild, None);
    p.infect(0);
    p.set_knows_infected(true);
    assert!(!p.check_cured(9));
    assert!(p.check_cured(10));
    assert!(p.is_recovered());
    assert!(!p.is_infected());
    assert!(!p.knows_infected());
    assert!(!p.check_cured(11), "recovery only fires once");
    assert!(!p.infect(12));
}

#[test]
fn fatal_cases_die_instead_of_recovering() {
    let mut p = person(Severity::Critical, Some(12));
    p.infect(0);
    p.enter_quarantine(3);
    p.set_knows_infected(true);
    assert!(!p.check_cured(20));
    assert!(!p.check_dead(11));
    assert!(p.check_dead(12));
    assert!(p.is_dead());
    assert!(!p.is_quarantined());
    assert!(!p.knows_infected());
    assert_eq!(p.death_day(), Some(12));
    assert!(!p.check_dead(13));
    assert!(!p.infect(14));
}

#[test]
fn quarantine_ends_exactly_once() {
    let mut p = person(Severity::Mild, None);
    assert!(!p.check_quarantine(0), "not quarantined yet");
    p.enter_quarantine(4);
    assert!(!p.check_quarantine(17));
    assert!(p.check_quarantine(18));
    assert!(!p.check_quarantine(19));
}

#[test]
fn severity_buckets_round_trip() {
    for (i, severity) in Severity::ALL.iter().enumerate() {
        assert_eq!(severity.bucket(), i);
        assert_eq!(Severity::from_bucket(i), *severity);
    }
}
