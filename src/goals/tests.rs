#![allow(clippy::unwrap_used)]

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal_macros::dec;

use super::*;
use crate::store::MemoryStore;

fn frozen_clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 10, 9, 0, 0).unwrap()
}

fn tracker(store: &MemoryStore) -> GoalTracker<&MemoryStore> {
    GoalTracker::load_with_clock(store, frozen_clock).unwrap()
}

fn goal(target: Decimal, current: Decimal) -> SavingsGoal {
    SavingsGoal {
        id: 1,
        name: "Goal".into(),
        target,
        current,
    }
}

// ── add_goal ──────────────────────────────────────────────────

#[test]
fn test_add_goal_starts_at_zero_and_persists() {
    let store = MemoryStore::default();
    let mut goals = tracker(&store);
    let trip = goals.add_goal("Trip", "1000").unwrap();
    assert_eq!(trip.name, "Trip");
    assert_eq!(trip.target, dec!(1000));
    assert_eq!(trip.current, Decimal::ZERO);
    assert_eq!(goals.goals().len(), 1);
    assert_eq!(store.write_count(), 1);
    assert!(store.raw(GOALS_KEY).unwrap().contains("\"Trip\""));
}

#[test]
fn test_add_goal_unique_ids() {
    let store = MemoryStore::default();
    let mut goals = tracker(&store);
    let a = goals.add_goal("Trip", "1000").unwrap();
    let b = goals.add_goal("Laptop", "60000").unwrap();
    assert_ne!(a.id, b.id);
    let names: Vec<&str> = goals.goals().iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, ["Trip", "Laptop"]);
}

#[test]
fn test_add_goal_validation() {
    let store = MemoryStore::default();
    let mut goals = tracker(&store);
    let cases = [
        ("", "1000"),
        ("  ", "1000"),
        ("Trip", ""),
        ("Trip", "soon"),
        ("Trip", "0"),
        ("Trip", "-5"),
    ];
    for (name, target) in cases {
        assert!(
            matches!(goals.add_goal(name, target), Err(Error::ValidationFailed(_))),
            "accepted {name:?}/{target:?}"
        );
    }
    assert!(goals.goals().is_empty());
    assert_eq!(store.write_count(), 0);
}

// ── remove_goal ───────────────────────────────────────────────

#[test]
fn test_remove_goal() {
    let store = MemoryStore::default();
    let mut goals = tracker(&store);
    let a = goals.add_goal("Trip", "1000").unwrap();
    let b = goals.add_goal("Laptop", "60000").unwrap();
    goals.remove_goal(a.id).unwrap();
    assert!(goals.get(a.id).is_none());
    assert!(goals.get(b.id).is_some());
}

#[test]
fn test_remove_absent_goal_is_noop() {
    let store = MemoryStore::default();
    let mut goals = tracker(&store);
    goals.add_goal("Trip", "1000").unwrap();
    let before = goals.goals().to_vec();
    goals.remove_goal(424242).unwrap();
    assert_eq!(goals.goals(), before.as_slice());
}

// ── adjust_progress ───────────────────────────────────────────

#[test]
fn test_trip_overshoot_scenario() {
    let store = MemoryStore::default();
    let mut goals = tracker(&store);
    let trip = goals.add_goal("Trip", "1000").unwrap();
    goals.adjust_progress(trip.id, dec!(1500)).unwrap();
    let trip = goals.get(trip.id).unwrap();
    assert_eq!(trip.current, dec!(1500));
    assert_eq!(progress_percentage(trip), dec!(100));
}

#[test]
fn test_negative_delta_clamps_at_zero() {
    let store = MemoryStore::default();
    let mut goals = tracker(&store);
    let g = goals.add_goal("Fund", "500").unwrap();
    goals.adjust_progress(g.id, dec!(20)).unwrap();
    goals.adjust_progress(g.id, dec!(-50)).unwrap();
    assert_eq!(goals.get(g.id).unwrap().current, Decimal::ZERO);
}

#[test]
fn test_progress_saturates_at_decimal_max() {
    let store = MemoryStore::default();
    let mut goals = tracker(&store);
    let g = goals.add_goal("Moonshot", "79228162514264337593543950335").unwrap();
    goals.adjust_progress(g.id, Decimal::MAX).unwrap();
    goals.adjust_progress(g.id, Decimal::MAX).unwrap();
    assert_eq!(goals.get(g.id).unwrap().current, Decimal::MAX);
    assert_eq!(progress_percentage(goals.get(g.id).unwrap()), dec!(100));

    goals.adjust_progress(g.id, Decimal::MIN).unwrap();
    goals.adjust_progress(g.id, Decimal::MIN).unwrap();
    assert_eq!(goals.get(g.id).unwrap().current, Decimal::ZERO);
}

#[test]
fn test_adjust_absent_goal_is_noop() {
    let store = MemoryStore::default();
    let mut goals = tracker(&store);
    goals.add_goal("Fund", "500").unwrap();
    let writes = store.write_count();
    let before = goals.goals().to_vec();
    goals.adjust_progress(-7, dec!(100)).unwrap();
    assert_eq!(goals.goals(), before.as_slice());
    assert_eq!(store.write_count(), writes);
}

#[test]
fn test_current_never_negative_over_any_sequence() {
    let store = MemoryStore::default();
    let mut goals = tracker(&store);
    let g = goals.add_goal("Fund", "500").unwrap();
    let deltas = [
        dec!(20), dec!(-1000), dec!(50), dec!(-49.99), dec!(-0.01), dec!(-0.01),
        dec!(1000), dec!(-500), dec!(-500), dec!(-1), dec!(100), dec!(-20),
    ];
    for delta in deltas {
        goals.adjust_progress(g.id, delta).unwrap();
        assert!(goals.get(g.id).unwrap().current >= Decimal::ZERO, "negative after {delta}");
    }
}

#[test]
fn test_adjust_storage_failure_keeps_memory() {
    let store = MemoryStore::default();
    let mut goals = tracker(&store);
    let g = goals.add_goal("Fund", "500").unwrap();
    store.set_fail_writes(true);
    assert!(matches!(goals.adjust_progress(g.id, dec!(50)), Err(Error::Storage(_))));
    assert_eq!(goals.get(g.id).unwrap().current, dec!(50));
}

#[test]
fn test_goals_reload() {
    let store = MemoryStore::default();
    let saved = {
        let mut goals = tracker(&store);
        let g = goals.add_goal("Trip", "1000").unwrap();
        goals.adjust_progress(g.id, dec!(250)).unwrap();
        goals.goals().to_vec()
    };
    let reloaded = tracker(&store);
    assert_eq!(reloaded.goals(), saved.as_slice());
}

// ── progress_percentage ───────────────────────────────────────

#[test]
fn test_percentage_partial() {
    assert_eq!(progress_percentage(&goal(dec!(1000), dec!(250))), dec!(25));
}

#[test]
fn test_percentage_capped() {
    for current in [dec!(1000), dec!(1500), dec!(99999999)] {
        assert!(progress_percentage(&goal(dec!(1000), current)) <= dec!(100));
    }
    assert_eq!(progress_percentage(&goal(dec!(1000), dec!(1500))), dec!(100));
}

#[test]
fn test_percentage_zero_target() {
    assert_eq!(progress_percentage(&goal(Decimal::ZERO, Decimal::ZERO)), Decimal::ZERO);
    assert_eq!(progress_percentage(&goal(Decimal::ZERO, dec!(10))), dec!(100));
}

#[test]
fn test_percentage_tiny_target_does_not_overflow() {
    let g = goal(dec!(0.0000000000000000000000001), dec!(79228162514264337593543950));
    assert_eq!(progress_percentage(&g), dec!(100));
}
