// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Report Backoff Tests
//!
//! Wait growth, expiry, clock rollback, reset and persistence of the
//! failed-attempt record.

mod common;

use std::sync::Arc;

use chrono::Duration;
use proptest::prelude::*;
use tempfile::TempDir;

use common::strategies::failure_count_strategy;
use common::{controller, controller_over, epoch};
use exposure_core::backoff::{BackoffController, BackoffPolicy, BackoffState, Clock, ThrottleState};
use exposure_core::storage::{KvStorage, MemoryKvStorage, SqliteKvStorage};
use exposure_core::verification::{GreenPassToken, VerificationOutcome};
use exposure_core::ExposureError;

fn locked(remaining_seconds: u64) -> ThrottleState {
    ThrottleState::Locked { remaining_seconds }
}

// ============================================================
// Wait growth
// ============================================================

proptest! {
    #[test]
    fn prop_wait_doubles_until_capped(failures in failure_count_strategy()) {
        let policy = BackoffPolicy::default();
        let uncapped = 5u128 << (failures.min(100) - 1);
        let expected = uncapped.min(1800) as u64;
        prop_assert_eq!(policy.seconds_to_wait(failures), expected);
    }

    #[test]
    fn prop_wait_never_decreases(failures in 1u32..200) {
        let policy = BackoffPolicy::default();
        prop_assert!(policy.seconds_to_wait(failures + 1) >= policy.seconds_to_wait(failures));
    }
}

#[test]
fn test_wait_examples() {
    let policy = BackoffPolicy::default();
    assert_eq!(policy.seconds_to_wait(1), 5);
    assert_eq!(policy.seconds_to_wait(2), 10);
    assert_eq!(policy.seconds_to_wait(4), 40);
    assert_eq!(policy.seconds_to_wait(10), 1800);
}

/// Scenario: three quick failures leave exactly twenty seconds
#[test]
fn test_three_failures_lock_for_twenty_seconds() {
    let (ctl, _clock) = controller();

    assert_eq!(ctl.submit_failed_attempt().unwrap(), locked(5));
    assert_eq!(ctl.submit_failed_attempt().unwrap(), locked(10));
    assert_eq!(ctl.submit_failed_attempt().unwrap(), locked(20));
    assert_eq!(ctl.remaining_seconds().unwrap(), Some(20));
}

#[test]
fn test_partial_seconds_are_truncated() {
    let (ctl, clock) = controller();
    ctl.submit_failed_attempt().unwrap();

    clock.advance(Duration::milliseconds(1500));
    // 1.5s elapsed counts as 1s
    assert_eq!(ctl.remaining_seconds().unwrap(), Some(4));
}

#[test]
fn test_custom_policy() {
    let (ctl, clock) = controller();
    let policy = BackoffPolicy {
        base_seconds: 60,
        max_seconds: 90,
        ..BackoffPolicy::default()
    };
    let ctl = BackoffController::with_policy(
        ctl.store().clone(),
        clock,
        policy,
    );

    assert_eq!(ctl.submit_failed_attempt().unwrap(), locked(60));
    assert_eq!(ctl.submit_failed_attempt().unwrap(), locked(90));
}

// ============================================================
// Reset
// ============================================================

#[test]
fn test_reset_clears_record_and_is_idempotent() {
    let (ctl, _clock) = controller();
    ctl.submit_failed_attempt().unwrap();
    ctl.submit_failed_attempt().unwrap();

    ctl.reset().unwrap();
    ctl.reset().unwrap();

    assert!(ctl.store().state().unwrap().is_absent());
    assert_eq!(ctl.state().unwrap(), ThrottleState::Unlocked);

    ctl.submit_failed_attempt().unwrap();
    assert_eq!(ctl.store().consecutive_failures().unwrap(), Some(1));
}

// ============================================================
// Expiry
// ============================================================

/// Scenario: a failure exactly one day old no longer counts
#[test]
fn test_expiry_boundary_is_inclusive() {
    let (ctl, _clock) = controller();
    let state = BackoffState {
        last_failure_time: Some(epoch()),
        consecutive_failures: Some(10),
    };

    assert!(!ctl.is_expired(&state, epoch() + Duration::hours(24) - Duration::milliseconds(1)));
    assert!(ctl.is_expired(&state, epoch() + Duration::hours(24)));
}

#[test]
fn test_absent_record_is_never_expired() {
    let (ctl, _clock) = controller();
    assert!(!ctl.is_expired(&BackoffState::default(), epoch()));
}

#[test]
fn test_failure_count_survives_just_under_a_day() {
    let (ctl, clock) = controller();
    for _ in 0..10 {
        ctl.submit_failed_attempt().unwrap();
    }

    clock.advance(Duration::hours(24) - Duration::milliseconds(1));
    // Wait has elapsed but the streak still counts
    assert_eq!(ctl.state().unwrap(), ThrottleState::Unlocked);
    ctl.submit_failed_attempt().unwrap();
    assert_eq!(ctl.store().consecutive_failures().unwrap(), Some(11));
}

#[test]
fn test_failure_after_expiry_starts_over() {
    let (ctl, clock) = controller();
    for _ in 0..10 {
        ctl.submit_failed_attempt().unwrap();
    }

    clock.advance(Duration::hours(24));
    assert_eq!(ctl.submit_failed_attempt().unwrap(), locked(5));
    assert_eq!(ctl.store().consecutive_failures().unwrap(), Some(1));
    assert_eq!(ctl.store().last_failure_time().unwrap(), Some(clock.now()));
}

/// Scenario: the user sets the device clock back to escape the lockout
#[test]
fn test_clock_rollback_counts_as_expired() {
    let (ctl, clock) = controller();
    for _ in 0..6 {
        ctl.submit_failed_attempt().unwrap();
    }
    assert_eq!(ctl.remaining_seconds().unwrap(), Some(160));

    clock.set(epoch() - Duration::minutes(5));
    assert_eq!(ctl.state().unwrap(), ThrottleState::Unlocked);

    assert_eq!(ctl.submit_failed_attempt().unwrap(), locked(5));
    assert_eq!(ctl.store().consecutive_failures().unwrap(), Some(1));
}

// ============================================================
// Damaged records
// ============================================================

#[test]
fn test_partial_record_is_unlocked() {
    let (ctl, _clock) = controller();
    ctl.store().set_consecutive_failures(Some(7)).unwrap();

    assert!(ctl.store().state().unwrap().is_partial());
    assert_eq!(ctl.state().unwrap(), ThrottleState::Unlocked);
}

#[test]
fn test_malformed_entry_is_unlocked() {
    let storage = Arc::new(MemoryKvStorage::new());
    storage
        .save("lastFailureTime", "\"2026-03-01T12:00:00Z\"")
        .unwrap();
    storage.save("consecutiveFailures", "not a number").unwrap();
    let (ctl, _clock) = controller_over(storage);

    assert_eq!(ctl.state().unwrap(), ThrottleState::Unlocked);

    // The damaged streak is replaced, not extended
    assert_eq!(ctl.submit_failed_attempt().unwrap(), locked(5));
}

#[test]
fn test_records_use_well_known_keys() {
    let storage = Arc::new(MemoryKvStorage::new());
    let (ctl, _clock) = controller_over(storage.clone());
    ctl.submit_failed_attempt().unwrap();

    assert!(storage.contains("lastFailureTime").unwrap());
    assert_eq!(
        storage.load("consecutiveFailures").unwrap().as_deref(),
        Some("1")
    );
}

// ============================================================
// Verification outcomes
// ============================================================

#[test]
fn test_unauthorized_outcome_counts_as_failure() {
    let (ctl, _clock) = controller();
    ctl.record_outcome(&VerificationOutcome::Unauthorized).unwrap();
    ctl.record_outcome(&VerificationOutcome::Unauthorized).unwrap();

    assert_eq!(ctl.state().unwrap(), locked(10));
}

#[test]
fn test_success_outcome_resets() {
    let (ctl, _clock) = controller();
    ctl.submit_failed_attempt().unwrap();

    let token = GreenPassToken::new("HC1:payload", Some(epoch()));
    ctl.record_outcome(&VerificationOutcome::Success(token)).unwrap();

    assert!(ctl.store().state().unwrap().is_absent());
}

#[test]
fn test_other_outcomes_leave_record_alone() {
    let (ctl, _clock) = controller();
    ctl.submit_failed_attempt().unwrap();

    for outcome in [
        VerificationOutcome::ConnectionError,
        VerificationOutcome::ServerError,
        VerificationOutcome::TokenWrong,
        VerificationOutcome::TokenAlreadyUsed,
    ] {
        ctl.record_outcome(&outcome).unwrap();
    }

    assert_eq!(ctl.store().consecutive_failures().unwrap(), Some(1));
}

#[test]
fn test_locked_state_gates_with_question_mark() {
    fn attempt_report(ctl: &BackoffController) -> Result<(), ExposureError> {
        ctl.state()?.ensure_unlocked()?;
        Ok(())
    }

    let (ctl, _clock) = controller();
    assert!(attempt_report(&ctl).is_ok());

    ctl.submit_failed_attempt().unwrap();
    match attempt_report(&ctl) {
        Err(ExposureError::Throttled(active)) => assert_eq!(active.remaining_seconds, 5),
        other => panic!("expected throttled, got {:?}", other),
    }
}

// ============================================================
// Persistence
// ============================================================

/// Scenario: the app restarts while locked
#[test]
fn test_record_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("backoff.db");

    {
        let storage = Arc::new(SqliteKvStorage::open(&path).unwrap());
        let (ctl, _clock) = controller_over(storage);
        ctl.submit_failed_attempt().unwrap();
        ctl.submit_failed_attempt().unwrap();
    }

    let storage = Arc::new(SqliteKvStorage::open(&path).unwrap());
    let (ctl, clock) = controller_over(storage);
    assert_eq!(ctl.state().unwrap(), locked(10));

    clock.advance(Duration::seconds(10));
    assert_eq!(ctl.state().unwrap(), ThrottleState::Unlocked);
}
