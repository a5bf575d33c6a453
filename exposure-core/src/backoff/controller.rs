// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Report Backoff Controller
//!
//! Throttles report attempts after failed verifications. Each failure is
//! persisted; the wait grows exponentially with consecutive failures and a
//! failure older than the expiry window no longer counts.
//!
//! A record with only one of its two fields present (a crash between
//! writes) is treated as unlocked rather than locked.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{info, warn};

use super::clock::Clock;
use super::countdown::Countdown;
use super::policy::BackoffPolicy;
use super::store::{BackoffState, BackoffStore};
use crate::storage::StorageError;
use crate::verification::VerificationOutcome;

/// Whether a report attempt may proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleState {
    Unlocked,
    Locked { remaining_seconds: u64 },
}

impl ThrottleState {
    fn from_remaining(remaining: Option<u64>) -> Self {
        match remaining {
            Some(remaining_seconds) => ThrottleState::Locked { remaining_seconds },
            None => ThrottleState::Unlocked,
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, ThrottleState::Locked { .. })
    }

    /// Seconds left before the next attempt, if locked.
    pub fn remaining_seconds(&self) -> Option<u64> {
        match self {
            ThrottleState::Locked { remaining_seconds } => Some(*remaining_seconds),
            ThrottleState::Unlocked => None,
        }
    }

    /// Turns a locked state into an error, for callers gating with `?`.
    pub fn ensure_unlocked(self) -> Result<(), ThrottleActive> {
        match self {
            ThrottleState::Unlocked => Ok(()),
            ThrottleState::Locked { remaining_seconds } => Err(ThrottleActive { remaining_seconds }),
        }
    }
}

/// A report attempt was made while the backoff is active.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("report attempts throttled for another {remaining_seconds}s")]
pub struct ThrottleActive {
    pub remaining_seconds: u64,
}

/// Derives throttle state from the persisted backoff record.
///
/// Holds no state of its own; cheap to clone.
#[derive(Clone)]
pub struct BackoffController {
    store: BackoffStore,
    clock: Arc<dyn Clock>,
    policy: BackoffPolicy,
}

impl BackoffController {
    /// Creates a controller with the default policy.
    pub fn new(store: BackoffStore, clock: Arc<dyn Clock>) -> Self {
        Self::with_policy(store, clock, BackoffPolicy::default())
    }

    pub fn with_policy(store: BackoffStore, clock: Arc<dyn Clock>, policy: BackoffPolicy) -> Self {
        BackoffController {
            store,
            clock,
            policy,
        }
    }

    pub fn policy(&self) -> &BackoffPolicy {
        &self.policy
    }

    pub fn store(&self) -> &BackoffStore {
        &self.store
    }

    /// Whether the recorded failure no longer counts at `now`.
    ///
    /// A failure time in the future means the clock went backwards; it is
    /// treated as expired, otherwise the user would stay locked out until
    /// the clock caught up.
    pub fn is_expired(&self, state: &BackoffState, now: DateTime<Utc>) -> bool {
        let Some(last_failure) = state.last_failure_time else {
            return false;
        };
        if now < last_failure {
            return true;
        }
        match last_failure.checked_add_signed(self.policy.expiry()) {
            Some(expires_at) => now >= expires_at,
            None => false,
        }
    }

    /// Seconds until the next attempt is allowed, or `None` when unlocked.
    pub fn remaining_seconds(&self) -> Result<Option<u64>, StorageError> {
        let state = self.store.state()?;
        Ok(self.remaining_at(&state, self.clock.now()))
    }

    /// Current throttle state.
    pub fn state(&self) -> Result<ThrottleState, StorageError> {
        self.remaining_seconds().map(ThrottleState::from_remaining)
    }

    /// Records a failed attempt and returns the resulting state.
    ///
    /// An expired record is reset first so stale failures don't add up.
    pub fn submit_failed_attempt(&self) -> Result<ThrottleState, StorageError> {
        let now = self.clock.now();
        let previous = self.store.state()?;

        let previous_failures = if self.is_expired(&previous, now) {
            info!("previous report failure expired, starting over");
            self.reset()?;
            0
        } else {
            previous.consecutive_failures.unwrap_or(0)
        };

        let state = BackoffState {
            last_failure_time: Some(now),
            consecutive_failures: Some(previous_failures.saturating_add(1)),
        };
        self.store.set_last_failure_time(state.last_failure_time)?;
        self.store.set_consecutive_failures(state.consecutive_failures)?;

        let throttle = ThrottleState::from_remaining(self.remaining_at(&state, now));
        warn!(
            failures = previous_failures.saturating_add(1),
            remaining_seconds = throttle.remaining_seconds().unwrap_or(0),
            "report attempt failed, throttling"
        );
        Ok(throttle)
    }

    /// Clears the record, unlocking immediately.
    pub fn reset(&self) -> Result<(), StorageError> {
        self.store.clear()?;
        info!("report backoff reset");
        Ok(())
    }

    /// Updates the record after a verification attempt.
    ///
    /// Unauthorized counts as a failed attempt and success resets the
    /// record. Other failures are left to the caller.
    pub fn record_outcome(&self, outcome: &VerificationOutcome) -> Result<(), StorageError> {
        match outcome {
            VerificationOutcome::Unauthorized => self.submit_failed_attempt().map(|_| ()),
            VerificationOutcome::Success(_) => self.reset(),
            _ => Ok(()),
        }
    }

    /// Starts a live countdown of the remaining seconds.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn countdown(&self) -> Countdown {
        Countdown::spawn(self.clone())
    }

    /// Like [`remaining_seconds`](Self::remaining_seconds), but unreadable
    /// storage reads as unlocked.
    pub(crate) fn remaining_or_unlocked(&self) -> Option<u64> {
        self.remaining_seconds().unwrap_or_else(|err| {
            warn!(error = %err, "cannot read backoff record, treating as unlocked");
            None
        })
    }

    fn remaining_at(&self, state: &BackoffState, now: DateTime<Utc>) -> Option<u64> {
        let (Some(last_failure), Some(failures)) =
            (state.last_failure_time, state.consecutive_failures)
        else {
            return None;
        };
        if self.is_expired(state, now) {
            return None;
        }

        let wait = self.policy.seconds_to_wait(failures);
        // Not expired, so `now >= last_failure` and the difference is non-negative.
        let elapsed = (now - last_failure).num_seconds().max(0) as u64;
        if elapsed >= wait {
            None
        } else {
            Some(wait - elapsed)
        }
    }
}
