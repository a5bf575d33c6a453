// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Backoff policy parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tuning of the report backoff.
///
/// Wait after `n` consecutive failures is `base * 2^(n-1)`, capped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackoffPolicy {
    /// Wait after the first failure, in seconds.
    pub base_seconds: u64,

    /// Upper bound on the wait, in seconds.
    pub max_seconds: u64,

    /// Age after which a recorded failure no longer counts, in seconds.
    pub expiry_seconds: u64,

    /// Countdown recompute period, in milliseconds.
    pub tick_millis: u64,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            base_seconds: 5,
            max_seconds: 30 * 60,         // 30 minutes
            expiry_seconds: 24 * 60 * 60, // 24 hours
            tick_millis: 1000,
        }
    }
}

impl BackoffPolicy {
    /// Seconds to wait after `failures` consecutive failures.
    pub fn seconds_to_wait(&self, failures: u32) -> u64 {
        if failures == 0 {
            return 0;
        }
        let factor = 1u64.checked_shl(failures - 1).unwrap_or(u64::MAX);
        self.base_seconds.saturating_mul(factor).min(self.max_seconds)
    }

    /// Age after which a recorded failure is expired.
    pub fn expiry(&self) -> chrono::Duration {
        let max_seconds = (i64::MAX / 1000) as u64;
        chrono::Duration::seconds(self.expiry_seconds.min(max_seconds) as i64)
    }

    /// Countdown tick period.
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_millis.max(1))
    }
}
