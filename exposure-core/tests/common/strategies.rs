// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Proptest Strategies
//!
//! Reusable proptest strategies for property-based testing.

use proptest::prelude::*;

/// Strategy for key validity instants, in 10-minute intervals since the epoch.
///
/// Covers the epoch itself up to well past the year 2100.
pub fn valid_time_strategy() -> impl Strategy<Value = i64> {
    0i64..20_000_000
}

/// Strategy for key lifetimes, in 10-minute intervals.
///
/// Lifetimes start at one interval; a key valid for zero intervals
/// is never reported by the engine.
pub fn life_time_strategy() -> impl Strategy<Value = i64> {
    1i64..=1_000
}

/// Strategy for consecutive failure counts.
pub fn failure_count_strategy() -> impl Strategy<Value = u32> {
    1u32..=u32::MAX
}
