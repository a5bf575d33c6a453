// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Rolling Interval Arithmetic
//!
//! The vendor engine reports a key's validity start and lifetime in
//! 10-minute intervals, and the start is not necessarily aligned to a day
//! boundary. The diagnosis-key distribution protocol requires the rolling
//! start number to be the first interval of a UTC day and the rolling
//! period to stay within that day.

/// Number of 10-minute intervals in one day.
pub const INTERVALS_PER_DAY: i64 = 144;

/// A key validity window aligned to the protocol's day boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollingInterval {
    /// First 10-minute interval of the day the key became valid.
    pub rolling_start_interval: i64,
    /// Number of intervals the key stays valid, at most one day.
    pub rolling_period: i64,
}

/// Returns the first interval of the day containing `interval`.
pub fn day_first_interval(interval: i64) -> i64 {
    interval.div_euclid(INTERVALS_PER_DAY) * INTERVALS_PER_DAY
}

/// Normalizes a vendor validity instant and lifetime to a day-aligned window.
///
/// The start is forced down to its day boundary and the period is extended
/// by the same amount, then capped at one full day. A zero lifetime on a
/// day boundary yields an empty period.
pub fn normalize_interval(valid_time: i64, life_time: i64) -> RollingInterval {
    let day_start = day_first_interval(valid_time);
    let rolling_period = valid_time
        .saturating_add(life_time)
        .saturating_sub(day_start)
        .min(INTERVALS_PER_DAY);

    RollingInterval {
        rolling_start_interval: day_start,
        rolling_period,
    }
}
