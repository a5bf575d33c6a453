// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Common Test Utilities
//!
//! Shared fixtures for the integration tests.

#![allow(dead_code)]

pub mod strategies;

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use exposure_core::backoff::{BackoffController, BackoffStore, ManualClock};
use exposure_core::exposure::RiskScoringConfig;
use exposure_core::storage::{KvStorage, MemoryKvStorage};

/// Fixed wall-clock instant used as "now" by the backoff tests.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

/// A risk configuration with valid table lengths.
pub fn sample_risk_config() -> RiskScoringConfig {
    RiskScoringConfig {
        minimum_risk_threshold: 10,
        attenuation_score_table: vec![1, 2, 3, 4, 5, 6, 7, 8],
        days_since_exposure_score_table: vec![8, 8, 7, 7, 6, 6, 5, 5],
        duration_score_table: vec![0, 1, 2, 3, 4, 5, 6, 7],
        transmission_risk_score_table: vec![1, 1, 1, 1, 1, 1, 1, 1],
        attenuation_bucket_thresholds: vec![50, 70],
    }
}

/// Backoff controller over the given storage with a manual clock at [`epoch`].
pub fn controller_over(storage: Arc<dyn KvStorage>) -> (BackoffController, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(epoch()));
    let controller = BackoffController::new(BackoffStore::new(storage), clock.clone());
    (controller, clock)
}

/// Backoff controller over fresh in-memory storage.
pub fn controller() -> (BackoffController, Arc<ManualClock>) {
    controller_over(Arc::new(MemoryKvStorage::new()))
}
