// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Normalized exposure data model.

use serde::{Deserialize, Serialize};

/// Transmission risk level, as defined by the distribution protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum RiskLevel {
    Invalid,
    Lowest,
    Low,
    LowMedium,
    Medium,
    MediumHigh,
    High,
    VeryHigh,
    Highest,
}

impl RiskLevel {
    /// Maps a raw level; anything outside 0..=8 is `Invalid`.
    pub fn from_value(value: i32) -> Self {
        match value {
            1 => RiskLevel::Lowest,
            2 => RiskLevel::Low,
            3 => RiskLevel::LowMedium,
            4 => RiskLevel::Medium,
            5 => RiskLevel::MediumHigh,
            6 => RiskLevel::High,
            7 => RiskLevel::VeryHigh,
            8 => RiskLevel::Highest,
            _ => RiskLevel::Invalid,
        }
    }

    /// Returns the raw protocol value.
    pub fn value(self) -> i32 {
        match self {
            RiskLevel::Invalid => 0,
            RiskLevel::Lowest => 1,
            RiskLevel::Low => 2,
            RiskLevel::LowMedium => 3,
            RiskLevel::Medium => 4,
            RiskLevel::MediumHigh => 5,
            RiskLevel::High => 6,
            RiskLevel::VeryHigh => 7,
            RiskLevel::Highest => 8,
        }
    }
}

impl From<i32> for RiskLevel {
    fn from(value: i32) -> Self {
        RiskLevel::from_value(value)
    }
}

impl From<RiskLevel> for i32 {
    fn from(level: RiskLevel) -> Self {
        level.value()
    }
}

/// A temporary exposure key ready for upload.
///
/// `rolling_start_interval` is always day-aligned and `rolling_period`
/// never exceeds one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProximityKey {
    /// Base64 of the key material.
    pub key_data: String,
    #[serde(rename = "rolling_start_number")]
    pub rolling_start_interval: u32,
    pub rolling_period: u32,
    pub transmission_risk_level: RiskLevel,
}

/// Minutes spent in each attenuation bucket.
///
/// The vendor reports these positionally: index 0 is high, 1 medium, 2 low.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttenuationDurations {
    pub high_minutes: i32,
    pub medium_minutes: i32,
    pub low_minutes: i32,
}

impl AttenuationDurations {
    /// Reads the first three positions of a vendor duration array.
    ///
    /// Returns `None` when fewer than three entries are present.
    pub fn from_positional(durations: &[i32]) -> Option<Self> {
        match durations {
            [high, medium, low, ..] => Some(AttenuationDurations {
                high_minutes: *high,
                medium_minutes: *medium,
                low_minutes: *low,
            }),
            _ => None,
        }
    }
}

/// Aggregated result of matching against a batch of diagnosis keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExposureSummary {
    pub days_since_last_exposure: u32,
    pub matched_key_count: u32,
    pub maximum_risk_score: i32,
    pub attenuation_durations: AttenuationDurations,
    pub risk_score_sum: i32,
}

/// A single matched exposure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExposureDetail {
    pub day_number: i64,
    pub duration_minutes: i32,
    pub attenuation_value: i32,
    pub transmission_risk_level: RiskLevel,
    pub total_risk_score: i32,
    pub attenuation_durations: AttenuationDurations,
}
