// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Risk Scoring Configuration
//!
//! Translates the normalized risk-scoring configuration received from the
//! backend into the fixed-arity shape the vendor engine consumes. Position
//! in each table carries meaning (attenuation buckets from weak to strong
//! signal, day offsets from today backwards), so order is preserved as-is.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of entries in every score table.
pub const SCORE_TABLE_LEN: usize = 8;

/// Number of attenuation bucket thresholds.
pub const ATTENUATION_THRESHOLDS_LEN: usize = 2;

/// A table with the wrong number of entries was handed to the translator.
///
/// This is a caller bug, not an environment failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{table} must have {expected} entries, got {actual}")]
pub struct ConfigurationArityError {
    /// Name of the offending table.
    pub table: &'static str,
    /// Required length.
    pub expected: usize,
    /// Length that was supplied.
    pub actual: usize,
}

/// Risk-scoring parameters as distributed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskScoringConfig {
    pub minimum_risk_threshold: i32,
    pub attenuation_score_table: Vec<i32>,
    pub days_since_exposure_score_table: Vec<i32>,
    pub duration_score_table: Vec<i32>,
    pub transmission_risk_score_table: Vec<i32>,
    pub attenuation_bucket_thresholds: Vec<i32>,
}

/// Diagnosis configuration in the vendor engine's shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorConfig {
    pub minimum_risk_value_threshold: i32,
    pub attenuation_risk_values: [i32; SCORE_TABLE_LEN],
    pub days_after_contacted_risk_values: [i32; SCORE_TABLE_LEN],
    pub duration_risk_values: [i32; SCORE_TABLE_LEN],
    pub initial_risk_level_risk_values: [i32; SCORE_TABLE_LEN],
    pub attenuation_duration_thresholds: [i32; ATTENUATION_THRESHOLDS_LEN],
}

impl RiskScoringConfig {
    /// Checks every table against the vendor engine's fixed arity.
    pub fn validate(&self) -> Result<(), ConfigurationArityError> {
        to_vendor_config(self).map(|_| ())
    }
}

/// Maps a risk-scoring configuration onto the vendor configuration.
///
/// Fails before anything reaches the engine if a table has the wrong length.
pub fn to_vendor_config(cfg: &RiskScoringConfig) -> Result<VendorConfig, ConfigurationArityError> {
    Ok(VendorConfig {
        minimum_risk_value_threshold: cfg.minimum_risk_threshold,
        attenuation_risk_values: fixed("attenuation_score_table", &cfg.attenuation_score_table)?,
        days_after_contacted_risk_values: fixed(
            "days_since_exposure_score_table",
            &cfg.days_since_exposure_score_table,
        )?,
        duration_risk_values: fixed("duration_score_table", &cfg.duration_score_table)?,
        initial_risk_level_risk_values: fixed(
            "transmission_risk_score_table",
            &cfg.transmission_risk_score_table,
        )?,
        attenuation_duration_thresholds: fixed(
            "attenuation_bucket_thresholds",
            &cfg.attenuation_bucket_thresholds,
        )?,
    })
}

fn fixed<const N: usize>(
    table: &'static str,
    values: &[i32],
) -> Result<[i32; N], ConfigurationArityError> {
    values.try_into().map_err(|_| ConfigurationArityError {
        table,
        expected: N,
        actual: values.len(),
    })
}
