// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Exposure Client
//!
//! Façade over a [`ProximityEngine`]: lifecycle control, key history
//! retrieval with interval normalization, diagnosis key submission and
//! retrieval of matching results. Holds no state of its own beyond its
//! configuration; every call goes straight to the engine.

use std::path::PathBuf;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::bridge::complete;
use super::config::{to_vendor_config, RiskScoringConfig};
use super::engine::{
    DeferredInvocation, ProximityEngine, ScanSetting, VendorContactDetail, VendorPeriodicKey,
    VendorSketch,
};
use super::error::{EngineError, EngineOperation};
use super::interval::normalize_interval;
use super::types::{AttenuationDurations, ExposureDetail, ExposureSummary, ProximityKey, RiskLevel};
use crate::error::ExposureResult;

/// Configuration for the exposure client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Background service the engine triggers when matching completes.
    pub completion_service: String,

    /// Platform API level, selects the deferred invocation kind.
    pub platform_api_level: u32,

    /// Scan setting used on start.
    pub scan_setting: ScanSetting,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            completion_service: "BackgroundContactShieldIntentService".to_string(),
            platform_api_level: 26,
            scan_setting: ScanSetting::Default,
        }
    }
}

impl ClientConfig {
    /// Target a different completion service.
    pub fn with_completion_service(mut self, service: impl Into<String>) -> Self {
        self.completion_service = service.into();
        self
    }

    /// Set the platform API level.
    pub fn with_platform_api_level(mut self, api_level: u32) -> Self {
        self.platform_api_level = api_level;
        self
    }

    /// Set the scan setting used on start.
    pub fn with_scan_setting(mut self, setting: ScanSetting) -> Self {
        self.scan_setting = setting;
        self
    }
}

/// Uniform asynchronous client over a vendor proximity engine.
pub struct ExposureClient<E: ProximityEngine> {
    engine: E,
    config: ClientConfig,
}

impl<E: ProximityEngine> ExposureClient<E> {
    /// Creates a client with the default configuration.
    pub fn new(engine: E) -> Self {
        Self::with_config(engine, ClientConfig::default())
    }

    /// Creates a client with an explicit configuration.
    pub fn with_config(engine: E, config: ClientConfig) -> Self {
        ExposureClient { engine, config }
    }

    /// Returns the wrapped engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Starts proximity tracing.
    pub async fn start(&self) -> Result<(), EngineError> {
        let task = self.engine.start_tracing(self.config.scan_setting);
        complete(EngineOperation::Start, task).await?;
        info!(backend = ?self.engine.backend(), "proximity tracing started");
        Ok(())
    }

    /// Stops proximity tracing.
    pub async fn stop(&self) -> Result<(), EngineError> {
        complete(EngineOperation::Stop, self.engine.stop_tracing()).await?;
        info!("proximity tracing stopped");
        Ok(())
    }

    /// Whether the engine is currently tracing.
    pub async fn is_enabled(&self) -> Result<bool, EngineError> {
        complete(EngineOperation::IsEnabled, self.engine.is_tracing_running()).await
    }

    /// Whether scanning works without location services.
    pub fn supports_locationless_scanning(&self) -> bool {
        self.engine.backend().supports_locationless_scanning()
    }

    /// Retrieves the device's temporary exposure keys, day-aligned.
    pub async fn get_temporary_exposure_key_history(
        &self,
    ) -> Result<Vec<ProximityKey>, EngineError> {
        let keys = complete(EngineOperation::KeyHistory, self.engine.periodic_keys()).await?;
        debug!(count = keys.len(), "retrieved periodic keys");
        keys.iter().map(to_proximity_key).collect()
    }

    /// Submits diagnosis key files for matching.
    ///
    /// The configuration is validated before anything reaches the engine.
    pub async fn provide_diagnosis_keys(
        &self,
        key_files: Vec<PathBuf>,
        config: &RiskScoringConfig,
        token: &str,
    ) -> ExposureResult<()> {
        let vendor_config = to_vendor_config(config)?;
        let invocation = DeferredInvocation::for_platform(
            self.config.platform_api_level,
            self.config.completion_service.as_str(),
        );
        let file_count = key_files.len();

        let task = self
            .engine
            .put_shared_key_files(invocation, key_files, vendor_config, token);
        complete(EngineOperation::ProvideDiagnosisKeys, task).await?;

        info!(file_count, "diagnosis keys submitted");
        Ok(())
    }

    /// Retrieves the summary of the matching run identified by `token`.
    pub async fn get_exposure_summary(&self, token: &str) -> Result<ExposureSummary, EngineError> {
        let sketch = complete(
            EngineOperation::ExposureSummary,
            self.engine.contact_sketch(token),
        )
        .await?;
        to_exposure_summary(&sketch)
    }

    /// Retrieves the matched exposures of the run identified by `token`.
    pub async fn get_exposure_information(
        &self,
        token: &str,
    ) -> Result<Vec<ExposureDetail>, EngineError> {
        let details = complete(
            EngineOperation::ExposureInformation,
            self.engine.contact_details(token),
        )
        .await?;
        details.iter().map(to_exposure_detail).collect()
    }
}

fn malformed(operation: EngineOperation, reason: impl Into<String>) -> EngineError {
    EngineError::MalformedResponse {
        operation,
        reason: reason.into(),
    }
}

fn to_proximity_key(key: &VendorPeriodicKey) -> Result<ProximityKey, EngineError> {
    let interval = normalize_interval(key.valid_time, key.life_time);
    let op = EngineOperation::KeyHistory;

    let rolling_start_interval = u32::try_from(interval.rolling_start_interval)
        .map_err(|_| malformed(op, format!("valid time {} out of range", key.valid_time)))?;
    let rolling_period = u32::try_from(interval.rolling_period)
        .map_err(|_| malformed(op, format!("life time {} out of range", key.life_time)))?;

    Ok(ProximityKey {
        key_data: BASE64.encode(&key.content),
        rolling_start_interval,
        rolling_period,
        transmission_risk_level: RiskLevel::from_value(key.initial_risk_level),
    })
}

fn attenuation_durations(
    operation: EngineOperation,
    durations: &[i32],
) -> Result<AttenuationDurations, EngineError> {
    AttenuationDurations::from_positional(durations).ok_or_else(|| {
        malformed(
            operation,
            format!("expected 3 attenuation durations, got {}", durations.len()),
        )
    })
}

fn to_exposure_summary(sketch: &VendorSketch) -> Result<ExposureSummary, EngineError> {
    let op = EngineOperation::ExposureSummary;
    Ok(ExposureSummary {
        days_since_last_exposure: u32::try_from(sketch.days_since_last_hit)
            .map_err(|_| malformed(op, "negative days since last exposure"))?,
        matched_key_count: u32::try_from(sketch.number_of_hits)
            .map_err(|_| malformed(op, "negative matched key count"))?,
        maximum_risk_score: sketch.max_risk_value,
        attenuation_durations: attenuation_durations(op, &sketch.attenuation_durations)?,
        risk_score_sum: sketch.summation_risk_value,
    })
}

fn to_exposure_detail(detail: &VendorContactDetail) -> Result<ExposureDetail, EngineError> {
    Ok(ExposureDetail {
        day_number: detail.day_number,
        duration_minutes: detail.duration_minutes,
        attenuation_value: detail.attenuation_risk_value,
        transmission_risk_level: RiskLevel::from_value(detail.initial_risk_level),
        total_risk_score: detail.total_risk_value,
        attenuation_durations: attenuation_durations(
            EngineOperation::ExposureInformation,
            &detail.attenuation_durations,
        )?,
    })
}
