// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Proximity Engine Boundary
//!
//! In-process interface of the vendor proximity-tracing engine. Every call
//! returns a [`VendorTask`] that completes through a listener pair; the
//! [`bridge`](super::bridge) module turns those into futures.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::bridge::VendorTask;
use super::config::VendorConfig;

/// Android API level from which completion must target a foreground service.
pub const FOREGROUND_SERVICE_MIN_API_LEVEL: u32 = 26;

/// Which vendor engine backs the client, and what it can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineBackend {
    /// Huawei Contact Shield.
    ContactShield,
    /// Google/Apple Exposure Notification.
    ExposureNotification {
        /// Whether the device can scan without location services.
        locationless_scanning: bool,
    },
}

impl EngineBackend {
    /// Whether BLE scanning works with location services turned off.
    ///
    /// Contact Shield exposes no such capability, so it always reports
    /// false. This is a limitation of that engine, not of the device.
    pub fn supports_locationless_scanning(&self) -> bool {
        match self {
            EngineBackend::ContactShield => false,
            EngineBackend::ExposureNotification {
                locationless_scanning,
            } => *locationless_scanning,
        }
    }
}

/// Scan setting passed to the engine on start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanSetting {
    #[default]
    Default,
    /// Scan only while the app is in the foreground.
    Foreground,
}

/// Kind of platform component the engine wakes up on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationKind {
    ForegroundService,
    Service,
}

/// Handle the engine uses to notify completion out-of-band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredInvocation {
    pub kind: InvocationKind,
    /// Name of the background service to trigger.
    pub target: String,
    pub request_code: i32,
    /// Replace the extras of an existing handle for the same target.
    pub update_current: bool,
}

impl DeferredInvocation {
    /// Builds the handle suitable for the given platform API level.
    pub fn for_platform(api_level: u32, target: impl Into<String>) -> Self {
        let kind = if api_level >= FOREGROUND_SERVICE_MIN_API_LEVEL {
            InvocationKind::ForegroundService
        } else {
            InvocationKind::Service
        };
        DeferredInvocation {
            kind,
            target: target.into(),
            request_code: 0,
            update_current: true,
        }
    }
}

/// A periodic key as reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorPeriodicKey {
    pub content: Vec<u8>,
    /// Start of validity, in 10-minute intervals since the epoch.
    pub valid_time: i64,
    /// Validity length, in 10-minute intervals.
    pub life_time: i64,
    pub initial_risk_level: i32,
}

/// Summary ("sketch") of a matching run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorSketch {
    pub days_since_last_hit: i32,
    pub number_of_hits: i32,
    pub max_risk_value: i32,
    pub attenuation_durations: Vec<i32>,
    pub summation_risk_value: i32,
}

/// One matched contact of a matching run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorContactDetail {
    pub day_number: i64,
    pub duration_minutes: i32,
    pub attenuation_risk_value: i32,
    pub initial_risk_level: i32,
    pub total_risk_value: i32,
    pub attenuation_durations: Vec<i32>,
}

/// The vendor proximity-tracing engine.
pub trait ProximityEngine: Send + Sync {
    /// Identifies the backend and its capabilities.
    fn backend(&self) -> EngineBackend;

    fn start_tracing(&self, setting: ScanSetting) -> VendorTask<()>;

    fn stop_tracing(&self) -> VendorTask<()>;

    fn is_tracing_running(&self) -> VendorTask<bool>;

    /// Returns the device's own periodic keys.
    fn periodic_keys(&self) -> VendorTask<Vec<VendorPeriodicKey>>;

    /// Hands diagnosis key files to the engine for matching.
    fn put_shared_key_files(
        &self,
        invocation: DeferredInvocation,
        key_files: Vec<PathBuf>,
        config: VendorConfig,
        token: &str,
    ) -> VendorTask<()>;

    fn contact_sketch(&self, token: &str) -> VendorTask<VendorSketch>;

    fn contact_details(&self, token: &str) -> VendorTask<Vec<VendorContactDetail>>;
}
