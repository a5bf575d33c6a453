// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Exposure Key Exchange Module
//!
//! Normalizes a vendor proximity-tracing engine into a uniform async
//! contract: key history with protocol-aligned intervals, diagnosis key
//! submission and matching results.

pub mod bridge;
pub mod client;
pub mod config;
pub mod engine;
pub mod error;
pub mod interval;
pub mod mock;
pub mod types;

pub use bridge::{
    complete, resolution, FailureListener, PendingTask, ReadyTask, Resolution, Resolver,
    SuccessListener, VendorTask,
};
pub use client::{ClientConfig, ExposureClient};
pub use config::{
    to_vendor_config, ConfigurationArityError, RiskScoringConfig, VendorConfig,
    ATTENUATION_THRESHOLDS_LEN, SCORE_TABLE_LEN,
};
pub use engine::{
    DeferredInvocation, EngineBackend, InvocationKind, ProximityEngine, ScanSetting,
    VendorContactDetail, VendorPeriodicKey, VendorSketch, FOREGROUND_SERVICE_MIN_API_LEVEL,
};
pub use error::{EngineError, EngineOperation, VendorFailure};
pub use interval::{day_first_interval, normalize_interval, RollingInterval, INTERVALS_PER_DAY};
pub use mock::{CompletionMode, KeySubmission, MockEngine};
pub use types::{AttenuationDurations, ExposureDetail, ExposureSummary, ProximityKey, RiskLevel};
