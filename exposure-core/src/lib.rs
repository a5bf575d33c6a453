// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Exposure Core Library
//!
//! Exposure key exchange with a vendor proximity-tracing engine and
//! throttled report generation for a contact-tracing client.

pub mod backoff;
pub mod error;
pub mod exposure;
pub mod storage;
pub mod verification;

pub use backoff::{
    BackoffController, BackoffPolicy, BackoffState, BackoffStore, Clock, Countdown, ManualClock,
    SystemClock, ThrottleActive, ThrottleState,
};
pub use error::{ExposureError, ExposureResult};
pub use exposure::{
    ClientConfig, ConfigurationArityError, EngineBackend, EngineError, ExposureClient,
    ExposureDetail, ExposureSummary, MockEngine, ProximityEngine, ProximityKey, RiskLevel,
    RiskScoringConfig, VendorFailure,
};
pub use storage::{KvStorage, KvStorageExt, MemoryKvStorage, SqliteKvStorage, StorageError};
pub use verification::{CodeValidator, GreenPassToken, TokenKind, VerificationOutcome};
