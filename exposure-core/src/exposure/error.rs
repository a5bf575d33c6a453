// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Engine Error Types

use std::fmt;

use thiserror::Error;

/// Failure cause reported by the vendor engine through its failure listener.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("vendor status {status_code}: {message}")]
pub struct VendorFailure {
    /// Vendor-specific status code.
    pub status_code: i32,
    /// Human-readable description from the vendor.
    pub message: String,
}

impl VendorFailure {
    /// Creates a new vendor failure.
    pub fn new(status_code: i32, message: impl Into<String>) -> Self {
        VendorFailure {
            status_code,
            message: message.into(),
        }
    }
}

/// Engine operation that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineOperation {
    Start,
    Stop,
    IsEnabled,
    KeyHistory,
    ProvideDiagnosisKeys,
    ExposureSummary,
    ExposureInformation,
}

impl fmt::Display for EngineOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EngineOperation::Start => "start",
            EngineOperation::Stop => "stop",
            EngineOperation::IsEnabled => "is-enabled",
            EngineOperation::KeyHistory => "key history",
            EngineOperation::ProvideDiagnosisKeys => "provide diagnosis keys",
            EngineOperation::ExposureSummary => "exposure summary",
            EngineOperation::ExposureInformation => "exposure information",
        };
        f.write_str(name)
    }
}

/// Errors raised while talking to the proximity engine.
///
/// Never retried here: the caller decides what to do.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("{operation} failed: {cause}")]
    Failed {
        operation: EngineOperation,
        #[source]
        cause: VendorFailure,
    },

    #[error("{operation} was dropped by the engine without a result")]
    Abandoned { operation: EngineOperation },

    #[error("{operation} returned a malformed response: {reason}")]
    MalformedResponse {
        operation: EngineOperation,
        reason: String,
    },
}

impl EngineError {
    /// Returns the operation that failed.
    pub fn operation(&self) -> EngineOperation {
        match self {
            EngineError::Failed { operation, .. }
            | EngineError::Abandoned { operation }
            | EngineError::MalformedResponse { operation, .. } => *operation,
        }
    }

    /// Returns the vendor cause, if the engine reported one.
    pub fn vendor_cause(&self) -> Option<&VendorFailure> {
        match self {
            EngineError::Failed { cause, .. } => Some(cause),
            _ => None,
        }
    }
}
