// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Crate Error Types
//!
//! Unified error type over the module errors.

use thiserror::Error;

use crate::backoff::ThrottleActive;
use crate::exposure::{ConfigurationArityError, EngineError};
use crate::storage::StorageError;

/// Unified error type for exposure operations.
#[derive(Error, Debug)]
pub enum ExposureError {
    /// The proximity engine reported a failure.
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    /// A risk configuration table had the wrong length.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationArityError),

    /// Storage operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Report attempts are currently throttled.
    #[error("throttled: {0}")]
    Throttled(#[from] ThrottleActive),
}

/// Result type for exposure operations.
pub type ExposureResult<T> = Result<T, ExposureError>;
