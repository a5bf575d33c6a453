// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Verification Boundary
//!
//! Types exchanged with the verification backend when generating a green
//! pass. The backoff controller only reacts to [`VerificationOutcome`].

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A verified green pass token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreenPassToken {
    pub payload: String,
    /// Server time the token was issued at, when the backend reported it.
    pub server_timestamp: Option<DateTime<Utc>>,
}

impl GreenPassToken {
    pub fn new(payload: impl Into<String>, server_timestamp: Option<DateTime<Utc>>) -> Self {
        GreenPassToken {
            payload: payload.into(),
            server_timestamp,
        }
    }
}

/// Outcome of a verification or generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    Success(GreenPassToken),
    Unauthorized,
    ConnectionError,
    ServerError,
    /// The code failed its check-digit validation.
    TokenWrong,
    TokenAlreadyUsed,
}

impl VerificationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, VerificationOutcome::Success(_))
    }

    pub fn token(&self) -> Option<&GreenPassToken> {
        match self {
            VerificationOutcome::Success(token) => Some(token),
            _ => None,
        }
    }
}

/// Kind of authorization code entered by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Cun,
    Nrfe,
    Nucg,
    Otp,
}

impl FromStr for TokenKind {
    type Err = std::convert::Infallible;

    /// Unknown kinds fall back to OTP.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "CUN" => TokenKind::Cun,
            "NRFE" => TokenKind::Nrfe,
            "NUCG" => TokenKind::Nucg,
            _ => TokenKind::Otp,
        })
    }
}

/// Local check-digit validation of an authorization code.
///
/// Implementations return `Success` carrying the code as payload (without
/// a server timestamp) when the check digit matches, `TokenWrong` otherwise.
pub trait CodeValidator {
    fn validate(&self, kind: TokenKind, token: &str) -> VerificationOutcome;
}
