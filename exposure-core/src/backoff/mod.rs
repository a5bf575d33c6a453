// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Report Backoff Module
//!
//! Persisted, time-based throttling of repeated failed report attempts.

mod clock;
mod controller;
mod countdown;
mod policy;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::{BackoffController, ThrottleActive, ThrottleState};
pub use countdown::Countdown;
pub use policy::BackoffPolicy;
pub use store::{BackoffState, BackoffStore, CONSECUTIVE_FAILURES, LAST_FAILURE_TIME};
