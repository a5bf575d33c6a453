// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mock proximity engine for testing.

use std::path::PathBuf;
use std::thread;

use parking_lot::Mutex;

use super::bridge::{FailureListener, PendingTask, ReadyTask, SuccessListener, VendorTask};
use super::config::VendorConfig;
use super::engine::{
    DeferredInvocation, EngineBackend, ProximityEngine, ScanSetting, VendorContactDetail,
    VendorPeriodicKey, VendorSketch,
};
use super::error::VendorFailure;

/// How the mock engine fires listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionMode {
    /// Fire on registration, on the caller's thread.
    Immediate,
    /// Fire from a separate thread, as a real engine does.
    Background,
}

/// A recorded call to `put_shared_key_files`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySubmission {
    pub invocation: DeferredInvocation,
    pub key_files: Vec<PathBuf>,
    pub config: VendorConfig,
    pub token: String,
}

/// Scriptable in-process engine.
pub struct MockEngine {
    /// Backend reported by the engine.
    pub backend: EngineBackend,
    /// Periodic keys returned from `periodic_keys`.
    pub keys: Vec<VendorPeriodicKey>,
    /// Sketch returned from `contact_sketch`.
    pub sketch: VendorSketch,
    /// Details returned from `contact_details`.
    pub details: Vec<VendorContactDetail>,
    /// When set, every operation fails with this cause.
    pub failure: Option<VendorFailure>,
    /// How listeners are fired.
    pub mode: CompletionMode,
    running: Mutex<bool>,
    scan_setting: Mutex<Option<ScanSetting>>,
    submissions: Mutex<Vec<KeySubmission>>,
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEngine {
    /// Creates a Contact Shield mock that succeeds with empty results.
    pub fn new() -> Self {
        MockEngine {
            backend: EngineBackend::ContactShield,
            keys: Vec::new(),
            sketch: VendorSketch {
                days_since_last_hit: 0,
                number_of_hits: 0,
                max_risk_value: 0,
                attenuation_durations: vec![0, 0, 0],
                summation_risk_value: 0,
            },
            details: Vec::new(),
            failure: None,
            mode: CompletionMode::Immediate,
            running: Mutex::new(false),
            scan_setting: Mutex::new(None),
            submissions: Mutex::new(Vec::new()),
        }
    }

    /// Creates a mock where every operation fails.
    pub fn failing(status_code: i32, message: &str) -> Self {
        MockEngine {
            failure: Some(VendorFailure::new(status_code, message)),
            ..Self::new()
        }
    }

    /// Fires listeners from a background thread.
    pub fn in_background(mut self) -> Self {
        self.mode = CompletionMode::Background;
        self
    }

    /// Whether tracing was started and not stopped since.
    pub fn is_running(&self) -> bool {
        *self.running.lock()
    }

    /// Scan setting of the most recent start request.
    pub fn last_scan_setting(&self) -> Option<ScanSetting> {
        *self.scan_setting.lock()
    }

    /// Returns every key file submission seen so far.
    pub fn submissions(&self) -> Vec<KeySubmission> {
        self.submissions.lock().clone()
    }

    fn task<T: Send + 'static>(&self, value: T) -> VendorTask<T> {
        let ready = match &self.failure {
            Some(cause) => ReadyTask::failure(cause.clone()),
            None => ReadyTask::success(value),
        };
        match self.mode {
            CompletionMode::Immediate => ready.boxed(),
            CompletionMode::Background => Box::new(BackgroundTask { inner: ready }),
        }
    }
}

struct BackgroundTask<T> {
    inner: ReadyTask<T>,
}

impl<T: Send + 'static> PendingTask<T> for BackgroundTask<T> {
    fn add_listeners(self: Box<Self>, on_success: SuccessListener<T>, on_failure: FailureListener) {
        let inner = Box::new(self.inner);
        thread::spawn(move || inner.add_listeners(on_success, on_failure));
    }
}

impl ProximityEngine for MockEngine {
    fn backend(&self) -> EngineBackend {
        self.backend
    }

    fn start_tracing(&self, setting: ScanSetting) -> VendorTask<()> {
        *self.scan_setting.lock() = Some(setting);
        if self.failure.is_none() {
            *self.running.lock() = true;
        }
        self.task(())
    }

    fn stop_tracing(&self) -> VendorTask<()> {
        if self.failure.is_none() {
            *self.running.lock() = false;
        }
        self.task(())
    }

    fn is_tracing_running(&self) -> VendorTask<bool> {
        self.task(self.is_running())
    }

    fn periodic_keys(&self) -> VendorTask<Vec<VendorPeriodicKey>> {
        self.task(self.keys.clone())
    }

    fn put_shared_key_files(
        &self,
        invocation: DeferredInvocation,
        key_files: Vec<PathBuf>,
        config: VendorConfig,
        token: &str,
    ) -> VendorTask<()> {
        self.submissions.lock().push(KeySubmission {
            invocation,
            key_files,
            config,
            token: token.to_string(),
        });
        self.task(())
    }

    fn contact_sketch(&self, _token: &str) -> VendorTask<VendorSketch> {
        self.task(self.sketch.clone())
    }

    fn contact_details(&self, _token: &str) -> VendorTask<Vec<VendorContactDetail>> {
        self.task(self.details.clone())
    }
}
