// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Listener-to-Future Bridge
//!
//! The vendor engine reports completion by invoking one of two listeners
//! registered on a pending task. This module turns that into a single
//! awaitable outcome.
//!
//! At most one outcome is ever observed: whichever listener fires first
//! wins and any later invocation is ignored. The engine offers no
//! cancellation, so dropping the returned future only abandons the result;
//! the engine keeps working and its eventual callback becomes a no-op.
//! The bridge adds no time bound either: timeouts belong to the caller.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::debug;

use super::error::{EngineError, EngineOperation, VendorFailure};

/// Listener invoked with the task's value on success.
pub type SuccessListener<T> = Box<dyn FnOnce(T) + Send>;

/// Listener invoked with the vendor's cause on failure.
pub type FailureListener = Box<dyn FnOnce(VendorFailure) + Send>;

/// A vendor operation in flight, completed through a listener pair.
pub trait PendingTask<T>: Send {
    /// Registers the success and failure listeners.
    ///
    /// Implementations may invoke the listeners synchronously, later from
    /// another thread, both of them, or neither.
    fn add_listeners(self: Box<Self>, on_success: SuccessListener<T>, on_failure: FailureListener);
}

/// Boxed pending task as returned by the engine boundary.
pub type VendorTask<T> = Box<dyn PendingTask<T>>;

type Outcome<T> = Result<T, VendorFailure>;

/// Write side of a single-assignment result cell.
///
/// Cloned into each listener; only the first `resolve` takes effect.
pub struct Resolver<T> {
    slot: Arc<Mutex<Option<oneshot::Sender<Outcome<T>>>>>,
}

impl<T> Clone for Resolver<T> {
    fn clone(&self) -> Self {
        Resolver {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> Resolver<T> {
    /// Resolves the cell. Returns false if it was already resolved.
    pub fn resolve(&self, outcome: Outcome<T>) -> bool {
        let sender = self.slot.lock().take();
        match sender {
            Some(tx) => {
                // The waiting side may already be gone; the outcome is then dropped.
                let _ = tx.send(outcome);
                true
            }
            None => {
                debug!("ignoring completion of an already resolved task");
                false
            }
        }
    }

    /// Returns true once an outcome has been recorded.
    pub fn is_resolved(&self) -> bool {
        self.slot.lock().is_none()
    }
}

/// Read side of a single-assignment result cell.
///
/// Yields `None` if every resolver was dropped without resolving.
pub struct Resolution<T> {
    rx: oneshot::Receiver<Outcome<T>>,
}

impl<T> Future for Resolution<T> {
    type Output = Option<Outcome<T>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx).map(Result::ok)
    }
}

/// Creates a connected resolver/resolution pair.
pub fn resolution<T>() -> (Resolver<T>, Resolution<T>) {
    let (tx, rx) = oneshot::channel();
    (
        Resolver {
            slot: Arc::new(Mutex::new(Some(tx))),
        },
        Resolution { rx },
    )
}

/// Awaits a vendor task, mapping its outcome into the engine error taxonomy.
pub async fn complete<T>(operation: EngineOperation, task: VendorTask<T>) -> Result<T, EngineError>
where
    T: Send + 'static,
{
    let (resolver, resolution) = resolution();
    let on_failure = resolver.clone();

    task.add_listeners(
        Box::new(move |value| {
            resolver.resolve(Ok(value));
        }),
        Box::new(move |cause| {
            on_failure.resolve(Err(cause));
        }),
    );

    match resolution.await {
        Some(Ok(value)) => Ok(value),
        Some(Err(cause)) => Err(EngineError::Failed { operation, cause }),
        None => Err(EngineError::Abandoned { operation }),
    }
}

/// A task whose outcome is already known; fires on registration.
pub struct ReadyTask<T> {
    outcome: Outcome<T>,
}

impl<T> ReadyTask<T> {
    /// A task that succeeds with `value`.
    pub fn success(value: T) -> Self {
        ReadyTask { outcome: Ok(value) }
    }

    /// A task that fails with `cause`.
    pub fn failure(cause: VendorFailure) -> Self {
        ReadyTask {
            outcome: Err(cause),
        }
    }

    /// Boxes the task for the engine boundary.
    pub fn boxed(self) -> VendorTask<T>
    where
        T: Send + 'static,
    {
        Box::new(self)
    }
}

impl<T: Send> PendingTask<T> for ReadyTask<T> {
    fn add_listeners(self: Box<Self>, on_success: SuccessListener<T>, on_failure: FailureListener) {
        match self.outcome {
            Ok(value) => on_success(value),
            Err(cause) => on_failure(cause),
        }
    }
}
