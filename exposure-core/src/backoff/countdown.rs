// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Live countdown of the remaining backoff.
//!
//! A background task recomputes the remaining seconds once per tick and
//! publishes it through a watch channel. Equal consecutive values are not
//! republished, and a slow reader only ever sees the latest value.

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_stream::wrappers::WatchStream;
use tracing::debug;

use super::controller::BackoffController;

/// Handle to a running countdown. Dropping it stops the timer.
pub struct Countdown {
    rx: watch::Receiver<Option<u64>>,
    task: JoinHandle<()>,
}

impl Countdown {
    pub(crate) fn spawn(controller: BackoffController) -> Self {
        let (tx, rx) = watch::channel(controller.remaining_or_unlocked());
        let period = controller.policy().tick_period();

        let task = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let remaining = controller.remaining_or_unlocked();
                tx.send_if_modified(|current| {
                    if *current == remaining {
                        return false;
                    }
                    *current = remaining;
                    true
                });
            }
        });

        Countdown { rx, task }
    }

    /// Latest remaining seconds, `None` when unlocked.
    pub fn current(&self) -> Option<u64> {
        *self.rx.borrow()
    }

    /// Waits for the next distinct value.
    ///
    /// Returns `None` once the countdown has stopped.
    pub async fn changed(&mut self) -> Option<Option<u64>> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }

    /// A new receiver observing the same countdown.
    pub fn subscribe(&self) -> watch::Receiver<Option<u64>> {
        self.rx.clone()
    }

    /// The countdown as a stream, starting with the current value.
    pub fn stream(&self) -> WatchStream<Option<u64>> {
        WatchStream::new(self.rx.clone())
    }

    /// Whether the timer task is still running.
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.task.abort();
        debug!("backoff countdown stopped");
    }
}
