// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Persisted backoff record.
//!
//! Two entries, written together on failure and cleared together on reset.
//! There is no transaction: a crash between writes can leave one of them
//! behind, and readers must cope with that.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::storage::{KvStorage, KvStorageExt, StorageError, StorageKey};

/// Time of the most recent failed attempt.
pub const LAST_FAILURE_TIME: StorageKey<DateTime<Utc>> = StorageKey::new("lastFailureTime");

/// Number of failed attempts since the last reset.
pub const CONSECUTIVE_FAILURES: StorageKey<u32> = StorageKey::new("consecutiveFailures");

/// Snapshot of the persisted backoff record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackoffState {
    pub last_failure_time: Option<DateTime<Utc>>,
    pub consecutive_failures: Option<u32>,
}

impl BackoffState {
    /// Both fields absent.
    pub fn is_absent(&self) -> bool {
        self.last_failure_time.is_none() && self.consecutive_failures.is_none()
    }

    /// Only one of the two fields present.
    pub fn is_partial(&self) -> bool {
        self.last_failure_time.is_some() != self.consecutive_failures.is_some()
    }
}

/// Typed access to the backoff entries of a [`KvStorage`].
#[derive(Clone)]
pub struct BackoffStore {
    storage: Arc<dyn KvStorage>,
}

impl BackoffStore {
    pub fn new(storage: Arc<dyn KvStorage>) -> Self {
        BackoffStore { storage }
    }

    pub fn last_failure_time(&self) -> Result<Option<DateTime<Utc>>, StorageError> {
        self.read(LAST_FAILURE_TIME)
    }

    pub fn set_last_failure_time(&self, value: Option<DateTime<Utc>>) -> Result<(), StorageError> {
        self.write(LAST_FAILURE_TIME, value)
    }

    pub fn consecutive_failures(&self) -> Result<Option<u32>, StorageError> {
        self.read(CONSECUTIVE_FAILURES)
    }

    pub fn set_consecutive_failures(&self, value: Option<u32>) -> Result<(), StorageError> {
        self.write(CONSECUTIVE_FAILURES, value)
    }

    /// Reads both entries.
    pub fn state(&self) -> Result<BackoffState, StorageError> {
        Ok(BackoffState {
            last_failure_time: self.last_failure_time()?,
            consecutive_failures: self.consecutive_failures()?,
        })
    }

    /// Clears both entries.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.set_last_failure_time(None)?;
        self.set_consecutive_failures(None)
    }

    // An undecodable entry counts as absent so a corrupt record can't lock
    // the user out.
    fn read<T>(&self, key: StorageKey<T>) -> Result<Option<T>, StorageError>
    where
        T: serde::de::DeserializeOwned,
    {
        match self.storage.get(key) {
            Err(StorageError::Serialization(reason)) => {
                warn!(key = key.name(), %reason, "ignoring malformed backoff entry");
                Ok(None)
            }
            other => other,
        }
    }

    fn write<T>(&self, key: StorageKey<T>, value: Option<T>) -> Result<(), StorageError>
    where
        T: serde::Serialize,
    {
        match value {
            Some(value) => self.storage.set(key, &value),
            None => self.storage.remove(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKvStorage;

    #[test]
    fn test_state_round_trip_and_clear() {
        let store = BackoffStore::new(Arc::new(MemoryKvStorage::new()));
        assert!(store.state().unwrap().is_absent());

        let now = Utc::now();
        store.set_last_failure_time(Some(now)).unwrap();
        assert!(store.state().unwrap().is_partial());

        store.set_consecutive_failures(Some(2)).unwrap();
        let state = store.state().unwrap();
        assert_eq!(state.last_failure_time, Some(now));
        assert_eq!(state.consecutive_failures, Some(2));

        store.clear().unwrap();
        assert!(store.state().unwrap().is_absent());
    }

    #[test]
    fn test_malformed_entry_reads_as_absent() {
        let storage = Arc::new(MemoryKvStorage::new());
        storage.save(LAST_FAILURE_TIME.name(), "yesterday").unwrap();
        let store = BackoffStore::new(storage);
        assert_eq!(store.last_failure_time().unwrap(), None);
    }
}
