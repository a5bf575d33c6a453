// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Typed Key/Value Storage
//!
//! The persistence boundary is an opaque string key/value store. Values are
//! JSON-encoded so any serde type can be stored under a [`StorageKey`].

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::StorageError;

/// Trait for a local key/value store.
///
/// Implementations must be safe to share between the caller and the
/// countdown task.
pub trait KvStorage: Send + Sync {
    /// Loads the raw value stored under `key`.
    /// Returns None if the key doesn't exist.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Deletes `key`. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Checks if a value exists under `key`.
    fn contains(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.load(key)?.is_some())
    }
}

/// A well-known storage key with the type of the value it holds.
pub struct StorageKey<T> {
    name: &'static str,
    _value: PhantomData<fn() -> T>,
}

impl<T> StorageKey<T> {
    /// Declares a key.
    pub const fn new(name: &'static str) -> Self {
        StorageKey {
            name,
            _value: PhantomData,
        }
    }

    /// Returns the key name.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for StorageKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for StorageKey<T> {}

impl<T> fmt::Debug for StorageKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StorageKey").field(&self.name).finish()
    }
}

/// Typed accessors over any [`KvStorage`].
pub trait KvStorageExt: KvStorage {
    /// Reads and decodes the value under `key`.
    fn get<T: DeserializeOwned>(&self, key: StorageKey<T>) -> Result<Option<T>, StorageError> {
        match self.load(key.name())? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Encodes and stores `value` under `key`.
    fn set<T: Serialize>(&self, key: StorageKey<T>, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.save(key.name(), &raw)
    }

    /// Removes the value under `key`.
    fn remove<T>(&self, key: StorageKey<T>) -> Result<(), StorageError> {
        self.delete(key.name())
    }
}

impl<S: KvStorage + ?Sized> KvStorageExt for S {}
