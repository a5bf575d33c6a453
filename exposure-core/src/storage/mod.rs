// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Persistent Storage Module
//!
//! Opaque typed key/value store used for the report backoff record.
//! SQLite for on-device persistence, a memory map for tests.

mod error;
mod kv;
mod memory;
mod sqlite;

pub use error::StorageError;
pub use kv::{KvStorage, KvStorageExt, StorageKey};
pub use memory::MemoryKvStorage;
pub use sqlite::SqliteKvStorage;
