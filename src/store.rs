//! Keyed record store.
//!
//! Every collection lives in one named slot as a single JSON text. Each
//! mutation re-reads the slot, changes the decoded sequence and writes the
//! whole sequence back; there are no partial updates and no transactions.
//!
//! Storage failures never reach callers. A failed read degrades to an empty
//! collection and a failed write is logged and dropped, leaving whatever the
//! slot held before.

use std::collections::HashMap;

use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::db::{self, DatabaseError};

// ═══════════════════════════════════════════
// Keys
// ═══════════════════════════════════════════

/// Logical collections kept by the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Appointments,
    Reviews,
    Cart,
    History,
}

impl StoreKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::Appointments => "appointments",
            StoreKey::Reviews => "reviews",
            StoreKey::Cart => "cart",
            StoreKey::History => "history",
        }
    }
}

// ═══════════════════════════════════════════
// Backends
// ═══════════════════════════════════════════

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Raw string slots (the per-origin storage area of the portal).
pub trait SlotBackend: Send {
    fn get(&self, slot: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the slot wholesale.
    fn set(&mut self, slot: &str, value: &str) -> Result<(), StoreError>;

    /// Delete the slot. Removing an absent slot succeeds.
    fn remove(&mut self, slot: &str) -> Result<(), StoreError>;
}

/// In-memory slots. Contents vanish with the value.
#[derive(Debug, Default, Clone)]
pub struct MemorySlots {
    slots: HashMap<String, String>,
}

impl MemorySlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot with raw text, bypassing serialization.
    pub fn with_raw(mut self, slot: &str, raw: &str) -> Self {
        self.slots.insert(slot.to_string(), raw.to_string());
        self
    }
}

impl SlotBackend for MemorySlots {
    fn get(&self, slot: &str) -> Result<Option<String>, StoreError> {
        Ok(self.slots.get(slot).cloned())
    }

    fn set(&mut self, slot: &str, value: &str) -> Result<(), StoreError> {
        self.slots.insert(slot.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, slot: &str) -> Result<(), StoreError> {
        self.slots.remove(slot);
        Ok(())
    }
}

/// Slots persisted in the SQLite `slots` table.
pub struct SqliteSlots {
    conn: Connection,
}

impl SqliteSlots {
    /// Open (or create) the slot database at `path`.
    pub fn open(path: &std::path::Path) -> Result<Self, StoreError> {
        Ok(Self {
            conn: db::open_database(path)?,
        })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Ok(Self {
            conn: db::open_memory_database()?,
        })
    }
}

impl SlotBackend for SqliteSlots {
    fn get(&self, slot: &str) -> Result<Option<String>, StoreError> {
        Ok(db::get_slot(&self.conn, slot)?)
    }

    fn set(&mut self, slot: &str, value: &str) -> Result<(), StoreError> {
        Ok(db::set_slot(&self.conn, slot, value)?)
    }

    fn remove(&mut self, slot: &str) -> Result<(), StoreError> {
        Ok(db::delete_slot(&self.conn, slot)?)
    }
}

// ═══════════════════════════════════════════
// KeyedStore
// ═══════════════════════════════════════════

/// Key-scoped access to ordered record sequences over a slot backend.
pub struct KeyedStore {
    backend: Box<dyn SlotBackend>,
    prefix: String,
}

impl KeyedStore {
    pub fn new(backend: Box<dyn SlotBackend>, prefix: impl Into<String>) -> Self {
        Self {
            backend,
            prefix: prefix.into(),
        }
    }

    /// In-memory store with the default prefix.
    pub fn in_memory() -> Self {
        Self::new(
            Box::new(MemorySlots::new()),
            crate::config::DEFAULT_SLOT_PREFIX,
        )
    }

    /// Namespaced slot name for a key, e.g. `healcare_cart`.
    pub fn slot_name(&self, key: StoreKey) -> String {
        format!("{}_{}", self.prefix, key.as_str())
    }

    /// Stored text of a slot as-is. None when absent or unreadable.
    pub fn load_raw(&self, key: StoreKey) -> Option<String> {
        let slot = self.slot_name(key);
        match self.backend.get(&slot) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(slot = %slot, error = %e, "Slot read failed, treating as empty");
                None
            }
        }
    }

    /// Decode the sequence stored under `key`.
    ///
    /// Absent, unreadable or malformed content yields an empty sequence.
    pub fn load<T: DeserializeOwned>(&self, key: StoreKey) -> Vec<T> {
        let Some(raw) = self.load_raw(key) else {
            return Vec::new();
        };
        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(items) => items,
            Err(e) => {
                tracing::debug!(key = key.as_str(), error = %e, "Malformed slot content, treating as empty");
                Vec::new()
            }
        }
    }

    /// Decode a single-record slot. Absent or malformed content yields None.
    pub fn load_one<T: DeserializeOwned>(&self, key: StoreKey) -> Option<T> {
        let raw = self.load_raw(key)?;
        serde_json::from_str(&raw)
            .map_err(|e| {
                tracing::debug!(key = key.as_str(), error = %e, "Malformed record slot");
            })
            .ok()
    }

    /// Serialize `items` and overwrite the slot.
    pub fn save<T: Serialize>(&mut self, key: StoreKey, items: &[T]) {
        let slot = self.slot_name(key);
        let result = serde_json::to_string(items)
            .map_err(StoreError::from)
            .and_then(|text| self.backend.set(&slot, &text));
        self.absorb(key, "save", result);
    }

    /// Load, push to the tail, save.
    pub fn append<T: Serialize + DeserializeOwned>(&mut self, key: StoreKey, record: T) {
        let mut items: Vec<T> = self.load(key);
        items.push(record);
        self.save(key, &items);
    }

    /// Load, push to the head, save.
    pub fn prepend<T: Serialize + DeserializeOwned>(&mut self, key: StoreKey, record: T) {
        let mut items: Vec<T> = self.load(key);
        items.insert(0, record);
        self.save(key, &items);
    }

    /// Load, delete the element at `index`, save.
    ///
    /// Out-of-range indices are a no-op and leave the slot untouched.
    /// Returns whether an element was removed.
    pub fn remove_at<T: Serialize + DeserializeOwned>(&mut self, key: StoreKey, index: usize) -> bool {
        let mut items: Vec<T> = self.load(key);
        if index >= items.len() {
            tracing::debug!(key = key.as_str(), index, len = items.len(), "Remove index out of range");
            return false;
        }
        items.remove(index);
        self.save(key, &items);
        true
    }

    /// Replace a single-record slot with the pretty-printed record.
    pub fn replace_one<T: Serialize>(&mut self, key: StoreKey, record: &T) {
        let slot = self.slot_name(key);
        let result = serde_json::to_string_pretty(record)
            .map_err(StoreError::from)
            .and_then(|text| self.backend.set(&slot, &text));
        self.absorb(key, "replace", result);
    }

    /// Delete the slot entirely.
    pub fn clear(&mut self, key: StoreKey) {
        let slot = self.slot_name(key);
        let result = self.backend.remove(&slot);
        self.absorb(key, "clear", result);
    }

    fn absorb(&self, key: StoreKey, op: &'static str, result: Result<(), StoreError>) {
        if let Err(e) = result {
            tracing::warn!(key = key.as_str(), op, error = %e, "Slot write failed, keeping previous content");
        }
    }
}
