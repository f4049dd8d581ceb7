//! Versioned Draft Store
//!
//! Admin form drafts live in local storage under `admin_draft_<path>`. Each
//! record carries a version and the id of the tab that wrote it; a save must be
//! based on the version currently stored, so two tabs editing the same page
//! cannot silently overwrite each other.

use std::cell::Cell;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{UiError, UiResult};
use crate::storage::KeyValueStorage;

pub const DRAFT_KEY_PREFIX: &str = "admin_draft_";

pub fn draft_key(path: &str) -> String {
    format!("{}{}", DRAFT_KEY_PREFIX, path)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftRecord {
    pub version: u64,
    pub tab_id: String,
    pub saved_at: DateTime<Utc>,
    pub fields: BTreeMap<String, String>,
}

/// Drafts for one page, as seen from one tab
pub struct DraftStore<S: KeyValueStorage> {
    storage: S,
    key: String,
    tab_id: String,
    /// Version this tab last read or wrote
    base_version: Cell<u64>,
}

impl<S: KeyValueStorage> DraftStore<S> {
    pub fn new(storage: S, path: &str, tab_id: impl Into<String>) -> Self {
        let store = Self {
            storage,
            key: draft_key(path),
            tab_id: tab_id.into(),
            base_version: Cell::new(0),
        };
        match store.stored_version() {
            Ok(version) => store.base_version.set(version),
            Err(e) => log::warn!("[DRAFT] could not read {}: {}", store.key, e),
        }
        store
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current record, if any.
    ///
    /// A bare field map (written before drafts were versioned) reads as version 0;
    /// its non-string entries (file inputs serialize as `{}`) are skipped.
    pub fn load(&self) -> UiResult<Option<DraftRecord>> {
        let Some(raw) = self.storage.get(&self.key)? else {
            return Ok(None);
        };
        if let Ok(record) = serde_json::from_str::<DraftRecord>(&raw) {
            return Ok(Some(record));
        }
        let entries: BTreeMap<String, serde_json::Value> = serde_json::from_str(&raw)?;
        let fields = entries
            .into_iter()
            .filter_map(|(name, value)| match value {
                serde_json::Value::String(text) => Some((name, text)),
                _ => None,
            })
            .collect();
        Ok(Some(DraftRecord {
            version: 0,
            tab_id: String::new(),
            saved_at: DateTime::<Utc>::default(),
            fields,
        }))
    }

    fn stored_version(&self) -> UiResult<u64> {
        Ok(self.load()?.map_or(0, |r| r.version))
    }

    /// Stored version for a write; an unreadable record counts as version 0
    /// so the next save replaces it.
    fn writable_version(&self) -> UiResult<u64> {
        match self.stored_version() {
            Err(UiError::Decode(e)) => {
                log::warn!("[DRAFT] replacing unreadable {}: {}", self.key, e);
                Ok(0)
            }
            other => other,
        }
    }

    /// Write a new version on top of the one this tab is based on.
    ///
    /// When another tab got there first the write is refused and this tab
    /// re-bases on the stored version, so the next save goes through.
    pub fn save(&self, fields: BTreeMap<String, String>, now: DateTime<Utc>) -> UiResult<DraftRecord> {
        let stored = self.writable_version()?;
        let expected = self.base_version.get();
        if stored != expected {
            self.base_version.set(stored);
            return Err(UiError::DraftConflict { stored, expected });
        }
        let record = DraftRecord {
            version: expected + 1,
            tab_id: self.tab_id.clone(),
            saved_at: now,
            fields,
        };
        self.storage.set(&self.key, &serde_json::to_string(&record)?)?;
        self.base_version.set(record.version);
        log::debug!("[DRAFT] saved {} v{}", self.key, record.version);
        Ok(record)
    }

    /// Drop the draft, e.g. once the form was submitted
    pub fn clear(&self) -> UiResult<()> {
        self.storage.remove(&self.key)?;
        self.base_version.set(0);
        Ok(())
    }
}

/// Idle-period gate for autosave.
///
/// Every input arms a new ticket; only the ticket armed by the last input is
/// allowed to save when its idle timer fires.
#[derive(Default)]
pub struct IdleGate {
    generation: Cell<u64>,
}

impl IdleGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&self) -> u64 {
        let next = self.generation.get() + 1;
        self.generation.set(next);
        next
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.generation.get() == ticket
    }
}

/// Draft store plus idle gate for one form
pub struct DraftAutosave<S: KeyValueStorage> {
    store: DraftStore<S>,
    gate: IdleGate,
}

impl<S: KeyValueStorage> DraftAutosave<S> {
    pub fn new(store: DraftStore<S>) -> Self {
        Self { store, gate: IdleGate::new() }
    }

    pub fn store(&self) -> &DraftStore<S> {
        &self.store
    }

    /// Call on every input change; schedule `on_idle` with the returned ticket
    pub fn on_input(&self) -> u64 {
        self.gate.arm()
    }

    /// Idle timer fired. Saves only if no input happened since `ticket` was armed.
    pub fn on_idle(
        &self,
        ticket: u64,
        fields: BTreeMap<String, String>,
        now: DateTime<Utc>,
    ) -> Option<UiResult<DraftRecord>> {
        if !self.gate.is_current(ticket) {
            return None;
        }
        Some(self.store.save(fields, now))
    }
}
