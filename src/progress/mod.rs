//! Per-user progress record
//!
//! One record per identity holds the profile fields and two counters,
//! total sessions and streak days. Counters only ever grow; every update is
//! merged into the existing record instead of replacing it.

use crate::error::{DhraviqError, Result};
use crate::session::Identity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

pub mod sqlite;

pub use sqlite::SqliteProgressStore;

/// Stored record for one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: String,
    pub display_name: String,
    pub email: String,
    pub reminder_enabled: bool,
    pub total_sessions: u64,
    pub streak_days: u64,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl UserRecord {
    fn empty(user_id: &str, now: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.to_string(),
            display_name: String::new(),
            email: String::new(),
            reminder_enabled: false,
            total_sessions: 0,
            streak_days: 0,
            created_at: now,
            last_updated: now,
        }
    }
}

/// Counter increments to merge into a record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub total_sessions: u64,
    pub streak_days: u64,
}

impl ProgressUpdate {
    /// The increment recorded after a conversation's first answered turn
    pub fn completed_session() -> Self {
        Self {
            total_sessions: 1,
            streak_days: 1,
        }
    }
}

/// Storage for user records
///
/// Implementations are synchronous; async callers run them on the blocking
/// pool.
pub trait ProgressStore: Send + Sync {
    /// Create the record for `identity` if it does not exist yet
    ///
    /// An existing record is left untouched.
    fn ensure_profile(&self, identity: &Identity) -> Result<()>;

    /// Merge counter increments into the record, creating it if needed
    fn record_progress(&self, user_id: &str, update: ProgressUpdate) -> Result<UserRecord>;

    /// Set the reminder preference on the record, creating it if needed
    fn set_reminder_enabled(&self, user_id: &str, enabled: bool) -> Result<()>;

    fn load(&self, user_id: &str) -> Result<Option<UserRecord>>;
}

/// In-process store, used when no database is configured and in tests
#[derive(Debug, Default)]
pub struct MemoryProgressStore {
    records: Mutex<HashMap<String, UserRecord>>,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_records<T>(&self, f: impl FnOnce(&mut HashMap<String, UserRecord>) -> T) -> Result<T> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| DhraviqError::Storage("progress store lock poisoned".to_string()))?;
        Ok(f(&mut records))
    }
}

impl ProgressStore for MemoryProgressStore {
    fn ensure_profile(&self, identity: &Identity) -> Result<()> {
        self.with_records(|records| {
            records.entry(identity.id.clone()).or_insert_with(|| {
                let mut record = UserRecord::empty(&identity.id, Utc::now());
                record.display_name = identity.display_name.clone();
                record.email = identity.email.clone();
                record
            });
        })
    }

    fn record_progress(&self, user_id: &str, update: ProgressUpdate) -> Result<UserRecord> {
        self.with_records(|records| {
            let now = Utc::now();
            let record = records
                .entry(user_id.to_string())
                .or_insert_with(|| UserRecord::empty(user_id, now));
            record.total_sessions += update.total_sessions;
            record.streak_days += update.streak_days;
            record.last_updated = now;
            record.clone()
        })
    }

    fn set_reminder_enabled(&self, user_id: &str, enabled: bool) -> Result<()> {
        self.with_records(|records| {
            let now = Utc::now();
            let record = records
                .entry(user_id.to_string())
                .or_insert_with(|| UserRecord::empty(user_id, now));
            record.reminder_enabled = enabled;
            record.last_updated = now;
        })
    }

    fn load(&self, user_id: &str) -> Result<Option<UserRecord>> {
        self.with_records(|records| records.get(user_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_progress_creates_and_increments() {
        let store = MemoryProgressStore::new();
        let first = store
            .record_progress("u1", ProgressUpdate::completed_session())
            .unwrap();
        assert_eq!(first.total_sessions, 1);
        let second = store
            .record_progress("u1", ProgressUpdate::completed_session())
            .unwrap();
        assert_eq!(second.total_sessions, 2);
        assert_eq!(second.streak_days, 2);
    }

    #[test]
    fn test_ensure_profile_does_not_overwrite() {
        let store = MemoryProgressStore::new();
        let identity = Identity::new("u1", Some("Asha".to_string()), None);
        store.ensure_profile(&identity).unwrap();
        store
            .record_progress("u1", ProgressUpdate::completed_session())
            .unwrap();

        let renamed = Identity::new("u1", Some("Someone".to_string()), None);
        store.ensure_profile(&renamed).unwrap();

        let record = store.load("u1").unwrap().unwrap();
        assert_eq!(record.display_name, "Asha");
        assert_eq!(record.total_sessions, 1);
    }

    #[test]
    fn test_reminder_preference_merges() {
        let store = MemoryProgressStore::new();
        store
            .record_progress("u1", ProgressUpdate::completed_session())
            .unwrap();
        store.set_reminder_enabled("u1", true).unwrap();
        let record = store.load("u1").unwrap().unwrap();
        assert!(record.reminder_enabled);
        assert_eq!(record.total_sessions, 1);
    }

    #[test]
    fn test_load_missing() {
        assert!(MemoryProgressStore::new().load("nobody").unwrap().is_none());
    }
}
