use crate::error::{DhraviqError, Result};
use crate::progress::{ProgressStore, ProgressUpdate, UserRecord};
use crate::session::Identity;
use anyhow::Context;
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::{Path, PathBuf};

/// SQLite-backed progress store
pub struct SqliteProgressStore {
    db_path: PathBuf,
}

impl SqliteProgressStore {
    /// Open the store in the user's data directory
    pub fn new() -> Result<Self> {
        let proj_dirs = ProjectDirs::from("com", "dhraviq", "dhraviq")
            .ok_or_else(|| DhraviqError::Storage("Could not determine data directory".into()))?;

        Self::new_with_path(proj_dirs.data_dir().join("progress.db"))
    }

    /// Open the store at an explicit database path
    ///
    /// # Examples
    ///
    /// ```
    /// use dhraviq::progress::SqliteProgressStore;
    ///
    /// let dir = std::env::temp_dir().join("dhraviq-doc");
    /// let store = SqliteProgressStore::new_with_path(dir.join("progress.db")).unwrap();
    /// ```
    pub fn new_with_path<P: Into<PathBuf>>(db_path: P) -> Result<Self> {
        let db_path = db_path.into();

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create parent directory for database")
                .map_err(|e| DhraviqError::Storage(e.to_string()))?;
        }

        let store = Self { db_path };
        store.init()?;
        Ok(store)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn open(&self) -> Result<Connection> {
        Ok(Connection::open(&self.db_path)
            .context("Failed to open database")
            .map_err(|e| DhraviqError::Storage(e.to_string()))?)
    }

    fn init(&self) -> Result<()> {
        let conn = self.open()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                display_name TEXT NOT NULL DEFAULT '',
                email TEXT NOT NULL DEFAULT '',
                reminder_enabled INTEGER NOT NULL DEFAULT 0,
                total_sessions INTEGER NOT NULL DEFAULT 0,
                streak_days INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                last_updated TEXT NOT NULL
            )",
            [],
        )
        .context("Failed to create tables")
        .map_err(|e| DhraviqError::Storage(e.to_string()))?;
        Ok(())
    }

    fn load_with(conn: &Connection, user_id: &str) -> Result<Option<UserRecord>> {
        Ok(conn
            .query_row(
                "SELECT id, display_name, email, reminder_enabled, total_sessions,
                        streak_days, created_at, last_updated
                 FROM users WHERE id = ?",
                params![user_id],
                row_to_record,
            )
            .optional()
            .context("Failed to query user record")
            .map_err(|e| DhraviqError::Storage(e.to_string()))?)
    }
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<UserRecord> {
    let created_at: String = row.get(6)?;
    let last_updated: String = row.get(7)?;
    let total_sessions: i64 = row.get(4)?;
    let streak_days: i64 = row.get(5)?;
    Ok(UserRecord {
        user_id: row.get(0)?,
        display_name: row.get(1)?,
        email: row.get(2)?,
        reminder_enabled: row.get(3)?,
        total_sessions: total_sessions.max(0) as u64,
        streak_days: streak_days.max(0) as u64,
        created_at: parse_timestamp(&created_at),
        last_updated: parse_timestamp(&last_updated),
    })
}

fn parse_timestamp(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

impl ProgressStore for SqliteProgressStore {
    fn ensure_profile(&self, identity: &Identity) -> Result<()> {
        let conn = self.open()?;
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO users (id, display_name, email, created_at, last_updated)
             VALUES (?, ?, ?, ?, ?)
             ON CONFLICT(id) DO NOTHING",
            params![identity.id, identity.display_name, identity.email, now, now],
        )
        .context("Failed to create user record")
        .map_err(|e| DhraviqError::Storage(e.to_string()))?;
        Ok(())
    }

    fn record_progress(&self, user_id: &str, update: ProgressUpdate) -> Result<UserRecord> {
        let mut conn = self.open()?;
        let now = Utc::now().to_rfc3339();

        let tx = conn
            .transaction()
            .context("Failed to start transaction")
            .map_err(|e| DhraviqError::Storage(e.to_string()))?;

        tx.execute(
            "INSERT INTO users (id, total_sessions, streak_days, created_at, last_updated)
             VALUES (?1, ?2, ?3, ?4, ?4)
             ON CONFLICT(id) DO UPDATE SET
                total_sessions = total_sessions + excluded.total_sessions,
                streak_days = streak_days + excluded.streak_days,
                last_updated = excluded.last_updated",
            params![
                user_id,
                update.total_sessions as i64,
                update.streak_days as i64,
                now
            ],
        )
        .context("Failed to update progress counters")
        .map_err(|e| DhraviqError::Storage(e.to_string()))?;

        let record = Self::load_with(&tx, user_id)?.ok_or_else(|| {
            DhraviqError::Storage(format!("User record {} vanished after update", user_id))
        })?;

        tx.commit()
            .context("Failed to commit transaction")
            .map_err(|e| DhraviqError::Storage(e.to_string()))?;

        tracing::debug!(
            user = user_id,
            total_sessions = record.total_sessions,
            streak_days = record.streak_days,
            "Progress recorded"
        );
        Ok(record)
    }

    fn set_reminder_enabled(&self, user_id: &str, enabled: bool) -> Result<()> {
        let conn = self.open()?;
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO users (id, reminder_enabled, created_at, last_updated)
             VALUES (?1, ?2, ?3, ?3)
             ON CONFLICT(id) DO UPDATE SET
                reminder_enabled = excluded.reminder_enabled,
                last_updated = excluded.last_updated",
            params![user_id, enabled, now],
        )
        .context("Failed to update reminder preference")
        .map_err(|e| DhraviqError::Storage(e.to_string()))?;
        Ok(())
    }

    fn load(&self, user_id: &str) -> Result<Option<UserRecord>> {
        let conn = self.open()?;
        Self::load_with(&conn, user_id)
    }
}
