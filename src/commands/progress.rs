//! Dashboard counters for the signed-in user

use crate::commands::{open_progress_store, require_route, SessionHandle};
use crate::config::Config;
use crate::error::{DhraviqError, Result};
use crate::guard::{Route, RouteGuard};
use crate::progress::UserRecord;
use prettytable::{cell, row, Table};

/// Show the progress record of the signed-in user
///
/// # Errors
///
/// Returns error if nobody is signed in or the store cannot be read
pub async fn show_progress(config: &Config, json: bool) -> Result<()> {
    let session = SessionHandle::from_keyring().await?;
    let mut guard = RouteGuard::new();
    require_route(&mut guard, &Route::Dashboard, &session.store)?;

    let identity = session
        .store
        .current_identity()
        .0
        .ok_or_else(|| DhraviqError::Identity("Sign-in required".to_string()))?;

    let store = open_progress_store(config);
    let user_id = identity.id.clone();
    let record = tokio::task::spawn_blocking(move || store.load(&user_id))
        .await
        .map_err(|e| DhraviqError::Storage(format!("Progress lookup task failed: {}", e)))??;

    session.shutdown().await;

    match record {
        Some(record) if json => println!("{}", serde_json::to_string_pretty(&record)?),
        Some(record) => progress_table(&record).printstd(),
        None => println!(
            "No sessions yet, {}. Start one with `dhraviq chat`.",
            identity.display_name
        ),
    }
    Ok(())
}

/// Build the dashboard table for a record
pub fn progress_table(record: &UserRecord) -> Table {
    let mut table = Table::new();
    table.set_format(*prettytable::format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(row!["Name", record.display_name]);
    table.add_row(row!["Email", record.email]);
    table.add_row(row!["Total sessions", record.total_sessions]);
    table.add_row(row!["Streak days", record.streak_days]);
    table.add_row(row![
        "Reminders",
        if record.reminder_enabled { "on" } else { "off" }
    ]);
    table.add_row(row![
        "Member since",
        record.created_at.format("%Y-%m-%d").to_string()
    ]);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_progress_table_rows() {
        let created = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let record = UserRecord {
            user_id: "u1".into(),
            display_name: "Asha".into(),
            email: "asha@example.com".into(),
            reminder_enabled: true,
            total_sessions: 4,
            streak_days: 2,
            created_at: created,
            last_updated: created,
        };
        let table = progress_table(&record);
        assert_eq!(table.len(), 6);
        let rendered = table.to_string();
        assert!(rendered.contains("2025-03-01"));
        assert!(rendered.contains("Total sessions"));
    }
}
