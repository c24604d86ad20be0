//! Preference persistence
//!
//! A flat key/value table holding the session scalars as strings.

use chrono::Utc;
use rusqlite::{params, Connection};
use tracing::{debug, instrument};

use super::parse::OptionalExt;
use super::traits::PreferenceKey;
use crate::error::Result;

/// Preferences store
pub struct PreferencesStore<'a> {
    conn: &'a Connection,
}

impl<'a> PreferencesStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Read a value, `None` when the key was never written
    #[instrument(skip(self, key), fields(key = key.as_str()))]
    pub fn get(&self, key: PreferenceKey) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Insert or overwrite a value
    #[instrument(skip(self, key, value), fields(key = key.as_str()))]
    pub fn set(&self, key: PreferenceKey, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO preferences (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key.as_str(), value, Utc::now().to_rfc3339()],
        )?;
        debug!("Preference saved");
        Ok(())
    }

    /// Remove all stored preferences
    #[instrument(skip(self))]
    pub fn clear_all(&self) -> Result<u64> {
        let removed = self.conn.execute("DELETE FROM preferences", [])?;
        debug!(removed, "Preferences cleared");
        Ok(removed as u64)
    }
}
