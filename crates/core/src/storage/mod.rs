//! SQLite storage layer for Moodlog

mod migrations;
mod parse;
mod preferences;
mod traits;

use rusqlite::Connection;
use std::path::Path;
use tracing::instrument;

use crate::error::Result;

pub use parse::{decode_bool, encode_bool};
pub use preferences::PreferencesStore;
pub use traits::{PreferenceKey, PreferenceRepository};

/// Main database handle
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database at the given path
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Open in-memory database (for testing)
    #[instrument]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initialize database schema via migrations
    fn init(&self) -> Result<()> {
        migrations::run_migrations(&self.conn)?;
        Ok(())
    }

    /// Get current schema version
    pub fn schema_version(&self) -> u32 {
        self.conn
            .query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
                row.get(0)
            })
            .unwrap_or(0)
    }

    /// Get preferences store for session settings
    pub fn preferences(&self) -> PreferencesStore<'_> {
        PreferencesStore::new(&self.conn)
    }
}

impl PreferenceRepository for Database {
    fn get_preference(&self, key: PreferenceKey) -> Result<Option<String>> {
        self.preferences().get(key)
    }

    fn set_preference(&self, key: PreferenceKey, value: &str) -> Result<()> {
        self.preferences().set(key, value)
    }

    fn clear_preferences(&self) -> Result<()> {
        self.preferences().clear_all()?;
        Ok(())
    }
}
