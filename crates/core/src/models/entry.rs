//! Mood entry model

use std::fmt;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::MoodSet;
use crate::error::{Error, Result};

/// Display format for `MoodEntry::date`
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Opaque entry identifier
///
/// Built from the creation time in milliseconds plus a short random suffix,
/// so ids sort roughly by creation and two entries logged in the same
/// millisecond stay distinct. Other writers to the shared store may keep
/// numeric ids; those are read back as their decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EntryId(pub String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntryId {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl<'de> Deserialize<'de> for EntryId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let id = match RawEntryId::deserialize(deserializer)? {
            RawEntryId::Text(id) => id,
            RawEntryId::Integer(id) => id.to_string(),
            RawEntryId::Float(id) => id.to_string(),
        };
        Ok(Self(id))
    }
}

impl EntryId {
    pub fn generate(created_at: DateTime<Utc>) -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        Self(format!("{}-{}", created_at.timestamp_millis(), &suffix[..8]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One submitted record of moods
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: EntryId,
    pub author: String,
    pub moods: MoodSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub date: String,
    /// Milliseconds since the Unix epoch; 0 for records written without one
    #[serde(default)]
    pub timestamp: i64,
}

impl MoodEntry {
    /// Create an entry stamped with the current time
    pub fn new(author: impl Into<String>, moods: MoodSet, note: Option<String>) -> Result<Self> {
        Self::new_at(author, moods, note, Utc::now())
    }

    /// Create an entry stamped with `created_at`
    pub fn new_at(
        author: impl Into<String>,
        moods: MoodSet,
        note: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self> {
        if moods.is_empty() {
            return Err(Error::EmptySelection);
        }

        let note = note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        Ok(Self {
            id: EntryId::generate(created_at),
            author: author.into(),
            moods,
            note,
            date: created_at
                .with_timezone(&Local)
                .format(DATE_FORMAT)
                .to_string(),
            timestamp: created_at.timestamp_millis(),
        })
    }
}

/// Order a list fetched from the remote store for display
///
/// The store's own order is reversed first (last written first), then the
/// list is stably sorted newest-first on `timestamp`, so records that carry
/// no timestamp keep their reversed store position relative to each other.
/// Repeated ids keep only their first occurrence.
pub fn order_remote_entries(mut entries: Vec<MoodEntry>) -> Vec<MoodEntry> {
    entries.reverse();
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let mut seen = std::collections::HashSet::new();
    entries.retain(|e| seen.insert(e.id.clone()));
    entries
}
