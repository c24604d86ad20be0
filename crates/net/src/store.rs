//! Remote entry store interface

use async_trait::async_trait;
use moodlog_core::MoodEntry;

use crate::error::Result;

/// Append-only collection of entries shared across installs
///
/// Implementations report failures; deciding to ignore them is up to the
/// caller.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Every stored entry, in the store's own order
    async fn fetch_all(&self) -> Result<Vec<MoodEntry>>;

    /// Store one entry
    async fn append(&self, entry: &MoodEntry) -> Result<()>;
}
