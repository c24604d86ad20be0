//! In-process entry store
//!
//! Keeps entries in memory. Useful for offline runs and as a stand-in for
//! the remote store in tests: it counts calls, can be told to fail, and can
//! hold fetches open to reproduce slow responses.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use moodlog_core::MoodEntry;
use tokio::sync::{OwnedRwLockWriteGuard, RwLock};

use crate::error::{Error, Result};
use crate::store::EntryStore;

/// Blocks fetches on the store that issued it until dropped
pub type FetchHold = OwnedRwLockWriteGuard<()>;

#[derive(Debug, Default)]
pub struct MemoryEntryStore {
    entries: Mutex<Vec<MoodEntry>>,
    fetches: AtomicUsize,
    appends: AtomicUsize,
    failing: AtomicBool,
    gate: Arc<RwLock<()>>,
}

impl MemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `entries`, oldest first
    pub fn with_entries(entries: Vec<MoodEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
            ..Self::default()
        }
    }

    /// Make every subsequent call fail with `Error::Unavailable`
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Park fetches until the returned guard is dropped
    pub async fn hold_fetches(&self) -> FetchHold {
        self.gate.clone().write_owned().await
    }

    pub fn entries(&self) -> Vec<MoodEntry> {
        self.entries.lock().unwrap().clone()
    }

    /// Number of fetches started
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Number of appends attempted, failed ones included
    pub fn append_count(&self) -> usize {
        self.appends.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(Error::Unavailable)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl EntryStore for MemoryEntryStore {
    async fn fetch_all(&self) -> Result<Vec<MoodEntry>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let _pass = self.gate.read().await;
        self.check_available()?;
        Ok(self.entries())
    }

    async fn append(&self, entry: &MoodEntry) -> Result<()> {
        self.appends.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }
}
