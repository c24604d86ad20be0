//! In-memory session state
//!
//! Holds everything the UI renders from: preferences, the current mood
//! selection and note draft, and the entry history. All transitions here are
//! synchronous; persistence and network calls are driven by the caller.

use chrono::{DateTime, Utc};

use crate::models::{order_remote_entries, MoodEntry, MoodLabel, MoodSet, Preferences};

/// Which screen the session is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Preferences not read yet
    Loading,
    /// One-time introduction
    Onboarding,
    /// Asking for the user's name
    NameEntry,
    /// Mood picker and history
    Main,
}

/// Mutable session state
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub preferences: Preferences,
    pub selection: MoodSet,
    pub note: String,
    /// Most recent first
    pub entries: Vec<MoodEntry>,
    loaded: bool,
    epoch: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install preferences read from the store and leave the loading screen
    pub fn load_preferences(&mut self, preferences: Preferences) {
        self.preferences = preferences;
        self.loaded = true;
    }

    pub fn needs_onboarding(&self) -> bool {
        !self.preferences.onboarding_done
    }

    pub fn needs_name(&self) -> bool {
        self.preferences.user_name.is_none()
    }

    pub fn screen(&self) -> Screen {
        if !self.loaded {
            Screen::Loading
        } else if self.needs_onboarding() {
            Screen::Onboarding
        } else if self.needs_name() {
            Screen::NameEntry
        } else {
            Screen::Main
        }
    }

    /// Reset counter; bumped by every `reset`
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Returns true when the label is selected afterwards
    pub fn toggle_mood(&mut self, label: MoodLabel) -> bool {
        self.selection.toggle(label)
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
    }

    /// Turn the current selection and note into an entry
    ///
    /// Returns `None` without touching anything when nothing is selected.
    /// Otherwise the entry is prepended to the history, the draft is cleared,
    /// and a copy is returned for the caller to send upstream.
    pub fn submit(&mut self, now: DateTime<Utc>) -> Option<MoodEntry> {
        if self.selection.is_empty() {
            return None;
        }

        let note = Some(self.note.clone());
        let moods = std::mem::take(&mut self.selection);
        let entry =
            MoodEntry::new_at(self.preferences.display_name(), moods, note, now).ok()?;

        self.entries.insert(0, entry.clone());
        self.note.clear();
        Some(entry)
    }

    /// Replace the history with a remote listing fetched during `epoch`
    ///
    /// Results from before the latest reset are dropped. Returns whether the
    /// listing was applied.
    pub fn apply_remote(&mut self, epoch: u64, entries: Vec<MoodEntry>) -> bool {
        if epoch != self.epoch {
            return false;
        }
        self.entries = order_remote_entries(entries);
        true
    }

    /// Back to first-launch defaults
    pub fn reset(&mut self) {
        let epoch = self.epoch + 1;
        *self = Self {
            loaded: true,
            epoch,
            ..Self::default()
        };
    }
}
