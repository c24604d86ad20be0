//! Application state controller
//!
//! Owns the session state and drives the preference store and the remote
//! entry store. Store failures are logged and otherwise ignored: the session
//! never enters an error state because of them. Network work runs on spawned
//! tasks whose handles callers are free to drop; outcomes are also published
//! as [`ControllerEvent`]s for the view to pick up.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use moodlog_core::{
    normalize_name, EntryId, MoodEntry, MoodLabel, PreferenceRepository, SessionState,
};
use moodlog_net::EntryStore;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Which remote call a sync event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOperation {
    Fetch,
    Append,
}

/// Background outcomes reported to the view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    /// A remote listing replaced the history
    EntriesLoaded { count: usize },
    /// The remote store accepted an entry
    EntryAppended { id: EntryId },
    /// A remote call failed; nothing will retry it
    SyncFailed {
        operation: SyncOperation,
        message: String,
    },
}

/// Result of a successful `submit_entry`
#[derive(Debug)]
pub struct Submitted {
    pub entry: MoodEntry,
    /// Pending upload; `None` when sync is off
    pub upload: Option<JoinHandle<()>>,
}

pub struct MoodController<P> {
    prefs: Arc<Mutex<P>>,
    remote: Option<Arc<dyn EntryStore>>,
    session: Arc<Mutex<SessionState>>,
    event_tx: mpsc::UnboundedSender<ControllerEvent>,
    event_rx: Mutex<mpsc::UnboundedReceiver<ControllerEvent>>,
}

impl<P> MoodController<P>
where
    P: PreferenceRepository + Send + 'static,
{
    /// `remote` of `None` keeps history on this device only
    pub fn new(prefs: P, remote: Option<Arc<dyn EntryStore>>) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            prefs: Arc::new(Mutex::new(prefs)),
            remote,
            session: Arc::new(Mutex::new(SessionState::new())),
            event_tx,
            event_rx: Mutex::new(event_rx),
        }
    }

    pub fn is_synced(&self) -> bool {
        self.remote.is_some()
    }

    /// Copy of the current session for rendering
    pub fn snapshot(&self) -> SessionState {
        self.session.lock().unwrap().clone()
    }

    /// Next pending background outcome, if any
    pub fn try_recv_event(&self) -> Option<ControllerEvent> {
        self.event_rx.lock().unwrap().try_recv().ok()
    }

    /// Read stored preferences and start fetching the shared history
    ///
    /// Returns immediately; the session shows defaults for anything the store
    /// couldn't provide and an empty history until the fetch lands.
    pub fn initialize(&self) -> Option<JoinHandle<()>> {
        let preferences = match self.prefs.lock().unwrap().load_preferences() {
            Ok(preferences) => preferences,
            Err(e) => {
                warn!(error = %e, "Failed to load preferences, using defaults");
                Default::default()
            }
        };

        info!(
            has_name = preferences.user_name.is_some(),
            onboarding_done = preferences.onboarding_done,
            "Session initialized"
        );
        self.session.lock().unwrap().load_preferences(preferences);

        self.refresh()
    }

    /// Fetch the shared history again, replacing the local list on success
    pub fn refresh(&self) -> Option<JoinHandle<()>> {
        let remote = self.remote.clone()?;
        let session = self.session.clone();
        let event_tx = self.event_tx.clone();
        let epoch = session.lock().unwrap().epoch();

        Some(tokio::spawn(async move {
            match remote.fetch_all().await {
                Ok(entries) => {
                    let count = entries.len();
                    let applied = session.lock().unwrap().apply_remote(epoch, entries);
                    if applied {
                        debug!(count, "Remote history loaded");
                        let _ = event_tx.send(ControllerEvent::EntriesLoaded { count });
                    } else {
                        debug!(epoch, "Dropping listing fetched before reset");
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Failed to fetch entries");
                    let _ = event_tx.send(ControllerEvent::SyncFailed {
                        operation: SyncOperation::Fetch,
                        message: e.to_string(),
                    });
                }
            }
        }))
    }

    pub fn complete_onboarding(&self) {
        if let Err(e) = self.prefs.lock().unwrap().save_onboarding_done(true) {
            warn!(error = %e, "Failed to persist onboarding state");
        }
        self.session.lock().unwrap().preferences.onboarding_done = true;
    }

    /// Returns false, changing nothing, for blank input
    pub fn set_user_name(&self, name: &str) -> bool {
        let Some(name) = normalize_name(name) else {
            return false;
        };

        if let Err(e) = self.prefs.lock().unwrap().save_user_name(&name) {
            warn!(error = %e, "Failed to persist user name");
        }
        self.session.lock().unwrap().preferences.user_name = Some(name);
        true
    }

    /// Returns whether the label is selected afterwards
    pub fn toggle_mood_selection(&self, label: MoodLabel) -> bool {
        self.session.lock().unwrap().toggle_mood(label)
    }

    pub fn set_note(&self, note: &str) {
        self.session.lock().unwrap().set_note(note);
    }

    /// Log the current selection
    ///
    /// Does nothing when no mood is selected. Otherwise the entry shows up at
    /// the top of the history right away and an upload is started. A failed
    /// upload leaves the local entry in place.
    pub fn submit_entry(&self) -> Option<Submitted> {
        let entry = self.session.lock().unwrap().submit(Utc::now())?;
        info!(entry_id = %entry.id, moods = entry.moods.len(), "Entry logged");

        let upload = self.remote.clone().map(|remote| {
            let event_tx = self.event_tx.clone();
            let entry = entry.clone();
            tokio::spawn(async move {
                match remote.append(&entry).await {
                    Ok(()) => {
                        let _ = event_tx.send(ControllerEvent::EntryAppended {
                            id: entry.id.clone(),
                        });
                    }
                    Err(e) => {
                        warn!(entry_id = %entry.id, error = %e, "Failed to upload entry");
                        let _ = event_tx.send(ControllerEvent::SyncFailed {
                            operation: SyncOperation::Append,
                            message: e.to_string(),
                        });
                    }
                }
            })
        });

        Some(Submitted { entry, upload })
    }

    /// Switch theme now; the stored flag follows on the blocking pool
    ///
    /// The write is skipped when a `reset` lands before it runs.
    pub fn set_dark_mode(&self, enabled: bool) -> JoinHandle<()> {
        let epoch = {
            let mut session = self.session.lock().unwrap();
            session.preferences.dark_mode = enabled;
            session.epoch()
        };

        let prefs = self.prefs.clone();
        let session = self.session.clone();
        tokio::task::spawn_blocking(move || {
            // Lock order: prefs, then session (same as reset)
            let prefs = prefs.lock().unwrap();
            if session.lock().unwrap().epoch() != epoch {
                debug!(epoch, "Dropping dark mode write queued before reset");
                return;
            }
            if let Err(e) = prefs.save_dark_mode(enabled) {
                warn!(error = %e, "Failed to persist dark mode");
            }
        })
    }

    /// Forget everything stored and return to first-launch state
    pub fn reset(&self) {
        let prefs = self.prefs.lock().unwrap();
        if let Err(e) = prefs.clear_preferences() {
            warn!(error = %e, "Failed to clear preferences");
        }
        self.session.lock().unwrap().reset();
        drop(prefs);
        info!("Session reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodlog_core::{Database, Preferences, Screen};
    use moodlog_net::MemoryEntryStore;

    type TestController = MoodController<Database>;

    fn controller_with(remote: Arc<MemoryEntryStore>) -> TestController {
        let db = Database::open_in_memory().unwrap();
        MoodController::new(db, Some(remote as Arc<dyn EntryStore>))
    }

    /// Onboarded, named, with the startup fetch settled and its event drained
    async fn ready_controller(name: &str, remote: Arc<MemoryEntryStore>) -> TestController {
        let controller = controller_with(remote);
        if let Some(fetch) = controller.initialize() {
            fetch.await.unwrap();
        }
        while controller.try_recv_event().is_some() {}
        controller.complete_onboarding();
        controller.set_user_name(name);
        controller
    }

    fn remote_entry(author: &str, timestamp: i64) -> MoodEntry {
        let at = chrono::DateTime::from_timestamp_millis(timestamp).unwrap();
        MoodEntry::new_at(author, vec![MoodLabel::Sad].into(), None, at).unwrap()
    }

    fn assert_default_state(session: &SessionState) {
        assert!(session.needs_onboarding());
        assert!(session.needs_name());
        assert!(!session.preferences.dark_mode);
        assert!(session.entries.is_empty());
        assert!(session.selection.is_empty());
        assert!(session.note.is_empty());
    }

    #[tokio::test]
    async fn test_fresh_install_defaults_before_fetch() {
        let remote = Arc::new(MemoryEntryStore::with_entries(vec![remote_entry("Bo", 1)]));
        let hold = remote.hold_fetches().await;
        let controller = controller_with(remote.clone());

        let fetch = controller.initialize().unwrap();
        let session = controller.snapshot();
        assert_default_state(&session);
        assert_eq!(session.screen(), Screen::Onboarding);

        drop(hold);
        fetch.await.unwrap();
        assert_eq!(controller.snapshot().entries.len(), 1);
        assert_eq!(
            controller.try_recv_event(),
            Some(ControllerEvent::EntriesLoaded { count: 1 })
        );
    }

    #[tokio::test]
    async fn test_initialize_orders_remote_history_newest_first() {
        let remote = Arc::new(MemoryEntryStore::with_entries(vec![
            remote_entry("old", 1_000),
            remote_entry("new", 3_000),
            remote_entry("mid", 2_000),
        ]));
        let controller = controller_with(remote);

        controller.initialize().unwrap().await.unwrap();

        let authors: Vec<String> = controller
            .snapshot()
            .entries
            .into_iter()
            .map(|e| e.author)
            .collect();
        assert_eq!(authors, ["new", "mid", "old"]);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_swallowed() {
        let remote = Arc::new(MemoryEntryStore::new());
        remote.set_failing(true);
        let controller = ready_controller("Ava", remote.clone()).await;

        controller.toggle_mood_selection(MoodLabel::Happy);
        let submitted = controller.submit_entry().unwrap();
        submitted.upload.unwrap().await.unwrap();

        controller.refresh().unwrap().await.unwrap();

        let session = controller.snapshot();
        assert_eq!(session.screen(), Screen::Main);
        assert_eq!(session.entries, vec![submitted.entry]);
        assert!(remote.entries().is_empty());

        let mut failures = Vec::new();
        while let Some(event) = controller.try_recv_event() {
            if let ControllerEvent::SyncFailed { operation, .. } = event {
                failures.push(operation);
            }
        }
        assert!(failures.contains(&SyncOperation::Append));
        assert!(failures.contains(&SyncOperation::Fetch));
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let controller = controller_with(Arc::new(MemoryEntryStore::new()));
        controller.initialize();
        controller.complete_onboarding();

        assert!(!controller.set_user_name("   "));
        assert_eq!(controller.snapshot().screen(), Screen::NameEntry);

        assert!(controller.set_user_name("  Ava "));
        let session = controller.snapshot();
        assert_eq!(session.screen(), Screen::Main);
        assert_eq!(session.preferences.user_name.as_deref(), Some("Ava"));
    }

    #[tokio::test]
    async fn test_preferences_persisted() {
        let controller = ready_controller("Ava", Arc::new(MemoryEntryStore::new())).await;
        controller.set_dark_mode(true).await.unwrap();

        let stored = controller.prefs.lock().unwrap().load_preferences().unwrap();
        assert_eq!(
            stored,
            Preferences {
                user_name: Some("Ava".into()),
                dark_mode: true,
                onboarding_done: true,
            }
        );
    }

    #[tokio::test]
    async fn test_toggle_pairs_cancel_out() {
        let controller = ready_controller("Ava", Arc::new(MemoryEntryStore::new())).await;
        controller.toggle_mood_selection(MoodLabel::Angry);
        let before = controller.snapshot().selection;

        for label in [MoodLabel::Happy, MoodLabel::Angry, MoodLabel::Happy, MoodLabel::Angry] {
            controller.toggle_mood_selection(label);
        }

        assert_eq!(controller.snapshot().selection, before);
    }

    #[tokio::test]
    async fn test_submit_with_empty_selection_is_noop() {
        let remote = Arc::new(MemoryEntryStore::new());
        let controller = ready_controller("Ava", remote.clone()).await;
        controller.set_note("just a note");

        assert!(controller.submit_entry().is_none());

        tokio::task::yield_now().await;
        let session = controller.snapshot();
        assert!(session.entries.is_empty());
        assert_eq!(session.note, "just a note");
        assert_eq!(remote.append_count(), 0);
    }

    #[tokio::test]
    async fn test_ava_logs_a_great_day() {
        let remote = Arc::new(MemoryEntryStore::new());
        let controller = ready_controller("Ava", remote.clone()).await;

        controller.toggle_mood_selection(MoodLabel::Happy);
        controller.toggle_mood_selection(MoodLabel::Surprised);
        controller.set_note("great day");
        let submitted = controller.submit_entry().unwrap();

        let session = controller.snapshot();
        let first = &session.entries[0];
        assert_eq!(first.author, "Ava");
        assert_eq!(first.moods, vec![MoodLabel::Happy, MoodLabel::Surprised].into());
        assert_eq!(first.note.as_deref(), Some("great day"));
        assert!(session.selection.is_empty());
        assert!(session.note.is_empty());

        submitted.upload.unwrap().await.unwrap();
        assert_eq!(remote.entries(), vec![submitted.entry.clone()]);
        assert_eq!(
            controller.try_recv_event(),
            Some(ControllerEvent::EntryAppended {
                id: submitted.entry.id
            })
        );
    }

    #[tokio::test]
    async fn test_late_fetch_replaces_optimistic_entry() {
        let remote = Arc::new(MemoryEntryStore::with_entries(vec![remote_entry("Bo", 1)]));
        let hold = remote.hold_fetches().await;
        let controller = controller_with(remote.clone());
        let fetch = controller.initialize().unwrap();
        controller.complete_onboarding();
        controller.set_user_name("Ava");

        // Upload fails, so the entry never reaches the listing
        remote.set_failing(true);
        controller.toggle_mood_selection(MoodLabel::Happy);
        controller.submit_entry().unwrap().upload.unwrap().await.unwrap();
        remote.set_failing(false);

        drop(hold);
        fetch.await.unwrap();

        let authors: Vec<String> = controller
            .snapshot()
            .entries
            .into_iter()
            .map(|e| e.author)
            .collect();
        assert_eq!(authors, ["Bo"]);
    }

    #[tokio::test]
    async fn test_reset_then_initialize_restores_defaults() {
        let remote = Arc::new(MemoryEntryStore::new());
        let controller = ready_controller("Ava", remote.clone()).await;
        controller.set_dark_mode(true).await.unwrap();
        controller.toggle_mood_selection(MoodLabel::Sad);
        controller.submit_entry();
        controller.toggle_mood_selection(MoodLabel::Afraid);
        controller.set_note("draft");

        let hold = remote.hold_fetches().await;
        controller.reset();
        controller.initialize();

        let session = controller.snapshot();
        assert_default_state(&session);
        assert_eq!(session.screen(), Screen::Onboarding);
        assert_eq!(
            controller.prefs.lock().unwrap().load_preferences().unwrap(),
            Preferences::default()
        );
        drop(hold);
    }

    #[tokio::test]
    async fn test_fetch_completing_after_reset_is_dropped() {
        let remote = Arc::new(MemoryEntryStore::with_entries(vec![remote_entry("Bo", 1)]));
        let hold = remote.hold_fetches().await;
        let controller = controller_with(remote.clone());

        let fetch = controller.initialize().unwrap();
        controller.reset();
        drop(hold);
        fetch.await.unwrap();

        assert!(controller.snapshot().entries.is_empty());
        assert_eq!(controller.try_recv_event(), None);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_dark_mode_write_does_not_outlive_reset() {
        let controller = ready_controller("Ava", Arc::new(MemoryEntryStore::new())).await;

        for _ in 0..200 {
            let write = controller.set_dark_mode(true);
            controller.reset();
            write.await.unwrap();

            assert!(!controller.snapshot().preferences.dark_mode);
            assert_eq!(
                controller.prefs.lock().unwrap().load_preferences().unwrap(),
                Preferences::default()
            );
        }
    }

    #[tokio::test]
    async fn test_dark_mode_write_after_reset_persists() {
        let controller = ready_controller("Ava", Arc::new(MemoryEntryStore::new())).await;
        controller.reset();

        controller.set_dark_mode(true).await.unwrap();
        let stored = controller.prefs.lock().unwrap().load_preferences().unwrap();
        assert!(stored.dark_mode);
    }

    #[tokio::test]
    async fn test_local_only_session() {
        let db = Database::open_in_memory().unwrap();
        let controller: TestController = MoodController::new(db, None);

        assert!(!controller.is_synced());
        assert!(controller.initialize().is_none());
        controller.complete_onboarding();
        controller.set_user_name("Ava");

        controller.toggle_mood_selection(MoodLabel::Disgusted);
        let submitted = controller.submit_entry().unwrap();
        assert!(submitted.upload.is_none());
        assert_eq!(controller.snapshot().entries, vec![submitted.entry]);
    }
}
