//! Moodlog - personal mood journal
//!
//! Pick how you feel, add a note, and keep a history. Preferences live in a
//! local SQLite file; entries are shared through a remote JSON store unless
//! sync is turned off in `config.toml`.

use std::path::Path;
use std::sync::Arc;

use moodlog_core::Database;
use moodlog_net::{EntryStore, HttpEntryStore};
use slint::ComponentHandle;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod controller;
mod error;
mod viewmodel;

use config::AppConfig;

slint::include_modules!();

fn open_database(path: &Path) -> error::Result<Database> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(Database::open(path)?)
}

fn open_remote(config: &AppConfig) -> error::Result<Option<Arc<dyn EntryStore>>> {
    let Some(url) = config.remote_url() else {
        tracing::info!("Sync disabled, history stays on this device");
        return Ok(None);
    };

    let store = HttpEntryStore::new(url, config.request_timeout())?;
    Ok(Some(Arc::new(store)))
}

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting Moodlog");

    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Ignoring unreadable configuration");
        AppConfig::default()
    });

    // Tokio runtime for sync and background writes
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to create async runtime: {}", e);
            std::process::exit(1);
        }
    };
    let _guard = runtime.enter();

    let db = match config.database_path().and_then(|path| open_database(&path)) {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to open preference store: {}", e);
            std::process::exit(1);
        }
    };

    let remote = open_remote(&config).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Remote store unavailable, running local only");
        None
    });
    let controller = Arc::new(controller::MoodController::new(db, remote));

    let main_window = match MainWindow::new() {
        Ok(window) => window,
        Err(e) => {
            tracing::error!("Failed to create main window: {}", e);
            std::process::exit(1);
        }
    };

    viewmodel::setup_bindings(&main_window, controller.clone());

    // History arrives through the sync event queue
    drop(controller.initialize());
    viewmodel::render(&main_window, &controller);

    if let Err(e) = main_window.run() {
        tracing::error!("Event loop failed: {}", e);
        std::process::exit(1);
    }
}
