//! Moodlog Core Library
//!
//! Data model, session state machine, and local preference storage for Moodlog.

pub mod error;
pub mod models;
pub mod session;
pub mod storage;

pub use error::{Error, Result};
pub use models::*;
pub use session::{Screen, SessionState};
pub use storage::{Database, PreferenceKey, PreferenceRepository, PreferencesStore};
