//! Moodlog Network Library
//!
//! Talks to the shared remote entry store.
//!
//! # Wire format
//!
//! - `GET <url>` returns a JSON object mapping opaque keys to entries, or
//!   `null` when nothing has been logged yet.
//! - `POST <url>` with one JSON entry appends it. The store answers with the
//!   key it generated, which is ignored.
//!
//! There is no authentication, pagination, or deduplication.
//!
//! # Usage
//!
//! ```ignore
//! let store = HttpEntryStore::new(DEFAULT_REMOTE_URL, Duration::from_secs(10))?;
//! store.append(&entry).await?;
//! let entries = store.fetch_all().await?;
//! ```

pub mod error;
pub mod http;
pub mod memory;
pub mod store;
mod wire;

pub use error::{Error, Result};
pub use http::HttpEntryStore;
pub use memory::MemoryEntryStore;
pub use store::EntryStore;

/// Shared realtime database the synced variant logs to
pub const DEFAULT_REMOTE_URL: &str =
    "https://moodlog-default-rtdb.firebaseio.com/moods.json";
