//! Data models for Moodlog

mod entry;
mod mood;
mod preferences;

pub use entry::*;
pub use mood::*;
pub use preferences::*;
