//! Error types for Moodlog Core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Mood selection is empty")]
    EmptySelection,
}

pub type Result<T> = std::result::Result<T, Error>;
