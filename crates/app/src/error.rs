//! Application error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] moodlog_core::Error),

    #[error("Network setup error: {0}")]
    Network(#[from] moodlog_net::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not determine {0} directory")]
    NoProjectDir(&'static str),
}

pub type Result<T> = std::result::Result<T, AppError>;
