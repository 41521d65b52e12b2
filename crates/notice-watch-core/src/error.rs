//! Error types shared by the core and its store/notifier implementations.

use thiserror::Error;

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Notice Watch errors.
///
/// Every variant is cycle-scoped except [`Error::Config`], which is fatal
/// at startup.
#[derive(Debug, Error)]
pub enum Error {
    /// A source adapter could not fetch or parse its listing.
    #[error("fetch failed for {source_name}: {message}")]
    Fetch {
        source_name: String,
        message: String,
    },

    /// A raw item failed validation at the adapter boundary.
    #[error("invalid item: {0}")]
    InvalidItem(String),

    /// Notification delivery failed (including the plain-text fallback).
    #[error("dispatch failed: {0}")]
    Dispatch(String),

    /// The item store rejected a query, insert, or commit.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Missing credentials or invalid settings.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn fetch(source_name: impl Into<String>, message: impl ToString) -> Self {
        Self::Fetch {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }

    pub fn persistence(err: impl ToString) -> Self {
        Self::Persistence(err.to_string())
    }

    pub fn dispatch(err: impl ToString) -> Self {
        Self::Dispatch(err.to_string())
    }
}
