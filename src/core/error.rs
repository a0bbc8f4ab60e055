use rusqlite;
use std::io;
use thiserror::Error;

/// Failure reported by a [`NumberStore`](crate::core::store::NumberStore) lookup.
///
/// The service never branches on the variant; it hands the value back to its
/// caller untouched.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Not found: {0}")]
    NotFound(i64),
    #[error("{0}")]
    Unavailable(String),
}

impl LookupError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        LookupError::Unavailable(msg.into())
    }
}

#[derive(Error, Debug)]
pub enum NumcheckError {
    #[error("SQLite error: {0}")]
    RusqliteError(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Audit log error: {0}")]
    Audit(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
