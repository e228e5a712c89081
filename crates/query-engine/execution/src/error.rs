//! Errors raised while running queries.

use thiserror::Error;

/// Errors from the database or from metrics registration.
///
/// Database errors are surfaced as they are, no retry is attempted.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    DB(#[from] sqlx::Error),
    #[error("error registering metrics: {0}")]
    Metrics(#[from] prometheus::Error),
}
