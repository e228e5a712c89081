//! Errors for query translation.

use thiserror::Error;

/// A type for translation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Field '{field}' not found in collection '{collection}'.")]
    FieldNotFound { field: String, collection: String },
}
