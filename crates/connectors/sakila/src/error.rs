//! Errors surfaced by the connector.

use thiserror::Error;

use query_engine_execution::error::Error as ExecutionError;
use query_engine_translation::translation::error::Error as TranslationError;

use crate::entity::{Entity, Relationship};

/// Query or explain errors.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("invalid filter: {0}")]
    InvalidFilter(serde_json::Error),
    #[error("{entity} has no relationship '{relationship}'")]
    UnsupportedRelationship {
        entity: Entity,
        relationship: Relationship,
    },
    #[error("{0}")]
    InvalidRequest(#[from] TranslationError),
    #[error("{0}")]
    Execution(#[from] ExecutionError),
    #[error("unable to serialize the response: {0}")]
    Serialization(serde_json::Error),
}
