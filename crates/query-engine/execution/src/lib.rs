//! Query execution against a PostgreSQL database.

pub mod error;
pub mod loader;
pub mod metrics;
pub mod query;
