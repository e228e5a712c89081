//! Translate typed entity filters into an ExecutionPlan (SQL) to be run against the database.

pub mod error;
pub mod query;
