//! Filtered queries over the Sakila sample database.

pub mod entity;
pub mod error;
pub mod loaders;
pub mod model;
pub mod query;
pub mod relationships;
pub mod state;
