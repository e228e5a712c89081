//! Common functions used across test cases.

use std::fs;
use std::path::PathBuf;

use query_engine_sql::sql::string::SQL;
use sakila_connector::entity::Entity;
use sakila_connector::error::QueryError;

/// Read the filter stored in `tests/goldenfiles/<name>.json`.
pub fn read_filter(name: &str) -> serde_json::Value {
    let path = PathBuf::from("tests/goldenfiles").join(format!("{name}.json"));
    let contents = fs::read_to_string(&path).unwrap();
    serde_json::from_str(&contents).unwrap()
}

/// Translate the goldenfile filter `name` over `entity`.
pub fn translate(entity: Entity, fields: &[&str], name: &str) -> Result<SQL, QueryError> {
    let plan = entity.plan(fields, Some(read_filter(name)))?;
    Ok(plan.query_sql())
}
