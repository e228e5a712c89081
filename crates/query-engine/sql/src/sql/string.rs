//! Type definitions of a low-level SQL string representation.

use serde::Serialize;
use std::fmt::Write;

const SQL_QUERY_BUFFER_INITIAL_CAPACITY: usize = 1024;

/// A SQL statement and the parameters bound to its placeholders.
///
/// `params[i - 1]` is the value bound at `$i`.
#[derive(Debug, PartialEq)]
pub struct SQL {
    pub sql: String,
    pub params: Vec<Param>,
    /// for internal use and tests only
    pub param_index: usize,
}

impl Default for SQL {
    fn default() -> Self {
        Self::new()
    }
}

/// A parameter for a parameterized query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Param {
    String(String),
    Bool(bool),
    Int2(i16),
    Int4(i32),
    Int8(i64),
    Float8(f64),
    StringArray(Vec<String>),
    Int2Array(Vec<i16>),
    Int4Array(Vec<i32>),
    Int8Array(Vec<i64>),
}

impl SQL {
    pub fn new() -> SQL {
        SQL {
            sql: String::with_capacity(SQL_QUERY_BUFFER_INITIAL_CAPACITY),
            params: vec![],
            param_index: 0,
        }
    }
    pub fn append_syntax(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }
    /// Bind a parameter, write its `$n` placeholder and return `n`.
    pub fn append_param(&mut self, param: Param) -> usize {
        self.params.push(param);
        self.param_index = self.params.len();
        // writing to a String cannot fail
        let _ = write!(self.sql, "${}", self.param_index);
        self.param_index
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::String(value)
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::String(value.to_string())
    }
}

impl From<bool> for Param {
    fn from(value: bool) -> Self {
        Param::Bool(value)
    }
}

impl From<i16> for Param {
    fn from(value: i16) -> Self {
        Param::Int2(value)
    }
}

impl From<i32> for Param {
    fn from(value: i32) -> Self {
        Param::Int4(value)
    }
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Param::Int8(value)
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Param::Float8(value)
    }
}

impl From<Vec<String>> for Param {
    fn from(value: Vec<String>) -> Self {
        Param::StringArray(value)
    }
}

impl From<Vec<i16>> for Param {
    fn from(value: Vec<i16>) -> Self {
        Param::Int2Array(value)
    }
}

impl From<Vec<i32>> for Param {
    fn from(value: Vec<i32>) -> Self {
        Param::Int4Array(value)
    }
}

impl From<Vec<i64>> for Param {
    fn from(value: Vec<i64>) -> Self {
        Param::Int8Array(value)
    }
}
