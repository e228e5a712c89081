//! Filter tree types, their normalization, and conversion to a SQL string with parameters.

pub mod ast;
pub mod convert;
pub mod execution_plan;
pub mod grouping;
pub mod helpers;
pub mod string;
