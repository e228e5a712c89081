//! Describe the SQL execution plan.

use super::ast;
use super::convert;
use super::string;

/// Definition of an execution plan to be run against the database.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionPlan {
    /// The table the rows are read from.
    pub root_table: String,
    /// The query.
    pub query: ast::Select,
}

impl ExecutionPlan {
    /// Extract the query component as SQL.
    pub fn query_sql(&self) -> string::SQL {
        convert::select_to_sql(&self.query)
    }

    /// Extract an EXPLAIN of the query component as SQL.
    pub fn explain_query_sql(&self) -> string::SQL {
        convert::explain_to_sql(&ast::Explain::Select(&self.query))
    }
}

/// A simple execution plan with only a root table and a query.
pub fn simple_exec_plan(query: ast::Select) -> ExecutionPlan {
    ExecutionPlan {
        root_table: query.from.table.clone(),
        query,
    }
}
