//! Helpers for building sql::ast types in certain shapes and patterns.

use super::ast::*;
use super::string::Param;

impl ValueFilter {
    /// A comparison that binds `value`.
    pub fn new(operation: Operation, column: impl Into<String>, value: impl Into<Param>) -> Self {
        ValueFilter {
            operation,
            column: column.into(),
            value: Some(value.into()),
        }
    }

    /// A comparison that binds nothing, e.g. `IS NULL`.
    pub fn unary(operation: Operation, column: impl Into<String>) -> Self {
        ValueFilter {
            operation,
            column: column.into(),
            value: None,
        }
    }
}

impl TableFilter {
    /// An unconstrained filter over `table`. The root group combines with AND.
    pub fn new(table: impl Into<String>) -> Self {
        TableFilter {
            table: table.into(),
            filter_group: FilterGroup::new(Combinator::And),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.filter_group.is_empty()
    }
}

impl JoinColumnFilter {
    pub fn new(
        filter: TableFilter,
        parent_column: impl Into<String>,
        child_column: impl Into<String>,
    ) -> Self {
        JoinColumnFilter {
            filter,
            parent_column: parent_column.into(),
            child_column: child_column.into(),
        }
    }
}

impl JoinTableFilter {
    pub fn new(
        filter: TableFilter,
        join_table: impl Into<String>,
        parent_join_column: impl Into<String>,
        join_table_parent_column: impl Into<String>,
        child_join_column: impl Into<String>,
        join_table_child_column: impl Into<String>,
    ) -> Self {
        JoinTableFilter {
            filter,
            join_table: join_table.into(),
            parent_join_column: parent_join_column.into(),
            join_table_parent_column: join_table_parent_column.into(),
            child_join_column: child_join_column.into(),
            join_table_child_column: join_table_child_column.into(),
        }
    }
}

// SELECTs //

/// Turn a list of column names into a select list. No columns selects everything.
pub fn make_select_list<S: AsRef<str>>(columns: &[S]) -> SelectList {
    if columns.is_empty() {
        SelectList::SelectStar
    } else {
        SelectList::Columns(columns.iter().map(|c| c.as_ref().to_string()).collect())
    }
}

/// Build a simple select over the table of `from`.
pub fn simple_select<S: AsRef<str>>(columns: &[S], from: TableFilter) -> Select {
    Select {
        select_list: make_select_list(columns),
        from,
        joined_table: None,
    }
}

/// Build a select of the rows of `from` related to one parent row through a bridge table.
pub fn joined_select<S: AsRef<str>>(
    columns: &[S],
    from: TableFilter,
    joined_table: JoinedTable,
) -> Select {
    Select {
        select_list: make_select_list(columns),
        from,
        joined_table: Some(joined_table),
    }
}
