//! Convert a filter tree to a low-level SQL string.

use super::ast::*;
use super::string::*;

/// Run `to_sql` on a select and return the resulting statement.
pub fn select_to_sql(select: &Select) -> SQL {
    let mut sql = SQL::new();
    select.to_sql(&mut sql);
    sql
}

/// Run `to_sql` on an explain and return the resulting statement.
pub fn explain_to_sql(explain: &Explain) -> SQL {
    let mut sql = SQL::new();
    explain.to_sql(&mut sql);
    sql
}

/// The tables visible at the current point of the walk.
///
/// Entering a join pushes the tables it introduces and leaving it pops them, so the
/// current table is always the innermost one and a nested filter correlates with the
/// table directly enclosing it.
#[derive(Debug)]
pub struct TableScope {
    next_table: u32,
    root: TableAlias,
    nested: Vec<TableAlias>,
}

impl Default for TableScope {
    fn default() -> Self {
        Self::new()
    }
}

impl TableScope {
    /// A scope holding only the root table, `T0`.
    pub fn new() -> TableScope {
        TableScope {
            next_table: 1,
            root: TableAlias::Table(0),
            nested: vec![],
        }
    }

    pub fn root(&self) -> TableAlias {
        self.root
    }

    pub fn current(&self) -> TableAlias {
        self.nested.last().copied().unwrap_or(self.root)
    }

    /// Allocate a fresh alias and make it the current table.
    pub fn push_table(&mut self) -> TableAlias {
        let alias = TableAlias::Table(self.next_table);
        self.next_table += 1;
        self.nested.push(alias);
        alias
    }

    pub fn pop_table(&mut self) {
        self.nested.pop();
    }
}

impl Explain<'_> {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_syntax("EXPLAIN ");
        match self {
            Explain::Select(select) => select.to_sql(sql),
        }
    }
}

impl Select {
    pub fn to_sql(&self, sql: &mut SQL) {
        let mut scope = TableScope::new();
        let table = scope.root();

        sql.append_syntax("SELECT ");
        self.select_list.to_sql(sql, table);

        sql.append_syntax(" FROM ");
        match &self.joined_table {
            None => {
                sql.append_syntax(&self.from.table);
                sql.append_syntax(" AS ");
                table.to_sql(sql);
            }
            Some(joined) => {
                sql.append_syntax(&joined.join_table);
                sql.append_syntax(" AS ");
                TableAlias::Bridge.to_sql(sql);
                sql.append_syntax(" INNER JOIN ");
                sql.append_syntax(&self.from.table);
                sql.append_syntax(" AS ");
                table.to_sql(sql);
                sql.append_syntax(" ON ");
                column_to_sql(sql, TableAlias::Bridge, &joined.join_table_join_column);
                sql.append_syntax(" = ");
                column_to_sql(sql, table, &joined.data_table_join_column);
            }
        }

        let filtered = !self.from.is_empty();
        if filtered || self.joined_table.is_some() {
            sql.append_syntax(" WHERE ");
        }

        if filtered {
            self.from.to_sql(sql, &mut scope);
        }

        if let Some(joined) = &self.joined_table {
            if filtered {
                sql.append_syntax(" AND ");
            }
            column_to_sql(sql, TableAlias::Bridge, &joined.join_table_filter_column);
            sql.append_syntax(" = ");
            sql.append_param(joined.join_table_filter_value.clone());
        }
    }
}

impl SelectList {
    pub fn to_sql(&self, sql: &mut SQL, table: TableAlias) {
        match self {
            SelectList::Columns(columns) => {
                for (index, column) in columns.iter().enumerate() {
                    if index > 0 {
                        sql.append_syntax(", ");
                    }
                    column_to_sql(sql, table, column);
                }
            }
            SelectList::SelectStar => {
                table.to_sql(sql);
                sql.append_syntax(".*");
            }
        }
    }
}

impl TableFilter {
    /// Write the predicate of this filter for the current table of `scope`.
    pub fn to_sql(&self, sql: &mut SQL, scope: &mut TableScope) {
        self.filter_group.to_sql(sql, scope);
    }
}

impl FilterGroup {
    pub fn to_sql(&self, sql: &mut SQL, scope: &mut TableScope) {
        // a lone child needs no brackets
        let write_brackets = self.len() > 1;
        if write_brackets {
            sql.append_syntax("(");
        }

        for (index, filter) in self.filters.iter().enumerate() {
            if index > 0 {
                self.combinator.to_sql(sql);
            }
            filter.to_sql(sql, scope);
        }

        for (index, group) in self.groups.iter().enumerate() {
            if index > 0 || !self.filters.is_empty() {
                self.combinator.to_sql(sql);
            }
            group.to_sql(sql, scope);
        }

        if write_brackets {
            sql.append_syntax(")");
        }
    }
}

impl Combinator {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            Combinator::And => sql.append_syntax(" AND "),
            Combinator::Or => sql.append_syntax(" OR "),
        }
    }
}

impl Filter {
    pub fn to_sql(&self, sql: &mut SQL, scope: &mut TableScope) {
        match self {
            Filter::Value(filter) => filter.to_sql(sql, scope),
            Filter::JoinColumn(filter) => filter.to_sql(sql, scope),
            Filter::JoinTable(filter) => filter.to_sql(sql, scope),
        }
    }
}

impl ValueFilter {
    pub fn to_sql(&self, sql: &mut SQL, scope: &TableScope) {
        column_to_sql(sql, scope.current(), &self.column);

        // metacharacters in the bound value of Contains are not escaped
        let (before, after) = match self.operation {
            Operation::Eq => (" = ", ""),
            Operation::Neq => (" <> ", ""),
            Operation::Lt => (" < ", ""),
            Operation::Lte => (" <= ", ""),
            Operation::Gt => (" > ", ""),
            Operation::Gte => (" >= ", ""),
            Operation::In => (" = ANY(", ")"),
            Operation::NotIn => (" <> ANY(", ")"),
            Operation::IsNull => (" IS NULL", ""),
            Operation::IsNotNull => (" IS NOT NULL", ""),
            Operation::Contains => (" LIKE '%' || ", " || '%'"),
        };

        sql.append_syntax(before);
        if self.operation.binds_value() {
            self.bind(sql);
            sql.append_syntax(after);
        }
    }

    /// Bind the value of this filter.
    ///
    /// A value-binding operation without a value means the filter was wired up wrongly,
    /// which no caller can recover from.
    fn bind(&self, sql: &mut SQL) {
        match &self.value {
            Some(value) => {
                sql.append_param(value.clone());
            }
            None => panic!(
                "operation {:?} on column '{}' has no value to bind",
                self.operation, self.column
            ),
        }
    }
}

impl JoinColumnFilter {
    pub fn to_sql(&self, sql: &mut SQL, scope: &mut TableScope) {
        let parent = scope.current();
        let child = scope.push_table();

        sql.append_syntax("EXISTS(SELECT TRUE FROM ");
        sql.append_syntax(&self.filter.table);
        sql.append_syntax(" AS ");
        child.to_sql(sql);
        sql.append_syntax(" WHERE ");
        column_to_sql(sql, child, &self.child_column);
        sql.append_syntax(" = ");
        column_to_sql(sql, parent, &self.parent_column);

        if !self.filter.is_empty() {
            sql.append_syntax(" AND ");
            self.filter.to_sql(sql, scope);
        }

        sql.append_syntax(")");
        scope.pop_table();
    }
}

impl JoinTableFilter {
    pub fn to_sql(&self, sql: &mut SQL, scope: &mut TableScope) {
        let parent = scope.current();
        let bridge = scope.push_table();
        let child = scope.push_table();

        sql.append_syntax("EXISTS(SELECT TRUE FROM ");
        sql.append_syntax(&self.join_table);
        sql.append_syntax(" AS ");
        bridge.to_sql(sql);
        sql.append_syntax(" INNER JOIN ");
        sql.append_syntax(&self.filter.table);
        sql.append_syntax(" AS ");
        child.to_sql(sql);
        sql.append_syntax(" ON ");
        column_to_sql(sql, child, &self.child_join_column);
        sql.append_syntax(" = ");
        column_to_sql(sql, bridge, &self.join_table_child_column);
        sql.append_syntax(" WHERE ");
        column_to_sql(sql, bridge, &self.join_table_parent_column);
        sql.append_syntax(" = ");
        column_to_sql(sql, parent, &self.parent_join_column);

        if !self.filter.is_empty() {
            sql.append_syntax(" AND ");
            self.filter.to_sql(sql, scope);
        }

        sql.append_syntax(")");
        scope.pop_table();
        scope.pop_table();
    }
}

// names
impl TableAlias {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            TableAlias::Table(index) => {
                sql.append_syntax("T");
                sql.append_syntax(&index.to_string());
            }
            TableAlias::Bridge => sql.append_syntax("J"),
        }
    }
}

fn column_to_sql(sql: &mut SQL, table: TableAlias, column: &str) {
    table.to_sql(sql);
    sql.append_syntax(".");
    sql.append_syntax(column);
}
