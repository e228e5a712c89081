//! Type definitions of a filter tree and the statement it is rendered into.

use super::string::Param;

/// The boolean operator joining the direct children of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    And,
    Or,
}

/// A comparison of a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
    NotIn,
    IsNull,
    IsNotNull,
    Contains,
}

impl Operation {
    /// Whether rendering this operation consumes a parameter.
    pub fn binds_value(self) -> bool {
        !matches!(self, Operation::IsNull | Operation::IsNotNull)
    }
}

/// A comparison of one column of the current table against an optional bound value.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueFilter {
    pub operation: Operation,
    pub column: String,
    pub value: Option<Param>,
}

/// Anything that can appear in the filter list of a group.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Value(ValueFilter),
    JoinColumn(JoinColumnFilter),
    JoinTable(JoinTableFilter),
}

/// A list of filters and nested groups joined by a single combinator.
///
/// Groups are only ever extended through `add_filter` and `add_group`, which keep the
/// tree flat: no group has exactly one child, and no group contains a child group with
/// its own combinator.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterGroup {
    pub(crate) combinator: Combinator,
    pub(crate) filters: Vec<Filter>,
    pub(crate) groups: Vec<FilterGroup>,
}

/// The filter applied to one table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableFilter {
    pub table: String,
    pub filter_group: FilterGroup,
}

/// An existence check across a foreign key, `parent.parent_column = child.child_column`.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinColumnFilter {
    pub filter: TableFilter,
    pub parent_column: String,
    pub child_column: String,
}

/// An existence check across a bridge table.
///
/// The parent matches when a bridge row has `join_table_parent_column = parent.parent_join_column`
/// and the child row it points at, `child.child_join_column = join_table_child_column`,
/// satisfies the nested filter.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinTableFilter {
    pub filter: TableFilter,
    pub join_table: String,
    pub parent_join_column: String,
    pub join_table_parent_column: String,
    pub child_join_column: String,
    pub join_table_child_column: String,
}

/// Restricts a statement to the rows related to one parent row through a bridge table.
///
/// The bridge table is joined as `J`.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedTable {
    pub join_table: String,
    pub join_table_join_column: String,
    pub data_table_join_column: String,
    pub join_table_filter_column: String,
    pub join_table_filter_value: Param,
}

/// aliases that we give to relations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableAlias {
    /// `T<n>`, numbered in order of allocation
    Table(u32),
    /// `J`, the bridge table of a `JoinedTable`
    Bridge,
}

/// An EXPLAIN clause
#[derive(Debug, Clone, PartialEq)]
pub enum Explain<'a> {
    Select(&'a Select),
}

/// A SELECT over one table, filtered by a filter tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub select_list: SelectList,
    pub from: TableFilter,
    pub joined_table: Option<JoinedTable>,
}

/// The columns of the root table to project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectList {
    Columns(Vec<String>),
    SelectStar,
}
