//! Collect typed entity filters into a filter tree.
//!
//! Every helper here follows the same rule: an absent field places no constraint and adds
//! nothing to the tree. The value of a present field is never inspected to decide that.

use query_engine_sql::sql::ast::{
    Combinator, FilterGroup, JoinColumnFilter, JoinTableFilter, Operation, TableFilter,
    ValueFilter,
};
use query_engine_sql::sql::string::Param;

/// A filter over one table, as accepted from a client.
pub trait InputFilter {
    /// The table this filter applies to.
    const TABLE_NAME: &'static str;

    /// Filters that must all hold. Empty for filters without boolean nesting.
    fn and_filters(&self) -> &[Self]
    where
        Self: Sized,
    {
        &[]
    }

    /// Filters of which at least one must hold. Empty for filters without boolean nesting.
    fn or_filters(&self) -> &[Self]
    where
        Self: Sized,
    {
        &[]
    }

    /// Add the constraints of this filter to `group`.
    fn collect_into(&self, group: &mut FilterGroup);
}

/// Build the filter tree of an optional root filter.
pub fn table_filter<F: InputFilter>(filter: Option<&F>) -> TableFilter {
    let mut table_filter = TableFilter::new(F::TABLE_NAME);
    if let Some(filter) = filter {
        filter.collect_into(&mut table_filter.filter_group);
    }
    table_filter
}

/// Collect the fields of `filter` into `group` under AND, the usual implementation of
/// `InputFilter::collect_into`.
pub fn collect_fields<F, C>(group: &mut FilterGroup, filter: &F, collect: C)
where
    F: InputFilter,
    C: FnOnce(&mut FilterGroup),
{
    group.collect_with(Combinator::And, |g| {
        and_filters(g, filter);
        or_filters(g, filter);
        collect(g);
    });
}

pub fn and_filters<F: InputFilter>(group: &mut FilterGroup, filter: &F) {
    nested(group, Combinator::And, filter.and_filters());
}

pub fn or_filters<F: InputFilter>(group: &mut FilterGroup, filter: &F) {
    nested(group, Combinator::Or, filter.or_filters());
}

fn nested<F: InputFilter>(group: &mut FilterGroup, combinator: Combinator, filters: &[F]) {
    if filters.is_empty() {
        return;
    }

    group.collect_with(combinator, |g| {
        for filter in filters {
            filter.collect_into(g);
        }
    });
}

fn op<T>(group: &mut FilterGroup, column: &str, operation: Operation, value: Option<&T>)
where
    T: Clone + Into<Param>,
{
    if let Some(value) = value {
        group.add_filter(ValueFilter::new(operation, column, value.clone()));
    }
}

pub fn eq<T: Clone + Into<Param>>(group: &mut FilterGroup, column: &str, value: Option<&T>) {
    op(group, column, Operation::Eq, value);
}

pub fn neq<T: Clone + Into<Param>>(group: &mut FilterGroup, column: &str, value: Option<&T>) {
    op(group, column, Operation::Neq, value);
}

pub fn lt<T: Clone + Into<Param>>(group: &mut FilterGroup, column: &str, value: Option<&T>) {
    op(group, column, Operation::Lt, value);
}

pub fn lte<T: Clone + Into<Param>>(group: &mut FilterGroup, column: &str, value: Option<&T>) {
    op(group, column, Operation::Lte, value);
}

pub fn gt<T: Clone + Into<Param>>(group: &mut FilterGroup, column: &str, value: Option<&T>) {
    op(group, column, Operation::Gt, value);
}

pub fn gte<T: Clone + Into<Param>>(group: &mut FilterGroup, column: &str, value: Option<&T>) {
    op(group, column, Operation::Gte, value);
}

pub fn is_in<T>(group: &mut FilterGroup, column: &str, values: Option<&Vec<T>>)
where
    Vec<T>: Clone + Into<Param>,
{
    op(group, column, Operation::In, values);
}

pub fn is_not_in<T>(group: &mut FilterGroup, column: &str, values: Option<&Vec<T>>)
where
    Vec<T>: Clone + Into<Param>,
{
    op(group, column, Operation::NotIn, values);
}

pub fn contains(group: &mut FilterGroup, column: &str, value: Option<&String>) {
    op(group, column, Operation::Contains, value);
}

/// `Some(true)` requires the column to be null, `Some(false)` requires it to be set.
pub fn is_null(group: &mut FilterGroup, column: &str, flag: Option<&bool>) {
    match flag {
        Some(true) => group.add_filter(ValueFilter::unary(Operation::IsNull, column)),
        Some(false) => group.add_filter(ValueFilter::unary(Operation::IsNotNull, column)),
        None => {}
    }
}

/// `Some(true)` requires the column to be set, `Some(false)` requires it to be null.
pub fn is_not_null(group: &mut FilterGroup, column: &str, flag: Option<&bool>) {
    is_null(group, column, flag.map(|set| !set).as_ref());
}

/// Require a related row reached through the foreign key `parent_column -> child_column`.
pub fn join_column<C: InputFilter>(
    group: &mut FilterGroup,
    child_filter: Option<&C>,
    parent_column: &str,
    child_column: &str,
) {
    if let Some(child_filter) = child_filter {
        let table_filter = table_filter(Some(child_filter));
        group.add_filter(JoinColumnFilter::new(
            table_filter,
            parent_column,
            child_column,
        ));
    }
}

/// Require a related row reached through the bridge table `join_table`.
pub fn join_table<C: InputFilter>(
    group: &mut FilterGroup,
    child_filter: Option<&C>,
    join_table: &str,
    join_table_parent_column: &str,
    join_table_child_column: &str,
    parent_join_column: &str,
    child_join_column: &str,
) {
    if let Some(child_filter) = child_filter {
        let table_filter = table_filter(Some(child_filter));
        group.add_filter(JoinTableFilter::new(
            table_filter,
            join_table,
            parent_join_column,
            join_table_parent_column,
            child_join_column,
            join_table_child_column,
        ));
    }
}
