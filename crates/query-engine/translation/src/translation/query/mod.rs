//! Translate an entity filter and a field selection.

pub mod fields;
pub mod filtering;

use query_engine_sql::sql;

use super::error::Error;
use fields::TypeInfo;
use filtering::InputFilter;

/// Translate a filter over `F::TABLE_NAME` and the requested fields of `T` into an
/// ExecutionPlan (SQL) to be run against the database.
///
/// With a `joined_table`, only the rows related to its parent row are returned.
pub fn translate<T, F, S>(
    fields: &[S],
    filter: Option<&F>,
    joined_table: Option<sql::ast::JoinedTable>,
) -> Result<sql::execution_plan::ExecutionPlan, Error>
where
    T: TypeInfo,
    F: InputFilter,
    S: AsRef<str>,
{
    let columns = fields::extract_columns::<T, S>(fields)?;
    let table_filter = filtering::table_filter(filter);

    tracing::debug!(
        table = F::TABLE_NAME,
        ?columns,
        joined = joined_table.is_some(),
        "translating request"
    );

    let select = match joined_table {
        None => sql::helpers::simple_select(&columns, table_filter),
        Some(joined_table) => sql::helpers::joined_select(&columns, table_filter, joined_table),
    };

    Ok(sql::execution_plan::simple_exec_plan(select))
}
