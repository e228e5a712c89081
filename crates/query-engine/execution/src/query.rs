//! Execute an execution plan against the database.

use sqlx::postgres::{PgArguments, PgRow};
use sqlx::{FromRow, Postgres, Row};

use query_engine_sql::sql;
use query_engine_sql::sql::string::Param;

use crate::error::Error;
use crate::metrics;

/// Execute a query against postgres and decode every returned row as `T`.
pub async fn execute<T>(
    pool: &sqlx::PgPool,
    metrics: &metrics::Metrics,
    plan: sql::execution_plan::ExecutionPlan,
) -> Result<Vec<T>, Error>
where
    T: for<'r> FromRow<'r, PgRow>,
{
    let query = plan.query_sql();

    tracing::info!(
        generated_sql = %query.sql,
        params = ?&query.params,
        root_table = %plan.root_table,
    );

    metrics::update_pool_metrics(pool, metrics);

    // run and fetch from the database
    let rows: Vec<PgRow> = build_query_with_params(&query).fetch_all(pool).await?;

    let result = rows
        .iter()
        .map(T::from_row)
        .collect::<Result<Vec<T>, sqlx::Error>>()?;

    tracing::debug!(rows = result.len(), root_table = %plan.root_table, "fetched rows");

    Ok(result)
}

/// Convert a query to an EXPLAIN query and execute it against postgres.
///
/// Returns the pretty-printed query and the plan postgres chose for it.
pub async fn explain(
    pool: &sqlx::PgPool,
    plan: sql::execution_plan::ExecutionPlan,
) -> Result<(String, String), Error> {
    let query = plan.explain_query_sql();

    tracing::info!(
        generated_sql = %query.sql,
        params = ?&query.params,
    );

    // run and fetch from the database
    let rows: Vec<PgRow> = build_query_with_params(&query).fetch_all(pool).await?;

    let mut results: Vec<String> = vec![];
    for row in &rows {
        results.push(row.try_get(0)?);
    }

    let pretty = pretty_print(explained_statement(&query.sql));

    Ok((pretty, results.join("\n")))
}

// the statement an EXPLAIN was rendered for
fn explained_statement(explain: &str) -> &str {
    explain.strip_prefix("EXPLAIN ").unwrap_or(explain)
}

/// Format a SQL statement for display.
pub fn pretty_print(sql: &str) -> String {
    sqlformat::format(
        sql,
        &sqlformat::QueryParams::None,
        sqlformat::FormatOptions::default(),
    )
}

/// Create a SQLx query based on our SQL query and bind our parameters to it.
///
/// `params[i - 1]` is bound to the placeholder `$i`.
pub fn build_query_with_params(
    query: &sql::string::SQL,
) -> sqlx::query::Query<'_, Postgres, PgArguments> {
    let sqlx_query = sqlx::query(query.sql.as_str());

    query
        .params
        .iter()
        .fold(sqlx_query, |sqlx_query, param| match param {
            Param::String(s) => sqlx_query.bind(s),
            Param::Bool(b) => sqlx_query.bind(*b),
            Param::Int2(n) => sqlx_query.bind(*n),
            Param::Int4(n) => sqlx_query.bind(*n),
            Param::Int8(n) => sqlx_query.bind(*n),
            Param::Float8(n) => sqlx_query.bind(*n),
            Param::StringArray(values) => sqlx_query.bind(values),
            Param::Int2Array(values) => sqlx_query.bind(values),
            Param::Int4Array(values) => sqlx_query.bind(values),
            Param::Int8Array(values) => sqlx_query.bind(values),
        })
}
