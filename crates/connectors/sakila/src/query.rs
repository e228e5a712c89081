//! Plan, run and explain filtered queries.

use std::collections::BTreeMap;

use sqlx::postgres::PgRow;
use sqlx::FromRow;
use tracing::{info_span, Instrument};

use query_engine_execution as execution;
use query_engine_sql::sql::ast::JoinedTable;
use query_engine_sql::sql::execution_plan::ExecutionPlan;
use query_engine_translation::translation;
use query_engine_translation::translation::query::fields::TypeInfo;
use query_engine_translation::translation::query::filtering::InputFilter;

use crate::error::QueryError;
use crate::state::State;

/// Translate a request into an execution plan without touching the database.
pub fn plan<T, F, S>(
    fields: &[S],
    filter: Option<&F>,
    joined_table: Option<JoinedTable>,
) -> Result<ExecutionPlan, QueryError>
where
    T: TypeInfo,
    F: InputFilter,
    S: AsRef<str>,
{
    translation::query::translate::<T, F, S>(fields, filter, joined_table).map_err(|err| {
        tracing::error!("{}", err);
        QueryError::InvalidRequest(err)
    })
}

/// Execute a query, returning the selected rows of `T`.
pub async fn query<T, F, S>(
    state: &State,
    fields: &[S],
    filter: Option<&F>,
    joined_table: Option<JoinedTable>,
) -> Result<Vec<T>, QueryError>
where
    T: TypeInfo + for<'r> FromRow<'r, PgRow>,
    F: InputFilter,
    S: AsRef<str>,
{
    // Compile the query.
    let plan = async { plan::<T, F, S>(fields, filter, joined_table) }
        .instrument(info_span!("Plan query"))
        .await
        .inspect_err(|_| state.metrics.translation_errors_total.inc())?;

    // Execute the query.
    let result = execution::query::execute::<T>(&state.pool, &state.metrics, plan)
        .instrument(info_span!("Execute query"))
        .await
        .map_err(|err| {
            tracing::error!("{}", err);
            QueryError::Execution(err)
        })?;

    // assuming query succeeded, increment counter
    state.metrics.query_total.inc();

    Ok(result)
}

/// Explain a query by creating an execution plan and asking the database how it would run it.
pub async fn explain<T, F, S>(
    state: &State,
    fields: &[S],
    filter: Option<&F>,
    joined_table: Option<JoinedTable>,
) -> Result<BTreeMap<String, String>, QueryError>
where
    T: TypeInfo,
    F: InputFilter,
    S: AsRef<str>,
{
    // Compile the query.
    let plan = async { plan::<T, F, S>(fields, filter, joined_table) }
        .instrument(info_span!("Plan query"))
        .await
        .inspect_err(|_| state.metrics.translation_errors_total.inc())?;

    // Execute an explain query.
    let (query, plan) = execution::query::explain(&state.pool, plan)
        .instrument(info_span!("Explain query"))
        .await
        .map_err(|err| {
            tracing::error!("{}", err);
            QueryError::Execution(err)
        })?;

    // assuming explain succeeded, increment counter
    state.metrics.explain_total.inc();

    Ok(BTreeMap::from_iter([
        ("SQL Query".into(), query),
        ("Execution Plan".into(), plan),
    ]))
}
