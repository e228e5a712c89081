//! The database pool and metrics shared by every request.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;
use tracing::{info_span, Instrument};

use query_engine_execution::metrics::{self, Metrics};
use sakila_configuration::Configuration;

#[derive(Debug, Clone)]
pub struct State {
    pub pool: PgPool,
    pub metrics: Metrics,
}

/// Connect to the configured database and register our metrics with `metrics_registry`.
///
/// Connecting happens eagerly, so an unreachable database is reported here rather than on the
/// first query.
pub async fn create_state(
    configuration: &Configuration,
    metrics_registry: &mut prometheus::Registry,
) -> Result<State, InitializationError> {
    let pool = connect(configuration)
        .instrument(info_span!("Create connection pool"))
        .await
        .map_err(InitializationError::UnableToCreatePool)?;

    let metrics = info_span!("Setup metrics").in_scope(|| {
        Metrics::initialize(metrics_registry).map_err(InitializationError::MetricsError)
    })?;
    metrics::update_pool_metrics(&pool, &metrics);

    Ok(State { pool, metrics })
}

async fn connect(configuration: &Configuration) -> Result<PgPool, sqlx::Error> {
    let settings = &configuration.pool_settings;
    tracing::debug!(?settings, "connecting");

    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout())
        .idle_timeout(settings.idle_timeout())
        .max_lifetime(settings.max_lifetime())
        .connect(&configuration.connection_uri)
        .await
}

#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("unable to connect to the database: {0}")]
    UnableToCreatePool(sqlx::Error),
    #[error("unable to register metrics: {0}")]
    MetricsError(query_engine_execution::error::Error),
}
