//! Prometheus counters for requests and gauges mirroring the connection pool.

use std::time::Duration;

use prometheus::core::Collector;
use prometheus::{Gauge, IntCounter, IntGauge, Opts, Registry};

use crate::error::Error;

const PREFIX: &str = "sakila";

#[derive(Debug, Clone)]
pub struct Metrics {
    pub query_total: IntCounter,
    pub explain_total: IntCounter,
    pub translation_errors_total: IntCounter,
    pub pool: PoolMetrics,
}

/// What the pool reports about itself. Refreshed before every query.
#[derive(Debug, Clone)]
pub struct PoolMetrics {
    pub size: IntGauge,
    pub idle: IntGauge,
    pub active: IntGauge,
    pub max_connections: IntGauge,
    pub min_connections: IntGauge,
    pub acquire_timeout: Gauge,
    pub idle_timeout: Gauge,
    pub max_lifetime: Gauge,
}

impl Metrics {
    /// Create every metric and register it with `registry`.
    ///
    /// Registering twice with the same registry fails, as the names clash.
    pub fn initialize(registry: &mut Registry) -> Result<Self, Error> {
        Ok(Self {
            query_total: register(
                registry,
                IntCounter::with_opts(opts("query_total", "Total successful queries."))?,
            )?,
            explain_total: register(
                registry,
                IntCounter::with_opts(opts("explain_total", "Total successful explains."))?,
            )?,
            translation_errors_total: register(
                registry,
                IntCounter::with_opts(opts(
                    "translation_errors_total",
                    "Total requests rejected while translating them to SQL.",
                ))?,
            )?,
            pool: PoolMetrics::initialize(registry)?,
        })
    }
}

impl PoolMetrics {
    fn initialize(registry: &mut Registry) -> Result<Self, Error> {
        let int_gauge = |registry: &mut Registry, name: &str, help: &str| -> Result<_, Error> {
            register(registry, IntGauge::with_opts(opts(name, help))?)
        };
        let seconds_gauge =
            |registry: &mut Registry, name: &str, help: &str| -> Result<_, Error> {
                register(registry, Gauge::with_opts(opts(name, help))?)
            };

        Ok(Self {
            size: int_gauge(registry, "pool_size", "Open connections, idle or in use.")?,
            idle: int_gauge(registry, "pool_idle", "Open connections not in use.")?,
            active: int_gauge(registry, "pool_active", "Open connections in use.")?,
            max_connections: int_gauge(
                registry,
                "pool_max_connections",
                "The most connections the pool will open.",
            )?,
            min_connections: int_gauge(
                registry,
                "pool_min_connections",
                "The fewest connections the pool keeps open.",
            )?,
            acquire_timeout: seconds_gauge(
                registry,
                "pool_acquire_timeout",
                "How long to wait for a connection, in seconds.",
            )?,
            idle_timeout: seconds_gauge(
                registry,
                "pool_idle_timeout",
                "How long a connection may sit idle, in seconds. Zero when unbounded.",
            )?,
            max_lifetime: seconds_gauge(
                registry,
                "pool_max_lifetime",
                "How long a connection may live, in seconds. Zero when unbounded.",
            )?,
        })
    }

    fn update(&self, pool: &sqlx::PgPool) {
        let size = i64::from(pool.size());
        let idle = i64::try_from(pool.num_idle()).unwrap_or(i64::MAX);
        self.size.set(size);
        self.idle.set(idle);
        self.active.set(size - idle);

        let options = pool.options();
        self.max_connections
            .set(i64::from(options.get_max_connections()));
        self.min_connections
            .set(i64::from(options.get_min_connections()));
        self.acquire_timeout
            .set(options.get_acquire_timeout().as_secs_f64());
        self.idle_timeout.set(seconds(options.get_idle_timeout()));
        self.max_lifetime.set(seconds(options.get_max_lifetime()));
    }
}

/// Refresh the pool gauges from the pool's current state.
pub fn update_pool_metrics(pool: &sqlx::PgPool, metrics: &Metrics) {
    metrics.pool.update(pool);
}

fn opts(name: &str, help: &str) -> Opts {
    Opts::new(name, help).namespace(PREFIX)
}

fn register<M>(registry: &mut Registry, metric: M) -> Result<M, Error>
where
    M: Collector + Clone + 'static,
{
    registry.register(Box::new(metric.clone()))?;
    Ok(metric)
}

fn seconds(duration: Option<Duration>) -> f64 {
    duration.unwrap_or(Duration::ZERO).as_secs_f64()
}
