use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How the connection pool to the Sakila database behaves. Times are in seconds.
///
/// Every setting may be left out, in which case it takes its default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PoolSettings {
    /// The most connections the pool will open at once.
    pub max_connections: u32,
    /// How long to wait for a free connection before giving up.
    pub pool_timeout: u64,
    /// How long a connection may sit idle before it is closed. Unbounded when `null`.
    pub idle_timeout: Option<u64>,
    /// How long a connection may live before it is replaced. Unbounded when `null`.
    pub connection_lifetime: Option<u64>,
}

impl PoolSettings {
    pub fn is_default(&self) -> bool {
        *self == PoolSettings::default()
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.pool_timeout)
    }

    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout.map(Duration::from_secs)
    }

    pub fn max_lifetime(&self) -> Option<Duration> {
        self.connection_lifetime.map(Duration::from_secs)
    }
}

impl Default for PoolSettings {
    fn default() -> PoolSettings {
        PoolSettings {
            max_connections: 50,
            pool_timeout: 600,
            idle_timeout: Some(180),
            connection_lifetime: Some(600),
        }
    }
}
