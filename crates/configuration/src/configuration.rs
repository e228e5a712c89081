//! Configuration for the connector.

use schemars::{gen::SchemaSettings, schema::RootSchema};

use crate::environment::Environment;
use crate::error::MakeRuntimeConfigurationError;
use crate::values::{ConnectionUri, PoolSettings, Secret};
use crate::version1::ParsedConfiguration;

/// The 'Configuration' type collects all the information necessary to serve queries at runtime.
///
/// Values of this type are produced from a 'ParsedConfiguration' using
/// 'make_runtime_configuration'. Every secret has been resolved by then.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub connection_uri: String,
    pub pool_settings: PoolSettings,
}

/// The JSON schema of the configuration file.
pub fn generate_schema() -> RootSchema {
    SchemaSettings::draft07()
        .into_generator()
        .into_root_schema_for::<ParsedConfiguration>()
}

/// Turn a parsed configuration into a runtime configuration, resolving secrets from
/// `environment`.
pub fn make_runtime_configuration(
    parsed_config: ParsedConfiguration,
    environment: impl Environment,
) -> Result<Configuration, MakeRuntimeConfigurationError> {
    let connection_uri = match parsed_config.connection_uri {
        ConnectionUri(Secret::Plain(uri)) => Ok(uri),
        ConnectionUri(Secret::FromEnvironment { variable }) => {
            environment.read(&variable).map_err(|error| {
                MakeRuntimeConfigurationError::MissingEnvironmentVariable {
                    attribute: "connectionUri".to_string(),
                    message: error.to_string(),
                }
            })
        }
    }?;

    Ok(Configuration {
        connection_uri,
        pool_settings: parsed_config.pool_settings,
    })
}
