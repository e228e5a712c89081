//! The first version of the configuration file format.

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::configuration::generate_schema;
use crate::error::{ParseConfigurationError, WriteParsedConfigurationError};
use crate::values::{ConnectionUri, PoolSettings, Secret};

const CURRENT_VERSION: u32 = 1;
pub const CONFIGURATION_FILENAME: &str = "configuration.json";
pub const CONFIGURATION_JSONSCHEMA_FILENAME: &str = "schema.json";
pub const DEFAULT_CONNECTION_URI_VARIABLE: &str = "SAKILA_DATABASE_URL";

/// The configuration as it is stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParsedConfiguration {
    pub version: u32,
    pub connection_uri: ConnectionUri,
    #[serde(skip_serializing_if = "PoolSettings::is_default")]
    #[serde(default)]
    pub pool_settings: PoolSettings,
}

impl ParsedConfiguration {
    /// The configuration written for a fresh context directory. The connection string is
    /// read from `SAKILA_DATABASE_URL`.
    pub fn initial() -> Self {
        Self {
            version: CURRENT_VERSION,
            connection_uri: ConnectionUri(Secret::FromEnvironment {
                variable: DEFAULT_CONNECTION_URI_VARIABLE.into(),
            }),
            pool_settings: PoolSettings::default(),
        }
    }
}

/// Only the version is read before we commit to a format.
#[derive(Deserialize)]
struct VersionTag {
    version: u32,
}

/// Read `configuration.json` from a directory.
///
/// The version is checked before the rest of the file, so a file in a newer format is
/// reported as such rather than as a parse error.
pub async fn parse_configuration(
    configuration_dir: impl AsRef<Path>,
) -> Result<ParsedConfiguration, ParseConfigurationError> {
    let file_path = configuration_dir.as_ref().join(CONFIGURATION_FILENAME);

    let contents = fs::read_to_string(&file_path).await.map_err(|error| {
        ParseConfigurationError::IoErrorButStringified(format!("{}: {error}", file_path.display()))
    })?;
    let parse_error = |error: serde_json::Error| ParseConfigurationError::ParseError {
        file_path: file_path.clone(),
        line: error.line(),
        column: error.column(),
        message: error.to_string(),
    };

    let VersionTag { version } = serde_json::from_str(&contents).map_err(parse_error)?;
    if version != CURRENT_VERSION {
        return Err(ParseConfigurationError::UnsupportedVersion(version));
    }
    let parsed: ParsedConfiguration = serde_json::from_str(&contents).map_err(parse_error)?;

    tracing::debug!(file = %file_path.display(), "parsed configuration");
    Ok(parsed)
}

/// Write a configuration into a directory, creating it if needed, along with the JSON schema
/// that editors can validate it against.
pub async fn write_parsed_configuration(
    parsed_config: ParsedConfiguration,
    out_dir: impl AsRef<Path>,
) -> Result<(), WriteParsedConfigurationError> {
    let out_dir = out_dir.as_ref();
    fs::create_dir_all(out_dir).await?;

    let files = [
        (
            CONFIGURATION_FILENAME,
            serde_json::to_string_pretty(&parsed_config)?,
        ),
        (
            CONFIGURATION_JSONSCHEMA_FILENAME,
            serde_json::to_string_pretty(&generate_schema())?,
        ),
    ];
    for (name, mut contents) in files {
        contents.push('\n');
        fs::write(out_dir.join(name), contents).await?;
    }

    tracing::debug!(dir = %out_dir.display(), "wrote configuration");
    Ok(())
}
