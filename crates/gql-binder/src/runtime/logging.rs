//! Logging config
//!
//! This module is only used by the main binary and provides logging config
//! structures.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use tracing::Level;
use tracing_appender::rolling::Rotation;

/// Logging related options
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Logging {
    /// The log level to use for tracing
    #[serde(deserialize_with = "parse_level")]
    #[schemars(schema_with = "level_schema")]
    pub level: Level,

    /// The output path to use for logging; stderr when unset
    pub path: Option<PathBuf>,

    /// Log file rotation period to use when a log file path is provided
    /// [default: Hourly]
    pub rotation: LogRotation,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            path: None,
            rotation: LogRotation::Hourly,
        }
    }
}

fn parse_level<'de, D>(deserializer: D) -> Result<Level, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    value.parse().map_err(serde::de::Error::custom)
}

/// Log file rotation period
#[derive(Debug, Clone, Copy, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Minutely,
    #[default]
    Hourly,
    Daily,
    Never,
}

impl From<LogRotation> for Rotation {
    fn from(value: LogRotation) -> Self {
        match value {
            LogRotation::Minutely => Rotation::MINUTELY,
            LogRotation::Hourly => Rotation::HOURLY,
            LogRotation::Daily => Rotation::DAILY,
            LogRotation::Never => Rotation::NEVER,
        }
    }
}

fn level_schema(generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
    /// Log level
    #[derive(JsonSchema)]
    #[schemars(rename_all = "lowercase")]
    // This is just an intermediate type to auto create schema information for,
    // so it is OK if it is never used
    #[allow(dead_code)]
    enum Level {
        Trace,
        Debug,
        Info,
        Warn,
        Error,
    }

    Level::json_schema(generator)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn it_defaults_to_info_on_stderr() {
        let logging = Logging::default();
        assert_eq!(logging.level, Level::INFO);
        assert!(logging.path.is_none());
    }

    #[test]
    fn it_parses_a_string_level() {
        let logging: Logging = serde_json::from_str(r#"{"level": "debug"}"#).unwrap();
        assert_eq!(logging.level, Level::DEBUG);
    }

    #[rstest]
    #[case(LogRotation::Minutely, Rotation::MINUTELY)]
    #[case(LogRotation::Hourly, Rotation::HOURLY)]
    #[case(LogRotation::Daily, Rotation::DAILY)]
    #[case(LogRotation::Never, Rotation::NEVER)]
    fn it_maps_to_rotation_correctly(#[case] rotation: LogRotation, #[case] expected: Rotation) {
        let actual: Rotation = rotation.into();
        assert_eq!(expected, actual);
    }
}
