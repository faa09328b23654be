//! Runtime utilities
//!
//! This module is only used by the main binary and provides helper code
//! related to runtime configuration and logging setup.

mod config;
mod document_source;
mod logging;

use std::path::Path;

pub use config::{ClientEntry, Codegen, Config, TokenEntry, TokenStorage, TokenStorageMode};
pub use document_source::DocumentSource;
pub use logging::{LogRotation, Logging};

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Separator to use when drilling down into nested options in the env figment
const ENV_NESTED_SEPARATOR: &str = "__";

/// Prefix for environment variables that override config file values
const ENV_PREFIX: &str = "GQL_BINDER_";

/// Read configuration from environment variables only (when no config file is provided)
#[allow(clippy::result_large_err)]
pub fn read_config_from_env() -> Result<Config, figment::Error> {
    Figment::new()
        .join(Env::prefixed(ENV_PREFIX).split(ENV_NESTED_SEPARATOR))
        .extract()
}

/// Read in a config from a YAML file, filling in any missing values from the environment
#[allow(clippy::result_large_err)]
pub fn read_config(yaml_path: impl AsRef<Path>) -> Result<Config, figment::Error> {
    Figment::new()
        .join(Env::prefixed(ENV_PREFIX).split(ENV_NESTED_SEPARATOR))
        .join(Yaml::file(yaml_path))
        .extract()
}

/// Sets up either file logging or stderr logging depending on provided configuration options
pub fn setup_logging(logging: &Logging) -> Result<Option<WorkerGuard>, anyhow::Error> {
    let env_filter = EnvFilter::from_default_env().add_directive(logging.level.into());

    if let Some(path) = &logging.path {
        setup_file_logging(path, env_filter, logging)
    } else {
        setup_stderr_logging(env_filter)
    }
}

/// Sets up rolling file appender logging but falls back to stderr logging on failure
fn setup_file_logging(
    log_path: &Path,
    env_filter: EnvFilter,
    logging: &Logging,
) -> Result<Option<WorkerGuard>, anyhow::Error> {
    if std::fs::create_dir_all(log_path).is_err() {
        eprintln!("Could not build log path - falling back to stderr");
        return setup_stderr_logging(env_filter);
    }

    let (non_blocking_writer, guard) = match tracing_appender::rolling::RollingFileAppender::builder()
        .rotation(logging.rotation.into())
        .filename_prefix("gql_binder")
        .filename_suffix("log")
        .build(log_path)
    {
        Ok(appender) => tracing_appender::non_blocking(appender),
        Err(_error) => {
            eprintln!("Log file setup failed - falling back to stderr");
            return setup_stderr_logging(env_filter);
        }
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_writer)
                .with_ansi(false)
                .with_target(false),
        )
        .init();

    Ok(Some(guard))
}

/// Sets up stderr logging
fn setup_stderr_logging(env_filter: EnvFilter) -> Result<Option<WorkerGuard>, anyhow::Error> {
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .with_target(false),
        )
        .init();

    Ok(None)
}
