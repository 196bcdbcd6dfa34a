//! Tracing bootstrap shared by the fiado binaries.
//!
//! An explicit `RUST_LOG` always wins; otherwise the `FIADO_LOG_LEVEL` value
//! carried in [`TelemetryConfig`] seeds the filter. Output is compact
//! single-line text without ANSI escapes so service logs stay readable under
//! process supervisors and in captured CI output.

use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    Filter { directive: String, source: ParseError },
    Init(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::Filter { directive, .. } => {
                write!(f, "invalid log filter directive '{directive}'")
            }
            TelemetryError::Init(err) => write!(f, "failed to install subscriber: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::Filter { source, .. } => Some(source),
            TelemetryError::Init(err) => Some(&**err),
        }
    }
}

/// Builds the filter from the configured level alone. `init` layers the
/// `RUST_LOG` escape hatch on top.
fn filter_for(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&config.log_level).map_err(|source| TelemetryError::Filter {
        directive: config.log_level.clone(),
        source,
    })
}

pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| filter_for(config))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Init)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_and_directives_build_a_filter() {
        for level in ["trace", "debug", "info", "warn", "error", "fiado=debug,info"] {
            let config = TelemetryConfig {
                log_level: level.to_string(),
            };
            assert!(filter_for(&config).is_ok(), "{level} should parse");
        }
    }

    #[test]
    fn malformed_directives_are_rejected_with_the_offending_value() {
        let config = TelemetryConfig {
            log_level: "fiado=notalevel".to_string(),
        };
        match filter_for(&config) {
            Err(TelemetryError::Filter { directive, .. }) => {
                assert_eq!(directive, "fiado=notalevel");
            }
            other => panic!("expected a filter error, got {other:?}"),
        }
    }
}
