//! Global `tracing` subscriber setup.
//!
//! JSON lines for containers, pretty output for development.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::{TelemetryConfig, TelemetryError};

/// Level used when the configured filter does not parse.
const FALLBACK_LEVEL: &str = "info";

/// Install the global subscriber. Fails only if one is already installed;
/// an unparsable filter falls back to `info` and is reported once logging is up.
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let (env_filter, rejected) = build_filter(config);

    let fmt_layer = if !config.console_output {
        None
    } else if config.json_logs {
        Some(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .boxed(),
        )
    } else {
        Some(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_ansi(true)
                .boxed(),
        )
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "Logging initialized"
    );

    if let Some(error) = rejected {
        tracing::warn!(
            directive = %config.log_level,
            fallback = FALLBACK_LEVEL,
            %error,
            "Rejected log filter"
        );
    }

    Ok(())
}

fn build_filter(config: &TelemetryConfig) -> (EnvFilter, Option<TelemetryError>) {
    match EnvFilter::try_new(&config.log_level) {
        Ok(filter) => (filter, None),
        Err(e) => (
            EnvFilter::new(FALLBACK_LEVEL),
            Some(TelemetryError::Filter(e.to_string())),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_accepts_directives() {
        let config = TelemetryConfig {
            log_level: "info,restaurant_service=debug".to_string(),
            ..TelemetryConfig::default()
        };
        let (_, rejected) = build_filter(&config);
        assert!(rejected.is_none());
    }

    #[test]
    fn test_filter_falls_back_on_garbage() {
        let config = TelemetryConfig {
            log_level: "restaurant_service=verbose".to_string(),
            ..TelemetryConfig::default()
        };
        let (filter, rejected) = build_filter(&config);
        assert!(matches!(rejected, Some(TelemetryError::Filter(_))));
        assert!(filter.to_string().eq_ignore_ascii_case(FALLBACK_LEVEL));
    }

    // The only test in this crate that installs the global subscriber.
    #[test]
    fn test_init_survives_bad_filter() {
        let config = TelemetryConfig {
            log_level: "restaurant_service=verbose".to_string(),
            console_output: false,
            ..TelemetryConfig::default()
        };
        assert!(init_logging(&config).is_ok());
        assert!(matches!(
            init_logging(&config),
            Err(TelemetryError::SubscriberInit(_))
        ));
    }
}
