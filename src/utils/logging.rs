//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the PartyBoard application.

use tracing::{info, error, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::{PartyBoardError, Result};

/// Initialize logging based on configuration
///
/// The returned guard must be held for as long as file logging is needed.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| PartyBoardError::Config(format!("Invalid log filter '{}': {}", config.level, e)))?;

    let (file_layer, guard) = match &config.file_path {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "partyboard.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|e| PartyBoardError::Config(format!("Logging already initialized: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a query run through the event engine
pub fn log_query_applied(total: usize, matched: usize, sort_key: Option<&str>) {
    debug!(
        total = total,
        matched = matched,
        sort_key = sort_key,
        "Event query applied"
    );
}

/// Log an outgoing API request
pub fn log_api_request(method: &str, path: &str) {
    debug!(method = method, path = path, "API request");
}

/// Log API errors with context
pub fn log_api_error(api: &str, error: &str, context: Option<&str>) {
    error!(
        api = api,
        error = error,
        context = context,
        "API error occurred"
    );
}

/// Log an export or share action
pub fn log_export(kind: &str, event_count: usize) {
    info!(kind = kind, event_count = event_count, "Events exported");
}
