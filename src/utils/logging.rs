//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging helpers
//! for the invite workflow.

use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use crate::config::LoggingConfig;
use crate::utils::errors::{ErrorSeverity, Result, TrackerError};

/// Initialize logging based on configuration
///
/// The returned guard flushes the file writer on drop and must be held for the
/// lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| TrackerError::Config(format!("Invalid log filter {}: {}", config.level, e)))?;

    let (file_layer, guard) = match &config.file_path {
        Some(directory) => {
            let file_appender = tracing_appender::rolling::daily(directory, "meeplelog.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(non_blocking);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(file_layer)
        .try_init()
        .map_err(|e| TrackerError::Config(format!("Logging already initialized: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log group lifecycle events
pub fn log_group_event(group_id: Uuid, event: &str, user_id: Option<Uuid>, details: Option<&str>) {
    info!(
        group_id = %group_id,
        event = event,
        user_id = user_id.map(|id| id.to_string()),
        details = details,
        "Group event occurred"
    );
}

/// Log invite verification outcomes
pub fn log_invite_event(join_code: &str, outcome: &str, group_id: Option<Uuid>) {
    if outcome == "verified" {
        debug!(
            join_code = join_code,
            outcome = outcome,
            group_id = group_id.map(|id| id.to_string()),
            "Invite check completed"
        );
    } else {
        warn!(
            join_code = join_code,
            outcome = outcome,
            group_id = group_id.map(|id| id.to_string()),
            "Invite check rejected"
        );
    }
}

/// Log store operations
pub fn log_store_operation(operation: &str, table: &str, duration_ms: u64, success: bool) {
    if success {
        debug!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Store operation completed"
        );
    } else {
        error!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Store operation failed"
        );
    }
}

/// Log a failed service call at the level its severity calls for
pub fn log_service_error(operation: &str, error: &TrackerError) {
    match error.severity() {
        ErrorSeverity::Info => info!(
            operation = operation,
            code = error.code(),
            recoverable = error.is_recoverable(),
            error = %error,
            "Service call rejected"
        ),
        ErrorSeverity::Warning => warn!(
            operation = operation,
            code = error.code(),
            recoverable = error.is_recoverable(),
            error = %error,
            "Service call rejected"
        ),
        ErrorSeverity::Error | ErrorSeverity::Critical => error!(
            operation = operation,
            code = error.code(),
            recoverable = error.is_recoverable(),
            error = %error,
            "Service call failed"
        ),
    }
}
