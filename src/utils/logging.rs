//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the QuestionDesk application.

use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use crate::config::LoggingConfig;
use crate::utils::errors::{QuestionDeskError, Result};

/// Initialize logging based on configuration.
///
/// The returned guard flushes the rolling file writer and must be held for
/// the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| QuestionDeskError::Config(format!("Invalid log filter {}: {}", config.level, e)))?;

    let (file_layer, guard) = match config.file_path.as_deref() {
        Some(directory) if !directory.is_empty() => {
            let file_appender = tracing_appender::rolling::daily(directory, "question-desk.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer().with_ansi(false).with_writer(non_blocking);
            (Some(layer), Some(guard))
        }
        _ => (None, None),
    };

    let json_layer = config.json.then(|| fmt::layer().json().with_writer(std::io::stdout));
    let text_layer = (!config.json).then(|| fmt::layer().with_writer(std::io::stdout));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| QuestionDeskError::Config(format!("Logging already initialized: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log admin actions
pub fn log_admin_action(admin_id: i64, action: &str, target: Option<&str>, details: Option<&str>) {
    warn!(
        admin_id = admin_id,
        action = action,
        target = target,
        details = details,
        "Admin action performed"
    );
}

/// Log a submitted answer report
pub fn log_flag_report(answer_id: i64, reporter_id: i64, recipients: usize) {
    info!(
        answer_id = answer_id,
        reporter_id = reporter_id,
        recipients = recipients,
        "Answer report submitted"
    );
}

/// Log the outcome of a mail delivery attempt
pub fn log_mail_delivery(recipient: &str, template: &str, failure: Option<&str>) {
    match failure {
        None => debug!(recipient = recipient, template = template, "Email delivered"),
        Some(reason) => error!(
            recipient = recipient,
            template = template,
            error = reason,
            "Email delivery failed"
        ),
    }
}

/// Log a completed HTTP request
pub fn log_request(method: &str, path: &str, status: u16, duration_ms: u64) {
    if status >= 500 {
        error!(method = method, path = path, status = status, duration_ms = duration_ms, "Request failed");
    } else {
        info!(method = method, path = path, status = status, duration_ms = duration_ms, "Request completed");
    }
}

/// Log database operations
pub fn log_database_operation(operation: &str, table: &str, duration_ms: u64, success: bool) {
    if success {
        debug!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Database operation completed"
        );
    } else {
        error!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Database operation failed"
        );
    }
}
