//! Error handling for QuestionDesk
//!
//! This module defines the main error type used throughout the application
//! and maps each failure onto the HTTP status it surfaces as.

use hyper::StatusCode;
use thiserror::Error;

/// Main error type for QuestionDesk
#[derive(Error, Debug)]
pub enum QuestionDeskError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Question not found: {question_id}")]
    QuestionNotFound { question_id: i64 },

    #[error("Answer not found: {answer_id}")]
    AnswerNotFound { answer_id: i64 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Mail queue unavailable: {0}")]
    QueueUnavailable(String),

    #[error("Mail delivery failed: {0}")]
    MailDelivery(String),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Session token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias for QuestionDesk operations
pub type Result<T> = std::result::Result<T, QuestionDeskError>;

impl QuestionDeskError {
    /// HTTP status the error is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            QuestionDeskError::QuestionNotFound { .. } | QuestionDeskError::AnswerNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            QuestionDeskError::Authentication(_) | QuestionDeskError::Token(_) => StatusCode::UNAUTHORIZED,
            QuestionDeskError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            QuestionDeskError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            QuestionDeskError::QueueUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the caller. Internal failures are not described.
    pub fn public_message(&self) -> String {
        match self.status_code() {
            StatusCode::INTERNAL_SERVER_ERROR => "Internal server error".to_string(),
            StatusCode::UNAUTHORIZED => "Login required".to_string(),
            _ => self.to_string(),
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            QuestionDeskError::Database(_) => ErrorSeverity::Critical,
            QuestionDeskError::Migration(_) => ErrorSeverity::Critical,
            QuestionDeskError::Config(_) => ErrorSeverity::Critical,
            QuestionDeskError::PermissionDenied(_) => ErrorSeverity::Warning,
            QuestionDeskError::Authentication(_) => ErrorSeverity::Warning,
            QuestionDeskError::Token(_) => ErrorSeverity::Warning,
            QuestionDeskError::QueueUnavailable(_) => ErrorSeverity::Warning,
            QuestionDeskError::QuestionNotFound { .. } => ErrorSeverity::Info,
            QuestionDeskError::AnswerNotFound { .. } => ErrorSeverity::Info,
            QuestionDeskError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
