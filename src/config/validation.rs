//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use url::Url;
use crate::utils::errors::{QuestionDeskError, Result};
use super::{MailBackend, Settings};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_auth_config(&settings.auth)?;
    validate_mail_config(&settings.mail)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    let base = Url::parse(&config.public_base_url).map_err(|e| {
        QuestionDeskError::Config(format!("Public base URL is invalid: {}", e))
    })?;

    if base.cannot_be_a_base() {
        return Err(QuestionDeskError::Config(
            "Public base URL must be an absolute http(s) URL".to_string()
        ));
    }

    for (name, prefix) in [("URL prefix", &config.url_prefix), ("Club prefix", &config.club_prefix)] {
        if !prefix.starts_with('/') || (prefix.len() > 1 && prefix.ends_with('/')) {
            return Err(QuestionDeskError::Config(
                format!("{} must start with '/' and must not end with '/': {}", name, prefix)
            ));
        }
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(QuestionDeskError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(QuestionDeskError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(QuestionDeskError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate session configuration
fn validate_auth_config(config: &super::AuthConfig) -> Result<()> {
    if config.jwt_secret.is_empty() {
        return Err(QuestionDeskError::Config(
            "JWT secret is required".to_string()
        ));
    }

    if config.administrator_role.is_empty() {
        return Err(QuestionDeskError::Config(
            "Administrator role name is required".to_string()
        ));
    }

    Ok(())
}

/// Validate mail configuration
fn validate_mail_config(config: &super::MailConfig) -> Result<()> {
    if config.queue_capacity == 0 {
        return Err(QuestionDeskError::Config(
            "Mail queue capacity must be greater than 0".to_string()
        ));
    }

    if config.sender.is_empty() {
        return Err(QuestionDeskError::Config(
            "Mail sender address is required".to_string()
        ));
    }

    if config.backend == MailBackend::Http {
        Url::parse(&config.api_url).map_err(|e| {
            QuestionDeskError::Config(format!("Mail API URL is invalid: {}", e))
        })?;

        if config.timeout_seconds == 0 {
            return Err(QuestionDeskError::Config(
                "Mail timeout must be greater than 0".to_string()
            ));
        }
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(QuestionDeskError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    let base_level = config.level.split(',').next().unwrap_or_default();
    if !valid_levels.contains(&base_level) && !base_level.contains('=') {
        return Err(QuestionDeskError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
