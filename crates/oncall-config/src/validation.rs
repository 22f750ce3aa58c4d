// SPDX-FileCopyrightText: 2026 Oncall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses, non-empty paths, and sane
//! reminder intervals.

use crate::diagnostic::ConfigError;
use crate::model::OncallConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &OncallConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate server.host is not empty
    if config.server.host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    }

    // Validate server.host looks like a valid IP or hostname
    if !config.server.host.trim().is_empty() {
        let addr = config.server.host.trim();
        let is_valid_ip = addr.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = addr
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{addr}` is not a valid IP address or hostname"),
            });
        }
    }

    // Validate log level is one of the tracing filter directives
    let level = config.server.log_level.trim().to_ascii_lowercase();
    if !matches!(
        level.as_str(),
        "trace" | "debug" | "info" | "warn" | "error" | "off"
    ) {
        errors.push(ConfigError::Validation {
            message: format!(
                "server.log_level `{}` is not one of trace, debug, info, warn, error, off",
                config.server.log_level
            ),
        });
    }

    // Validate database_path is not empty
    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    // Validate notify.from_email has an @ when email delivery is configured
    if config.notify.smtp_host.is_some() && !config.notify.from_email.contains('@') {
        errors.push(ConfigError::Validation {
            message: format!(
                "notify.from_email `{}` is not a valid email address",
                config.notify.from_email
            ),
        });
    }

    // Validate reminder interval is non-zero
    if config.notify.check_interval_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "notify.check_interval_secs must be at least 1".to_string(),
        });
    }

    // Validate slack webhook URL scheme
    if let Some(url) = &config.notify.slack_webhook_url
        && !url.starts_with("https://")
        && !url.starts_with("http://")
    {
        errors.push(ConfigError::Validation {
            message: format!("notify.slack_webhook_url `{url}` must be an http(s) URL"),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
