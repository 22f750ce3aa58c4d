// SPDX-FileCopyrightText: 2026 Oncall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the oncall scheduler.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level oncall configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OncallConfig {
    /// HTTP gateway settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// SQLite storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Demo-data seed settings.
    #[serde(default)]
    pub seed: SeedConfig,

    /// Upcoming-rotation reminder delivery settings.
    #[serde(default)]
    pub notify: NotifyConfig,
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging level filter (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

/// SQLite storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("oncall").join("oncall.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("oncall.db"))
        .to_string_lossy()
        .into_owned()
}

/// Demo-data seed configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SeedConfig {
    /// Run the idempotent demo seed when the server starts. The seed is a
    /// no-op once any people exist.
    #[serde(default)]
    pub on_startup: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { on_startup: false }
    }
}

/// Reminder delivery configuration.
///
/// Each channel is disabled until its required fields are set; a fully
/// unset section turns the reminder loop into a no-op.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NotifyConfig {
    /// Slack incoming-webhook URL. `None` disables Slack delivery.
    #[serde(default)]
    pub slack_webhook_url: Option<String>,

    /// SMTP server hostname. `None` disables email delivery.
    #[serde(default)]
    pub smtp_host: Option<String>,

    /// SMTP port.
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// SMTP username.
    #[serde(default)]
    pub smtp_user: Option<String>,

    /// SMTP password.
    #[serde(default)]
    pub smtp_pass: Option<String>,

    /// Sender address for reminder emails.
    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// Seconds between reminder sweeps of upcoming slots.
    #[serde(default = "default_check_interval_secs")]
    pub check_interval_secs: u64,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            slack_webhook_url: None,
            smtp_host: None,
            smtp_port: default_smtp_port(),
            smtp_user: None,
            smtp_pass: None,
            from_email: default_from_email(),
            check_interval_secs: default_check_interval_secs(),
        }
    }
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_email() -> String {
    "oncall-bot@example.com".to_string()
}

fn default_check_interval_secs() -> u64 {
    3600
}
