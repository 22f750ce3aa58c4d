// SPDX-FileCopyrightText: 2026 Oncall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./oncall.toml` > `~/.config/oncall/oncall.toml`
//! > `/etc/oncall/oncall.toml` with environment variable overrides via the
//! `ONCALL_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::OncallConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/oncall/oncall.toml` (system-wide)
/// 3. `~/.config/oncall/oncall.toml` (user XDG config)
/// 4. `./oncall.toml` (local directory)
/// 5. `ONCALL_*` environment variables
pub fn load_config() -> Result<OncallConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<OncallConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(OncallConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<OncallConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(OncallConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(OncallConfig::default()))
        .merge(Toml::file("/etc/oncall/oncall.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("oncall/oncall.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("oncall.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `ONCALL_NOTIFY_SLACK_WEBHOOK_URL` must
/// map to `notify.slack_webhook_url`, not `notify.slack.webhook.url`.
fn env_provider() -> Env {
    Env::prefixed("ONCALL_").map(|key| {
        // `key` is the lowercased env var name with the prefix stripped.
        let mapped = key
            .as_str()
            .replacen("server_", "server.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("seed_", "seed.", 1)
            .replacen("notify_", "notify.", 1);
        mapped.into()
    })
}
