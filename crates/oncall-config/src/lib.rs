// SPDX-FileCopyrightText: 2026 Oncall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for the oncall scheduler.
//!
//! TOML files merged over compiled defaults (XDG hierarchy, then
//! `ONCALL_*` env overrides), strict models with `deny_unknown_fields`,
//! semantic validation, and miette diagnostics with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! match oncall_config::load_and_validate() {
//!     Ok(config) => println!("db at {}", config.storage.database_path),
//!     Err(errors) => oncall_config::render_errors(&errors),
//! }
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::OncallConfig;

/// Load configuration from the XDG hierarchy and validate it.
///
/// Figment failures come back as rich diagnostics (with source spans
/// resolved from whichever TOML file contributed the bad key); a config
/// that deserializes cleanly still goes through semantic validation.
pub fn load_and_validate() -> Result<OncallConfig, Vec<ConfigError>> {
    finish(loader::load_config(), collect_toml_sources)
}

/// Load configuration from a TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<OncallConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

fn finish(
    loaded: Result<OncallConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<OncallConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

/// Read every TOML file the loader consults, keyed by the path figment
/// reports, so diagnostics can point into the right source.
fn collect_toml_sources() -> Vec<(String, String)> {
    let local = std::env::current_dir()
        .map(|d| d.join("oncall.toml"))
        .unwrap_or_else(|_| "oncall.toml".into());
    let user = dirs::config_dir().map(|d| d.join("oncall/oncall.toml"));
    let system = std::path::PathBuf::from("/etc/oncall/oncall.toml");

    [Some(local), user, Some(system)]
        .into_iter()
        .flatten()
        .filter_map(|path| {
            let content = std::fs::read_to_string(&path).ok()?;
            Some((path.display().to_string(), content))
        })
        .collect()
}
