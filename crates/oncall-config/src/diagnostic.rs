// SPDX-FileCopyrightText: 2026 Oncall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rich config diagnostics rendered through miette.
//!
//! Figment reports deserialization failures as flat error values; this
//! module turns them into annotated diagnostics carrying the offending
//! TOML span, the valid keys for the section, and a fuzzy-matched
//! "did you mean?" suggestion.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
/// 0.75 catches common typos like `hsot` -> `host` or `smtp_prot` ->
/// `smtp_port` while filtering noise.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration error with rich diagnostic information.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// An unknown key was found in the configuration.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(oncall::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        /// The unrecognized key name.
        key: String,
        /// Closest valid key, when one scores above the threshold.
        suggestion: Option<String>,
        /// Comma-joined valid keys for the section.
        valid_keys: String,
        /// Where the key sits in the TOML source, when locatable.
        #[label("this key is not recognized")]
        span: Option<SourceSpan>,
        /// Source file content for the span display.
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A configuration value has the wrong type.
    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(oncall::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
    },

    /// A required configuration key is missing.
    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(oncall::config::missing_key),
        help("add `{key} = <value>` to your oncall.toml")
    )]
    MissingKey { key: String },

    /// A semantic validation failure (well-formed TOML, bad value).
    #[error("validation error: {message}")]
    #[diagnostic(code(oncall::config::validation))]
    Validation { message: String },

    /// Catch-all for other configuration errors.
    #[error("configuration error: {0}")]
    #[diagnostic(code(oncall::config::other))]
    Other(String),
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Convert a `figment::Error` into a list of `ConfigError` diagnostics.
///
/// One figment error can wrap several underlying failures; each becomes
/// its own diagnostic. `toml_sources` maps file paths to their contents
/// so unknown-key errors can be annotated with a source span.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| match &error.kind {
            Kind::UnknownField(field, expected) => {
                let valid: Vec<&str> = expected.to_vec();
                let (span, src) = locate_key(&error, field, toml_sources)
                    .map(|(s, n)| (Some(s), Some(n)))
                    .unwrap_or((None, None));
                ConfigError::UnknownKey {
                    key: field.clone(),
                    suggestion: suggest_key(field, &valid),
                    valid_keys: valid.join(", "),
                    span,
                    src,
                }
            }
            Kind::MissingField(field) => ConfigError::MissingKey {
                key: field.clone().into_owned(),
            },
            Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                key: dotted_path(&error),
                detail: format!("found {actual}, expected {expected}"),
                expected: expected.to_string(),
            },
            _ => ConfigError::Other(error.to_string()),
        })
        .collect()
}

fn dotted_path(error: &figment::error::Error) -> String {
    error
        .path
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

/// Locate `field` in whichever TOML source the error originated from.
fn locate_key(
    error: &figment::error::Error,
    field: &str,
    toml_sources: &[(String, String)],
) -> Option<(SourceSpan, NamedSource<String>)> {
    let figment::Source::File(path) = error.metadata.as_ref()?.source.as_ref()? else {
        return None;
    };
    let path = path.display().to_string();
    let (_, content) = toml_sources.iter().find(|(p, _)| *p == path)?;

    // Only the leading path segment matters for the section header; figment
    // reports the erroring key's path as e.g. ["server"] for `server.hsot`.
    let section = error.path.first().map(|s| s.to_string());
    let offset = find_key_offset(content, section.as_deref(), field)?;

    Some((
        SourceSpan::new(offset.into(), field.len()),
        NamedSource::new(path, content.clone()),
    ))
}

/// Byte offset of `field` within `content`, searched after the `[section]`
/// header when a section is given, from the top of the file otherwise.
pub fn find_key_offset(content: &str, section: Option<&str>, field: &str) -> Option<usize> {
    let base = match section {
        None => 0,
        Some(name) => {
            let header = format!("[{name}]");
            content.find(&header)? + header.len()
        }
    };

    let mut line_start = base;
    for line in content[base..].lines() {
        let key = line.trim_start();
        // The key must be followed by `=` or whitespace so a prefix of a
        // longer key does not match.
        if let Some(rest) = key.strip_prefix(field) {
            if rest.starts_with('=') || rest.starts_with(' ') || rest.starts_with('\t') {
                return Some(line_start + (line.len() - key.len()));
            }
        }
        line_start += line.len() + 1;
    }
    None
}

/// Suggest the valid key most similar to `unknown`, if any scores above
/// the Jaro-Winkler threshold.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|&key| (strsim::jaro_winkler(unknown, key), key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|(a, _), (b, _)| a.total_cmp(b))
        .map(|(_, key)| key.to_string())
}

/// Render a list of `ConfigError`s to stderr using miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        let diagnostic: &dyn Diagnostic = error;
        if handler.render_report(&mut buf, diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggest_hsot_for_host() {
        let valid = &["host", "port", "log_level"];
        assert_eq!(suggest_key("hsot", valid), Some("host".to_string()));
    }

    #[test]
    fn suggest_smtp_prot_for_smtp_port() {
        let valid = &["smtp_host", "smtp_port", "smtp_user", "smtp_pass"];
        assert_eq!(
            suggest_key("smtp_prot", valid),
            Some("smtp_port".to_string())
        );
    }

    #[test]
    fn no_suggestion_for_distant_typo() {
        let valid = &["host", "port", "log_level"];
        assert_eq!(suggest_key("zzzzzz", valid), None);
    }

    #[test]
    fn key_offset_found_after_section_header() {
        let content = "[server]\nhsot = \"0.0.0.0\"\n";
        let offset = find_key_offset(content, Some("server"), "hsot").unwrap();
        assert_eq!(&content[offset..offset + 4], "hsot");
    }

    #[test]
    fn key_offset_top_level_and_prefix_safe() {
        let content = "port_name = 1\nport = 2\n";
        let offset = find_key_offset(content, None, "port").unwrap();
        // Must match the standalone `port`, not the `port_name` prefix.
        assert_eq!(offset, content.find("port = 2").unwrap());
    }
}
