// SPDX-FileCopyrightText: 2026 Oncall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Upcoming-rotation reminder delivery.
//!
//! Channels implement [`Notifier`] and are built from the `[notify]` config
//! section; a channel whose required settings are absent simply is not
//! constructed. The reminder sweep in [`reminder`] finds slots starting
//! tomorrow and fans a message out to every configured channel.

pub mod email;
pub mod reminder;
pub mod slack;

use oncall_config::model::NotifyConfig;
use oncall_core::OncallError;

pub use email::EmailNotifier;
pub use slack::SlackNotifier;

/// One reminder message.
///
/// `recipient` is the target address for point-to-point channels (email);
/// broadcast channels (Slack) ignore it.
#[derive(Debug, Clone)]
pub struct Notification {
    pub subject: String,
    pub body: String,
    pub recipient: Option<String>,
}

/// A delivery channel for reminders.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<(), OncallError>;

    /// Short channel label for logs.
    fn channel_name(&self) -> &str;
}

/// Build every channel the configuration enables.
///
/// Returns an empty vector when nothing is configured; the reminder sweep
/// then leaves slots untouched so channels enabled later still remind.
pub fn build_notifiers(config: &NotifyConfig) -> Result<Vec<Box<dyn Notifier>>, OncallError> {
    let mut notifiers: Vec<Box<dyn Notifier>> = Vec::new();

    if let Some(url) = &config.slack_webhook_url {
        notifiers.push(Box::new(SlackNotifier::new(url.clone())));
    }

    if let Some(host) = &config.smtp_host {
        notifiers.push(Box::new(EmailNotifier::from_config(
            host,
            config.smtp_port,
            config.smtp_user.as_deref(),
            config.smtp_pass.as_deref(),
            &config.from_email,
        )?));
    }

    Ok(notifiers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_channels_without_configuration() {
        let config = NotifyConfig::default();
        let notifiers = build_notifiers(&config).unwrap();
        assert!(notifiers.is_empty());
    }

    #[test]
    fn slack_channel_built_from_webhook_url() {
        let config = NotifyConfig {
            slack_webhook_url: Some("https://hooks.slack.com/services/T/B/x".to_string()),
            ..Default::default()
        };
        let notifiers = build_notifiers(&config).unwrap();
        assert_eq!(notifiers.len(), 1);
        assert_eq!(notifiers[0].channel_name(), "slack");
    }

    #[test]
    fn email_channel_built_from_smtp_host() {
        let config = NotifyConfig {
            smtp_host: Some("smtp.example.com".to_string()),
            ..Default::default()
        };
        let notifiers = build_notifiers(&config).unwrap();
        assert_eq!(notifiers.len(), 1);
        assert_eq!(notifiers[0].channel_name(), "email");
    }
}
