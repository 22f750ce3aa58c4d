// SPDX-FileCopyrightText: 2026 Oncall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Slack incoming-webhook reminders.
//!
//! Posts the reminder text as a `{"text": ...}` JSON payload, the plain
//! incoming-webhook format.

use oncall_core::OncallError;

use crate::{Notification, Notifier};

/// Delivers reminders to a Slack incoming webhook.
pub struct SlackNotifier {
    url: String,
    client: reqwest::Client,
}

impl SlackNotifier {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl Notifier for SlackNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), OncallError> {
        let text = format!("*{}*\n{}", notification.subject, notification.body);
        let payload = serde_json::json!({ "text": text });

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| OncallError::Notify {
                message: "Slack webhook request failed".to_string(),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(%status, body = %body, "Slack webhook returned non-2xx status");
            return Err(OncallError::Notify {
                message: format!("Slack webhook returned {status}"),
                source: None,
            });
        }

        tracing::info!(channel = "slack", subject = %notification.subject, "reminder delivered");
        Ok(())
    }

    fn channel_name(&self) -> &str {
        "slack"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_name_is_slack() {
        let notifier = SlackNotifier::new("https://hooks.slack.com/services/T/B/x".to_string());
        assert_eq!(notifier.channel_name(), "slack");
    }
}
