// SPDX-FileCopyrightText: 2026 Oncall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SMTP email reminders via `lettre`.
//!
//! Uses STARTTLS on the configured port. Credentials are optional; without
//! them the connection is unauthenticated.

use lettre::{
    message::Mailbox, transport::smtp::authentication::Credentials, AsyncSmtpTransport,
    AsyncTransport, Message, Tokio1Executor,
};
use oncall_core::OncallError;

use crate::{Notification, Notifier};

/// Sends reminders as emails via SMTP.
#[derive(Debug)]
pub struct EmailNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl EmailNotifier {
    /// Build an `EmailNotifier` from the `[notify]` SMTP settings.
    pub fn from_config(
        smtp_host: &str,
        smtp_port: u16,
        smtp_user: Option<&str>,
        smtp_pass: Option<&str>,
        from_email: &str,
    ) -> Result<Self, OncallError> {
        let from: Mailbox = from_email.parse().map_err(|e: lettre::address::AddressError| {
            OncallError::Notify {
                message: format!("invalid from_email `{from_email}`"),
                source: Some(Box::new(e)),
            }
        })?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(smtp_host)
            .map_err(|e| OncallError::Notify {
                message: format!("cannot build SMTP transport for `{smtp_host}`"),
                source: Some(Box::new(e)),
            })?
            .port(smtp_port);

        if let (Some(user), Some(pass)) = (smtp_user, smtp_pass) {
            builder = builder.credentials(Credentials::new(user.to_string(), pass.to_string()));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait::async_trait]
impl Notifier for EmailNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), OncallError> {
        let Some(recipient) = &notification.recipient else {
            // Nobody to address; skip rather than fail the sweep.
            tracing::debug!(subject = %notification.subject, "email reminder skipped, no recipient");
            return Ok(());
        };

        let to: Mailbox = recipient.parse().map_err(|e: lettre::address::AddressError| {
            OncallError::Notify {
                message: format!("invalid recipient `{recipient}`"),
                source: Some(Box::new(e)),
            }
        })?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(&notification.subject)
            .body(notification.body.clone())
            .map_err(|e| OncallError::Notify {
                message: "cannot build reminder email".to_string(),
                source: Some(Box::new(e)),
            })?;

        self.transport.send(email).await.map_err(|e| OncallError::Notify {
            message: format!("SMTP delivery to `{recipient}` failed"),
            source: Some(Box::new(e)),
        })?;

        tracing::info!(
            channel = "email",
            recipient = %recipient,
            subject = %notification.subject,
            "reminder delivered"
        );
        Ok(())
    }

    fn channel_name(&self) -> &str {
        "email"
    }
}
