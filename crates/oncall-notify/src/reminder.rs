// SPDX-FileCopyrightText: 2026 Oncall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Periodic sweep for rotations starting tomorrow.
//!
//! Each sweep loads the unreminded slots whose start date is tomorrow,
//! fans a reminder out to every configured channel, and marks the slot so
//! the next sweep skips it. A slot whose delivery failed on any channel is
//! left unmarked and retried on the next sweep.

use chrono::{Days, NaiveDate, Utc};
use oncall_config::model::NotifyConfig;
use oncall_core::{OncallError, OnCallSlot, Person};
use oncall_storage::queries::{people, schedules};
use oncall_storage::Database;
use tracing::{error, info, warn};

use crate::{build_notifiers, Notification, Notifier};

/// Run one sweep relative to `today`. Returns the number of slots whose
/// reminders were fully delivered.
pub async fn run_sweep(
    db: &Database,
    notifiers: &[Box<dyn Notifier>],
    today: NaiveDate,
) -> Result<usize, OncallError> {
    if notifiers.is_empty() {
        // Leave slots unmarked so channels enabled later still remind.
        return Ok(0);
    }

    let Some(tomorrow) = today.checked_add_days(Days::new(1)) else {
        return Ok(0);
    };

    let pending = schedules::unreminded_slots_starting_on(db, tomorrow).await?;
    let mut delivered = 0;

    for slot in pending {
        match deliver_slot_reminders(db, notifiers, &slot).await {
            Ok(()) => {
                schedules::mark_reminded(db, slot.schedule_id, slot.slot).await?;
                delivered += 1;
            }
            Err(e) => {
                warn!(
                    schedule_id = slot.schedule_id,
                    slot = slot.slot,
                    error = %e,
                    "reminder delivery failed, will retry next sweep"
                );
            }
        }
    }

    if delivered > 0 {
        info!(delivered, date = %tomorrow, "rotation reminders sent");
    }
    Ok(delivered)
}

async fn deliver_slot_reminders(
    db: &Database,
    notifiers: &[Box<dyn Notifier>],
    slot: &OnCallSlot,
) -> Result<(), OncallError> {
    let primary = people::get_person(db, slot.primary_person_id).await?;
    let secondary = match slot.secondary_person_id {
        Some(id) => people::get_person(db, id).await?,
        None => None,
    };

    let subject = "On-call rotation starts tomorrow".to_string();
    let body = format!(
        "Slot {} runs {} through {}.\nPrimary: {}\nSecondary: {}",
        slot.slot,
        slot.start,
        slot.end,
        display_name(primary.as_ref(), slot.primary_person_id),
        secondary
            .as_ref()
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "none".to_string()),
    );

    for notifier in notifiers {
        match notifier.channel_name() {
            // Email goes to each assignee individually.
            "email" => {
                for person in [primary.as_ref(), secondary.as_ref()].into_iter().flatten() {
                    let note = Notification {
                        subject: subject.clone(),
                        body: body.clone(),
                        recipient: person.email.clone(),
                    };
                    notifier.send(&note).await?;
                }
            }
            _ => {
                let note = Notification {
                    subject: subject.clone(),
                    body: body.clone(),
                    recipient: None,
                };
                notifier.send(&note).await?;
            }
        }
    }
    Ok(())
}

fn display_name(person: Option<&Person>, id: i64) -> String {
    person
        .map(|p| p.name.clone())
        .unwrap_or_else(|| format!("#{id}"))
}

/// Run sweeps forever at the configured interval. Intended to be spawned
/// as a background task next to the HTTP server.
pub async fn run_reminder_loop(db: Database, config: NotifyConfig) {
    let notifiers = match build_notifiers(&config) {
        Ok(n) => n,
        Err(e) => {
            error!(error = %e, "reminder channels misconfigured, reminders disabled");
            return;
        }
    };
    if notifiers.is_empty() {
        info!("no reminder channels configured, reminder loop idle");
        return;
    }

    let mut ticker = tokio::time::interval(std::time::Duration::from_secs(
        config.check_interval_secs.max(1),
    ));
    loop {
        ticker.tick().await;
        let today = Utc::now().date_naive();
        if let Err(e) = run_sweep(&db, &notifiers, today).await {
            error!(error = %e, "reminder sweep failed");
        }
    }
}
