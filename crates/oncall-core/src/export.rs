// SPDX-FileCopyrightText: 2026 Oncall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic schedule export serializers.
//!
//! All three renderers are pure functions over the enriched slot list;
//! nothing here touches storage or the clock.

use std::str::FromStr;

use chrono::NaiveDate;
use strum::{Display, EnumString};

use crate::error::OncallError;
use crate::types::{EnrichedSlot, ScheduleId};

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Md,
    Ics,
}

impl ExportFormat {
    /// Parse a format from a request query value.
    pub fn parse(value: &str) -> Result<Self, OncallError> {
        Self::from_str(value).map_err(|_| {
            OncallError::InvalidInput(format!(
                "unsupported export format `{value}` (expected csv, md, or ics)"
            ))
        })
    }

    /// MIME content type of the rendered payload.
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Md => "text/markdown",
            Self::Ics => "text/calendar",
        }
    }

    /// Suggested download filename. Markdown renders inline and gets none.
    pub fn filename(self, schedule_id: ScheduleId) -> Option<String> {
        match self {
            Self::Csv => Some(format!("schedule_{schedule_id}.csv")),
            Self::Ics => Some(format!("schedule_{schedule_id}.ics")),
            Self::Md => None,
        }
    }
}

/// Render the enriched slot list for `format`.
pub fn render(
    format: ExportFormat,
    schedule_id: ScheduleId,
    slots: &[EnrichedSlot],
) -> Result<String, OncallError> {
    match format {
        ExportFormat::Csv => render_csv(slots),
        ExportFormat::Md => Ok(render_markdown(schedule_id, slots)),
        ExportFormat::Ics => Ok(render_ics(schedule_id, slots)),
    }
}

/// CSV with a fixed header. Absent secondary/name/email/notes render as
/// empty fields; dates are ISO `YYYY-MM-DD`.
pub fn render_csv(slots: &[EnrichedSlot]) -> Result<String, OncallError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record([
            "slot",
            "start",
            "end",
            "primary_person_id",
            "primary_name",
            "primary_email",
            "secondary_person_id",
            "secondary_name",
            "secondary_email",
            "notes",
        ])
        .map_err(|e| OncallError::Internal(format!("csv export failed: {e}")))?;

    for s in slots {
        writer
            .write_record([
                s.slot.to_string(),
                s.start.to_string(),
                s.end.to_string(),
                s.primary_person_id.to_string(),
                s.primary_name.clone().unwrap_or_default(),
                s.primary_email.clone().unwrap_or_default(),
                s.secondary_person_id.map(|id| id.to_string()).unwrap_or_default(),
                s.secondary_name.clone().unwrap_or_default(),
                s.secondary_email.clone().unwrap_or_default(),
                s.notes.clone().unwrap_or_default(),
            ])
            .map_err(|e| OncallError::Internal(format!("csv export failed: {e}")))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| OncallError::Internal(format!("csv export failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| OncallError::Internal(format!("csv export failed: {e}")))
}

/// Titled Markdown table. Person cells render `"{name} <{email}>"` when
/// both are present, the name alone without an email, and `"#{id}"` when
/// the name is unknown.
pub fn render_markdown(schedule_id: ScheduleId, slots: &[EnrichedSlot]) -> String {
    let mut lines = vec![
        format!("# Schedule {schedule_id}"),
        String::new(),
        "| Slot | Start | End | Primary | Secondary | Notes |".to_string(),
        "|------|-------|-----|---------|-----------|-------|".to_string(),
    ];

    for s in slots {
        let primary =
            person_label(s.primary_person_id, s.primary_name.as_deref(), s.primary_email.as_deref());
        let secondary = match s.secondary_person_id {
            Some(id) => person_label(id, s.secondary_name.as_deref(), s.secondary_email.as_deref()),
            None => String::new(),
        };
        lines.push(format!(
            "| {} | {} | {} | {} | {} | {} |",
            s.slot,
            s.start,
            s.end,
            primary,
            secondary,
            s.notes.as_deref().unwrap_or("")
        ));
    }

    lines.join("\n")
}

/// ICS calendar with one all-day VEVENT per slot. `DTEND` is exclusive per
/// the all-day-event convention, so it renders as the day after the slot's
/// inclusive end.
pub fn render_ics(schedule_id: ScheduleId, slots: &[EnrichedSlot]) -> String {
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "PRODID:-//OnCallScheduler//EN".to_string(),
    ];

    for s in slots {
        let dtend = s.end.succ_opt().unwrap_or(s.end);
        let label = match &s.primary_name {
            Some(name) => name.clone(),
            None => format!("#{}", s.primary_person_id),
        };
        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!("UID:{schedule_id}-{}@oncall", s.slot));
        lines.push(format!("DTSTART;VALUE=DATE:{}", ics_date(s.start)));
        lines.push(format!("DTEND;VALUE=DATE:{}", ics_date(dtend)));
        lines.push(format!("SUMMARY:On-call slot {} (primary {label})", s.slot));
        lines.push("END:VEVENT".to_string());
    }

    lines.push("END:VCALENDAR".to_string());
    lines.join("\n")
}

fn ics_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

fn person_label(id: i64, name: Option<&str>, email: Option<&str>) -> String {
    let base = match name {
        Some(name) => name.to_string(),
        None => format!("#{id}"),
    };
    match email {
        Some(email) => format!("{base} <{email}>"),
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample_slots() -> Vec<EnrichedSlot> {
        vec![
            EnrichedSlot {
                slot: 1,
                start: d(2025, 1, 1),
                end: d(2025, 1, 7),
                primary_person_id: 1,
                primary_name: Some("Alice Johnson".into()),
                primary_email: Some("alice@example.com".into()),
                secondary_person_id: Some(2),
                secondary_name: Some("Bob Smith".into()),
                secondary_email: None,
                notes: None,
            },
            EnrichedSlot {
                slot: 2,
                start: d(2025, 1, 8),
                end: d(2025, 1, 14),
                primary_person_id: 3,
                primary_name: None,
                primary_email: None,
                secondary_person_id: None,
                secondary_name: None,
                secondary_email: None,
                notes: Some("holiday coverage".into()),
            },
        ]
    }

    #[test]
    fn format_parses_and_rejects() {
        assert_eq!(ExportFormat::parse("csv").unwrap(), ExportFormat::Csv);
        assert_eq!(ExportFormat::parse("md").unwrap(), ExportFormat::Md);
        assert_eq!(ExportFormat::parse("ics").unwrap(), ExportFormat::Ics);
        assert!(matches!(
            ExportFormat::parse("pdf"),
            Err(OncallError::InvalidInput(_))
        ));
    }

    #[test]
    fn content_types_and_filenames() {
        assert_eq!(ExportFormat::Csv.content_type(), "text/csv");
        assert_eq!(ExportFormat::Md.content_type(), "text/markdown");
        assert_eq!(ExportFormat::Ics.content_type(), "text/calendar");
        assert_eq!(
            ExportFormat::Csv.filename(7).as_deref(),
            Some("schedule_7.csv")
        );
        assert_eq!(
            ExportFormat::Ics.filename(7).as_deref(),
            Some("schedule_7.ics")
        );
        assert_eq!(ExportFormat::Md.filename(7), None);
    }

    #[test]
    fn csv_has_fixed_header_and_empty_cells_for_absent_values() {
        let csv = render_csv(&sample_slots()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "slot,start,end,primary_person_id,primary_name,primary_email,\
secondary_person_id,secondary_name,secondary_email,notes"
        );
        assert_eq!(
            lines.next().unwrap(),
            "1,2025-01-01,2025-01-07,1,Alice Johnson,alice@example.com,2,Bob Smith,,"
        );
        assert_eq!(
            lines.next().unwrap(),
            "2,2025-01-08,2025-01-14,3,,,,,,holiday coverage"
        );
    }

    #[test]
    fn csv_roundtrips_core_slot_fields() {
        let slots = sample_slots();
        let csv = render_csv(&slots).unwrap();
        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        for (record, slot) in reader.records().map(|r| r.unwrap()).zip(&slots) {
            assert_eq!(record[0].parse::<i64>().unwrap(), slot.slot);
            assert_eq!(record[1].parse::<NaiveDate>().unwrap(), slot.start);
            assert_eq!(record[2].parse::<NaiveDate>().unwrap(), slot.end);
            assert_eq!(record[3].parse::<i64>().unwrap(), slot.primary_person_id);
            let secondary = if record[6].is_empty() {
                None
            } else {
                Some(record[6].parse::<i64>().unwrap())
            };
            assert_eq!(secondary, slot.secondary_person_id);
            let notes = if record[9].is_empty() {
                None
            } else {
                Some(record[9].to_string())
            };
            assert_eq!(notes, slot.notes);
        }
    }

    #[test]
    fn markdown_labels_people_and_blanks_missing_secondary() {
        let md = render_markdown(10, &sample_slots());
        assert!(md.starts_with("# Schedule 10"));
        assert!(md.contains("| Slot | Start | End | Primary | Secondary | Notes |"));
        assert!(md.contains(
            "| 1 | 2025-01-01 | 2025-01-07 | Alice Johnson <alice@example.com> | Bob Smith |  |"
        ));
        assert!(md.contains("| 2 | 2025-01-08 | 2025-01-14 | #3 |  | holiday coverage |"));
    }

    #[test]
    fn ics_renders_exclusive_dtend() {
        let ics = render_ics(10, &sample_slots());
        assert!(ics.starts_with("BEGIN:VCALENDAR\nVERSION:2.0\nPRODID:-//OnCallScheduler//EN"));
        assert!(ics.ends_with("END:VCALENDAR"));
        assert!(ics.contains("UID:10-1@oncall"));
        assert!(ics.contains("DTSTART;VALUE=DATE:20250101"));
        // end = 2025-01-07 renders as the following day.
        assert!(ics.contains("DTEND;VALUE=DATE:20250108"));
        assert!(ics.contains("SUMMARY:On-call slot 1 (primary Alice Johnson)"));
        assert!(ics.contains("SUMMARY:On-call slot 2 (primary #3)"));
    }
}
