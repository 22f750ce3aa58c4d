// SPDX-FileCopyrightText: 2026 Oncall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Partial-update merge semantics for slot corrections.
//!
//! An override carries only the fields the operator wants to change; absent
//! fields leave the stored values untouched. The generation-time invariant
//! that the secondary differs from the primary is NOT re-enforced here --
//! an operator override may intentionally put one person on both seats.
//! Person-id validity is the caller's responsibility.

use crate::types::{OnCallSlot, SlotOverride};

impl SlotOverride {
    /// Whether the override carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.primary_person_id.is_none()
            && self.secondary_person_id.is_none()
            && self.notes.is_none()
    }

    /// Merge this override into `slot`, overwriting only the present fields.
    pub fn apply_to(&self, slot: &mut OnCallSlot) {
        if let Some(primary) = self.primary_person_id {
            slot.primary_person_id = primary;
        }
        if let Some(secondary) = self.secondary_person_id {
            slot.secondary_person_id = Some(secondary);
        }
        if let Some(notes) = &self.notes {
            slot.notes = Some(notes.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn slot() -> OnCallSlot {
        OnCallSlot {
            schedule_id: 10,
            slot: 2,
            start: NaiveDate::from_ymd_opt(2025, 1, 8).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 1, 14).unwrap(),
            primary_person_id: 1,
            secondary_person_id: Some(2),
            notes: None,
            reminded: false,
        }
    }

    #[test]
    fn notes_only_override_leaves_assignees_unchanged() {
        let mut s = slot();
        SlotOverride {
            notes: Some("holiday coverage".into()),
            ..Default::default()
        }
        .apply_to(&mut s);

        assert_eq!(s.primary_person_id, 1);
        assert_eq!(s.secondary_person_id, Some(2));
        assert_eq!(s.notes.as_deref(), Some("holiday coverage"));
    }

    #[test]
    fn primary_only_override_leaves_secondary_and_notes_unchanged() {
        let mut s = slot();
        s.notes = Some("keep me".into());
        SlotOverride {
            primary_person_id: Some(7),
            ..Default::default()
        }
        .apply_to(&mut s);

        assert_eq!(s.primary_person_id, 7);
        assert_eq!(s.secondary_person_id, Some(2));
        assert_eq!(s.notes.as_deref(), Some("keep me"));
    }

    #[test]
    fn override_may_equal_primary_and_secondary() {
        // Accepted relaxation: no primary != secondary check on override.
        let mut s = slot();
        SlotOverride {
            secondary_person_id: Some(1),
            ..Default::default()
        }
        .apply_to(&mut s);
        assert_eq!(s.primary_person_id, 1);
        assert_eq!(s.secondary_person_id, Some(1));
    }

    #[test]
    fn empty_override_is_a_no_op() {
        let mut s = slot();
        let before = s.clone();
        let ov = SlotOverride::default();
        assert!(ov.is_empty());
        ov.apply_to(&mut s);
        assert_eq!(s, before);
    }
}
