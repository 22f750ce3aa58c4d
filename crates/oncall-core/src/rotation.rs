// SPDX-FileCopyrightText: 2026 Oncall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Round-robin slot generation with leave-aware primary selection.
//!
//! `generate_slots` is a pure function: identical inputs always produce the
//! identical slot list. No randomness, no clock reads; the caller supplies
//! the year and (optionally) an explicit start date.

use chrono::{Datelike, Days, NaiveDate};

use crate::error::OncallError;
use crate::pto::PtoIndex;
use crate::types::{PersonId, SlotAssignment};

/// First date on or after January 1 of `year` whose weekday equals
/// `week_starts_on` (Monday = 0 through Sunday = 6).
pub fn first_rotation_start(year: i32, week_starts_on: u8) -> Result<NaiveDate, OncallError> {
    if week_starts_on > 6 {
        return Err(OncallError::InvalidInput(format!(
            "week_starts_on must be between 0 (Monday) and 6 (Sunday), got {week_starts_on}"
        )));
    }
    let jan_first = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| OncallError::InvalidInput(format!("year {year} is out of range")))?;

    let mut day = jan_first;
    while day.weekday().num_days_from_monday() != u32::from(week_starts_on) {
        day = day
            .succ_opt()
            .ok_or_else(|| OncallError::InvalidInput(format!("year {year} is out of range")))?;
    }
    Ok(day)
}

/// Partition `[effective start, Dec 31]` of `year` into contiguous slots of
/// `rotation_days` days (the final slot may be shorter) and assign each a
/// primary and, optionally, a secondary person.
///
/// The nominal primary for slot `i` is `roster[i mod n]`. When that person
/// has leave anywhere inside the slot's range, the scan continues through
/// the roster in order until a free member is found. When every member is
/// blocked for the entire range, the nominal person is assigned anyway --
/// there is no solvable assignment, and a degraded slot beats a failed
/// generation.
///
/// The secondary is the next roster member after the chosen primary that
/// differs from it. Leave is not consulted for the secondary.
pub fn generate_slots(
    roster: &[PersonId],
    year: i32,
    rotation_days: i64,
    week_starts_on: u8,
    custom_start_date: Option<NaiveDate>,
    pto: &PtoIndex,
    assign_secondary: bool,
) -> Result<Vec<SlotAssignment>, OncallError> {
    if roster.is_empty() {
        return Err(OncallError::InvalidInput(
            "at least one person is required in the roster".into(),
        ));
    }
    if rotation_days <= 0 {
        return Err(OncallError::InvalidInput(format!(
            "rotation_days must be positive, got {rotation_days}"
        )));
    }

    let start = match custom_start_date {
        Some(date) => {
            // Still reject out-of-range week_starts_on so stored definitions
            // never carry an unusable value.
            if week_starts_on > 6 {
                return Err(OncallError::InvalidInput(format!(
                    "week_starts_on must be between 0 (Monday) and 6 (Sunday), got {week_starts_on}"
                )));
            }
            date
        }
        None => first_rotation_start(year, week_starts_on)?,
    };
    let end_of_year = NaiveDate::from_ymd_opt(year, 12, 31)
        .ok_or_else(|| OncallError::InvalidInput(format!("year {year} is out of range")))?;

    let n = roster.len();
    let step = rotation_days as u64;
    let mut slots = Vec::new();
    let mut current_start = start;
    let mut i: usize = 0;

    while current_start <= end_of_year {
        let nominal_end = current_start
            .checked_add_days(Days::new(step - 1))
            .unwrap_or(end_of_year);
        let current_end = nominal_end.min(end_of_year);

        let base = i % n;
        let mut primary_idx = base;
        let mut primary = None;
        for offset in 0..n {
            let candidate_idx = (base + offset) % n;
            let candidate = roster[candidate_idx];
            if !pto.is_blocked(candidate, current_start, current_end) {
                primary = Some(candidate);
                primary_idx = candidate_idx;
                break;
            }
        }
        // Everyone is on leave for the whole range: fall back to the
        // nominal person. Deliberate degraded outcome, not an error.
        let primary = primary.unwrap_or(roster[base]);

        let mut secondary = None;
        if assign_secondary && n > 1 {
            for offset in 1..n {
                let candidate = roster[(primary_idx + offset) % n];
                if candidate != primary {
                    secondary = Some(candidate);
                    break;
                }
            }
        }

        slots.push(SlotAssignment {
            slot: (i + 1) as i64,
            start: current_start,
            end: current_end,
            primary_person_id: primary,
            secondary_person_id: secondary,
        });

        i += 1;
        current_start = match current_end.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PtoPeriod;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn pto_for(person_id: PersonId, start: NaiveDate, end: NaiveDate, year: i32) -> PtoIndex {
        PtoIndex::from_periods(
            &[PtoPeriod {
                id: 0,
                person_id,
                start_date: start,
                end_date: end,
                reason: None,
            }],
            year,
        )
    }

    #[test]
    fn empty_roster_is_rejected() {
        let err = generate_slots(&[], 2025, 7, 0, None, &PtoIndex::new(), true).unwrap_err();
        assert!(matches!(err, OncallError::InvalidInput(_)));
    }

    #[test]
    fn non_positive_rotation_is_rejected() {
        let err = generate_slots(&[1], 2025, 0, 0, None, &PtoIndex::new(), true).unwrap_err();
        assert!(matches!(err, OncallError::InvalidInput(_)));
        let err = generate_slots(&[1], 2025, -3, 0, None, &PtoIndex::new(), true).unwrap_err();
        assert!(matches!(err, OncallError::InvalidInput(_)));
    }

    #[test]
    fn out_of_range_week_start_is_rejected() {
        let err = generate_slots(&[1], 2025, 7, 7, None, &PtoIndex::new(), true).unwrap_err();
        assert!(matches!(err, OncallError::InvalidInput(_)));
    }

    #[test]
    fn first_rotation_start_finds_the_first_monday() {
        // Jan 1 2025 is a Wednesday; the first Monday is Jan 6.
        assert_eq!(first_rotation_start(2025, 0).unwrap(), d(2025, 1, 6));
        // Wednesday = 2 matches Jan 1 itself.
        assert_eq!(first_rotation_start(2025, 2).unwrap(), d(2025, 1, 1));
    }

    #[test]
    fn round_robin_without_pto() {
        let roster = [10, 20, 30];
        let slots = generate_slots(
            &roster,
            2025,
            7,
            0,
            Some(d(2025, 1, 1)),
            &PtoIndex::new(),
            true,
        )
        .unwrap();

        assert_eq!(slots[0].start, d(2025, 1, 1));
        assert_eq!(slots[0].end, d(2025, 1, 7));
        assert_eq!(slots[0].primary_person_id, 10);
        assert_eq!(slots[0].secondary_person_id, Some(20));

        assert_eq!(slots[1].start, d(2025, 1, 8));
        assert_eq!(slots[1].end, d(2025, 1, 14));
        assert_eq!(slots[1].primary_person_id, 20);
        assert_eq!(slots[1].secondary_person_id, Some(30));

        // Pure round robin: slot i's primary is roster[i mod n].
        for (i, slot) in slots.iter().enumerate() {
            assert_eq!(slot.primary_person_id, roster[i % roster.len()]);
        }
    }

    #[test]
    fn slots_are_contiguous_and_cover_through_dec_31() {
        let slots =
            generate_slots(&[1, 2], 2025, 10, 0, None, &PtoIndex::new(), true).unwrap();

        let effective = first_rotation_start(2025, 0).unwrap();
        assert_eq!(slots[0].start, effective);
        assert_eq!(slots.last().unwrap().end, d(2025, 12, 31));

        for pair in slots.windows(2) {
            assert_eq!(pair[0].end.succ_opt().unwrap(), pair[1].start);
        }
        for (i, slot) in slots.iter().enumerate() {
            assert_eq!(slot.slot, (i + 1) as i64);
            assert!(slot.start <= slot.end);
        }

        // ceil((days from effective start to Dec 31 + 1) / rotation_days)
        let total_days = (d(2025, 12, 31) - effective).num_days() + 1;
        let expected = (total_days + 9) / 10;
        assert_eq!(slots.len() as i64, expected);
    }

    #[test]
    fn blocked_nominal_primary_skips_to_next_free_member() {
        // B (20) is on leave for all of slot 2 (Jan 8..14): C takes primary,
        // and the secondary scan continues from C, landing on A.
        let pto = pto_for(20, d(2025, 1, 8), d(2025, 1, 14), 2025);
        let slots =
            generate_slots(&[10, 20, 30], 2025, 7, 0, Some(d(2025, 1, 1)), &pto, true).unwrap();

        assert_eq!(slots[1].primary_person_id, 30);
        assert_eq!(slots[1].secondary_person_id, Some(10));
    }

    #[test]
    fn partially_blocked_nominal_primary_is_still_skipped() {
        // One leave day inside the slot range is enough to block.
        let pto = pto_for(20, d(2025, 1, 10), d(2025, 1, 10), 2025);
        let slots =
            generate_slots(&[10, 20, 30], 2025, 7, 0, Some(d(2025, 1, 1)), &pto, true).unwrap();
        assert_eq!(slots[1].primary_person_id, 30);
    }

    #[test]
    fn all_blocked_falls_back_to_nominal_member() {
        let mut pto = PtoIndex::new();
        for person in [10, 20, 30] {
            pto.add_range(person, d(2025, 1, 8), d(2025, 1, 14), 2025);
        }
        let slots =
            generate_slots(&[10, 20, 30], 2025, 7, 0, Some(d(2025, 1, 1)), &pto, true).unwrap();
        // Slot 2's nominal member is roster[1] = 20, assigned despite leave.
        assert_eq!(slots[1].primary_person_id, 20);
        assert_eq!(slots[1].secondary_person_id, Some(30));
    }

    #[test]
    fn secondary_ignores_pto() {
        // C (30) is on leave for slot 1 but still becomes secondary: leave
        // is only consulted for the primary.
        let pto = pto_for(30, d(2025, 1, 1), d(2025, 1, 7), 2025);
        let slots =
            generate_slots(&[10, 30, 20], 2025, 7, 0, Some(d(2025, 1, 1)), &pto, true).unwrap();
        assert_eq!(slots[0].primary_person_id, 10);
        assert_eq!(slots[0].secondary_person_id, Some(30));
    }

    #[test]
    fn secondary_differs_from_primary_and_is_absent_for_single_member() {
        let slots =
            generate_slots(&[1, 2, 3], 2025, 7, 0, None, &PtoIndex::new(), true).unwrap();
        for slot in &slots {
            assert_ne!(slot.secondary_person_id, Some(slot.primary_person_id));
            assert!(slot.secondary_person_id.is_some());
        }

        let solo = generate_slots(&[9], 2025, 7, 0, None, &PtoIndex::new(), true).unwrap();
        assert!(solo.iter().all(|s| s.secondary_person_id.is_none()));
    }

    #[test]
    fn secondary_is_omitted_when_disabled() {
        let slots =
            generate_slots(&[1, 2], 2025, 7, 0, None, &PtoIndex::new(), false).unwrap();
        assert!(slots.iter().all(|s| s.secondary_person_id.is_none()));
    }

    #[test]
    fn late_custom_start_produces_one_clipped_slot() {
        let slots = generate_slots(
            &[42],
            2025,
            7,
            0,
            Some(d(2025, 12, 29)),
            &PtoIndex::new(),
            true,
        )
        .unwrap();
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].start, d(2025, 12, 29));
        assert_eq!(slots[0].end, d(2025, 12, 31));
        assert_eq!(slots[0].primary_person_id, 42);
        assert_eq!(slots[0].secondary_person_id, None);
    }

    #[test]
    fn generation_is_deterministic() {
        let pto = pto_for(2, d(2025, 5, 1), d(2025, 5, 20), 2025);
        let a = generate_slots(&[1, 2, 3], 2025, 14, 3, None, &pto, true).unwrap();
        let b = generate_slots(&[1, 2, 3], 2025, 14, 3, None, &pto, true).unwrap();
        assert_eq!(a, b);
    }
}
