// SPDX-FileCopyrightText: 2026 Oncall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-person leave date index for one calendar year.
//!
//! Each leave period is expanded day by day into the owning person's date
//! set, clipped to the target year. The generator's overlap test is set
//! membership for every day of a slot's inclusive range, so a slot is
//! blocked when any of its days falls inside a leave period.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::types::{PersonId, PtoPeriod};

/// Mapping from person to the set of calendar dates that person is
/// unavailable within a single year.
#[derive(Debug, Clone, Default)]
pub struct PtoIndex {
    by_person: HashMap<PersonId, HashSet<NaiveDate>>,
}

impl PtoIndex {
    /// An index with no leave recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index for `year` from raw leave periods. Periods that do
    /// not intersect the year contribute nothing.
    pub fn from_periods(periods: &[PtoPeriod], year: i32) -> Self {
        let mut index = Self::new();
        for period in periods {
            index.add_range(period.person_id, period.start_date, period.end_date, year);
        }
        index
    }

    /// Insert every day of `[start, end]` that falls inside `year` into the
    /// person's date set. Years outside chrono's representable range are
    /// ignored and leave the index unchanged.
    pub fn add_range(&mut self, person_id: PersonId, start: NaiveDate, end: NaiveDate, year: i32) {
        let (Some(year_start), Some(year_end)) = (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
        ) else {
            return;
        };

        let lo = start.max(year_start);
        let hi = end.min(year_end);
        if lo > hi {
            return;
        }

        let dates = self.by_person.entry(person_id).or_default();
        for day in lo.iter_days().take_while(|d| *d <= hi) {
            dates.insert(day);
        }
    }

    /// Whether any day of the inclusive range `[start, end]` is in the
    /// person's leave set. People with no recorded leave are never blocked.
    pub fn is_blocked(&self, person_id: PersonId, start: NaiveDate, end: NaiveDate) -> bool {
        match self.by_person.get(&person_id) {
            None => false,
            Some(dates) => start.iter_days().take_while(|d| *d <= end).any(|d| dates.contains(&d)),
        }
    }

    /// Number of people with at least one leave day recorded.
    pub fn len(&self) -> usize {
        self.by_person.len()
    }

    /// Whether no leave is recorded at all.
    pub fn is_empty(&self) -> bool {
        self.by_person.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn period(person_id: PersonId, start: NaiveDate, end: NaiveDate) -> PtoPeriod {
        PtoPeriod {
            id: 0,
            person_id,
            start_date: start,
            end_date: end,
            reason: None,
        }
    }

    #[test]
    fn empty_index_blocks_nobody() {
        let index = PtoIndex::new();
        assert!(!index.is_blocked(1, d(2025, 1, 1), d(2025, 1, 7)));
        assert!(index.is_empty());
    }

    #[test]
    fn any_overlapping_day_blocks_the_range() {
        let index = PtoIndex::from_periods(&[period(1, d(2025, 1, 10), d(2025, 1, 10))], 2025);
        // Single leave day in the middle of the slot, not on a boundary.
        assert!(index.is_blocked(1, d(2025, 1, 8), d(2025, 1, 14)));
        assert!(!index.is_blocked(1, d(2025, 1, 1), d(2025, 1, 7)));
        assert!(!index.is_blocked(2, d(2025, 1, 8), d(2025, 1, 14)));
    }

    #[test]
    fn periods_are_clipped_to_the_year() {
        // Leave spans the new year; only the 2025 portion is indexed.
        let index = PtoIndex::from_periods(&[period(1, d(2024, 12, 20), d(2025, 1, 3))], 2025);
        assert!(index.is_blocked(1, d(2025, 1, 1), d(2025, 1, 1)));
        assert!(index.is_blocked(1, d(2025, 1, 3), d(2025, 1, 5)));
        assert!(!index.is_blocked(1, d(2025, 1, 4), d(2025, 1, 10)));
    }

    #[test]
    fn period_outside_the_year_contributes_nothing() {
        let index = PtoIndex::from_periods(&[period(1, d(2024, 6, 1), d(2024, 6, 14))], 2025);
        assert!(index.is_empty());
    }

    #[test]
    fn overlapping_periods_merge() {
        let index = PtoIndex::from_periods(
            &[
                period(1, d(2025, 3, 1), d(2025, 3, 10)),
                period(1, d(2025, 3, 5), d(2025, 3, 15)),
            ],
            2025,
        );
        assert_eq!(index.len(), 1);
        assert!(index.is_blocked(1, d(2025, 3, 12), d(2025, 3, 12)));
        assert!(!index.is_blocked(1, d(2025, 3, 16), d(2025, 3, 20)));
    }
}
