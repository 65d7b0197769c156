//! Month view for the date picker.
//!
//! Weeks start on Sunday. Days with at least one surgery are flagged so the
//! picker can highlight them.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub is_selected: bool,
    pub has_surgeries: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    /// Blank cells before day 1 (weekday of the 1st, Sunday = 0).
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

/// Builds the month grid. Returns `None` for an invalid `year`/`month`.
pub fn month_view(
    year: i32,
    month: u32,
    selected: NaiveDate,
    surgery_dates: &HashSet<NaiveDate>,
) -> Option<CalendarMonth> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let (next_year, next_month) = next_month(year, month);
    let days_in_month = NaiveDate::from_ymd_opt(next_year, next_month, 1)?
        .signed_duration_since(first)
        .num_days();

    let days = first
        .iter_days()
        .take(days_in_month as usize)
        .map(|date| CalendarDay {
            date,
            is_selected: date == selected,
            has_surgeries: surgery_dates.contains(&date),
        })
        .collect();

    Some(CalendarMonth {
        year,
        month,
        leading_blanks: first.weekday().num_days_from_sunday(),
        days,
    })
}

pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::{month_view, next_month, previous_month};
    use chrono::NaiveDate;
    use std::collections::HashSet;

    #[test]
    fn leap_february_layout() {
        let selected = NaiveDate::from_ymd_opt(2024, 2, 14).unwrap();
        let busy = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let view = month_view(2024, 2, selected, &HashSet::from([busy])).unwrap();

        // 2024-02-01 was a Thursday.
        assert_eq!(view.leading_blanks, 4);
        assert_eq!(view.days.len(), 29);
        assert!(view.days[13].is_selected);
        assert!(view.days[28].has_surgeries);
        assert_eq!(view.days.iter().filter(|day| day.has_surgeries).count(), 1);
    }

    #[test]
    fn navigation_wraps_years() {
        assert_eq!(previous_month(2025, 1), (2024, 12));
        assert_eq!(next_month(2025, 12), (2026, 1));
        assert_eq!(next_month(2025, 6), (2025, 7));
    }

    #[test]
    fn invalid_month_is_rejected() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert!(month_view(2025, 13, today, &HashSet::new()).is_none());
    }
}
