//! Hour-by-OR time grid for the assignments page.
//!
//! # Invariants
//! - The grid has 25 hour rows labelled `00:00` through `24:00`; the last row
//!   never holds a surgery.
//! - A surgery lands in the row of its start hour and is offset inside the
//!   row proportionally to its start minute.

use crate::model::clock::ClockTime;
use crate::model::nurse::NurseId;
use crate::model::operating_room::{OperatingRoom, OrCategory};
use crate::model::surgery::Surgery;
use crate::service::schedule_service::ScheduleDraft;
use chrono::NaiveDate;
use serde::Serialize;

pub const HOUR_ROW_COUNT: u32 = 25;
pub const DEFAULT_HOUR_HEIGHT_PX: u32 = 120;

pub fn hour_labels() -> Vec<String> {
    (0..HOUR_ROW_COUNT).map(|hour| format!("{hour:02}:00")).collect()
}

/// Vertical position of `time` from the top of the grid.
pub fn position_px(time: ClockTime, hour_height_px: u32) -> f64 {
    f64::from(time.minutes_since_midnight()) / 60.0 * f64::from(hour_height_px)
}

/// Vertical position of `time` inside its hour row.
pub fn offset_in_hour_px(time: ClockTime, hour_height_px: u32) -> f64 {
    position_px(time, hour_height_px) % f64::from(hour_height_px)
}

/// Surgeries on `date` in OR `or_number` that start during `hour`.
pub fn surgeries_in_cell<'a>(
    surgeries: &'a [Surgery],
    or_number: &str,
    hour: u32,
    date: NaiveDate,
) -> Vec<&'a Surgery> {
    surgeries
        .iter()
        .filter(|surgery| {
            surgery.or_number == or_number
                && surgery.start_time.hour() == hour
                && surgery.date == date
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridColumn {
    pub or_number: String,
    pub category: OrCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedSurgery {
    pub surgery: Surgery,
    pub offset_px: f64,
    /// Drafted nurse for this OR/start slot.
    pub nurse_id: Option<NurseId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCell {
    pub or_number: String,
    pub surgeries: Vec<PlacedSurgery>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridRow {
    pub label: String,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeGrid {
    pub date: NaiveDate,
    pub columns: Vec<GridColumn>,
    pub rows: Vec<GridRow>,
}

impl TimeGrid {
    /// Every placed surgery, row-major.
    pub fn placed(&self) -> impl Iterator<Item = &PlacedSurgery> {
        self.rows
            .iter()
            .flat_map(|row| row.cells.iter())
            .flat_map(|cell| cell.surgeries.iter())
    }
}

/// Lays out `surgeries` for `date` across the `rooms` columns.
pub fn build_time_grid(
    rooms: &[OperatingRoom],
    surgeries: &[Surgery],
    draft: &ScheduleDraft,
    date: NaiveDate,
    hour_height_px: u32,
) -> TimeGrid {
    let columns = rooms
        .iter()
        .map(|room| GridColumn {
            or_number: room.number.clone(),
            category: room.category,
        })
        .collect::<Vec<_>>();

    let rows = hour_labels()
        .into_iter()
        .zip(0..HOUR_ROW_COUNT)
        .map(|(label, hour)| GridRow {
            label,
            cells: columns
                .iter()
                .map(|column| GridCell {
                    or_number: column.or_number.clone(),
                    surgeries: surgeries_in_cell(surgeries, &column.or_number, hour, date)
                        .into_iter()
                        .map(|surgery| PlacedSurgery {
                            offset_px: offset_in_hour_px(surgery.start_time, hour_height_px),
                            nurse_id: draft.nurse_for(&surgery.or_number, surgery.start_time),
                            surgery: surgery.clone(),
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();

    TimeGrid {
        date,
        columns,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::{hour_labels, offset_in_hour_px, position_px, surgeries_in_cell};
    use crate::model::clock::ClockTime;
    use crate::model::surgery::{NewSurgery, ProtocolLength};
    use chrono::NaiveDate;

    #[test]
    fn labels_cover_both_midnights() {
        let labels = hour_labels();
        assert_eq!(labels.len(), 25);
        assert_eq!(labels[0], "00:00");
        assert_eq!(labels[9], "09:00");
        assert_eq!(labels[24], "24:00");
    }

    #[test]
    fn position_scales_with_hour_height() {
        let time = ClockTime::parse("09:30").unwrap();
        assert_eq!(position_px(time, 120), 1140.0);
        assert_eq!(offset_in_hour_px(time, 120), 60.0);
        assert_eq!(offset_in_hour_px(ClockTime::parse("09:00").unwrap(), 120), 0.0);
    }

    #[test]
    fn cell_lookup_matches_or_hour_and_date() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        let other_day = day.succ_opt().unwrap();
        let surgeries = vec![
            NewSurgery::new("8", ProtocolLength::Short, ClockTime::parse("09:45").unwrap())
                .on_date(day)
                .into_record()
                .unwrap(),
            NewSurgery::new("8", ProtocolLength::Long, ClockTime::parse("10:00").unwrap())
                .on_date(day)
                .into_record()
                .unwrap(),
            NewSurgery::new("8", ProtocolLength::Long, ClockTime::parse("09:00").unwrap())
                .on_date(other_day)
                .into_record()
                .unwrap(),
        ];

        let hits = surgeries_in_cell(&surgeries, "8", 9, day);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, surgeries[0].id);
        assert!(surgeries_in_cell(&surgeries, "9", 9, day).is_empty());
    }
}
