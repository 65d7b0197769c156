//! Floor-based OR groups for the assignment grid tabs.
//!
//! Each floor shows a fixed window of its ORs (in roster order). ORs beyond
//! the last window of a floor are not shown on the grid.

use crate::model::operating_room::{OperatingRoom, OrFloor};
use serde::Serialize;

struct GroupWindow {
    label: &'static str,
    floor: OrFloor,
    start: usize,
    end: usize,
}

const GROUP_WINDOWS: [GroupWindow; 4] = [
    GroupWindow {
        label: "Third Floor (1-9)",
        floor: OrFloor::Third,
        start: 0,
        end: 9,
    },
    GroupWindow {
        label: "Third Floor (10-15)",
        floor: OrFloor::Third,
        start: 9,
        end: 15,
    },
    GroupWindow {
        label: "Second Floor (1-9)",
        floor: OrFloor::Second,
        start: 0,
        end: 9,
    },
    GroupWindow {
        label: "Second Floor (10-12)",
        floor: OrFloor::Second,
        start: 9,
        end: 12,
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrGroup {
    pub label: &'static str,
    pub rooms: Vec<OperatingRoom>,
}

/// Splits `rooms` into the four grid tabs. Always returns four groups.
pub fn or_groups(rooms: &[OperatingRoom]) -> Vec<OrGroup> {
    GROUP_WINDOWS
        .iter()
        .map(|window| OrGroup {
            label: window.label,
            rooms: rooms
                .iter()
                .filter(|room| room.floor == window.floor)
                .skip(window.start)
                .take(window.end - window.start)
                .cloned()
                .collect(),
        })
        .collect()
}

/// The "view all" column set: every grouped OR, tab by tab.
pub fn all_grouped_rooms(groups: &[OrGroup]) -> Vec<OperatingRoom> {
    groups
        .iter()
        .flat_map(|group| group.rooms.iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{all_grouped_rooms, or_groups};
    use crate::model::operating_room::{NewOperatingRoom, OperatingRoom, OrCategory, OrFloor};
    use chrono::NaiveDate;

    fn rooms(floor: OrFloor, count: usize, prefix: &str) -> Vec<OperatingRoom> {
        let date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        (1..=count)
            .map(|n| {
                NewOperatingRoom::new(format!("{prefix}{n}"), floor, OrCategory::GenSurg)
                    .on_date(date)
                    .into_record()
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn windows_cap_each_floor() {
        let mut all = rooms(OrFloor::Third, 17, "3-");
        all.extend(rooms(OrFloor::Second, 4, "2-"));

        let groups = or_groups(&all);
        let sizes: Vec<usize> = groups.iter().map(|group| group.rooms.len()).collect();
        assert_eq!(sizes, vec![9, 6, 4, 0]);
        assert_eq!(groups[1].rooms[0].number, "3-10");
        assert_eq!(groups[1].rooms[5].number, "3-15");
        assert_eq!(all_grouped_rooms(&groups).len(), 19);
    }

    #[test]
    fn empty_roster_still_yields_four_labelled_groups() {
        let groups = or_groups(&[]);
        let labels: Vec<&str> = groups.iter().map(|group| group.label).collect();
        assert_eq!(
            labels,
            vec![
                "Third Floor (1-9)",
                "Third Floor (10-15)",
                "Second Floor (1-9)",
                "Second Floor (10-12)"
            ]
        );
        assert!(groups.iter().all(|group| group.rooms.is_empty()));
    }
}
