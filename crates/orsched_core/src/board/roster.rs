//! Roster page projections: nurses by shift and the paginated OR table.

use crate::model::nurse::{Nurse, ShiftType};
use crate::model::operating_room::{OperatingRoom, OrFloor};
use serde::Serialize;

pub const DEFAULT_OR_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftGroup {
    pub shift_type: ShiftType,
    pub nurses: Vec<Nurse>,
}

/// Groups nurses by shift type. Always returns Early, Late, Single in that
/// order, with empty groups kept.
pub fn group_by_shift(nurses: &[Nurse]) -> Vec<ShiftGroup> {
    ShiftType::ALL
        .into_iter()
        .map(|shift_type| ShiftGroup {
            shift_type,
            nurses: nurses
                .iter()
                .filter(|nurse| nurse.shift_type == shift_type)
                .cloned()
                .collect(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrManagementPage {
    pub total: usize,
    pub second_floor: usize,
    pub third_floor: usize,
    /// 1-based page actually shown.
    pub page: usize,
    /// `0` when there are no ORs at all.
    pub total_pages: usize,
    pub rooms: Vec<OperatingRoom>,
}

/// One page of the OR management table for a single date.
///
/// `requested_page` is clamped into `1..=max(total_pages, 1)`.
pub fn or_management_page(
    rooms_on_date: &[OperatingRoom],
    requested_page: usize,
    page_size: usize,
) -> OrManagementPage {
    let page_size = page_size.max(1);
    let total = rooms_on_date.len();
    let total_pages = total.div_ceil(page_size);
    let page = requested_page.clamp(1, total_pages.max(1));
    let floor_count = |floor: OrFloor| {
        rooms_on_date
            .iter()
            .filter(|room| room.floor == floor)
            .count()
    };

    OrManagementPage {
        total,
        second_floor: floor_count(OrFloor::Second),
        third_floor: floor_count(OrFloor::Third),
        page,
        total_pages,
        rooms: rooms_on_date
            .iter()
            .skip((page - 1) * page_size)
            .take(page_size)
            .cloned()
            .collect(),
    }
}
