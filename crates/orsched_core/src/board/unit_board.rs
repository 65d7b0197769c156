//! Recovery-unit board (JP2 / JP3) built from the shared assignment list.
//!
//! # Invariants
//! - Assignments whose nurse is not on the roster are skipped.
//! - OR numbers prefixed `3-` belong to JP3; everything else to JP2.
//! - A nurse with no assignment is a float nurse: Early shift floats on JP2,
//!   every other shift on JP3.

use crate::model::assignment::Assignment;
use crate::model::nurse::{Nurse, ShiftType};
use crate::model::surgery::Surgery;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Placeholder shown where a value has not been decided yet.
pub const TO_BE_DECIDED: &str = "TBD";

const JP3_OR_PREFIX: &str = "3-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Unit {
    #[serde(rename = "JP2")]
    Jp2,
    #[serde(rename = "JP3")]
    Jp3,
}

impl Unit {
    pub const ALL: [Unit; 2] = [Unit::Jp2, Unit::Jp3];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jp2 => "JP2",
            Self::Jp3 => "JP3",
        }
    }

    pub fn for_or_number(or_number: &str) -> Self {
        if or_number.starts_with(JP3_OR_PREFIX) {
            Self::Jp3
        } else {
            Self::Jp2
        }
    }

    fn for_float(shift_type: ShiftType) -> Self {
        match shift_type {
            ShiftType::Early => Self::Jp2,
            ShiftType::Late | ShiftType::Single => Self::Jp3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardRow {
    pub bay: String,
    pub nurse: String,
    pub break_time: Option<String>,
    pub service: String,
    pub or_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FloatNurse {
    pub name: String,
    pub break_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitBoard {
    pub unit: Unit,
    pub rows: Vec<BoardRow>,
    pub float_nurses: Vec<FloatNurse>,
}

/// Builds the board of one unit. Row and float order follow input order.
pub fn build_unit_board(
    unit: Unit,
    assignments: &[Assignment],
    nurses: &[Nurse],
    surgeries: &[Surgery],
) -> UnitBoard {
    let nurses_by_id: HashMap<_, _> = nurses.iter().map(|nurse| (nurse.id, nurse)).collect();
    let specialty_by_surgery: HashMap<_, _> = surgeries
        .iter()
        .filter(|surgery| !surgery.specialty.trim().is_empty())
        .map(|surgery| (surgery.id, surgery.specialty.as_str()))
        .collect();

    let rows = assignments
        .iter()
        .filter(|assignment| Unit::for_or_number(&assignment.or_number) == unit)
        .filter_map(|assignment| {
            let nurse = nurses_by_id.get(&assignment.nurse_id)?;
            Some(BoardRow {
                bay: assignment.or_number.clone(),
                nurse: nurse.name.clone(),
                break_time: None,
                service: specialty_by_surgery
                    .get(&assignment.surgery_id)
                    .map_or_else(|| TO_BE_DECIDED.to_string(), |value| value.to_string()),
                or_number: Some(assignment.or_number.clone()),
            })
        })
        .collect();

    let assigned: HashSet<_> = assignments
        .iter()
        .map(|assignment| assignment.nurse_id)
        .collect();
    let float_nurses = nurses
        .iter()
        .filter(|nurse| !assigned.contains(&nurse.id))
        .filter(|nurse| Unit::for_float(nurse.shift_type) == unit)
        .map(|nurse| FloatNurse {
            name: nurse.name.clone(),
            break_time: TO_BE_DECIDED.to_string(),
        })
        .collect();

    UnitBoard {
        unit,
        rows,
        float_nurses,
    }
}
