//! Nurse roster record.
//!
//! # Invariants
//! - `name` is non-blank.
//! - Shift times are well-formed clock values; their order is not checked
//!   because overnight shifts end "before" they start.

use super::clock::ClockTime;
use super::{require_text, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type NurseId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NurseRole {
    #[serde(rename = "RN")]
    Rn,
    #[serde(rename = "LPN")]
    Lpn,
}

impl NurseRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rn => "RN",
            Self::Lpn => "LPN",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "RN" => Some(Self::Rn),
            "LPN" => Some(Self::Lpn),
            _ => None,
        }
    }
}

/// Working pattern used for roster grouping and float-nurse unit placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ShiftType {
    Early,
    Late,
    Single,
}

impl ShiftType {
    /// Display order of roster tabs.
    pub const ALL: [ShiftType; 3] = [ShiftType::Early, ShiftType::Late, ShiftType::Single];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Early => "Early",
            Self::Late => "Late",
            Self::Single => "Single",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Early" => Some(Self::Early),
            "Late" => Some(Self::Late),
            "Single" => Some(Self::Single),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nurse {
    pub id: NurseId,
    pub name: String,
    pub role: NurseRole,
    pub shift_start: ClockTime,
    pub shift_end: ClockTime,
    pub shift_type: ShiftType,
    /// Free text such as `Charge` or `Float`.
    pub special_role: Option<String>,
    pub date: NaiveDate,
}

impl Nurse {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.name, "name")
    }

    pub fn apply_patch(&mut self, patch: &NursePatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(shift_start) = patch.shift_start {
            self.shift_start = shift_start;
        }
        if let Some(shift_end) = patch.shift_end {
            self.shift_end = shift_end;
        }
        if let Some(shift_type) = patch.shift_type {
            self.shift_type = shift_type;
        }
        if let Some(special_role) = &patch.special_role {
            self.special_role = special_role.clone();
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNurse {
    pub name: String,
    pub role: NurseRole,
    pub shift_start: ClockTime,
    pub shift_end: ClockTime,
    pub shift_type: ShiftType,
    #[serde(default)]
    pub special_role: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl NewNurse {
    pub fn new(
        name: impl Into<String>,
        role: NurseRole,
        shift_type: ShiftType,
        shift_start: ClockTime,
        shift_end: ClockTime,
    ) -> Self {
        Self {
            name: name.into(),
            role,
            shift_start,
            shift_end,
            shift_type,
            special_role: None,
            date: None,
        }
    }

    pub fn on_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn into_record(self) -> Result<Nurse, ValidationError> {
        let date = self.date.ok_or(ValidationError::MissingDate)?;
        let nurse = Nurse {
            id: Uuid::new_v4(),
            name: self.name,
            role: self.role,
            shift_start: self.shift_start,
            shift_end: self.shift_end,
            shift_type: self.shift_type,
            special_role: self.special_role.filter(|value| !value.trim().is_empty()),
            date,
        };
        nurse.validate()?;
        Ok(nurse)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NursePatch {
    pub name: Option<String>,
    pub role: Option<NurseRole>,
    pub shift_start: Option<ClockTime>,
    pub shift_end: Option<ClockTime>,
    pub shift_type: Option<ShiftType>,
    pub special_role: Option<Option<String>>,
    pub date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::{NewNurse, NurseRole, ShiftType};
    use crate::model::clock::ClockTime;
    use chrono::NaiveDate;

    #[test]
    fn overnight_shift_is_accepted() {
        let nurse = NewNurse::new(
            "Ruby",
            NurseRole::Rn,
            ShiftType::Late,
            ClockTime::parse("19:00").unwrap(),
            ClockTime::parse("07:00").unwrap(),
        )
        .on_date(NaiveDate::from_ymd_opt(2025, 3, 4).unwrap())
        .into_record()
        .unwrap();
        assert!(nurse.shift_end < nurse.shift_start);
    }

    #[test]
    fn roles_serialize_with_license_abbreviations() {
        assert_eq!(serde_json::to_string(&NurseRole::Lpn).unwrap(), "\"LPN\"");
        let role: NurseRole = serde_json::from_str("\"RN\"").unwrap();
        assert_eq!(role, NurseRole::Rn);
    }
}
