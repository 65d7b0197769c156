//! Operating room roster record.
//!
//! # Invariants
//! - `number` is non-blank.
//! - `date` ties the OR entry to one scheduling day.
//! - Only active ORs appear on the assignment grid.

use super::{require_text, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type OrId = Uuid;

/// Building floor an OR sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrFloor {
    Second,
    Third,
}

impl OrFloor {
    pub const ALL: [OrFloor; 2] = [OrFloor::Second, OrFloor::Third];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Second => "Second",
            Self::Third => "Third",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Second" => Some(Self::Second),
            "Third" => Some(Self::Third),
            _ => None,
        }
    }
}

/// Surgical specialty an OR is booked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrCategory {
    Cardio,
    Thoracic,
    GenSurg,
    Ortho,
    Neuro,
    Other,
}

impl OrCategory {
    pub const ALL: [OrCategory; 6] = [
        OrCategory::Cardio,
        OrCategory::Thoracic,
        OrCategory::GenSurg,
        OrCategory::Ortho,
        OrCategory::Neuro,
        OrCategory::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cardio => "Cardio",
            Self::Thoracic => "Thoracic",
            Self::GenSurg => "GenSurg",
            Self::Ortho => "Ortho",
            Self::Neuro => "Neuro",
            Self::Other => "Other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingRoom {
    pub id: OrId,
    /// Display number, e.g. `8`, `RAD1` or `3-41`.
    pub number: String,
    pub floor: OrFloor,
    pub category: OrCategory,
    pub is_active: bool,
    pub date: NaiveDate,
    /// Recovery bay paired with this OR.
    pub pcu_bay: String,
    pub service: Option<String>,
}

impl OperatingRoom {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.number, "number")
    }

    /// Shallow merge: every `Some` field in `patch` replaces the current value.
    pub fn apply_patch(&mut self, patch: &OperatingRoomPatch) {
        if let Some(number) = &patch.number {
            self.number = number.clone();
        }
        if let Some(floor) = patch.floor {
            self.floor = floor;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(pcu_bay) = &patch.pcu_bay {
            self.pcu_bay = pcu_bay.clone();
        }
        if let Some(service) = &patch.service {
            self.service = service.clone();
        }
    }
}

/// Creation input for an OR. The store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOperatingRoom {
    pub number: String,
    pub floor: OrFloor,
    pub category: OrCategory,
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// `None` means "the session's selected date".
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub pcu_bay: String,
    #[serde(default)]
    pub service: Option<String>,
}

impl NewOperatingRoom {
    pub fn new(number: impl Into<String>, floor: OrFloor, category: OrCategory) -> Self {
        Self {
            number: number.into(),
            floor,
            category,
            is_active: true,
            date: None,
            pcu_bay: String::new(),
            service: None,
        }
    }

    pub fn on_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Builds the stored record with a fresh identifier.
    pub fn into_record(self) -> Result<OperatingRoom, ValidationError> {
        let date = self.date.ok_or(ValidationError::MissingDate)?;
        let room = OperatingRoom {
            id: Uuid::new_v4(),
            number: self.number,
            floor: self.floor,
            category: self.category,
            is_active: self.is_active,
            date,
            pcu_bay: self.pcu_bay,
            service: self.service.filter(|value| !value.trim().is_empty()),
        };
        room.validate()?;
        Ok(room)
    }
}

fn default_active() -> bool {
    true
}

/// Partial update for an OR.
///
/// `service: Some(None)` clears the service label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatingRoomPatch {
    pub number: Option<String>,
    pub floor: Option<OrFloor>,
    pub category: Option<OrCategory>,
    pub is_active: Option<bool>,
    pub date: Option<NaiveDate>,
    pub pcu_bay: Option<String>,
    pub service: Option<Option<String>>,
}

#[cfg(test)]
mod tests {
    use super::{NewOperatingRoom, OperatingRoomPatch, OrCategory, OrFloor};
    use crate::model::ValidationError;
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 4).unwrap()
    }

    #[test]
    fn into_record_requires_date_and_number() {
        let missing_date = NewOperatingRoom::new("8", OrFloor::Third, OrCategory::Ortho);
        assert_eq!(
            missing_date.into_record().unwrap_err(),
            ValidationError::MissingDate
        );

        let blank = NewOperatingRoom::new("  ", OrFloor::Third, OrCategory::Ortho).on_date(day());
        assert_eq!(
            blank.into_record().unwrap_err(),
            ValidationError::BlankField("number")
        );
    }

    #[test]
    fn patch_merges_only_present_fields() {
        let mut room = NewOperatingRoom::new("8", OrFloor::Third, OrCategory::Ortho)
            .on_date(day())
            .into_record()
            .unwrap();
        let before = room.clone();

        room.apply_patch(&OperatingRoomPatch {
            is_active: Some(false),
            service: Some(Some("Spine".to_string())),
            ..OperatingRoomPatch::default()
        });

        assert!(!room.is_active);
        assert_eq!(room.service.as_deref(), Some("Spine"));
        assert_eq!(room.number, before.number);
        assert_eq!(room.floor, before.floor);
        assert_eq!(room.date, before.date);
    }

    #[test]
    fn category_parse_matches_display_names() {
        for category in OrCategory::ALL {
            assert_eq!(OrCategory::parse(category.as_str()), Some(category));
        }
        assert_eq!(OrCategory::parse("cardio"), None);
    }
}
