//! Surgery list record.
//!
//! `or_number` is a loose text reference; a surgery may point at an OR that
//! does not exist on the roster.

use super::clock::ClockTime;
use super::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type SurgeryId = Uuid;

/// Coarse duration class. Not used in any timing computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolLength {
    Short,
    Long,
}

impl ProtocolLength {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Long => "long",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "short" => Some(Self::Short),
            "long" => Some(Self::Long),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Surgery {
    pub id: SurgeryId,
    pub or_number: String,
    pub protocol_length: ProtocolLength,
    pub start_time: ClockTime,
    pub description: String,
    pub date: NaiveDate,
    pub specialty: String,
}

impl Surgery {
    pub fn apply_patch(&mut self, patch: &SurgeryPatch) {
        if let Some(or_number) = &patch.or_number {
            self.or_number = or_number.clone();
        }
        if let Some(protocol_length) = patch.protocol_length {
            self.protocol_length = protocol_length;
        }
        if let Some(start_time) = patch.start_time {
            self.start_time = start_time;
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(specialty) = &patch.specialty {
            self.specialty = specialty.clone();
        }
    }
}

/// Creation input. The add-surgery form only supplies OR number, protocol
/// length and start time, so the text fields default to empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSurgery {
    pub or_number: String,
    pub protocol_length: ProtocolLength,
    pub start_time: ClockTime,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub specialty: String,
}

impl NewSurgery {
    pub fn new(
        or_number: impl Into<String>,
        protocol_length: ProtocolLength,
        start_time: ClockTime,
    ) -> Self {
        Self {
            or_number: or_number.into(),
            protocol_length,
            start_time,
            description: String::new(),
            date: None,
            specialty: String::new(),
        }
    }

    pub fn on_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_specialty(mut self, specialty: impl Into<String>) -> Self {
        self.specialty = specialty.into();
        self
    }

    pub fn into_record(self) -> Result<Surgery, ValidationError> {
        let date = self.date.ok_or(ValidationError::MissingDate)?;
        Ok(Surgery {
            id: Uuid::new_v4(),
            or_number: self.or_number,
            protocol_length: self.protocol_length,
            start_time: self.start_time,
            description: self.description,
            date,
            specialty: self.specialty,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurgeryPatch {
    pub or_number: Option<String>,
    pub protocol_length: Option<ProtocolLength>,
    pub start_time: Option<ClockTime>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub specialty: Option<String>,
}
