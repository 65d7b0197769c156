//! Domain model for the OR scheduling dashboard.
//!
//! # Responsibility
//! - Define the OR, nurse, surgery and assignment records.
//! - Provide creation inputs and shallow-merge patches for each record.
//!
//! # Invariants
//! - Every stored record is identified by a store-generated UUID.
//! - Cross-entity references (OR numbers, nurse ids in assignments) are loose
//!   text/ID references and are never checked for existence.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod assignment;
pub mod clock;
pub mod nurse;
pub mod operating_room;
pub mod surgery;

/// Shape validation failure for a record about to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty after trimming.
    BlankField(&'static str),
    /// A creation input reached the store without a calendar date.
    MissingDate,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "field `{field}` cannot be blank"),
            Self::MissingDate => write!(f, "record has no date"),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(())
}
