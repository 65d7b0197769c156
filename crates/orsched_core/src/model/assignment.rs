//! Nurse-to-surgery assignment.
//!
//! Assignments are unvalidated pairings: they are never checked against the
//! nurse's shift window, nurse existence, or OR double booking.

use super::clock::ClockTime;
use super::nurse::NurseId;
use super::surgery::SurgeryId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub nurse_id: NurseId,
    pub surgery_id: SurgeryId,
    pub or_number: String,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
}

impl Assignment {
    /// Whether this assignment occupies the grid slot `(or_number, start_time)`.
    pub fn occupies(&self, or_number: &str, start_time: ClockTime) -> bool {
        self.or_number == or_number && self.start_time == start_time
    }
}
