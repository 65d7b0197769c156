//! Schedule generation and assignment draft editing.
//!
//! # Responsibility
//! - Produce a placeholder nurse-to-surgery assignment list.
//! - Hold edits in a draft until they are finalized into the shared list.
//!
//! # Invariants
//! - Generation picks one nurse per surgery uniformly at random from the
//!   whole nurse roster; no shift, skill or double-booking checks apply.
//! - Every generated slot lasts `slot_hours`, wrapping past midnight.
//! - A failed generation leaves the shared list untouched.

use crate::model::assignment::Assignment;
use crate::model::clock::ClockTime;
use crate::model::nurse::NurseId;
use crate::repo::assignment_repo::AssignmentRepository;
use crate::repo::nurse_repo::{NurseListQuery, NurseRepository};
use crate::repo::surgery_repo::{SurgeryListQuery, SurgeryRepository};
use crate::repo::{RepoError, RepoResult};
use log::{error, info, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Default length of one generated assignment slot.
pub const DEFAULT_SLOT_HOURS: u32 = 2;

#[derive(Debug)]
pub enum ScheduleError {
    /// Surgeries exist but the nurse roster is empty.
    NoNursesAvailable { surgeries: usize },
    Repo(RepoError),
}

impl Display for ScheduleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoNursesAvailable { surgeries } => write!(
                f,
                "cannot assign {surgeries} surgeries: no nurses on the roster"
            ),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ScheduleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NoNursesAvailable { .. } => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for ScheduleError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Editable working copy of the assignment list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScheduleDraft {
    assignments: Vec<Assignment>,
}

impl ScheduleDraft {
    pub fn new(assignments: Vec<Assignment>) -> Self {
        Self { assignments }
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Nurse currently drafted for the grid slot, if any.
    pub fn nurse_for(&self, or_number: &str, start_time: ClockTime) -> Option<NurseId> {
        self.assignments
            .iter()
            .find(|assignment| assignment.occupies(or_number, start_time))
            .map(|assignment| assignment.nurse_id)
    }

    /// Points every draft entry in slot `(or_number, start_time)` at `nurse_id`.
    ///
    /// Returns how many entries changed hands. The nurse id is not checked
    /// against the roster.
    pub fn reassign_nurse(
        &mut self,
        or_number: &str,
        start_time: ClockTime,
        nurse_id: NurseId,
    ) -> usize {
        let mut changed = 0;
        for assignment in self
            .assignments
            .iter_mut()
            .filter(|assignment| assignment.occupies(or_number, start_time))
        {
            assignment.nurse_id = nurse_id;
            changed += 1;
        }
        changed
    }

    pub fn into_assignments(self) -> Vec<Assignment> {
        self.assignments
    }
}

pub struct ScheduleService<N, S, A>
where
    N: NurseRepository,
    S: SurgeryRepository,
    A: AssignmentRepository,
{
    nurses: N,
    surgeries: S,
    assignments: A,
}

impl<N, S, A> ScheduleService<N, S, A>
where
    N: NurseRepository,
    S: SurgeryRepository,
    A: AssignmentRepository,
{
    pub fn new(nurses: N, surgeries: S, assignments: A) -> Self {
        Self {
            nurses,
            surgeries,
            assignments,
        }
    }

    /// Generates a fresh draft over every stored surgery and publishes it to
    /// the shared assignment list.
    ///
    /// # Errors
    /// - `NoNursesAvailable` when there is at least one surgery and no nurse.
    pub fn generate<G: Rng + ?Sized>(
        &self,
        rng: &mut G,
        slot_hours: u32,
    ) -> Result<ScheduleDraft, ScheduleError> {
        let started_at = Instant::now();
        let surgeries = self.surgeries.list_surgeries(&SurgeryListQuery::default())?;
        let nurses = self.nurses.list_nurses(&NurseListQuery::default())?;

        let mut assignments = Vec::with_capacity(surgeries.len());
        for surgery in &surgeries {
            let Some(nurse) = nurses.choose(rng) else {
                warn!(
                    "event=schedule_generate module=service status=error error_code=no_nurses surgeries={}",
                    surgeries.len()
                );
                return Err(ScheduleError::NoNursesAvailable {
                    surgeries: surgeries.len(),
                });
            };
            assignments.push(Assignment {
                nurse_id: nurse.id,
                surgery_id: surgery.id,
                or_number: surgery.or_number.clone(),
                start_time: surgery.start_time,
                end_time: surgery.start_time.add_hours(slot_hours),
            });
        }

        if let Err(err) = self.assignments.replace_assignments(&assignments) {
            error!(
                "event=schedule_generate module=service status=error error_code=publish_failed error={}",
                err
            );
            return Err(err.into());
        }

        info!(
            "event=schedule_generate module=service status=ok surgeries={} nurses={} slot_hours={} duration_ms={}",
            surgeries.len(),
            nurses.len(),
            slot_hours,
            started_at.elapsed().as_millis()
        );
        Ok(ScheduleDraft::new(assignments))
    }

    /// Saves the draft as the shared assignment list. Returns the saved count.
    pub fn finalize(&self, draft: &ScheduleDraft) -> Result<usize, ScheduleError> {
        self.assignments.replace_assignments(draft.assignments())?;
        info!(
            "event=assignments_finalize module=service status=ok assignments={}",
            draft.len()
        );
        Ok(draft.len())
    }

    /// Current shared assignment list.
    pub fn assignments(&self) -> RepoResult<Vec<Assignment>> {
        self.assignments.list_assignments()
    }

    /// Replaces the shared assignment list wholesale.
    pub fn set_assignments(&self, assignments: &[Assignment]) -> RepoResult<()> {
        self.assignments.replace_assignments(assignments)
    }
}

#[cfg(test)]
mod tests {
    use super::ScheduleDraft;
    use crate::model::assignment::Assignment;
    use crate::model::clock::ClockTime;
    use uuid::Uuid;

    fn slot(or_number: &str, start: &str) -> Assignment {
        let start_time = ClockTime::parse(start).unwrap();
        Assignment {
            nurse_id: Uuid::new_v4(),
            surgery_id: Uuid::new_v4(),
            or_number: or_number.to_string(),
            start_time,
            end_time: start_time.add_hours(2),
        }
    }

    #[test]
    fn reassign_touches_every_entry_in_the_slot_only() {
        let eight = ClockTime::parse("08:00").unwrap();
        let mut draft = ScheduleDraft::new(vec![
            slot("8", "08:00"),
            slot("8", "08:00"),
            slot("8", "10:00"),
            slot("9", "08:00"),
        ]);
        let untouched = draft.assignments()[2].nurse_id;
        let replacement = Uuid::new_v4();

        assert_eq!(draft.reassign_nurse("8", eight, replacement), 2);
        assert_eq!(draft.nurse_for("8", eight), Some(replacement));
        assert_eq!(draft.assignments()[1].nurse_id, replacement);
        assert_eq!(draft.assignments()[2].nurse_id, untouched);
        assert_ne!(draft.assignments()[3].nurse_id, replacement);
    }

    #[test]
    fn reassign_on_empty_slot_changes_nothing() {
        let mut draft = ScheduleDraft::new(vec![slot("8", "08:00")]);
        let before = draft.clone();
        let changed = draft.reassign_nurse("12", ClockTime::MIDNIGHT, Uuid::new_v4());
        assert_eq!(changed, 0);
        assert_eq!(draft, before);
    }
}
