//! Shared assignment list storage.
//!
//! # Invariants
//! - The list is replaced atomically; readers never observe a half-written set.
//! - Stored order equals the order of the last replacement.

use super::{read_clock, read_uuid, RepoResult};
use crate::model::assignment::Assignment;
use rusqlite::{params, Connection, Row};

const TABLE: &str = "assignments";

pub trait AssignmentRepository {
    fn replace_assignments(&self, assignments: &[Assignment]) -> RepoResult<()>;
    fn list_assignments(&self) -> RepoResult<Vec<Assignment>>;
}

pub struct SqliteAssignmentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAssignmentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AssignmentRepository for SqliteAssignmentRepository<'_> {
    fn replace_assignments(&self, assignments: &[Assignment]) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM assignments;", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO assignments (
                    position,
                    nurse_id,
                    surgery_id,
                    or_number,
                    start_time,
                    end_time
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            )?;
            for (position, assignment) in assignments.iter().enumerate() {
                stmt.execute(params![
                    position as i64,
                    assignment.nurse_id.to_string(),
                    assignment.surgery_id.to_string(),
                    assignment.or_number.as_str(),
                    assignment.start_time.to_string(),
                    assignment.end_time.to_string(),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn list_assignments(&self) -> RepoResult<Vec<Assignment>> {
        let mut stmt = self.conn.prepare(
            "SELECT nurse_id, surgery_id, or_number, start_time, end_time
             FROM assignments
             ORDER BY position ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut assignments = Vec::new();
        while let Some(row) = rows.next()? {
            assignments.push(parse_assignment_row(row)?);
        }
        Ok(assignments)
    }
}

fn parse_assignment_row(row: &Row<'_>) -> RepoResult<Assignment> {
    Ok(Assignment {
        nurse_id: read_uuid(row, TABLE, "nurse_id")?,
        surgery_id: read_uuid(row, TABLE, "surgery_id")?,
        or_number: row.get("or_number")?,
        start_time: read_clock(row, TABLE, "start_time")?,
        end_time: read_clock(row, TABLE, "end_time")?,
    })
}
