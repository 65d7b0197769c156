//! Nurse roster repository contract and SQLite implementation.

use super::{date_to_db, read_clock, read_date, read_enum, read_uuid, RepoError, RepoResult};
use crate::model::nurse::{Nurse, NurseId, NurseRole, ShiftType};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const TABLE: &str = "nurses";
const ENTITY: &str = "nurse";

const NURSE_SELECT_SQL: &str = "SELECT
    id,
    name,
    role,
    shift_start,
    shift_end,
    shift_type,
    special_role,
    date
FROM nurses";

#[derive(Debug, Clone, Default)]
pub struct NurseListQuery {
    pub date: Option<NaiveDate>,
    pub shift_type: Option<ShiftType>,
}

pub trait NurseRepository {
    fn create_nurse(&self, nurse: &Nurse) -> RepoResult<NurseId>;
    fn update_nurse(&self, nurse: &Nurse) -> RepoResult<()>;
    fn get_nurse(&self, id: NurseId) -> RepoResult<Option<Nurse>>;
    fn list_nurses(&self, query: &NurseListQuery) -> RepoResult<Vec<Nurse>>;
    fn delete_nurse(&self, id: NurseId) -> RepoResult<()>;
}

pub struct SqliteNurseRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNurseRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl NurseRepository for SqliteNurseRepository<'_> {
    fn create_nurse(&self, nurse: &Nurse) -> RepoResult<NurseId> {
        nurse.validate()?;

        self.conn.execute(
            "INSERT INTO nurses (
                id,
                name,
                role,
                shift_start,
                shift_end,
                shift_type,
                special_role,
                date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                nurse.id.to_string(),
                nurse.name.as_str(),
                nurse.role.as_str(),
                nurse.shift_start.to_string(),
                nurse.shift_end.to_string(),
                nurse.shift_type.as_str(),
                nurse.special_role.as_deref(),
                date_to_db(nurse.date),
            ],
        )?;

        Ok(nurse.id)
    }

    fn update_nurse(&self, nurse: &Nurse) -> RepoResult<()> {
        nurse.validate()?;

        let changed = self.conn.execute(
            "UPDATE nurses
             SET
                name = ?1,
                role = ?2,
                shift_start = ?3,
                shift_end = ?4,
                shift_type = ?5,
                special_role = ?6,
                date = ?7
             WHERE id = ?8;",
            params![
                nurse.name.as_str(),
                nurse.role.as_str(),
                nurse.shift_start.to_string(),
                nurse.shift_end.to_string(),
                nurse.shift_type.as_str(),
                nurse.special_role.as_deref(),
                date_to_db(nurse.date),
                nurse.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: ENTITY,
                id: nurse.id,
            });
        }

        Ok(())
    }

    fn get_nurse(&self, id: NurseId) -> RepoResult<Option<Nurse>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NURSE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_nurse_row(row)?));
        }

        Ok(None)
    }

    fn list_nurses(&self, query: &NurseListQuery) -> RepoResult<Vec<Nurse>> {
        let mut sql = format!("{NURSE_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(date) = query.date {
            sql.push_str(" AND date = ?");
            bind_values.push(Value::Text(date_to_db(date)));
        }
        if let Some(shift_type) = query.shift_type {
            sql.push_str(" AND shift_type = ?");
            bind_values.push(Value::Text(shift_type.as_str().to_string()));
        }
        sql.push_str(" ORDER BY rowid ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut nurses = Vec::new();
        while let Some(row) = rows.next()? {
            nurses.push(parse_nurse_row(row)?);
        }

        Ok(nurses)
    }

    fn delete_nurse(&self, id: NurseId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM nurses WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: ENTITY, id });
        }

        Ok(())
    }
}

fn parse_nurse_row(row: &Row<'_>) -> RepoResult<Nurse> {
    let nurse = Nurse {
        id: read_uuid(row, TABLE, "id")?,
        name: row.get("name")?,
        role: read_enum(row, TABLE, "role", NurseRole::parse)?,
        shift_start: read_clock(row, TABLE, "shift_start")?,
        shift_end: read_clock(row, TABLE, "shift_end")?,
        shift_type: read_enum(row, TABLE, "shift_type", ShiftType::parse)?,
        special_role: row.get("special_role")?,
        date: read_date(row, TABLE, "date")?,
    };
    nurse.validate()?;
    Ok(nurse)
}
