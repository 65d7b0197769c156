//! Surgery list repository contract and SQLite implementation.

use super::{date_to_db, read_clock, read_date, read_enum, read_uuid, RepoError, RepoResult};
use crate::model::surgery::{ProtocolLength, Surgery, SurgeryId};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const TABLE: &str = "surgeries";
const ENTITY: &str = "surgery";

const SURGERY_SELECT_SQL: &str = "SELECT
    id,
    or_number,
    protocol_length,
    start_time,
    description,
    date,
    specialty
FROM surgeries";

#[derive(Debug, Clone, Default)]
pub struct SurgeryListQuery {
    pub date: Option<NaiveDate>,
    pub or_number: Option<String>,
}

pub trait SurgeryRepository {
    fn create_surgery(&self, surgery: &Surgery) -> RepoResult<SurgeryId>;
    fn update_surgery(&self, surgery: &Surgery) -> RepoResult<()>;
    fn get_surgery(&self, id: SurgeryId) -> RepoResult<Option<Surgery>>;
    fn list_surgeries(&self, query: &SurgeryListQuery) -> RepoResult<Vec<Surgery>>;
    fn delete_surgery(&self, id: SurgeryId) -> RepoResult<()>;
    /// Whether at least one surgery is booked on `date`.
    fn has_surgeries_on(&self, date: NaiveDate) -> RepoResult<bool>;
}

pub struct SqliteSurgeryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSurgeryRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SurgeryRepository for SqliteSurgeryRepository<'_> {
    fn create_surgery(&self, surgery: &Surgery) -> RepoResult<SurgeryId> {
        self.conn.execute(
            "INSERT INTO surgeries (
                id,
                or_number,
                protocol_length,
                start_time,
                description,
                date,
                specialty
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                surgery.id.to_string(),
                surgery.or_number.as_str(),
                surgery.protocol_length.as_str(),
                surgery.start_time.to_string(),
                surgery.description.as_str(),
                date_to_db(surgery.date),
                surgery.specialty.as_str(),
            ],
        )?;

        Ok(surgery.id)
    }

    fn update_surgery(&self, surgery: &Surgery) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE surgeries
             SET
                or_number = ?1,
                protocol_length = ?2,
                start_time = ?3,
                description = ?4,
                date = ?5,
                specialty = ?6
             WHERE id = ?7;",
            params![
                surgery.or_number.as_str(),
                surgery.protocol_length.as_str(),
                surgery.start_time.to_string(),
                surgery.description.as_str(),
                date_to_db(surgery.date),
                surgery.specialty.as_str(),
                surgery.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: ENTITY,
                id: surgery.id,
            });
        }

        Ok(())
    }

    fn get_surgery(&self, id: SurgeryId) -> RepoResult<Option<Surgery>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SURGERY_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_surgery_row(row)?));
        }

        Ok(None)
    }

    fn list_surgeries(&self, query: &SurgeryListQuery) -> RepoResult<Vec<Surgery>> {
        let mut sql = format!("{SURGERY_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(date) = query.date {
            sql.push_str(" AND date = ?");
            bind_values.push(Value::Text(date_to_db(date)));
        }
        if let Some(or_number) = &query.or_number {
            sql.push_str(" AND or_number = ?");
            bind_values.push(Value::Text(or_number.clone()));
        }
        sql.push_str(" ORDER BY rowid ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut surgeries = Vec::new();
        while let Some(row) = rows.next()? {
            surgeries.push(parse_surgery_row(row)?);
        }

        Ok(surgeries)
    }

    fn delete_surgery(&self, id: SurgeryId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM surgeries WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: ENTITY, id });
        }

        Ok(())
    }

    fn has_surgeries_on(&self, date: NaiveDate) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM surgeries WHERE date = ?1);",
            [date_to_db(date)],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

fn parse_surgery_row(row: &Row<'_>) -> RepoResult<Surgery> {
    Ok(Surgery {
        id: read_uuid(row, TABLE, "id")?,
        or_number: row.get("or_number")?,
        protocol_length: read_enum(row, TABLE, "protocol_length", ProtocolLength::parse)?,
        start_time: read_clock(row, TABLE, "start_time")?,
        description: row.get("description")?,
        date: read_date(row, TABLE, "date")?,
        specialty: row.get("specialty")?,
    })
}
