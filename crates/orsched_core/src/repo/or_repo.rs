//! OR roster repository contract and SQLite implementation.

use super::{
    bool_to_int, date_to_db, read_bool, read_date, read_enum, read_uuid, RepoError, RepoResult,
};
use crate::model::operating_room::{OperatingRoom, OrCategory, OrFloor, OrId};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const TABLE: &str = "operating_rooms";
const ENTITY: &str = "operating room";

const OR_SELECT_SQL: &str = "SELECT
    id,
    number,
    floor,
    category,
    is_active,
    date,
    pcu_bay,
    service
FROM operating_rooms";

/// Filter options for listing ORs. The default lists everything.
#[derive(Debug, Clone, Default)]
pub struct OrListQuery {
    pub date: Option<NaiveDate>,
    pub active_only: bool,
    pub floor: Option<OrFloor>,
}

pub trait OperatingRoomRepository {
    fn create_or(&self, room: &OperatingRoom) -> RepoResult<OrId>;
    fn update_or(&self, room: &OperatingRoom) -> RepoResult<()>;
    fn get_or(&self, id: OrId) -> RepoResult<Option<OperatingRoom>>;
    fn list_ors(&self, query: &OrListQuery) -> RepoResult<Vec<OperatingRoom>>;
    fn delete_or(&self, id: OrId) -> RepoResult<()>;
}

pub struct SqliteOperatingRoomRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteOperatingRoomRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl OperatingRoomRepository for SqliteOperatingRoomRepository<'_> {
    fn create_or(&self, room: &OperatingRoom) -> RepoResult<OrId> {
        room.validate()?;

        self.conn.execute(
            "INSERT INTO operating_rooms (
                id,
                number,
                floor,
                category,
                is_active,
                date,
                pcu_bay,
                service
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                room.id.to_string(),
                room.number.as_str(),
                room.floor.as_str(),
                room.category.as_str(),
                bool_to_int(room.is_active),
                date_to_db(room.date),
                room.pcu_bay.as_str(),
                room.service.as_deref(),
            ],
        )?;

        Ok(room.id)
    }

    fn update_or(&self, room: &OperatingRoom) -> RepoResult<()> {
        room.validate()?;

        let changed = self.conn.execute(
            "UPDATE operating_rooms
             SET
                number = ?1,
                floor = ?2,
                category = ?3,
                is_active = ?4,
                date = ?5,
                pcu_bay = ?6,
                service = ?7
             WHERE id = ?8;",
            params![
                room.number.as_str(),
                room.floor.as_str(),
                room.category.as_str(),
                bool_to_int(room.is_active),
                date_to_db(room.date),
                room.pcu_bay.as_str(),
                room.service.as_deref(),
                room.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: ENTITY,
                id: room.id,
            });
        }

        Ok(())
    }

    fn get_or(&self, id: OrId) -> RepoResult<Option<OperatingRoom>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{OR_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_or_row(row)?));
        }

        Ok(None)
    }

    fn list_ors(&self, query: &OrListQuery) -> RepoResult<Vec<OperatingRoom>> {
        let mut sql = format!("{OR_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(date) = query.date {
            sql.push_str(" AND date = ?");
            bind_values.push(Value::Text(date_to_db(date)));
        }
        if query.active_only {
            sql.push_str(" AND is_active = 1");
        }
        if let Some(floor) = query.floor {
            sql.push_str(" AND floor = ?");
            bind_values.push(Value::Text(floor.as_str().to_string()));
        }
        sql.push_str(" ORDER BY rowid ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut rooms = Vec::new();
        while let Some(row) = rows.next()? {
            rooms.push(parse_or_row(row)?);
        }

        Ok(rooms)
    }

    fn delete_or(&self, id: OrId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM operating_rooms WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: ENTITY, id });
        }

        Ok(())
    }
}

fn parse_or_row(row: &Row<'_>) -> RepoResult<OperatingRoom> {
    let room = OperatingRoom {
        id: read_uuid(row, TABLE, "id")?,
        number: row.get("number")?,
        floor: read_enum(row, TABLE, "floor", OrFloor::parse)?,
        category: read_enum(row, TABLE, "category", OrCategory::parse)?,
        is_active: read_bool(row, TABLE, "is_active")?,
        date: read_date(row, TABLE, "date")?,
        pcu_bay: row.get("pcu_bay")?,
        service: row.get("service")?,
    };
    room.validate()?;
    Ok(room)
}
