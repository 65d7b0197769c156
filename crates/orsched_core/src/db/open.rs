//! Connection bootstrap for the session store.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - Returned connections have migrations fully applied.

use super::migrations::apply_migrations;
use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens a fresh in-memory store for one dashboard session.
///
/// # Side effects
/// - Emits one `db_open` start event and one outcome event with duration.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=memory");

    let result = Connection::open_in_memory()
        .map_err(Into::into)
        .and_then(|mut conn| prepare_connection(&mut conn).map(|applied| (conn, applied)));

    let duration_ms = started_at.elapsed().as_millis();
    match result {
        Ok((conn, applied)) => {
            info!(
                "event=db_open module=db status=ok mode=memory duration_ms={duration_ms} migrations_applied={applied}"
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=memory duration_ms={duration_ms} error={err}"
            );
            Err(err)
        }
    }
}

/// Sets session pragmas on `conn` and migrates it. Returns the number of
/// schema steps applied.
pub fn prepare_connection(conn: &mut Connection) -> DbResult<usize> {
    conn.pragma_update(None, "foreign_keys", true)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)
}
