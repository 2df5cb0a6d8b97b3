//! Schema versioning.
//!
//! The schema version lives in `PRAGMA user_version`. Version 1 creates
//! the full schema; later versions may only add tables, columns, or
//! indexes, and existing columns keep their meaning. A database written
//! by a newer build is refused rather than reinterpreted.

use rusqlite::Connection;

use crate::{schema, DbError, Result, SCHEMA_VERSION};

/// Bring a database up to [`SCHEMA_VERSION`].
pub fn run(conn: &Connection) -> Result<()> {
    let found: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    if found > SCHEMA_VERSION {
        return Err(DbError::Migration(format!(
            "database is at v{found}, this build supports up to v{SCHEMA_VERSION}"
        )));
    }

    if found == 0 {
        tracing::info!("creating ledger schema v{SCHEMA_VERSION}");
        conn.execute_batch(schema::SCHEMA_V1)?;
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        return Ok(());
    }

    for version in (found + 1)..=SCHEMA_VERSION {
        tracing::info!("migrating ledger schema to v{version}");
        apply(conn, version)?;
        conn.pragma_update(None, "user_version", version)?;
    }
    Ok(())
}

fn apply(_conn: &Connection, version: u32) -> Result<()> {
    match version {
        // v2 and later land here.
        _ => Err(DbError::Migration(format!(
            "no migration defined for v{version}"
        ))),
    }
}
