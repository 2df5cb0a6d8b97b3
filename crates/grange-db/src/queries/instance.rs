//! Instance row query functions.
//!
//! The `instance` table holds exactly one row, written once at
//! initialization. Only the admin columns are ever updated.

use grange_types::instance::InstanceRecord;
use grange_types::AccountId;
use rusqlite::Connection;

use crate::{DbError, Result};

/// Fetch the instance row, if the ledger has been initialized.
pub fn get(conn: &Connection) -> Result<Option<InstanceRecord>> {
    let mut stmt = conn.prepare(
        "SELECT instance_id, chain_id, admin, pending_admin, position_registry, created_at
         FROM instance WHERE id = 1",
    )?;

    let mut rows = stmt.query([])?;
    match rows.next()? {
        Some(row) => Ok(Some(InstanceRecord {
            instance_id: row.get(0)?,
            chain_id: row.get::<_, i64>(1)? as u64,
            admin: row.get(2)?,
            pending_admin: row.get(3)?,
            position_registry: row.get(4)?,
            created_at: row.get::<_, i64>(5)? as u64,
        })),
        None => Ok(None),
    }
}

/// Write the instance row. Fails if one already exists.
pub fn insert(conn: &Connection, record: &InstanceRecord) -> Result<()> {
    conn.execute(
        "INSERT INTO instance (id, instance_id, chain_id, admin, pending_admin,
                               position_registry, created_at)
         VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![
            record.instance_id.as_slice(),
            record.chain_id as i64,
            record.admin.as_slice(),
            record.pending_admin.as_ref().map(|a| a.as_slice()),
            record.position_registry.as_slice(),
            record.created_at as i64,
        ],
    )?;
    Ok(())
}

/// Replace the administrator and clear any pending transfer.
pub fn update_admin(conn: &Connection, admin: &AccountId) -> Result<()> {
    let updated = conn.execute(
        "UPDATE instance SET admin = ?1, pending_admin = NULL WHERE id = 1",
        rusqlite::params![admin.as_slice()],
    )?;
    if updated == 0 {
        return Err(DbError::NotFound("instance not initialized".into()));
    }
    Ok(())
}

/// Set or clear the proposed next administrator.
pub fn update_pending_admin(conn: &Connection, pending: Option<&AccountId>) -> Result<()> {
    let updated = conn.execute(
        "UPDATE instance SET pending_admin = ?1 WHERE id = 1",
        rusqlite::params![pending.map(|a| a.as_slice())],
    )?;
    if updated == 0 {
        return Err(DbError::NotFound("instance not initialized".into()));
    }
    Ok(())
}
