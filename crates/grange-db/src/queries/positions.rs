//! Position custody query functions.
//!
//! Row present means staked. Unstaking deletes the row; claim records in
//! the `claims` table survive it.

use grange_types::position::CustodyRecord;
use grange_types::{AccountId, PositionId};
use rusqlite::Connection;

use crate::{DbError, Result};

/// Record custody of a position.
pub fn insert(conn: &Connection, record: &CustodyRecord) -> Result<()> {
    conn.execute(
        "INSERT INTO positions (position_id, custodian, staked_at_block, staked_at_time)
         VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![
            record.position_id as i64,
            record.custodian.as_slice(),
            record.staked_at_block as i64,
            record.staked_at_time as i64,
        ],
    )?;
    Ok(())
}

/// Fetch the custody record for a position, if it is staked.
pub fn get(conn: &Connection, position_id: PositionId) -> Result<Option<CustodyRecord>> {
    let mut stmt = conn.prepare(
        "SELECT position_id, custodian, staked_at_block, staked_at_time
         FROM positions WHERE position_id = ?1",
    )?;

    let mut rows = stmt.query([position_id as i64])?;
    match rows.next()? {
        Some(row) => Ok(Some(CustodyRecord {
            position_id: row.get::<_, i64>(0)? as u64,
            custodian: row.get(1)?,
            staked_at_block: row.get::<_, i64>(2)? as u64,
            staked_at_time: row.get::<_, i64>(3)? as u64,
        })),
        None => Ok(None),
    }
}

/// Delete the custody record for a position.
pub fn remove(conn: &Connection, position_id: PositionId) -> Result<()> {
    let deleted = conn.execute(
        "DELETE FROM positions WHERE position_id = ?1",
        [position_id as i64],
    )?;
    if deleted == 0 {
        return Err(DbError::NotFound("position not staked".into()));
    }
    Ok(())
}

/// Number of positions currently in custody.
pub fn count(conn: &Connection) -> Result<u64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM positions", [], |row| row.get(0))?;
    Ok(count as u64)
}

/// All positions staked by one account, in staking order.
pub fn for_custodian(conn: &Connection, custodian: &AccountId) -> Result<Vec<CustodyRecord>> {
    let mut stmt = conn.prepare(
        "SELECT position_id, custodian, staked_at_block, staked_at_time
         FROM positions WHERE custodian = ?1 ORDER BY position_id",
    )?;

    let rows = stmt
        .query_map([custodian.as_slice()], |row| {
            Ok(CustodyRecord {
                position_id: row.get::<_, i64>(0)? as u64,
                custodian: row.get(1)?,
                staked_at_block: row.get::<_, i64>(2)? as u64,
                staked_at_time: row.get::<_, i64>(3)? as u64,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}
