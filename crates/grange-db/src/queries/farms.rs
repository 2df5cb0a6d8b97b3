//! Farm registry query functions.
//!
//! The farms table is append-only: rows are inserted with explicitly
//! assigned sequential ids and never deleted. Mutations touch single
//! columns of existing rows.

use grange_types::farm::FarmRecord;
use grange_types::{AccountId, Amount, FarmId};
use rusqlite::Connection;

use crate::{DbError, Result};

/// The next id in the sequence, starting from 0.
pub fn next_farm_id(conn: &Connection) -> Result<FarmId> {
    let next: i64 = conn.query_row(
        "SELECT COALESCE(MAX(farm_id) + 1, 0) FROM farms",
        [],
        |row| row.get(0),
    )?;
    Ok(next as u64)
}

/// Insert a farm row with its pre-assigned id.
pub fn insert(conn: &Connection, farm: &FarmRecord) -> Result<()> {
    conn.execute(
        "INSERT INTO farms (farm_id, reward_token, signer, pool, active,
                            total_claimable, total_claimed, reward_per_block)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        rusqlite::params![
            farm.farm_id as i64,
            farm.reward_token.as_slice(),
            farm.signer.as_slice(),
            farm.pool.as_slice(),
            farm.active,
            farm.total_claimable as i64,
            farm.total_claimed as i64,
            farm.reward_per_block as i64,
        ],
    )?;
    Ok(())
}

fn row_to_farm(row: &rusqlite::Row<'_>) -> rusqlite::Result<FarmRecord> {
    Ok(FarmRecord {
        farm_id: row.get::<_, i64>(0)? as u64,
        reward_token: row.get(1)?,
        signer: row.get(2)?,
        pool: row.get(3)?,
        active: row.get(4)?,
        total_claimable: row.get::<_, i64>(5)? as u64,
        total_claimed: row.get::<_, i64>(6)? as u64,
        reward_per_block: row.get::<_, i64>(7)? as u64,
    })
}

/// Fetch a farm by id.
pub fn get(conn: &Connection, farm_id: FarmId) -> Result<Option<FarmRecord>> {
    let mut stmt = conn.prepare(
        "SELECT farm_id, reward_token, signer, pool, active,
                total_claimable, total_claimed, reward_per_block
         FROM farms WHERE farm_id = ?1",
    )?;

    let mut rows = stmt.query([farm_id as i64])?;
    match rows.next()? {
        Some(row) => Ok(Some(row_to_farm(row)?)),
        None => Ok(None),
    }
}

/// Number of farms ever registered.
pub fn count(conn: &Connection) -> Result<u64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM farms", [], |row| row.get(0))?;
    Ok(count as u64)
}

/// All farms in registration order.
pub fn list(conn: &Connection) -> Result<Vec<FarmRecord>> {
    let mut stmt = conn.prepare(
        "SELECT farm_id, reward_token, signer, pool, active,
                total_claimable, total_claimed, reward_per_block
         FROM farms ORDER BY farm_id",
    )?;

    let rows = stmt
        .query_map([], row_to_farm)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Flip a farm's active flag.
pub fn set_active(conn: &Connection, farm_id: FarmId, active: bool) -> Result<()> {
    let updated = conn.execute(
        "UPDATE farms SET active = ?1 WHERE farm_id = ?2",
        rusqlite::params![active, farm_id as i64],
    )?;
    if updated == 0 {
        return Err(DbError::NotFound("farm not found".into()));
    }
    Ok(())
}

/// Replace a farm's voucher signer.
pub fn set_signer(conn: &Connection, farm_id: FarmId, signer: &AccountId) -> Result<()> {
    let updated = conn.execute(
        "UPDATE farms SET signer = ?1 WHERE farm_id = ?2",
        rusqlite::params![signer.as_slice(), farm_id as i64],
    )?;
    if updated == 0 {
        return Err(DbError::NotFound("farm not found".into()));
    }
    Ok(())
}

/// Replace a farm's advertised emission rate.
pub fn set_reward_per_block(conn: &Connection, farm_id: FarmId, rate: Amount) -> Result<()> {
    let updated = conn.execute(
        "UPDATE farms SET reward_per_block = ?1 WHERE farm_id = ?2",
        rusqlite::params![rate as i64, farm_id as i64],
    )?;
    if updated == 0 {
        return Err(DbError::NotFound("farm not found".into()));
    }
    Ok(())
}

/// Overwrite a farm's cumulative deposit total.
///
/// Callers compute the new total with checked arithmetic; this function
/// only persists it.
pub fn set_total_claimable(conn: &Connection, farm_id: FarmId, total: Amount) -> Result<()> {
    let updated = conn.execute(
        "UPDATE farms SET total_claimable = ?1 WHERE farm_id = ?2",
        rusqlite::params![total as i64, farm_id as i64],
    )?;
    if updated == 0 {
        return Err(DbError::NotFound("farm not found".into()));
    }
    Ok(())
}

/// Overwrite a farm's cumulative payout total.
pub fn set_total_claimed(conn: &Connection, farm_id: FarmId, total: Amount) -> Result<()> {
    let updated = conn.execute(
        "UPDATE farms SET total_claimed = ?1 WHERE farm_id = ?2",
        rusqlite::params![total as i64, farm_id as i64],
    )?;
    if updated == 0 {
        return Err(DbError::NotFound("farm not found".into()));
    }
    Ok(())
}
