//! Claim record query functions.
//!
//! A claim row is the cumulative payout for one (position, farm) pair.
//! Rows are created lazily on first harvest and never deleted; the stored
//! total only moves up.

use grange_types::position::ClaimRecord;
use grange_types::{Amount, FarmId, PositionId};
use rusqlite::Connection;

use crate::Result;

/// Fetch the claim record for a (position, farm) pair, if one exists.
pub fn get(
    conn: &Connection,
    position_id: PositionId,
    farm_id: FarmId,
) -> Result<Option<ClaimRecord>> {
    let mut stmt = conn.prepare(
        "SELECT position_id, farm_id, total_claimed
         FROM claims WHERE position_id = ?1 AND farm_id = ?2",
    )?;

    let mut rows = stmt.query([position_id as i64, farm_id as i64])?;
    match rows.next()? {
        Some(row) => Ok(Some(ClaimRecord {
            position_id: row.get::<_, i64>(0)? as u64,
            farm_id: row.get::<_, i64>(1)? as u64,
            total_claimed: row.get::<_, i64>(2)? as u64,
        })),
        None => Ok(None),
    }
}

/// Cumulative amount already paid to a position from a farm.
///
/// Zero when no claim row exists yet.
pub fn total_claimed(conn: &Connection, position_id: PositionId, farm_id: FarmId) -> Result<Amount> {
    let total: i64 = conn.query_row(
        "SELECT COALESCE(
            (SELECT total_claimed FROM claims WHERE position_id = ?1 AND farm_id = ?2), 0)",
        [position_id as i64, farm_id as i64],
        |row| row.get(0),
    )?;
    Ok(total as u64)
}

/// Record a new cumulative total for a (position, farm) pair.
///
/// Inserts the row on first harvest, overwrites it afterwards. Callers
/// enforce monotonicity before writing.
pub fn upsert(
    conn: &Connection,
    position_id: PositionId,
    farm_id: FarmId,
    total: Amount,
) -> Result<()> {
    conn.execute(
        "INSERT INTO claims (position_id, farm_id, total_claimed)
         VALUES (?1, ?2, ?3)
         ON CONFLICT (position_id, farm_id)
         DO UPDATE SET total_claimed = excluded.total_claimed",
        rusqlite::params![position_id as i64, farm_id as i64, total as i64],
    )?;
    Ok(())
}

/// All claim records for one position, in farm order.
pub fn for_position(conn: &Connection, position_id: PositionId) -> Result<Vec<ClaimRecord>> {
    let mut stmt = conn.prepare(
        "SELECT position_id, farm_id, total_claimed
         FROM claims WHERE position_id = ?1 ORDER BY farm_id",
    )?;

    let rows = stmt
        .query_map([position_id as i64], |row| {
            Ok(ClaimRecord {
                position_id: row.get::<_, i64>(0)? as u64,
                farm_id: row.get::<_, i64>(1)? as u64,
                total_claimed: row.get::<_, i64>(2)? as u64,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}
