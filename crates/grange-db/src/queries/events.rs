//! Event journal query functions.
//!
//! Append-only. Each state transition journals one event in the same
//! transaction that applies it, so the journal and the tables can never
//! disagree.

use grange_types::events::LedgerEvent;
use grange_types::FarmId;
use rusqlite::Connection;

use crate::{DbError, Result};

/// One journal entry as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    /// Position in the journal, assigned on append, strictly increasing.
    pub seq: u64,
    /// Unix timestamp the entry was recorded at.
    pub recorded_at: u64,
    pub event: LedgerEvent,
}

/// Append an event to the journal. Returns the assigned sequence number.
pub fn append(conn: &Connection, event: &LedgerEvent, recorded_at: u64) -> Result<u64> {
    let payload =
        serde_json::to_string(event).map_err(|e| DbError::Serialization(e.to_string()))?;
    conn.execute(
        "INSERT INTO event_log (kind, farm_id, position_id, recorded_at, payload)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![
            event.kind(),
            event.farm_id().map(|id| id as i64),
            event.position_id().map(|id| id as i64),
            recorded_at as i64,
            payload,
        ],
    )?;
    Ok(conn.last_insert_rowid() as u64)
}

/// Total number of journal entries.
pub fn count(conn: &Connection) -> Result<u64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM event_log", [], |row| row.get(0))?;
    Ok(count as u64)
}

fn decode(rows: Vec<(i64, i64, String)>) -> Result<Vec<JournalEntry>> {
    rows.into_iter()
        .map(|(seq, recorded_at, payload)| {
            let event = serde_json::from_str(&payload)
                .map_err(|e| DbError::Serialization(e.to_string()))?;
            Ok(JournalEntry {
                seq: seq as u64,
                recorded_at: recorded_at as u64,
                event,
            })
        })
        .collect()
}

/// Most recent entries, newest first.
pub fn recent(conn: &Connection, limit: u32) -> Result<Vec<JournalEntry>> {
    let mut stmt = conn.prepare(
        "SELECT seq, recorded_at, payload
         FROM event_log ORDER BY seq DESC LIMIT ?1",
    )?;

    let rows = stmt
        .query_map([limit], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get::<_, String>(2)?))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    decode(rows)
}

/// Entries concerning one farm, oldest first.
pub fn for_farm(conn: &Connection, farm_id: FarmId, limit: u32) -> Result<Vec<JournalEntry>> {
    let mut stmt = conn.prepare(
        "SELECT seq, recorded_at, payload
         FROM event_log WHERE farm_id = ?1 ORDER BY seq LIMIT ?2",
    )?;

    let rows = stmt
        .query_map(rusqlite::params![farm_id as i64, limit], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get::<_, String>(2)?))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    decode(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> Connection {
        crate::open_memory().expect("open test db")
    }

    #[test]
    fn test_append_assigns_increasing_seq() {
        let conn = test_db();
        let first = append(&conn, &LedgerEvent::FarmActivated { farm_id: 0 }, 100).expect("append");
        let second =
            append(&conn, &LedgerEvent::FarmDeactivated { farm_id: 0 }, 101).expect("append");
        assert!(second > first);
        assert_eq!(count(&conn).expect("count"), 2);
    }

    #[test]
    fn test_recent_newest_first() {
        let conn = test_db();
        append(&conn, &LedgerEvent::FarmActivated { farm_id: 0 }, 100).expect("append");
        append(&conn, &LedgerEvent::FarmDeactivated { farm_id: 0 }, 101).expect("append");

        let entries = recent(&conn, 10).expect("recent");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].event, LedgerEvent::FarmDeactivated { farm_id: 0 });
        assert_eq!(entries[1].event, LedgerEvent::FarmActivated { farm_id: 0 });
    }

    #[test]
    fn test_payload_roundtrip() {
        let conn = test_db();
        let event = LedgerEvent::RewardHarvested {
            custodian: [0xAB; 32],
            position_id: 7,
            farm_id: 2,
            amount: 1_000_000,
            block: 99,
            timestamp: 1_700_000_000,
        };
        append(&conn, &event, 1_700_000_000).expect("append");

        let entries = recent(&conn, 1).expect("recent");
        assert_eq!(entries[0].event, event);
        assert_eq!(entries[0].recorded_at, 1_700_000_000);
    }

    #[test]
    fn test_for_farm_filters_and_orders() {
        let conn = test_db();
        append(&conn, &LedgerEvent::FarmActivated { farm_id: 0 }, 100).expect("append");
        append(&conn, &LedgerEvent::FarmActivated { farm_id: 1 }, 101).expect("append");
        append(&conn, &LedgerEvent::FarmDeactivated { farm_id: 0 }, 102).expect("append");
        append(
            &conn,
            &LedgerEvent::PositionStaked {
                custodian: [0xAA; 32],
                position_id: 5,
                block: 10,
                timestamp: 103,
            },
            103,
        )
        .expect("append");

        let entries = for_farm(&conn, 0, 10).expect("for_farm");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].event, LedgerEvent::FarmActivated { farm_id: 0 });
        assert_eq!(entries[1].event, LedgerEvent::FarmDeactivated { farm_id: 0 });
    }
}
