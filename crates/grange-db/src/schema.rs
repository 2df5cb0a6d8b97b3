//! SQL schema definitions.

/// Complete schema for the grange v1 ledger database.
pub const SCHEMA_V1: &str = r#"
-- ============================================================
-- Instance identity & administration
-- ============================================================

CREATE TABLE IF NOT EXISTS instance (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    instance_id BLOB NOT NULL,
    chain_id INTEGER NOT NULL,
    admin BLOB NOT NULL,
    pending_admin BLOB,
    position_registry BLOB NOT NULL,
    created_at INTEGER NOT NULL
);

-- ============================================================
-- Farm registry (append-only, rows are never deleted)
-- ============================================================

CREATE TABLE IF NOT EXISTS farms (
    farm_id INTEGER PRIMARY KEY,
    reward_token BLOB NOT NULL,
    signer BLOB NOT NULL,
    pool BLOB NOT NULL,
    active INTEGER NOT NULL DEFAULT 1,
    total_claimable INTEGER NOT NULL DEFAULT 0,
    total_claimed INTEGER NOT NULL DEFAULT 0,
    reward_per_block INTEGER NOT NULL DEFAULT 0
);

-- ============================================================
-- Position custody (row present = staked)
-- ============================================================

CREATE TABLE IF NOT EXISTS positions (
    position_id INTEGER PRIMARY KEY,
    custodian BLOB NOT NULL,
    staked_at_block INTEGER NOT NULL,
    staked_at_time INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_positions_custodian ON positions(custodian);

-- ============================================================
-- Claim records (persist across unstake, monotonic)
-- ============================================================

CREATE TABLE IF NOT EXISTS claims (
    position_id INTEGER NOT NULL,
    farm_id INTEGER NOT NULL REFERENCES farms(farm_id),
    total_claimed INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (position_id, farm_id)
);

-- ============================================================
-- Event journal (append-only)
-- ============================================================

CREATE TABLE IF NOT EXISTS event_log (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    kind TEXT NOT NULL,
    farm_id INTEGER,
    position_id INTEGER,
    recorded_at INTEGER NOT NULL,
    payload TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_events_kind ON event_log(kind);
CREATE INDEX IF NOT EXISTS idx_events_farm ON event_log(farm_id) WHERE farm_id IS NOT NULL;
CREATE INDEX IF NOT EXISTS idx_events_position ON event_log(position_id) WHERE position_id IS NOT NULL;
"#;
