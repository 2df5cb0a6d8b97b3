//! # grange-types
//!
//! Shared domain types used across the Grange workspace.
//!
//! Grange is an incentive-distribution ledger: a pool operator funds
//! per-farm reward budgets, users stake externally-issued position tokens
//! into custody, and an off-process signer attests cumulative claimable
//! amounts that the ledger converts into incremental payouts.

pub mod events;
pub mod farm;
pub mod instance;
pub mod position;

/// An account identity: raw Ed25519 verifying-key bytes.
pub type AccountId = [u8; 32];
/// A reward-asset identity, resolved by the external token bank.
pub type AssetId = [u8; 32];
/// A liquidity-pool identity, opaque to the ledger.
pub type PoolId = [u8; 32];
/// The identity of one deployed ledger instance.
pub type InstanceId = [u8; 32];

/// Farm handle: assigned sequentially starting at 0, never reused.
pub type FarmId = u64;
/// Position-token id issued by the external position registry.
pub type PositionId = u64;
/// A reward amount in micro-units.
pub type Amount = u64;
/// A chain block height.
pub type BlockNumber = u64;

/// The all-zero id. Farm parameters must never be null; custody uses
/// row absence, never this sentinel.
pub const NULL_ID: [u8; 32] = [0u8; 32];

/// Micro-units per whole reward unit (1 unit = 100,000,000 micro-units).
pub const MICRO_UNITS_PER_UNIT: u64 = 100_000_000;
