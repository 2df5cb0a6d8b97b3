//! Position custody and claim records.

use serde::{Deserialize, Serialize};

use crate::{AccountId, Amount, BlockNumber, FarmId, PositionId};

/// Custody of one staked position token.
///
/// A position has at most one custodian at a time; the absence of a
/// custody record means "not staked". The record is created on stake and
/// deleted on unstake.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustodyRecord {
    /// Position-token id issued by the external position registry.
    pub position_id: PositionId,
    /// The account that staked the position and may act on it.
    pub custodian: AccountId,
    /// Block height at which the position was staked.
    pub staked_at_block: BlockNumber,
    /// Unix timestamp at which the position was staked.
    pub staked_at_time: u64,
}

/// Cumulative payout bookkeeping for one (position, farm) pair.
///
/// `total_claimed` is monotonically non-decreasing across harvests and is
/// never deleted, even after the position is unstaked. The surviving row
/// is the double-spend guard for re-presented vouchers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRecord {
    pub position_id: PositionId,
    pub farm_id: FarmId,
    /// Micro-units already paid to this position from this farm.
    pub total_claimed: Amount,
}
