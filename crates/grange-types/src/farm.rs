//! Farm records.

use serde::{Deserialize, Serialize};

use crate::{AccountId, Amount, AssetId, FarmId, PoolId};

/// A registered reward farm.
///
/// Farms are append-only: ids are assigned sequentially and a farm is
/// never deleted. Deactivation is the only retirement path, and it gates
/// harvesting alone: staking, unstaking, deposits, and administrative
/// reconfiguration stay available on an inactive farm.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmRecord {
    /// Sequential farm handle, immutable once assigned.
    pub farm_id: FarmId,
    /// Asset paid out by this farm.
    pub reward_token: AssetId,
    /// Ed25519 key authorized to sign harvest vouchers for this farm.
    pub signer: AccountId,
    /// The liquidity pool this farm rewards.
    pub pool: PoolId,
    /// Whether harvesting is currently allowed.
    pub active: bool,
    /// Cumulative micro-units deposited into this farm.
    pub total_claimable: Amount,
    /// Cumulative micro-units paid out of this farm.
    pub total_claimed: Amount,
    /// Advertised emission rate, consumed by the off-process signer.
    pub reward_per_block: Amount,
}

impl FarmRecord {
    /// Micro-units still available for payout.
    pub fn remaining_rewards(&self) -> Amount {
        self.total_claimable.saturating_sub(self.total_claimed)
    }
}
