//! Ledger event types.
//!
//! Every state-changing operation journals exactly one event per
//! transition (a combined harvest-and-unstake journals two). Each event
//! carries enough data to reconstruct the transition, including before
//! and after values where a field is overwritten.

use serde::{Deserialize, Serialize};

use crate::{AccountId, Amount, AssetId, BlockNumber, FarmId, PoolId, PositionId};

/// All journal events.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// A new farm was registered.
    FarmAdded {
        farm_id: FarmId,
        reward_token: AssetId,
        signer: AccountId,
        pool: PoolId,
        reward_per_block: Amount,
    },
    /// Harvesting was re-enabled for a farm.
    FarmActivated { farm_id: FarmId },
    /// Harvesting was paused for a farm.
    FarmDeactivated { farm_id: FarmId },
    /// A farm's voucher signer was replaced.
    SignerUpdated {
        farm_id: FarmId,
        old_signer: AccountId,
        new_signer: AccountId,
    },
    /// A farm's advertised emission rate was replaced.
    RewardPerBlockUpdated {
        farm_id: FarmId,
        old_rate: Amount,
        new_rate: Amount,
    },
    /// A position token entered custody.
    PositionStaked {
        custodian: AccountId,
        position_id: PositionId,
        block: BlockNumber,
        timestamp: u64,
    },
    /// A position token left custody.
    PositionUnstaked {
        custodian: AccountId,
        position_id: PositionId,
        block: BlockNumber,
        timestamp: u64,
    },
    /// A voucher was redeemed; `amount` is the incremental payout, which
    /// is 0 when the same voucher is presented again.
    RewardHarvested {
        custodian: AccountId,
        position_id: PositionId,
        farm_id: FarmId,
        amount: Amount,
        block: BlockNumber,
        timestamp: u64,
    },
    /// Micro-units were deposited into a farm's budget.
    RewardDeposited { farm_id: FarmId, amount: Amount },
    /// An administrator handover was proposed.
    AdminTransferStarted {
        current_admin: AccountId,
        pending_admin: AccountId,
    },
    /// A proposed handover was accepted.
    AdminTransferred {
        old_admin: AccountId,
        new_admin: AccountId,
    },
}

impl LedgerEvent {
    /// Journal tag for this event kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::FarmAdded { .. } => "farm_added",
            Self::FarmActivated { .. } => "farm_activated",
            Self::FarmDeactivated { .. } => "farm_deactivated",
            Self::SignerUpdated { .. } => "signer_updated",
            Self::RewardPerBlockUpdated { .. } => "reward_per_block_updated",
            Self::PositionStaked { .. } => "position_staked",
            Self::PositionUnstaked { .. } => "position_unstaked",
            Self::RewardHarvested { .. } => "reward_harvested",
            Self::RewardDeposited { .. } => "reward_deposited",
            Self::AdminTransferStarted { .. } => "admin_transfer_started",
            Self::AdminTransferred { .. } => "admin_transferred",
        }
    }

    /// The farm this event concerns, if any. Used as a journal index.
    pub fn farm_id(&self) -> Option<FarmId> {
        match self {
            Self::FarmAdded { farm_id, .. }
            | Self::FarmActivated { farm_id }
            | Self::FarmDeactivated { farm_id }
            | Self::SignerUpdated { farm_id, .. }
            | Self::RewardPerBlockUpdated { farm_id, .. }
            | Self::RewardHarvested { farm_id, .. }
            | Self::RewardDeposited { farm_id, .. } => Some(*farm_id),
            _ => None,
        }
    }

    /// The position this event concerns, if any. Used as a journal index.
    pub fn position_id(&self) -> Option<PositionId> {
        match self {
            Self::PositionStaked { position_id, .. }
            | Self::PositionUnstaked { position_id, .. }
            | Self::RewardHarvested { position_id, .. } => Some(*position_id),
            _ => None,
        }
    }
}
