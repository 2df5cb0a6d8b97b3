//! The one-row ledger instance record.

use serde::{Deserialize, Serialize};

use crate::{AccountId, InstanceId};

/// Identity and administration of one deployed ledger instance.
///
/// Written exactly once at initialization; only `admin` and
/// `pending_admin` change afterwards, through the two-step transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceRecord {
    /// This deployment's identity; also its treasury account at the token
    /// bank and position registry. Bound into every voucher payload.
    pub instance_id: InstanceId,
    /// Chain identifier bound into every voucher payload.
    pub chain_id: u64,
    /// The single administrator account.
    pub admin: AccountId,
    /// Proposed next administrator, if a transfer is in flight.
    pub pending_admin: Option<AccountId>,
    /// Identity of the external position registry this instance trusts.
    pub position_registry: AccountId,
    /// Unix timestamp of initialization.
    pub created_at: u64,
}
