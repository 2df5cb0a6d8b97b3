//! Instance and chain binding for voucher digests.
//!
//! Every digest covers the issuing ledger's instance id and chain id, so a
//! voucher signed for one deployment can never be replayed against another,
//! and a voucher signed for a test chain can never be replayed on the main
//! one.

use grange_crypto::blake3;
use grange_types::{AccountId, InstanceId};
use serde::{Deserialize, Serialize};

/// The domain a voucher is bound to.
///
/// Fixed at ledger initialization and identical for every voucher the
/// instance will ever accept.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherDomain {
    /// Identity of the ledger instance.
    pub instance_id: InstanceId,
    /// Chain the instance lives on.
    pub chain_id: u64,
}

impl VoucherDomain {
    pub fn new(instance_id: InstanceId, chain_id: u64) -> Self {
        Self {
            instance_id,
            chain_id,
        }
    }
}

/// Derive a fresh instance id from the creating account, the chain, and a
/// creator-chosen nonce.
///
/// Deterministic, so an operator can recompute the id of any instance they
/// created. Distinct nonces give distinct instances on the same chain.
pub fn derive_instance_id(creator: &AccountId, chain_id: u64, nonce: u64) -> InstanceId {
    let mut input = [0u8; 48];
    input[..32].copy_from_slice(creator);
    input[32..40].copy_from_slice(&chain_id.to_le_bytes());
    input[40..].copy_from_slice(&nonce.to_le_bytes());
    blake3::derive_key(blake3::contexts::INSTANCE_ID, &input)
}
