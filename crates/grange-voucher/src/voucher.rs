//! The harvest voucher and its canonical encoding.
//!
//! The signable payload is a fixed-width little-endian concatenation:
//!
//! ```text
//! instance_id (32) || chain_id (8) || position_id (8) || farm_id (8)
//!     || total_claimable (8) || block_number (8)
//! ```
//!
//! hashed under the registered `harvest-voucher` context. The signer signs
//! the 32-byte digest, never the raw payload, so the signature commits to
//! the domain separation as well as the fields.

use grange_crypto::blake3;
use grange_crypto::ed25519::{Signature, SigningKey, VerifyingKey};
use grange_types::{AccountId, Amount, BlockNumber, FarmId, PositionId};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::{Result, VoucherDomain, VoucherError};

/// Byte length of the signable payload.
pub const PAYLOAD_LEN: usize = 72;

/// A signed harvest authorization.
///
/// `total_claimable` is cumulative over the lifetime of the
/// (position, farm) pair; the ledger computes the incremental payout.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarvestVoucher {
    pub position_id: PositionId,
    pub farm_id: FarmId,
    /// Lifetime earnings of this position on this farm.
    pub total_claimable: Amount,
    /// Block height the earnings figure was computed at.
    pub block_number: BlockNumber,
    #[serde_as(as = "serde_with::Bytes")]
    pub signature: [u8; 64],
}

/// Canonical signable digest for a harvest authorization.
pub fn signing_digest(
    domain: &VoucherDomain,
    position_id: PositionId,
    farm_id: FarmId,
    total_claimable: Amount,
    block_number: BlockNumber,
) -> [u8; 32] {
    let mut payload = [0u8; PAYLOAD_LEN];
    payload[..32].copy_from_slice(&domain.instance_id);
    payload[32..40].copy_from_slice(&domain.chain_id.to_le_bytes());
    payload[40..48].copy_from_slice(&position_id.to_le_bytes());
    payload[48..56].copy_from_slice(&farm_id.to_le_bytes());
    payload[56..64].copy_from_slice(&total_claimable.to_le_bytes());
    payload[64..72].copy_from_slice(&block_number.to_le_bytes());
    blake3::derive_key(blake3::contexts::HARVEST_VOUCHER, &payload)
}

impl HarvestVoucher {
    /// Issue a voucher: sign the digest of the given fields under `domain`.
    ///
    /// This is the signer-side half of the protocol and runs wherever the
    /// farm's earning computation lives, not inside the ledger.
    pub fn issue(
        signer: &SigningKey,
        domain: &VoucherDomain,
        position_id: PositionId,
        farm_id: FarmId,
        total_claimable: Amount,
        block_number: BlockNumber,
    ) -> Self {
        let digest = signing_digest(domain, position_id, farm_id, total_claimable, block_number);
        Self {
            position_id,
            farm_id,
            total_claimable,
            block_number,
            signature: signer.sign(&digest).to_bytes(),
        }
    }

    /// The digest this voucher's signature must cover under `domain`.
    pub fn digest(&self, domain: &VoucherDomain) -> [u8; 32] {
        signing_digest(
            domain,
            self.position_id,
            self.farm_id,
            self.total_claimable,
            self.block_number,
        )
    }

    /// Verify this voucher against the signer the ledger expects.
    ///
    /// Pure function of the voucher, the domain, and the expected signer;
    /// any tampered field, foreign domain, or wrong key fails.
    pub fn verify(&self, domain: &VoucherDomain, expected_signer: &AccountId) -> Result<()> {
        let key = VerifyingKey::from_bytes(expected_signer)
            .map_err(|e| VoucherError::InvalidSigner(e.to_string()))?;
        let signature = Signature::from_bytes(&self.signature);
        key.verify(&self.digest(domain), &signature)
            .map_err(|_| VoucherError::InvalidSignature)
    }
}
