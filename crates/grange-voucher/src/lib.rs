//! # grange-voucher
//!
//! The harvest voucher: the signed statement a farm signer issues off-ledger
//! to authorize a payout.
//!
//! A voucher says "position P on farm F has earned `total_claimable` in
//! total, as of block B". The ledger turns the cumulative figure into an
//! incremental payout; this crate only defines the signable payload and the
//! pure issue/verify functions. Verification takes the payload, the
//! signature, and the expected signer, and touches no storage.
//!
//! ## Modules
//!
//! - [`domain`] — Instance/chain binding baked into every digest
//! - [`voucher`] — The voucher itself: encoding, issuing, verification

pub mod domain;
pub mod voucher;

pub use domain::VoucherDomain;
pub use voucher::HarvestVoucher;

/// Error types for voucher operations.
#[derive(Debug, thiserror::Error)]
pub enum VoucherError {
    /// The signature does not cover this payload under this domain, or was
    /// not produced by the expected signer.
    #[error("signature verification failed")]
    InvalidSignature,

    /// The expected signer bytes do not decode to a verifying key.
    #[error("invalid signer key: {0}")]
    InvalidSigner(String),
}

/// Convenience result type for voucher operations.
pub type Result<T> = std::result::Result<T, VoucherError>;
