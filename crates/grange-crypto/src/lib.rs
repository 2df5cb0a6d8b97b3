//! # grange-crypto
//!
//! Cryptographic primitives for the grange incentive ledger.
//!
//! The suite is fixed: Ed25519 for account keys and voucher signatures,
//! BLAKE3 for domain-separated digests. No algorithm negotiation is
//! permitted.
//!
//! ## Modules
//!
//! - [`blake3`] — Domain-separated BLAKE3 hashing (registered context strings)
//! - [`ed25519`] — Ed25519 signing and verification (RFC 8032)

pub mod blake3;
pub mod ed25519;

/// Error types for cryptographic operations.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    /// Ed25519 signature verification failed.
    #[error("signature verification failed")]
    SignatureVerification,

    /// Key bytes did not decode to a valid curve point.
    #[error("invalid key material: {0}")]
    InvalidKey(String),
}

pub type Result<T> = std::result::Result<T, CryptoError>;
