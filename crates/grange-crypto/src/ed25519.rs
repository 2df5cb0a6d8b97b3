//! Ed25519 signing and verification (RFC 8032).
//!
//! One signature algorithm covers the whole ledger: accounts are raw
//! Ed25519 public keys, and farm signers authorize harvests by signing
//! voucher digests. This module wraps `ed25519-dalek` behind the small
//! surface the rest of the workspace needs.

use ed25519_dalek::{Signer, Verifier};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::{CryptoError, Result};

/// A signing key together with its public half.
///
/// Farm signers and test accounts are built from this; ledger tables
/// only ever store the public side, as an account id.
pub struct KeyPair {
    pub signing_key: SigningKey,
    pub verifying_key: VerifyingKey,
}

/// Secret half of an Ed25519 key. The seed is zeroized on drop.
pub struct SigningKey {
    inner: ed25519_dalek::SigningKey,
}

/// Public half of an Ed25519 key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyingKey {
    inner: ed25519_dalek::VerifyingKey,
}

/// A detached Ed25519 signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    inner: ed25519_dalek::Signature,
}

impl KeyPair {
    /// Generate a keypair from the OS random number generator.
    pub fn generate() -> Self {
        Self::from_signing(SigningKey::generate())
    }

    /// Rebuild a keypair from a signing key's seed bytes.
    pub fn from_bytes(seed: &[u8; 32]) -> Self {
        Self::from_signing(SigningKey::from_bytes(seed))
    }

    /// The ledger account id of this keypair.
    pub fn account_id(&self) -> [u8; 32] {
        self.verifying_key.account_id()
    }

    fn from_signing(signing_key: SigningKey) -> Self {
        let verifying_key = signing_key.verifying_key();
        Self {
            signing_key,
            verifying_key,
        }
    }
}

impl SigningKey {
    /// Generate a new random signing key.
    pub fn generate() -> Self {
        Self {
            inner: ed25519_dalek::SigningKey::generate(&mut rand::rngs::OsRng),
        }
    }

    /// Build a signing key from seed bytes. Any 32 bytes are a valid seed.
    pub fn from_bytes(seed: &[u8; 32]) -> Self {
        Self {
            inner: ed25519_dalek::SigningKey::from_bytes(seed),
        }
    }

    /// The seed bytes of this signing key.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.inner.to_bytes()
    }

    /// The public half of this key.
    pub fn verifying_key(&self) -> VerifyingKey {
        VerifyingKey {
            inner: self.inner.verifying_key(),
        }
    }

    /// Sign a message.
    pub fn sign(&self, msg: &[u8]) -> Signature {
        Signature {
            inner: self.inner.sign(msg),
        }
    }
}

impl Clone for SigningKey {
    fn clone(&self) -> Self {
        SigningKey::from_bytes(&self.inner.to_bytes())
    }
}

impl Drop for SigningKey {
    fn drop(&mut self) {
        let mut seed = self.inner.to_bytes();
        seed.zeroize();
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("public", &self.verifying_key())
            .finish()
    }
}

impl VerifyingKey {
    /// Parse a verifying key out of raw bytes.
    ///
    /// Fails when the bytes do not decode to a curve point, which makes
    /// this the validity check for account ids arriving from outside.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self> {
        let inner = ed25519_dalek::VerifyingKey::from_bytes(bytes)
            .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
        Ok(Self { inner })
    }

    /// The raw bytes of this key.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.inner.to_bytes()
    }

    /// The ledger account id for this key.
    ///
    /// Accounts are identified by their raw public key bytes; this is
    /// the value ledger tables store for owners, signers, and admins.
    pub fn account_id(&self) -> [u8; 32] {
        self.inner.to_bytes()
    }

    /// Verify a signature over `msg`.
    pub fn verify(&self, msg: &[u8], signature: &Signature) -> Result<()> {
        self.inner
            .verify(msg, &signature.inner)
            .map_err(|_| CryptoError::SignatureVerification)
    }
}

impl Signature {
    /// Rebuild a signature from its raw bytes.
    pub fn from_bytes(bytes: &[u8; 64]) -> Self {
        Self {
            inner: ed25519_dalek::Signature::from_bytes(bytes),
        }
    }

    /// The raw bytes of this signature.
    pub fn to_bytes(&self) -> [u8; 64] {
        self.inner.to_bytes()
    }
}
