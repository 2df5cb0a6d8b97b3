//! Domain-separated BLAKE3 hashing for the grange ledger.
//!
//! Every digest that leaves this crate is bound to a registered context
//! string via BLAKE3's key-derivation mode, so a signature over a harvest
//! voucher can never be replayed as anything else.
//!
//! ## Modes
//!
//! - [`hash`] — Pure hashing: content addressing, test fixtures
//! - [`derive_key`] — Domain-separated digests: voucher signing, instance ids

/// All registered BLAKE3 context strings for the grange ledger.
/// Using an unregistered context string is a protocol violation.
pub mod contexts {
    /// Digest signed by a farm signer to authorize a harvest.
    pub const HARVEST_VOUCHER: &str = "Grange v1 harvest-voucher";
    /// Identity of a ledger instance, derived from its creator.
    pub const INSTANCE_ID: &str = "Grange v1 instance-id";

    /// All registered context strings. Used for validation.
    pub const ALL_CONTEXTS: &[&str] = &[HARVEST_VOUCHER, INSTANCE_ID];
}

/// Compute BLAKE3 hash of the input data.
pub fn hash(data: &[u8]) -> [u8; 32] {
    *::blake3::hash(data).as_bytes()
}

/// Derive a 32-byte digest using BLAKE3's built-in key derivation mode.
///
/// The context string must be one of the registered context strings in
/// [`contexts`]. The input can be any byte slice.
pub fn derive_key(context: &str, input: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    let mut hasher = ::blake3::Hasher::new_derive_key(context);
    hasher.update(input);
    let digest = hasher.finalize();
    out.copy_from_slice(digest.as_bytes());
    out
}

/// Verify that a context string is registered.
pub fn is_registered_context(context: &str) -> bool {
    contexts::ALL_CONTEXTS.contains(&context)
}
