//! # grange-ledger
//!
//! The incentive ledger: farm registry, position custody, claim
//! verification, and reward vault accounting over one SQLite database.
//!
//! The ledger never computes rewards. An off-process signer watches
//! positions and issues cumulative harvest vouchers; the ledger verifies
//! them against the farm's registered key, derives the incremental payout
//! from its claim records, and moves funds through an external token bank.
//! Rejected operations leave no trace: every state-changing operation runs
//! inside a single database transaction, and external transfers happen only
//! after all writes have succeeded, immediately before commit.
//!
//! ## Modules
//!
//! - [`ledger`] — The [`Ledger`] handle: initialization, reads, administration
//! - [`registry`] — Farm registration and reconfiguration
//! - [`custody`] — Stake / unstake of position tokens
//! - [`harvest`] — Voucher redemption
//! - [`vault`] — Reward deposits
//! - [`traits`] — External collaborator traits
//! - [`stub`] — In-memory collaborators for tests and development

pub mod custody;
pub mod harvest;
pub mod ledger;
pub mod registry;
pub mod stub;
pub mod traits;
pub mod vault;

pub use ledger::{Ledger, LedgerConfig};
pub use traits::{ChainView, PositionRegistry, TokenBank};

use traits::{CustodyError, TransferError};

/// Error types for ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Wrong caller for an admin-gated or custodian-gated operation.
    #[error("unauthorized: {0}")]
    Unauthorized(&'static str),

    /// Referenced farm or position does not exist.
    #[error("not found: {0}")]
    NotFound(&'static str),

    /// Null ids, zero amounts, decreasing claim vouchers.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Operation conflicts with current state.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// Voucher signature does not match the farm's registered signer.
    #[error("invalid signature")]
    InvalidSignature,

    /// A custody record already exists for this position.
    #[error("position already staked")]
    AlreadyStaked,

    /// Arithmetic overflow in a cumulative total.
    #[error("arithmetic overflow")]
    Overflow,

    #[error("database error: {0}")]
    Db(#[from] grange_db::DbError),

    #[error("token bank: {0}")]
    Transfer(#[from] TransferError),

    #[error("position registry: {0}")]
    Custody(#[from] CustodyError),
}

impl From<rusqlite::Error> for LedgerError {
    fn from(err: rusqlite::Error) -> Self {
        LedgerError::Db(grange_db::DbError::from(err))
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
