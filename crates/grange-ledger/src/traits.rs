//! External collaborator traits.
//!
//! The ledger owns none of the assets it moves. Reward tokens live at a
//! token bank, position tokens at a position registry, and the clock
//! belongs to the chain. Each is reached through a trait so the embedding
//! application can wire in real backends while tests use the in-memory
//! implementations from [`crate::stub`].

use grange_types::{AccountId, Amount, AssetId, BlockNumber, PositionId};

/// Fungible asset custody and transfer.
///
/// The ledger's treasury account at the bank is its instance id. Deposits
/// pull into it, harvests pay out of it.
pub trait TokenBank {
    /// Move `amount` of `asset` between accounts. All-or-nothing.
    fn transfer(
        &mut self,
        asset: &AssetId,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> std::result::Result<(), TransferError>;
}

/// Ownership registry for position tokens.
pub trait PositionRegistry {
    /// Current owner of a position token.
    fn owner_of(&self, position_id: PositionId) -> std::result::Result<AccountId, CustodyError>;

    /// Move a position token between accounts. Fails unless `from` is the
    /// current owner.
    fn transfer(
        &mut self,
        position_id: PositionId,
        from: &AccountId,
        to: &AccountId,
    ) -> std::result::Result<(), CustodyError>;
}

/// Current chain height and wall clock.
pub trait ChainView {
    fn block_number(&self) -> BlockNumber;

    /// Unix timestamp in seconds.
    fn timestamp(&self) -> u64;
}

/// Token bank failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransferError {
    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: Amount, available: Amount },

    #[error("transfer rejected: {0}")]
    Rejected(String),
}

/// Position registry failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CustodyError {
    #[error("unknown position {0}")]
    UnknownPosition(PositionId),

    #[error("account does not hold the position")]
    NotHolder,
}
