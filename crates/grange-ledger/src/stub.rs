//! In-memory collaborators.
//!
//! Stand-ins for the external token bank, position registry, and chain.
//! Used by the test suites and by development deployments that have no
//! real backends yet; the ledger cannot tell the difference.

use std::collections::HashMap;

use grange_types::{AccountId, Amount, AssetId, BlockNumber, PositionId};

use crate::traits::{ChainView, CustodyError, PositionRegistry, TokenBank, TransferError};

/// A token bank holding balances in a map.
#[derive(Debug, Clone, Default)]
pub struct MemoryBank {
    balances: HashMap<(AssetId, AccountId), Amount>,
}

impl MemoryBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit an account out of thin air. Test setup only.
    pub fn mint(&mut self, asset: &AssetId, account: &AccountId, amount: Amount) {
        let balance = self.balances.entry((*asset, *account)).or_insert(0);
        *balance = balance.saturating_add(amount);
    }

    pub fn balance_of(&self, asset: &AssetId, account: &AccountId) -> Amount {
        self.balances.get(&(*asset, *account)).copied().unwrap_or(0)
    }
}

impl TokenBank for MemoryBank {
    fn transfer(
        &mut self,
        asset: &AssetId,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> std::result::Result<(), TransferError> {
        if amount == 0 || from == to {
            return Ok(());
        }
        let available = self.balance_of(asset, from);
        if available < amount {
            return Err(TransferError::InsufficientFunds {
                needed: amount,
                available,
            });
        }
        let credited = self
            .balance_of(asset, to)
            .checked_add(amount)
            .ok_or_else(|| TransferError::Rejected("recipient balance overflow".into()))?;
        self.balances.insert((*asset, *from), available - amount);
        self.balances.insert((*asset, *to), credited);
        Ok(())
    }
}

/// A position registry holding owners in a map.
#[derive(Debug, Clone, Default)]
pub struct MemoryPositions {
    owners: HashMap<PositionId, AccountId>,
}

impl MemoryPositions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a position token to an owner. Overwrites any previous owner;
    /// test setup only.
    pub fn mint(&mut self, position_id: PositionId, owner: &AccountId) {
        self.owners.insert(position_id, *owner);
    }
}

impl PositionRegistry for MemoryPositions {
    fn owner_of(&self, position_id: PositionId) -> std::result::Result<AccountId, CustodyError> {
        self.owners
            .get(&position_id)
            .copied()
            .ok_or(CustodyError::UnknownPosition(position_id))
    }

    fn transfer(
        &mut self,
        position_id: PositionId,
        from: &AccountId,
        to: &AccountId,
    ) -> std::result::Result<(), CustodyError> {
        let owner = self.owner_of(position_id)?;
        if owner != *from {
            return Err(CustodyError::NotHolder);
        }
        self.owners.insert(position_id, *to);
        Ok(())
    }
}

/// A chain whose height and clock are advanced by hand.
#[derive(Debug, Clone)]
pub struct ManualChain {
    block: BlockNumber,
    time: u64,
}

impl ManualChain {
    /// Start at block 1 with a fixed recent timestamp.
    pub fn new() -> Self {
        Self {
            block: 1,
            time: 1_700_000_000,
        }
    }

    pub fn set_block(&mut self, block: BlockNumber) {
        self.block = block;
    }

    pub fn advance_blocks(&mut self, count: u64) {
        self.block = self.block.saturating_add(count);
    }

    pub fn set_time(&mut self, time: u64) {
        self.time = time;
    }

    pub fn advance_time(&mut self, seconds: u64) {
        self.time = self.time.saturating_add(seconds);
    }
}

impl Default for ManualChain {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainView for ManualChain {
    fn block_number(&self) -> BlockNumber {
        self.block
    }

    fn timestamp(&self) -> u64 {
        self.time
    }
}
