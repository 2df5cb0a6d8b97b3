//! Position custody: stake and unstake.
//!
//! Staking moves the position token from its owner to the treasury and
//! records the owner as custodian; unstaking reverses both. Neither cares
//! whether any farm is active, so users can always exit. Claim records are
//! left untouched by unstaking.

use grange_db::queries;
use grange_types::events::LedgerEvent;
use grange_types::position::CustodyRecord;
use grange_types::{AccountId, PositionId};
use rusqlite::Connection;

use crate::ledger::{instance_on, Ledger};
use crate::traits::{ChainView, PositionRegistry, TokenBank};
use crate::{LedgerError, Result};

impl<B: TokenBank, P: PositionRegistry, C: ChainView> Ledger<B, P, C> {
    /// Take custody of a position token owned by the caller.
    pub fn stake(&mut self, caller: &AccountId, position_id: PositionId) -> Result<()> {
        let tx = self.conn.transaction()?;
        Self::stake_tx(&tx, &mut self.registry, &self.chain, caller, position_id)?;
        tx.commit()?;

        tracing::info!(position_id, "position staked");
        Ok(())
    }

    /// Return a staked position token to its custodian.
    pub fn unstake(&mut self, caller: &AccountId, position_id: PositionId) -> Result<()> {
        let tx = self.conn.transaction()?;
        Self::unstake_tx(&tx, &mut self.registry, &self.chain, caller, position_id)?;
        tx.commit()?;

        tracing::info!(position_id, "position unstaked");
        Ok(())
    }

    pub(crate) fn stake_tx(
        tx: &Connection,
        registry: &mut P,
        chain: &C,
        caller: &AccountId,
        position_id: PositionId,
    ) -> Result<()> {
        let instance = instance_on(tx)?;

        if queries::positions::get(tx, position_id)?.is_some() {
            return Err(LedgerError::AlreadyStaked);
        }
        let owner = registry.owner_of(position_id)?;
        if owner != *caller {
            return Err(LedgerError::Unauthorized(
                "caller does not own this position",
            ));
        }

        let block = chain.block_number();
        let timestamp = chain.timestamp();
        queries::positions::insert(
            tx,
            &CustodyRecord {
                position_id,
                custodian: *caller,
                staked_at_block: block,
                staked_at_time: timestamp,
            },
        )?;
        queries::events::append(
            tx,
            &LedgerEvent::PositionStaked {
                custodian: *caller,
                position_id,
                block,
                timestamp,
            },
            timestamp,
        )?;
        registry.transfer(position_id, caller, &instance.instance_id)?;
        Ok(())
    }

    pub(crate) fn unstake_tx(
        tx: &Connection,
        registry: &mut P,
        chain: &C,
        caller: &AccountId,
        position_id: PositionId,
    ) -> Result<()> {
        let instance = instance_on(tx)?;

        // An unstaked position has no custodian, so that case folds into
        // the same authorization failure.
        let custody = queries::positions::get(tx, position_id)?
            .ok_or(LedgerError::Unauthorized("caller is not the custodian"))?;
        if custody.custodian != *caller {
            return Err(LedgerError::Unauthorized("caller is not the custodian"));
        }

        let timestamp = chain.timestamp();
        queries::positions::remove(tx, position_id)?;
        queries::events::append(
            tx,
            &LedgerEvent::PositionUnstaked {
                custodian: *caller,
                position_id,
                block: chain.block_number(),
                timestamp,
            },
            timestamp,
        )?;
        registry.transfer(position_id, &instance.instance_id, caller)?;
        Ok(())
    }
}
