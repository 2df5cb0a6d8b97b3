//! Voucher redemption.
//!
//! A voucher states the cumulative lifetime earnings of a position on a
//! farm. The engine pays the difference between that figure and what the
//! claim record already shows, so re-presenting a voucher is a harmless
//! no-op and the signer never needs to know what was already paid out.

use grange_db::queries;
use grange_types::events::LedgerEvent;
use grange_types::{AccountId, Amount};
use grange_voucher::{HarvestVoucher, VoucherDomain};
use rusqlite::Connection;

use crate::ledger::{farm_on, instance_on, Ledger};
use crate::traits::{ChainView, PositionRegistry, TokenBank};
use crate::{LedgerError, Result};

impl<B: TokenBank, P: PositionRegistry, C: ChainView> Ledger<B, P, C> {
    /// Redeem a harvest voucher for the staked position it names.
    ///
    /// Pays the increment over what this (position, farm) pair has already
    /// claimed and returns it; 0 when the voucher was already redeemed.
    pub fn harvest(&mut self, caller: &AccountId, voucher: &HarvestVoucher) -> Result<Amount> {
        let tx = self.conn.transaction()?;
        let paid = Self::harvest_tx(&tx, &mut self.bank, &self.chain, caller, voucher)?;
        tx.commit()?;

        tracing::info!(
            position_id = voucher.position_id,
            farm_id = voucher.farm_id,
            amount = paid,
            "harvest"
        );
        Ok(paid)
    }

    /// Redeem a voucher and return the position token to the caller in one
    /// atomic operation. Either both happen or neither does.
    pub fn harvest_and_unstake(
        &mut self,
        caller: &AccountId,
        voucher: &HarvestVoucher,
    ) -> Result<Amount> {
        let tx = self.conn.transaction()?;
        let paid = Self::harvest_tx(&tx, &mut self.bank, &self.chain, caller, voucher)?;
        Self::unstake_tx(&tx, &mut self.registry, &self.chain, caller, voucher.position_id)?;
        tx.commit()?;

        tracing::info!(
            position_id = voucher.position_id,
            farm_id = voucher.farm_id,
            amount = paid,
            "harvest and unstake"
        );
        Ok(paid)
    }

    pub(crate) fn harvest_tx(
        tx: &Connection,
        bank: &mut B,
        chain: &C,
        caller: &AccountId,
        voucher: &HarvestVoucher,
    ) -> Result<Amount> {
        let instance = instance_on(tx)?;

        // A position without a custody record has no custodian, so that
        // case folds into the same authorization failure.
        let custody = queries::positions::get(tx, voucher.position_id)?
            .ok_or(LedgerError::Unauthorized("caller is not the custodian"))?;
        if custody.custodian != *caller {
            return Err(LedgerError::Unauthorized("caller is not the custodian"));
        }

        let farm = farm_on(tx, voucher.farm_id)?;
        if !farm.active {
            return Err(LedgerError::InvalidState("farm not active"));
        }

        // Forward-dated vouchers cannot be redeemed early.
        if voucher.block_number > chain.block_number() {
            return Err(LedgerError::InvalidState("block not reached"));
        }

        let domain = VoucherDomain::new(instance.instance_id, instance.chain_id);
        voucher
            .verify(&domain, &farm.signer)
            .map_err(|_| LedgerError::InvalidSignature)?;

        // Cumulative totals never decrease; equal means already redeemed.
        let already_claimed =
            queries::claims::total_claimed(tx, voucher.position_id, voucher.farm_id)?;
        if voucher.total_claimable < already_claimed {
            return Err(LedgerError::InvalidArgument(
                "claim total below recorded amount",
            ));
        }
        let payout = voucher.total_claimable - already_claimed;

        let farm_claimed = farm
            .total_claimed
            .checked_add(payout)
            .ok_or(LedgerError::Overflow)?;
        if farm_claimed > farm.total_claimable {
            return Err(LedgerError::InvalidState("farm rewards exhausted"));
        }

        queries::claims::upsert(tx, voucher.position_id, voucher.farm_id, voucher.total_claimable)?;
        queries::farms::set_total_claimed(tx, voucher.farm_id, farm_claimed)?;
        let timestamp = chain.timestamp();
        queries::events::append(
            tx,
            &LedgerEvent::RewardHarvested {
                custodian: *caller,
                position_id: voucher.position_id,
                farm_id: voucher.farm_id,
                amount: payout,
                block: chain.block_number(),
                timestamp,
            },
            timestamp,
        )?;
        if payout > 0 {
            bank.transfer(&farm.reward_token, &instance.instance_id, caller, payout)?;
        }
        Ok(payout)
    }
}
