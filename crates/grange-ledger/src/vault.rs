//! Reward vault accounting.
//!
//! Anyone can fund a farm. Deposits pull the farm's reward token from the
//! depositor into the treasury and raise `total_claimable`, the budget the
//! claim engine enforces payouts against.

use grange_db::queries;
use grange_types::events::LedgerEvent;
use grange_types::{AccountId, Amount, FarmId};

use crate::ledger::{farm_on, instance_on, Ledger};
use crate::traits::{ChainView, PositionRegistry, TokenBank};
use crate::{LedgerError, Result};

impl<B: TokenBank, P: PositionRegistry, C: ChainView> Ledger<B, P, C> {
    /// Fund a farm with `amount` of its reward token, pulled from the
    /// caller. Works on deactivated farms, so an operator can top up a
    /// paused farm before reactivating it.
    pub fn deposit_reward(
        &mut self,
        caller: &AccountId,
        farm_id: FarmId,
        amount: Amount,
    ) -> Result<()> {
        let tx = self.conn.transaction()?;
        let instance = instance_on(&tx)?;
        let farm = farm_on(&tx, farm_id)?;

        if amount == 0 {
            return Err(LedgerError::InvalidArgument(
                "amount must be greater than 0",
            ));
        }
        let total_claimable = farm
            .total_claimable
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        queries::farms::set_total_claimable(&tx, farm_id, total_claimable)?;
        queries::events::append(
            &tx,
            &LedgerEvent::RewardDeposited { farm_id, amount },
            self.chain.timestamp(),
        )?;
        self.bank
            .transfer(&farm.reward_token, caller, &instance.instance_id, amount)?;
        tx.commit()?;

        tracing::info!(farm_id, amount, "reward deposited");
        Ok(())
    }
}
