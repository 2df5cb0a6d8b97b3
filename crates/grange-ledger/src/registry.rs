//! Farm registration and reconfiguration. Administrator only.
//!
//! Farm ids are handed out sequentially from 0 and rows are never deleted.
//! Deactivation gates harvesting alone; every other operation, including
//! reconfiguration here, works the same on an inactive farm.

use grange_crypto::ed25519::VerifyingKey;
use grange_db::queries;
use grange_types::events::LedgerEvent;
use grange_types::farm::FarmRecord;
use grange_types::{AccountId, Amount, AssetId, FarmId, PoolId, NULL_ID};

use crate::ledger::{farm_on, require_admin_on, Ledger};
use crate::traits::{ChainView, PositionRegistry, TokenBank};
use crate::{LedgerError, Result};

impl<B: TokenBank, P: PositionRegistry, C: ChainView> Ledger<B, P, C> {
    /// Register a new farm. Returns its id.
    ///
    /// The signer must be a decodable Ed25519 key, so that a later harvest
    /// can only fail verification on a genuine mismatch.
    pub fn register_farm(
        &mut self,
        caller: &AccountId,
        reward_token: &AssetId,
        signer: &AccountId,
        pool: &PoolId,
        reward_per_block: Amount,
    ) -> Result<FarmId> {
        let tx = self.conn.transaction()?;
        require_admin_on(&tx, caller)?;

        if *reward_token == NULL_ID {
            return Err(LedgerError::InvalidArgument("invalid reward token"));
        }
        if *signer == NULL_ID || VerifyingKey::from_bytes(signer).is_err() {
            return Err(LedgerError::InvalidArgument("invalid signer"));
        }
        if *pool == NULL_ID {
            return Err(LedgerError::InvalidArgument("invalid pool"));
        }

        let farm_id = queries::farms::next_farm_id(&tx)?;
        queries::farms::insert(
            &tx,
            &FarmRecord {
                farm_id,
                reward_token: *reward_token,
                signer: *signer,
                pool: *pool,
                active: true,
                total_claimable: 0,
                total_claimed: 0,
                reward_per_block,
            },
        )?;
        queries::events::append(
            &tx,
            &LedgerEvent::FarmAdded {
                farm_id,
                reward_token: *reward_token,
                signer: *signer,
                pool: *pool,
                reward_per_block,
            },
            self.chain.timestamp(),
        )?;
        tx.commit()?;

        tracing::info!(farm_id, "farm registered");
        Ok(farm_id)
    }

    /// Re-enable harvesting for a farm.
    pub fn activate_farm(&mut self, caller: &AccountId, farm_id: FarmId) -> Result<()> {
        let tx = self.conn.transaction()?;
        require_admin_on(&tx, caller)?;

        let farm = farm_on(&tx, farm_id)?;
        if farm.active {
            return Err(LedgerError::InvalidState("farm already active"));
        }
        queries::farms::set_active(&tx, farm_id, true)?;
        queries::events::append(
            &tx,
            &LedgerEvent::FarmActivated { farm_id },
            self.chain.timestamp(),
        )?;
        tx.commit()?;

        tracing::info!(farm_id, "farm activated");
        Ok(())
    }

    /// Pause harvesting for a farm. Staking, unstaking, and deposits keep
    /// working.
    pub fn deactivate_farm(&mut self, caller: &AccountId, farm_id: FarmId) -> Result<()> {
        let tx = self.conn.transaction()?;
        require_admin_on(&tx, caller)?;

        let farm = farm_on(&tx, farm_id)?;
        if !farm.active {
            return Err(LedgerError::InvalidState("farm already inactive"));
        }
        queries::farms::set_active(&tx, farm_id, false)?;
        queries::events::append(
            &tx,
            &LedgerEvent::FarmDeactivated { farm_id },
            self.chain.timestamp(),
        )?;
        tx.commit()?;

        tracing::info!(farm_id, "farm deactivated");
        Ok(())
    }

    /// Replace a farm's voucher signer.
    ///
    /// Vouchers issued by the previous signer fail verification from this
    /// point on, redeemed or not.
    pub fn set_signer(
        &mut self,
        caller: &AccountId,
        farm_id: FarmId,
        new_signer: &AccountId,
    ) -> Result<()> {
        let tx = self.conn.transaction()?;
        require_admin_on(&tx, caller)?;

        let farm = farm_on(&tx, farm_id)?;
        if *new_signer == NULL_ID || VerifyingKey::from_bytes(new_signer).is_err() {
            return Err(LedgerError::InvalidArgument("invalid signer"));
        }
        queries::farms::set_signer(&tx, farm_id, new_signer)?;
        queries::events::append(
            &tx,
            &LedgerEvent::SignerUpdated {
                farm_id,
                old_signer: farm.signer,
                new_signer: *new_signer,
            },
            self.chain.timestamp(),
        )?;
        tx.commit()?;

        tracing::info!(farm_id, "farm signer replaced");
        Ok(())
    }

    /// Replace a farm's advertised emission rate.
    ///
    /// Advisory for the off-process signer; the ledger itself never
    /// computes earnings from it.
    pub fn set_reward_per_block(
        &mut self,
        caller: &AccountId,
        farm_id: FarmId,
        new_rate: Amount,
    ) -> Result<()> {
        let tx = self.conn.transaction()?;
        require_admin_on(&tx, caller)?;

        let farm = farm_on(&tx, farm_id)?;
        queries::farms::set_reward_per_block(&tx, farm_id, new_rate)?;
        queries::events::append(
            &tx,
            &LedgerEvent::RewardPerBlockUpdated {
                farm_id,
                old_rate: farm.reward_per_block,
                new_rate,
            },
            self.chain.timestamp(),
        )?;
        tx.commit()?;

        tracing::info!(farm_id, new_rate, "farm emission rate replaced");
        Ok(())
    }
}
