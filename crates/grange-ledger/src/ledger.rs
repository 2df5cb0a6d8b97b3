//! The ledger handle.
//!
//! [`Ledger`] owns the database connection and the external collaborators,
//! and serializes every operation through `&mut self`. State-changing
//! operations live in the sibling modules ([`crate::registry`],
//! [`crate::custody`], [`crate::harvest`], [`crate::vault`]); this module
//! holds initialization, the read surface, and administration.

use grange_db::queries::{self, events::JournalEntry};
use grange_types::events::LedgerEvent;
use grange_types::farm::FarmRecord;
use grange_types::instance::InstanceRecord;
use grange_types::position::{ClaimRecord, CustodyRecord};
use grange_types::{AccountId, Amount, FarmId, InstanceId, PositionId, NULL_ID};
use grange_voucher::VoucherDomain;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::traits::{ChainView, PositionRegistry, TokenBank};
use crate::{LedgerError, Result};

/// Parameters fixed at initialization.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// This deployment's identity; doubles as its treasury account at the
    /// token bank and position registry.
    pub instance_id: InstanceId,
    /// Chain identifier bound into every voucher.
    pub chain_id: u64,
    /// Initial administrator.
    pub admin: AccountId,
    /// Identity of the external position registry.
    pub position_registry: AccountId,
}

/// One ledger instance: a database plus its external collaborators.
pub struct Ledger<B, P, C> {
    pub(crate) conn: Connection,
    pub(crate) bank: B,
    pub(crate) registry: P,
    pub(crate) chain: C,
}

impl<B: TokenBank, P: PositionRegistry, C: ChainView> Ledger<B, P, C> {
    /// Set up a fresh instance. Writes the one-time instance row; fails
    /// with `InvalidState` if the database already holds one.
    pub fn initialize(
        mut conn: Connection,
        bank: B,
        registry: P,
        chain: C,
        config: LedgerConfig,
    ) -> Result<Self> {
        if config.instance_id == NULL_ID {
            return Err(LedgerError::InvalidArgument("invalid instance id"));
        }
        if config.admin == NULL_ID {
            return Err(LedgerError::InvalidArgument("invalid admin"));
        }
        if config.position_registry == NULL_ID {
            return Err(LedgerError::InvalidArgument("invalid position registry"));
        }

        let tx = conn.transaction()?;
        if queries::instance::get(&tx)?.is_some() {
            return Err(LedgerError::InvalidState("ledger already initialized"));
        }
        queries::instance::insert(
            &tx,
            &InstanceRecord {
                instance_id: config.instance_id,
                chain_id: config.chain_id,
                admin: config.admin,
                pending_admin: None,
                position_registry: config.position_registry,
                created_at: chain.timestamp(),
            },
        )?;
        tx.commit()?;

        tracing::info!(chain_id = config.chain_id, "ledger initialized");
        Ok(Self {
            conn,
            bank,
            registry,
            chain,
        })
    }

    /// Attach to an already-initialized database.
    pub fn open(conn: Connection, bank: B, registry: P, chain: C) -> Result<Self> {
        if queries::instance::get(&conn)?.is_none() {
            return Err(LedgerError::InvalidState("ledger not initialized"));
        }
        Ok(Self {
            conn,
            bank,
            registry,
            chain,
        })
    }

    /// The instance row.
    pub fn instance(&self) -> Result<InstanceRecord> {
        instance_on(&self.conn)
    }

    /// The domain vouchers for this instance must be signed under.
    pub fn domain(&self) -> Result<VoucherDomain> {
        let instance = self.instance()?;
        Ok(VoucherDomain::new(instance.instance_id, instance.chain_id))
    }

    /// A farm by id.
    pub fn farm(&self, farm_id: FarmId) -> Result<FarmRecord> {
        farm_on(&self.conn, farm_id)
    }

    /// Number of farms ever registered.
    pub fn farm_count(&self) -> Result<u64> {
        Ok(queries::farms::count(&self.conn)?)
    }

    /// All farms in registration order.
    pub fn farms(&self) -> Result<Vec<FarmRecord>> {
        Ok(queries::farms::list(&self.conn)?)
    }

    /// Current administrator.
    pub fn admin(&self) -> Result<AccountId> {
        Ok(self.instance()?.admin)
    }

    /// Custody record for a position, if it is currently staked.
    pub fn position(&self, position_id: PositionId) -> Result<Option<CustodyRecord>> {
        Ok(queries::positions::get(&self.conn, position_id)?)
    }

    /// Account holding staking rights over a position, `None` when the
    /// position is not staked here.
    pub fn custodian(&self, position_id: PositionId) -> Result<Option<AccountId>> {
        Ok(self.position(position_id)?.map(|c| c.custodian))
    }

    /// All positions currently staked by one account.
    pub fn positions_of(&self, custodian: &AccountId) -> Result<Vec<CustodyRecord>> {
        Ok(queries::positions::for_custodian(&self.conn, custodian)?)
    }

    /// Number of positions currently in custody.
    pub fn staked_count(&self) -> Result<u64> {
        Ok(queries::positions::count(&self.conn)?)
    }

    /// Cumulative amount already paid to a position from a farm.
    pub fn claimed(&self, position_id: PositionId, farm_id: FarmId) -> Result<Amount> {
        Ok(queries::claims::total_claimed(
            &self.conn,
            position_id,
            farm_id,
        )?)
    }

    /// All claim records for one position.
    pub fn claims_of(&self, position_id: PositionId) -> Result<Vec<ClaimRecord>> {
        Ok(queries::claims::for_position(&self.conn, position_id)?)
    }

    /// Most recent journal entries, newest first.
    pub fn recent_events(&self, limit: u32) -> Result<Vec<JournalEntry>> {
        Ok(queries::events::recent(&self.conn, limit)?)
    }

    /// Journal entries concerning one farm, oldest first.
    pub fn farm_events(&self, farm_id: FarmId, limit: u32) -> Result<Vec<JournalEntry>> {
        Ok(queries::events::for_farm(&self.conn, farm_id, limit)?)
    }

    pub fn bank(&self) -> &B {
        &self.bank
    }

    pub fn bank_mut(&mut self) -> &mut B {
        &mut self.bank
    }

    pub fn position_registry(&self) -> &P {
        &self.registry
    }

    pub fn position_registry_mut(&mut self) -> &mut P {
        &mut self.registry
    }

    pub fn chain(&self) -> &C {
        &self.chain
    }

    pub fn chain_mut(&mut self) -> &mut C {
        &mut self.chain
    }

    /// Propose a new administrator. Admin only; takes effect when the
    /// proposed account calls [`accept_admin`](Self::accept_admin).
    pub fn transfer_admin(&mut self, caller: &AccountId, new_admin: &AccountId) -> Result<()> {
        let tx = self.conn.transaction()?;
        let instance = require_admin_on(&tx, caller)?;
        if *new_admin == NULL_ID {
            return Err(LedgerError::InvalidArgument("invalid admin"));
        }
        queries::instance::update_pending_admin(&tx, Some(new_admin))?;
        queries::events::append(
            &tx,
            &LedgerEvent::AdminTransferStarted {
                current_admin: instance.admin,
                pending_admin: *new_admin,
            },
            self.chain.timestamp(),
        )?;
        tx.commit()?;

        tracing::info!("admin transfer proposed");
        Ok(())
    }

    /// Assume administration. Only the proposed account may call this;
    /// clears the pending proposal.
    pub fn accept_admin(&mut self, caller: &AccountId) -> Result<()> {
        let tx = self.conn.transaction()?;
        let instance = instance_on(&tx)?;
        if instance.pending_admin != Some(*caller) {
            return Err(LedgerError::Unauthorized(
                "caller is not the pending administrator",
            ));
        }
        queries::instance::update_admin(&tx, caller)?;
        queries::events::append(
            &tx,
            &LedgerEvent::AdminTransferred {
                old_admin: instance.admin,
                new_admin: *caller,
            },
            self.chain.timestamp(),
        )?;
        tx.commit()?;

        tracing::info!("admin transfer accepted");
        Ok(())
    }
}

/// Instance row or `InvalidState` when the database was never initialized.
pub(crate) fn instance_on(conn: &Connection) -> Result<InstanceRecord> {
    queries::instance::get(conn)?.ok_or(LedgerError::InvalidState("ledger not initialized"))
}

/// Instance row, with the caller checked against the administrator.
pub(crate) fn require_admin_on(conn: &Connection, caller: &AccountId) -> Result<InstanceRecord> {
    let instance = instance_on(conn)?;
    if instance.admin != *caller {
        return Err(LedgerError::Unauthorized("caller is not the administrator"));
    }
    Ok(instance)
}

/// Farm row or `NotFound`.
pub(crate) fn farm_on(conn: &Connection, farm_id: FarmId) -> Result<FarmRecord> {
    queries::farms::get(conn, farm_id)?.ok_or(LedgerError::NotFound("farm does not exist"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::{ManualChain, MemoryBank, MemoryPositions};

    const ADMIN: AccountId = [0x0A; 32];

    fn test_config() -> LedgerConfig {
        LedgerConfig {
            instance_id: [0xEE; 32],
            chain_id: 31337,
            admin: ADMIN,
            position_registry: [0x0B; 32],
        }
    }

    fn setup() -> Ledger<MemoryBank, MemoryPositions, ManualChain> {
        let conn = grange_db::open_memory().expect("open db");
        Ledger::initialize(
            conn,
            MemoryBank::new(),
            MemoryPositions::new(),
            ManualChain::new(),
            test_config(),
        )
        .expect("initialize")
    }

    #[test]
    fn test_initialize_writes_instance_row() {
        let ledger = setup();
        let instance = ledger.instance().expect("instance");
        assert_eq!(instance.instance_id, [0xEE; 32]);
        assert_eq!(instance.chain_id, 31337);
        assert_eq!(instance.admin, ADMIN);
        assert_eq!(instance.pending_admin, None);

        let domain = ledger.domain().expect("domain");
        assert_eq!(domain.instance_id, [0xEE; 32]);
        assert_eq!(domain.chain_id, 31337);
    }

    #[test]
    fn test_initialize_rejects_null_parameters() {
        let corruptions: [fn(&mut LedgerConfig); 3] = [
            |c| c.instance_id = NULL_ID,
            |c| c.admin = NULL_ID,
            |c| c.position_registry = NULL_ID,
        ];
        for corrupt in corruptions {
            let conn = grange_db::open_memory().expect("open db");
            let mut config = test_config();
            corrupt(&mut config);
            let result = Ledger::initialize(
                conn,
                MemoryBank::new(),
                MemoryPositions::new(),
                ManualChain::new(),
                config,
            );
            assert!(matches!(
                result.err(),
                Some(LedgerError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_initialize_is_one_time() {
        let ledger = setup();
        let conn = ledger.conn;
        let result = Ledger::initialize(
            conn,
            MemoryBank::new(),
            MemoryPositions::new(),
            ManualChain::new(),
            test_config(),
        );
        match result.err() {
            Some(LedgerError::InvalidState(msg)) => {
                assert_eq!(msg, "ledger already initialized");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_open_requires_initialization() {
        let conn = grange_db::open_memory().expect("open db");
        let result = Ledger::open(
            conn,
            MemoryBank::new(),
            MemoryPositions::new(),
            ManualChain::new(),
        );
        assert!(matches!(result.err(), Some(LedgerError::InvalidState(_))));
    }

    #[test]
    fn test_open_attaches_to_existing_instance() {
        let ledger = setup();
        let conn = ledger.conn;
        let reopened = Ledger::open(
            conn,
            MemoryBank::new(),
            MemoryPositions::new(),
            ManualChain::new(),
        )
        .expect("open");
        assert_eq!(reopened.instance().expect("instance").admin, ADMIN);
    }

    #[test]
    fn test_empty_read_surface() {
        let ledger = setup();
        assert_eq!(ledger.admin().expect("admin"), ADMIN);
        assert_eq!(ledger.farm_count().expect("count"), 0);
        assert_eq!(ledger.staked_count().expect("count"), 0);
        assert_eq!(ledger.claimed(1, 0).expect("claimed"), 0);
        assert!(ledger.position(1).expect("position").is_none());
        assert!(ledger.custodian(1).expect("custodian").is_none());
        assert!(matches!(
            ledger.farm(0).err(),
            Some(LedgerError::NotFound(_))
        ));
    }

    #[test]
    fn test_admin_transfer_two_step() {
        let mut ledger = setup();
        let next: AccountId = [0x0C; 32];

        ledger.transfer_admin(&ADMIN, &next).expect("propose");
        let instance = ledger.instance().expect("instance");
        assert_eq!(instance.admin, ADMIN);
        assert_eq!(instance.pending_admin, Some(next));

        // Until accepted, the old admin keeps the role.
        assert!(ledger.transfer_admin(&next, &[0x0D; 32]).is_err());

        ledger.accept_admin(&next).expect("accept");
        let instance = ledger.instance().expect("instance");
        assert_eq!(instance.admin, next);
        assert_eq!(instance.pending_admin, None);

        let events = ledger.recent_events(10).expect("events");
        assert_eq!(
            events[0].event,
            LedgerEvent::AdminTransferred {
                old_admin: ADMIN,
                new_admin: next,
            }
        );
        assert_eq!(
            events[1].event,
            LedgerEvent::AdminTransferStarted {
                current_admin: ADMIN,
                pending_admin: next,
            }
        );
    }

    #[test]
    fn test_admin_transfer_guards() {
        let mut ledger = setup();

        let result = ledger.transfer_admin(&[0x99; 32], &[0x0C; 32]);
        assert!(matches!(result.err(), Some(LedgerError::Unauthorized(_))));

        let result = ledger.transfer_admin(&ADMIN, &NULL_ID);
        assert!(matches!(
            result.err(),
            Some(LedgerError::InvalidArgument("invalid admin"))
        ));

        // Nobody proposed: accepting is unauthorized.
        let result = ledger.accept_admin(&[0x0C; 32]);
        assert!(matches!(result.err(), Some(LedgerError::Unauthorized(_))));
    }

    #[test]
    fn test_accept_admin_wrong_account() {
        let mut ledger = setup();
        ledger.transfer_admin(&ADMIN, &[0x0C; 32]).expect("propose");
        let result = ledger.accept_admin(&[0x0D; 32]);
        assert!(matches!(result.err(), Some(LedgerError::Unauthorized(_))));
    }
}
