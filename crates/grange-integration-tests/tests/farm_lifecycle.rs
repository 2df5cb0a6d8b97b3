//! Integration test: farm registry administration.
//!
//! Covers registration validation, permanent sequential ids, the
//! activation toggle and exactly what it gates, reconfiguration, and the
//! administrator handoff. Farms are append-only: deactivation hides
//! nothing and deletes nothing.
//!
//! This test uses grange-ledger, grange-crypto (signer keys),
//! grange-voucher, and grange-types.

use grange_crypto::ed25519::KeyPair;
use grange_ledger::stub::{ManualChain, MemoryBank, MemoryPositions};
use grange_ledger::{Ledger, LedgerConfig, LedgerError};
use grange_types::events::LedgerEvent;
use grange_types::{AccountId, AssetId, PoolId, NULL_ID};
use grange_voucher::HarvestVoucher;

const ADMIN: AccountId = [0x0A; 32];
const FARMER: AccountId = [0xAA; 32];
const SPONSOR: AccountId = [0xDD; 32];
const TREASURY: AccountId = [0xEE; 32];
const TOKEN: AssetId = [0x11; 32];
const POOL: PoolId = [0x33; 32];

type TestLedger = Ledger<MemoryBank, MemoryPositions, ManualChain>;

fn new_ledger() -> TestLedger {
    let conn = grange_db::open_memory().expect("open db");
    let mut bank = MemoryBank::new();
    bank.mint(&TOKEN, &SPONSOR, 1_000_000);
    let mut positions = MemoryPositions::new();
    positions.mint(1, &FARMER);

    Ledger::initialize(
        conn,
        bank,
        positions,
        ManualChain::new(),
        LedgerConfig {
            instance_id: TREASURY,
            chain_id: 31337,
            admin: ADMIN,
            position_registry: [0x0B; 32],
        },
    )
    .expect("initialize")
}

#[test]
fn registration_validates_every_parameter() {
    let mut ledger = new_ledger();
    let signer = KeyPair::generate().account_id();

    let result = ledger.register_farm(&FARMER, &TOKEN, &signer, &POOL, 10);
    assert!(matches!(
        result.err(),
        Some(LedgerError::Unauthorized("caller is not the administrator"))
    ));

    let result = ledger.register_farm(&ADMIN, &NULL_ID, &signer, &POOL, 10);
    assert!(matches!(
        result.err(),
        Some(LedgerError::InvalidArgument("invalid reward token"))
    ));

    let result = ledger.register_farm(&ADMIN, &TOKEN, &NULL_ID, &POOL, 10);
    assert!(matches!(
        result.err(),
        Some(LedgerError::InvalidArgument("invalid signer"))
    ));

    let result = ledger.register_farm(&ADMIN, &TOKEN, &signer, &NULL_ID, 10);
    assert!(matches!(
        result.err(),
        Some(LedgerError::InvalidArgument("invalid pool"))
    ));

    // Nothing was registered along the way.
    assert_eq!(ledger.farm_count().expect("count"), 0);
}

#[test]
fn farm_ids_are_sequential_and_permanent() {
    let mut ledger = new_ledger();
    let signer = KeyPair::generate().account_id();

    for expected in 0..3u64 {
        let pool = [expected as u8 + 1; 32];
        let farm_id = ledger
            .register_farm(&ADMIN, &TOKEN, &signer, &pool, expected * 10)
            .expect("register");
        assert_eq!(farm_id, expected);
    }
    assert_eq!(ledger.farm_count().expect("count"), 3);

    // Deactivation keeps the row and the id.
    ledger.deactivate_farm(&ADMIN, 1).expect("deactivate");
    let farms = ledger.farms().expect("list");
    assert_eq!(farms.len(), 3);
    assert_eq!(farms[1].farm_id, 1);
    assert!(!farms[1].active);
    assert!(farms[0].active && farms[2].active);
}

#[test]
fn activation_toggle_rejects_double_moves() {
    let mut ledger = new_ledger();
    let signer = KeyPair::generate().account_id();
    let farm_id = ledger
        .register_farm(&ADMIN, &TOKEN, &signer, &POOL, 10)
        .expect("register");

    // Farms start active.
    assert!(matches!(
        ledger.activate_farm(&ADMIN, farm_id).err(),
        Some(LedgerError::InvalidState("farm already active"))
    ));

    ledger.deactivate_farm(&ADMIN, farm_id).expect("deactivate");
    assert!(matches!(
        ledger.deactivate_farm(&ADMIN, farm_id).err(),
        Some(LedgerError::InvalidState("farm already inactive"))
    ));

    ledger.activate_farm(&ADMIN, farm_id).expect("reactivate");
    assert!(ledger.farm(farm_id).expect("farm").active);
}

#[test]
fn deactivation_gates_only_harvest() {
    let mut ledger = new_ledger();
    let signer = KeyPair::generate();
    let farm_id = ledger
        .register_farm(&ADMIN, &TOKEN, &signer.account_id(), &POOL, 10)
        .expect("register");
    ledger.deactivate_farm(&ADMIN, farm_id).expect("deactivate");

    // Everything except harvesting still works on an inactive farm.
    ledger
        .deposit_reward(&SPONSOR, farm_id, 1_000)
        .expect("deposit while inactive");
    ledger.stake(&FARMER, 1).expect("stake while inactive");
    let replacement = KeyPair::generate();
    ledger
        .set_signer(&ADMIN, farm_id, &replacement.account_id())
        .expect("rotate signer while inactive");
    ledger
        .set_reward_per_block(&ADMIN, farm_id, 99)
        .expect("change rate while inactive");

    let domain = ledger.domain().expect("domain");
    let voucher = HarvestVoucher::issue(&replacement.signing_key, &domain, 1, farm_id, 100, 1);
    assert!(matches!(
        ledger.harvest(&FARMER, &voucher).err(),
        Some(LedgerError::InvalidState("farm not active"))
    ));
    assert!(matches!(
        ledger.harvest_and_unstake(&FARMER, &voucher).err(),
        Some(LedgerError::InvalidState("farm not active"))
    ));

    ledger.unstake(&FARMER, 1).expect("unstake while inactive");
}

#[test]
fn reconfiguration_is_journaled_per_farm() {
    let mut ledger = new_ledger();
    let first_signer = KeyPair::generate();
    let farm_id = ledger
        .register_farm(&ADMIN, &TOKEN, &first_signer.account_id(), &POOL, 10)
        .expect("register");
    let other = ledger
        .register_farm(&ADMIN, &TOKEN, &first_signer.account_id(), &[0x34; 32], 20)
        .expect("register other");

    let second_signer = KeyPair::generate();
    ledger
        .set_signer(&ADMIN, farm_id, &second_signer.account_id())
        .expect("rotate");
    ledger
        .set_reward_per_block(&ADMIN, farm_id, 40)
        .expect("rate change");
    ledger
        .set_reward_per_block(&ADMIN, other, 25)
        .expect("rate change other");

    // Per-farm history carries only this farm's entries, oldest first.
    let history = ledger.farm_events(farm_id, 10).expect("history");
    assert_eq!(history.len(), 3);
    assert!(matches!(history[0].event, LedgerEvent::FarmAdded { .. }));
    assert_eq!(
        history[1].event,
        LedgerEvent::SignerUpdated {
            farm_id,
            old_signer: first_signer.account_id(),
            new_signer: second_signer.account_id(),
        }
    );
    assert_eq!(
        history[2].event,
        LedgerEvent::RewardPerBlockUpdated {
            farm_id,
            old_rate: 10,
            new_rate: 40,
        }
    );

    let farm = ledger.farm(farm_id).expect("farm");
    assert_eq!(farm.signer, second_signer.account_id());
    assert_eq!(farm.reward_per_block, 40);
}

#[test]
fn admin_handoff_controls_the_registry() {
    let mut ledger = new_ledger();
    let successor: AccountId = [0x0C; 32];
    let signer = KeyPair::generate().account_id();

    ledger.transfer_admin(&ADMIN, &successor).expect("propose");

    // Proposal alone grants nothing.
    assert!(matches!(
        ledger
            .register_farm(&successor, &TOKEN, &signer, &POOL, 10)
            .err(),
        Some(LedgerError::Unauthorized(_))
    ));

    ledger.accept_admin(&successor).expect("accept");
    ledger
        .register_farm(&successor, &TOKEN, &signer, &POOL, 10)
        .expect("new admin registers");
    assert!(matches!(
        ledger.register_farm(&ADMIN, &TOKEN, &signer, &POOL, 10).err(),
        Some(LedgerError::Unauthorized("caller is not the administrator"))
    ));
}
