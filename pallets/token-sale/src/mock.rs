use crate as pallet_token_sale;
use frame::prelude::*;
use polkadot_sdk::{
  frame_support::{
    PalletId, construct_runtime, parameter_types,
    traits::{ConstU32, ConstU64},
  },
  sp_runtime::{
    BuildStorage,
    traits::{BlakeTwo256, IdentityLookup},
  },
};

use primitives::{
  Moment, SaleId, TokenId,
  params::{MAX_FREEZE_BATCH, ONE_TOKEN},
  pallet_ids::TOKEN_SALE_PALLET_ID,
};

type Block = polkadot_sdk::frame_system::mocking::MockBlock<Test>;
pub type AccountId = u64;
pub type Balance = u128;

/// Encodes to all zero bytes
pub const NULL: AccountId = 0;
/// Sale owner
pub const ALICE: AccountId = 1;
/// Token holder and wallet
pub const BOB: AccountId = 2;
pub const CHARLIE: AccountId = 3;
pub const DAVE: AccountId = 4;
/// Unfunded at genesis
pub const EVE: AccountId = 5;

pub const INITIAL_BALANCE: Balance = 1_000_000 * ONE_TOKEN;
pub const TOKEN_SUPPLY: Balance = 1_000_000_000 * ONE_TOKEN;

pub const GENESIS_TIME: Moment = 1_700_000_000;
pub const DAY: Moment = 86_400;
pub const WEEK: Moment = 7 * DAY;

parameter_types! {
  pub static ExistentialDeposit: Balance = 1;
}

construct_runtime!(
  pub enum Test {
    System: polkadot_sdk::frame_system,
    Timestamp: polkadot_sdk::pallet_timestamp,
    Balances: polkadot_sdk::pallet_balances,
    TokenLedger: pallet_token_ledger,
    TokenSale: pallet_token_sale,
  }
);

impl polkadot_sdk::frame_system::Config for Test {
  type BaseCallFilter = polkadot_sdk::frame_support::traits::Everything;
  type BlockWeights = ();
  type BlockLength = ();
  type DbWeight = ();
  type RuntimeOrigin = RuntimeOrigin;
  type RuntimeCall = RuntimeCall;
  type Nonce = u64;
  type Hash = polkadot_sdk::sp_core::H256;
  type Hashing = BlakeTwo256;
  type AccountId = AccountId;
  type Lookup = IdentityLookup<Self::AccountId>;
  type Block = Block;
  type RuntimeEvent = RuntimeEvent;
  type BlockHashCount = ConstU64<250>;
  type Version = ();
  type PalletInfo = PalletInfo;
  type AccountData = polkadot_sdk::pallet_balances::AccountData<Balance>;
  type OnNewAccount = ();
  type OnKilledAccount = ();
  type SystemWeightInfo = ();
  type SS58Prefix = ();
  type OnSetCode = ();
  type MaxConsumers = ConstU32<16>;
  type RuntimeTask = ();
  type ExtensionsWeightInfo = ();
  type SingleBlockMigrations = ();
  type MultiBlockMigrator = ();
  type PreInherents = ();
  type PostInherents = ();
  type PostTransactions = ();
}

impl polkadot_sdk::pallet_timestamp::Config for Test {
  type Moment = u64;
  type OnTimestampSet = ();
  type MinimumPeriod = ConstU64<1>;
  type WeightInfo = ();
}

impl polkadot_sdk::pallet_balances::Config for Test {
  type MaxLocks = ConstU32<50>;
  type MaxReserves = ();
  type ReserveIdentifier = [u8; 8];
  type Balance = Balance;
  type RuntimeEvent = RuntimeEvent;
  type DustRemoval = ();
  type ExistentialDeposit = ExistentialDeposit;
  type AccountStore = System;
  type WeightInfo = ();
  type FreezeIdentifier = ();
  type MaxFreezes = ();
  type RuntimeHoldReason = RuntimeHoldReason;
  type RuntimeFreezeReason = RuntimeFreezeReason;
  type DoneSlashHandler = ();
}

impl pallet_token_ledger::Config for Test {
  type UnixTime = Timestamp;
  type MaxFreezeBatch = ConstU32<MAX_FREEZE_BATCH>;
  type WeightInfo = ();
}

pub struct SalePalletId;
impl Get<PalletId> for SalePalletId {
  fn get() -> PalletId {
    PalletId(*TOKEN_SALE_PALLET_ID)
  }
}

impl pallet_token_sale::Config for Test {
  type Currency = Balances;
  type Ledger = TokenLedger;
  type UnixTime = Timestamp;
  type PalletId = SalePalletId;
  type WeightInfo = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = SaleBenchmarkHelper;
}

#[cfg(feature = "runtime-benchmarks")]
pub struct SaleBenchmarkHelper;

#[cfg(feature = "runtime-benchmarks")]
impl crate::types::BenchmarkHelper<AccountId> for SaleBenchmarkHelper {
  fn create_token(holder: &AccountId, supply: Balance) -> Result<TokenId, DispatchError> {
    TokenLedger::create(RuntimeOrigin::signed(*holder), supply)?;
    Ok(pallet_token_ledger::NextTokenId::<Test>::get() - 1)
  }

  fn fund(who: &AccountId, amount: Balance) {
    use polkadot_sdk::frame_support::traits::fungible::Mutate;
    Balances::set_balance(who, amount);
  }
}

/// Move the wall clock to `secs` unix seconds
pub fn set_now(secs: Moment) {
  Timestamp::set_timestamp(secs * 1_000);
}

/// ALICE opens the next sale, BOB creates the token and hands its ownership to the sale
/// account, ALICE starts the sale at `rate`.
pub fn started_sale(rate: Balance) -> (SaleId, TokenId) {
  let sale_id = pallet_token_sale::NextSaleId::<Test>::get();
  assert!(TokenSale::create_sale(RuntimeOrigin::signed(ALICE)).is_ok());
  let token = pallet_token_ledger::NextTokenId::<Test>::get();
  assert!(TokenLedger::create(RuntimeOrigin::signed(BOB), TOKEN_SUPPLY).is_ok());
  assert!(
    TokenLedger::transfer_ownership(
      RuntimeOrigin::signed(BOB),
      token,
      TokenSale::sale_account(sale_id)
    )
    .is_ok()
  );
  assert!(TokenSale::start(RuntimeOrigin::signed(ALICE), sale_id, token, rate).is_ok());
  (sale_id, token)
}

/// Presale seven to six weeks ago, ICO phase 1 opened `ico_started_days_ago` days ago,
/// every ICO phase seven days long.
pub fn configure_ico(sale_id: SaleId, ico_started_days_ago: i64) {
  let ico_start = (GENESIS_TIME as i64 - ico_started_days_ago * DAY as i64) as Moment;
  assert!(
    TokenSale::set_presale_dates(
      RuntimeOrigin::signed(ALICE),
      sale_id,
      GENESIS_TIME - 7 * WEEK,
      GENESIS_TIME - 6 * WEEK
    )
    .is_ok()
  );
  assert!(
    TokenSale::set_ico_dates(RuntimeOrigin::signed(ALICE), sale_id, ico_start, [7; 5]).is_ok()
  );
}

pub fn new_test_ext() -> polkadot_sdk::sp_io::TestExternalities {
  ExistentialDeposit::set(1);
  let mut storage = polkadot_sdk::frame_system::GenesisConfig::<Test>::default()
    .build_storage()
    .unwrap();

  polkadot_sdk::pallet_balances::GenesisConfig::<Test> {
    balances: vec![
      (NULL, INITIAL_BALANCE),
      (ALICE, INITIAL_BALANCE),
      (BOB, INITIAL_BALANCE),
      (CHARLIE, INITIAL_BALANCE),
      (DAVE, INITIAL_BALANCE),
    ],
    dev_accounts: None,
  }
  .assimilate_storage(&mut storage)
  .unwrap();

  let mut ext = polkadot_sdk::sp_io::TestExternalities::new(storage);
  ext.execute_with(|| {
    System::set_block_number(1);
    set_now(GENESIS_TIME);
  });
  ext
}
