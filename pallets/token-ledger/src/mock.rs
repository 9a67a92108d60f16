use crate as pallet_token_ledger;
use polkadot_sdk::{
  frame_support::{
    construct_runtime,
    traits::{ConstU32, ConstU64},
  },
  sp_runtime::{
    BuildStorage,
    traits::{BlakeTwo256, IdentityLookup},
  },
};

use primitives::{Balance, Moment, TokenId};

type Block = polkadot_sdk::frame_system::mocking::MockBlock<Test>;
pub type AccountId = u64;

/// Encodes to all zero bytes
pub const NULL: AccountId = 0;
pub const ALICE: AccountId = 1;
pub const BOB: AccountId = 2;
pub const CHARLIE: AccountId = 3;

/// Token created at genesis, held and owned by ALICE
pub const TOKEN: TokenId = 0;
pub const SUPPLY: Balance = 1_000_000;

/// Unix second every test starts at
pub const GENESIS_TIME: Moment = 1_500_000_000;

construct_runtime!(
  pub enum Test {
    System: polkadot_sdk::frame_system,
    Timestamp: polkadot_sdk::pallet_timestamp,
    TokenLedger: pallet_token_ledger,
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
  type AccountData = ();
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

pub type MaxFreezeBatch = ConstU32<{ primitives::params::MAX_FREEZE_BATCH }>;

impl pallet_token_ledger::Config for Test {
  type UnixTime = Timestamp;
  type MaxFreezeBatch = MaxFreezeBatch;
  type WeightInfo = ();
}

/// Move the wall clock to `secs` unix seconds
pub fn set_now(secs: Moment) {
  Timestamp::set_timestamp(secs * 1_000);
}

pub fn new_test_ext() -> polkadot_sdk::sp_io::TestExternalities {
  let mut storage = polkadot_sdk::frame_system::GenesisConfig::<Test>::default()
    .build_storage()
    .unwrap();

  pallet_token_ledger::GenesisConfig::<Test> {
    tokens: vec![(ALICE, SUPPLY)],
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
