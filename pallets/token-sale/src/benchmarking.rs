#![cfg(feature = "runtime-benchmarks")]

use super::*;
use crate::types::{BenchmarkHelper, LedgerInterface};
use frame::deps::frame_support::traits::UnixTime;
use polkadot_sdk::frame_benchmarking::v2::*;
use polkadot_sdk::frame_system::RawOrigin;
use primitives::{Balance, Moment, TokenId, params::ONE_TOKEN};

const RATE: Balance = 100_000_000_000;
const SUPPLY: Balance = 1_000_000_000 * ONE_TOKEN;

fn owner<T: Config>() -> T::AccountId {
  account("owner", 0, 1)
}

fn holder<T: Config>() -> T::AccountId {
  account("holder", 0, 1)
}

fn now<T: Config>() -> Moment {
  <T as Config>::UnixTime::now().as_secs()
}

fn new_sale<T: Config>() -> SaleId {
  Pallet::<T>::do_create_sale(owner::<T>()).expect("owner is not null")
}

/// A started sale whose ICO phase 1 is running
fn running_sale<T: Config>() -> (SaleId, TokenId) {
  let sale_id = new_sale::<T>();
  let token = T::BenchmarkHelper::create_token(&holder::<T>(), SUPPLY).expect("token created");
  T::Ledger::transfer_ownership(&holder::<T>(), token, &Pallet::<T>::sale_account(sale_id))
    .expect("holder owns the token");
  Sales::<T>::mutate(sale_id, |maybe| {
    if let Some(sale) = maybe {
      sale.token = Some(token);
      sale.exchange_rate = RATE;
      sale.schedule.ico_start = now::<T>().saturating_sub(1);
      sale.schedule.ico_phase_days = [7; 5];
    }
  });
  (sale_id, token)
}

#[benchmarks]
mod benches {
  use super::*;

  #[benchmark]
  fn create_sale() {
    let caller = owner::<T>();
    let sale_id = NextSaleId::<T>::get();

    #[extrinsic_call]
    create_sale(RawOrigin::Signed(caller));

    assert!(Sales::<T>::contains_key(sale_id));
  }

  #[benchmark]
  fn start() {
    let sale_id = new_sale::<T>();
    let token = T::BenchmarkHelper::create_token(&holder::<T>(), SUPPLY).expect("token created");
    T::Ledger::transfer_ownership(&holder::<T>(), token, &Pallet::<T>::sale_account(sale_id))
      .expect("holder owns the token");

    #[extrinsic_call]
    start(RawOrigin::Signed(owner::<T>()), sale_id, token, RATE);

    assert_eq!(Pallet::<T>::exchange_rate(sale_id), RATE);
  }

  #[benchmark]
  fn set_presale_dates() {
    let sale_id = new_sale::<T>();

    #[extrinsic_call]
    set_presale_dates(RawOrigin::Signed(owner::<T>()), sale_id, 1_000, 2_000);
  }

  #[benchmark]
  fn set_ico_dates() {
    let sale_id = new_sale::<T>();

    #[extrinsic_call]
    set_ico_dates(RawOrigin::Signed(owner::<T>()), sale_id, 3_000, [7; 5]);
  }

  #[benchmark]
  fn set_manager() {
    let sale_id = new_sale::<T>();
    let manager: T::AccountId = account("manager", 0, 1);

    #[extrinsic_call]
    set_manager(RawOrigin::Signed(owner::<T>()), sale_id, manager.clone());

    assert_eq!(
      Pallet::<T>::get_manager(&owner::<T>(), sale_id),
      Ok(Some(manager))
    );
  }

  #[benchmark]
  fn set_rate() {
    let sale_id = new_sale::<T>();

    #[extrinsic_call]
    set_rate(RawOrigin::Signed(owner::<T>()), sale_id, RATE);
  }

  #[benchmark]
  fn transfer_ico() {
    let (sale_id, token) = running_sale::<T>();
    let to: T::AccountId = account("buyer", 0, 1);

    #[extrinsic_call]
    transfer_ico(RawOrigin::Signed(owner::<T>()), sale_id, to.clone(), ONE_TOKEN);

    assert_eq!(T::Ledger::balance_of(token, &to), ONE_TOKEN);
  }

  #[benchmark]
  fn pay() {
    let (sale_id, token) = running_sale::<T>();
    let payer: T::AccountId = account("buyer", 0, 1);
    // One token left, so the payment overflows and takes the refund path
    let remaining = T::Ledger::wallet_balance(token).unwrap_or_default();
    T::Ledger::transfer_ico(
      &Pallet::<T>::sale_account(sale_id),
      token,
      &account("whale", 0, 1),
      remaining.saturating_sub(ONE_TOKEN),
    )
    .expect("wallet holds the supply");
    T::BenchmarkHelper::fund(&payer, 1_000 * ONE_TOKEN);

    #[extrinsic_call]
    pay(RawOrigin::Signed(payer.clone()), sale_id, 100 * ONE_TOKEN);

    assert_eq!(T::Ledger::balance_of(token, &payer), ONE_TOKEN);
  }

  #[benchmark]
  fn finalize() {
    let (sale_id, token) = running_sale::<T>();
    Sales::<T>::mutate(sale_id, |maybe| {
      if let Some(sale) = maybe {
        sale.sold_out = true;
      }
    });

    #[extrinsic_call]
    finalize(RawOrigin::Signed(owner::<T>()), sale_id);

    assert_eq!(T::Ledger::owner_of(token), Some(owner::<T>()));
  }

  #[benchmark]
  fn withdraw_proceeds() {
    let sale_id = new_sale::<T>();
    T::BenchmarkHelper::fund(&Pallet::<T>::sale_account(sale_id), 100 * ONE_TOKEN);

    #[extrinsic_call]
    withdraw_proceeds(RawOrigin::Signed(owner::<T>()), sale_id);
  }

  impl_benchmark_test_suite!(Pallet, crate::mock::new_test_ext(), crate::mock::Test);
}
