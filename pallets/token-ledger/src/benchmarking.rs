#![cfg(feature = "runtime-benchmarks")]

use super::*;
use alloc::vec::Vec;
use frame::prelude::BoundedVec;
use polkadot_sdk::frame_benchmarking::v2::*;
use polkadot_sdk::frame_support::traits::Get;
use polkadot_sdk::frame_system::RawOrigin;

const SUPPLY: Balance = 1_000_000_000;

fn holder<T: Config>() -> T::AccountId {
  account("holder", 0, 1)
}

fn token_of<T: Config>(who: &T::AccountId) -> TokenId {
  Pallet::<T>::do_create(who.clone(), SUPPLY).expect("supply is non-zero")
}

fn unlocked_token_of<T: Config>(who: &T::AccountId) -> TokenId {
  let token = token_of::<T>(who);
  Pallet::<T>::do_finalize_ico(who, token).expect("creator owns the token");
  token
}

#[benchmarks]
mod benches {
  use super::*;

  #[benchmark]
  fn create() {
    let caller = holder::<T>();
    let token = NextTokenId::<T>::get();

    #[extrinsic_call]
    create(RawOrigin::Signed(caller.clone()), SUPPLY);

    assert_eq!(Pallet::<T>::balance_of(token, &caller), SUPPLY);
  }

  #[benchmark]
  fn transfer() {
    let caller = holder::<T>();
    let to: T::AccountId = account("to", 0, 1);
    let token = unlocked_token_of::<T>(&caller);

    #[extrinsic_call]
    transfer(RawOrigin::Signed(caller), token, to.clone(), 100);

    assert_eq!(Pallet::<T>::balance_of(token, &to), 100);
  }

  #[benchmark]
  fn transfer_from() {
    let caller = holder::<T>();
    let spender: T::AccountId = account("spender", 0, 1);
    let to: T::AccountId = account("to", 0, 1);
    let token = unlocked_token_of::<T>(&caller);
    Allowances::<T>::insert((token, &caller, &spender), 100);

    #[extrinsic_call]
    transfer_from(RawOrigin::Signed(spender), token, caller, to.clone(), 100);

    assert_eq!(Pallet::<T>::balance_of(token, &to), 100);
  }

  #[benchmark]
  fn approve() {
    let caller = holder::<T>();
    let spender: T::AccountId = account("spender", 0, 1);
    let token = token_of::<T>(&caller);

    #[extrinsic_call]
    approve(RawOrigin::Signed(caller.clone()), token, spender.clone(), 100);

    assert_eq!(Pallet::<T>::allowance(token, &caller, &spender), 100);
  }

  #[benchmark]
  fn increase_approval() {
    let caller = holder::<T>();
    let spender: T::AccountId = account("spender", 0, 1);
    let token = token_of::<T>(&caller);
    Allowances::<T>::insert((token, &caller, &spender), 100);

    #[extrinsic_call]
    increase_approval(RawOrigin::Signed(caller.clone()), token, spender.clone(), 50);

    assert_eq!(Pallet::<T>::allowance(token, &caller, &spender), 150);
  }

  #[benchmark]
  fn decrease_approval() {
    let caller = holder::<T>();
    let spender: T::AccountId = account("spender", 0, 1);
    let token = token_of::<T>(&caller);
    Allowances::<T>::insert((token, &caller, &spender), 100);

    #[extrinsic_call]
    decrease_approval(RawOrigin::Signed(caller.clone()), token, spender.clone(), 50);

    assert_eq!(Pallet::<T>::allowance(token, &caller, &spender), 50);
  }

  #[benchmark]
  fn transfer_ico() {
    let caller = holder::<T>();
    let to: T::AccountId = account("to", 0, 1);
    let token = token_of::<T>(&caller);

    #[extrinsic_call]
    transfer_ico(RawOrigin::Signed(caller), token, to.clone(), 100);

    assert_eq!(Pallet::<T>::balance_of(token, &to), 100);
  }

  #[benchmark]
  fn finalize_ico() {
    let caller = holder::<T>();
    let token = token_of::<T>(&caller);

    #[extrinsic_call]
    finalize_ico(RawOrigin::Signed(caller), token);

    assert!(!Pallet::<T>::is_ico_locked(token));
  }

  #[benchmark]
  fn freeze(n: Linear<1, { T::MaxFreezeBatch::get() }>) {
    let caller = holder::<T>();
    let token = token_of::<T>(&caller);
    let targets: Vec<T::AccountId> = (0..n).map(|i| account("frozen", i, 1)).collect();
    let batch: BoundedVec<T::AccountId, T::MaxFreezeBatch> =
      targets.try_into().expect("batch is within bounds");

    #[extrinsic_call]
    freeze(RawOrigin::Signed(caller), token, batch, Moment::MAX);

    assert!(Pallet::<T>::frozen_until(token, &account("frozen", 0, 1)).is_some());
  }

  #[benchmark]
  fn unfreeze() {
    let caller = holder::<T>();
    let target: T::AccountId = account("frozen", 0, 1);
    let token = token_of::<T>(&caller);
    FrozenUntil::<T>::insert(token, &target, Moment::MAX);

    #[extrinsic_call]
    unfreeze(RawOrigin::Signed(caller), token, target.clone());

    assert!(Pallet::<T>::frozen_until(token, &target).is_none());
  }

  #[benchmark]
  fn transfer_ownership() {
    let caller = holder::<T>();
    let new_owner: T::AccountId = account("owner", 0, 1);
    let token = token_of::<T>(&caller);

    #[extrinsic_call]
    transfer_ownership(RawOrigin::Signed(caller), token, new_owner.clone());

    assert_eq!(Pallet::<T>::owner_of(token), Some(new_owner));
  }

  impl_benchmark_test_suite!(Pallet, crate::mock::new_test_ext(), crate::mock::Test);
}
