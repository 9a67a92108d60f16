//! Token Ledger Pallet
//!
//! Fixed-supply fungible tokens with allowances, timed account freezes and a one-way
//! ICO lock.
//!
//! Every token is created with its whole supply credited to a single holder (the
//! "wallet"), which also becomes the token's privileged owner. While the ICO lock is
//! set, ordinary transfers are rejected and the owner alone may move tokens out of the
//! wallet through `transfer_ico`. `finalize_ico` lifts the lock for good.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

#[cfg(test)]
mod mock;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub mod weights;
pub use weights::WeightInfo;

pub use primitives::{Balance, Moment, TokenId};

pub(crate) const LOG_TARGET: &str = "runtime::token-ledger";

/// Ledger operations used by the sale controller.
///
/// Privileged operations take the acting account explicitly and are subject to the
/// same owner checks as the corresponding dispatchables.
pub trait LedgerInterface<AccountId, Balance> {
  /// Current privileged owner of `token`, `None` if the token does not exist
  fn owner_of(token: TokenId) -> Option<AccountId>;

  /// Remaining balance of the sale-supply holder of `token`
  fn wallet_balance(token: TokenId) -> Option<Balance>;

  fn balance_of(token: TokenId, who: &AccountId) -> Balance;

  fn transfer_ico(
    caller: &AccountId,
    token: TokenId,
    to: &AccountId,
    amount: Balance,
  ) -> frame::deps::sp_runtime::DispatchResult;

  fn finalize_ico(caller: &AccountId, token: TokenId) -> frame::deps::sp_runtime::DispatchResult;

  fn transfer_ownership(
    caller: &AccountId,
    token: TokenId,
    new_owner: &AccountId,
  ) -> frame::deps::sp_runtime::DispatchResult;
}

#[frame::pallet]
pub mod pallet {
  use super::{LOG_TARGET, WeightInfo};
  use alloc::vec::Vec;
  use frame::deps::{frame_support::traits::UnixTime, sp_runtime::traits::Zero};
  use frame::prelude::*;
  use primitives::{Balance, Moment, TokenId, is_null_account};

  #[pallet::config]
  pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
    /// Wall clock used to evaluate freeze expiries
    type UnixTime: UnixTime;

    /// Maximum number of accounts frozen by a single `freeze` call
    #[pallet::constant]
    type MaxFreezeBatch: Get<u32>;

    /// Weight information for extrinsics
    type WeightInfo: WeightInfo;
  }

  #[pallet::pallet]
  #[pallet::storage_version(STORAGE_VERSION)]
  pub struct Pallet<T>(_);

  /// The current storage version.
  const STORAGE_VERSION: StorageVersion = StorageVersion::new(1);

  /// Per-token bookkeeping
  #[derive(Clone, Encode, Decode, Eq, PartialEq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
  pub struct TokenDetails<AccountId> {
    /// Privileged controller of the token
    pub owner: AccountId,
    /// Sale-supply holder, credited with the whole supply at creation
    pub wallet: AccountId,
    /// Fixed total supply
    pub total_supply: Balance,
    /// Ordinary transfers are rejected while set; cleared once by `finalize_ico`
    pub ico_locked: bool,
  }

  #[pallet::storage]
  pub type NextTokenId<T> = StorageValue<_, TokenId, ValueQuery>;

  #[pallet::storage]
  pub type Tokens<T: Config> =
    StorageMap<_, Blake2_128Concat, TokenId, TokenDetails<T::AccountId>, OptionQuery>;

  #[pallet::storage]
  pub type AccountBalances<T: Config> = StorageDoubleMap<
    _,
    Blake2_128Concat,
    TokenId,
    Blake2_128Concat,
    T::AccountId,
    Balance,
    ValueQuery,
  >;

  /// Allowance keyed by `(token, owner, spender)`
  #[pallet::storage]
  pub type Allowances<T: Config> = StorageNMap<
    _,
    (
      NMapKey<Blake2_128Concat, TokenId>,
      NMapKey<Blake2_128Concat, T::AccountId>,
      NMapKey<Blake2_128Concat, T::AccountId>,
    ),
    Balance,
    ValueQuery,
  >;

  /// Unix second until which an account may not send tokens
  #[pallet::storage]
  pub type FrozenUntil<T: Config> = StorageDoubleMap<
    _,
    Blake2_128Concat,
    TokenId,
    Blake2_128Concat,
    T::AccountId,
    Moment,
    OptionQuery,
  >;

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    /// A token was created with its whole supply credited to `owner`
    TokenCreated {
      token: TokenId,
      owner: T::AccountId,
      total_supply: Balance,
    },
    /// Tokens moved between accounts, including ICO allocations out of the wallet
    Transfer {
      token: TokenId,
      from: T::AccountId,
      to: T::AccountId,
      amount: Balance,
    },
    /// Allowance of `spender` over `owner`'s tokens changed
    Approval {
      token: TokenId,
      owner: T::AccountId,
      spender: T::AccountId,
      amount: Balance,
    },
    /// ICO lock lifted; ordinary transfers are enabled
    IcoFinalized { token: TokenId },
    /// A batch of accounts was frozen until `until`
    Frozen {
      token: TokenId,
      accounts: u32,
      until: Moment,
    },
    /// A freeze was lifted before its expiry
    Unfrozen {
      token: TokenId,
      account: T::AccountId,
    },
    /// Privileged ownership moved to `new_owner`
    OwnershipTransferred {
      token: TokenId,
      previous_owner: T::AccountId,
      new_owner: T::AccountId,
    },
  }

  #[pallet::error]
  pub enum Error<T> {
    /// No token exists under this id
    UnknownToken,
    /// Caller is not the token's privileged owner
    NotOwner,
    /// The null account cannot take part in this operation
    NullAccount,
    /// Tokens must be created with a non-zero supply
    ZeroSupply,
    /// Ordinary transfers are disabled until the ICO is finalized
    IcoActive,
    /// The ICO lock has already been lifted
    IcoFinalized,
    /// Source account is frozen
    AccountFrozen,
    /// Source balance is lower than the requested amount
    InsufficientBalance,
    /// Spender allowance is lower than the requested amount
    InsufficientAllowance,
    /// Arithmetic overflow occurred
    ArithmeticOverflow,
  }

  #[pallet::call]
  impl<T: Config> Pallet<T> {
    /// Create a token whose whole supply is held, and controlled, by the caller.
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::create())]
    pub fn create(origin: OriginFor<T>, total_supply: Balance) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::do_create(who, total_supply).map(|_| ())
    }

    /// Move `amount` of the caller's tokens to `to`. Rejected while the ICO lock is set.
    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::transfer())]
    pub fn transfer(
      origin: OriginFor<T>,
      token: TokenId,
      to: T::AccountId,
      amount: Balance,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::do_transfer(token, &who, &to, amount)
    }

    /// Spend `amount` of `owner`'s tokens out of the caller's allowance.
    #[pallet::call_index(2)]
    #[pallet::weight(T::WeightInfo::transfer_from())]
    pub fn transfer_from(
      origin: OriginFor<T>,
      token: TokenId,
      owner: T::AccountId,
      to: T::AccountId,
      amount: Balance,
    ) -> DispatchResult {
      let spender = ensure_signed(origin)?;
      Self::do_transfer_from(token, &spender, &owner, &to, amount)
    }

    #[pallet::call_index(3)]
    #[pallet::weight(T::WeightInfo::approve())]
    pub fn approve(
      origin: OriginFor<T>,
      token: TokenId,
      spender: T::AccountId,
      amount: Balance,
    ) -> DispatchResult {
      let owner = ensure_signed(origin)?;
      Self::ensure_token(token)?;
      Self::set_allowance(token, owner, spender, amount);
      Ok(())
    }

    #[pallet::call_index(4)]
    #[pallet::weight(T::WeightInfo::increase_approval())]
    pub fn increase_approval(
      origin: OriginFor<T>,
      token: TokenId,
      spender: T::AccountId,
      delta: Balance,
    ) -> DispatchResult {
      let owner = ensure_signed(origin)?;
      Self::ensure_token(token)?;
      let amount = Allowances::<T>::get((token, &owner, &spender))
        .checked_add(delta)
        .ok_or(Error::<T>::ArithmeticOverflow)?;
      Self::set_allowance(token, owner, spender, amount);
      Ok(())
    }

    /// Lower an allowance by `delta`, flooring at zero.
    #[pallet::call_index(5)]
    #[pallet::weight(T::WeightInfo::decrease_approval())]
    pub fn decrease_approval(
      origin: OriginFor<T>,
      token: TokenId,
      spender: T::AccountId,
      delta: Balance,
    ) -> DispatchResult {
      let owner = ensure_signed(origin)?;
      Self::ensure_token(token)?;
      let amount = Allowances::<T>::get((token, &owner, &spender)).saturating_sub(delta);
      Self::set_allowance(token, owner, spender, amount);
      Ok(())
    }

    /// Allocate tokens straight out of the wallet while the ICO lock is set. Owner only.
    #[pallet::call_index(6)]
    #[pallet::weight(T::WeightInfo::transfer_ico())]
    pub fn transfer_ico(
      origin: OriginFor<T>,
      token: TokenId,
      to: T::AccountId,
      amount: Balance,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::do_transfer_ico(&who, token, &to, amount)
    }

    /// Lift the ICO lock. Irreversible. Owner only.
    #[pallet::call_index(7)]
    #[pallet::weight(T::WeightInfo::finalize_ico())]
    pub fn finalize_ico(origin: OriginFor<T>, token: TokenId) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::do_finalize_ico(&who, token)
    }

    /// Freeze every listed account until `until`, overwriting earlier freezes. Owner only.
    #[pallet::call_index(8)]
    #[pallet::weight(T::WeightInfo::freeze(accounts.len() as u32))]
    pub fn freeze(
      origin: OriginFor<T>,
      token: TokenId,
      accounts: BoundedVec<T::AccountId, T::MaxFreezeBatch>,
      until: Moment,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      let details = Self::ensure_token(token)?;
      Self::ensure_owner(&details, &who)?;
      let count = accounts.len() as u32;
      for account in accounts {
        FrozenUntil::<T>::insert(token, account, until);
      }
      log::debug!(target: LOG_TARGET, "token {token}: froze {count} accounts until {until}");
      Self::deposit_event(Event::Frozen {
        token,
        accounts: count,
        until,
      });
      Ok(())
    }

    /// Lift a freeze before it expires. Owner only.
    #[pallet::call_index(9)]
    #[pallet::weight(T::WeightInfo::unfreeze())]
    pub fn unfreeze(origin: OriginFor<T>, token: TokenId, account: T::AccountId) -> DispatchResult {
      let who = ensure_signed(origin)?;
      let details = Self::ensure_token(token)?;
      Self::ensure_owner(&details, &who)?;
      FrozenUntil::<T>::remove(token, &account);
      Self::deposit_event(Event::Unfrozen { token, account });
      Ok(())
    }

    #[pallet::call_index(10)]
    #[pallet::weight(T::WeightInfo::transfer_ownership())]
    pub fn transfer_ownership(
      origin: OriginFor<T>,
      token: TokenId,
      new_owner: T::AccountId,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::do_transfer_ownership(&who, token, &new_owner)
    }
  }

  impl<T: Config> Pallet<T> {
    pub fn balance_of(token: TokenId, who: &T::AccountId) -> Balance {
      AccountBalances::<T>::get(token, who)
    }

    pub fn allowance(token: TokenId, owner: &T::AccountId, spender: &T::AccountId) -> Balance {
      Allowances::<T>::get((token, owner, spender))
    }

    pub fn total_supply(token: TokenId) -> Balance {
      Tokens::<T>::get(token).map_or(Zero::zero(), |d| d.total_supply)
    }

    pub fn owner_of(token: TokenId) -> Option<T::AccountId> {
      Tokens::<T>::get(token).map(|d| d.owner)
    }

    pub fn wallet_of(token: TokenId) -> Option<T::AccountId> {
      Tokens::<T>::get(token).map(|d| d.wallet)
    }

    pub fn is_ico_locked(token: TokenId) -> bool {
      Tokens::<T>::get(token).is_some_and(|d| d.ico_locked)
    }

    pub fn frozen_until(token: TokenId, who: &T::AccountId) -> Option<Moment> {
      FrozenUntil::<T>::get(token, who)
    }

    /// Whether `who` is barred from sending `token` at the current time
    pub fn is_frozen(token: TokenId, who: &T::AccountId) -> bool {
      FrozenUntil::<T>::get(token, who).is_some_and(|until| Self::now() < until)
    }

    pub(crate) fn do_create(
      holder: T::AccountId,
      total_supply: Balance,
    ) -> Result<TokenId, DispatchError> {
      ensure!(!total_supply.is_zero(), Error::<T>::ZeroSupply);
      ensure!(!is_null_account(&holder), Error::<T>::NullAccount);
      let token = NextTokenId::<T>::get();
      let next = token.checked_add(1).ok_or(Error::<T>::ArithmeticOverflow)?;
      NextTokenId::<T>::put(next);

      Tokens::<T>::insert(
        token,
        TokenDetails {
          owner: holder.clone(),
          wallet: holder.clone(),
          total_supply,
          ico_locked: true,
        },
      );
      AccountBalances::<T>::insert(token, &holder, total_supply);

      log::info!(target: LOG_TARGET, "token {token} created with supply {total_supply}");
      Self::deposit_event(Event::TokenCreated {
        token,
        owner: holder,
        total_supply,
      });
      Ok(token)
    }

    pub(crate) fn do_transfer(
      token: TokenId,
      from: &T::AccountId,
      to: &T::AccountId,
      amount: Balance,
    ) -> DispatchResult {
      let details = Self::ensure_token(token)?;
      ensure!(!details.ico_locked, Error::<T>::IcoActive);
      Self::ensure_can_send(token, from, to)?;
      Self::move_balance(token, from, to, amount)
    }

    pub(crate) fn do_transfer_from(
      token: TokenId,
      spender: &T::AccountId,
      owner: &T::AccountId,
      to: &T::AccountId,
      amount: Balance,
    ) -> DispatchResult {
      let details = Self::ensure_token(token)?;
      ensure!(!details.ico_locked, Error::<T>::IcoActive);
      Self::ensure_can_send(token, owner, to)?;
      let remaining = Allowances::<T>::get((token, owner, spender))
        .checked_sub(amount)
        .ok_or(Error::<T>::InsufficientAllowance)?;
      Self::move_balance(token, owner, to, amount)?;
      Allowances::<T>::insert((token, owner, spender), remaining);
      Ok(())
    }

    pub(crate) fn do_transfer_ico(
      caller: &T::AccountId,
      token: TokenId,
      to: &T::AccountId,
      amount: Balance,
    ) -> DispatchResult {
      let details = Self::ensure_token(token)?;
      Self::ensure_owner(&details, caller)?;
      ensure!(details.ico_locked, Error::<T>::IcoFinalized);
      ensure!(!is_null_account(to), Error::<T>::NullAccount);
      Self::move_balance(token, &details.wallet, to, amount)
    }

    pub(crate) fn do_finalize_ico(caller: &T::AccountId, token: TokenId) -> DispatchResult {
      Tokens::<T>::try_mutate(token, |maybe| -> DispatchResult {
        let details = maybe.as_mut().ok_or(Error::<T>::UnknownToken)?;
        ensure!(details.owner == *caller, Error::<T>::NotOwner);
        ensure!(details.ico_locked, Error::<T>::IcoFinalized);
        details.ico_locked = false;
        Ok(())
      })?;
      log::info!(target: LOG_TARGET, "token {token}: ICO lock lifted");
      Self::deposit_event(Event::IcoFinalized { token });
      Ok(())
    }

    pub(crate) fn do_transfer_ownership(
      caller: &T::AccountId,
      token: TokenId,
      new_owner: &T::AccountId,
    ) -> DispatchResult {
      ensure!(!is_null_account(new_owner), Error::<T>::NullAccount);
      let previous_owner = Tokens::<T>::try_mutate(token, |maybe| {
        let details = maybe.as_mut().ok_or(Error::<T>::UnknownToken)?;
        ensure!(details.owner == *caller, Error::<T>::NotOwner);
        Ok::<_, DispatchError>(core::mem::replace(&mut details.owner, new_owner.clone()))
      })?;
      log::debug!(target: LOG_TARGET, "token {token}: ownership transferred");
      Self::deposit_event(Event::OwnershipTransferred {
        token,
        previous_owner,
        new_owner: new_owner.clone(),
      });
      Ok(())
    }

    fn now() -> Moment {
      T::UnixTime::now().as_secs()
    }

    fn ensure_token(token: TokenId) -> Result<TokenDetails<T::AccountId>, DispatchError> {
      Tokens::<T>::get(token).ok_or_else(|| Error::<T>::UnknownToken.into())
    }

    fn ensure_owner(details: &TokenDetails<T::AccountId>, who: &T::AccountId) -> DispatchResult {
      ensure!(details.owner == *who, Error::<T>::NotOwner);
      Ok(())
    }

    fn ensure_can_send(token: TokenId, from: &T::AccountId, to: &T::AccountId) -> DispatchResult {
      ensure!(
        !is_null_account(from) && !is_null_account(to),
        Error::<T>::NullAccount
      );
      ensure!(!Self::is_frozen(token, from), Error::<T>::AccountFrozen);
      Ok(())
    }

    fn set_allowance(token: TokenId, owner: T::AccountId, spender: T::AccountId, amount: Balance) {
      Allowances::<T>::insert((token, &owner, &spender), amount);
      Self::deposit_event(Event::Approval {
        token,
        owner,
        spender,
        amount,
      });
    }

    /// Debit `from` and credit `to`. Both new balances are computed before either is written.
    fn move_balance(
      token: TokenId,
      from: &T::AccountId,
      to: &T::AccountId,
      amount: Balance,
    ) -> DispatchResult {
      let from_balance = AccountBalances::<T>::get(token, from)
        .checked_sub(amount)
        .ok_or(Error::<T>::InsufficientBalance)?;
      if from != to {
        let to_balance = AccountBalances::<T>::get(token, to)
          .checked_add(amount)
          .ok_or(Error::<T>::ArithmeticOverflow)?;
        AccountBalances::<T>::insert(token, from, from_balance);
        AccountBalances::<T>::insert(token, to, to_balance);
      }
      log::debug!(target: LOG_TARGET, "token {token}: moved {amount}");
      Self::deposit_event(Event::Transfer {
        token,
        from: from.clone(),
        to: to.clone(),
        amount,
      });
      Ok(())
    }
  }

  #[pallet::genesis_config]
  #[derive(frame::prelude::DefaultNoBound)]
  pub struct GenesisConfig<T: Config> {
    /// `(holder, total_supply)` of every token created at genesis
    pub tokens: Vec<(T::AccountId, Balance)>,
  }

  #[pallet::genesis_build]
  impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
    fn build(&self) {
      for (holder, total_supply) in &self.tokens {
        Pallet::<T>::do_create(holder.clone(), *total_supply).expect("genesis token creation");
      }
    }
  }
}

impl<T: Config> LedgerInterface<T::AccountId, Balance> for Pallet<T> {
  fn owner_of(token: TokenId) -> Option<T::AccountId> {
    Pallet::<T>::owner_of(token)
  }

  fn wallet_balance(token: TokenId) -> Option<Balance> {
    Tokens::<T>::get(token).map(|d| Pallet::<T>::balance_of(token, &d.wallet))
  }

  fn balance_of(token: TokenId, who: &T::AccountId) -> Balance {
    Pallet::<T>::balance_of(token, who)
  }

  fn transfer_ico(
    caller: &T::AccountId,
    token: TokenId,
    to: &T::AccountId,
    amount: Balance,
  ) -> frame::deps::sp_runtime::DispatchResult {
    Pallet::<T>::do_transfer_ico(caller, token, to, amount)
  }

  fn finalize_ico(
    caller: &T::AccountId,
    token: TokenId,
  ) -> frame::deps::sp_runtime::DispatchResult {
    Pallet::<T>::do_finalize_ico(caller, token)
  }

  fn transfer_ownership(
    caller: &T::AccountId,
    token: TokenId,
    new_owner: &T::AccountId,
  ) -> frame::deps::sp_runtime::DispatchResult {
    Pallet::<T>::do_transfer_ownership(caller, token, new_owner)
  }
}
