//! Token Sale Pallet
//!
//! Time-phased sale of a ledger token against the native currency.
//!
//! A sale is bound to a token whose ledger ownership has been handed to the sale's
//! sovereign account. From then on its phase is derived from the configured presale
//! window and five consecutive ICO phases, each carrying its own bonus. Payments buy
//! tokens straight out of the token's wallet through the ledger's ICO path; an order
//! larger than what is left is partially filled and the excess refunded in the same
//! call. `finalize` lifts the ledger's ICO lock and returns token ownership to the
//! sale owner.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

#[cfg(test)]
mod mock;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub mod pricing;
pub mod types;
pub mod weights;
pub use weights::WeightInfo;

pub use primitives::{SaleId, SalePhase, SaleSchedule};

pub(crate) const LOG_TARGET: &str = "runtime::token-sale";

#[frame::pallet]
pub mod pallet {
  use super::{LOG_TARGET, WeightInfo};
  use crate::pricing;
  use crate::types::{LedgerInterface, SaleInfo};
  use frame::deps::{
    frame_support::{
      PalletId,
      storage::with_storage_layer,
      traits::{
        UnixTime,
        fungible::{Inspect as NativeInspect, Mutate as NativeMutate},
        tokens::{Fortitude, Preservation},
      },
    },
    sp_runtime::traits::{AccountIdConversion, Zero},
  };
  use frame::prelude::*;
  use primitives::{
    Balance, Moment, SaleId, SalePhase, TokenId, is_null_account, params::ICO_PHASES,
  };

  #[pallet::config]
  pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
    /// Payment currency
    type Currency: NativeInspect<Self::AccountId, Balance = Balance>
      + NativeMutate<Self::AccountId, Balance = Balance>;

    /// Token ledger the sold tokens live in
    type Ledger: LedgerInterface<Self::AccountId, Balance>;

    /// Wall clock the phase is derived from
    type UnixTime: UnixTime;

    /// Seed of the per-sale sovereign accounts
    #[pallet::constant]
    type PalletId: Get<PalletId>;

    /// Weight information for extrinsics
    type WeightInfo: WeightInfo;

    /// Helper for benchmarking
    #[cfg(feature = "runtime-benchmarks")]
    type BenchmarkHelper: crate::types::BenchmarkHelper<Self::AccountId>;
  }

  #[pallet::pallet]
  #[pallet::storage_version(STORAGE_VERSION)]
  pub struct Pallet<T>(_);

  /// The current storage version.
  const STORAGE_VERSION: StorageVersion = StorageVersion::new(1);

  pub type SaleInfoOf<T> = SaleInfo<<T as frame_system::Config>::AccountId>;

  #[pallet::storage]
  pub type NextSaleId<T> = StorageValue<_, SaleId, ValueQuery>;

  #[pallet::storage]
  pub type Sales<T: Config> = StorageMap<_, Blake2_128Concat, SaleId, SaleInfoOf<T>, OptionQuery>;

  /// Refund paid out by the most recent payment of each sale, zero included
  #[pallet::storage]
  pub type LastPayerOverflow<T> = StorageMap<_, Blake2_128Concat, SaleId, Balance, ValueQuery>;

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    SaleCreated {
      sale_id: SaleId,
      owner: T::AccountId,
      account: T::AccountId,
    },
    /// Token bound and exchange rate set; the sale left `NotStarted`
    SaleStarted {
      sale_id: SaleId,
      token: TokenId,
      exchange_rate: Balance,
    },
    PresaleDatesSet {
      sale_id: SaleId,
      start: Moment,
      end: Moment,
    },
    IcoDatesSet {
      sale_id: SaleId,
      start: Moment,
      phase_days: [u32; ICO_PHASES],
    },
    ManagerSet {
      sale_id: SaleId,
      manager: T::AccountId,
    },
    RateSet {
      sale_id: SaleId,
      exchange_rate: Balance,
    },
    /// Tokens granted by the manager outside the payment path
    TokensAllocated {
      sale_id: SaleId,
      to: T::AccountId,
      amount: Balance,
    },
    /// A payment was (fully or partially) filled
    Payment {
      sale_id: SaleId,
      wallet: T::AccountId,
      amount_coin: Balance,
      amount_paid: Balance,
      bonus_percent: u8,
    },
    /// The wallet ran dry; the sale is closed ahead of schedule
    SupplyExhausted { sale_id: SaleId },
    Finalized {
      sale_id: SaleId,
      token: TokenId,
      owner: T::AccountId,
    },
    ProceedsWithdrawn {
      sale_id: SaleId,
      to: T::AccountId,
      amount: Balance,
    },
  }

  #[pallet::error]
  pub enum Error<T> {
    /// No sale exists under this id
    SaleNotFound,
    /// Caller is not the sale owner
    NotOwner,
    /// Caller does not hold the manager capability
    NotManager,
    /// Ledger ownership of the token has not been handed to the sale account
    TokenNotOwnedBySale,
    /// The token does not exist in the ledger
    UnknownToken,
    /// The null account cannot take part in this operation
    NullAccount,
    /// Exchange rate must be positive
    ZeroRate,
    /// Payment must be positive
    ZeroPayment,
    /// Payment too small to buy any token at the current rate
    PaymentTooSmall,
    /// Presale end precedes its start
    InvalidSchedule,
    /// The sale already has a token bound
    AlreadyStarted,
    /// The manager can only be designated once
    ManagerAlreadySet,
    /// The current phase accepts neither payments nor allocations
    NotPayablePhase,
    /// The sale has not reached `AfterIco`
    NotFinalizable,
    AlreadyFinalized,
    /// Allocation exceeds the remaining sale supply
    InsufficientSupply,
    /// No tokens are left to sell
    SoldOut,
    /// Arithmetic overflow occurred
    ArithmeticOverflow,
  }

  #[pallet::call]
  impl<T: Config> Pallet<T> {
    /// Open a new sale owned by the caller.
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::create_sale())]
    pub fn create_sale(origin: OriginFor<T>) -> DispatchResult {
      let owner = ensure_signed(origin)?;
      Self::do_create_sale(owner).map(|_| ())
    }

    /// Bind `token` and set the exchange rate.
    ///
    /// Ledger ownership of `token` must already belong to [`Pallet::sale_account`].
    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::start())]
    pub fn start(
      origin: OriginFor<T>,
      sale_id: SaleId,
      token: TokenId,
      exchange_rate: Balance,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Sales::<T>::try_mutate(sale_id, |maybe| -> DispatchResult {
        let sale = maybe.as_mut().ok_or(Error::<T>::SaleNotFound)?;
        ensure!(sale.owner == who, Error::<T>::NotOwner);
        ensure!(sale.token.is_none(), Error::<T>::AlreadyStarted);
        ensure!(!exchange_rate.is_zero(), Error::<T>::ZeroRate);
        let token_owner = T::Ledger::owner_of(token).ok_or(Error::<T>::UnknownToken)?;
        ensure!(
          token_owner == Self::sale_account(sale_id),
          Error::<T>::TokenNotOwnedBySale
        );
        sale.token = Some(token);
        sale.exchange_rate = exchange_rate;
        Ok(())
      })?;
      log::info!(target: LOG_TARGET, "sale {sale_id} started with token {token}");
      Self::deposit_event(Event::SaleStarted {
        sale_id,
        token,
        exchange_rate,
      });
      Ok(())
    }

    /// Set the presale window `[start, end)`. Owner only.
    #[pallet::call_index(2)]
    #[pallet::weight(T::WeightInfo::set_presale_dates())]
    pub fn set_presale_dates(
      origin: OriginFor<T>,
      sale_id: SaleId,
      start: Moment,
      end: Moment,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      ensure!(start <= end, Error::<T>::InvalidSchedule);
      Self::mutate_as_owner(sale_id, &who, |sale| {
        sale.schedule.presale_start = start;
        sale.schedule.presale_end = end;
      })?;
      Self::deposit_event(Event::PresaleDatesSet {
        sale_id,
        start,
        end,
      });
      Ok(())
    }

    /// Set the ICO start and the length of each ICO phase in days. Owner only.
    #[pallet::call_index(3)]
    #[pallet::weight(T::WeightInfo::set_ico_dates())]
    pub fn set_ico_dates(
      origin: OriginFor<T>,
      sale_id: SaleId,
      start: Moment,
      phase_days: [u32; ICO_PHASES],
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::mutate_as_owner(sale_id, &who, |sale| {
        sale.schedule.ico_start = start;
        sale.schedule.ico_phase_days = phase_days;
      })?;
      Self::deposit_event(Event::IcoDatesSet {
        sale_id,
        start,
        phase_days,
      });
      Ok(())
    }

    /// Designate the manager. Owner only, and only once.
    #[pallet::call_index(4)]
    #[pallet::weight(T::WeightInfo::set_manager())]
    pub fn set_manager(
      origin: OriginFor<T>,
      sale_id: SaleId,
      manager: T::AccountId,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      ensure!(!is_null_account(&manager), Error::<T>::NullAccount);
      Sales::<T>::try_mutate(sale_id, |maybe| -> DispatchResult {
        let sale = maybe.as_mut().ok_or(Error::<T>::SaleNotFound)?;
        ensure!(sale.owner == who, Error::<T>::NotOwner);
        ensure!(sale.manager.is_none(), Error::<T>::ManagerAlreadySet);
        sale.manager = Some(manager.clone());
        Ok(())
      })?;
      Self::deposit_event(Event::ManagerSet { sale_id, manager });
      Ok(())
    }

    #[pallet::call_index(5)]
    #[pallet::weight(T::WeightInfo::set_rate())]
    pub fn set_rate(
      origin: OriginFor<T>,
      sale_id: SaleId,
      exchange_rate: Balance,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      ensure!(!exchange_rate.is_zero(), Error::<T>::ZeroRate);
      Sales::<T>::try_mutate(sale_id, |maybe| -> DispatchResult {
        let sale = maybe.as_mut().ok_or(Error::<T>::SaleNotFound)?;
        ensure!(sale.may_manage(&who), Error::<T>::NotManager);
        sale.exchange_rate = exchange_rate;
        Ok(())
      })?;
      log::debug!(target: LOG_TARGET, "sale {sale_id}: rate set to {exchange_rate}");
      Self::deposit_event(Event::RateSet {
        sale_id,
        exchange_rate,
      });
      Ok(())
    }

    /// Grant `amount` tokens from the wallet to `to` during the presale or the ICO.
    #[pallet::call_index(6)]
    #[pallet::weight(T::WeightInfo::transfer_ico())]
    pub fn transfer_ico(
      origin: OriginFor<T>,
      sale_id: SaleId,
      to: T::AccountId,
      amount: Balance,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::do_transfer_ico(&who, sale_id, &to, amount)
    }

    /// Buy tokens with `amount` of the payment currency.
    ///
    /// An order larger than the remaining supply is partially filled and the unfillable
    /// part refunded.
    #[pallet::call_index(7)]
    #[pallet::weight(T::WeightInfo::pay())]
    pub fn pay(origin: OriginFor<T>, sale_id: SaleId, amount: Balance) -> DispatchResult {
      let payer = ensure_signed(origin)?;
      Self::do_pay(&payer, sale_id, amount)
    }

    /// Close a sale past its ICO and hand the token back to the owner. Owner only.
    #[pallet::call_index(8)]
    #[pallet::weight(T::WeightInfo::finalize())]
    pub fn finalize(origin: OriginFor<T>, sale_id: SaleId) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::do_finalize(&who, sale_id)
    }

    /// Move collected payments from the sale account to the owner.
    #[pallet::call_index(9)]
    #[pallet::weight(T::WeightInfo::withdraw_proceeds())]
    pub fn withdraw_proceeds(origin: OriginFor<T>, sale_id: SaleId) -> DispatchResult {
      let who = ensure_signed(origin)?;
      let sale = Self::ensure_sale(sale_id)?;
      ensure!(sale.owner == who, Error::<T>::NotOwner);
      let account = Self::sale_account(sale_id);
      let amount =
        T::Currency::reducible_balance(&account, Preservation::Expendable, Fortitude::Polite);
      if !amount.is_zero() {
        T::Currency::transfer(&account, &who, amount, Preservation::Expendable)?;
      }
      Self::deposit_event(Event::ProceedsWithdrawn {
        sale_id,
        to: who,
        amount,
      });
      Ok(())
    }
  }

  impl<T: Config> Pallet<T> {
    /// Sovereign account of a sale; the ledger owner of its token while the sale runs.
    pub fn sale_account(sale_id: SaleId) -> T::AccountId {
      let seed = frame::hashing::blake2_256(&(b"sale", sale_id).encode());
      // Fold the seed into the id so small account types still get distinct accounts
      let mut id_bytes = T::PalletId::get().0;
      for (i, b) in seed.iter().enumerate() {
        id_bytes[i % 8] ^= b;
      }
      PalletId(id_bytes).into_sub_account_truncating(sale_id)
    }

    pub fn sale(sale_id: SaleId) -> Option<SaleInfoOf<T>> {
      Sales::<T>::get(sale_id)
    }

    /// Current phase. Unknown sales read as `NotStarted`.
    pub fn phase(sale_id: SaleId) -> SalePhase {
      Sales::<T>::get(sale_id).map_or(SalePhase::NotStarted, |sale| sale.phase_at(Self::now()))
    }

    /// Bonus percent granted in `phase`, `None` if the phase is not payable
    pub fn bonus_percent(phase: SalePhase) -> Option<u8> {
      phase.bonus().map(|bonus| bonus.deconstruct())
    }

    pub fn exchange_rate(sale_id: SaleId) -> Balance {
      Sales::<T>::get(sale_id).map_or(Zero::zero(), |sale| sale.exchange_rate)
    }

    pub fn last_payer_overflow(sale_id: SaleId) -> Balance {
      LastPayerOverflow::<T>::get(sale_id)
    }

    /// Designated manager, readable by the sale owner only.
    pub fn get_manager(
      caller: &T::AccountId,
      sale_id: SaleId,
    ) -> Result<Option<T::AccountId>, DispatchError> {
      let sale = Self::ensure_sale(sale_id)?;
      ensure!(sale.owner == *caller, Error::<T>::NotOwner);
      Ok(sale.manager)
    }

    pub(crate) fn do_create_sale(owner: T::AccountId) -> Result<SaleId, DispatchError> {
      ensure!(!is_null_account(&owner), Error::<T>::NullAccount);
      let sale_id = NextSaleId::<T>::get();
      let next = sale_id.checked_add(1).ok_or(Error::<T>::ArithmeticOverflow)?;
      NextSaleId::<T>::put(next);
      Sales::<T>::insert(sale_id, SaleInfo::new(owner.clone()));

      let account = Self::sale_account(sale_id);
      log::debug!(target: LOG_TARGET, "sale {sale_id} created");
      Self::deposit_event(Event::SaleCreated {
        sale_id,
        owner,
        account,
      });
      Ok(sale_id)
    }

    pub(crate) fn do_transfer_ico(
      who: &T::AccountId,
      sale_id: SaleId,
      to: &T::AccountId,
      amount: Balance,
    ) -> DispatchResult {
      let sale = Self::ensure_sale(sale_id)?;
      ensure!(sale.may_manage(who), Error::<T>::NotManager);
      ensure!(
        sale.phase_at(Self::now()).is_payable(),
        Error::<T>::NotPayablePhase
      );
      let token = sale.token.ok_or(Error::<T>::NotPayablePhase)?;
      let remaining = T::Ledger::wallet_balance(token).ok_or(Error::<T>::UnknownToken)?;
      ensure!(amount <= remaining, Error::<T>::InsufficientSupply);

      with_storage_layer(|| {
        T::Ledger::transfer_ico(&Self::sale_account(sale_id), token, to, amount)?;
        Self::deposit_event(Event::TokensAllocated {
          sale_id,
          to: to.clone(),
          amount,
        });
        Self::mark_sold_out_if_exhausted(sale_id, token)
      })
    }

    pub(crate) fn do_pay(payer: &T::AccountId, sale_id: SaleId, paid: Balance) -> DispatchResult {
      ensure!(!paid.is_zero(), Error::<T>::ZeroPayment);
      let sale = Self::ensure_sale(sale_id)?;
      let phase = sale.phase_at(Self::now());
      let bonus_percent = Self::bonus_percent(phase).ok_or(Error::<T>::NotPayablePhase)?;
      let token = sale.token.ok_or(Error::<T>::NotPayablePhase)?;
      let remaining = T::Ledger::wallet_balance(token).ok_or(Error::<T>::UnknownToken)?;
      ensure!(!remaining.is_zero(), Error::<T>::SoldOut);

      let quote = pricing::quote(paid, sale.exchange_rate, bonus_percent, remaining)
        .ok_or(Error::<T>::ArithmeticOverflow)?;
      ensure!(!quote.filled.is_zero(), Error::<T>::PaymentTooSmall);
      let account = Self::sale_account(sale_id);

      with_storage_layer(|| {
        T::Currency::transfer(payer, &account, paid, Preservation::Expendable)?;
        T::Ledger::transfer_ico(&account, token, payer, quote.filled)?;
        if !quote.refund.is_zero() {
          T::Currency::transfer(&account, payer, quote.refund, Preservation::Expendable)?;
        }
        LastPayerOverflow::<T>::insert(sale_id, quote.refund);

        log::debug!(
          target: LOG_TARGET,
          "sale {sale_id}: {paid} paid for {} tokens in {phase:?}, refund {}",
          quote.filled,
          quote.refund
        );
        Self::deposit_event(Event::Payment {
          sale_id,
          wallet: payer.clone(),
          amount_coin: quote.filled,
          amount_paid: paid,
          bonus_percent,
        });
        Self::mark_sold_out_if_exhausted(sale_id, token)
      })
    }

    pub(crate) fn do_finalize(who: &T::AccountId, sale_id: SaleId) -> DispatchResult {
      let sale = Self::ensure_sale(sale_id)?;
      ensure!(sale.owner == *who, Error::<T>::NotOwner);
      ensure!(!sale.finalized, Error::<T>::AlreadyFinalized);
      ensure!(
        sale.phase_at(Self::now()) == SalePhase::AfterIco,
        Error::<T>::NotFinalizable
      );
      let token = sale.token.ok_or(Error::<T>::NotFinalizable)?;
      let account = Self::sale_account(sale_id);

      with_storage_layer(|| {
        T::Ledger::finalize_ico(&account, token)?;
        T::Ledger::transfer_ownership(&account, token, &sale.owner)?;
        Sales::<T>::mutate(sale_id, |maybe| {
          if let Some(sale) = maybe {
            sale.finalized = true;
          }
        });
        Ok::<_, DispatchError>(())
      })?;

      log::info!(target: LOG_TARGET, "sale {sale_id} finalized");
      Self::deposit_event(Event::Finalized {
        sale_id,
        token,
        owner: sale.owner,
      });
      Ok(())
    }

    fn now() -> Moment {
      T::UnixTime::now().as_secs()
    }

    fn ensure_sale(sale_id: SaleId) -> Result<SaleInfoOf<T>, DispatchError> {
      Sales::<T>::get(sale_id).ok_or_else(|| Error::<T>::SaleNotFound.into())
    }

    fn mutate_as_owner(
      sale_id: SaleId,
      who: &T::AccountId,
      f: impl FnOnce(&mut SaleInfoOf<T>),
    ) -> DispatchResult {
      Sales::<T>::try_mutate(sale_id, |maybe| {
        let sale = maybe.as_mut().ok_or(Error::<T>::SaleNotFound)?;
        ensure!(sale.owner == *who, Error::<T>::NotOwner);
        f(sale);
        Ok(())
      })
    }

    /// Close the sale once the wallet holds nothing more to sell.
    fn mark_sold_out_if_exhausted(sale_id: SaleId, token: TokenId) -> DispatchResult {
      let left = T::Ledger::wallet_balance(token).ok_or(Error::<T>::UnknownToken)?;
      if left.is_zero() {
        Self::mark_sold_out(sale_id);
      }
      Ok(())
    }

    fn mark_sold_out(sale_id: SaleId) {
      Sales::<T>::mutate(sale_id, |maybe| {
        if let Some(sale) = maybe {
          sale.sold_out = true;
        }
      });
      log::info!(target: LOG_TARGET, "sale {sale_id}: supply exhausted");
      Self::deposit_event(Event::SupplyExhausted { sale_id });
    }
  }
}
