use frame::prelude::*;
use primitives::{Balance, Moment, SalePhase, SaleSchedule, TokenId};

/// Ledger-backed operations the sale controller needs.
pub use pallet_token_ledger::LedgerInterface;

/// Stored state of one sale.
///
/// The phase is not part of it; see [`SaleInfo::phase_at`].
#[derive(Clone, Encode, Decode, Eq, PartialEq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct SaleInfo<AccountId> {
  /// Creator of the sale; configures windows, finalizes and withdraws proceeds
  pub owner: AccountId,
  /// Set once; holds the rate and manual allocation capability
  pub manager: Option<AccountId>,
  /// Bound by `start`
  pub token: Option<TokenId>,
  /// Tokens per unit of payment currency, scaled by `RATE_PRECISION`
  pub exchange_rate: Balance,
  pub schedule: SaleSchedule,
  /// The sale-supply holder ran dry during the sale
  pub sold_out: bool,
  pub finalized: bool,
}

impl<AccountId: PartialEq> SaleInfo<AccountId> {
  pub fn new(owner: AccountId) -> Self {
    Self {
      owner,
      manager: None,
      token: None,
      exchange_rate: 0,
      schedule: SaleSchedule::default(),
      sold_out: false,
      finalized: false,
    }
  }

  pub fn is_started(&self) -> bool {
    self.token.is_some() && self.exchange_rate > 0
  }

  /// Phase of the sale at `now`. First matching rule wins.
  pub fn phase_at(&self, now: Moment) -> SalePhase {
    if !self.is_started() {
      return SalePhase::NotStarted;
    }
    if self.finalized {
      return SalePhase::Finalized;
    }
    if self.sold_out {
      return SalePhase::AfterIco;
    }
    self.schedule.phase_at(now)
  }

  /// The designated manager, or the owner while no manager has been designated.
  pub fn may_manage(&self, who: &AccountId) -> bool {
    match &self.manager {
      Some(manager) => manager == who,
      None => self.owner == *who,
    }
  }
}

/// Helper for benchmarking
#[cfg(feature = "runtime-benchmarks")]
pub trait BenchmarkHelper<AccountId> {
  /// Create a token holding `supply`, owned and held by `holder`
  fn create_token(holder: &AccountId, supply: Balance) -> Result<TokenId, DispatchError>;
  /// Give `who` enough payment currency to cover `amount`
  fn fund(who: &AccountId, amount: Balance);
}
