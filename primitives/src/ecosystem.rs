//! Ecosystem Constants for the Token Sale
//!
//! This module centralizes the numeric conventions shared by the ledger and the sale
//! controller: token precision, exchange-rate scaling, phase layout and pallet IDs.
//!
//! Pricing outputs depend on these values being identical on both sides, so they live
//! here rather than in either pallet's configuration.

use codec::Encode;

/// Balance type alias for consistency across the workspace
pub type Balance = u128;

/// Wall-clock instant in unix seconds
pub type Moment = u64;

/// Identifier of a token held by the ledger
pub type TokenId = u32;

/// Identifier of a sale run by the sale controller
pub type SaleId = u32;

/// Pallet identifiers for deriving pallet-owned accounts.
///
/// Each sale gets its own sovereign account derived from this ID and the sale index
/// via `PalletId::into_sub_account_truncating()`.
pub mod pallet_ids {
  /// Token sale controller pallet ID
  pub const TOKEN_SALE_PALLET_ID: &[u8; 8] = b"py/tksal";
}

/// Numeric parameters of the sale.
pub mod params {
  use super::Balance;

  /// Decimal places of every token and of the payment currency.
  pub const DECIMALS: u8 = 18;

  /// One whole token in base units (10^18).
  pub const ONE_TOKEN: Balance = 1_000_000_000_000_000_000;

  /// Divisor applied to the configured exchange rate.
  ///
  /// A rate of `R` yields `R / 1000` whole tokens per whole unit of payment currency,
  /// e.g. `100_000_000_000` means one unit of currency buys 100M tokens.
  pub const RATE_PRECISION: Balance = 1_000;

  /// Denominator of bonus percentages.
  pub const PERCENT_BASE: Balance = 100;

  /// Number of consecutive ICO phases following the presale.
  pub const ICO_PHASES: usize = 5;

  /// ICO phase durations are configured in days.
  pub const SECONDS_PER_DAY: u64 = 86_400;

  /// Upper bound on accounts frozen by a single ledger call.
  pub const MAX_FREEZE_BATCH: u32 = 100;
}

/// An account is "null" when its encoding is all zero bytes.
///
/// Chains have no reserved zero address, so the account decoded from a zeroed buffer
/// stands in for it and is rejected wherever a real destination is required.
pub fn is_null_account<AccountId: Encode>(who: &AccountId) -> bool {
  who.using_encoded(|bytes| bytes.iter().all(|b| *b == 0))
}
