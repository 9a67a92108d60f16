//! Exchange-rate pricing with bonus tiers and overflow refunds.
//!
//! A payment of `paid` at rate `rate` and bonus `b` buys
//! `paid * rate * (100 + b) / (RATE_PRECISION * 100)` tokens. The inverse is used to
//! price the part of an order that exceeds the remaining supply. Intermediate products
//! are computed in 256 bits and every division floors.

use frame::deps::sp_core::U256;
use primitives::{
  Balance,
  params::{PERCENT_BASE, RATE_PRECISION},
};

/// Outcome of pricing one payment against the remaining sale supply.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Quote {
  /// Tokens the payment would buy with unlimited supply
  pub requested: Balance,
  /// Tokens actually allocated, `min(requested, remaining)`
  pub filled: Balance,
  /// Payment-currency equivalent of `requested - filled`, returned to the payer
  pub refund: Balance,
}

fn to_balance(value: U256) -> Option<Balance> {
  if value > U256::from(Balance::MAX) {
    return None;
  }
  Some(value.as_u128())
}

fn bonus_factor(bonus_percent: u8) -> U256 {
  U256::from(PERCENT_BASE).saturating_add(U256::from(bonus_percent))
}

/// Tokens bought by `paid` units of payment currency. `None` on overflow.
pub fn tokens_for_payment(paid: Balance, rate: Balance, bonus_percent: u8) -> Option<Balance> {
  let numerator = U256::from(paid)
    .checked_mul(U256::from(rate))?
    .checked_mul(bonus_factor(bonus_percent))?;
  let denominator = U256::from(RATE_PRECISION).saturating_mul(U256::from(PERCENT_BASE));
  to_balance(numerator.checked_div(denominator)?)
}

/// Payment-currency equivalent of `tokens`, floored. `None` for a zero rate or on overflow.
pub fn payment_for_tokens(tokens: Balance, rate: Balance, bonus_percent: u8) -> Option<Balance> {
  let numerator = U256::from(tokens)
    .checked_mul(U256::from(RATE_PRECISION))?
    .checked_mul(U256::from(PERCENT_BASE))?;
  let denominator = U256::from(rate).checked_mul(bonus_factor(bonus_percent))?;
  if denominator.is_zero() {
    return None;
  }
  to_balance(numerator.checked_div(denominator)?)
}

/// Price `paid` against `remaining` supply, partially filling and refunding any excess.
pub fn quote(paid: Balance, rate: Balance, bonus_percent: u8, remaining: Balance) -> Option<Quote> {
  let requested = tokens_for_payment(paid, rate, bonus_percent)?;
  if requested <= remaining {
    return Some(Quote {
      requested,
      filled: requested,
      refund: 0,
    });
  }
  let excess = requested.saturating_sub(remaining);
  let refund = payment_for_tokens(excess, rate, bonus_percent)?.min(paid);
  Some(Quote {
    requested,
    filled: remaining,
    refund,
  })
}
