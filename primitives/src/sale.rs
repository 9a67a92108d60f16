use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};
use sp_arithmetic::Percent;

use crate::ecosystem::{
  Moment,
  params::{ICO_PHASES, SECONDS_PER_DAY},
};

/// Discrete stage of a sale.
///
/// The phase is never stored. It is derived from the sale configuration and the
/// current time on every read, so changing the configured windows can never leave
/// a stale phase behind.
///
/// Each variant carries a signed diagnostic code (see [`SalePhase::code`]):
/// `NotStarted = -5`, `BeforePresale = -4`, `BetweenPresaleAndIco = -3`,
/// `Presale = 0`, `IcoPhase1..=IcoPhase5 = 1..=5`, `AfterIco = -2`, `Finalized = -1`.
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  MaxEncodedLen,
  PartialEq,
  TypeInfo,
  Serialize,
  Deserialize,
)]
pub enum SalePhase {
  /// No token bound or no exchange rate configured yet
  NotStarted,
  BeforePresale,
  BetweenPresaleAndIco,
  Presale,
  IcoPhase1,
  IcoPhase2,
  IcoPhase3,
  IcoPhase4,
  IcoPhase5,
  /// ICO window elapsed or sale supply exhausted
  AfterIco,
  Finalized,
}

/// ICO sub-phases in chronological order.
pub const ICO_STAGES: [SalePhase; ICO_PHASES] = [
  SalePhase::IcoPhase1,
  SalePhase::IcoPhase2,
  SalePhase::IcoPhase3,
  SalePhase::IcoPhase4,
  SalePhase::IcoPhase5,
];

impl SalePhase {
  /// Signed diagnostic code of the phase.
  pub const fn code(self) -> i8 {
    match self {
      SalePhase::NotStarted => -5,
      SalePhase::BeforePresale => -4,
      SalePhase::BetweenPresaleAndIco => -3,
      SalePhase::Presale => 0,
      SalePhase::IcoPhase1 => 1,
      SalePhase::IcoPhase2 => 2,
      SalePhase::IcoPhase3 => 3,
      SalePhase::IcoPhase4 => 4,
      SalePhase::IcoPhase5 => 5,
      SalePhase::AfterIco => -2,
      SalePhase::Finalized => -1,
    }
  }

  pub fn from_code(code: i8) -> Option<Self> {
    match code {
      -5 => Some(SalePhase::NotStarted),
      -4 => Some(SalePhase::BeforePresale),
      -3 => Some(SalePhase::BetweenPresaleAndIco),
      -2 => Some(SalePhase::AfterIco),
      -1 => Some(SalePhase::Finalized),
      0 => Some(SalePhase::Presale),
      1..=5 => ICO_STAGES.get(code as usize - 1).copied(),
      _ => None,
    }
  }

  /// Position of the phase along the natural progression of a sale.
  ///
  /// Unlike [`SalePhase::code`] this is totally ordered in time: the presale sits
  /// between `BeforePresale` and `BetweenPresaleAndIco`.
  pub const fn progress(self) -> u8 {
    match self {
      SalePhase::NotStarted => 0,
      SalePhase::BeforePresale => 1,
      SalePhase::Presale => 2,
      SalePhase::BetweenPresaleAndIco => 3,
      SalePhase::IcoPhase1 => 4,
      SalePhase::IcoPhase2 => 5,
      SalePhase::IcoPhase3 => 6,
      SalePhase::IcoPhase4 => 7,
      SalePhase::IcoPhase5 => 8,
      SalePhase::AfterIco => 9,
      SalePhase::Finalized => 10,
    }
  }

  /// Bonus granted on top of the base exchange rate, `None` when the phase
  /// does not accept payments.
  pub fn bonus(self) -> Option<Percent> {
    let percent = match self {
      SalePhase::Presale | SalePhase::IcoPhase1 => 40,
      SalePhase::IcoPhase2 => 30,
      SalePhase::IcoPhase3 => 20,
      SalePhase::IcoPhase4 => 10,
      SalePhase::IcoPhase5 => 0,
      _ => return None,
    };
    Some(Percent::from_percent(percent))
  }

  /// Payments and manual allocations are accepted only during the presale and the ICO.
  pub fn is_payable(self) -> bool {
    self.bonus().is_some()
  }
}

/// Presale window and ICO layout of a sale.
///
/// The presale spans `[presale_start, presale_end)`. ICO phase `k` (1-indexed) spans
/// `[ico_start + sum(days[..k-1]), ico_start + sum(days[..k]))`, days converted to seconds.
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Default,
  Encode,
  Eq,
  MaxEncodedLen,
  PartialEq,
  TypeInfo,
  Serialize,
  Deserialize,
)]
pub struct SaleSchedule {
  pub presale_start: Moment,
  pub presale_end: Moment,
  pub ico_start: Moment,
  pub ico_phase_days: [u32; ICO_PHASES],
}

impl SaleSchedule {
  /// Exclusive end of the last ICO phase.
  pub fn ico_end(&self) -> Moment {
    self
      .ico_phase_days
      .iter()
      .fold(self.ico_start, |boundary, days| {
        boundary.saturating_add(Self::days_to_seconds(*days))
      })
  }

  /// Time-derived phase of a started, unfinalized sale. First matching window wins.
  pub fn phase_at(&self, now: Moment) -> SalePhase {
    if now < self.presale_start {
      return SalePhase::BeforePresale;
    }
    if now < self.presale_end {
      return SalePhase::Presale;
    }
    if now < self.ico_start {
      return SalePhase::BetweenPresaleAndIco;
    }
    let mut boundary = self.ico_start;
    for (stage, days) in ICO_STAGES.iter().zip(self.ico_phase_days.iter()) {
      boundary = boundary.saturating_add(Self::days_to_seconds(*days));
      if now < boundary {
        return *stage;
      }
    }
    SalePhase::AfterIco
  }

  fn days_to_seconds(days: u32) -> Moment {
    Moment::from(days).saturating_mul(SECONDS_PER_DAY)
  }
}
