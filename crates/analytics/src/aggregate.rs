//! The primitive aggregates every report figure is built from.
//!
//! All functions accept an empty ledger and return zero totals or empty
//! series for it. Parlay legs never contribute to stakes, profits or tallies.
//! Sums saturate at the bounds of `Decimal` instead of overflowing.

use chrono::NaiveDate;
use core_types::{BetRecord, BetResult, CategoryField, round_working};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Win / loss / void counts over standalone bets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordTally {
    pub wins: usize,
    pub losses: usize,
    pub voids: usize,
}

impl fmt::Display for RecordTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.wins, self.losses, self.voids)
    }
}

/// One point of a date-indexed series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: Decimal,
}

/// Units staked across standalone bets.
pub fn total_staked(ledger: &[BetRecord]) -> Decimal {
    saturating_sum(ledger.iter().filter_map(BetRecord::units))
}

pub fn total_profit_units(ledger: &[BetRecord]) -> Decimal {
    saturating_sum(ledger.iter().filter_map(BetRecord::profit_units))
}

pub fn total_profit_currency(ledger: &[BetRecord]) -> Decimal {
    saturating_sum(ledger.iter().filter_map(BetRecord::profit_currency))
}

fn saturating_sum(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Number of standalone bets.
pub fn total_bets(ledger: &[BetRecord]) -> usize {
    ledger.iter().filter(|record| !record.is_parlay_leg()).count()
}

pub fn record_tally(ledger: &[BetRecord]) -> RecordTally {
    ledger
        .iter()
        .filter(|record| !record.is_parlay_leg())
        .fold(RecordTally::default(), |mut tally, record| {
            match record.result() {
                BetResult::Win => tally.wins += 1,
                BetResult::Loss => tally.losses += 1,
                BetResult::Void => tally.voids += 1,
                BetResult::Open => {}
            }
            tally
        })
}

/// Return on investment as a percentage: `profit / staked * 100`.
///
/// Returns zero when nothing was staked, and saturates when the ratio does not
/// fit in a `Decimal`.
pub fn roi(profit_units: Decimal, staked: Decimal) -> Decimal {
    if staked <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    profit_units
        .checked_div(staked)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(round_working)
        .unwrap_or(if profit_units.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
}

pub fn ledger_roi(ledger: &[BetRecord]) -> Decimal {
    roi(total_profit_units(ledger), total_staked(ledger))
}

/// Profit units summed per date, ascending by date.
pub fn daily_profit_series(ledger: &[BetRecord]) -> Vec<SeriesPoint> {
    let mut by_date: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for record in ledger {
        let total = by_date.entry(record.date()).or_default();
        *total = total.saturating_add(record.profit_units().unwrap_or_default());
    }
    by_date
        .into_iter()
        .map(|(date, value)| SeriesPoint { date, value })
        .collect()
}

/// Running prefix sum of a daily series (the equity curve).
pub fn cumulative_profit_series(daily: &[SeriesPoint]) -> Vec<SeriesPoint> {
    daily
        .iter()
        .scan(Decimal::ZERO, |running, point| {
            *running = running.saturating_add(point.value);
            Some(SeriesPoint {
                date: point.date,
                value: *running,
            })
        })
        .collect()
}

/// Profit units summed per value of a categorical field.
pub fn profit_by(ledger: &[BetRecord], field: CategoryField) -> BTreeMap<String, Decimal> {
    let mut groups: BTreeMap<String, Decimal> = BTreeMap::new();
    for record in ledger {
        let total = groups.entry(record.category(field).to_string()).or_default();
        *total = total.saturating_add(record.profit_units().unwrap_or_default());
    }
    groups
}

/// Largest peak-to-trough fall of an equity curve, in units.
///
/// The curve starts from a flat zero balance, so a losing first day already
/// counts as drawdown.
pub fn max_drawdown(cumulative: &[SeriesPoint]) -> Decimal {
    let mut peak = Decimal::ZERO;
    let mut max_drawdown = Decimal::ZERO;

    for point in cumulative {
        if point.value > peak {
            peak = point.value;
        }
        let drawdown = peak.saturating_sub(point.value);
        if drawdown > max_drawdown {
            max_drawdown = drawdown;
        }
    }

    max_drawdown
}
