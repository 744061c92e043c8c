use crate::aggregate::{RecordTally, SeriesPoint};
use crate::period::Period;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Headline figures over the whole filtered ledger.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_bets: usize,
    pub total_staked: Decimal,
    pub total_profit_units: Decimal,
    pub total_profit_currency: Decimal,
    pub record: RecordTally,
    pub roi_pct: Decimal,
}

/// Profit and record inside one rolling window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodMetrics {
    pub period: Period,
    pub profit_units: Decimal,
    pub profit_currency: Decimal,
    pub record: RecordTally,
}

/// Staking figures restricted to bets dated before `today`, so trend displays
/// are not skewed by same-day bets that may still be open.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StakingBaseline {
    pub total_staked: Decimal,
    pub total_profit_units: Decimal,
    pub roi_pct: Decimal,
}

/// Everything the reporting layer displays, computed in one pass by the
/// `AnalyticsEngine`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    /// The reference date the rolling windows were computed against.
    pub today: NaiveDate,

    // I. Totals
    pub summary: Summary,

    // II. Rolling windows
    pub periods: Vec<PeriodMetrics>,
    pub baseline: StakingBaseline,

    // III. Series (units)
    pub daily_profit: Vec<SeriesPoint>,
    pub cumulative_profit: Vec<SeriesPoint>,
    pub max_drawdown_units: Decimal,

    // IV. Breakdowns (units)
    pub profit_by_sport: BTreeMap<String, Decimal>,
    pub profit_by_capper: BTreeMap<String, Decimal>,
}

impl DashboardReport {
    /// Creates a zeroed-out report for the given reference date.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            summary: Summary::default(),
            periods: Vec::new(),
            baseline: StakingBaseline::default(),
            daily_profit: Vec::new(),
            cumulative_profit: Vec::new(),
            max_drawdown_units: Decimal::ZERO,
            profit_by_sport: BTreeMap::new(),
            profit_by_capper: BTreeMap::new(),
        }
    }

    pub fn period(&self, period: Period) -> Option<&PeriodMetrics> {
        self.periods.iter().find(|metrics| metrics.period == period)
    }
}
