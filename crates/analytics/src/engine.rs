use crate::aggregate::{
    cumulative_profit_series, daily_profit_series, max_drawdown, profit_by, record_tally, roi,
    total_bets, total_profit_currency, total_profit_units, total_staked,
};
use crate::period::Period;
use crate::report::{DashboardReport, PeriodMetrics, StakingBaseline, Summary};
use chrono::NaiveDate;
use core_types::{BetRecord, CategoryField};
use tracing::debug;

/// A stateless calculator for deriving every reported statistic from a ledger.
///
/// Figures are read from each record's own stored profit, which was priced with
/// the stake-unit value in effect when the bet was placed. Configuration is
/// never consulted here.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for building a dashboard report.
    ///
    /// # Arguments
    ///
    /// * `ledger` - The (typically already filtered) ledger.
    /// * `today` - The reference date for the rolling windows.
    pub fn calculate(&self, ledger: &[BetRecord], today: NaiveDate) -> DashboardReport {
        let mut report = DashboardReport::new(today);

        debug!(records = ledger.len(), %today, "Calculating dashboard report.");

        if ledger.is_empty() {
            // Totals stay zero, but every window is still reported.
            self.calculate_periods(ledger, today, &mut report);
            return report;
        }

        self.calculate_summary(ledger, &mut report);
        self.calculate_periods(ledger, today, &mut report);
        self.calculate_baseline(ledger, today, &mut report);
        self.calculate_series(ledger, &mut report);
        self.calculate_breakdowns(ledger, &mut report);

        report
    }

    fn calculate_summary(&self, ledger: &[BetRecord], report: &mut DashboardReport) {
        let staked = total_staked(ledger);
        let profit_units = total_profit_units(ledger);

        report.summary = Summary {
            total_bets: total_bets(ledger),
            total_staked: staked,
            total_profit_units: profit_units,
            total_profit_currency: total_profit_currency(ledger),
            record: record_tally(ledger),
            roi_pct: roi(profit_units, staked),
        };
    }

    fn calculate_periods(&self, ledger: &[BetRecord], today: NaiveDate, report: &mut DashboardReport) {
        report.periods = Period::ALL
            .iter()
            .map(|period| {
                let bucket: Vec<BetRecord> = ledger
                    .iter()
                    .filter(|record| period.contains(record.date(), today))
                    .cloned()
                    .collect();
                PeriodMetrics {
                    period: *period,
                    profit_units: total_profit_units(&bucket),
                    profit_currency: total_profit_currency(&bucket),
                    record: record_tally(&bucket),
                }
            })
            .collect();
    }

    /// Staking totals as of yesterday, i.e. over bets dated strictly before `today`.
    fn calculate_baseline(&self, ledger: &[BetRecord], today: NaiveDate, report: &mut DashboardReport) {
        let before_today: Vec<BetRecord> = ledger
            .iter()
            .filter(|record| record.date() < today)
            .cloned()
            .collect();

        let staked = total_staked(&before_today);
        let profit_units = total_profit_units(&before_today);
        report.baseline = StakingBaseline {
            total_staked: staked,
            total_profit_units: profit_units,
            roi_pct: roi(profit_units, staked),
        };
    }

    fn calculate_series(&self, ledger: &[BetRecord], report: &mut DashboardReport) {
        report.daily_profit = daily_profit_series(ledger);
        report.cumulative_profit = cumulative_profit_series(&report.daily_profit);
        report.max_drawdown_units = max_drawdown(&report.cumulative_profit);
    }

    fn calculate_breakdowns(&self, ledger: &[BetRecord], report: &mut DashboardReport) {
        report.profit_by_sport = profit_by(ledger, CategoryField::Sport);
        report.profit_by_capper = profit_by(ledger, CategoryField::Capper);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{BetDetails, BetResult};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn bet(on: NaiveDate, units: Decimal, result: BetResult) -> BetRecord {
        BetRecord::standalone(BetDetails::new(on), units, dec!(2), result, dec!(10)).unwrap()
    }

    #[test]
    fn empty_ledger_reports_zero_everywhere() {
        let report = AnalyticsEngine::new().calculate(&[], date(5, 15));
        assert_eq!(report.summary.total_staked, Decimal::ZERO);
        assert_eq!(report.summary.roi_pct, Decimal::ZERO);
        assert_eq!(report.periods.len(), Period::ALL.len());
        assert!(report
            .periods
            .iter()
            .all(|p| p.profit_units.is_zero() && p.record.to_string() == "0-0-0"));
        assert!(report.daily_profit.is_empty());
        assert!(report.cumulative_profit.is_empty());
    }

    #[test]
    fn baseline_excludes_today() {
        let today = date(5, 15);
        let ledger = vec![
            bet(date(5, 14), dec!(2), BetResult::Win),
            bet(today, dec!(3), BetResult::Open),
        ];
        let report = AnalyticsEngine::new().calculate(&ledger, today);

        assert_eq!(report.summary.total_staked, dec!(5));
        assert_eq!(report.baseline.total_staked, dec!(2));
        assert_eq!(report.baseline.total_profit_units, dec!(2));
        assert_eq!(report.baseline.roi_pct, dec!(100));
        assert_eq!(report.summary.roi_pct, dec!(40));
    }

    #[test]
    fn windows_bucket_by_reference_date() {
        let today = date(5, 3);
        let ledger = vec![
            bet(today, dec!(1), BetResult::Win),
            bet(date(5, 2), dec!(1), BetResult::Loss),
            bet(date(4, 28), dec!(2), BetResult::Win),
            bet(date(4, 20), dec!(4), BetResult::Loss),
        ];
        let report = AnalyticsEngine::new().calculate(&ledger, today);

        let today_metrics = report.period(Period::Today).unwrap();
        assert_eq!(today_metrics.profit_units, dec!(1));
        assert_eq!(today_metrics.profit_currency, dec!(10));
        assert_eq!(today_metrics.record.to_string(), "1-0-0");

        assert_eq!(report.period(Period::Yesterday).unwrap().profit_units, dec!(-1));

        let week = report.period(Period::Last7Days).unwrap();
        assert_eq!(week.profit_units, dec!(2));
        assert_eq!(week.record.to_string(), "2-1-0");

        let month = report.period(Period::CurrentMonth).unwrap();
        assert_eq!(month.profit_units, dec!(0));
        assert_eq!(month.record.to_string(), "1-1-0");
    }

    #[test]
    fn series_and_drawdown_follow_the_daily_profit() {
        let ledger = vec![
            bet(date(5, 1), dec!(2), BetResult::Win),
            bet(date(5, 2), dec!(1), BetResult::Loss),
            bet(date(5, 3), dec!(1), BetResult::Void),
        ];
        let report = AnalyticsEngine::new().calculate(&ledger, date(5, 3));

        let cumulative: Vec<Decimal> = report.cumulative_profit.iter().map(|p| p.value).collect();
        assert_eq!(cumulative, vec![dec!(2), dec!(1), dec!(1)]);
        assert_eq!(report.max_drawdown_units, dec!(1));
    }
}
