use analytics::{AnalyticsEngine, FilterEngine, FilterSpec, Period};
use chrono::NaiveDate;
use core_types::{BetDetails, BetRecord, BetResult, CategoryField, Outcome, Settlement};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, d).unwrap()
}

fn details(d: u32, sport: &str, capper: &str) -> BetDetails {
    let mut details = BetDetails::new(date(d));
    details.bookie = "Pinnacle".to_string();
    details.sport = sport.to_string();
    details.capper = capper.to_string();
    details
}

fn ledger() -> Vec<BetRecord> {
    vec![
        BetRecord::standalone(details(1, "Football", "Ana"), dec!(1), dec!(2.0), BetResult::Win, dec!(10)).unwrap(),
        BetRecord::standalone(details(2, "Football", "Ana"), dec!(2), dec!(2.0), BetResult::Win, dec!(10)).unwrap(),
        BetRecord::standalone(details(2, "Tennis", "Bo"), dec!(3), dec!(2.0), BetResult::Win, dec!(10)).unwrap(),
        BetRecord::parlay_leg(details(3, "Tennis", "Bo"), BetResult::Win, Some(dec!(10))),
    ]
}

#[test]
fn three_wins_and_a_leg() {
    let report = AnalyticsEngine::new().calculate(&ledger(), date(3));

    assert_eq!(report.summary.total_staked, dec!(6));
    assert_eq!(report.summary.total_profit_units, dec!(6));
    assert_eq!(report.summary.total_profit_currency, dec!(60));
    assert_eq!(report.summary.roi_pct, dec!(100.0));
    assert_eq!(report.summary.total_bets, 3);
    assert_eq!(report.summary.record.to_string(), "3-0-0");

    assert_eq!(report.profit_by_sport["Football"], dec!(3));
    assert_eq!(report.profit_by_sport["Tennis"], dec!(3));
    assert_eq!(report.profit_by_capper["Bo"], dec!(3));
}

#[test]
fn filtered_report_only_sees_the_subset() {
    let ledger = ledger();
    let spec = FilterSpec::new()
        .allow(CategoryField::Sport, "Football")
        .date_range(Some(date(2)), None);
    let filtered = FilterEngine::new(spec).apply(&ledger);

    let report = AnalyticsEngine::new().calculate(&filtered, date(3));
    assert_eq!(report.summary.total_staked, dec!(2));
    assert_eq!(report.summary.total_profit_units, dec!(2));
    assert_eq!(report.period(Period::Yesterday).unwrap().profit_units, dec!(2));
    assert_eq!(report.daily_profit.len(), 1);
}

#[test]
fn stake_unit_snapshot_survives_config_changes() {
    // Same stake and odd, placed when one unit was worth 10 and later 25.
    let ledger = vec![
        BetRecord::standalone(details(1, "Football", "Ana"), dec!(1), dec!(3), BetResult::Win, dec!(10)).unwrap(),
        BetRecord::standalone(details(2, "Football", "Ana"), dec!(1), dec!(3), BetResult::Win, dec!(25)).unwrap(),
    ];
    let report = AnalyticsEngine::new().calculate(&ledger, date(2));
    assert_eq!(report.summary.total_profit_units, dec!(4));
    assert_eq!(report.summary.total_profit_currency, dec!(70));
}

#[test]
fn settling_moves_figures_into_the_report() {
    let mut ledger = vec![
        BetRecord::standalone(details(5, "Tennis", "Bo"), dec!(2), dec!(1.75), BetResult::Open, dec!(10)).unwrap(),
    ];
    let before = AnalyticsEngine::new().calculate(&ledger, date(5));
    assert_eq!(before.summary.total_profit_units, Decimal::ZERO);
    assert_eq!(before.summary.record.to_string(), "0-0-0");

    ledger[0]
        .settle(&Settlement::new(Outcome::Win).with_score("6-4 6-3"))
        .unwrap();

    let after = AnalyticsEngine::new().calculate(&ledger, date(5));
    assert_eq!(after.summary.total_profit_units, dec!(1.5));
    assert_eq!(after.summary.total_profit_currency, dec!(15));
    assert_eq!(after.summary.record.to_string(), "1-0-0");
    assert_eq!(after.period(Period::Today).unwrap().profit_units, dec!(1.5));
}

#[test]
fn report_serializes_to_json() {
    let report = AnalyticsEngine::new().calculate(&ledger(), date(3));
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["summary"]["total_bets"], 3);
    assert_eq!(json["periods"].as_array().unwrap().len(), 4);
    assert_eq!(json["periods"][2]["period"], "last_7_days");
}
