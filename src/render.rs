use analytics::{DashboardReport, SeriesPoint};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use configuration::Settings;
use core_types::{BetRecord, CategoryField, round_display};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Formats a money or unit figure for display.
pub fn money(value: Decimal) -> String {
    format!("{:.2}", round_display(value))
}

fn optional_money(value: Option<Decimal>) -> String {
    value.map(money).unwrap_or_default()
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn numeric(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// Renders ledger records with their row ids, in the order given.
pub fn records_table(rows: &[(usize, &BetRecord)]) -> Table {
    let mut table = new_table(vec![
        "Row", "Date", "Parlay", "Bookie", "Sport", "Capper", "Selection", "Event", "Units",
        "Odd", "Result", "Profit (u)", "Profit ($)",
    ]);

    for (row, record) in rows {
        let details = record.details();
        table.add_row(vec![
            numeric(row.to_string()),
            Cell::new(details.date),
            Cell::new(if record.is_parlay_leg() { "Y" } else { "" }),
            Cell::new(&details.bookie),
            Cell::new(&details.sport),
            Cell::new(&details.capper),
            Cell::new(&details.selection),
            Cell::new(&details.event),
            numeric(record.units().map(|u| u.normalize().to_string()).unwrap_or_default()),
            numeric(record.odd().map(|o| o.normalize().to_string()).unwrap_or_default()),
            Cell::new(record.result()),
            numeric(optional_money(record.profit_units())),
            numeric(optional_money(record.profit_currency())),
        ]);
    }
    table
}

pub fn summary_table(report: &DashboardReport) -> Table {
    let summary = &report.summary;
    let mut table = new_table(vec!["Metric", "Value"]);
    table
        .add_row(vec![Cell::new("Bets"), numeric(summary.total_bets.to_string())])
        .add_row(vec![Cell::new("Staked (u)"), numeric(money(summary.total_staked))])
        .add_row(vec![Cell::new("Profit (u)"), numeric(money(summary.total_profit_units))])
        .add_row(vec![Cell::new("Profit ($)"), numeric(money(summary.total_profit_currency))])
        .add_row(vec![Cell::new("ROI %"), numeric(money(summary.roi_pct))])
        .add_row(vec![Cell::new("Record (W-L-V)"), numeric(summary.record.to_string())])
        .add_row(vec![Cell::new("Max drawdown (u)"), numeric(money(report.max_drawdown_units))]);
    table
}

pub fn periods_table(report: &DashboardReport) -> Table {
    let mut table = new_table(vec!["Period", "Profit (u)", "Profit ($)", "Record"]);
    for metrics in &report.periods {
        table.add_row(vec![
            Cell::new(metrics.period),
            numeric(money(metrics.profit_units)),
            numeric(money(metrics.profit_currency)),
            numeric(metrics.record.to_string()),
        ]);
    }
    table
}

pub fn baseline_table(report: &DashboardReport) -> Table {
    let baseline = &report.baseline;
    let mut table = new_table(vec!["Before today", "Value"]);
    table
        .add_row(vec![Cell::new("Staked (u)"), numeric(money(baseline.total_staked))])
        .add_row(vec![Cell::new("Profit (u)"), numeric(money(baseline.total_profit_units))])
        .add_row(vec![Cell::new("ROI %"), numeric(money(baseline.roi_pct))]);
    table
}

/// Daily and cumulative profit side by side. Both series share their dates.
pub fn series_table(daily: &[SeriesPoint], cumulative: &[SeriesPoint]) -> Table {
    let mut table = new_table(vec!["Date", "Daily (u)", "Cumulative (u)"]);
    for (day, running) in daily.iter().zip(cumulative) {
        table.add_row(vec![
            Cell::new(day.date),
            numeric(money(day.value)),
            numeric(money(running.value)),
        ]);
    }
    table
}

pub fn breakdown_table(label: &str, groups: &BTreeMap<String, Decimal>) -> Table {
    let mut table = new_table(vec![label, "Profit (u)"]);
    for (key, profit) in groups {
        let key = if key.is_empty() { "(none)" } else { key.as_str() };
        table.add_row(vec![Cell::new(key), numeric(money(*profit))]);
    }
    table
}

/// One row per categorical field with the values present in the ledger.
pub fn filters_table(options: &[(CategoryField, Vec<String>)]) -> Table {
    let mut table = new_table(vec!["Filter", "Values"]);
    for (field, values) in options {
        let values: Vec<&str> = values
            .iter()
            .map(|value| if value.is_empty() { "(none)" } else { value.as_str() })
            .collect();
        table.add_row(vec![Cell::new(field), Cell::new(values.join(", "))]);
    }
    table
}

pub fn settings_table(settings: &Settings) -> Table {
    let mut table = new_table(vec!["Key", "Value"]);
    table.add_row(vec![
        Cell::new("stake_unit_value"),
        Cell::new(settings.stake_unit_value),
    ]);
    for field in CategoryField::ALL {
        table.add_row(vec![
            Cell::new(Settings::key(field)),
            Cell::new(settings.options(field).join(", ")),
        ]);
    }
    table
}

pub fn print_report(report: &DashboardReport) {
    println!("Report as of {}", report.today);
    println!("{}", summary_table(report));
    println!("{}", periods_table(report));
    println!("{}", baseline_table(report));
    if !report.daily_profit.is_empty() {
        println!("{}", series_table(&report.daily_profit, &report.cumulative_profit));
    }
    if !report.profit_by_sport.is_empty() {
        println!("{}", breakdown_table("Sport", &report.profit_by_sport));
    }
    if !report.profit_by_capper.is_empty() {
        println!("{}", breakdown_table("Capper", &report.profit_by_capper));
    }
}
