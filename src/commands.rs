use crate::cli::{AddArgs, BackfillArgs, ConfigCommand, ReportArgs, SettleArgs};
use crate::render;
use analytics::{AnalyticsEngine, FilterEngine, FilterSpec, date_bounds, distinct_values};
use anyhow::Context;
use chrono::{Local, NaiveDate};
use configuration::{DataPaths, Settings, load_settings, save_settings};
use core_types::{BetDetails, BetRecord, CategoryField, Settlement};
use database::{CsvLedgerStore, LedgerStore, RowId, backfill_stake_unit_value};
use tracing::{info, warn};

fn today() -> NaiveDate {
    Local::now().date_naive()
}

// ==============================================================================
// Ledger Commands
// ==============================================================================

/// Builds the record described by `args`, stamped with the configured
/// stake-unit value.
pub fn build_record(args: AddArgs, settings: &Settings) -> anyhow::Result<BetRecord> {
    let mut details = BetDetails::new(args.date.unwrap_or_else(today));
    for (field, value) in args.categories() {
        if !settings.is_known(field, value) {
            warn!(%field, value, "Value is not in the configured option list.");
        }
        details.set_category(field, value);
    }
    details.selection = args.selection;
    details.event = args.event;
    details.extra_info = args.extra_info;
    details.score = args.score;
    details.is_live = args.live;
    details.is_free_bet = args.free_bet;

    if args.parlay_leg {
        if args.units.is_some() || args.odd.is_some() {
            warn!("Parlay legs carry no stake; ignoring --units and --odd.");
        }
        return Ok(BetRecord::parlay_leg(
            details,
            args.result,
            Some(settings.stake_unit_value),
        ));
    }

    let units = args
        .units
        .context("--units is required unless --parlay-leg is set")?;
    let odd = args
        .odd
        .context("--odd is required unless --parlay-leg is set")?;
    let record = BetRecord::standalone(details, units, odd, args.result, settings.stake_unit_value)?;
    Ok(record)
}

pub fn handle_add(args: AddArgs, paths: &DataPaths, store: &impl LedgerStore) -> anyhow::Result<RowId> {
    let settings = load_settings(&paths.config);
    let record = build_record(args, &settings)?;
    let row = store.append(record.clone()).context("Failed to append the bet")?;
    info!(row, "Bet recorded.");
    println!("{}", render::records_table(&[(row, &record)]));
    Ok(row)
}

/// Records with their row ids, newest first. Same-day records keep the most
/// recently added on top.
pub fn newest_first<'a>(
    ledger: &'a [BetRecord],
    keep: impl Fn(&BetRecord) -> bool,
) -> Vec<(RowId, &'a BetRecord)> {
    let mut rows: Vec<_> = ledger
        .iter()
        .enumerate()
        .filter(|(_, record)| keep(*record))
        .collect();
    rows.sort_by(|a, b| (b.1.date(), b.0).cmp(&(a.1.date(), a.0)));
    rows
}

pub fn handle_list(store: &impl LedgerStore, only_open: bool) -> anyhow::Result<()> {
    let ledger = store.load().context("Failed to load the ledger")?;
    let rows = newest_first(&ledger, |record| !only_open || record.is_open());
    if rows.is_empty() {
        println!("{}", if only_open { "No open bets." } else { "The ledger is empty." });
        return Ok(());
    }
    println!("{}", render::records_table(&rows));
    Ok(())
}

pub fn handle_settle(args: SettleArgs, store: &impl LedgerStore) -> anyhow::Result<BetRecord> {
    let mut settlement = Settlement::new(args.result);
    if let Some(score) = args.score {
        settlement = settlement.with_score(score);
    }
    let record = store
        .update(args.row, &settlement)
        .with_context(|| format!("Failed to settle row {}", args.row))?;
    info!(row = args.row, result = %record.result(), "Bet settled.");
    println!("{}", render::records_table(&[(args.row, &record)]));
    Ok(record)
}

pub fn handle_report(args: ReportArgs, store: &impl LedgerStore) -> anyhow::Result<()> {
    let ledger = store.load().context("Failed to load the ledger")?;

    let spec = FilterSpec::new()
        .date_range(args.from, args.to)
        .allow_all(CategoryField::Bookie, args.bookies)
        .allow_all(CategoryField::Sport, args.sports)
        .allow_all(CategoryField::BetType, args.bet_types)
        .allow_all(CategoryField::Capper, args.cappers)
        .allow_all(CategoryField::Competition, args.competitions);
    let engine = FilterEngine::new(spec);
    let filtered = engine.apply(&ledger);

    let report = AnalyticsEngine::new().calculate(&filtered, args.today.unwrap_or_else(today));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match engine.resolve_window(&ledger) {
        Some((from, to)) => {
            let scope = if engine.spec().is_unrestricted() { "All bets" } else { "Filtered" };
            println!(
                "{scope} from {from} to {to}: {} of {} records",
                filtered.len(),
                ledger.len()
            );
        }
        None => println!("The ledger is empty."),
    }
    render::print_report(&report);
    Ok(())
}

/// Shows the values each report filter can take.
pub fn handle_filters(store: &impl LedgerStore) -> anyhow::Result<()> {
    let ledger = store.load().context("Failed to load the ledger")?;
    let Some((first, last)) = date_bounds(&ledger) else {
        println!("The ledger is empty.");
        return Ok(());
    };

    println!("Dates: {first} to {last}");
    let options: Vec<_> = CategoryField::ALL
        .iter()
        .map(|field| (*field, distinct_values(&ledger, *field)))
        .collect();
    println!("{}", render::filters_table(&options));
    Ok(())
}

// ==============================================================================
// Settings & Maintenance Commands
// ==============================================================================

pub fn handle_config(command: ConfigCommand, paths: &DataPaths) -> anyhow::Result<()> {
    let mut settings = load_settings(&paths.config);

    match command {
        ConfigCommand::Show => {}
        ConfigCommand::SetUnit { value } => {
            if let Err(e) = settings.set_stake_unit_value(&value) {
                warn!(error = %e, "Stake unit value not changed.");
                return Err(e.into());
            }
            save_settings(&paths.config, &settings)?;
        }
        ConfigCommand::SetList { field, values } => {
            settings.set_options(field, &values);
            save_settings(&paths.config, &settings)?;
        }
    }

    println!("{}", render::settings_table(&settings));
    Ok(())
}

pub fn handle_backfill(
    args: BackfillArgs,
    paths: &DataPaths,
    store: &CsvLedgerStore,
) -> anyhow::Result<usize> {
    let value = match args.value {
        Some(value) => value,
        None => load_settings(&paths.config).stake_unit_value,
    };
    anyhow::ensure!(value > rust_decimal::Decimal::ZERO, "stake unit value must be positive");

    let changed = backfill_stake_unit_value(store, value)
        .with_context(|| format!("Failed to backfill {}", store.path().display()))?;
    println!("Stamped a stake-unit value of {value} onto {changed} row(s).");
    Ok(changed)
}
