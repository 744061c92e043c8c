use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use configuration::DataPaths;
use core_types::{BetResult, CategoryField, Outcome};
use rust_decimal::Decimal;

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A personal sports-betting ledger: record wagers, settle them, and report on
/// profit and ROI.
#[derive(Parser, Debug)]
#[command(name = "betledger", author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub paths: DataPaths,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record a new bet or parlay leg.
    Add(AddArgs),

    /// List every record, newest first, with its row id.
    List,

    /// List the records that are still open.
    Open,

    /// Settle an open record as a win, loss or void.
    Settle(SettleArgs),

    /// Show totals, rolling windows and breakdowns for a slice of the ledger.
    Report(ReportArgs),

    /// Show the date range and the category values present in the ledger.
    Filters,

    /// Inspect or edit the settings file.
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Stamp a stake-unit value onto legacy rows that have none.
    BackfillUnitValue(BackfillArgs),
}

#[derive(Parser, Debug)]
pub struct AddArgs {
    /// The date the bet was placed (format: YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Record a leg of a multi-selection bet. Legs carry no stake or profit.
    #[arg(long)]
    pub parlay_leg: bool,

    #[arg(long, default_value = "")]
    pub bookie: String,

    #[arg(long, default_value = "")]
    pub sport: String,

    #[arg(long, default_value = "")]
    pub bet_type: String,

    #[arg(long, default_value = "")]
    pub capper: String,

    #[arg(long, default_value = "")]
    pub competition: String,

    #[arg(long, default_value = "")]
    pub selection: String,

    #[arg(long, default_value = "")]
    pub event: String,

    #[arg(long, default_value = "")]
    pub extra_info: String,

    #[arg(long, default_value = "")]
    pub score: String,

    /// The bet was placed in-play.
    #[arg(long)]
    pub live: bool,

    /// The stake came from a bookmaker promotion.
    #[arg(long)]
    pub free_bet: bool,

    /// Stake in stake-units. Required unless `--parlay-leg` is set.
    #[arg(long)]
    pub units: Option<Decimal>,

    /// Decimal odd, at least 1. Required unless `--parlay-leg` is set.
    #[arg(long)]
    pub odd: Option<Decimal>,

    /// Initial result (O, W, L or V).
    #[arg(long, default_value = "O")]
    pub result: BetResult,
}

impl AddArgs {
    pub fn categories(&self) -> [(CategoryField, &str); 5] {
        [
            (CategoryField::Bookie, self.bookie.as_str()),
            (CategoryField::Sport, self.sport.as_str()),
            (CategoryField::BetType, self.bet_type.as_str()),
            (CategoryField::Capper, self.capper.as_str()),
            (CategoryField::Competition, self.competition.as_str()),
        ]
    }
}

#[derive(Parser, Debug)]
pub struct SettleArgs {
    /// Row id as shown by `list` or `open`.
    pub row: usize,

    /// The final result (W, L or V).
    #[arg(long)]
    pub result: Outcome,

    /// The final score of the event.
    #[arg(long)]
    pub score: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// First date included (format: YYYY-MM-DD). Defaults to the earliest bet.
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last date included (format: YYYY-MM-DD). Defaults to the latest bet.
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Only include these bookies. Repeat the flag for several values.
    #[arg(long = "bookie")]
    pub bookies: Vec<String>,

    #[arg(long = "sport")]
    pub sports: Vec<String>,

    #[arg(long = "bet-type")]
    pub bet_types: Vec<String>,

    #[arg(long = "capper")]
    pub cappers: Vec<String>,

    #[arg(long = "competition")]
    pub competitions: Vec<String>,

    /// Reference date for the rolling windows. Defaults to today.
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Print the report as JSON instead of tables.
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the current settings.
    Show,

    /// Change the currency value of one stake-unit for future bets.
    SetUnit {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Replace the option list of a category from comma-separated values.
    SetList {
        field: CategoryField,
        values: String,
    },
}

#[derive(Parser, Debug)]
pub struct BackfillArgs {
    /// The stake-unit value to stamp. Defaults to the configured value.
    #[arg(long)]
    pub value: Option<Decimal>,
}
