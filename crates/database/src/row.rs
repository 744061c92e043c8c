use chrono::NaiveDate;
use core_types::{BetDetails, BetKind, BetRecord, BetResult, CoreError, ParlayLeg, StandaloneBet};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A yes/no column, stored as `Y` or `N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Flag {
    #[serde(rename = "Y")]
    Yes,
    #[serde(rename = "N")]
    No,
}

impl Flag {
    pub fn is_set(self) -> bool {
        matches!(self, Flag::Yes)
    }
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        if value { Flag::Yes } else { Flag::No }
    }
}

/// Column order of the ledger file. Must match the field order of `LedgerRow`.
pub const LEDGER_HEADER: [&str; 19] = [
    "date",
    "parlay",
    "bookie",
    "sport",
    "selection",
    "bet_type",
    "capper",
    "competition",
    "event",
    "extra_info",
    "live",
    "score",
    "units",
    "odd",
    "free_bet",
    "result",
    "profit_units",
    "profit_currency",
    "stake_unit_value",
];

/// One CSV row exactly as stored. Nullable numbers are empty fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRow {
    pub date: NaiveDate,
    pub parlay: Flag,
    pub bookie: String,
    pub sport: String,
    pub selection: String,
    pub bet_type: String,
    pub capper: String,
    pub competition: String,
    pub event: String,
    pub extra_info: String,
    pub live: Flag,
    pub score: String,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub units: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub odd: Option<Decimal>,
    pub free_bet: Flag,
    /// Uppercase tag for standalone bets, lowercase for parlay legs.
    pub result: String,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub profit_units: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub profit_currency: Option<Decimal>,
    // Older ledgers predate this column.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub stake_unit_value: Option<Decimal>,
}

impl LedgerRow {
    pub fn from_record(record: &BetRecord) -> Self {
        let details = record.details();
        let (result, units, odd, profit_units, profit_currency, stake_unit_value) =
            match record.kind() {
                BetKind::Standalone(bet) => (
                    bet.result().tag(),
                    Some(bet.units()),
                    Some(bet.odd()),
                    Some(bet.profit_units()),
                    Some(bet.profit_currency()),
                    Some(bet.stake_unit_value()),
                ),
                BetKind::ParlayLeg(leg) => (
                    leg.result().leg_tag(),
                    None,
                    None,
                    None,
                    None,
                    leg.stake_unit_value(),
                ),
            };

        Self {
            date: details.date,
            parlay: Flag::from(record.is_parlay_leg()),
            bookie: details.bookie.clone(),
            sport: details.sport.clone(),
            selection: details.selection.clone(),
            bet_type: details.bet_type.clone(),
            capper: details.capper.clone(),
            competition: details.competition.clone(),
            event: details.event.clone(),
            extra_info: details.extra_info.clone(),
            live: Flag::from(details.is_live),
            score: details.score.clone(),
            units,
            odd,
            free_bet: Flag::from(details.is_free_bet),
            result: result.to_string(),
            profit_units,
            profit_currency,
            stake_unit_value,
        }
    }

    /// Converts the row into a domain record, enforcing the parlay-leg
    /// contract. The `parlay` column decides the kind; the case of the result
    /// tag is not trusted. Profit is recomputed, so the stored profit columns
    /// are only informational.
    pub fn into_record(self) -> Result<BetRecord, CoreError> {
        let result = BetResult::from_tag(&self.result)?;

        let kind = if self.parlay.is_set() {
            let has_money = self.units.is_some()
                || self.odd.is_some()
                || self.profit_units.is_some()
                || self.profit_currency.is_some();
            if has_money {
                return Err(CoreError::InvalidRecord(
                    "parlay leg carries a stake, odd or profit".to_string(),
                ));
            }
            BetKind::ParlayLeg(ParlayLeg::new(result, self.stake_unit_value))
        } else {
            let stake_unit_value = self.stake_unit_value.ok_or_else(|| {
                CoreError::InvalidRecord(
                    "standalone bet has no stake_unit_value; run backfill-unit-value".to_string(),
                )
            })?;
            let bet = StandaloneBet::restore(self.units, self.odd, result, stake_unit_value)?;
            let stale_units = self.profit_units.is_some_and(|p| p != bet.profit_units());
            let stale_currency = self.profit_currency.is_some_and(|p| p != bet.profit_currency());
            if stale_units || stale_currency {
                warn!(
                    date = %self.date,
                    selection = %self.selection,
                    stored_units = ?self.profit_units,
                    derived_units = %bet.profit_units(),
                    "Stored profit disagrees with the stake; using the derived figures."
                );
            }
            BetKind::Standalone(bet)
        };

        let details = BetDetails {
            date: self.date,
            bookie: self.bookie,
            sport: self.sport,
            bet_type: self.bet_type,
            capper: self.capper,
            competition: self.competition,
            selection: self.selection,
            event: self.event,
            extra_info: self.extra_info,
            score: self.score,
            is_live: self.live.is_set(),
            is_free_bet: self.free_bet.is_set(),
        };

        Ok(BetRecord::from_parts(details, kind))
    }
}
