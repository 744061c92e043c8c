use crate::enums::{BetResult, CategoryField, Outcome};
use crate::error::CoreError;
use crate::profit::{Profit, ProfitCalculator, validate_stake};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

/// The descriptive fields shared by every ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BetDetails {
    pub date: NaiveDate,
    pub bookie: String,
    pub sport: String,
    pub bet_type: String,
    pub capper: String,
    pub competition: String,
    pub selection: String,
    pub event: String,
    pub extra_info: String,
    pub score: String,
    pub is_live: bool,
    pub is_free_bet: bool,
}

impl BetDetails {
    /// Creates details for the given date with every text field empty.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            bookie: String::new(),
            sport: String::new(),
            bet_type: String::new(),
            capper: String::new(),
            competition: String::new(),
            selection: String::new(),
            event: String::new(),
            extra_info: String::new(),
            score: String::new(),
            is_live: false,
            is_free_bet: false,
        }
    }

    pub fn category(&self, field: CategoryField) -> &str {
        match field {
            CategoryField::Bookie => &self.bookie,
            CategoryField::Sport => &self.sport,
            CategoryField::BetType => &self.bet_type,
            CategoryField::Capper => &self.capper,
            CategoryField::Competition => &self.competition,
        }
    }

    pub fn set_category(&mut self, field: CategoryField, value: impl Into<String>) {
        let slot = match field {
            CategoryField::Bookie => &mut self.bookie,
            CategoryField::Sport => &mut self.sport,
            CategoryField::BetType => &mut self.bet_type,
            CategoryField::Capper => &mut self.capper,
            CategoryField::Competition => &mut self.competition,
        };
        *slot = value.into();
    }
}

/// A single-selection wager with its own stake.
///
/// The profit fields are private: they are produced by `ProfitCalculator`
/// and recomputed on settlement, never written directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandaloneBet {
    units: Decimal,
    odd: Decimal,
    result: BetResult,
    profit_units: Decimal,
    profit_currency: Decimal,
    stake_unit_value: Decimal,
}

impl StandaloneBet {
    pub fn new(
        units: Decimal,
        odd: Decimal,
        result: BetResult,
        stake_unit_value: Decimal,
    ) -> Result<Self, CoreError> {
        let profit = ProfitCalculator::compute(Some(units), Some(odd), result, stake_unit_value)?;
        Ok(Self::with_profit(units, odd, result, profit, stake_unit_value))
    }

    /// Rebuilds a bet read back from storage.
    ///
    /// Profit is derived from the stored stake, odd, result and stake-unit
    /// value on every load. Profit columns in storage are never trusted.
    pub fn restore(
        units: Option<Decimal>,
        odd: Option<Decimal>,
        result: BetResult,
        stake_unit_value: Decimal,
    ) -> Result<Self, CoreError> {
        let profit = ProfitCalculator::compute(units, odd, result, stake_unit_value)?;
        let (Some(units), Some(odd)) = (units, odd) else {
            // compute() has already rejected a missing stake.
            return Err(CoreError::InvalidRecord("standalone bet is missing its stake".to_string()));
        };
        Ok(Self::with_profit(units, odd, result, profit, stake_unit_value))
    }

    fn with_profit(
        units: Decimal,
        odd: Decimal,
        result: BetResult,
        profit: Profit,
        stake_unit_value: Decimal,
    ) -> Self {
        Self {
            units,
            odd,
            result,
            profit_units: profit.units,
            profit_currency: profit.currency,
            stake_unit_value,
        }
    }

    pub fn units(&self) -> Decimal {
        self.units
    }

    pub fn odd(&self) -> Decimal {
        self.odd
    }

    pub fn result(&self) -> BetResult {
        self.result
    }

    pub fn profit_units(&self) -> Decimal {
        self.profit_units
    }

    pub fn profit_currency(&self) -> Decimal {
        self.profit_currency
    }

    pub fn stake_unit_value(&self) -> Decimal {
        self.stake_unit_value
    }

    /// Moves an open bet into a terminal state and reprices it with the
    /// stake and stake-unit value stored on the bet.
    fn settle(&mut self, outcome: Outcome) -> Result<(), CoreError> {
        if self.result.is_settled() {
            return Err(CoreError::AlreadySettled(self.result));
        }
        let result = BetResult::from(outcome);
        let profit = ProfitCalculator::compute(
            Some(self.units),
            Some(self.odd),
            result,
            self.stake_unit_value,
        )?;
        self.result = result;
        self.profit_units = profit.units;
        self.profit_currency = profit.currency;
        Ok(())
    }
}

/// One selection inside a multi-selection ticket. It carries no stake, odd or
/// profit of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParlayLeg {
    result: BetResult,
    stake_unit_value: Option<Decimal>,
}

impl ParlayLeg {
    pub fn new(result: BetResult, stake_unit_value: Option<Decimal>) -> Self {
        Self {
            result,
            stake_unit_value,
        }
    }

    pub fn result(&self) -> BetResult {
        self.result
    }

    pub fn stake_unit_value(&self) -> Option<Decimal> {
        self.stake_unit_value
    }

    fn settle(&mut self, outcome: Outcome) -> Result<(), CoreError> {
        if self.result.is_settled() {
            return Err(CoreError::AlreadySettled(self.result));
        }
        self.result = BetResult::from(outcome);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BetKind {
    Standalone(StandaloneBet),
    ParlayLeg(ParlayLeg),
}

/// A settle action: the final outcome plus the score to record with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub outcome: Outcome,
    /// `None` keeps the score already on the record.
    pub score: Option<String>,
}

impl Settlement {
    pub fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            score: None,
        }
    }

    pub fn with_score(mut self, score: impl Into<String>) -> Self {
        self.score = Some(score.into());
        self
    }
}

/// One entry of the betting ledger.
///
/// After creation a record only changes through [`BetRecord::settle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BetRecord {
    details: BetDetails,
    kind: BetKind,
}

impl BetRecord {
    /// Creates a standalone bet, pricing it with the stake-unit value in
    /// effect right now.
    pub fn standalone(
        details: BetDetails,
        units: Decimal,
        odd: Decimal,
        result: BetResult,
        stake_unit_value: Decimal,
    ) -> Result<Self, CoreError> {
        validate_stake(units, odd)?;
        let bet = StandaloneBet::new(units, odd, result, stake_unit_value)?;
        Ok(Self {
            details,
            kind: BetKind::Standalone(bet),
        })
    }

    pub fn parlay_leg(
        details: BetDetails,
        result: BetResult,
        stake_unit_value: Option<Decimal>,
    ) -> Self {
        Self {
            details,
            kind: BetKind::ParlayLeg(ParlayLeg::new(result, stake_unit_value)),
        }
    }

    /// Assembles a record from already validated parts.
    pub fn from_parts(details: BetDetails, kind: BetKind) -> Self {
        Self { details, kind }
    }

    pub fn details(&self) -> &BetDetails {
        &self.details
    }

    pub fn kind(&self) -> &BetKind {
        &self.kind
    }

    pub fn date(&self) -> NaiveDate {
        self.details.date
    }

    pub fn category(&self, field: CategoryField) -> &str {
        self.details.category(field)
    }

    pub fn is_parlay_leg(&self) -> bool {
        matches!(self.kind, BetKind::ParlayLeg(_))
    }

    pub fn standalone_bet(&self) -> Option<&StandaloneBet> {
        match &self.kind {
            BetKind::Standalone(bet) => Some(bet),
            BetKind::ParlayLeg(_) => None,
        }
    }

    pub fn result(&self) -> BetResult {
        match &self.kind {
            BetKind::Standalone(bet) => bet.result(),
            BetKind::ParlayLeg(leg) => leg.result(),
        }
    }

    pub fn is_open(&self) -> bool {
        !self.result().is_settled()
    }

    pub fn units(&self) -> Option<Decimal> {
        self.standalone_bet().map(StandaloneBet::units)
    }

    pub fn odd(&self) -> Option<Decimal> {
        self.standalone_bet().map(StandaloneBet::odd)
    }

    pub fn profit_units(&self) -> Option<Decimal> {
        self.standalone_bet().map(StandaloneBet::profit_units)
    }

    pub fn profit_currency(&self) -> Option<Decimal> {
        self.standalone_bet().map(StandaloneBet::profit_currency)
    }

    pub fn stake_unit_value(&self) -> Option<Decimal> {
        match &self.kind {
            BetKind::Standalone(bet) => Some(bet.stake_unit_value()),
            BetKind::ParlayLeg(leg) => leg.stake_unit_value(),
        }
    }

    /// Applies the result-update transition: `Open -> Win | Loss | Void`.
    ///
    /// Standalone bets are repriced; parlay legs only record the outcome.
    /// Settling an already settled record fails with `AlreadySettled` and
    /// leaves the record untouched.
    pub fn settle(&mut self, settlement: &Settlement) -> Result<(), CoreError> {
        match &mut self.kind {
            BetKind::Standalone(bet) => bet.settle(settlement.outcome)?,
            BetKind::ParlayLeg(leg) => leg.settle(settlement.outcome)?,
        }
        if let Some(score) = &settlement.score {
            self.details.score = score.clone();
        }
        debug!(date = %self.details.date, result = %self.result(), "Bet settled.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn details() -> BetDetails {
        let mut details = BetDetails::new(NaiveDate::from_ymd_opt(2024, 5, 10).unwrap());
        details.bookie = "Pinnacle".to_string();
        details.sport = "Football".to_string();
        details.capper = "Self".to_string();
        details
    }

    #[test]
    fn standalone_bet_is_priced_on_creation() {
        let record =
            BetRecord::standalone(details(), dec!(2), dec!(2.5), BetResult::Win, dec!(10)).unwrap();
        assert_eq!(record.profit_units(), Some(dec!(3.00)));
        assert_eq!(record.profit_currency(), Some(dec!(30.00)));
        assert_eq!(record.stake_unit_value(), Some(dec!(10)));
        assert!(!record.is_parlay_leg());
    }

    #[test]
    fn parlay_leg_has_no_financial_fields() {
        for result in [BetResult::Open, BetResult::Win, BetResult::Loss, BetResult::Void] {
            let leg = BetRecord::parlay_leg(details(), result, Some(dec!(10)));
            assert!(leg.is_parlay_leg());
            assert_eq!(leg.units(), None);
            assert_eq!(leg.odd(), None);
            assert_eq!(leg.profit_units(), None);
            assert_eq!(leg.profit_currency(), None);
        }
    }

    #[test]
    fn creation_rejects_invalid_stake() {
        let err = BetRecord::standalone(details(), dec!(1), dec!(0.5), BetResult::Open, dec!(10))
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(field, _) if field == "odd"));
    }

    #[test]
    fn settle_reprices_with_the_stored_unit_value() {
        let mut record =
            BetRecord::standalone(details(), dec!(4), dec!(1.5), BetResult::Open, dec!(20)).unwrap();
        assert_eq!(record.profit_units(), Some(Decimal::ZERO));

        record
            .settle(&Settlement::new(Outcome::Win).with_score("2-1"))
            .unwrap();

        assert_eq!(record.result(), BetResult::Win);
        assert_eq!(record.profit_units(), Some(dec!(2)));
        assert_eq!(record.profit_currency(), Some(dec!(40)));
        assert_eq!(record.details().score, "2-1");
    }

    #[test]
    fn settled_states_are_terminal() {
        let mut record =
            BetRecord::standalone(details(), dec!(1), dec!(2), BetResult::Open, dec!(10)).unwrap();
        record.settle(&Settlement::new(Outcome::Loss)).unwrap();

        let before = record.clone();
        let err = record.settle(&Settlement::new(Outcome::Win)).unwrap_err();
        assert_eq!(err, CoreError::AlreadySettled(BetResult::Loss));
        assert_eq!(record, before);
    }

    #[test]
    fn settling_a_leg_records_only_the_outcome() {
        let mut leg = BetRecord::parlay_leg(details(), BetResult::Open, None);
        leg.settle(&Settlement::new(Outcome::Void)).unwrap();
        assert_eq!(leg.result(), BetResult::Void);
        assert_eq!(leg.profit_units(), None);
        assert_eq!(leg.details().score, "");
    }

    #[test]
    fn restore_derives_profit_from_the_stake() {
        let win = StandaloneBet::restore(Some(dec!(2)), Some(dec!(3)), BetResult::Win, dec!(10))
            .unwrap();
        assert_eq!(win.profit_units(), dec!(4));
        assert_eq!(win.profit_currency(), dec!(40));

        let loss =
            StandaloneBet::restore(Some(dec!(2)), Some(dec!(3)), BetResult::Loss, dec!(5)).unwrap();
        assert_eq!(loss.profit_units(), dec!(-2));
        assert_eq!(loss.profit_currency(), dec!(-10));

        let missing = StandaloneBet::restore(None, Some(dec!(3)), BetResult::Loss, dec!(5));
        assert!(matches!(missing, Err(CoreError::InvalidRecord(_))));
    }

    #[test]
    fn category_accessors_round_trip() {
        let mut details = details();
        details.set_category(CategoryField::Competition, "Serie A");
        assert_eq!(details.category(CategoryField::Competition), "Serie A");
        assert_eq!(details.category(CategoryField::Bookie), "Pinnacle");
    }
}
