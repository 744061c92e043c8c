use crate::enums::BetResult;
use crate::error::CoreError;
use rust_decimal::{Decimal, RoundingStrategy};

/// Scale every stored profit figure is rounded to.
pub const PROFIT_SCALE: u32 = 4;

/// Scale used when profit figures are presented.
pub const DISPLAY_SCALE: u32 = 2;

/// Rounds half-up (midpoint away from zero) to the working scale.
pub fn round_working(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(PROFIT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds half-up to the display scale.
pub fn round_display(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// The profit of one standalone bet, in stake-units and in currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profit {
    pub units: Decimal,
    pub currency: Decimal,
}

/// A stateless calculator turning a stake, an odd and a result into profit.
///
/// Only standalone bets are priced. Parlay legs have no stake of their own and
/// never reach this calculator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProfitCalculator;

impl ProfitCalculator {
    /// Computes the profit of a standalone bet.
    ///
    /// `units` and `odd` are optional because they come from user input or from
    /// storage; a missing value is an `InvalidRecord`, never a silent zero.
    ///
    /// * Win: `units * (odd - 1)`
    /// * Loss: `-units`
    /// * Void / Open: `0`
    ///
    /// The currency profit is the unit profit scaled by the stake-unit value
    /// snapshotted on the record. A product outside the `Decimal` range is a
    /// `Calculation` error.
    pub fn compute(
        units: Option<Decimal>,
        odd: Option<Decimal>,
        result: BetResult,
        stake_unit_value: Decimal,
    ) -> Result<Profit, CoreError> {
        let units = units.ok_or_else(|| {
            CoreError::InvalidRecord("standalone bet is missing its units".to_string())
        })?;
        let odd = odd.ok_or_else(|| {
            CoreError::InvalidRecord("standalone bet is missing its odd".to_string())
        })?;
        validate_stake(units, odd)?;

        let profit_units = match result {
            BetResult::Win => (odd - Decimal::ONE)
                .checked_mul(units)
                .ok_or_else(|| overflow("profit_units", units, odd))?,
            BetResult::Loss => -units,
            BetResult::Void | BetResult::Open => Decimal::ZERO,
        };
        let profit_units = round_working(profit_units);
        let profit_currency = profit_units
            .checked_mul(stake_unit_value)
            .map(round_working)
            .ok_or_else(|| overflow("profit_currency", profit_units, stake_unit_value))?;

        Ok(Profit {
            units: profit_units,
            currency: profit_currency,
        })
    }
}

fn overflow(field: &str, lhs: Decimal, rhs: Decimal) -> CoreError {
    CoreError::Calculation(format!("{field} overflows for {lhs} x {rhs}"))
}

/// Checks the input constraints on a stake: `units >= 0` and `odd >= 1`.
pub fn validate_stake(units: Decimal, odd: Decimal) -> Result<(), CoreError> {
    if units < Decimal::ZERO {
        return Err(CoreError::InvalidInput(
            "units".to_string(),
            format!("must not be negative, got {units}"),
        ));
    }
    if odd < Decimal::ONE {
        return Err(CoreError::InvalidInput(
            "odd".to_string(),
            format!("must be at least 1, got {odd}"),
        ));
    }
    Ok(())
}
