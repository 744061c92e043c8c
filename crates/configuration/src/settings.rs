use crate::error::ConfigError;
use core_types::CategoryField;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The stake-unit value used when no valid one is configured.
pub const DEFAULT_STAKE_UNIT_VALUE: Decimal = Decimal::TEN;

/// The root configuration structure for the application.
///
/// It is loaded once per command and passed explicitly to whatever needs it.
/// The analytics layer never reads it: each ledger record carries its own
/// stake-unit snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// The currency value of one stake-unit, stamped onto new records.
    pub stake_unit_value: Decimal,
    /// Ordered option lists for the categorical fields.
    #[serde(default)]
    pub bookies: Vec<String>,
    #[serde(default)]
    pub sports: Vec<String>,
    #[serde(default)]
    pub bet_types: Vec<String>,
    #[serde(default)]
    pub cappers: Vec<String>,
    #[serde(default)]
    pub competitions: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            stake_unit_value: DEFAULT_STAKE_UNIT_VALUE,
            bookies: Vec::new(),
            sports: Vec::new(),
            bet_types: Vec::new(),
            cappers: Vec::new(),
            competitions: Vec::new(),
        }
    }
}

impl Settings {
    /// The settings key holding the option list for `field`.
    pub fn key(field: CategoryField) -> &'static str {
        match field {
            CategoryField::Bookie => "bookies",
            CategoryField::Sport => "sports",
            CategoryField::BetType => "bet_types",
            CategoryField::Capper => "cappers",
            CategoryField::Competition => "competitions",
        }
    }

    pub fn options(&self, field: CategoryField) -> &[String] {
        match field {
            CategoryField::Bookie => &self.bookies,
            CategoryField::Sport => &self.sports,
            CategoryField::BetType => &self.bet_types,
            CategoryField::Capper => &self.cappers,
            CategoryField::Competition => &self.competitions,
        }
    }

    pub fn options_mut(&mut self, field: CategoryField) -> &mut Vec<String> {
        match field {
            CategoryField::Bookie => &mut self.bookies,
            CategoryField::Sport => &mut self.sports,
            CategoryField::BetType => &mut self.bet_types,
            CategoryField::Capper => &mut self.cappers,
            CategoryField::Competition => &mut self.competitions,
        }
    }

    /// True when `value` is empty, the list for `field` is empty, or the list
    /// contains `value`.
    pub fn is_known(&self, field: CategoryField, value: &str) -> bool {
        let options = self.options(field);
        value.is_empty() || options.is_empty() || options.iter().any(|option| option == value)
    }

    /// Parses and applies a new stake-unit value.
    ///
    /// Non-numeric or non-positive input is rejected and the previous value is
    /// kept.
    pub fn set_stake_unit_value(&mut self, input: &str) -> Result<Decimal, ConfigError> {
        let value = Decimal::from_str(input.trim()).map_err(|e| {
            ConfigError::ValidationError(format!(
                "stake unit value '{input}' is not a number ({e}); keeping {}",
                self.stake_unit_value
            ))
        })?;
        if value <= Decimal::ZERO {
            return Err(ConfigError::ValidationError(format!(
                "stake unit value must be positive, got {value}; keeping {}",
                self.stake_unit_value
            )));
        }
        self.stake_unit_value = value;
        Ok(value)
    }

    /// Replaces the option list for `field` from comma-separated input.
    /// Entries are trimmed and empty ones dropped.
    pub fn set_options(&mut self, field: CategoryField, input: &str) -> &[String] {
        *self.options_mut(field) = input
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect();
        self.options(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn default_unit_value_is_ten() {
        assert_eq!(Settings::default().stake_unit_value, dec!(10));
    }

    #[test]
    fn numeric_unit_value_is_applied() {
        let mut settings = Settings::default();
        assert_eq!(settings.set_stake_unit_value(" 12.5 ").unwrap(), dec!(12.5));
        assert_eq!(settings.stake_unit_value, dec!(12.5));
    }

    #[test]
    fn invalid_unit_value_keeps_previous() {
        let mut settings = Settings::default();
        settings.set_stake_unit_value("20").unwrap();

        for input in ["abc", "", "-5", "0"] {
            let err = settings.set_stake_unit_value(input).unwrap_err();
            assert!(matches!(err, ConfigError::ValidationError(_)));
            assert_eq!(settings.stake_unit_value, dec!(20));
        }
    }

    #[test]
    fn option_lists_are_trimmed_and_compacted() {
        let mut settings = Settings::default();
        let bookies = settings.set_options(CategoryField::Bookie, " Bet365, Pinnacle ,, ,Betfair");
        assert_eq!(bookies, ["Bet365", "Pinnacle", "Betfair"]);
        assert_eq!(settings.bookies.len(), 3);
    }

    #[test]
    fn unknown_values_are_detected_only_against_non_empty_lists() {
        let mut settings = Settings::default();
        assert!(settings.is_known(CategoryField::Sport, "Curling"));

        settings.set_options(CategoryField::Sport, "Football,Tennis");
        assert!(settings.is_known(CategoryField::Sport, "Tennis"));
        assert!(settings.is_known(CategoryField::Sport, ""));
        assert!(!settings.is_known(CategoryField::Sport, "Curling"));
    }
}
