use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The lifecycle state of a wager.
///
/// `Open` is the only non-terminal state. Standalone bets and parlay legs share
/// this type; storage keeps them apart with an upper/lowercase tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BetResult {
    Open,
    Win,
    Loss,
    Void,
}

impl BetResult {
    /// Returns true once the bet has reached a terminal state.
    pub fn is_settled(&self) -> bool {
        !matches!(self, BetResult::Open)
    }

    /// Storage tag for a standalone bet.
    pub fn tag(&self) -> &'static str {
        match self {
            BetResult::Open => "O",
            BetResult::Win => "W",
            BetResult::Loss => "L",
            BetResult::Void => "V",
        }
    }

    /// Storage tag for a parlay leg.
    pub fn leg_tag(&self) -> &'static str {
        match self {
            BetResult::Open => "o",
            BetResult::Win => "w",
            BetResult::Loss => "l",
            BetResult::Void => "v",
        }
    }

    /// Parses either tag form, or the full variant name, ignoring case.
    pub fn from_tag(tag: &str) -> Result<Self, CoreError> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "o" | "open" => Ok(BetResult::Open),
            "w" | "win" => Ok(BetResult::Win),
            "l" | "loss" => Ok(BetResult::Loss),
            "v" | "void" => Ok(BetResult::Void),
            _ => Err(CoreError::UnknownResult(tag.to_string())),
        }
    }
}

impl FromStr for BetResult {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s)
    }
}

impl fmt::Display for BetResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A terminal result that a settle action may move an open bet into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
    Void,
}

impl From<Outcome> for BetResult {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Win => BetResult::Win,
            Outcome::Loss => BetResult::Loss,
            Outcome::Void => BetResult::Void,
        }
    }
}

impl FromStr for Outcome {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match BetResult::from_tag(s)? {
            BetResult::Win => Ok(Outcome::Win),
            BetResult::Loss => Ok(Outcome::Loss),
            BetResult::Void => Ok(Outcome::Void),
            BetResult::Open => Err(CoreError::InvalidInput(
                "outcome".to_string(),
                "a bet cannot be settled back to Open".to_string(),
            )),
        }
    }
}

/// The categorical fields a ledger can be filtered and grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryField {
    Bookie,
    Sport,
    BetType,
    Capper,
    Competition,
}

impl CategoryField {
    pub const ALL: [CategoryField; 5] = [
        CategoryField::Bookie,
        CategoryField::Sport,
        CategoryField::BetType,
        CategoryField::Capper,
        CategoryField::Competition,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryField::Bookie => "bookie",
            CategoryField::Sport => "sport",
            CategoryField::BetType => "bet_type",
            CategoryField::Capper => "capper",
            CategoryField::Competition => "competition",
        }
    }
}

impl FromStr for CategoryField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        // Plural forms are accepted so `bookies` works as well as `bookie`.
        match normalized.trim_end_matches('s') {
            "bookie" => Ok(CategoryField::Bookie),
            "sport" => Ok(CategoryField::Sport),
            "bet_type" => Ok(CategoryField::BetType),
            "capper" => Ok(CategoryField::Capper),
            "competition" => Ok(CategoryField::Competition),
            _ => Err(CoreError::UnknownCategory(s.to_string())),
        }
    }
}

impl fmt::Display for CategoryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_tags_parse_in_either_case() {
        assert_eq!(BetResult::from_tag("W").unwrap(), BetResult::Win);
        assert_eq!(BetResult::from_tag("w").unwrap(), BetResult::Win);
        assert_eq!(BetResult::from_tag(" void ").unwrap(), BetResult::Void);
        assert_eq!(BetResult::from_tag("O").unwrap(), BetResult::Open);
        assert!(matches!(
            BetResult::from_tag("R?"),
            Err(CoreError::UnknownResult(_))
        ));
    }

    #[test]
    fn leg_tags_are_lowercase_mirrors() {
        for result in [BetResult::Open, BetResult::Win, BetResult::Loss, BetResult::Void] {
            assert_eq!(result.leg_tag(), result.tag().to_ascii_lowercase());
        }
    }

    #[test]
    fn outcome_rejects_open() {
        assert_eq!("l".parse::<Outcome>().unwrap(), Outcome::Loss);
        assert!("open".parse::<Outcome>().is_err());
    }

    #[test]
    fn category_field_accepts_plural_and_dashes() {
        assert_eq!("bookies".parse::<CategoryField>().unwrap(), CategoryField::Bookie);
        assert_eq!("bet-type".parse::<CategoryField>().unwrap(), CategoryField::BetType);
        assert_eq!("Competitions".parse::<CategoryField>().unwrap(), CategoryField::Competition);
        assert!("league".parse::<CategoryField>().is_err());
    }
}
