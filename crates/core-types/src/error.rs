use crate::enums::BetResult;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Calculation error: {0}")]
    Calculation(String),

    #[error("Bet is already settled as {0}; settled results are terminal")]
    AlreadySettled(BetResult),

    #[error("Unknown result tag '{0}'")]
    UnknownResult(String),

    #[error("Unknown category field '{0}'")]
    UnknownCategory(String),
}
