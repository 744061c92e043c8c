use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to access the ledger file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read or write ledger CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Ledger row {row} is invalid: {source}")]
    InvalidRow { row: usize, source: CoreError },

    #[error("Ledger row {0} does not exist.")]
    NotFound(usize),

    #[error("The record change was rejected: {0}")]
    Rejected(#[from] CoreError),
}
