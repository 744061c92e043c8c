//! # Betledger Core Types
//!
//! The shared vocabulary of the workspace: the ledger record, its result state
//! machine and the profit calculator that prices standalone bets.
//!
//! This is a Layer 0 crate. It has no knowledge of storage, configuration or
//! reporting.

pub mod enums;
pub mod error;
pub mod profit;
pub mod record;

// Re-export the core types to provide a clean public API.
pub use enums::{BetResult, CategoryField, Outcome};
pub use error::CoreError;
pub use profit::{DISPLAY_SCALE, PROFIT_SCALE, Profit, ProfitCalculator, round_display, round_working};
pub use record::{BetDetails, BetKind, BetRecord, ParlayLeg, Settlement, StandaloneBet};
