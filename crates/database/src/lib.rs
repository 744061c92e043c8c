//! # Betledger Database Crate
//!
//! This crate is the system's "permanent archive": a flat CSV ledger with one
//! row per bet.
//!
//! ## Architectural Principles
//!
//! - **Layer 3 Adapter:** All file-format knowledge lives here. The rest of the
//!   application sees the `LedgerStore` trait and `BetRecord` values only.
//! - **Whole-ledger rewrites:** Every write loads the full ledger, changes one
//!   record in memory and rewrites the file. There is no locking; a single
//!   active editor is assumed.
//!
//! ## Public API
//!
//! - `LedgerStore`: load / save / append / update contract, rows identified by
//!   their position.
//! - `CsvLedgerStore`: the CSV-backed implementation.
//! - `backfill_stake_unit_value`: repairs legacy rows written before the
//!   stake-unit snapshot column existed.
//! - `DbError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod maintenance;
pub mod repository;
pub mod row;

// Re-export the key components to create a clean, public-facing API.
pub use error::DbError;
pub use maintenance::backfill_stake_unit_value;
pub use repository::{CsvLedgerStore, LedgerStore, RowId};
pub use row::{Flag, LEDGER_HEADER, LedgerRow};
