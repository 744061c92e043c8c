//! # Betledger Analytics Engine
//!
//! This crate turns a betting ledger into the figures a dashboard displays:
//! filtered subsets, totals, ROI, win/loss/void records, rolling windows, the
//! daily and cumulative profit series, and per-category breakdowns.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It depends only on
//!   `core-types` (Layer 0) and never touches storage or configuration.
//! - **Stateless Calculation:** `FilterEngine` and `AnalyticsEngine` take a
//!   ledger slice as input and return new values. Nothing is mutated.
//!
//! ## Public API
//!
//! - `FilterSpec` / `FilterEngine`: date-range and category filtering.
//! - `aggregate`: the primitive totals and series.
//! - `AnalyticsEngine`: composes everything into a `DashboardReport`.

// Declare the modules that constitute this crate.
pub mod aggregate;
pub mod engine;
pub mod filter;
pub mod period;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use aggregate::{RecordTally, SeriesPoint};
pub use engine::AnalyticsEngine;
pub use filter::{FilterEngine, FilterSpec, date_bounds, distinct_values};
pub use period::Period;
pub use report::{DashboardReport, PeriodMetrics, StakingBaseline, Summary};
