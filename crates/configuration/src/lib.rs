// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod paths;
pub mod settings;
pub mod store;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use logging::init_logging;
pub use paths::{DEFAULT_CONFIG_PATH, DEFAULT_LEDGER_PATH, DataPaths};
pub use settings::{DEFAULT_STAKE_UNIT_VALUE, Settings};
pub use store::{load_settings, save_settings};
