use std::path::PathBuf;

pub const DEFAULT_LEDGER_PATH: &str = "data/ledger.csv";
pub const DEFAULT_CONFIG_PATH: &str = "data/settings.json";

/// Where the ledger, the settings and the optional log files live.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct DataPaths {
    /// Path to the ledger CSV file.
    #[cfg_attr(feature = "clap", arg(long, global = true, default_value = DEFAULT_LEDGER_PATH))]
    pub ledger: PathBuf,

    /// Path to the settings JSON file.
    #[cfg_attr(feature = "clap", arg(long, global = true, default_value = DEFAULT_CONFIG_PATH))]
    pub config: PathBuf,

    /// Directory for daily-rolling log files. Logs only go to stderr when unset.
    #[cfg_attr(feature = "clap", arg(long, global = true))]
    pub log_dir: Option<PathBuf>,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            ledger: PathBuf::from(DEFAULT_LEDGER_PATH),
            config: PathBuf::from(DEFAULT_CONFIG_PATH),
            log_dir: None,
        }
    }
}
