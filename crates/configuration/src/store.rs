use crate::error::ConfigError;
use crate::settings::{DEFAULT_STAKE_UNIT_VALUE, Settings};
use core_types::CategoryField;
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Loads the settings file, falling back to defaults for anything missing.
///
/// A missing file, an unparsable file, or a missing or invalid key never blocks
/// the caller: each problem is logged and the default for that part is used.
pub fn load_settings(path: &Path) -> Settings {
    match read_settings(path) {
        Ok(settings) => settings,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Could not read settings; using defaults.");
            Settings::default()
        }
    }
}

fn read_settings(path: &Path) -> Result<Settings, ConfigError> {
    let source = config::Config::builder()
        .add_source(
            config::File::from(path)
                .format(config::FileFormat::Json)
                .required(false),
        )
        .build()?;

    let mut settings = Settings::default();

    match source.get::<Decimal>("stake_unit_value") {
        Ok(value) if value > Decimal::ZERO => settings.stake_unit_value = value,
        Ok(value) => warn!(
            %value,
            default = %DEFAULT_STAKE_UNIT_VALUE,
            "Configured stake unit value is not positive; using the default."
        ),
        Err(config::ConfigError::NotFound(_)) => {
            debug!(default = %DEFAULT_STAKE_UNIT_VALUE, "No stake unit value configured.")
        }
        Err(e) => warn!(
            error = %e,
            default = %DEFAULT_STAKE_UNIT_VALUE,
            "Invalid stake unit value in settings; using the default."
        ),
    }

    for field in CategoryField::ALL {
        let key = Settings::key(field);
        match source.get::<Vec<String>>(key) {
            Ok(options) => *settings.options_mut(field) = options,
            Err(config::ConfigError::NotFound(_)) => {}
            Err(e) => warn!(key, error = %e, "Ignoring malformed option list."),
        }
    }

    Ok(settings)
}

/// Writes the settings as pretty-printed JSON, creating parent directories.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    info!(path = %path.display(), "Settings saved.");
    Ok(())
}
