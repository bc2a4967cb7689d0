//! # Engine Settings
//!
//! Clinical bounds and defaults the method adapters validate against.
//! Settings serialize to a small JSON file so a deployment can tighten or
//! relax bounds without a rebuild; [`EngineSettings::default`] carries the
//! standard values and is what [`crate::compute_gestational_timeline`] uses.
//!
//! Saves are atomic: write `.tmp`, sync, read it back, rename over the target.
//!
//! ## Example
//!
//! ```rust,no_run
//! use gestation_core::settings::{load_settings, save_settings, EngineSettings};
//! use std::path::Path;
//!
//! let mut settings = EngineSettings::default();
//! settings.max_cycle_length_days = 40;
//! save_settings(&settings, Path::new("gestation.json"))?;
//!
//! let loaded = load_settings(Path::new("gestation.json"))?;
//! assert_eq!(loaded.max_cycle_length_days, 40);
//! # Ok::<(), gestation_core::errors::SettingsError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::SettingsError;

/// Current schema version for settings files
pub const SETTINGS_VERSION: &str = "0.1.0";

/// Bounds and defaults used when resolving an anchor date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Cycle length assumed when the menstrual-period form leaves it blank
    pub default_cycle_length_days: i64,

    /// Shortest cycle length accepted
    pub min_cycle_length_days: i64,

    /// Longest cycle length accepted
    pub max_cycle_length_days: i64,

    /// Latest gestational age (in days) an imaging estimate may report.
    /// 300 days is 42w 6d.
    pub max_estimated_age_days: i64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            version: SETTINGS_VERSION.to_string(),
            default_cycle_length_days: 28,
            min_cycle_length_days: 15,
            max_cycle_length_days: 45,
            max_estimated_age_days: 300,
        }
    }
}

impl EngineSettings {
    /// Check that the bounds are consistent with each other.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.min_cycle_length_days <= crate::dates::LUTEAL_PHASE_DAYS {
            return Err(SettingsError::Invalid {
                field: "min_cycle_length_days".to_string(),
                reason: format!(
                    "must exceed the {}-day luteal phase",
                    crate::dates::LUTEAL_PHASE_DAYS
                ),
            });
        }
        if self.min_cycle_length_days > self.max_cycle_length_days {
            return Err(SettingsError::Invalid {
                field: "max_cycle_length_days".to_string(),
                reason: format!(
                    "{} is below min_cycle_length_days {}",
                    self.max_cycle_length_days, self.min_cycle_length_days
                ),
            });
        }
        if !self.cycle_length_in_bounds(self.default_cycle_length_days) {
            return Err(SettingsError::Invalid {
                field: "default_cycle_length_days".to_string(),
                reason: format!(
                    "{} is outside {}-{}",
                    self.default_cycle_length_days, self.min_cycle_length_days, self.max_cycle_length_days
                ),
            });
        }
        if self.max_estimated_age_days <= 0 {
            return Err(SettingsError::Invalid {
                field: "max_estimated_age_days".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Whether `days` is an accepted cycle length
    pub fn cycle_length_in_bounds(&self, days: i64) -> bool {
        (self.min_cycle_length_days..=self.max_cycle_length_days).contains(&days)
    }
}

/// Save settings to a JSON file with an atomic write.
pub fn save_settings(settings: &EngineSettings, path: &Path) -> Result<(), SettingsError> {
    settings.validate()?;

    let json = serde_json::to_string_pretty(settings).map_err(|source| SettingsError::Serialize {
        path: path.display().to_string(),
        source,
    })?;

    let tmp_path = path.with_extension("json.tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| io_error("create temp file", &tmp_path, e))?;
    tmp_file
        .write_all(json.as_bytes())
        .map_err(|e| io_error("write temp file", &tmp_path, e))?;
    tmp_file
        .sync_all()
        .map_err(|e| io_error("sync temp file", &tmp_path, e))?;
    drop(tmp_file);

    if let Err(e) = verify_written(&tmp_path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        io_error("rename to final", path, e)
    })?;

    log::info!("Saved engine settings to {}", path.display());
    Ok(())
}

/// Load settings from a JSON file, checking schema version and bounds.
///
/// Fields missing from the file take their default values.
pub fn load_settings(path: &Path) -> Result<EngineSettings, SettingsError> {
    let contents = fs::read_to_string(path).map_err(|e| io_error("read", path, e))?;

    let settings: EngineSettings = serde_json::from_str(&contents).map_err(|source| SettingsError::Parse {
        path: path.display().to_string(),
        source,
    })?;

    validate_version(&settings.version)?;
    settings.validate()?;

    log::info!("Loaded engine settings from {}", path.display());
    Ok(settings)
}

/// Read a freshly written file back and check it still parses.
fn verify_written(path: &Path) -> Result<(), SettingsError> {
    let contents = fs::read_to_string(path).map_err(|e| io_error("verify temp file", path, e))?;
    serde_json::from_str::<EngineSettings>(&contents).map_err(|source| SettingsError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    Ok(())
}

fn io_error(operation: &'static str, path: &Path, source: std::io::Error) -> SettingsError {
    SettingsError::Io {
        operation,
        path: path.display().to_string(),
        source,
    }
}

/// Major version must match the current schema.
fn validate_version(file_version: &str) -> Result<(), SettingsError> {
    let major = |v: &str| v.split('.').next().and_then(|p| p.parse::<u32>().ok());

    match (major(file_version), major(SETTINGS_VERSION)) {
        (Some(file), Some(current)) if file == current => Ok(()),
        _ => Err(SettingsError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SETTINGS_VERSION.to_string(),
        }),
    }
}
