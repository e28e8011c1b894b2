//! Persistent settings
//!
//! Settings are stored as JSON, system-wide in /etc/hyperlux/config.json or per
//! user in ~/.config/hyperlux/config.json. Every field has a default, so a
//! partial file (or no file at all) is valid. Command-line flags are applied on
//! top of the loaded settings before they are resolved into a
//! [`ControllerConfig`](crate::ControllerConfig).

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::{defaults, limits, paths};
use crate::data::SensitivityUnit;
use crate::error::{HyperluxError, Result};

/// Controller settings as stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Number of illuminance probes to average
    #[serde(default = "default_probes")]
    pub probes: usize,

    /// Minimum backlight value
    #[serde(default = "default_min")]
    pub min: u32,

    /// Maximum backlight value (0 = autodetect from device)
    #[serde(default)]
    pub max: u32,

    /// Minimum change required before writing a new backlight value
    #[serde(default = "default_sensitivity")]
    pub sensitivity: u32,

    /// Whether `sensitivity` is in brightness units or percent of the ceiling
    #[serde(default)]
    pub sensitivity_unit: SensitivityUnit,

    /// Sensor units equivalent to a 1% change of ambient light
    #[serde(default = "default_ratio")]
    pub ratio: u32,

    /// Backlight units added or removed per ramp step
    #[serde(default = "default_ramp_step")]
    pub ramp_step: u32,

    /// Ramp between levels instead of jumping
    #[serde(default = "default_true")]
    pub ramp_enabled: bool,

    /// Wait for a full sample window before the first decision
    #[serde(default = "default_true")]
    pub warmup_required: bool,

    /// Interval between checks for changed light conditions
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    /// Interval between ramp steps
    #[serde(default = "default_ramp_interval")]
    pub ramp_interval_ms: u64,

    /// Do not write the backlight, only report what would happen
    #[serde(default)]
    pub dry_run: bool,

    /// Report every cycle's readings and decision
    #[serde(default)]
    pub debug: bool,

    /// Illuminance channel file (autodetected when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor_path: Option<PathBuf>,

    /// Backlight class directory (autodetected when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backlight_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            probes: default_probes(),
            min: default_min(),
            max: defaults::MAX_BRIGHTNESS,
            sensitivity: default_sensitivity(),
            sensitivity_unit: SensitivityUnit::default(),
            ratio: default_ratio(),
            ramp_step: default_ramp_step(),
            ramp_enabled: true,
            warmup_required: true,
            poll_interval_ms: default_poll_interval(),
            ramp_interval_ms: default_ramp_interval(),
            dry_run: false,
            debug: false,
            sensor_path: None,
            backlight_path: None,
        }
    }
}

fn default_probes() -> usize { defaults::PROBES }
fn default_min() -> u32 { defaults::MIN_BRIGHTNESS }
fn default_sensitivity() -> u32 { defaults::SENSITIVITY }
fn default_ratio() -> u32 { defaults::RATIO }
fn default_ramp_step() -> u32 { defaults::RAMP_STEP }
fn default_true() -> bool { true }
fn default_poll_interval() -> u64 { defaults::POLL_INTERVAL_MS }
fn default_ramp_interval() -> u64 { defaults::RAMP_INTERVAL_MS }

/// Path of the settings file used when none is given explicitly
///
/// The system-wide file wins when it exists; otherwise the per-user file is
/// returned (whether or not it exists yet).
pub fn default_settings_path() -> PathBuf {
    let system = paths::system_config_file();
    if system.exists() {
        return system;
    }
    paths::user_config_dir()
        .map(|dir| dir.join(paths::CONFIG_FILE))
        .unwrap_or(system)
}

/// Load settings from the default location, falling back to defaults
pub fn load_settings() -> Result<Settings> {
    load_settings_from(&default_settings_path())
}

/// Load settings from a JSON file
///
/// A missing file yields the defaults. A present but unreadable, oversized or
/// malformed file is an error.
pub fn load_settings_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        debug!("No settings file at {:?}, using defaults", path);
        return Ok(Settings::default());
    }

    let metadata = fs::metadata(path).map_err(|e| HyperluxError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    if metadata.len() > limits::MAX_SETTINGS_SIZE {
        return Err(HyperluxError::config(format!(
            "settings file {:?} exceeds maximum size of {} bytes",
            path,
            limits::MAX_SETTINGS_SIZE
        )));
    }

    let content = fs::read_to_string(path).map_err(|e| HyperluxError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let settings: Settings = serde_json::from_str(&content)?;
    debug!("Loaded settings from {:?}", path);
    Ok(settings)
}

/// Save settings to a JSON file
///
/// Writes a temp file next to the target and renames it over the target.
pub fn save_settings(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| HyperluxError::FileWrite {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let json = serde_json::to_string_pretty(settings)?;
    let temp_path = path.with_extension("json.tmp");

    let write_temp = || -> std::io::Result<()> {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(json.as_bytes())?;
        file.write_all(b"\n")?;
        file.sync_all()
    };
    write_temp().map_err(|e| HyperluxError::FileWrite {
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| HyperluxError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    debug!("Saved settings to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.probes, 8);
        assert_eq!(settings.min, 40);
        assert_eq!(settings.max, 0);
        assert_eq!(settings.sensitivity, 18);
        assert_eq!(settings.ratio, 20);
        assert_eq!(settings.ramp_step, 5);
        assert_eq!(settings.poll_interval_ms, 4000);
        assert_eq!(settings.ramp_interval_ms, 200);
        assert!(settings.ramp_enabled);
        assert!(settings.warmup_required);
        assert!(!settings.dry_run);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "min": 10, "sensitivity_unit": "percent" }"#).unwrap();
        assert_eq!(settings.min, 10);
        assert_eq!(settings.sensitivity_unit, SensitivityUnit::Percent);
        assert_eq!(settings.probes, defaults::PROBES);
        assert!(settings.warmup_required);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = load_settings_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_settings_from(&path), Err(HyperluxError::JsonParse(_))));
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let settings = Settings {
            probes: 4,
            ratio: 60,
            backlight_path: Some(PathBuf::from("/sys/class/backlight/acpi_video0")),
            ..Settings::default()
        };

        save_settings(&settings, &path).unwrap();
        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(load_settings_from(&path).unwrap(), settings);
    }
}
