/*
 * This file is part of Hyperlux.
 *
 * Copyright (C) 2025 Hyperlux contributors
 *
 * Hyperlux is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Hyperlux is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Hyperlux. If not, see <https://www.gnu.org/licenses/>.
 */

//! Command Line Interface
//!
//! Every option overrides the corresponding settings file value.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use hl_core::{SensitivityUnit, Settings};

#[derive(Parser, Debug)]
#[command(name = "hyperluxd")]
#[command(version)]
#[command(about = "Hyperlux - ambient light driven backlight control for Linux")]
#[command(long_about = "Hyperlux - ambient light driven backlight control for Linux

Reads an IIO ambient light sensor, averages the last few readings and moves
the display backlight toward a brightness proportional to the ambient light.

EXAMPLES:
    hyperluxd                              Run with autodetected devices
    hyperluxd --dry-run                    Report changes without writing
    hyperluxd --min 20 --sensitivity 5     Dimmer floor, more responsive
    hyperluxd --print-config               Show effective settings as JSON

ENVIRONMENT VARIABLES:
    HYPERLUX_LOG=debug     Log filter (overrides --debug/--dry-run defaults)

FILES:
    /etc/hyperlux/config.json             System-wide settings
    ~/.config/hyperlux/config.json        Per-user settings")]
pub struct Cli {
    /// Settings file to load instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Number of illuminance probes to average
    #[arg(long)]
    pub probes: Option<usize>,

    /// Minimum backlight value
    #[arg(long)]
    pub min: Option<u32>,

    /// Maximum backlight value (0 = device maximum)
    #[arg(long)]
    pub max: Option<u32>,

    /// Minimum change before the backlight is touched
    #[arg(long)]
    pub sensitivity: Option<u32>,

    /// Unit of --sensitivity
    #[arg(long, value_enum)]
    pub sensitivity_unit: Option<UnitArg>,

    /// Sensor units per percent of ambient light
    #[arg(long)]
    pub ratio: Option<u32>,

    /// Backlight units per ramp step
    #[arg(long, alias = "animation-steps")]
    pub ramp_step: Option<u32>,

    /// Jump straight to the new level instead of ramping
    #[arg(long)]
    pub no_ramp: bool,

    /// Evaluate from the first sample instead of waiting for a full window
    #[arg(long)]
    pub skip_warmup: bool,

    /// Interval between light checks (e.g. 4s, 500ms, 1m30s)
    #[arg(long, value_parser = parse_duration, alias = "wait")]
    pub poll_interval: Option<Duration>,

    /// Pause between ramp steps (e.g. 200ms)
    #[arg(long, value_parser = parse_duration, alias = "animation")]
    pub ramp_interval: Option<Duration>,

    /// Report changes without writing the backlight
    #[arg(long, alias = "dryrun")]
    pub dry_run: bool,

    /// Report every cycle's readings and decision
    #[arg(long)]
    pub debug: bool,

    /// Illuminance channel file (e.g. /sys/bus/iio/devices/iio:device0/in_illuminance_raw)
    #[arg(long, value_name = "PATH")]
    pub sensor: Option<PathBuf>,

    /// Backlight class directory (e.g. /sys/class/backlight/intel_backlight)
    #[arg(long, value_name = "PATH")]
    pub backlight: Option<PathBuf>,

    /// Print the effective settings as JSON and exit
    #[arg(long)]
    pub print_config: bool,

    /// Write the effective settings to the settings file and exit
    #[arg(long)]
    pub save_config: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnitArg {
    Absolute,
    Percent,
}

impl From<UnitArg> for SensitivityUnit {
    fn from(unit: UnitArg) -> Self {
        match unit {
            UnitArg::Absolute => SensitivityUnit::Absolute,
            UnitArg::Percent => SensitivityUnit::Percent,
        }
    }
}

impl Cli {
    /// Apply command-line overrides on top of loaded settings
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(probes) = self.probes {
            settings.probes = probes;
        }
        if let Some(min) = self.min {
            settings.min = min;
        }
        if let Some(max) = self.max {
            settings.max = max;
        }
        if let Some(sensitivity) = self.sensitivity {
            settings.sensitivity = sensitivity;
        }
        if let Some(unit) = self.sensitivity_unit {
            settings.sensitivity_unit = unit.into();
        }
        if let Some(ratio) = self.ratio {
            settings.ratio = ratio;
        }
        if let Some(step) = self.ramp_step {
            settings.ramp_step = step;
        }
        if let Some(interval) = self.poll_interval {
            settings.poll_interval_ms = duration_ms(interval);
        }
        if let Some(interval) = self.ramp_interval {
            settings.ramp_interval_ms = duration_ms(interval);
        }
        if let Some(path) = &self.sensor {
            settings.sensor_path = Some(path.clone());
        }
        if let Some(path) = &self.backlight {
            settings.backlight_path = Some(path.clone());
        }

        // Switches only override the file when present
        settings.ramp_enabled &= !self.no_ramp;
        settings.warmup_required &= !self.skip_warmup;
        settings.dry_run |= self.dry_run;
        settings.debug |= self.debug;
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Parse a duration such as `200ms`, `4s`, `1m30s` or `1.5h`
///
/// A bare number is milliseconds.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let input = input.trim();
    if !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit()) {
        return input
            .parse()
            .map(Duration::from_millis)
            .map_err(|_| format!("invalid duration '{}'", input));
    }

    let invalid = || format!("invalid duration '{}'", input);
    let mut rest = input;
    let mut total_nanos: u128 = 0;

    if rest.is_empty() {
        return Err(invalid());
    }

    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or_else(|| format!("missing unit in duration '{}'", input))?;
        let unit_len = rest[number_len..]
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len() - number_len);
        let number = &rest[..number_len];
        let unit = &rest[number_len..number_len + unit_len];
        rest = &rest[number_len + unit_len..];

        let unit_nanos: u128 = match unit {
            "ns" => 1,
            "us" | "µs" => 1_000,
            "ms" => 1_000_000,
            "s" => 1_000_000_000,
            "m" => 60 * 1_000_000_000,
            "h" => 3_600 * 1_000_000_000,
            other => {
                return Err(format!(
                    "unknown duration unit '{}' (use ns, us, ms, s, m or h)",
                    other
                ))
            }
        };

        let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        let whole: u128 = if whole.is_empty() { 0 } else { whole.parse().map_err(|_| invalid())? };
        let mut nanos = whole.checked_mul(unit_nanos).ok_or_else(invalid)?;

        let mut scale = unit_nanos;
        for digit in fraction.chars() {
            let digit = digit.to_digit(10).ok_or_else(invalid)?;
            scale /= 10;
            nanos += u128::from(digit) * scale;
        }

        total_nanos = total_nanos.checked_add(nanos).ok_or_else(invalid)?;
    }

    let secs = u64::try_from(total_nanos / 1_000_000_000)
        .map_err(|_| format!("duration '{}' is too large", input))?;
    Ok(Duration::new(secs, (total_nanos % 1_000_000_000) as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("200ms"), Ok(Duration::from_millis(200)));
        assert_eq!(parse_duration("4s"), Ok(Duration::from_secs(4)));
        assert_eq!(parse_duration("2m"), Ok(Duration::from_secs(120)));
        assert_eq!(parse_duration("750"), Ok(Duration::from_millis(750)));
        assert!(parse_duration("fast").is_err());
        assert!(parse_duration("5d").is_err());
        assert!(parse_duration("").is_err());
        assert!(parse_duration("1m30").is_err());
        assert!(parse_duration(".s").is_err());
    }

    #[test]
    fn test_parse_compound_duration() {
        assert_eq!(parse_duration("1h"), Ok(Duration::from_secs(3600)));
        assert_eq!(parse_duration("1m30s"), Ok(Duration::from_secs(90)));
        assert_eq!(parse_duration("1h2m3s"), Ok(Duration::from_secs(3723)));
        assert_eq!(parse_duration("1s500ms"), Ok(Duration::from_millis(1500)));
        assert_eq!(parse_duration("1.5s"), Ok(Duration::from_millis(1500)));
        assert_eq!(parse_duration("0.25h"), Ok(Duration::from_secs(900)));
        assert_eq!(parse_duration("250us"), Ok(Duration::from_micros(250)));
    }

    #[test]
    fn test_legacy_wait_accepts_compound_values() {
        let cli = Cli::try_parse_from(["hyperluxd", "--wait", "1m30s", "--animation", "0.2s"])
            .unwrap();
        assert_eq!(cli.poll_interval, Some(Duration::from_secs(90)));
        assert_eq!(cli.ramp_interval, Some(Duration::from_millis(200)));
    }

    #[test]
    fn test_no_flags_keep_settings() {
        let cli = Cli::try_parse_from(["hyperluxd"]).unwrap();
        let mut settings = Settings::default();
        cli.apply_to(&mut settings);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "hyperluxd",
            "--probes",
            "4",
            "--min",
            "20",
            "--max",
            "500",
            "--sensitivity",
            "5",
            "--sensitivity-unit",
            "percent",
            "--ratio",
            "60",
            "--ramp-step",
            "10",
            "--poll-interval",
            "2s",
            "--ramp-interval",
            "50ms",
            "--no-ramp",
            "--skip-warmup",
            "--dry-run",
            "--debug",
            "--backlight",
            "/sys/class/backlight/intel_backlight",
        ])
        .unwrap();

        let mut settings = Settings::default();
        cli.apply_to(&mut settings);

        assert_eq!(settings.probes, 4);
        assert_eq!(settings.min, 20);
        assert_eq!(settings.max, 500);
        assert_eq!(settings.sensitivity, 5);
        assert_eq!(settings.sensitivity_unit, SensitivityUnit::Percent);
        assert_eq!(settings.ratio, 60);
        assert_eq!(settings.ramp_step, 10);
        assert_eq!(settings.poll_interval_ms, 2000);
        assert_eq!(settings.ramp_interval_ms, 50);
        assert!(!settings.ramp_enabled);
        assert!(!settings.warmup_required);
        assert!(settings.dry_run);
        assert!(settings.debug);
        assert_eq!(
            settings.backlight_path,
            Some(PathBuf::from("/sys/class/backlight/intel_backlight"))
        );
        assert_eq!(settings.sensor_path, None);
    }

    #[test]
    fn test_legacy_aliases() {
        let cli =
            Cli::try_parse_from(["hyperluxd", "--animation-steps", "3", "--wait", "10s", "--dryrun"])
                .unwrap();
        assert_eq!(cli.ramp_step, Some(3));
        assert_eq!(cli.poll_interval, Some(Duration::from_secs(10)));
        assert!(cli.dry_run);
    }

    #[test]
    fn test_file_switches_survive_absent_flags() {
        let cli = Cli::try_parse_from(["hyperluxd"]).unwrap();
        let mut settings = Settings { dry_run: true, ramp_enabled: false, ..Settings::default() };
        cli.apply_to(&mut settings);
        assert!(settings.dry_run);
        assert!(!settings.ramp_enabled);
    }
}
