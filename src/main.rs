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

//! Hyperlux daemon
//!
//! Startup order: settings, command-line overrides, logging, devices, resolved
//! configuration, signal handler, control loop. Any error after logging is up
//! is logged and ends the process with status 1.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};

use hl_core::constants::paths;
use hl_core::{
    discover_backlight, discover_illuminance_sensor, validate_backlight_dir,
    validate_sensor_path, BacklightDevice, ControllerConfig, Settings, SysfsBacklight,
    SysfsSensor,
};
use hyperlux::cli::Cli;
use hyperlux::logging::{init_tracing, log_filter, LOG_ENV};
use hyperlux::{ControlLoop, Shutdown, TracingDiagnostics};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings_path = cli.config.clone();
    let mut settings = match &settings_path {
        Some(path) => hl_core::load_settings_from(path),
        None => hl_core::load_settings(),
    }
    .context("Failed to load settings")?;
    cli.apply_to(&mut settings);

    if cli.print_config {
        let json = serde_json::to_string_pretty(&settings).context("Failed to encode settings")?;
        println!("{}", json);
        return Ok(());
    }

    if cli.save_config {
        let path = settings_path.unwrap_or_else(hl_core::default_settings_path);
        hl_core::save_settings(&settings, &path)
            .with_context(|| format!("Failed to save settings to {}", path.display()))?;
        println!("Saved settings to {}", path.display());
        return Ok(());
    }

    let filter = log_filter(std::env::var(LOG_ENV).ok(), settings.debug, settings.dry_run);
    let target = init_tracing(&filter);

    info!("STARTUP: hyperluxd {} starting", VERSION);
    info!("STARTUP: Logging to {} (filter: {})", target, filter);

    if let Err(e) = run(&settings).await {
        error!("{}", e);
        std::process::exit(1);
    }

    info!("SHUTDOWN: hyperluxd stopped");
    Ok(())
}

async fn run(settings: &Settings) -> hl_core::Result<()> {
    let sensor = SysfsSensor::new(sensor_path(settings)?);
    let backlight = SysfsBacklight::new(backlight_dir(settings)?);

    let device_max = backlight.read_max_brightness()?;
    let config = ControllerConfig::resolve(settings, device_max)?;

    info!(
        "STARTUP: sensor={}, backlight={}, range={}..={} (device max {})",
        sensor.path().display(),
        backlight.brightness_path().display(),
        config.min,
        config.max,
        device_max
    );
    if config.dry_run {
        info!("STARTUP: Dry run, the backlight will not be written");
    }

    let shutdown = Shutdown::new();
    let handle = shutdown.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("SIGNAL: Received SIGINT/SIGTERM - initiating shutdown");
        handle.trigger();
    }) {
        warn!("Failed to set signal handler: {}. Shutdown via signals may not work cleanly.", e);
    }

    let mut control = ControlLoop::new(sensor, backlight, TracingDiagnostics, config, shutdown);
    control.run().await
}

fn sensor_path(settings: &Settings) -> hl_core::Result<PathBuf> {
    match &settings.sensor_path {
        Some(path) => validate_sensor_path(path),
        None => discover_illuminance_sensor(Path::new(paths::IIO_BASE)),
    }
}

fn backlight_dir(settings: &Settings) -> hl_core::Result<PathBuf> {
    match &settings.backlight_path {
        Some(path) => validate_backlight_dir(path),
        None => discover_backlight(Path::new(paths::BACKLIGHT_BASE)),
    }
}
