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

//! Brightness ramp actuator
//!
//! Writes a planned ramp to the backlight, pausing `ramp_interval` between
//! consecutive writes. A shutdown request during a pause stops the ramp at the
//! level last written.

use std::time::Duration;

use hl_core::{BacklightDevice, ControllerConfig, RampSteps, Result};
use tracing::trace;

use crate::shutdown::Shutdown;

/// How a ramp ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RampOutcome {
    /// Every planned level was written
    Completed,
    /// Shutdown was requested before the last level
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct Ramper {
    step: u32,
    enabled: bool,
    interval: Duration,
    shutdown: Shutdown,
}

impl Ramper {
    pub fn new(config: &ControllerConfig, shutdown: Shutdown) -> Self {
        Self {
            step: config.ramp_step,
            enabled: config.ramp_enabled,
            interval: config.ramp_interval,
            shutdown,
        }
    }

    /// Levels that would be written to move from `current` to `target`
    pub fn plan(&self, current: u32, target: u32) -> RampSteps {
        if self.enabled {
            RampSteps::new(current, target, self.step)
        } else {
            RampSteps::jump(current, target)
        }
    }

    /// Write the ramp from `current` to `target`
    pub async fn run<B: BacklightDevice>(
        &self,
        device: &B,
        current: u32,
        target: u32,
    ) -> Result<RampOutcome> {
        let mut levels = self.plan(current, target).peekable();

        while let Some(level) = levels.next() {
            trace!("Writing backlight level {}", level);
            device.write_brightness(level)?;

            if levels.peek().is_some() && !self.shutdown.sleep(self.interval).await {
                return Ok(RampOutcome::Cancelled);
            }
        }

        Ok(RampOutcome::Completed)
    }
}
