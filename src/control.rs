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

//! Backlight control loop
//!
//! Samples the ambient light sensor, smooths the readings, maps the average to
//! a brightness target and ramps the backlight toward it when the change is
//! large enough.
//!
//! # Phases
//!
//! ```text
//! Sampling -> Evaluating -> Applying -> Sampling
//!                        \-> Idle ----> Sampling
//! ```
//!
//! - **Sampling**: read the backlight level and one illuminance sample. While
//!   the window is still filling (and warm-up is required) sample again at once.
//! - **Evaluating**: average, map and gate.
//! - **Applying**: ramp to the target, then sample again without sleeping.
//! - **Idle**: sleep for the poll interval.
//!
//! `Stopped` is reached only through a shutdown request. Any read failure and
//! any write failure is returned to the caller.

use hl_core::{
    ambient_percent, should_apply, target_brightness, BacklightDevice, ControllerConfig, Result,
    SampleWindow, SensorSource,
};
use tracing::debug;

use crate::diagnostics::{CycleReport, Diagnostics, LoopEvent};
use crate::ramper::{RampOutcome, Ramper};
use crate::shutdown::Shutdown;

/// Control loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Sampling,
    Evaluating { current: u32 },
    Applying { current: u32, target: u32 },
    Idle,
    Stopped,
}

pub struct ControlLoop<S, B, D> {
    sensor: S,
    backlight: B,
    diagnostics: D,
    config: ControllerConfig,
    window: SampleWindow,
    ramper: Ramper,
    shutdown: Shutdown,
}

impl<S, B, D> ControlLoop<S, B, D>
where
    S: SensorSource,
    B: BacklightDevice,
    D: Diagnostics,
{
    pub fn new(
        sensor: S,
        backlight: B,
        diagnostics: D,
        config: ControllerConfig,
        shutdown: Shutdown,
    ) -> Self {
        Self {
            window: SampleWindow::new(config.probes),
            ramper: Ramper::new(&config, shutdown.clone()),
            sensor,
            backlight,
            diagnostics,
            config,
            shutdown,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn window(&self) -> &SampleWindow {
        &self.window
    }

    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    /// Run until shutdown or the first error
    pub async fn run(&mut self) -> Result<()> {
        debug!(
            "Control loop started: probes={}, min={}, max={}, threshold={}, ratio={}",
            self.config.probes,
            self.config.min,
            self.config.max,
            self.config.sensitivity_threshold(),
            self.config.ratio
        );

        let mut phase = Phase::Sampling;
        while phase != Phase::Stopped {
            phase = self.step(phase).await?;
        }

        debug!("Control loop stopped");
        Ok(())
    }

    /// Perform one phase and return the next
    pub async fn step(&mut self, phase: Phase) -> Result<Phase> {
        match phase {
            Phase::Sampling => self.sample(),
            Phase::Evaluating { current } => Ok(self.evaluate(current)),
            Phase::Applying { current, target } => self.apply(current, target).await,
            Phase::Idle => Ok(self.idle().await),
            Phase::Stopped => Ok(Phase::Stopped),
        }
    }

    fn sample(&mut self) -> Result<Phase> {
        if self.shutdown.is_triggered() {
            return Ok(Phase::Stopped);
        }

        let current = self.backlight.read_brightness()?;
        let illuminance = self.sensor.read_illuminance()?;
        self.window.push(illuminance);

        if self.config.warmup_required && !self.window.is_warm() {
            if self.config.debug {
                self.diagnostics.record(LoopEvent::WarmingUp {
                    filled: self.window.len(),
                    capacity: self.window.capacity(),
                });
            }
            return Ok(Phase::Sampling);
        }

        Ok(Phase::Evaluating { current })
    }

    fn evaluate(&mut self, current: u32) -> Phase {
        let Some(average) = self.window.average() else {
            return Phase::Sampling;
        };
        let percent = ambient_percent(average, self.config.ratio);
        let target = target_brightness(average, &self.config);
        let apply = should_apply(current, target, &self.config);

        if self.config.debug {
            self.diagnostics.record(LoopEvent::Cycle(CycleReport {
                current,
                target,
                average,
                percent,
                threshold: self.config.sensitivity_threshold(),
                apply,
            }));
        }

        if !apply {
            return Phase::Idle;
        }

        self.diagnostics.record(LoopEvent::Change {
            from: current,
            to: target,
            average,
            percent,
            steps: self.ramper.plan(current, target).collect(),
            dry_run: self.config.dry_run,
        });

        if self.config.dry_run {
            Phase::Idle
        } else {
            Phase::Applying { current, target }
        }
    }

    async fn apply(&mut self, current: u32, target: u32) -> Result<Phase> {
        match self.ramper.run(&self.backlight, current, target).await? {
            RampOutcome::Completed => Ok(Phase::Sampling),
            RampOutcome::Cancelled => Ok(Phase::Stopped),
        }
    }

    async fn idle(&mut self) -> Phase {
        if self.shutdown.sleep(self.config.poll_interval).await {
            Phase::Sampling
        } else {
            Phase::Stopped
        }
    }
}
