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

//! Control loop diagnostics
//!
//! The control loop reports what it observes and decides through a
//! [`Diagnostics`] sink handed to it at construction. The daemon uses
//! [`TracingDiagnostics`]; tests collect events in a `Vec`.

use tracing::{debug, info};

/// One evaluation of the control loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    /// Brightness read back from the device
    pub current: u32,
    /// Brightness the mapper asked for
    pub target: u32,
    /// Window average the target was computed from
    pub average: u32,
    /// Ambient light as a percentage of full scale
    pub percent: u32,
    /// Minimum change the gate required
    pub threshold: u32,
    /// Gate decision
    pub apply: bool,
}

/// Event reported by the control loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopEvent {
    /// A sample was taken but the window is not warm yet (debug only)
    WarmingUp { filled: usize, capacity: usize },
    /// Readings and decision of one cycle (debug only)
    Cycle(CycleReport),
    /// The gate accepted a change; `steps` is the planned write sequence
    Change {
        from: u32,
        to: u32,
        average: u32,
        percent: u32,
        steps: Vec<u32>,
        dry_run: bool,
    },
}

/// Sink for control loop events
pub trait Diagnostics {
    fn record(&mut self, event: LoopEvent);
}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn record(&mut self, event: LoopEvent) {
        (**self).record(event)
    }
}

impl Diagnostics for Vec<LoopEvent> {
    fn record(&mut self, event: LoopEvent) {
        self.push(event);
    }
}

/// Sink that forwards events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn record(&mut self, event: LoopEvent) {
        match event {
            LoopEvent::WarmingUp { filled, capacity } => {
                debug!("WARMUP: {}/{} probes collected", filled, capacity);
            }
            LoopEvent::Cycle(report) => {
                debug!(
                    "CYCLE: light={} ({}%), backlight={}, target={} (diff {}, min-diff {}), apply={}",
                    report.average,
                    report.percent,
                    report.current,
                    report.target,
                    report.current.abs_diff(report.target),
                    report.threshold,
                    report.apply
                );
            }
            LoopEvent::Change { from, to, average, percent, steps, dry_run } => {
                if dry_run {
                    info!(
                        "DRY RUN: would change backlight {} -> {} ({}%, illuminance={}) via {:?}",
                        from, to, percent, average, steps
                    );
                } else {
                    info!(
                        "ACTION: change backlight {} -> {} ({}%, illuminance={}) in {} steps",
                        from,
                        to,
                        percent,
                        average,
                        steps.len()
                    );
                }
            }
        }
    }
}
