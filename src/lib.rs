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

//! Hyperlux - ambient light driven backlight control daemon for Linux
//!
//! This library holds the daemon side of Hyperlux: the control loop state
//! machine, the ramp actuator, diagnostics, logging setup and the command line.
//! The pure engine and the sysfs collaborators live in `hl-core`.

pub mod cli;
pub mod control;
pub mod diagnostics;
pub mod logging;
pub mod ramper;
pub mod shutdown;

pub use control::{ControlLoop, Phase};
pub use diagnostics::{CycleReport, Diagnostics, LoopEvent, TracingDiagnostics};
pub use ramper::{RampOutcome, Ramper};
pub use shutdown::Shutdown;
