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

//! Tracing subscriber setup
//!
//! Logs go to the systemd journal when its socket exists, otherwise to stdout.

use std::path::Path;

/// Environment variable overriding the log filter
pub const LOG_ENV: &str = "HYPERLUX_LOG";

const JOURNAL_SOCKET: &str = "/run/systemd/journal/socket";

/// Where log output ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Journal,
    Stdout,
}

impl std::fmt::Display for LogTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogTarget::Journal => write!(f, "systemd journal"),
            LogTarget::Stdout => write!(f, "stdout"),
        }
    }
}

/// Log filter directive
///
/// An explicit `HYPERLUX_LOG` value wins. Otherwise `--debug` selects `debug`,
/// `--dry-run` selects `info` so the reported changes are visible, and a
/// normal run only logs warnings and errors.
pub fn log_filter(env: Option<String>, debug: bool, dry_run: bool) -> String {
    match env {
        Some(filter) if !filter.trim().is_empty() => filter,
        _ if debug => "debug".to_string(),
        _ if dry_run => "info".to_string(),
        _ => "warn".to_string(),
    }
}

/// Install the global tracing subscriber
pub fn init_tracing(filter: &str) -> LogTarget {
    if Path::new(JOURNAL_SOCKET).exists() {
        match tracing_journald::layer() {
            Ok(journald_layer) => {
                use tracing_subscriber::prelude::*;
                tracing_subscriber::registry()
                    .with(journald_layer)
                    .with(tracing_subscriber::EnvFilter::new(filter))
                    .init();
                return LogTarget::Journal;
            }
            Err(e) => {
                eprintln!("Failed to create journald layer: {}, falling back to stdout", e);
            }
        }
    }

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_env_filter(filter)
        .init();
    LogTarget::Stdout
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_wins() {
        assert_eq!(log_filter(Some("trace".into()), false, true), "trace");
        assert_eq!(log_filter(Some("hyperlux=debug".into()), false, false), "hyperlux=debug");
    }

    #[test]
    fn test_blank_env_ignored() {
        assert_eq!(log_filter(Some("  ".into()), false, false), "warn");
    }

    #[test]
    fn test_flag_defaults() {
        assert_eq!(log_filter(None, true, true), "debug");
        assert_eq!(log_filter(None, false, true), "info");
        assert_eq!(log_filter(None, false, false), "warn");
    }
}
