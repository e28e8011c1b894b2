//! Hysteresis gate
//!
//! Decides whether the current backlight level should be replaced by the
//! mapped target. Small differences are ignored so sensor noise near a mapping
//! boundary does not cause continual writes. A level below the configured floor
//! is always corrected, whatever the target. An unchanged level above the floor
//! is never rewritten, even with a sensitivity of 0.

use crate::data::ControllerConfig;

/// Whether `current` should be replaced by `target`
pub fn should_apply(current: u32, target: u32, config: &ControllerConfig) -> bool {
    current < config.min
        || (current != target && current.abs_diff(target) >= config.sensitivity_threshold())
}
