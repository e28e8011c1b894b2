//! Illuminance to brightness mapping
//!
//! The ambient reading is first expressed as a percentage of full ambient
//! scale (`ratio` sensor units per percent), then spread linearly over
//! `[min, max]`. Both steps clamp, so the result never leaves that range and
//! never decreases as illuminance increases.

use crate::constants::mapping::PERCENT_SCALE;
use crate::data::ControllerConfig;

/// Ambient light as a percentage (0-100) of full scale
pub fn ambient_percent(illuminance: u32, ratio: u32) -> u32 {
    let full_scale = u64::from(ratio.max(1)) * PERCENT_SCALE;
    (u64::from(illuminance) * PERCENT_SCALE / full_scale).min(PERCENT_SCALE) as u32
}

/// Target brightness for an averaged illuminance reading
pub fn target_brightness(illuminance: u32, config: &ControllerConfig) -> u32 {
    let percent = u64::from(ambient_percent(illuminance, config.ratio));
    let span = u64::from(config.max.saturating_sub(config.min));
    let level = percent * span / PERCENT_SCALE + u64::from(config.min);
    level.clamp(u64::from(config.min), u64::from(config.max)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ControllerConfig {
        ControllerConfig {
            min: 40,
            max: 100,
            ratio: 60,
            sensitivity: 2,
            ..ControllerConfig::with_device_max(100)
        }
    }

    #[test]
    fn test_midpoint() {
        let config = test_config();
        assert_eq!(ambient_percent(3000, config.ratio), 50);
        assert_eq!(target_brightness(3000, &config), 70);
    }

    #[test]
    fn test_dark_maps_to_floor() {
        assert_eq!(target_brightness(0, &test_config()), 40);
    }

    #[test]
    fn test_saturates_at_ceiling() {
        let config = test_config();
        assert_eq!(target_brightness(6000, &config), 100);
        assert_eq!(target_brightness(1_000_000, &config), 100);
        assert_eq!(target_brightness(u32::MAX, &config), 100);
    }

    #[test]
    fn test_output_within_bounds() {
        let config = test_config();
        for illuminance in (0..20_000).step_by(37) {
            let target = target_brightness(illuminance, &config);
            assert!((config.min..=config.max).contains(&target), "{illuminance} -> {target}");
        }
    }

    #[test]
    fn test_monotonic() {
        let config = ControllerConfig { min: 3, max: 937, ratio: 7, ..ControllerConfig::with_device_max(937) };
        let mut last = 0;
        for illuminance in 0..2_000 {
            let target = target_brightness(illuminance, &config);
            assert!(target >= last, "{illuminance}: {target} < {last}");
            last = target;
        }
    }

    #[test]
    fn test_min_equals_max() {
        let config = ControllerConfig { min: 50, max: 50, ..test_config() };
        assert_eq!(target_brightness(0, &config), 50);
        assert_eq!(target_brightness(100_000, &config), 50);
    }
}
