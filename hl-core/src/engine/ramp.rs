//! Ramp planning
//!
//! Produces the intermediate brightness levels between a current and a target
//! level. Each level moves at most `step` units toward the target and the last
//! one is exactly the target. The starting level itself is not included since
//! it is already on the device.

/// Iterator over the levels of a ramp from `current` to `target`
#[derive(Debug, Clone)]
pub struct RampSteps {
    current: u32,
    target: u32,
    step: u32,
}

impl RampSteps {
    /// Plan a ramp; a `step` of 0 jumps straight to the target
    pub fn new(current: u32, target: u32, step: u32) -> Self {
        Self {
            current,
            target,
            step: if step == 0 { u32::MAX } else { step },
        }
    }

    /// Single-step plan, used when ramping is disabled
    pub fn jump(current: u32, target: u32) -> Self {
        Self::new(current, target, 0)
    }
}

impl Iterator for RampSteps {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.current == self.target {
            return None;
        }
        self.current = if self.current < self.target {
            self.current.saturating_add(self.step).min(self.target)
        } else {
            self.current.saturating_sub(self.step).max(self.target)
        };
        Some(self.current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let distance = self.current.abs_diff(self.target);
        let remaining = distance.div_ceil(self.step) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RampSteps {}

/// Collect the full ramp from `current` to `target`
pub fn ramp_levels(current: u32, target: u32, step: u32) -> Vec<u32> {
    RampSteps::new(current, target, step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increase_in_steps() {
        assert_eq!(ramp_levels(40, 70, 5), vec![45, 50, 55, 60, 65, 70]);
    }

    #[test]
    fn test_decrease_clamps_to_target() {
        assert_eq!(ramp_levels(70, 58, 5), vec![65, 60, 58]);
    }

    #[test]
    fn test_no_change_is_empty() {
        assert!(ramp_levels(55, 55, 5).is_empty());
    }

    #[test]
    fn test_step_larger_than_distance() {
        assert_eq!(ramp_levels(10, 12, 50), vec![12]);
    }

    #[test]
    fn test_jump() {
        assert_eq!(RampSteps::jump(10, 200).collect::<Vec<_>>(), vec![200]);
        assert_eq!(RampSteps::jump(200, 10).collect::<Vec<_>>(), vec![10]);
    }

    #[test]
    fn test_extremes_do_not_overflow() {
        assert_eq!(ramp_levels(u32::MAX - 3, u32::MAX, 5), vec![u32::MAX]);
        assert_eq!(ramp_levels(3, 0, 5), vec![0]);
    }

    #[test]
    fn test_size_hint_matches_len() {
        let steps = RampSteps::new(3, 1000, 7);
        let expected = steps.len();
        assert_eq!(steps.count(), expected);
    }

    #[test]
    fn test_ramp_properties() {
        for (current, target, step) in [(0, 937, 13), (937, 0, 13), (40, 41, 5), (500, 120, 1)] {
            let levels = ramp_levels(current, target, step);
            assert_eq!(levels.last().copied(), Some(target));

            let mut previous = current;
            for level in levels {
                assert!(previous.abs_diff(level) <= step);
                if current < target {
                    assert!(level > previous);
                } else {
                    assert!(level < previous);
                }
                previous = level;
            }
        }
    }
}
