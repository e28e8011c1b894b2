//! Brightness control engine modules
//!
//! Contains the sample window, the mapper, the hysteresis gate and ramp planning.

mod hysteresis;
mod mapper;
mod ramp;
mod window;

pub use hysteresis::should_apply;
pub use mapper::{ambient_percent, target_brightness};
pub use ramp::{ramp_levels, RampSteps};
pub use window::SampleWindow;
