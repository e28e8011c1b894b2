//! Hardware interaction modules
//!
//! The control loop only talks to the two collaborator traits below. The sysfs
//! implementations and device discovery live in the submodules.

mod control;
mod hardware;

use crate::error::Result;

pub use control::{read_sysfs_value, write_sysfs_value, SysfsBacklight, SysfsSensor};
pub use hardware::{discover_backlight, discover_illuminance_sensor};

/// Source of ambient light readings
pub trait SensorSource {
    /// Read one illuminance sample in sensor-native units
    fn read_illuminance(&self) -> Result<u32>;
}

/// Display backlight
pub trait BacklightDevice {
    /// Current brightness level
    fn read_brightness(&self) -> Result<u32>;

    /// Maximum brightness level, queried once at startup
    fn read_max_brightness(&self) -> Result<u32>;

    /// Set the brightness level
    fn write_brightness(&self, level: u32) -> Result<()>;
}

impl<T: SensorSource + ?Sized> SensorSource for &T {
    fn read_illuminance(&self) -> Result<u32> {
        (**self).read_illuminance()
    }
}

impl<T: BacklightDevice + ?Sized> BacklightDevice for &T {
    fn read_brightness(&self) -> Result<u32> {
        (**self).read_brightness()
    }

    fn read_max_brightness(&self) -> Result<u32> {
        (**self).read_max_brightness()
    }

    fn write_brightness(&self, level: u32) -> Result<()> {
        (**self).write_brightness(level)
    }
}
