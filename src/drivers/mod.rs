// RoundWatch — Peripheral Drivers

use crate::error::SensorError;
use crate::events::RawSample;

pub mod imu;

#[cfg(target_os = "espidf")]
pub mod adc;
#[cfg(target_os = "espidf")]
pub mod panel;

/// Anything that can produce one raw 6-axis burst on demand.
pub trait SensorSource {
    fn read_six_samples(&mut self) -> Result<RawSample, SensorError>;
}
