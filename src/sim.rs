// RoundWatch — Host Simulation
//
// Replayable stand-ins for the IMU and battery so the board loop can run on
// a development machine and in tests. Scripts are written in calibrated
// units (°/s) and converted back to raw counts for a given calibration.

use std::collections::VecDeque;

use crate::battery::BatterySource;
use crate::config::Calibration;
use crate::drivers::SensorSource;
use crate::error::SensorError;
use crate::events::RawSample;

/// Rate used for every scripted tilt, well clear of resting noise.
pub const FLICK_DPS: f32 = 40.0;

/// Replays a queue of samples, one per read. Once drained it reports rest.
pub struct ScriptedSensor {
    queue: VecDeque<Result<RawSample, String>>,
    idle: RawSample,
    reads: usize,
}

impl ScriptedSensor {
    pub fn new(samples: impl IntoIterator<Item = RawSample>, idle: RawSample) -> Self {
        Self {
            queue: samples.into_iter().map(Ok).collect(),
            idle,
            reads: 0,
        }
    }

    pub fn extend(&mut self, samples: impl IntoIterator<Item = RawSample>) {
        self.queue.extend(samples.into_iter().map(Ok));
    }

    /// Queue a failed bus transaction.
    pub fn push_failure(&mut self, reason: &str) {
        self.queue.push_back(Err(reason.to_string()));
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl SensorSource for ScriptedSensor {
    fn read_six_samples(&mut self) -> Result<RawSample, SensorError> {
        self.reads += 1;
        match self.queue.pop_front() {
            Some(Ok(sample)) => Ok(sample),
            Some(Err(reason)) => Err(SensorError::Read(reason)),
            None => Ok(self.idle),
        }
    }
}

/// Battery that always reads the same voltage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedBattery(pub f32);

impl BatterySource for FixedBattery {
    fn read_voltage(&mut self) -> f32 {
        self.0
    }
}

/// Builder for tick-by-tick sensor scripts.
///
/// Gesture helpers open with a tilt-left flick. The recognizer ignores a
/// command equal to the last accepted one, so without it a repeated
/// combination would lose its first command.
#[derive(Debug, Clone)]
pub struct Script {
    calibration: Calibration,
    samples: Vec<RawSample>,
}

impl Script {
    pub fn new(calibration: Calibration) -> Self {
        Self { calibration, samples: Vec::new() }
    }

    /// Raw counts that calibrate to `gyro_dps` with the board lying flat.
    pub fn raw(&self, gyro_dps: [f32; 3]) -> RawSample {
        let cal = &self.calibration;
        let accel = |g: f32, bias: f32| ((g - bias) * cal.accel_lsb_per_g).round() as i16;
        let gyro = |dps: f32, bias: f32| ((dps - bias) * cal.gyro_lsb_per_dps).round() as i16;
        // Sensor X feeds calibrated accel Y and vice versa.
        RawSample::new(
            accel(0.0, cal.accel_bias[1]),
            accel(0.0, cal.accel_bias[0]),
            accel(1.0, cal.accel_bias[2]),
            gyro(gyro_dps[0], cal.gyro_bias[0]),
            gyro(gyro_dps[1], cal.gyro_bias[1]),
            gyro(gyro_dps[2], cal.gyro_bias[2]),
        )
    }

    pub fn rest_sample(&self) -> RawSample {
        self.raw([0.0; 3])
    }

    pub fn hold(mut self, gyro_dps: [f32; 3], ticks: usize) -> Self {
        let sample = self.raw(gyro_dps);
        self.samples.extend(std::iter::repeat(sample).take(ticks));
        self
    }

    pub fn rest(self, ticks: usize) -> Self {
        self.hold([0.0; 3], ticks)
    }

    /// One tick of `first`, one of `second`, one at rest.
    pub fn flick(self, first: [f32; 3], second: [f32; 3]) -> Self {
        self.hold(first, 1).hold(second, 1).rest(1)
    }

    fn triple(self, a: [f32; 3], b: [f32; 3]) -> Self {
        self.flick(LEFT, RIGHT).flick(a, b).flick(b, a).flick(a, b)
    }

    /// Twist left, right, left. Raises LRL.
    pub fn lrl(self) -> Self {
        self.triple(TWIST_LEFT, TWIST_RIGHT)
    }

    /// Twist right, left, right. Raises RLR.
    pub fn rlr(self) -> Self {
        self.triple(TWIST_RIGHT, TWIST_LEFT)
    }

    /// Tilt up, down, up. Raises DUD under the default `DudPattern`.
    pub fn up_down_up(self) -> Self {
        self.triple(UP, DOWN)
    }

    /// Tilt down, up, down. Raises DUD under `DudPattern::DownUpDown`.
    pub fn down_up_down(self) -> Self {
        self.triple(DOWN, UP)
    }

    pub fn samples(&self) -> &[RawSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn into_sensor(self) -> ScriptedSensor {
        let idle = self.rest_sample();
        ScriptedSensor::new(self.samples, idle)
    }
}

const TWIST_LEFT: [f32; 3] = [0.0, 0.0, FLICK_DPS];
const TWIST_RIGHT: [f32; 3] = [0.0, 0.0, -FLICK_DPS];
const UP: [f32; 3] = [0.0, FLICK_DPS, 0.0];
const DOWN: [f32; 3] = [0.0, -FLICK_DPS, 0.0];
const LEFT: [f32; 3] = [-FLICK_DPS, 0.0, 0.0];
const RIGHT: [f32; 3] = [FLICK_DPS, 0.0, 0.0];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Axes, Combination, TiltState};
    use crate::gesture::calibration::calibrate;
    use crate::gesture::GestureRecognizer;
    use crate::config::GestureConfig;

    #[test]
    fn rest_sample_cancels_bias() {
        let cal = Calibration::default();
        let reading = calibrate(&Script::new(cal).rest_sample(), &cal);
        assert_eq!(reading.gyro, Axes::ZERO);
        assert_eq!(reading.accel.x, 0);
        assert_eq!(reading.accel.y, 0);
    }

    #[test]
    fn scripted_rates_survive_calibration() {
        let cal = Calibration::default();
        let script = Script::new(cal);
        let up = calibrate(&script.raw(UP), &cal);
        assert_eq!(up.gyro, Axes::new(0, 40, 0));
        assert_eq!(crate::gesture::tilt::classify(up.gyro), TiltState::TiltUp);
    }

    #[test]
    fn replay_then_idle() {
        let mut sensor = Script::new(Calibration::default()).hold(UP, 2).into_sensor();
        sensor.push_failure("nack");
        assert_eq!(sensor.remaining(), 3);
        assert!(sensor.read_six_samples().is_ok());
        assert!(sensor.read_six_samples().is_ok());
        assert!(matches!(sensor.read_six_samples(), Err(SensorError::Read(_))));
        assert!(sensor.is_exhausted());
        let idle = sensor.read_six_samples().unwrap();
        assert_eq!(idle, Script::new(Calibration::default()).rest_sample());
        assert_eq!(sensor.reads(), 4);
    }

    fn play(script: Script, config: GestureConfig) -> Vec<Combination> {
        let mut r = GestureRecognizer::new(config, Calibration::default(), 0);
        let mut sensor = script.into_sensor();
        let mut fired = vec![];
        let mut t = 0;
        while !sensor.is_exhausted() {
            let sample = sensor.read_six_samples().unwrap();
            let c = r.tick(&sample, t);
            if !c.is_none() {
                fired.push(r.take_combination());
            }
            t += 50;
        }
        fired
    }

    #[test]
    fn gesture_helpers_raise_their_combinations() {
        let script = Script::new(Calibration::default())
            .lrl()
            .rest(5)
            .lrl()
            .rlr()
            .up_down_up();
        assert_eq!(
            play(script, GestureConfig::default()),
            vec![Combination::Lrl, Combination::Lrl, Combination::Rlr, Combination::Dud]
        );
    }

    #[test]
    fn down_up_down_needs_opt_in() {
        let config = GestureConfig {
            dud_pattern: crate::config::DudPattern::DownUpDown,
            ..GestureConfig::default()
        };
        let script = Script::new(Calibration::default()).down_up_down().up_down_up();
        assert_eq!(play(script, config), vec![Combination::Dud, Combination::Udu]);
    }
}
