// RoundWatch — Sample Calibration
//
// Converts raw QMI8658 counts into the integer units the rest of the gesture
// pipeline works in: accel in tenths of a g, gyro in whole °/s.

use crate::config::Calibration;
use crate::events::{Axes, CalibratedReading, RawSample};

/// Apply axis remap, bias offsets and fixed-point scaling to one sample.
///
/// The board mounts the IMU rotated, so sensor Y becomes accel X and sensor
/// X becomes accel Y. Accel Y is also sign-flipped so that tilting the top
/// edge away from the user reads positive. Values are truncated toward zero.
pub fn calibrate(raw: &RawSample, cal: &Calibration) -> CalibratedReading {
    let ax = f32::from(raw.ay) / cal.accel_lsb_per_g + cal.accel_bias[0];
    let ay = f32::from(raw.ax) / cal.accel_lsb_per_g + cal.accel_bias[1];
    let az = f32::from(raw.az) / cal.accel_lsb_per_g + cal.accel_bias[2];

    let gx = f32::from(raw.gx) / cal.gyro_lsb_per_dps + cal.gyro_bias[0];
    let gy = f32::from(raw.gy) / cal.gyro_lsb_per_dps + cal.gyro_bias[1];
    let gz = f32::from(raw.gz) / cal.gyro_lsb_per_dps + cal.gyro_bias[2];

    CalibratedReading {
        accel: Axes::new((ax * 10.0) as i32, (ay * -10.0) as i32, (az * 10.0) as i32),
        gyro: Axes::new(gx as i32, gy as i32, gz as i32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resting_sample_only_carries_bias() {
        let reading = calibrate(&RawSample::default(), &Calibration::default());
        // 0.1 → 0, -0.4 → 0, 11.1 → 11
        assert_eq!(reading.accel, Axes::new(0, 0, 11));
        // -5.58 → -5, 45.55 → 45, -0.20 → 0
        assert_eq!(reading.gyro, Axes::new(-5, 45, 0));
    }

    #[test]
    fn accel_axes_are_swapped_and_y_inverted() {
        let raw = RawSample::new(-4096, 4096, 0, 0, 0, 0);
        let reading = calibrate(&raw, &Calibration::default());
        // sensor ay = +1 g lands on x: (1.0 + 0.01) * 10
        assert_eq!(reading.accel.x, 10);
        // sensor ax = -1 g lands on y: (-1.0 + 0.04) * -10
        assert_eq!(reading.accel.y, 9);
    }

    #[test]
    fn gyro_truncates_toward_zero() {
        let cal = Calibration {
            gyro_bias: [0.0; 3],
            ..Calibration::default()
        };
        // 100 / 64 = 1.56, -100 / 64 = -1.56
        let reading = calibrate(&RawSample::new(0, 0, 0, 100, -100, 32), &cal);
        assert_eq!(reading.gyro, Axes::new(1, -1, 0));
    }

    #[test]
    fn extremes_do_not_overflow() {
        let cal = Calibration::default();
        let hi = calibrate(&RawSample::new(i16::MAX, i16::MAX, i16::MAX, i16::MAX, i16::MAX, i16::MAX), &cal);
        let lo = calibrate(&RawSample::new(i16::MIN, i16::MIN, i16::MIN, i16::MIN, i16::MIN, i16::MIN), &cal);
        assert_eq!(hi.gyro.x, 506);
        assert_eq!(lo.gyro.x, -517);
        assert!(hi.accel.x > 0 && lo.accel.x < 0);
    }

    #[test]
    fn calibration_is_deterministic() {
        let cal = Calibration::default();
        for raw in [
            RawSample::new(12, -400, 4100, 300, -7, 1),
            RawSample::new(-32767, 32767, 0, -1, 1, -32767),
        ] {
            assert_eq!(calibrate(&raw, &cal), calibrate(&raw, &cal));
        }
    }
}
