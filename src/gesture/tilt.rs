// RoundWatch — Tilt Classifier

use crate::events::{Axes, TiltState};

/// Per-axis direction labels for one gyro reading. An axis with zero rate
/// reads as `Resting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisLabels {
    pub x: TiltState,
    pub y: TiltState,
    pub twist: TiltState,
}

impl AxisLabels {
    pub fn from_gyro(gyro: Axes) -> Self {
        Self {
            x: by_sign(gyro.x, TiltState::TiltRight, TiltState::TiltLeft),
            y: by_sign(gyro.y, TiltState::TiltUp, TiltState::TiltDown),
            // Positive z is a counter-clockwise (left) twist.
            twist: by_sign(gyro.z, TiltState::TwistLeft, TiltState::TwistRight),
        }
    }
}

fn by_sign(rate: i32, positive: TiltState, negative: TiltState) -> TiltState {
    match rate.signum() {
        1 => positive,
        -1 => negative,
        _ => TiltState::Resting,
    }
}

/// Classify a calibrated gyro reading by its strictly dominant axis.
///
/// Any tie for the largest magnitude (including all-zero) is `Resting`.
pub fn classify(gyro: Axes) -> TiltState {
    let labels = AxisLabels::from_gyro(gyro);
    let (mx, my, mz) = (gyro.x.unsigned_abs(), gyro.y.unsigned_abs(), gyro.z.unsigned_abs());

    if mx > my && mx > mz {
        labels.x
    } else if my > mx && my > mz {
        labels.y
    } else if mz > mx && mz > my {
        labels.twist
    } else {
        TiltState::Resting
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dominant_axis_wins() {
        assert_eq!(classify(Axes::new(30, 5, -2)), TiltState::TiltRight);
        assert_eq!(classify(Axes::new(-30, 5, -2)), TiltState::TiltLeft);
        assert_eq!(classify(Axes::new(1, 9, 0)), TiltState::TiltUp);
        assert_eq!(classify(Axes::new(1, -9, 0)), TiltState::TiltDown);
    }

    #[test]
    fn z_sign_mapping_is_reversed() {
        assert_eq!(classify(Axes::new(0, 0, 12)), TiltState::TwistLeft);
        assert_eq!(classify(Axes::new(0, 0, -12)), TiltState::TwistRight);
    }

    #[test]
    fn ties_resolve_to_resting() {
        assert_eq!(classify(Axes::ZERO), TiltState::Resting);
        assert_eq!(classify(Axes::new(7, -7, 1)), TiltState::Resting);
        assert_eq!(classify(Axes::new(3, 0, -3)), TiltState::Resting);
        assert_eq!(classify(Axes::new(-4, -4, -4)), TiltState::Resting);
    }

    #[test]
    fn resting_iff_no_strict_dominant_axis() {
        for x in -6i32..=6 {
            for y in -6i32..=6 {
                for z in -6i32..=6 {
                    let (ax, ay, az) = (x.abs(), y.abs(), z.abs());
                    let dominant = (ax > ay && ax > az) || (ay > ax && ay > az) || (az > ax && az > ay);
                    let state = classify(Axes::new(x, y, z));
                    assert_eq!(state == TiltState::Resting, !dominant, "gyro ({x}, {y}, {z})");
                }
            }
        }
    }

    #[test]
    fn extreme_magnitudes_compare_without_overflow() {
        assert_eq!(classify(Axes::new(i32::MIN, i32::MAX, 0)), TiltState::TiltLeft);
    }
}
