// RoundWatch — Momentum Tracker
//
// Integrates calibrated acceleration into a clamped, velocity-like value per
// axis. There is no decay: momentum only changes by accumulation or when a
// consumer resets it (e.g. the ball game on a wall hit).

use crate::events::Axes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Momentum {
    value: Axes,
    max: i32,
}

impl Momentum {
    /// `max` is taken as a magnitude; a negative bound is treated as its
    /// absolute value.
    pub fn new(max: i32) -> Self {
        Self {
            value: Axes::ZERO,
            max: max.saturating_abs(),
        }
    }

    pub fn value(&self) -> Axes {
        self.value
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// Add `accel` to every axis, then clamp each to `[-max, max]`.
    pub fn update(&mut self, accel: Axes) {
        let max = self.max;
        let step = |current: i32, delta: i32| current.saturating_add(delta).clamp(-max, max);
        self.value = Axes::new(
            step(self.value.x, accel.x),
            step(self.value.y, accel.y),
            step(self.value.z, accel.z),
        );
    }

    /// Zero the planar axes only.
    pub fn reset_planar(&mut self) {
        self.value.x = 0;
        self.value.y = 0;
    }

    pub fn reset(&mut self) {
        self.value = Axes::ZERO;
    }
}

impl Default for Momentum {
    fn default() -> Self {
        Self::new(crate::config::MOMENTUM_MAX)
    }
}
