// RoundWatch — Sensor Data & Gesture Event Types

use core::fmt;

// ---------------------------------------------------------------------------
// Sensor Data (6-axis IMU reading from QMI8658)
// ---------------------------------------------------------------------------

/// One raw burst from the IMU, in sensor counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawSample {
    pub ax: i16,
    pub ay: i16,
    pub az: i16,
    pub gx: i16,
    pub gy: i16,
    pub gz: i16,
}

impl RawSample {
    pub const fn new(ax: i16, ay: i16, az: i16, gx: i16, gy: i16, gz: i16) -> Self {
        Self { ax, ay, az, gx, gy, gz }
    }
}

/// Integer triple, used for calibrated accel/gyro and momentum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Axes {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Axes {
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Accel in tenths of a g (y inverted), gyro in whole °/s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CalibratedReading {
    pub accel: Axes,
    pub gyro: Axes,
}

// ---------------------------------------------------------------------------
// Tilt State
// ---------------------------------------------------------------------------

/// Instantaneous orientation change, derived from a single gyro reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TiltState {
    #[default]
    Resting,
    TiltUp,
    TiltDown,
    TiltLeft,
    TiltRight,
    TwistLeft,
    TwistRight,
}

impl TiltState {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Resting    => "resting",
            Self::TiltUp     => "tilt up",
            Self::TiltDown   => "tilt down",
            Self::TiltLeft   => "tilt left",
            Self::TiltRight  => "tilt right",
            Self::TwistLeft  => "twist left",
            Self::TwistRight => "twist right",
        }
    }
}

impl fmt::Display for TiltState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Discrete directional command raised by a flick (a tilt followed by its
/// opposite).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Command {
    #[default]
    None,
    TiltUp,
    TiltDown,
    TiltLeft,
    TiltRight,
    TwistLeft,
    TwistRight,
}

impl Command {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::None       => "none",
            Self::TiltUp     => "tilt up",
            Self::TiltDown   => "tilt down",
            Self::TiltLeft   => "tilt left",
            Self::TiltRight  => "tilt right",
            Self::TwistLeft  => "twist left",
            Self::TwistRight => "twist right",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ---------------------------------------------------------------------------
// Combinations
// ---------------------------------------------------------------------------

/// A recognised three-command gesture. Transient: the consumer clears it
/// after reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Combination {
    #[default]
    None,
    /// twist left, twist right, twist left
    Lrl,
    /// twist right, twist left, twist right
    Rlr,
    /// tilt up, tilt down, tilt up
    Udu,
    Dud,
}

impl Combination {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Lrl  => "LRL",
            Self::Rlr  => "RLR",
            Self::Udu  => "UDU",
            Self::Dud  => "DUD",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
