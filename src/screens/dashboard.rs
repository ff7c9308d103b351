// RoundWatch — Sensor Dashboard
//
// Live readout of calibrated accel/gyro, momentum, tilt state, the last
// command and battery status, under a scrolling title.

use crate::battery::BatteryStatus;
use crate::display::{DashboardScene, Scene};
use crate::gesture::GestureRecognizer;

const TITLE_START_X: i32 = 60;
const TITLE_WRAP_BELOW: i32 = -100;
const TITLE_REENTER_X: i32 = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    title_x: i32,
}

impl Dashboard {
    pub fn new() -> Self {
        Self { title_x: TITLE_START_X }
    }

    pub fn title_x(&self) -> i32 {
        self.title_x
    }

    /// Returns `true` when the user asked to leave.
    pub fn update(&mut self, recognizer: &mut GestureRecognizer) -> bool {
        if self.title_x < TITLE_WRAP_BELOW {
            self.title_x = TITLE_REENTER_X;
        } else {
            self.title_x -= 1;
        }
        super::exit_requested(recognizer)
    }

    pub fn scene(&self, recognizer: &GestureRecognizer, battery: &BatteryStatus, imu_revision: u8) -> Scene {
        Scene::Dashboard(DashboardScene {
            title_x: self.title_x,
            battery_label: battery.label(),
            voltage: battery.voltage,
            imu_revision,
            reading: recognizer.reading(),
            momentum: recognizer.momentum().value(),
            tilt: recognizer.tilt_state(),
            command: recognizer.current_command().value,
        })
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}
