// RoundWatch — Board Loop
//
// Single-threaded cooperative loop. Each tick, in order:
//   read sample → recognizer tick → battery update → screen update → present
//
// The loop ends only when the menu selects "Off".

use std::thread;
use std::time::Duration;

use crate::battery::{BatteryMonitor, BatterySource, BatteryStatus};
use crate::config::{LOOP_IDLE_SLEEP_MS, TICK_INTERVAL_MS};
use crate::display::DisplaySink;
use crate::drivers::SensorSource;
use crate::error::SensorError;
use crate::gesture::GestureRecognizer;
use crate::screens::Screens;

// ---------------------------------------------------------------------------
// Time gate
// ---------------------------------------------------------------------------

/// Fires once `interval_ms` has elapsed since the last firing. Millisecond
/// timestamps wrap at `u32::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticker {
    interval_ms: u32,
    last_ms: u32,
}

impl Ticker {
    pub fn new(interval_ms: u32, now_ms: u32) -> Self {
        Self { interval_ms, last_ms: now_ms }
    }

    pub fn due(&mut self, now_ms: u32) -> bool {
        if now_ms.wrapping_sub(self.last_ms) >= self.interval_ms {
            self.last_ms = now_ms;
            true
        } else {
            false
        }
    }

    pub fn last_ms(&self) -> u32 {
        self.last_ms
    }
}

// ---------------------------------------------------------------------------
// Board loop
// ---------------------------------------------------------------------------

pub struct BoardLoop<S, B, D> {
    sensor: S,
    battery_source: B,
    display: D,
    recognizer: GestureRecognizer,
    monitor: BatteryMonitor,
    battery: BatteryStatus,
    screens: Screens,
    ticker: Ticker,
    imu_revision: u8,
    ticks: u32,
    halted: bool,
}

impl<S, B, D> BoardLoop<S, B, D>
where
    S: SensorSource,
    B: BatterySource,
    D: DisplaySink,
{
    pub fn new(
        sensor: S,
        battery_source: B,
        display: D,
        recognizer: GestureRecognizer,
        imu_revision: u8,
        now_ms: u32,
    ) -> Self {
        Self {
            sensor,
            battery_source,
            display,
            recognizer,
            monitor: BatteryMonitor::default(),
            battery: BatteryStatus::default(),
            screens: Screens::new(),
            ticker: Ticker::new(TICK_INTERVAL_MS, now_ms),
            imu_revision,
            ticks: 0,
            halted: false,
        }
    }

    /// Run one tick if the time gate is open.
    ///
    /// Returns `Ok(true)` when a tick ran. A failed sensor read aborts the
    /// tick and surfaces as [`SensorError::Read`] inside the error; nothing
    /// downstream of the read runs for that tick.
    pub fn poll(&mut self, now_ms: u32) -> anyhow::Result<bool> {
        if self.halted || !self.ticker.due(now_ms) {
            return Ok(false);
        }

        let sample = self.sensor.read_six_samples()?;
        self.recognizer.tick(&sample, now_ms);
        self.battery = self.monitor.poll(&mut self.battery_source);
        self.screens.update(&mut self.recognizer);
        self.ticks = self.ticks.wrapping_add(1);

        let scene = self.screens.scene(&self.recognizer, &self.battery, self.imu_revision);
        self.display.present(&scene)?;

        if self.screens.is_off() {
            log::info!("Off selected after {} ticks, halting", self.ticks);
            self.halted = true;
        }
        Ok(true)
    }

    /// Drive [`poll`](Self::poll) until the board halts.
    ///
    /// Sensor read failures are logged and skipped; any other error ends the
    /// loop.
    pub fn run(&mut self, mut clock: impl FnMut() -> u32) -> anyhow::Result<()> {
        log::info!("Board loop started ({} ms tick)", TICK_INTERVAL_MS);
        let idle = Duration::from_millis(LOOP_IDLE_SLEEP_MS);

        while !self.halted {
            if let Err(e) = self.poll(clock()) {
                match e.downcast_ref::<SensorError>() {
                    Some(SensorError::Read(_)) => log::warn!("{}", e),
                    _ => return Err(e),
                }
            }
            thread::sleep(idle);
        }
        Ok(())
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn recognizer(&self) -> &GestureRecognizer {
        &self.recognizer
    }

    pub fn screens(&self) -> &Screens {
        &self.screens
    }

    pub fn battery(&self) -> BatteryStatus {
        self.battery
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    pub fn display(&self) -> &D {
        &self.display
    }
}
