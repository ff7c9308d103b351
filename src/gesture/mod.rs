// RoundWatch — Gesture Recognizer
//
// Per tick, strictly in this order:
//   raw sample → calibration → momentum → tilt state → tilt history
//   → flick command → command history → combination
//
// All state lives in `GestureRecognizer`; `tick` takes the current time so
// the pipeline can be driven by the board loop or a test harness alike.

pub mod calibration;
pub mod combination;
pub mod command;
pub mod history;
pub mod momentum;
pub mod tilt;

use crate::config::{Calibration, GestureConfig};
use crate::events::{CalibratedReading, Combination, Command, RawSample, TiltState};

use self::history::{EdgeHistory, Stamped};
use self::momentum::Momentum;

pub struct GestureRecognizer {
    config: GestureConfig,
    calibration: Calibration,
    reading: CalibratedReading,
    momentum: Momentum,
    tilt_state: TiltState,
    tilt_history: EdgeHistory<TiltState>,
    current_command: Stamped<Command>,
    command_history: EdgeHistory<Command>,
    combination: Combination,
}

impl GestureRecognizer {
    pub fn new(config: GestureConfig, calibration: Calibration, now_ms: u32) -> Self {
        Self {
            config,
            calibration,
            reading: CalibratedReading::default(),
            momentum: Momentum::new(config.momentum_max),
            tilt_state: TiltState::Resting,
            tilt_history: EdgeHistory::filled(TiltState::Resting, now_ms),
            current_command: Stamped::new(Command::None, now_ms),
            command_history: EdgeHistory::filled(Command::None, now_ms),
            combination: Combination::None,
        }
    }

    /// Run one pipeline pass over `raw`.
    ///
    /// Returns the combination raised by *this* tick, if any. A raised
    /// combination is also latched in [`combination`](Self::combination)
    /// until the consumer calls [`take_combination`](Self::take_combination).
    pub fn tick(&mut self, raw: &RawSample, now_ms: u32) -> Combination {
        self.reading = calibration::calibrate(raw, &self.calibration);
        self.momentum.update(self.reading.accel);

        self.tilt_state = tilt::classify(self.reading.gyro);
        if self.tilt_history.push_if_changed(self.tilt_state, now_ms) {
            log::trace!("tilt → {}", self.tilt_state);
        }

        let cmd = command::from_history(&self.tilt_history);
        if !cmd.is_none() && cmd != self.current_command.value {
            self.current_command = Stamped::new(cmd, now_ms);
            self.command_history.push(cmd, now_ms);
            log::debug!("command: {}", cmd);
        }

        let fired = combination::detect(&self.command_history, now_ms, &self.config);
        if !fired.is_none() {
            log::info!("combination: {}", fired);
            self.combination = fired;
            self.command_history.reset(Command::None, now_ms);
        }
        fired
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn reading(&self) -> CalibratedReading {
        self.reading
    }

    pub fn momentum(&self) -> &Momentum {
        &self.momentum
    }

    /// Consumers zero momentum on collisions.
    pub fn momentum_mut(&mut self) -> &mut Momentum {
        &mut self.momentum
    }

    pub fn tilt_state(&self) -> TiltState {
        self.tilt_state
    }

    pub fn tilt_history(&self) -> &EdgeHistory<TiltState> {
        &self.tilt_history
    }

    /// Most recently accepted command. Not cleared when a combination
    /// resets the command history.
    pub fn current_command(&self) -> Stamped<Command> {
        self.current_command
    }

    pub fn command_history(&self) -> &EdgeHistory<Command> {
        &self.command_history
    }

    /// The latched combination, without clearing it.
    pub fn combination(&self) -> Combination {
        self.combination
    }

    /// Read and clear the latched combination.
    pub fn take_combination(&mut self) -> Combination {
        core::mem::take(&mut self.combination)
    }
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(GestureConfig::default(), Calibration::default(), 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Axes;

    // Zero biases so raw gyro counts map straight to °/s (×64).
    fn unbiased() -> GestureRecognizer {
        let cal = Calibration {
            accel_bias: [0.0; 3],
            gyro_bias: [0.0; 3],
            ..Calibration::default()
        };
        GestureRecognizer::new(GestureConfig::default(), cal, 0)
    }

    fn gyro(x: i16, y: i16, z: i16) -> RawSample {
        RawSample::new(0, 0, 0, x * 64, y * 64, z * 64)
    }

    const REST: RawSample = RawSample::new(0, 0, 0, 0, 0, 0);

    fn twist_left() -> RawSample {
        gyro(0, 0, 40)
    }

    fn twist_right() -> RawSample {
        gyro(0, 0, -40)
    }

    /// Feed a flick (state, opposite, rest) one tick each starting at `t`.
    fn flick(r: &mut GestureRecognizer, first: RawSample, second: RawSample, t: u32) -> Combination {
        let mut out = Combination::None;
        for (i, s) in [first, second, REST].iter().enumerate() {
            let c = r.tick(s, t + i as u32 * 50);
            if !c.is_none() {
                out = c;
            }
        }
        out
    }

    #[test]
    fn tilt_history_records_edges_only() {
        let mut r = unbiased();
        for t in 0..10 {
            r.tick(&gyro(20, 0, 0), t * 10);
        }
        assert_eq!(r.tilt_state(), TiltState::TiltRight);
        assert_eq!(
            r.tilt_history().values(),
            [TiltState::Resting, TiltState::Resting, TiltState::TiltRight]
        );
        assert_eq!(r.tilt_history().newest().at_ms, 0);
    }

    #[test]
    fn tilt_state_flickers_with_jitter() {
        let mut r = unbiased();
        r.tick(&gyro(20, 0, 0), 0);
        r.tick(&gyro(0, 20, 0), 10);
        r.tick(&gyro(20, 0, 0), 20);
        assert_eq!(r.tilt_state(), TiltState::TiltRight);
        assert_eq!(
            r.tilt_history().values(),
            [TiltState::TiltRight, TiltState::TiltUp, TiltState::TiltRight]
        );
        assert_eq!(r.current_command().value, Command::None);
    }

    #[test]
    fn flick_raises_command_once() {
        let mut r = unbiased();
        flick(&mut r, gyro(-30, 0, 0), gyro(30, 0, 0), 0);
        assert_eq!(r.current_command().value, Command::TiltLeft);
        assert_eq!(r.command_history().newest().value, Command::TiltLeft);

        // Holding still keeps re-deriving the same command; it is not re-pushed.
        for t in 0..20 {
            r.tick(&REST, 200 + t * 50);
        }
        assert_eq!(
            r.command_history().values(),
            [Command::None, Command::None, Command::TiltLeft]
        );
    }

    #[test]
    fn lrl_fires_once_and_clears_history() {
        let mut r = unbiased();
        let mut t = 1_000;
        assert!(flick(&mut r, twist_left(), twist_right(), t).is_none());
        t += 150;
        assert!(flick(&mut r, twist_right(), twist_left(), t).is_none());
        t += 150;
        let fired = flick(&mut r, twist_left(), twist_right(), t);
        assert_eq!(fired, Combination::Lrl);
        assert_eq!(r.combination(), Combination::Lrl);
        assert_eq!(r.command_history().values(), [Command::None; 3]);

        // Next tick without new commands: nothing new fires.
        assert!(r.tick(&REST, t + 200).is_none());
        assert_eq!(r.take_combination(), Combination::Lrl);
        assert!(r.combination().is_none());
        assert!(r.tick(&REST, t + 250).is_none());
    }

    #[test]
    fn latched_combination_persists_until_taken() {
        let mut r = unbiased();
        flick(&mut r, twist_left(), twist_right(), 0);
        flick(&mut r, twist_right(), twist_left(), 150);
        flick(&mut r, twist_left(), twist_right(), 300);
        for t in 0..5 {
            r.tick(&REST, 500 + t * 50);
            assert_eq!(r.combination(), Combination::Lrl);
        }
    }

    #[test]
    fn slow_gesture_never_fires() {
        let mut r = unbiased();
        flick(&mut r, twist_left(), twist_right(), 0);
        flick(&mut r, twist_right(), twist_left(), 2_500);
        let fired = flick(&mut r, twist_left(), twist_right(), 2_800);
        assert!(fired.is_none());
        assert!(r.combination().is_none());
    }

    #[test]
    fn momentum_follows_calibrated_accel() {
        let mut r = GestureRecognizer::default();
        // Default bias puts z at +11 (1.11 g) on a zero sample.
        r.tick(&REST, 0);
        assert_eq!(r.reading().accel, Axes::new(0, 0, 11));
        assert_eq!(r.momentum().value(), Axes::new(0, 0, 10));
        r.momentum_mut().reset();
        assert_eq!(r.momentum().value(), Axes::ZERO);
    }

    #[test]
    fn histories_never_repeat_consecutive_edges() {
        let mut r = unbiased();
        let samples = [
            gyro(10, 0, 0),
            gyro(-10, 0, 0),
            gyro(0, 10, 0),
            gyro(0, 0, 10),
            gyro(0, 0, -10),
            gyro(5, 5, 0),
            gyro(0, -10, 0),
            gyro(0, 10, 0),
        ];
        let mut seed: u32 = 7;
        let mut pushed_tilts = vec![];
        let mut pushed_cmds = vec![];
        for t in 0..2_000u32 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let sample = samples[(seed >> 16) as usize % samples.len()];
            let before_tilt = r.tilt_history().newest();
            let before_cmd = r.current_command();
            r.tick(&sample, t * 20);
            if r.tilt_history().newest() != before_tilt {
                pushed_tilts.push(r.tilt_history().newest().value);
            }
            if r.current_command() != before_cmd {
                pushed_cmds.push(r.current_command().value);
            }
        }
        assert!(pushed_tilts.len() > 10);
        assert!(pushed_tilts.windows(2).all(|w| w[0] != w[1]));
        assert!(pushed_tilts[0] != TiltState::Resting);
        assert!(pushed_cmds.windows(2).all(|w| w[0] != w[1]));
        assert!(pushed_cmds.iter().all(|c| !c.is_none()));
    }
}
