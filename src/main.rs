// RoundWatch — Firmware Entry Point
//
// Boot sequence:
//   1. Bring up the shared I2C bus and probe the QMI8658 (fatal if absent).
//   2. Initialise the GC9A01 panel over SPI and the battery ADC.
//   3. Enter the board loop: 20 Hz gesture ticks driving the menu and apps.
//
// The loop returns when "Off" is chosen from the menu; the panel is blanked
// and the main task idles.
//
// Built for a host, the same loop runs against a scripted sensor and a
// headless display.

use roundwatch::config::*;
use roundwatch::gesture::GestureRecognizer;
use roundwatch::tasks::board::BoardLoop;

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use std::sync::Mutex;
    use std::thread;
    use std::time::Duration;

    use esp_idf_hal::gpio::{AnyIOPin, OutputPin, PinDriver};
    use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
    use esp_idf_hal::prelude::*;
    use esp_idf_hal::spi::{config::Config as SpiConfig, SpiDeviceDriver, SpiDriver, SpiDriverConfig};

    use roundwatch::drivers::adc::AdcBattery;
    use roundwatch::drivers::imu::Qmi8658;
    use roundwatch::drivers::panel::Gc9a01;

    // Link esp-idf-sys runtime patches and initialise logging.
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    log::info!("RoundWatch firmware starting…");

    let peripherals = Peripherals::take()?;
    let pins = peripherals.pins;

    // ---- I2C bus (QMI8658) ------------------------------------------------
    let i2c_config = I2cConfig::new().baudrate(I2C_BAUDRATE_KHZ.kHz().into());
    let i2c = I2cDriver::new(peripherals.i2c0, pins.gpio6, pins.gpio7, &i2c_config)?;
    // The bus lives for the rest of the programme.
    let i2c_bus: &'static Mutex<I2cDriver<'static>> = Box::leak(Box::new(Mutex::new(i2c)));
    log::info!("I2C up on SDA {} / SCL {}", PIN_I2C_SDA, PIN_I2C_SCL);

    let imu = match Qmi8658::new(i2c_bus) {
        Ok(imu) => imu,
        Err(e) => {
            log::error!("IMU init failed: {}", e);
            return Err(e.into());
        }
    };
    let imu_revision = imu.revision();

    // ---- SPI panel (GC9A01) -----------------------------------------------
    let spi = SpiDriver::new(
        peripherals.spi2,
        pins.gpio10, // CLK
        pins.gpio11, // MOSI
        None::<AnyIOPin>,
        &SpiDriverConfig::new(),
    )?;
    let spi = SpiDeviceDriver::new(
        spi,
        Some(pins.gpio9), // CS
        &SpiConfig::new().baudrate(SPI_BAUDRATE_MHZ.MHz().into()),
    )?;
    let dc = PinDriver::output(pins.gpio8.downgrade_output())?;
    let rst = PinDriver::output(pins.gpio14.downgrade_output())?;
    let backlight = PinDriver::output(pins.gpio2.downgrade_output())?;

    log::info!(
        "LCD on DC {} / CS {} / CLK {} / MOSI {} / RST {} / BL {}",
        PIN_LCD_DC, PIN_LCD_CS, PIN_LCD_CLK, PIN_LCD_MOSI, PIN_LCD_RST, PIN_LCD_BL
    );

    let mut panel = Gc9a01::new(spi, dc, rst, backlight);
    panel.init()?;

    // ---- Battery ADC ------------------------------------------------------
    let battery = AdcBattery::new()?;
    log::info!("Battery sense on GPIO{}", PIN_BATTERY_ADC);

    // ---- Board loop -------------------------------------------------------
    let recognizer = GestureRecognizer::new(GestureConfig::default(), Calibration::default(), now_ms());
    let mut board = BoardLoop::new(imu, battery, panel, recognizer, imu_revision, now_ms());
    board.run(now_ms)?;

    log::info!("Halted");
    loop {
        thread::sleep(Duration::from_secs(60));
    }
}

// ---------------------------------------------------------------------------
// Utility: milliseconds since boot (wraps at ~49 days)
// ---------------------------------------------------------------------------
#[cfg(target_os = "espidf")]
fn now_ms() -> u32 {
    // SAFETY: esp_timer_get_time has no preconditions once the scheduler runs.
    unsafe { (esp_idf_sys::esp_timer_get_time() / 1000) as u32 }
}

// ---------------------------------------------------------------------------
// Host simulation
// ---------------------------------------------------------------------------

#[cfg(not(target_os = "espidf"))]
fn main() -> anyhow::Result<()> {
    use std::time::Instant;

    use roundwatch::display::HeadlessDisplay;
    use roundwatch::sim::{FixedBattery, Script};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("RoundWatch host simulation starting…");

    let calibration = Calibration::default();

    // Visit every app from the menu, then switch off.
    let tour = Script::new(calibration)
        .rest(10)
        .rlr() // Banner
        .rest(40)
        .lrl()
        .up_down_up() // selector → Dashboard
        .rlr()
        .rest(40)
        .lrl()
        .up_down_up() // → Ball game
        .rlr()
        .rest(40)
        .lrl()
        .up_down_up() // → Off
        .rlr();
    log::info!("Replaying {} scripted samples", tour.len());

    let recognizer = GestureRecognizer::new(GestureConfig::default(), calibration, 0);
    let mut board = BoardLoop::new(tour.into_sensor(), FixedBattery(3.9), HeadlessDisplay::new(), recognizer, 0, 0);

    let start = Instant::now();
    board.run(|| start.elapsed().as_millis() as u32)?;

    log::info!(
        "Simulation finished: {} ticks, {} frames presented",
        board.ticks(),
        board.display().presented()
    );
    Ok(())
}
