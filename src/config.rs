// RoundWatch — Hardware & System Configuration
// Target: ESP32-S3 1.28" round LCD board (GC9A01 240x240, QMI8658 6-axis IMU)

// ---------------------------------------------------------------------------
// GPIO Pin Definitions
// ---------------------------------------------------------------------------
pub const PIN_I2C_SDA: i32 = 6;      // IMU data line
pub const PIN_I2C_SCL: i32 = 7;      // IMU clock line
pub const PIN_LCD_DC: i32 = 8;       // Data/command select
pub const PIN_LCD_CS: i32 = 9;       // Chip select
pub const PIN_LCD_CLK: i32 = 10;     // SPI clock
pub const PIN_LCD_MOSI: i32 = 11;    // SPI data
pub const PIN_LCD_RST: i32 = 14;     // Panel reset
pub const PIN_LCD_BL: i32 = 2;       // Backlight enable
pub const PIN_BATTERY_ADC: u32 = 1;  // Battery voltage (ADC1 ch0, 1:2 divider)

// ---------------------------------------------------------------------------
// I2C Bus
// ---------------------------------------------------------------------------
pub const I2C_ADDR_QMI8658: u8 = 0x6B;
pub const I2C_BAUDRATE_KHZ: u32 = 400;

// ---------------------------------------------------------------------------
// Display (GC9A01 round LCD)
// ---------------------------------------------------------------------------
pub const SCREEN_WIDTH: u32 = 240;
pub const SCREEN_HEIGHT: u32 = 240;
pub const SPI_BAUDRATE_MHZ: u32 = 40;

// ---------------------------------------------------------------------------
// Timing (milliseconds)
// ---------------------------------------------------------------------------
pub const TICK_INTERVAL_MS: u32 = 50;            // 20 Hz poll / refresh
pub const COMBINATION_WINDOW_MS: u32 = 2_000;    // LRL/RLR/UDU/DUD window
pub const LOOP_IDLE_SLEEP_MS: u64 = 5;           // Bounds the busy-wait between ticks

// ---------------------------------------------------------------------------
// Gesture Recognition
// ---------------------------------------------------------------------------
pub const MOMENTUM_MAX: i32 = 10;
pub const HISTORY_LEN: usize = 3;

// ---------------------------------------------------------------------------
// QMI8658 Sensor Scale Factors
// ---------------------------------------------------------------------------
pub const ACCEL_LSB_PER_G: f32 = 4096.0;   // ±8 g
pub const GYRO_LSB_PER_DPS: f32 = 64.0;    // ±512 °/s

// ---------------------------------------------------------------------------
// Manual bias calibration (measured on a resting board, not derived)
// ---------------------------------------------------------------------------
pub const ACCEL_BIAS_X: f32 = 0.01;
pub const ACCEL_BIAS_Y: f32 = 0.04;
pub const ACCEL_BIAS_Z: f32 = 1.11;
pub const GYRO_BIAS_X: f32 = -5.58;
pub const GYRO_BIAS_Y: f32 = 45.55;
pub const GYRO_BIAS_Z: f32 = -0.20;

// ---------------------------------------------------------------------------
// Battery (LiPo)
// ---------------------------------------------------------------------------
pub const BATTERY_MIN_VOLTAGE: f32 = 3.4;
pub const BATTERY_MAX_VOLTAGE: f32 = 4.14;
pub const ADC_FULL_SCALE: f32 = 4095.0;    // 12-bit
pub const ADC_REF_VOLTAGE: f32 = 3.3;
pub const BATTERY_DIVIDER: f32 = 2.0;

/// Tunables for the gesture pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    /// Momentum is clamped to `[-momentum_max, momentum_max]` on every axis.
    pub momentum_max: i32,
    /// A combination must start less than this many ms before it completes.
    pub combination_window_ms: u32,
    pub dud_pattern: DudPattern,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            momentum_max: MOMENTUM_MAX,
            combination_window_ms: COMBINATION_WINDOW_MS,
            dud_pattern: DudPattern::AsObserved,
        }
    }
}

/// Which command sequence raises the `DUD` combination.
///
/// The board firmware this was built against matches DUD on
/// tilt-up/tilt-down/tilt-up, the same sequence as UDU, and since DUD is
/// checked last it wins. `AsObserved` keeps that behaviour; `DownUpDown`
/// selects the mirrored sequence instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DudPattern {
    #[default]
    AsObserved,
    DownUpDown,
}

/// Per-axis bias offsets and LSB divisors applied to raw samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    pub accel_bias: [f32; 3],
    pub gyro_bias: [f32; 3],
    pub accel_lsb_per_g: f32,
    pub gyro_lsb_per_dps: f32,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            accel_bias: [ACCEL_BIAS_X, ACCEL_BIAS_Y, ACCEL_BIAS_Z],
            gyro_bias: [GYRO_BIAS_X, GYRO_BIAS_Y, GYRO_BIAS_Z],
            accel_lsb_per_g: ACCEL_LSB_PER_G,
            gyro_lsb_per_dps: GYRO_LSB_PER_DPS,
        }
    }
}
