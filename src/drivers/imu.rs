// RoundWatch — QMI8658 IMU Driver
//
// Register-level driver over a shared I2C bus. Every transaction holds the
// bus mutex only for its own duration; the guard releases it on every exit
// path, including errors.

use std::sync::Mutex;

use embedded_hal::i2c::I2c;

use crate::config::*;
use crate::error::SensorError;
use crate::events::RawSample;

use super::SensorSource;

// QMI8658 register addresses
const REG_WHO_AM_I: u8 = 0x00;
const REG_REVISION: u8 = 0x01;
const REG_CTRL1: u8 = 0x02;
const REG_ACC_START: u8 = 0x35; // AX_L .. GZ_H, 12 bytes
const WHO_AM_I_EXPECTED: u8 = 0x05;

/// CTRL1..CTRL7, written in order starting at `REG_CTRL1`.
const CONFIG_SEQUENCE: [u8; 7] = [
    0x60, // CTRL1: serial interface, register address auto-increment
    0x23, // CTRL2: accel ±8 g, 1 kHz ODR
    0x53, // CTRL3: gyro ±512 dps, 1 kHz ODR
    0x00, // CTRL4: magnetometer off
    0x11, // CTRL5: accel + gyro low-pass filters on
    0x00, // CTRL6: motion-on-demand off
    0x03, // CTRL7: accel + gyro enabled
];

pub struct Qmi8658<'a, I2C> {
    bus: &'a Mutex<I2C>,
    address: u8,
    revision: u8,
}

impl<'a, I2C: I2c> Qmi8658<'a, I2C> {
    /// Probe and configure the sensor at the default address.
    ///
    /// Fails with [`SensorError::NoResponse`] if the identity read is not
    /// acknowledged, and with [`SensorError::DeviceNotFound`] if it reads
    /// back something other than the QMI8658 id.
    pub fn new(bus: &'a Mutex<I2C>) -> Result<Self, SensorError> {
        Self::with_address(bus, I2C_ADDR_QMI8658)
    }

    pub fn with_address(bus: &'a Mutex<I2C>, address: u8) -> Result<Self, SensorError> {
        let mut imu = Self { bus, address, revision: 0 };

        let who = imu.read_reg(REG_WHO_AM_I).map_err(|reason| {
            log::error!("QMI8658 did not answer at {:#04x}", address);
            SensorError::NoResponse { address, reason }
        })?;
        if who != WHO_AM_I_EXPECTED {
            log::error!("QMI8658 identity check failed (read {:#04x})", who);
            return Err(SensorError::DeviceNotFound { found: who });
        }
        imu.revision = imu.read_reg(REG_REVISION).map_err(SensorError::Config)?;
        imu.apply_config()?;

        log::info!("QMI8658 rev {} initialised (±8g, ±512°/s, 1 kHz)", imu.revision);
        Ok(imu)
    }

    pub fn revision(&self) -> u8 {
        self.revision
    }

    fn apply_config(&mut self) -> Result<(), SensorError> {
        for (offset, value) in CONFIG_SEQUENCE.iter().enumerate() {
            let reg = REG_CTRL1 + offset as u8;
            self.transact(|i2c, addr| i2c.write(addr, &[reg, *value]))
                .map_err(SensorError::Config)?;
        }
        Ok(())
    }

    fn read_reg(&mut self, reg: u8) -> Result<u8, String> {
        let mut buf = [0u8; 1];
        self.transact(|i2c, addr| i2c.write_read(addr, &[reg], &mut buf))?;
        Ok(buf[0])
    }

    /// Run one bus transaction with the bus locked.
    fn transact<F>(&self, f: F) -> Result<(), String>
    where
        F: FnOnce(&mut I2C, u8) -> Result<(), I2C::Error>,
    {
        let mut bus = self.bus.lock().map_err(|_| "I2C bus lock poisoned".to_string())?;
        f(&mut *bus, self.address).map_err(|e| format!("{:?}", e))
    }
}

impl<I2C: I2c> SensorSource for Qmi8658<'_, I2C> {
    fn read_six_samples(&mut self) -> Result<RawSample, SensorError> {
        let mut raw = [0u8; 12];
        self.transact(|i2c, addr| i2c.write_read(addr, &[REG_ACC_START], &mut raw))
            .map_err(SensorError::Read)?;

        let word = |i: usize| i16::from_le_bytes([raw[i], raw[i + 1]]);
        Ok(RawSample::new(word(0), word(2), word(4), word(6), word(8), word(10)))
    }
}
