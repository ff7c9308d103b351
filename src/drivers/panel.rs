// RoundWatch — GC9A01 Panel Driver
//
// Renders scenes into a RAM frame buffer and streams it to the round LCD
// over SPI, one row per transfer.

use std::thread;
use std::time::Duration;

use esp_idf_hal::gpio::{AnyOutputPin, Output, PinDriver};
use esp_idf_hal::spi::{SpiDeviceDriver, SpiDriver};

use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::display::{render, DisplaySink, FrameBuffer, Scene};

// MIPI DCS commands understood by the GC9A01
const CMD_SLEEP_OUT: u8 = 0x11;
const CMD_INVERSION_ON: u8 = 0x21;
const CMD_DISPLAY_ON: u8 = 0x29;
const CMD_COLUMN_ADDR: u8 = 0x2A;
const CMD_ROW_ADDR: u8 = 0x2B;
const CMD_MEMORY_WRITE: u8 = 0x2C;
const CMD_MADCTL: u8 = 0x36;
const CMD_PIXEL_FORMAT: u8 = 0x3A;
const CMD_INTER_ENABLE_1: u8 = 0xFE;
const CMD_INTER_ENABLE_2: u8 = 0xEF;

type OutPin = PinDriver<'static, AnyOutputPin, Output>;

pub struct Gc9a01 {
    spi: SpiDeviceDriver<'static, SpiDriver<'static>>,
    dc: OutPin,
    rst: OutPin,
    backlight: OutPin,
    frame: FrameBuffer,
    row: Vec<u8>,
}

impl Gc9a01 {
    pub fn new(
        spi: SpiDeviceDriver<'static, SpiDriver<'static>>,
        dc: OutPin,
        rst: OutPin,
        backlight: OutPin,
    ) -> Self {
        Self {
            spi,
            dc,
            rst,
            backlight,
            frame: FrameBuffer::new(),
            row: Vec::with_capacity(SCREEN_WIDTH as usize * 2),
        }
    }

    /// Hardware reset, minimal init sequence, backlight on.
    pub fn init(&mut self) -> anyhow::Result<()> {
        self.rst.set_high()?;
        thread::sleep(Duration::from_millis(5));
        self.rst.set_low()?;
        thread::sleep(Duration::from_millis(10));
        self.rst.set_high()?;
        thread::sleep(Duration::from_millis(120));

        self.command(CMD_INTER_ENABLE_2, &[])?;
        self.command(CMD_INTER_ENABLE_1, &[])?;
        self.command(CMD_MADCTL, &[0x48])?;
        self.command(CMD_PIXEL_FORMAT, &[0x05])?; // 16 bpp
        self.command(CMD_INVERSION_ON, &[])?;
        self.command(CMD_SLEEP_OUT, &[])?;
        thread::sleep(Duration::from_millis(120));
        self.command(CMD_DISPLAY_ON, &[])?;
        thread::sleep(Duration::from_millis(20));

        self.backlight.set_high()?;
        log::info!("GC9A01 initialised ({}x{})", SCREEN_WIDTH, SCREEN_HEIGHT);
        Ok(())
    }

    pub fn backlight(&mut self, on: bool) -> anyhow::Result<()> {
        if on {
            self.backlight.set_high()?;
        } else {
            self.backlight.set_low()?;
        }
        Ok(())
    }

    fn command(&mut self, cmd: u8, data: &[u8]) -> anyhow::Result<()> {
        self.dc.set_low()?;
        self.spi.write(&[cmd])?;
        if !data.is_empty() {
            self.dc.set_high()?;
            self.spi.write(data)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        let [x_hi, x_lo] = ((SCREEN_WIDTH - 1) as u16).to_be_bytes();
        let [y_hi, y_lo] = ((SCREEN_HEIGHT - 1) as u16).to_be_bytes();
        self.command(CMD_COLUMN_ADDR, &[0, 0, x_hi, x_lo])?;
        self.command(CMD_ROW_ADDR, &[0, 0, y_hi, y_lo])?;
        self.command(CMD_MEMORY_WRITE, &[])?;

        self.dc.set_high()?;
        for y in 0..SCREEN_HEIGHT {
            self.frame.row_bytes(y, &mut self.row);
            self.spi.write(&self.row)?;
        }
        Ok(())
    }
}

impl DisplaySink for Gc9a01 {
    fn present(&mut self, scene: &Scene) -> anyhow::Result<()> {
        render(scene, &mut self.frame).unwrap_or_else(|never| match never {});
        if matches!(scene, Scene::Off) {
            self.backlight(false)?;
        }
        self.flush()
    }
}
