// RoundWatch — Battery ADC Reader
//
// One-shot ADC read of the battery divider via raw ESP-IDF calls.
// GPIO1 / ADC1_CHANNEL_0 with 11 dB attenuation (0–3.3 V range).

use esp_idf_sys::{self as sys, esp};

use crate::battery::{adc_to_voltage, BatterySource};

pub struct AdcBattery {
    handle: sys::adc_oneshot_unit_handle_t,
    channel: sys::adc_channel_t,
    last_voltage: f32,
}

impl AdcBattery {
    pub fn new() -> anyhow::Result<Self> {
        let mut handle: sys::adc_oneshot_unit_handle_t = core::ptr::null_mut();
        let channel = sys::adc_channel_t_ADC_CHANNEL_0;

        // SAFETY: plain FFI calls on locally owned config structs; the handle
        // is only used from the board loop thread.
        unsafe {
            let unit_cfg = sys::adc_oneshot_unit_init_cfg_t {
                unit_id: sys::adc_unit_t_ADC_UNIT_1,
                ulp_mode: sys::adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
                ..core::mem::zeroed()
            };
            esp!(sys::adc_oneshot_new_unit(&unit_cfg, &mut handle))?;

            let chan_cfg = sys::adc_oneshot_chan_cfg_t {
                atten: sys::adc_atten_t_ADC_ATTEN_DB_11,
                bitwidth: sys::adc_bitwidth_t_ADC_BITWIDTH_12,
            };
            esp!(sys::adc_oneshot_config_channel(handle, channel, &chan_cfg))?;
        }

        log::info!("Battery ADC ready (ADC1 ch{})", channel);
        Ok(Self { handle, channel, last_voltage: 0.0 })
    }
}

impl BatterySource for AdcBattery {
    /// Falls back to the previous reading if the conversion fails.
    fn read_voltage(&mut self) -> f32 {
        let mut raw: i32 = 0;
        // SAFETY: handle and channel were configured in `new`.
        let ret = unsafe { sys::adc_oneshot_read(self.handle, self.channel, &mut raw) };
        if ret == sys::ESP_OK {
            self.last_voltage = adc_to_voltage(raw.clamp(0, i32::from(u16::MAX)) as u16);
        } else {
            log::warn!("Battery ADC read failed ({})", ret);
        }
        self.last_voltage
    }
}
