// RoundWatch — Battery Status
//
// Linear LiPo voltage → percentage map, recomputed from a fresh ADC read on
// every tick. No smoothing and no history.

use crate::config::*;

/// Source of the battery voltage, in volts. Always succeeds.
pub trait BatterySource {
    fn read_voltage(&mut self) -> f32;
}

/// Convert a 12-bit ADC count behind the 1:2 divider into volts.
pub fn adc_to_voltage(raw: u16) -> f32 {
    f32::from(raw) / ADC_FULL_SCALE * ADC_REF_VOLTAGE * BATTERY_DIVIDER
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BatteryStatus {
    pub voltage: f32,
    /// 0.0–100.0 %
    pub percent: f32,
    pub charging: bool,
    /// Set together with `charging`; the cell is above its full voltage.
    pub full: bool,
    /// On battery, inside the usable voltage range.
    pub discharging: bool,
    pub empty: bool,
}

impl BatteryStatus {
    /// Short label for the status bar: `chg` while charging, else `NN%`.
    pub fn label(&self) -> String {
        if self.charging {
            "chg".to_string()
        } else {
            format!("{:.0}%", self.percent)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryMonitor {
    min_voltage: f32,
    max_voltage: f32,
}

impl BatteryMonitor {
    pub fn new(min_voltage: f32, max_voltage: f32) -> Self {
        Self { min_voltage, max_voltage }
    }

    pub fn status(&self, voltage: f32) -> BatteryStatus {
        let span = self.max_voltage - self.min_voltage;
        let percent = if span > 0.0 {
            ((voltage - self.min_voltage) / span * 100.0).clamp(0.0, 100.0)
        } else if voltage >= self.max_voltage {
            100.0
        } else {
            0.0
        };

        // Above the full-charge voltage only happens on USB power.
        let charging = voltage > self.max_voltage;
        let empty = voltage < self.min_voltage;

        BatteryStatus {
            voltage,
            percent,
            charging,
            full: charging,
            discharging: !charging && !empty,
            empty,
        }
    }

    pub fn poll(&self, source: &mut impl BatterySource) -> BatteryStatus {
        self.status(source.read_voltage())
    }
}

impl Default for BatteryMonitor {
    fn default() -> Self {
        Self::new(BATTERY_MIN_VOLTAGE, BATTERY_MAX_VOLTAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(f32);

    impl BatterySource for Fixed {
        fn read_voltage(&mut self) -> f32 {
            self.0
        }
    }

    #[test]
    fn percent_is_clamped_outside_range() {
        let m = BatteryMonitor::default();
        assert_eq!(m.status(2.9).percent, 0.0);
        assert_eq!(m.status(4.6).percent, 100.0);
        assert!(m.status(2.9).empty);
        assert!(m.status(4.6).charging);
    }

    #[test]
    fn percent_is_linear_inside_range() {
        let m = BatteryMonitor::new(3.0, 4.0);
        assert!((m.status(3.25).percent - 25.0).abs() < 1e-3);
        assert!((m.status(3.5).percent - 50.0).abs() < 1e-3);
        assert!((m.status(4.0).percent - 100.0).abs() < 1e-3);
        assert!(!m.status(3.5).charging && !m.status(3.5).empty);
    }

    #[test]
    fn state_flags_partition_the_range() {
        let m = BatteryMonitor::default();

        let usb = m.status(4.3);
        assert!(usb.charging && usb.full);
        assert!(!usb.discharging && !usb.empty);

        let on_battery = m.status(3.8);
        assert!(on_battery.discharging);
        assert!(!on_battery.charging && !on_battery.full && !on_battery.empty);

        let flat = m.status(3.2);
        assert!(flat.empty);
        assert!(!flat.charging && !flat.full && !flat.discharging);

        // Both thresholds themselves count as discharging.
        assert!(m.status(BATTERY_MAX_VOLTAGE).discharging);
        assert!(m.status(BATTERY_MIN_VOLTAGE).discharging);
    }

    #[test]
    fn labels() {
        let m = BatteryMonitor::new(3.0, 4.0);
        assert_eq!(m.status(3.5).label(), "50%");
        assert_eq!(m.status(4.2).label(), "chg");
    }

    #[test]
    fn adc_conversion_covers_divider() {
        assert_eq!(adc_to_voltage(0), 0.0);
        assert!((adc_to_voltage(4095) - 6.6).abs() < 1e-4);
    }

    #[test]
    fn poll_reads_source() {
        let m = BatteryMonitor::new(3.0, 4.0);
        let status = m.poll(&mut Fixed(3.75));
        assert_eq!(status.voltage, 3.75);
        assert!((status.percent - 75.0).abs() < 1e-3);
    }
}
