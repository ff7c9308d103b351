// RoundWatch — Sensor Errors

/// Failures surfaced by the IMU collaborator.
#[derive(Debug, thiserror::Error)]
pub enum SensorError {
    /// The identity register did not match; the recognizer cannot run.
    #[error("QMI8658 not found (WHO_AM_I = {found:#04x})")]
    DeviceNotFound { found: u8 },

    /// Nothing acknowledged the identity read at `address`.
    #[error("no QMI8658 response at {address:#04x}: {reason}")]
    NoResponse { address: u8, reason: String },

    /// A configuration write failed during init.
    #[error("IMU configuration failed: {0}")]
    Config(String),

    /// A bus transaction failed while polling samples. Not retried.
    #[error("IMU read failed: {0}")]
    Read(String),
}
