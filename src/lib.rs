// RoundWatch — Gesture-driven firmware core
//
// Everything that can run without ESP-IDF lives here: the gesture pipeline,
// battery mapping, scene rendering, screens and the board loop. The firmware
// binary adds the panel, ADC and I2C glue on top.

pub mod battery;
pub mod config;
pub mod display;
pub mod drivers;
pub mod error;
pub mod events;
pub mod gesture;
pub mod screens;
pub mod sim;
pub mod tasks;

pub use crate::error::SensorError;
pub use crate::gesture::GestureRecognizer;
pub use crate::tasks::board::BoardLoop;
