//! Core functionalities: simulated SPI driver, status codes, bus capture.

pub mod driver;
pub mod capture;
pub mod error;

pub use driver::{
    DriverState, SpiConfig, SpiDriver, IDLE_BYTE, MAX_MODE, MAX_TRANSFER_LEN, SUPPORTED_SPEEDS_HZ,
};
pub use capture::{CaptureStore, CaptureEntry, Direction};
pub use error::{SpiError, Status};
