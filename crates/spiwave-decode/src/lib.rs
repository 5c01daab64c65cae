//! Protocol-level view of SPI traffic: clock modes and frames.

pub mod spi;

pub use spi::{ClockMode, SpiFrame};
