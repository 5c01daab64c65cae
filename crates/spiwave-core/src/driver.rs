use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::capture::{CaptureStore, Direction};
use crate::error::SpiError;

/// Clock rates the simulated controller can be programmed with.
pub const SUPPORTED_SPEEDS_HZ: [u32; 3] = [1_000_000, 4_000_000, 8_000_000];

/// Largest mode number (CPOL/CPHA combination) accepted by `set_config`.
pub const MAX_MODE: u8 = 3;

/// Upper bound on the number of bytes moved by one `transfer`.
pub const MAX_TRANSFER_LEN: usize = 2048;

/// Value sampled on MISO when nothing drives MOSI.
pub const IDLE_BYTE: u8 = 0xFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Uninitialized,
    Initialized,
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpiConfig {
    pub speed_hz: u32,
    pub mode: u8,
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            speed_hz: 1_000_000,
            mode: 0,
        }
    }
}

impl SpiConfig {
    pub fn new(speed_hz: u32, mode: u8) -> Self {
        Self { speed_hz, mode }
    }

    /// Checks the mode range and the speed allow-list.
    pub fn validate(&self) -> Result<(), SpiError> {
        if self.mode > MAX_MODE {
            return Err(SpiError::InvalidArgument);
        }
        if !SUPPORTED_SPEEDS_HZ.contains(&self.speed_hz) {
            return Err(SpiError::InvalidArgument);
        }
        Ok(())
    }
}

/// A single simulated SPI bus.
///
/// Every operation validates all of its inputs before touching `state` or
/// `config`, so a rejected call leaves the driver exactly as it was.
/// Transfers are a loopback: each byte driven on MOSI is sampled back on MISO.
#[derive(Debug)]
pub struct SpiDriver {
    state: DriverState,
    config: SpiConfig,
    capture: Option<CaptureStore>,
}

impl Default for SpiDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl SpiDriver {
    pub fn new() -> Self {
        Self {
            state: DriverState::Uninitialized,
            config: SpiConfig::default(),
            capture: None,
        }
    }

    /// Creates a driver that records every successful transfer.
    pub fn with_capture(max_entries: usize) -> Self {
        let mut driver = Self::new();
        driver.attach_capture(CaptureStore::new(max_entries));
        driver
    }

    pub fn attach_capture(&mut self, store: CaptureStore) {
        self.capture = Some(store);
    }

    pub fn capture(&self) -> Option<&CaptureStore> {
        self.capture.as_ref()
    }

    pub fn take_capture(&mut self) -> Option<CaptureStore> {
        self.capture.take()
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Active configuration, `None` until `init` has succeeded.
    pub fn config(&self) -> Option<SpiConfig> {
        match self.state {
            DriverState::Uninitialized => None,
            _ => Some(self.config),
        }
    }

    pub fn init(&mut self) -> Result<(), SpiError> {
        if self.state != DriverState::Uninitialized {
            return Err(rejected("init", SpiError::AlreadyInitialized));
        }

        self.config = SpiConfig::default();
        self.state = DriverState::Initialized;
        debug!(
            "spi initialized at {} Hz, mode {}",
            self.config.speed_hz, self.config.mode
        );
        Ok(())
    }

    /// Replaces the active configuration. `None` stands for a missing argument.
    ///
    /// There is no guard against `Busy`; the whole config is swapped or
    /// nothing is.
    pub fn set_config(&mut self, config: Option<SpiConfig>) -> Result<(), SpiError> {
        if self.state == DriverState::Uninitialized {
            return Err(rejected("set_config", SpiError::NotInitialized));
        }
        let config = config.ok_or_else(|| rejected("set_config", SpiError::NullPointer))?;
        config.validate().map_err(|e| rejected("set_config", e))?;

        self.config = config;
        debug!(
            "spi config set to {} Hz, mode {}",
            config.speed_hz, config.mode
        );
        Ok(())
    }

    /// Clocks `len` bytes through the bus.
    ///
    /// Either buffer may be omitted for half-duplex use, but not both. With no
    /// `tx`, the line idles at [`IDLE_BYTE`]. Present buffers must hold at
    /// least `len` bytes.
    pub fn transfer(
        &mut self,
        tx: Option<&[u8]>,
        mut rx: Option<&mut [u8]>,
        len: usize,
    ) -> Result<(), SpiError> {
        if self.state == DriverState::Uninitialized {
            return Err(rejected("transfer", SpiError::NotInitialized));
        }
        if tx.is_none() && rx.is_none() {
            return Err(rejected("transfer", SpiError::InvalidArgument));
        }
        if len == 0 || len > MAX_TRANSFER_LEN {
            return Err(rejected("transfer", SpiError::InvalidLength));
        }
        let tx_short = tx.is_some_and(|b| b.len() < len);
        let rx_short = rx.as_deref().is_some_and(|b| b.len() < len);
        if tx_short || rx_short {
            return Err(rejected("transfer", SpiError::InvalidLength));
        }

        self.state = DriverState::Busy;
        trace!(
            "spi transfer of {len} bytes (tx: {}, rx: {})",
            tx.is_some(),
            rx.is_some()
        );

        let mut line = self.capture.as_ref().map(|_| Vec::with_capacity(len));
        for i in 0..len {
            let byte = tx.map_or(IDLE_BYTE, |tx| tx[i]);
            if let Some(rx) = rx.as_deref_mut() {
                rx[i] = byte;
            }
            if let Some(line) = line.as_mut() {
                line.push(byte);
            }
        }

        if let (Some(store), Some(line)) = (self.capture.as_mut(), line) {
            store.push(Direction::Mosi, line.clone());
            store.push(Direction::Miso, line);
        }

        self.state = DriverState::Initialized;
        Ok(())
    }

    /// Legacy block write. Only checks its arguments; it is not gated by the
    /// driver state and moves no data.
    pub fn write(&self, data: Option<&[u8]>, len: usize) -> Result<(), SpiError> {
        if data.is_none() {
            return Err(rejected("write", SpiError::NullPointer));
        }
        if len == 0 {
            return Err(rejected("write", SpiError::InvalidLength));
        }
        trace!("spi write of {len} bytes accepted");
        Ok(())
    }
}

fn rejected(op: &str, err: SpiError) -> SpiError {
    warn!("spi {op} rejected: {err}");
    err
}
