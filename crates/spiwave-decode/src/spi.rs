use serde::{Deserialize, Serialize};

/// SPI clock polarity/phase combination. The mode number is `CPOL * 2 + CPHA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockMode {
    Mode0,
    Mode1,
    Mode2,
    Mode3,
}

impl ClockMode {
    pub fn from_mode(mode: u8) -> Option<Self> {
        Some(match mode {
            0 => Self::Mode0,
            1 => Self::Mode1,
            2 => Self::Mode2,
            3 => Self::Mode3,
            _ => return None,
        })
    }

    pub fn from_bits(cpol: bool, cpha: bool) -> Self {
        match (cpol, cpha) {
            (false, false) => Self::Mode0,
            (false, true) => Self::Mode1,
            (true, false) => Self::Mode2,
            (true, true) => Self::Mode3,
        }
    }

    pub fn mode(&self) -> u8 {
        match self {
            Self::Mode0 => 0,
            Self::Mode1 => 1,
            Self::Mode2 => 2,
            Self::Mode3 => 3,
        }
    }

    /// Clock idles high.
    pub fn cpol(&self) -> bool {
        matches!(self, Self::Mode2 | Self::Mode3)
    }

    /// Data is sampled on the trailing clock edge.
    pub fn cpha(&self) -> bool {
        matches!(self, Self::Mode1 | Self::Mode3)
    }
}

/// Bytes seen on one line during a transfer, tagged with the clock mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpiFrame {
    pub cpol: bool,
    pub cpha: bool,
    pub bytes: Vec<u8>,
}

impl SpiFrame {
    pub fn new(mode: ClockMode, bytes: Vec<u8>) -> Self {
        Self {
            cpol: mode.cpol(),
            cpha: mode.cpha(),
            bytes,
        }
    }

    pub fn clock_mode(&self) -> ClockMode {
        ClockMode::from_bits(self.cpol, self.cpha)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn to_hex(&self) -> String {
        let bytes: Vec<String> = self.bytes.iter().map(|b| format!("{b:02X}")).collect();
        bytes.join(" ")
    }
}
