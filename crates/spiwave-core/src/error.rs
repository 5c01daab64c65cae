use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpiError {
    #[error("required buffer or argument is missing")]
    NullPointer,
    #[error("transfer length is zero or exceeds the bus limit")]
    InvalidLength,
    #[error("driver is not initialized")]
    NotInitialized,
    #[error("driver is already initialized")]
    AlreadyInitialized,
    #[error("configuration value is outside the supported set")]
    InvalidArgument,
}

impl SpiError {
    /// Numeric status code as exposed to callers of the C-style API.
    pub fn code(&self) -> i32 {
        Status::from(*self) as i32
    }
}

/// Stable status codes. The numeric values are part of the public contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Status {
    Success = 0,
    NullPointer = -1,
    InvalidLength = -2,
    NotInitialized = -3,
    AlreadyInitialized = -4,
    InvalidArgument = -5,
}

impl Status {
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            0 => Self::Success,
            -1 => Self::NullPointer,
            -2 => Self::InvalidLength,
            -3 => Self::NotInitialized,
            -4 => Self::AlreadyInitialized,
            -5 => Self::InvalidArgument,
            _ => return None,
        })
    }

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        self == Self::Success
    }

    /// Converts back into a `Result`, `Success` being the only `Ok`.
    pub fn into_result(self) -> Result<(), SpiError> {
        match self {
            Self::Success => Ok(()),
            Self::NullPointer => Err(SpiError::NullPointer),
            Self::InvalidLength => Err(SpiError::InvalidLength),
            Self::NotInitialized => Err(SpiError::NotInitialized),
            Self::AlreadyInitialized => Err(SpiError::AlreadyInitialized),
            Self::InvalidArgument => Err(SpiError::InvalidArgument),
        }
    }
}

impl From<SpiError> for Status {
    fn from(err: SpiError) -> Self {
        match err {
            SpiError::NullPointer => Self::NullPointer,
            SpiError::InvalidLength => Self::InvalidLength,
            SpiError::NotInitialized => Self::NotInitialized,
            SpiError::AlreadyInitialized => Self::AlreadyInitialized,
            SpiError::InvalidArgument => Self::InvalidArgument,
        }
    }
}

impl From<Result<(), SpiError>> for Status {
    fn from(result: Result<(), SpiError>) -> Self {
        match result {
            Ok(()) => Self::Success,
            Err(e) => e.into(),
        }
    }
}
