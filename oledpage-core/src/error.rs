//! Display errors

use core::fmt;

use oledpage_hal::I2cBusError;

/// Errors reported by the framebuffer engine and the display driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Coordinate or size outside the display geometry
    OutOfBounds,
    /// Range start after range end, or a source buffer shorter than declared
    InvalidRange,
    /// The bus failed to deliver a command or data frame
    Transport(I2cBusError),
    /// Framebuffer or frame storage cannot hold the request
    AllocationFailure,
    /// Configuration rejected at setup
    InvalidConfig,
    /// No device acknowledged the configured address
    NotFound,
    /// Device did not answer the probe in time
    Timeout,
}

impl From<I2cBusError> for DisplayError {
    fn from(kind: I2cBusError) -> Self {
        DisplayError::Transport(kind)
    }
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::OutOfBounds => f.write_str("coordinates outside the display"),
            DisplayError::InvalidRange => f.write_str("invalid range"),
            DisplayError::Transport(kind) => write!(f, "transport failure: {}", kind),
            DisplayError::AllocationFailure => f.write_str("framebuffer allocation failed"),
            DisplayError::InvalidConfig => f.write_str("invalid display configuration"),
            DisplayError::NotFound => f.write_str("device not found"),
            DisplayError::Timeout => f.write_str("device timeout"),
        }
    }
}
