//! I2C bus abstractions
//!
//! Provides the transport the display driver sends command and data frames
//! through. Every call blocks until the transfer completes or the bus gives
//! up; the timeout is a property of the implementation, not of this trait.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Highest SCL frequency the display controllers accept (fast mode)
pub const MAX_FREQUENCY_HZ: u32 = 400_000;

/// Classified I2C failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cBusError {
    /// Bus error (misplaced start/stop condition)
    Bus,
    /// Arbitration lost
    ArbitrationLost,
    /// NACK received (no device at the address, or data rejected)
    Nack,
    /// Timeout
    Timeout,
    /// Overrun
    Overrun,
    /// Other error
    Other,
}

impl fmt::Display for I2cBusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            I2cBusError::Bus => "bus error",
            I2cBusError::ArbitrationLost => "arbitration lost",
            I2cBusError::Nack => "no acknowledge",
            I2cBusError::Timeout => "timeout",
            I2cBusError::Overrun => "overrun",
            I2cBusError::Other => "other bus error",
        };
        f.write_str(text)
    }
}

/// Implementation-specific bus error that can be classified
pub trait BusError: fmt::Debug {
    /// Map this error onto the common error kinds
    fn kind(&self) -> I2cBusError;
}

impl BusError for I2cBusError {
    fn kind(&self) -> I2cBusError {
        *self
    }
}

/// I2C bus master
///
/// Provides the write-only operations a display controller needs.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error: BusError;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write, sent as one transaction
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Check whether a device acknowledges the given address
    ///
    /// The default implementation issues an empty write.
    fn probe(&mut self, address: u8) -> Result<(), Self::Error> {
        self.write(address, &[])
    }
}

impl<T: I2cBus + ?Sized> I2cBus for &mut T {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        T::write(self, address, data)
    }

    fn probe(&mut self, address: u8) -> Result<(), Self::Error> {
        T::probe(self, address)
    }
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Per-transfer timeout in milliseconds
    pub timeout_ms: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::FAST
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self {
        frequency: 100_000,
        timeout_ms: 1000,
    };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self {
        frequency: MAX_FREQUENCY_HZ,
        timeout_ms: 1000,
    };

    /// Whether the frequency is one the display controllers accept
    pub const fn is_supported(&self) -> bool {
        self.frequency > 0 && self.frequency <= MAX_FREQUENCY_HZ
    }
}
