//! I2C bus adapter for embedded-hal 1.0
//!
//! Any chip HAL that implements the blocking `I2c` trait (embassy, esp-idf-hal,
//! rp2040-hal, linux-embedded-hal, ...) becomes a display transport.

use embedded_hal::i2c::{Error as _, ErrorKind, I2c, NoAcknowledgeSource};
use oledpage_hal::{BusError, I2cBus, I2cBusError};

/// Error from an adapted I2C bus
///
/// Keeps the original error for callers that want the chip-specific detail.
#[derive(Debug)]
pub struct HalI2cError<E> {
    /// Classified kind
    pub kind: I2cBusError,
    /// Error reported by the wrapped bus
    pub source: E,
}

impl<E: core::fmt::Debug> BusError for HalI2cError<E> {
    fn kind(&self) -> I2cBusError {
        self.kind
    }
}

/// Map an embedded-hal error kind onto the common bus error kinds
pub fn classify(kind: ErrorKind) -> I2cBusError {
    match kind {
        ErrorKind::Bus => I2cBusError::Bus,
        ErrorKind::ArbitrationLoss => I2cBusError::ArbitrationLost,
        ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
        | ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data)
        | ErrorKind::NoAcknowledge(NoAcknowledgeSource::Unknown) => I2cBusError::Nack,
        ErrorKind::Overrun => I2cBusError::Overrun,
        _ => I2cBusError::Other,
    }
}

/// Adapter from an embedded-hal I2C bus to [`I2cBus`]
pub struct HalI2c<I2C> {
    i2c: I2C,
}

impl<I2C> HalI2c<I2C> {
    /// Wrap an embedded-hal bus
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Give the wrapped bus back
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Borrow the wrapped bus
    pub fn inner(&mut self) -> &mut I2C {
        &mut self.i2c
    }
}

impl<I2C: I2c> I2cBus for HalI2c<I2C> {
    type Error = HalI2cError<I2C::Error>;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.i2c.write(address, data).map_err(|source| HalI2cError {
            kind: classify(source.kind()),
            source,
        })
    }
}
