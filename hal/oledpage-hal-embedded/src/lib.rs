//! embedded-hal bus adapter
//!
//! Wraps any blocking `embedded_hal::i2c::I2c` implementation so it can be
//! handed to the display driver as an [`oledpage_hal::I2cBus`].

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;

pub use i2c::{HalI2c, HalI2cError};
