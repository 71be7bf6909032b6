//! oledpage Hardware Abstraction Layer
//!
//! This crate defines the bus traits the display driver talks through. Board
//! support crates (or the `oledpage-hal-embedded` adapter) implement them so
//! the framebuffer engine and sync protocol never depend on a specific chip.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  oledpage-ssd1306 (driver facade, sync) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  oledpage-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ oledpage-hal- │       │  board crate  │
//! │   embedded    │       │  (your impl)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - I2C bus operations
//! - [`i2c::BusError`] - classification of bus-specific errors

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;

// Re-export key traits at crate root for convenience
pub use i2c::{BusError, I2cBus, I2cBusError, I2cConfig};
