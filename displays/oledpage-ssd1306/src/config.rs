//! Display configuration
//!
//! Checked once when the driver is built; the resulting geometry never
//! changes afterwards.

use oledpage_core::{DisplayError, Geometry, MAX_HEIGHT, MAX_WIDTH, PAGE_HEIGHT};
use oledpage_hal::I2cConfig;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Usual SSD1306 address (SA0 low)
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Alternate SSD1306 address (SA0 high)
pub const ALTERNATE_ADDRESS: u8 = 0x3D;

/// Smallest panel height the controller is configured for
pub const MIN_HEIGHT: u8 = 16;

/// Vertical scan direction of the panel
///
/// Only changes the init sequence; drawing coordinates are unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Orientation {
    /// Row 0 at the top of the glass
    #[default]
    TopToBottom,
    /// Panel mounted upside down
    BottomToTop,
}

/// Display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// 7-bit I2C address
    pub address: u8,
    /// Bus settings
    pub bus: I2cConfig,
    /// Width in columns (1-128)
    pub width: u8,
    /// Height in rows (16-64, multiple of 8)
    pub height: u8,
    /// Scan direction
    pub orientation: Orientation,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::SSD1306_128X64
    }
}

impl DisplayConfig {
    /// 0.96" 128x64 module
    pub const SSD1306_128X64: Self = Self {
        address: DEFAULT_ADDRESS,
        bus: I2cConfig::FAST,
        width: 128,
        height: 64,
        orientation: Orientation::TopToBottom,
    };

    /// 0.91" 128x32 module
    pub const SSD1306_128X32: Self = Self {
        address: DEFAULT_ADDRESS,
        bus: I2cConfig::FAST,
        width: 128,
        height: 32,
        orientation: Orientation::TopToBottom,
    };

    /// Use a different I2C address
    pub const fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Use different bus settings
    pub const fn with_bus(mut self, bus: I2cConfig) -> Self {
        self.bus = bus;
        self
    }

    /// Use a different panel size
    pub const fn with_size(mut self, width: u8, height: u8) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Use a different scan direction
    pub const fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Check the configuration and derive the panel geometry
    ///
    /// The bus clock must not exceed 400 kHz, the width must be 1-128 and the
    /// height one of 16, 24, 32, 40, 48, 56 or 64.
    pub fn validate(&self) -> Result<Geometry, DisplayError> {
        if !self.bus.is_supported()
            || self.width == 0
            || self.width > MAX_WIDTH
            || self.height < MIN_HEIGHT
            || self.height > MAX_HEIGHT
            || self.height % PAGE_HEIGHT != 0
        {
            error!(
                "Invalid SSD1306 configuration, bus clock must be at most 400000 Hz, 'width' at most {}, 'height' between {} and {} and a multiple of 8",
                MAX_WIDTH,
                MIN_HEIGHT,
                MAX_HEIGHT
            );
            return Err(DisplayError::InvalidConfig);
        }

        Geometry::new(self.width, self.height)
    }
}
