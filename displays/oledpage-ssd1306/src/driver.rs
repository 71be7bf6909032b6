//! SSD1306 driver
//!
//! Owns the bus handle, the framebuffer and the glyph source. Drawing calls
//! only change the framebuffer; the `sync_*` calls push regions of it to the
//! display.

use oledpage_core::{DisplayError, Framebuffer, Geometry, GlyphSource};
use oledpage_hal::{BusError, I2cBus, I2cBusError};

#[cfg(feature = "font8x8")]
use oledpage_core::Font8x8;

use crate::command;
use crate::config::DisplayConfig;
use crate::sync::{self, transmit};

/// SSD1306 OLED driver
pub struct Ssd1306<I2C, G> {
    bus: I2C,
    config: DisplayConfig,
    framebuffer: Framebuffer,
    glyphs: G,
}

#[cfg(feature = "font8x8")]
impl<I2C: I2cBus> Ssd1306<I2C, Font8x8> {
    /// Create a driver using the built-in 8x8 font
    ///
    /// Validates the configuration and allocates the framebuffer; nothing is
    /// sent until [`Ssd1306::init`].
    pub fn new(bus: I2C, config: DisplayConfig) -> Result<Self, DisplayError> {
        Self::with_glyphs(bus, config, Font8x8)
    }
}

impl<I2C: I2cBus, G: GlyphSource> Ssd1306<I2C, G> {
    /// Create a driver with a custom glyph source
    pub fn with_glyphs(bus: I2C, config: DisplayConfig, glyphs: G) -> Result<Self, DisplayError> {
        let geometry = config.validate()?;
        let framebuffer = Framebuffer::new(geometry)?;
        debug!(
            "Allocated {} byte framebuffer for {}x{} display",
            framebuffer.as_bytes().len(),
            geometry.width(),
            geometry.height()
        );

        Ok(Self {
            bus,
            config,
            framebuffer,
            glyphs,
        })
    }

    /// Probe the device and send the initialization sequence
    pub fn init(&mut self) -> Result<(), DisplayError> {
        info!("Initializing I2C SSD1306...");

        let address = self.config.address;
        self.bus.probe(address).map_err(|e| match e.kind() {
            I2cBusError::Nack => {
                error!("I2C SSD1306 device not found in address {=u8:#x}", address);
                DisplayError::NotFound
            }
            I2cBusError::Timeout => {
                error!("I2C SSD1306 device timeout in address {=u8:#x}", address);
                DisplayError::Timeout
            }
            kind => {
                error!("I2C SSD1306 device error in address {=u8:#x}", address);
                DisplayError::Transport(kind)
            }
        })?;

        let sequence = command::init_sequence(self.config.height, self.config.orientation);
        transmit(&mut self.bus, address, &sequence)?;

        info!("I2C SSD1306 initialized successfully");
        Ok(())
    }

    /// Tear the driver down and hand the bus back
    pub fn release(self) -> I2C {
        self.bus
    }

    /// Active configuration
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Panel dimensions
    pub fn geometry(&self) -> Geometry {
        self.framebuffer.geometry()
    }

    /// Read access to the framebuffer
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Direct access to the framebuffer
    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    /// Turn every pixel off (in memory)
    pub fn clear(&mut self) {
        self.framebuffer.clear();
    }

    /// Turn every pixel on (in memory)
    pub fn fill(&mut self) {
        self.framebuffer.fill();
    }

    /// Set or clear one pixel
    pub fn set_pixel(&mut self, x: u8, y: u8, on: bool) -> Result<(), DisplayError> {
        self.framebuffer.set_pixel(x, y, on)
    }

    /// Set or clear the closed rectangle `[x1, x2] x [y1, y2]`
    pub fn fill_rect(
        &mut self,
        x1: u8,
        x2: u8,
        y1: u8,
        y2: u8,
        on: bool,
    ) -> Result<(), DisplayError> {
        self.framebuffer.fill_rect(x1, x2, y1, y2, on)
    }

    /// Draw text with the driver's glyph source
    pub fn draw_text(&mut self, x: u8, y: u8, text: &str, invert: bool) -> Result<(), DisplayError> {
        self.framebuffer.draw_text(x, y, text, invert, &self.glyphs)
    }

    /// Draw an integer
    pub fn draw_number(&mut self, x: u8, y: u8, value: i32, invert: bool) -> Result<(), DisplayError> {
        self.framebuffer
            .draw_number(x, y, value, invert, &self.glyphs)
    }

    /// Draw a float with `decimals` fractional digits
    pub fn draw_float(
        &mut self,
        x: u8,
        y: u8,
        value: f32,
        decimals: u8,
        invert: bool,
    ) -> Result<(), DisplayError> {
        self.framebuffer
            .draw_float(x, y, value, decimals, invert, &self.glyphs)
    }

    /// Copy a page-packed image
    pub fn blit_image(
        &mut self,
        x: u8,
        y: u8,
        image: &[u8],
        img_width: u8,
        img_height: u8,
        invert: bool,
    ) -> Result<(), DisplayError> {
        self.framebuffer
            .blit_image(x, y, image, img_width, img_height, invert)
    }

    /// Hex view of the framebuffer for offline inspection
    pub fn dump_to_text<W: core::fmt::Write>(&self, out: &mut W) -> core::fmt::Result {
        self.framebuffer.dump_to_text(out)
    }

    /// Push one segment byte to the display
    pub fn sync_segment(&mut self, page: u8, segment: u8) -> Result<(), DisplayError> {
        sync::sync_segment(
            &mut self.bus,
            self.config.address,
            &self.framebuffer,
            page,
            segment,
        )
    }

    /// Push segments `seg_start..=seg_end` of one page
    pub fn sync_segment_range(
        &mut self,
        page: u8,
        seg_start: u8,
        seg_end: u8,
    ) -> Result<(), DisplayError> {
        sync::sync_segment_range(
            &mut self.bus,
            self.config.address,
            &self.framebuffer,
            page,
            seg_start,
            seg_end,
        )
    }

    /// Push one page
    pub fn sync_page(&mut self, page: u8) -> Result<(), DisplayError> {
        sync::sync_page(&mut self.bus, self.config.address, &self.framebuffer, page)
    }

    /// Push pages `initial_page..=final_page`
    pub fn sync_page_range(&mut self, initial_page: u8, final_page: u8) -> Result<(), DisplayError> {
        sync::sync_page_range(
            &mut self.bus,
            self.config.address,
            &self.framebuffer,
            initial_page,
            final_page,
        )
    }

    /// Push the whole framebuffer
    pub fn sync_all(&mut self) -> Result<(), DisplayError> {
        sync::sync_all(&mut self.bus, self.config.address, &self.framebuffer)
    }

    /// Set display contrast (0-255)
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError> {
        transmit(&mut self.bus, self.config.address, &command::contrast(contrast))
    }

    /// Turn display on/off
    pub fn set_display_on(&mut self, on: bool) -> Result<(), DisplayError> {
        transmit(&mut self.bus, self.config.address, &command::display_power(on))
    }

    /// Invert display colors
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), DisplayError> {
        transmit(&mut self.bus, self.config.address, &command::inverse(inverted))
    }
}
