//! In-memory framebuffer
//!
//! Drawing only touches RAM. Nothing reaches the panel until the driver syncs
//! a region, so callers can batch any number of primitives per transfer.
//!
//! Pixel and rectangle calls are strict: bad coordinates are rejected before a
//! byte changes. Text and images are best effort: content running off the
//! panel is dropped with a warning and the call still succeeds.

use core::fmt::{self, Write as _};

use heapless::String;

use crate::blit;
use crate::buffer::PageBuffer;
use crate::error::DisplayError;
use crate::geometry::{Geometry, PAGE_HEIGHT};
use crate::glyph::{GlyphSource, GLYPH_WIDTH};

/// Capacity of the scratch string used by the number helpers
pub const NUMBER_TEXT_CAPACITY: usize = 32;

/// Paged 1-bit framebuffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    geometry: Geometry,
    buffer: PageBuffer,
}

impl Framebuffer {
    /// Allocate a cleared framebuffer
    pub fn new(geometry: Geometry) -> Result<Self, DisplayError> {
        let buffer = PageBuffer::new(geometry).map_err(|e| {
            error!("Failed to allocate framebuffer");
            e
        })?;
        Ok(Self { geometry, buffer })
    }

    /// Panel dimensions
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Segments of one page
    pub fn page(&self, page: u8) -> Option<&[u8]> {
        self.buffer.page(usize::from(page))
    }

    /// Segments `start..=end` of one page
    pub fn segments(&self, page: u8, start: u8, end: u8) -> Option<&[u8]> {
        self.buffer
            .segments(usize::from(page), usize::from(start), usize::from(end))
    }

    /// Whole buffer, page-major
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_bytes()
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.buffer.fill(0x00);
    }

    /// Turn every pixel on
    pub fn fill(&mut self) {
        self.buffer.fill(0xFF);
    }

    /// Read one pixel, `None` outside the panel
    pub fn pixel(&self, x: u8, y: u8) -> Option<bool> {
        if !self.geometry.contains(x, y) {
            return None;
        }
        self.buffer
            .get(usize::from(y / PAGE_HEIGHT), usize::from(x))
            .map(|byte| byte & (1 << (y % PAGE_HEIGHT)) != 0)
    }

    /// Set or clear one pixel
    pub fn set_pixel(&mut self, x: u8, y: u8, on: bool) -> Result<(), DisplayError> {
        if !self.geometry.contains(x, y) {
            error!(
                "Invalid pixel coordinates, 'x' must be between 0 and {}, 'y' must be between 0 and {}",
                self.geometry.width() - 1,
                self.geometry.height() - 1
            );
            return Err(DisplayError::OutOfBounds);
        }

        let bit = 1 << (y % PAGE_HEIGHT);
        let byte = self
            .buffer
            .get_mut(usize::from(y / PAGE_HEIGHT), usize::from(x))
            .ok_or(DisplayError::OutOfBounds)?;
        if on {
            *byte |= bit;
        } else {
            *byte &= !bit;
        }
        Ok(())
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
        if !self.geometry.contains(x1, y1)
            || !self.geometry.contains(x2, y2)
            || x1 > x2
            || y1 > y2
        {
            error!(
                "Invalid rectangle, 'x1' <= 'x2' < {}, 'y1' <= 'y2' < {}",
                self.geometry.width(),
                self.geometry.height()
            );
            return Err(DisplayError::OutOfBounds);
        }

        let first_page = y1 / PAGE_HEIGHT;
        let last_page = y2 / PAGE_HEIGHT;
        for page in first_page..=last_page {
            let top = page * PAGE_HEIGHT;
            let first_row = y1.max(top) - top;
            let last_row = y2.min(top + PAGE_HEIGHT - 1) - top;
            let mask = blit::span_mask(first_row, last_row);

            let segments = self
                .buffer
                .page_mut(usize::from(page))
                .and_then(|p| p.get_mut(usize::from(x1)..=usize::from(x2)))
                .ok_or(DisplayError::OutOfBounds)?;
            for byte in segments {
                if on {
                    *byte |= mask;
                } else {
                    *byte &= !mask;
                }
            }
        }
        Ok(())
    }

    /// Draw text with its top-left corner at `(x, y)`
    ///
    /// Every character takes [`GLYPH_WIDTH`] columns. On a page boundary the
    /// glyph columns overwrite the page; between boundaries they are OR'd into
    /// the two pages they straddle. Characters that do not fit horizontally
    /// are dropped, rows below the last page are clipped.
    pub fn draw_text<G: GlyphSource + ?Sized>(
        &mut self,
        x: u8,
        y: u8,
        text: &str,
        invert: bool,
        glyphs: &G,
    ) -> Result<(), DisplayError> {
        if !self.geometry.contains(x, y) {
            error!(
                "Invalid text coordinates, 'x' must be between 0 and {}, 'y' must be between 0 and {}",
                self.geometry.width() - 1,
                self.geometry.height() - 1
            );
            return Err(DisplayError::OutOfBounds);
        }

        let page = usize::from(y / PAGE_HEIGHT);
        let offset = y % PAGE_HEIGHT;
        if offset != 0 && page + 1 >= usize::from(self.geometry.total_pages()) {
            warn!("Text exceeds the height of the display, clipping bottom rows");
        }

        let width = usize::from(self.geometry.width());
        let mut column = usize::from(x);
        for ch in text.chars() {
            if column + GLYPH_WIDTH > width {
                warn!("Text exceeds the width of the display");
                break;
            }

            let glyph = glyphs.glyph(ch);
            for (i, &bits) in glyph.iter().enumerate() {
                let bits = if invert { !bits } else { bits };
                self.place(page, column + i, offset, bits, 0xFF);
            }
            column += GLYPH_WIDTH;
        }

        Ok(())
    }

    /// Draw an integer in decimal
    pub fn draw_number<G: GlyphSource + ?Sized>(
        &mut self,
        x: u8,
        y: u8,
        value: i32,
        invert: bool,
        glyphs: &G,
    ) -> Result<(), DisplayError> {
        let text = format_text(format_args!("{}", value));
        self.draw_text(x, y, &text, invert, glyphs)
    }

    /// Draw a float with a fixed number of decimal places
    pub fn draw_float<G: GlyphSource + ?Sized>(
        &mut self,
        x: u8,
        y: u8,
        value: f32,
        decimals: u8,
        invert: bool,
        glyphs: &G,
    ) -> Result<(), DisplayError> {
        let text = format_text(format_args!("{:.*}", usize::from(decimals), value));
        self.draw_text(x, y, &text, invert, glyphs)
    }

    /// Copy a page-packed image with its top-left corner at `(x, y)`
    ///
    /// `image` holds `ceil(img_height / 8)` rows of `img_width` bytes, laid
    /// out like the framebuffer itself. Rows of the last byte row beyond
    /// `img_height` are ignored, so nothing below `y + img_height` changes.
    pub fn blit_image(
        &mut self,
        x: u8,
        y: u8,
        image: &[u8],
        img_width: u8,
        img_height: u8,
        invert: bool,
    ) -> Result<(), DisplayError> {
        let w = usize::from(img_width);
        let h = usize::from(img_height);
        if w == 0
            || h == 0
            || usize::from(x) + w > usize::from(self.geometry.width())
            || usize::from(y) + h > usize::from(self.geometry.height())
        {
            error!(
                "Invalid image placement, 'x + width' must be at most {}, 'y + height' must be at most {}",
                self.geometry.width(),
                self.geometry.height()
            );
            return Err(DisplayError::OutOfBounds);
        }

        let rows = h.div_ceil(usize::from(PAGE_HEIGHT));
        let needed = rows * w;
        if image.len() < needed {
            error!(
                "Image buffer too short, {} bytes given, {} required",
                image.len(),
                needed
            );
            return Err(DisplayError::InvalidRange);
        }

        let initial_page = usize::from(y / PAGE_HEIGHT);
        let offset = y % PAGE_HEIGHT;
        for (row, chunk) in image[..needed].chunks_exact(w).enumerate() {
            let mask = blit::row_mask(h - row * usize::from(PAGE_HEIGHT));
            for (col, &src) in chunk.iter().enumerate() {
                let bits = if invert { !src } else { src };
                self.place(initial_page + row, usize::from(x) + col, offset, bits, mask);
            }
        }

        Ok(())
    }

    /// Write one source column byte whose top row lands at `offset` in `page`
    ///
    /// Only bits in `mask` belong to the source. Page-aligned writes replace
    /// those bits; unaligned writes OR them across `page` and `page + 1`, the
    /// carry being dropped when `page + 1` does not exist.
    fn place(&mut self, page: usize, segment: usize, offset: u8, bits: u8, mask: u8) {
        if offset == 0 {
            if let Some(byte) = self.buffer.get_mut(page, segment) {
                *byte = blit::masked_overwrite(bits, mask, *byte);
            }
            return;
        }

        let bits = bits & mask;
        if let Some(byte) = self.buffer.get_mut(page, segment) {
            *byte = blit::low_pass(bits, offset, *byte);
        }
        if blit::high_pass(bits, offset, 0) != 0 {
            if let Some(byte) = self.buffer.get_mut(page + 1, segment) {
                *byte = blit::high_pass(bits, offset, *byte);
            }
        }
    }

    /// Hex view of the buffer, one page per line
    pub fn dump(&self) -> Dump<'_> {
        Dump {
            buffer: &self.buffer,
        }
    }

    /// Write the hex view into `out`
    pub fn dump_to_text<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        write!(out, "{}", self.dump())
    }
}

/// Format into a fixed-capacity string, keeping whatever fits
fn format_text(args: fmt::Arguments<'_>) -> String<NUMBER_TEXT_CAPACITY> {
    let mut text = String::new();
    if text.write_fmt(args).is_err() {
        warn!("Number text truncated to {} characters", NUMBER_TEXT_CAPACITY);
    }
    text
}

/// Hex rendering of a framebuffer
///
/// Each page becomes one line of space-separated uppercase bytes.
pub struct Dump<'a> {
    buffer: &'a PageBuffer,
}

impl fmt::Display for Dump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for page in self.buffer.pages() {
            for (i, byte) in page.iter().enumerate() {
                if i > 0 {
                    f.write_char(' ')?;
                }
                write!(f, "{:02X}", byte)?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}
