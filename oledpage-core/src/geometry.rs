//! Display geometry
//!
//! Width in columns (segments), height in pixel rows, grouped into pages of
//! eight rows each.

use crate::error::DisplayError;

/// Rows per page
pub const PAGE_HEIGHT: u8 = 8;

/// Widest supported panel
pub const MAX_WIDTH: u8 = 128;

/// Tallest supported panel
pub const MAX_HEIGHT: u8 = 64;

/// Most pages a panel can have
pub const MAX_PAGES: usize = (MAX_HEIGHT / PAGE_HEIGHT) as usize;

/// Bytes needed for the largest panel
pub const FRAMEBUFFER_CAPACITY: usize = MAX_WIDTH as usize * MAX_PAGES;

/// Immutable panel dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Geometry {
    width: u8,
    height: u8,
}

impl Geometry {
    /// Create a geometry
    ///
    /// `width` must be 1-128 and `height` a multiple of 8 between 8 and 64.
    pub const fn new(width: u8, height: u8) -> Result<Self, DisplayError> {
        if width == 0
            || width > MAX_WIDTH
            || height == 0
            || height > MAX_HEIGHT
            || height % PAGE_HEIGHT != 0
        {
            return Err(DisplayError::InvalidConfig);
        }
        Ok(Self { width, height })
    }

    /// Width in columns
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Height in pixel rows
    pub const fn height(&self) -> u8 {
        self.height
    }

    /// Number of 8-row pages
    pub const fn total_pages(&self) -> u8 {
        self.height / PAGE_HEIGHT
    }

    /// Bytes needed to mirror the display RAM
    pub const fn buffer_len(&self) -> usize {
        self.width as usize * self.total_pages() as usize
    }

    /// Whether a pixel lies on the panel
    pub const fn contains(&self, x: u8, y: u8) -> bool {
        x < self.width && y < self.height
    }

    /// Whether a page index is valid
    pub const fn has_page(&self, page: u8) -> bool {
        page < self.total_pages()
    }

    /// Whether a segment (column) index is valid
    pub const fn has_segment(&self, segment: u8) -> bool {
        segment < self.width
    }
}
