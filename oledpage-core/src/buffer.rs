//! Page-major display RAM mirror
//!
//! One byte per (page, segment). All indexing goes through this type, so an
//! out-of-range page or segment is an `Option::None`, never a panic.

use heapless::Vec;

use crate::error::DisplayError;
use crate::geometry::{Geometry, FRAMEBUFFER_CAPACITY};

/// Paged bitmap storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBuffer {
    /// Segments per page
    width: usize,
    /// Number of pages
    pages: usize,
    /// `pages * width` bytes, page 0 first
    bytes: Vec<u8, FRAMEBUFFER_CAPACITY>,
}

impl PageBuffer {
    /// Allocate a zeroed buffer for the geometry
    pub fn new(geometry: Geometry) -> Result<Self, DisplayError> {
        let mut bytes = Vec::new();
        bytes
            .resize(geometry.buffer_len(), 0)
            .map_err(|_| DisplayError::AllocationFailure)?;

        Ok(Self {
            width: usize::from(geometry.width()),
            pages: usize::from(geometry.total_pages()),
            bytes,
        })
    }

    fn index(&self, page: usize, segment: usize) -> Option<usize> {
        if page < self.pages && segment < self.width {
            Some(page * self.width + segment)
        } else {
            None
        }
    }

    /// Segments per page
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of pages
    pub fn page_count(&self) -> usize {
        self.pages
    }

    /// Read one segment byte
    pub fn get(&self, page: usize, segment: usize) -> Option<u8> {
        self.index(page, segment).map(|i| self.bytes[i])
    }

    /// Mutable access to one segment byte
    pub fn get_mut(&mut self, page: usize, segment: usize) -> Option<&mut u8> {
        let i = self.index(page, segment)?;
        self.bytes.get_mut(i)
    }

    /// All segments of a page
    pub fn page(&self, page: usize) -> Option<&[u8]> {
        self.segments(page, 0, self.width.checked_sub(1)?)
    }

    /// All segments of a page, mutable
    pub fn page_mut(&mut self, page: usize) -> Option<&mut [u8]> {
        let start = self.index(page, 0)?;
        self.bytes.get_mut(start..start + self.width)
    }

    /// Segments `start..=end` of a page
    pub fn segments(&self, page: usize, start: usize, end: usize) -> Option<&[u8]> {
        if start > end {
            return None;
        }
        let first = self.index(page, start)?;
        let last = self.index(page, end)?;
        self.bytes.get(first..=last)
    }

    /// Set every byte
    pub fn fill(&mut self, value: u8) {
        self.bytes.iter_mut().for_each(|b| *b = value);
    }

    /// Iterate pages top to bottom
    pub fn pages(&self) -> impl Iterator<Item = &[u8]> {
        self.bytes.chunks_exact(self.width)
    }

    /// The whole buffer, page-major
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
