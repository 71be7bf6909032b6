//! Board-agnostic paged framebuffer engine
//!
//! Monochrome OLED controllers in the SSD1306 family organise their display
//! RAM as pages of eight pixel rows; each byte of a page (a "segment") is one
//! column of those eight rows. This crate mirrors that RAM in memory and
//! provides the drawing primitives on top of it:
//!
//! - [`Geometry`] - validated panel dimensions
//! - [`PageBuffer`] - `(page, segment) -> byte` storage with central bounds checks
//! - [`blit`] - the bit passes that split data across page boundaries
//! - [`Framebuffer`] - clear, fill, pixels, rectangles, text, numbers, images
//! - [`GlyphSource`] - character lookup for text, with a `font8x8` default
//!
//! Pushing the buffer to a device is the job of the driver crate.

#![no_std]
#![deny(unsafe_code)]

// This mod MUST go first, so that the others see its macros.
mod fmt;

pub mod blit;
pub mod buffer;
pub mod error;
pub mod framebuffer;
pub mod geometry;
pub mod glyph;

// Re-export key types
pub use buffer::PageBuffer;
pub use error::DisplayError;
pub use framebuffer::{Dump, Framebuffer, NUMBER_TEXT_CAPACITY};
pub use geometry::{Geometry, FRAMEBUFFER_CAPACITY, MAX_HEIGHT, MAX_PAGES, MAX_WIDTH, PAGE_HEIGHT};
#[cfg(feature = "font8x8")]
pub use glyph::Font8x8;
pub use glyph::{Glyph, GlyphSource, GLYPH_WIDTH};
