//! SSD1306 OLED driver
//!
//! Drives 128x64, 128x32 and similar SSD1306 panels over I2C on top of the
//! `oledpage-core` framebuffer.
//!
//! # Usage
//!
//! ```ignore
//! let mut display = Ssd1306::new(bus, DisplayConfig::SSD1306_128X64)?;
//! display.init()?;
//!
//! display.clear();
//! display.draw_text(0, 0, "oledpage", false)?;
//! display.draw_float(0, 12, 21.5, 1, false)?;
//! display.sync_page_range(0, 2)?;
//! ```
//!
//! # Sync granularity
//!
//! | call                 | transfers          | payload               |
//! |----------------------|--------------------|-----------------------|
//! | `sync_segment`       | 2                  | 1 byte                |
//! | `sync_segment_range` | 2                  | `end - start + 1`     |
//! | `sync_page`          | 2                  | width                 |
//! | `sync_page_range`    | 2 per page         | width per page        |
//! | `sync_all`           | 2 per page         | whole framebuffer     |

#![no_std]
#![deny(unsafe_code)]

// This mod MUST go first, so that the others see its macros.
mod fmt;

pub mod command;
pub mod config;
pub mod driver;
pub mod sync;

// Re-export key types
pub use config::{DisplayConfig, Orientation, ALTERNATE_ADDRESS, DEFAULT_ADDRESS};
pub use driver::Ssd1306;
pub use oledpage_core::{DisplayError, Framebuffer, Geometry, GlyphSource};
pub use sync::{DataFrame, MAX_DATA_FRAME};
