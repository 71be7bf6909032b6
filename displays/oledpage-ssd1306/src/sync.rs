//! Framebuffer to display RAM synchronisation
//!
//! The controller is written in page addressing mode: an address command
//! selects a page and a starting segment, then a data frame carries
//! consecutive segment bytes, the controller advancing its segment pointer
//! after each one. Coarser calls batch more bytes per frame; there is no
//! dirty tracking, the caller picks the region that changed.

use heapless::Vec;
use oledpage_core::{DisplayError, Framebuffer, MAX_WIDTH};
use oledpage_hal::{BusError, I2cBus};

use crate::command::{address_command, DATA_PREFIX};

/// Largest data frame: control byte plus one full page
pub const MAX_DATA_FRAME: usize = MAX_WIDTH as usize + 1;

/// Data frame carrying consecutive segment bytes of one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFrame {
    bytes: Vec<u8, MAX_DATA_FRAME>,
}

impl DataFrame {
    /// Build `[DATA_PREFIX, segments...]`
    pub fn from_segments(segments: &[u8]) -> Result<Self, DisplayError> {
        let mut bytes = Vec::new();
        bytes
            .push(DATA_PREFIX)
            .map_err(|_| DisplayError::AllocationFailure)?;
        bytes
            .extend_from_slice(segments)
            .map_err(|_| DisplayError::AllocationFailure)?;
        Ok(Self { bytes })
    }

    /// Wire bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of segment bytes carried
    pub fn segment_count(&self) -> usize {
        self.bytes.len() - 1
    }
}

/// Send one transmission, turning bus errors into [`DisplayError::Transport`]
pub(crate) fn transmit<I2C: I2cBus>(
    bus: &mut I2C,
    address: u8,
    bytes: &[u8],
) -> Result<(), DisplayError> {
    bus.write(address, bytes).map_err(|e| {
        let kind = e.kind();
        error!("Failed to transmit {} bytes to the display: {}", bytes.len(), kind);
        DisplayError::Transport(kind)
    })
}

/// Address `(page, start)` and stream segments `start..=end`
///
/// Bounds are the caller's job; a bad range still fails cleanly.
fn write_segments<I2C: I2cBus>(
    bus: &mut I2C,
    address: u8,
    framebuffer: &Framebuffer,
    page: u8,
    start: u8,
    end: u8,
) -> Result<(), DisplayError> {
    let segments = framebuffer
        .segments(page, start, end)
        .ok_or(DisplayError::OutOfBounds)?;
    let frame = DataFrame::from_segments(segments)?;

    transmit(bus, address, &address_command(page, start))?;
    transmit(bus, address, frame.as_bytes())
}

/// Write one segment byte
pub fn sync_segment<I2C: I2cBus>(
    bus: &mut I2C,
    address: u8,
    framebuffer: &Framebuffer,
    page: u8,
    segment: u8,
) -> Result<(), DisplayError> {
    let geometry = framebuffer.geometry();
    if !geometry.has_page(page) || !geometry.has_segment(segment) {
        error!(
            "Invalid page or segment number, 'page' must be between 0 and {}, 'segment' must be between 0 and {}",
            geometry.total_pages() - 1,
            geometry.width() - 1
        );
        return Err(DisplayError::OutOfBounds);
    }

    write_segments(bus, address, framebuffer, page, segment, segment)
}

/// Write segments `seg_start..=seg_end` of one page in a single data frame
pub fn sync_segment_range<I2C: I2cBus>(
    bus: &mut I2C,
    address: u8,
    framebuffer: &Framebuffer,
    page: u8,
    seg_start: u8,
    seg_end: u8,
) -> Result<(), DisplayError> {
    if seg_start > seg_end {
        error!("Invalid segment range, 'initial_segment' must not exceed 'final_segment'");
        return Err(DisplayError::InvalidRange);
    }
    let geometry = framebuffer.geometry();
    if !geometry.has_page(page) || !geometry.has_segment(seg_end) {
        error!(
            "Invalid page or segment range, 'page' must be between 0 and {}, segments between 0 and {}",
            geometry.total_pages() - 1,
            geometry.width() - 1
        );
        return Err(DisplayError::OutOfBounds);
    }

    write_segments(bus, address, framebuffer, page, seg_start, seg_end)
}

/// Write a whole page
pub fn sync_page<I2C: I2cBus>(
    bus: &mut I2C,
    address: u8,
    framebuffer: &Framebuffer,
    page: u8,
) -> Result<(), DisplayError> {
    let geometry = framebuffer.geometry();
    if !geometry.has_page(page) {
        error!(
            "Invalid page number, must be between 0 and {}",
            geometry.total_pages() - 1
        );
        return Err(DisplayError::OutOfBounds);
    }

    write_segments(bus, address, framebuffer, page, 0, geometry.width() - 1)
}

/// Write pages `initial_page..=final_page`, top to bottom
///
/// Stops at the first transport failure; pages already sent stay on the
/// device.
pub fn sync_page_range<I2C: I2cBus>(
    bus: &mut I2C,
    address: u8,
    framebuffer: &Framebuffer,
    initial_page: u8,
    final_page: u8,
) -> Result<(), DisplayError> {
    let geometry = framebuffer.geometry();
    if initial_page > final_page || !geometry.has_page(final_page) {
        error!(
            "Invalid page range, pages must be between 0 and {} and 'initial_page' must not exceed 'final_page'",
            geometry.total_pages() - 1
        );
        return Err(DisplayError::InvalidRange);
    }

    for page in initial_page..=final_page {
        sync_page(bus, address, framebuffer, page)?;
    }
    Ok(())
}

/// Write the whole framebuffer
pub fn sync_all<I2C: I2cBus>(
    bus: &mut I2C,
    address: u8,
    framebuffer: &Framebuffer,
) -> Result<(), DisplayError> {
    let last_page = framebuffer.geometry().total_pages() - 1;
    sync_page_range(bus, address, framebuffer, 0, last_page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oledpage_core::Geometry;
    use oledpage_hal::I2cBusError;

    type Transfer = Vec<u8, MAX_DATA_FRAME>;

    /// Records every write; fails the write with index `fail_at`
    struct RecordingBus {
        transfers: Vec<Transfer, 32>,
        fail_at: Option<usize>,
        attempts: usize,
    }

    impl RecordingBus {
        fn new() -> Self {
            Self {
                transfers: Vec::new(),
                fail_at: None,
                attempts: 0,
            }
        }

        fn failing_at(index: usize) -> Self {
            Self {
                fail_at: Some(index),
                ..Self::new()
            }
        }
    }

    impl I2cBus for RecordingBus {
        type Error = I2cBusError;

        fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
            assert_eq!(address, 0x3C);
            let attempt = self.attempts;
            self.attempts += 1;
            if self.fail_at == Some(attempt) {
                return Err(I2cBusError::Nack);
            }
            self.transfers
                .push(Vec::from_slice(data).unwrap())
                .unwrap();
            Ok(())
        }
    }

    fn numbered(width: u8, height: u8) -> Framebuffer {
        let mut fb = Framebuffer::new(Geometry::new(width, height).unwrap()).unwrap();
        let image: Vec<u8, 1024> = (0..usize::from(width) * usize::from(height / 8))
            .map(|i| i as u8)
            .collect();
        fb.blit_image(0, 0, &image, width, height, false).unwrap();
        fb
    }

    #[test]
    fn test_data_frame_layout() {
        let frame = DataFrame::from_segments(&[1, 2, 3]).unwrap();
        assert_eq!(frame.as_bytes(), &[0x40, 1, 2, 3]);
        assert_eq!(frame.segment_count(), 3);
    }

    #[test]
    fn test_data_frame_capacity() {
        assert!(DataFrame::from_segments(&[0; 128]).is_ok());
        assert_eq!(
            DataFrame::from_segments(&[0; 129]),
            Err(DisplayError::AllocationFailure)
        );
    }

    #[test]
    fn test_sync_segment_two_transfers() {
        let fb = numbered(10, 16);
        let mut bus = RecordingBus::new();
        sync_segment(&mut bus, 0x3C, &fb, 1, 4).unwrap();

        assert_eq!(bus.transfers.len(), 2);
        assert_eq!(&bus.transfers[0][..], &[0x00, 0xB1, 0x04, 0x10]);
        assert_eq!(&bus.transfers[1][..], &[0x40, 14]);
    }

    #[test]
    fn test_sync_segment_range_batches_bytes() {
        let fb = numbered(10, 16);
        let mut bus = RecordingBus::new();
        sync_segment_range(&mut bus, 0x3C, &fb, 0, 2, 5).unwrap();

        assert_eq!(bus.transfers.len(), 2);
        assert_eq!(&bus.transfers[0][..], &[0x00, 0xB0, 0x02, 0x10]);
        assert_eq!(&bus.transfers[1][..], &[0x40, 2, 3, 4, 5]);
    }

    #[test]
    fn test_sync_segment_range_errors() {
        let fb = numbered(10, 16);
        let mut bus = RecordingBus::new();

        assert_eq!(
            sync_segment_range(&mut bus, 0x3C, &fb, 0, 5, 2),
            Err(DisplayError::InvalidRange)
        );
        assert_eq!(
            sync_segment_range(&mut bus, 0x3C, &fb, 0, 2, 10),
            Err(DisplayError::OutOfBounds)
        );
        assert_eq!(
            sync_segment_range(&mut bus, 0x3C, &fb, 2, 0, 1),
            Err(DisplayError::OutOfBounds)
        );
        assert_eq!(
            sync_segment(&mut bus, 0x3C, &fb, 0, 10),
            Err(DisplayError::OutOfBounds)
        );
        assert_eq!(bus.attempts, 0);
    }

    #[test]
    fn test_sync_page_sends_full_width() {
        let fb = numbered(128, 16);
        let mut bus = RecordingBus::new();
        sync_page(&mut bus, 0x3C, &fb, 1).unwrap();

        assert_eq!(&bus.transfers[0][..], &[0x00, 0xB1, 0x00, 0x10]);
        assert_eq!(bus.transfers[1].len(), 129);
        assert_eq!(bus.transfers[1][0], 0x40);
        assert_eq!(bus.transfers[1][1], 128);
        assert_eq!(bus.transfers[1][128], 255);
    }

    #[test]
    fn test_sync_page_range_order() {
        let fb = numbered(4, 32);
        let mut bus = RecordingBus::new();
        sync_page_range(&mut bus, 0x3C, &fb, 1, 3).unwrap();

        assert_eq!(bus.transfers.len(), 6);
        assert_eq!(bus.transfers[0][1], 0xB1);
        assert_eq!(bus.transfers[2][1], 0xB2);
        assert_eq!(bus.transfers[4][1], 0xB3);
        assert_eq!(&bus.transfers[5][..], &[0x40, 12, 13, 14, 15]);
    }

    #[test]
    fn test_sync_page_range_rejects_without_sending() {
        let fb = numbered(4, 32);
        let mut bus = RecordingBus::new();

        assert_eq!(
            sync_page_range(&mut bus, 0x3C, &fb, 2, 1),
            Err(DisplayError::InvalidRange)
        );
        assert_eq!(
            sync_page_range(&mut bus, 0x3C, &fb, 0, 4),
            Err(DisplayError::InvalidRange)
        );
        assert_eq!(bus.attempts, 0);
    }

    #[test]
    fn test_sync_page_range_stops_at_first_failure() {
        let fb = numbered(4, 32);
        // attempt 3 is the data frame of the second page
        let mut bus = RecordingBus::failing_at(3);

        assert_eq!(
            sync_page_range(&mut bus, 0x3C, &fb, 0, 3),
            Err(DisplayError::Transport(I2cBusError::Nack))
        );
        assert_eq!(bus.attempts, 4);
        assert_eq!(bus.transfers.len(), 3);
    }

    #[test]
    fn test_sync_all_covers_every_page() {
        let fb = numbered(8, 64);
        let mut bus = RecordingBus::new();
        sync_all(&mut bus, 0x3C, &fb).unwrap();

        assert_eq!(bus.transfers.len(), 16);
        for (page, pair) in bus.transfers.chunks(2).enumerate() {
            assert_eq!(pair[0][1], 0xB0 | page as u8);
            assert_eq!(&pair[1][1..], fb.page(page as u8).unwrap());
        }
    }

    #[test]
    fn test_address_failure_skips_data() {
        let fb = numbered(4, 16);
        let mut bus = RecordingBus::failing_at(0);

        assert_eq!(
            sync_segment(&mut bus, 0x3C, &fb, 0, 0),
            Err(DisplayError::Transport(I2cBusError::Nack))
        );
        assert_eq!(bus.attempts, 1);
    }
}
