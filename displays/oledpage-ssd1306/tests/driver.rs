//! Driver facade tests against recording buses

use oledpage_core::{GlyphSource, Font8x8};
use oledpage_hal::{I2cBus, I2cBusError};
use oledpage_ssd1306::command::{init_sequence, INIT_SEQUENCE_LEN};
use oledpage_ssd1306::{DisplayConfig, DisplayError, Orientation, Ssd1306};

/// Bus that records every write and can be told to fail
#[derive(Default)]
struct MockBus {
    writes: Vec<(u8, Vec<u8>)>,
    probe_error: Option<I2cBusError>,
    fail_write: Option<(usize, I2cBusError)>,
}

impl I2cBus for MockBus {
    type Error = I2cBusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        if let Some((index, err)) = self.fail_write {
            if index == self.writes.len() {
                return Err(err);
            }
        }
        self.writes.push((address, data.to_vec()));
        Ok(())
    }

    fn probe(&mut self, address: u8) -> Result<(), Self::Error> {
        if let Some(err) = self.probe_error {
            return Err(err);
        }
        self.write(address, &[])
    }
}

fn display(config: DisplayConfig) -> Ssd1306<MockBus, Font8x8> {
    Ssd1306::new(MockBus::default(), config).unwrap()
}

fn payloads(bus: &MockBus) -> Vec<&[u8]> {
    bus.writes.iter().map(|(_, data)| data.as_slice()).collect()
}

#[test]
fn test_new_rejects_invalid_config_without_io() {
    for config in [
        DisplayConfig::default().with_size(129, 64),
        DisplayConfig::default().with_size(128, 8),
        DisplayConfig::default().with_size(128, 60),
    ] {
        let result = Ssd1306::new(MockBus::default(), config);
        assert_eq!(result.err(), Some(DisplayError::InvalidConfig));
    }
}

#[test]
fn test_init_probes_then_sends_sequence() {
    let mut display = display(DisplayConfig::SSD1306_128X32.with_address(0x3D));
    display.init().unwrap();

    let bus = display.release();
    assert_eq!(bus.writes.len(), 2);
    assert_eq!(bus.writes[0], (0x3D, vec![]));
    assert_eq!(bus.writes[1].0, 0x3D);
    assert_eq!(bus.writes[1].1.len(), INIT_SEQUENCE_LEN);
    assert_eq!(
        bus.writes[1].1,
        init_sequence(32, Orientation::TopToBottom).to_vec()
    );
    assert_eq!(bus.writes[1].1[3], 31);
}

#[test]
fn test_init_bottom_to_top() {
    let mut display =
        display(DisplayConfig::default().with_orientation(Orientation::BottomToTop));
    display.init().unwrap();

    let bus = display.release();
    assert_eq!(&bus.writes[1].1[7..9], &[0xC8, 0xA1]);
}

#[test]
fn test_init_probe_failures() {
    let cases = [
        (I2cBusError::Nack, DisplayError::NotFound),
        (I2cBusError::Timeout, DisplayError::Timeout),
        (I2cBusError::Bus, DisplayError::Transport(I2cBusError::Bus)),
    ];
    for (bus_error, expected) in cases {
        let bus = MockBus {
            probe_error: Some(bus_error),
            ..MockBus::default()
        };
        let mut display = Ssd1306::new(bus, DisplayConfig::default()).unwrap();
        assert_eq!(display.init(), Err(expected));
        assert!(display.release().writes.is_empty());
    }
}

#[test]
fn test_init_sequence_failure_is_transport_error() {
    let bus = MockBus {
        fail_write: Some((1, I2cBusError::ArbitrationLost)),
        ..MockBus::default()
    };
    let mut display = Ssd1306::new(bus, DisplayConfig::default()).unwrap();
    assert_eq!(
        display.init(),
        Err(DisplayError::Transport(I2cBusError::ArbitrationLost))
    );
}

#[test]
fn test_drawing_does_not_touch_the_bus() {
    let mut display = display(DisplayConfig::default());
    display.fill();
    display.clear();
    display.set_pixel(5, 5, true).unwrap();
    display.fill_rect(0, 10, 20, 30, true).unwrap();
    display.draw_text(0, 40, "hi", false).unwrap();
    display.draw_number(0, 48, 1234, true).unwrap();
    display.draw_float(0, 56, -0.5, 2, false).unwrap();
    display.blit_image(100, 3, &[0xFF; 4], 2, 12, false).unwrap();

    assert!(display.release().writes.is_empty());
}

#[test]
fn test_text_at_origin_writes_glyph_into_page_zero() {
    let mut display = display(DisplayConfig::default());
    display.draw_text(16, 0, "A", false).unwrap();

    let glyph = Font8x8.glyph('A');
    let fb = display.framebuffer();
    assert_eq!(&fb.page(0).unwrap()[16..24], &glyph);
    assert!(fb.page(0).unwrap()[..16].iter().all(|&b| b == 0));
    assert!(fb.page(0).unwrap()[24..].iter().all(|&b| b == 0));
    for page in 1..8 {
        assert!(fb.page(page).unwrap().iter().all(|&b| b == 0));
    }
}

#[test]
fn test_segment_range_wire_format() {
    let mut display = display(DisplayConfig::default().with_size(10, 16));
    for x in 0..10 {
        display.set_pixel(x, x % 8, true).unwrap();
    }
    display.sync_segment_range(0, 2, 5).unwrap();

    let bus = display.release();
    assert_eq!(
        payloads(&bus),
        vec![
            &[0x00, 0xB0, 0x02, 0x10][..],
            &[0x40, 0x04, 0x08, 0x10, 0x20][..],
        ]
    );
}

#[test]
fn test_sync_all_after_draw() {
    let mut display = display(DisplayConfig::SSD1306_128X32);
    display.fill_rect(0, 127, 8, 15, true).unwrap();
    display.sync_all().unwrap();

    let bus = display.release();
    let frames = payloads(&bus);
    assert_eq!(frames.len(), 8);
    for (page, pair) in frames.chunks(2).enumerate() {
        assert_eq!(pair[0], &[0x00, 0xB0 | page as u8, 0x00, 0x10][..]);
        assert_eq!(pair[1].len(), 129);
        let expected = if page == 1 { 0xFF } else { 0x00 };
        assert!(pair[1][1..].iter().all(|&b| b == expected));
    }
}

#[test]
fn test_sync_page_range_invalid_sends_nothing() {
    let mut display = display(DisplayConfig::default());
    assert_eq!(display.sync_page_range(2, 1), Err(DisplayError::InvalidRange));
    assert_eq!(display.sync_page_range(0, 8), Err(DisplayError::InvalidRange));
    assert_eq!(display.sync_page(8), Err(DisplayError::OutOfBounds));
    assert_eq!(display.sync_segment(0, 128), Err(DisplayError::OutOfBounds));
    assert!(display.release().writes.is_empty());
}

#[test]
fn test_sync_page_range_partial_on_failure() {
    let bus = MockBus {
        fail_write: Some((5, I2cBusError::Timeout)),
        ..MockBus::default()
    };
    let mut display = Ssd1306::new(bus, DisplayConfig::default()).unwrap();

    assert_eq!(
        display.sync_page_range(0, 7),
        Err(DisplayError::Transport(I2cBusError::Timeout))
    );
    // pages 0 and 1 went out, page 2 stopped after its address command
    assert_eq!(display.release().writes.len(), 5);
}

#[test]
fn test_runtime_commands() {
    let mut display = display(DisplayConfig::default());
    display.set_contrast(0x10).unwrap();
    display.set_display_on(false).unwrap();
    display.set_inverted(true).unwrap();

    let bus = display.release();
    assert_eq!(
        payloads(&bus),
        vec![&[0x00, 0x81, 0x10][..], &[0x00, 0xAE][..], &[0x00, 0xA7][..]]
    );
}

#[test]
fn test_dump_matches_framebuffer() {
    let mut display = display(DisplayConfig::default().with_size(2, 16));
    display.set_pixel(1, 9, true).unwrap();

    let mut text = String::new();
    display.dump_to_text(&mut text).unwrap();
    assert_eq!(text, "00 00\n00 02\n");
}

/// Custom glyph sources plug in through `with_glyphs`
#[test]
fn test_custom_glyph_source() {
    struct Block;
    impl GlyphSource for Block {
        fn glyph(&self, _ch: char) -> [u8; 8] {
            [0xFF; 8]
        }
    }

    let mut display =
        Ssd1306::with_glyphs(MockBus::default(), DisplayConfig::default(), Block).unwrap();
    display.draw_text(120, 4, "ab", false).unwrap();

    let fb = display.framebuffer();
    assert!(fb.page(0).unwrap()[120..].iter().all(|&b| b == 0xF0));
    assert!(fb.page(1).unwrap()[120..].iter().all(|&b| b == 0x0F));
    assert!(fb.page(0).unwrap()[..120].iter().all(|&b| b == 0));
}
