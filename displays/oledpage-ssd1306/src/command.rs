//! SSD1306 command set
//!
//! Every transmission starts with a control byte telling the controller
//! whether the rest is a command stream or display RAM data.

use crate::config::Orientation;

/// Control byte: the following bytes are commands
pub const CMD_PREFIX: u8 = 0x00;

/// Control byte: the following bytes are display RAM data
pub const DATA_PREFIX: u8 = 0x40;

/// SSD1306 commands
#[allow(dead_code)]
pub mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const DISPLAY_FOLLOWS_RAM: u8 = 0xA4;
    pub const DISPLAY_ALL_ON: u8 = 0xA5;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_START_LINE: u8 = 0x40;
    pub const COM_SCAN_INC: u8 = 0xC0;
    pub const COM_SCAN_DEC: u8 = 0xC8;
    pub const SEG_REMAP_NORMAL: u8 = 0xA0;
    pub const SEG_REMAP_REVERSED: u8 = 0xA1;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
}

/// Memory addressing mode argument: page addressing
pub const PAGE_ADDRESSING: u8 = 0x02;

/// Length of [`init_sequence`]
pub const INIT_SEQUENCE_LEN: usize = 22;

/// Address command selecting `(page, segment)` for the next data write
pub const fn address_command(page: u8, segment: u8) -> [u8; 4] {
    [
        CMD_PREFIX,
        cmd::SET_PAGE_ADDR | page,
        cmd::SET_LOW_COLUMN | (segment & 0x0F),
        cmd::SET_HIGH_COLUMN | ((segment >> 4) & 0x0F),
    ]
}

/// Power-up command stream, sent as one transmission
///
/// Leaves the controller in page addressing mode with the display on.
pub const fn init_sequence(height: u8, orientation: Orientation) -> [u8; INIT_SEQUENCE_LEN] {
    let (scan, remap) = match orientation {
        Orientation::TopToBottom => (cmd::COM_SCAN_INC, cmd::SEG_REMAP_NORMAL),
        Orientation::BottomToTop => (cmd::COM_SCAN_DEC, cmd::SEG_REMAP_REVERSED),
    };

    [
        CMD_PREFIX,
        cmd::DISPLAY_OFF,
        cmd::SET_MUX_RATIO,
        height - 1,
        cmd::SET_DISPLAY_OFFSET,
        0x00,
        cmd::SET_START_LINE | 0x00,
        scan,
        remap,
        cmd::SET_COM_PINS,
        0x12, // Alternative COM config
        cmd::SET_MEMORY_MODE,
        PAGE_ADDRESSING,
        cmd::SET_CONTRAST,
        0xFF,
        cmd::SET_CLOCK_DIV,
        0x80, // Default clock
        cmd::DISPLAY_FOLLOWS_RAM,
        cmd::SET_NORMAL,
        cmd::SET_CHARGE_PUMP,
        0x14, // Enable charge pump
        cmd::DISPLAY_ON,
    ]
}

/// Contrast command (0-255)
pub const fn contrast(value: u8) -> [u8; 3] {
    [CMD_PREFIX, cmd::SET_CONTRAST, value]
}

/// Display on/off command
pub const fn display_power(on: bool) -> [u8; 2] {
    [
        CMD_PREFIX,
        if on { cmd::DISPLAY_ON } else { cmd::DISPLAY_OFF },
    ]
}

/// Normal/inverse video command
pub const fn inverse(inverted: bool) -> [u8; 2] {
    [
        CMD_PREFIX,
        if inverted {
            cmd::SET_INVERSE
        } else {
            cmd::SET_NORMAL
        },
    ]
}
