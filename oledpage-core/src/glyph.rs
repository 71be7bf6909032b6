//! Glyph lookup
//!
//! Text is drawn from 8x8 glyphs stored column-major: byte `i` is column `i`,
//! bit `b` of that byte is row `b` (bit 0 at the top), which is exactly the
//! layout of one page segment.

/// Columns per glyph; every character advances the cursor by this much
pub const GLYPH_WIDTH: usize = 8;

/// One 8x8 glyph, column-major
pub type Glyph = [u8; GLYPH_WIDTH];

/// Maps characters to glyphs
pub trait GlyphSource {
    /// Glyph for `ch`; sources pick their own fallback for unknown characters
    fn glyph(&self, ch: char) -> Glyph;
}

impl<T: GlyphSource + ?Sized> GlyphSource for &T {
    fn glyph(&self, ch: char) -> Glyph {
        T::glyph(self, ch)
    }
}

/// Turn a row-major glyph (byte per row, bit 0 leftmost) into column-major
pub const fn transpose(rows: [u8; 8]) -> Glyph {
    let mut columns = [0u8; GLYPH_WIDTH];
    let mut row = 0;
    while row < 8 {
        let mut col = 0;
        while col < GLYPH_WIDTH {
            if (rows[row] >> col) & 1 == 1 {
                columns[col] |= 1 << row;
            }
            col += 1;
        }
        row += 1;
    }
    columns
}

/// Basic Latin glyphs from the `font8x8` crate
///
/// Characters outside U+0000..U+007F render as `?`.
#[cfg(feature = "font8x8")]
#[derive(Debug, Clone, Copy, Default)]
pub struct Font8x8;

#[cfg(feature = "font8x8")]
impl GlyphSource for Font8x8 {
    fn glyph(&self, ch: char) -> Glyph {
        use font8x8::{UnicodeFonts, BASIC_FONTS};

        let rows = BASIC_FONTS
            .get(ch)
            .or_else(|| BASIC_FONTS.get('?'))
            .unwrap_or([0; 8]);
        transpose(rows)
    }
}
