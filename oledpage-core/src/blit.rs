//! Bit-level passes for writing into paged memory
//!
//! A source byte drawn at a vertical offset `o` inside a page lands in two
//! destination bytes: its low `8 - o` bits shift up into the current page
//! ([`low_pass`]), its high `o` bits carry down into the next page
//! ([`high_pass`]). Both passes OR into the destination so bits outside the
//! source's footprint survive.

/// OR `src` into `dst` shifted towards the bottom of the page by `offset` rows
#[inline]
pub const fn low_pass(src: u8, offset: u8, dst: u8) -> u8 {
    if offset >= 8 {
        return dst;
    }
    dst | (src << offset)
}

/// OR the bits of `src` that fall past the page boundary into `dst`
///
/// `dst` is the byte of the following page. With `offset == 0` nothing carries.
#[inline]
pub const fn high_pass(src: u8, offset: u8, dst: u8) -> u8 {
    if offset == 0 || offset >= 8 {
        return dst;
    }
    dst | (src >> (8 - offset))
}

/// Replace the bits of `dst` selected by `mask` with those of `src`
#[inline]
pub const fn masked_overwrite(src: u8, mask: u8, dst: u8) -> u8 {
    (dst & !mask) | (src & mask)
}

/// Mask of the lowest `rows` bits
#[inline]
pub const fn row_mask(rows: usize) -> u8 {
    if rows >= 8 {
        0xFF
    } else {
        ((1u16 << rows) - 1) as u8
    }
}

/// Mask of bits `first..=last` (row indices inside one page)
#[inline]
pub const fn span_mask(first: u8, last: u8) -> u8 {
    if first > last || first >= 8 {
        return 0;
    }
    let last = if last > 7 { 7 } else { last };
    row_mask(last as usize + 1) & !row_mask(first as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_pass_keeps_rows_above_offset() {
        // rows 0..3 already lit must survive a glyph drawn at offset 4
        assert_eq!(low_pass(0xFF, 4, 0x0F), 0xFF);
        assert_eq!(low_pass(0x01, 4, 0x00), 0x10);
        assert_eq!(low_pass(0x81, 3, 0x00), 0x08);
        assert_eq!(low_pass(0xAA, 0, 0x00), 0xAA);
    }

    #[test]
    fn test_high_pass_carries_top_bits() {
        assert_eq!(high_pass(0xF0, 4, 0x00), 0x0F);
        assert_eq!(high_pass(0x80, 1, 0x00), 0x01);
        assert_eq!(high_pass(0x7F, 1, 0x00), 0x00);
        assert_eq!(high_pass(0xFF, 0, 0x12), 0x12);
        assert_eq!(high_pass(0xC0, 2, 0xF0), 0xF3);
    }

    #[test]
    fn test_passes_split_every_bit_once() {
        for src in 0..=255u8 {
            for offset in 1..8u8 {
                let low = low_pass(src, offset, 0);
                let high = high_pass(src, offset, 0);
                let rejoined = (u16::from(high) << 8 | u16::from(low)) >> offset;
                assert_eq!(rejoined as u8, src);
            }
        }
    }

    #[test]
    fn test_masked_overwrite() {
        assert_eq!(masked_overwrite(0x00, 0x0F, 0xFF), 0xF0);
        assert_eq!(masked_overwrite(0xAA, 0xFF, 0x55), 0xAA);
        assert_eq!(masked_overwrite(0xFF, 0x00, 0x12), 0x12);
    }

    #[test]
    fn test_masks() {
        assert_eq!(row_mask(0), 0x00);
        assert_eq!(row_mask(3), 0x07);
        assert_eq!(row_mask(8), 0xFF);
        assert_eq!(row_mask(40), 0xFF);
        assert_eq!(span_mask(0, 7), 0xFF);
        assert_eq!(span_mask(2, 4), 0x1C);
        assert_eq!(span_mask(5, 5), 0x20);
        assert_eq!(span_mask(4, 2), 0x00);
    }
}
