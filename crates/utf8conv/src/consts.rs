//! Code point ranges shared by the encoder and the decoder.

use core::ops::RangeInclusive;

/// The largest Unicode code point, U+10FFFF.
pub const MAX_CODE_POINT: u32 = 0x10_FFFF;

pub(crate) const HIGH_SURROGATES: RangeInclusive<u16> = 0xD800..=0xDBFF;
pub(crate) const LOW_SURROGATES: RangeInclusive<u16> = 0xDC00..=0xDFFF;
pub(crate) const SURROGATES: RangeInclusive<u32> = 0xD800..=0xDFFF;

/// First code point that needs a surrogate pair in UTF-16.
pub(crate) const SUPPLEMENTARY_START: u32 = 0x1_0000;

const HIGH_SURROGATE_START: u16 = 0xD800;
const LOW_SURROGATE_START: u16 = 0xDC00;

/// Largest code point representable by a UTF-8 sequence of a given length,
/// indexed by `len - 1`.
pub(crate) const MAX_FOR_LEN: [u32; 4] = [0x7F, 0x7FF, 0xFFFF, MAX_CODE_POINT];

/// Smallest code point whose canonical encoding has a given length, indexed by
/// `len - 1`. Anything below is overlong.
pub(crate) const MIN_FOR_LEN: [u32; 4] = [0, 0x80, 0x800, SUPPLEMENTARY_START];

/// Total length of the sequence introduced by `lead`, or `None` for a
/// continuation byte or a `11111xxx` byte.
#[inline]
pub(crate) fn sequence_len(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC0..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF7 => Some(4),
        _ => None,
    }
}

#[inline]
pub(crate) fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

#[inline]
pub(crate) fn combine_surrogates(high: u16, low: u16) -> u32 {
    debug_assert!(HIGH_SURROGATES.contains(&high) && LOW_SURROGATES.contains(&low));
    let high = u32::from(high - HIGH_SURROGATE_START);
    let low = u32::from(low - LOW_SURROGATE_START);
    ((high << 10) | low) + SUPPLEMENTARY_START
}

/// Splits a supplementary code point into its `(high, low)` surrogates.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn split_surrogates(code_point: u32) -> (u16, u16) {
    debug_assert!((SUPPLEMENTARY_START..=MAX_CODE_POINT).contains(&code_point));
    let offset = code_point - SUPPLEMENTARY_START;
    // Both halves fit in ten bits.
    let high = (offset >> 10) as u16 + HIGH_SURROGATE_START;
    let low = (offset & 0x3FF) as u16 + LOW_SURROGATE_START;
    (high, low)
}
