//! UTF-16 to UTF-8.

use alloc::vec::Vec;
use core::fmt;
use core::iter::FusedIterator;

use bstr::BStr;

use crate::consts::{HIGH_SURROGATES, LOW_SURROGATES, MAX_FOR_LEN, combine_surrogates};
use crate::error::{EncodingError, EncodingErrorKind};

/// Iterator over the code points of a UTF-16 string.
///
/// Surrogate pairs are combined into a single supplementary code point. A
/// high surrogate at the end of the input, a high surrogate followed by
/// anything but a low surrogate, and a low surrogate on its own each produce
/// one error, after which the iterator is exhausted.
///
/// ```rust
/// use utf8conv::CodePoints;
///
/// let cps: Result<Vec<u32>, _> = CodePoints::new(&[0x61, 0xD834, 0xDD1E]).collect();
/// assert_eq!(cps.unwrap(), [0x61, 0x1D11E]);
/// ```
#[derive(Debug, Clone)]
pub struct CodePoints<'a> {
    units: &'a [u16],
    index: usize,
    failed: bool,
}

impl<'a> CodePoints<'a> {
    /// Creates an iterator over `units`.
    #[must_use]
    pub fn new(units: &'a [u16]) -> Self {
        Self {
            units,
            index: 0,
            failed: false,
        }
    }

    /// Index of the next code unit to be read.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    fn read(&mut self) -> Option<Result<u32, EncodingErrorKind>> {
        let unit = *self.units.get(self.index)?;
        self.index += 1;

        if LOW_SURROGATES.contains(&unit) {
            return Some(Err(EncodingErrorKind::InvalidSurrogatePair(unit)));
        }
        if !HIGH_SURROGATES.contains(&unit) {
            return Some(Ok(u32::from(unit)));
        }

        let Some(&low) = self.units.get(self.index) else {
            return Some(Err(EncodingErrorKind::UnexpectedEndOfInput));
        };
        self.index += 1;
        if !LOW_SURROGATES.contains(&low) {
            return Some(Err(EncodingErrorKind::InvalidSurrogatePair(low)));
        }
        Some(Ok(combine_surrogates(unit, low)))
    }
}

impl Iterator for CodePoints<'_> {
    type Item = Result<u32, EncodingError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let start = self.index;
        match self.read()? {
            Ok(cp) => Some(Ok(cp)),
            Err(kind) => {
                self.failed = true;
                log::trace!("rejecting UTF-16 input at code unit {start}: {kind}");
                Some(Err(EncodingError::new(kind, start)))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        let remaining = self.units.len() - self.index;
        // An error ends the iteration, so only one item is guaranteed.
        (usize::from(remaining > 0), Some(remaining))
    }
}

impl FusedIterator for CodePoints<'_> {}

/// The UTF-8 encoding of one code point, held inline.
///
/// Like [`char::encode_utf8`], but for any value up to U+10FFFF, surrogates
/// included. Encoding a surrogate yields the three-byte form that strict
/// decoding rejects and lenient decoding accepts.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Utf8Sequence {
    bytes: [u8; 4],
    len: u8,
}

impl Utf8Sequence {
    /// Encodes `code_point` in the shortest form.
    ///
    /// # Errors
    ///
    /// [`EncodingErrorKind::CodePointOutOfRange`] if `code_point` is above
    /// U+10FFFF.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_code_point(code_point: u32) -> Result<Self, EncodingErrorKind> {
        let cp = code_point;
        let (bytes, len) = if cp <= MAX_FOR_LEN[0] {
            // 0xxx xxxx
            ([cp as u8, 0, 0, 0], 1)
        } else if cp <= MAX_FOR_LEN[1] {
            // 110x xxxx  10xx xxxx
            ([0xC0 | (cp >> 6) as u8, continuation(cp), 0, 0], 2)
        } else if cp <= MAX_FOR_LEN[2] {
            // 1110 xxxx  10xx xxxx  10xx xxxx
            (
                [
                    0xE0 | (cp >> 12) as u8,
                    continuation(cp >> 6),
                    continuation(cp),
                    0,
                ],
                3,
            )
        } else if cp <= MAX_FOR_LEN[3] {
            // 1111 0xxx  10xx xxxx  10xx xxxx  10xx xxxx
            (
                [
                    0xF0 | (cp >> 18) as u8,
                    continuation(cp >> 12),
                    continuation(cp >> 6),
                    continuation(cp),
                ],
                4,
            )
        } else {
            return Err(EncodingErrorKind::CodePointOutOfRange(cp));
        };
        Ok(Self { bytes, len })
    }

    /// The encoded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..usize::from(self.len)]
    }

    /// Number of encoded bytes, 1 to 4.
    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.len)
    }

    /// Always `false`; present for symmetry with [`len`](Self::len).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Debug for Utf8Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Utf8Sequence")
            .field(&BStr::new(self.as_bytes()))
            .finish()
    }
}

impl AsRef<[u8]> for Utf8Sequence {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

#[inline]
#[allow(clippy::cast_possible_truncation)]
fn continuation(bits: u32) -> u8 {
    0x80 | (bits & 0x3F) as u8
}

/// Number of bytes needed for `code_point`, if it is in range.
#[inline]
fn utf8_len(code_point: u32) -> Option<usize> {
    MAX_FOR_LEN
        .iter()
        .position(|&max| code_point <= max)
        .map(|i| i + 1)
}

/// Encodes a UTF-16 string as UTF-8.
///
/// The returned buffer is allocated to exactly the encoded length: the input
/// is validated and measured first, then written.
///
/// # Errors
///
/// Returns an [`EncodingError`] for an unpaired surrogate. Nothing is
/// allocated in that case.
///
/// ```rust
/// assert_eq!(utf8conv::encode(&[0x80]).unwrap(), [0xC2, 0x80]);
/// assert_eq!(utf8conv::encode(&[0xDBFF, 0xDFFF]).unwrap(), [0xF4, 0x8F, 0xBF, 0xBF]);
/// ```
pub fn encode(input: &[u16]) -> Result<Vec<u8>, EncodingError> {
    let len = encoded_len(input)?;
    let mut out = Vec::with_capacity(len);
    encode_into(input, &mut out)?;
    debug_assert_eq!(out.len(), len);
    Ok(out)
}

/// Appends the UTF-8 encoding of `input` to `out`, returning the number of
/// bytes written.
///
/// # Errors
///
/// Returns an [`EncodingError`] for an unpaired surrogate. `out` is truncated
/// back to its original length, so nothing from a failed call is kept.
pub fn encode_into(input: &[u16], out: &mut Vec<u8>) -> Result<usize, EncodingError> {
    let start = out.len();
    // Every code unit produces at least one byte.
    out.reserve(input.len());

    let mut units = CodePoints::new(input);
    while let Some(next) = units.next() {
        let encoded = next.and_then(|cp| {
            Utf8Sequence::from_code_point(cp).map_err(|kind| {
                // Surrogate pairs top out at U+10FFFF, so this is defensive.
                EncodingError::new(kind, units.index().saturating_sub(2))
            })
        });
        match encoded {
            Ok(seq) => out.extend_from_slice(seq.as_bytes()),
            Err(err) => {
                out.truncate(start);
                return Err(err);
            }
        }
    }
    Ok(out.len() - start)
}

/// Computes the exact length of the UTF-8 encoding of `input` without
/// allocating.
///
/// # Errors
///
/// Fails exactly when [`encode`] fails, with the same error.
pub fn encoded_len(input: &[u16]) -> Result<usize, EncodingError> {
    let mut units = CodePoints::new(input);
    let mut len = 0usize;
    while let Some(next) = units.next() {
        let cp = next?;
        len += utf8_len(cp).ok_or_else(|| {
            EncodingError::new(
                EncodingErrorKind::CodePointOutOfRange(cp),
                units.index().saturating_sub(2),
            )
        })?;
    }
    Ok(len)
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::MAX_CODE_POINT;

    #[test]
    fn sequence_lengths_follow_ranges() {
        for (cp, len) in [
            (0, 1),
            (0x7F, 1),
            (0x80, 2),
            (0x7FF, 2),
            (0x800, 3),
            (0xD7FF, 3),
            (0xD800, 3),
            (0xFFFF, 3),
            (0x1_0000, 4),
            (MAX_CODE_POINT, 4),
        ] {
            let seq = Utf8Sequence::from_code_point(cp).unwrap();
            assert_eq!(seq.len(), len, "U+{cp:04X}");
            assert_eq!(utf8_len(cp), Some(len));
        }
    }

    #[test]
    fn sequence_matches_char_encoding() {
        let mut buf = [0; 4];
        for c in ['\0', 'a', '\u{7F}', 'é', 'ß', '\u{7FF}', '€', '\u{FFFF}', '𝄞', '\u{10FFFF}'] {
            let seq = Utf8Sequence::from_code_point(u32::from(c)).unwrap();
            assert_eq!(seq.as_bytes(), c.encode_utf8(&mut buf).as_bytes());
        }
    }

    #[test]
    fn surrogate_values_use_three_bytes() {
        let seq = Utf8Sequence::from_code_point(0xD800).unwrap();
        assert_eq!(seq.as_bytes(), [0xED, 0xA0, 0x80]);
    }

    #[test]
    fn out_of_range_code_point() {
        assert_eq!(
            Utf8Sequence::from_code_point(MAX_CODE_POINT + 1),
            Err(EncodingErrorKind::CodePointOutOfRange(0x11_0000))
        );
        assert_eq!(utf8_len(u32::MAX), None);
    }

    #[test]
    fn code_points_fuse_after_error() {
        let mut iter = CodePoints::new(&[0x61, 0xDC00, 0x62]);
        assert_eq!(iter.next(), Some(Ok(0x61)));
        assert_eq!(
            iter.next(),
            Some(Err(EncodingError::new(
                EncodingErrorKind::InvalidSurrogatePair(0xDC00),
                1
            )))
        );
        assert_eq!(iter.next(), None);
        assert_eq!(iter.size_hint(), (0, Some(0)));
    }

    #[test]
    fn size_hint_lower_bound_holds_on_early_error() {
        let inputs: [&[u16]; 3] = [&[0xDC00, 0x41, 0x41, 0x41], &[0xD800, 0x41, 0x41, 0x41], &[]];
        for units in inputs {
            let iter = CodePoints::new(units);
            let (lower, upper) = iter.size_hint();
            let count = iter.count();
            assert!(lower <= count, "{lower} > {count} for {units:04X?}");
            assert!(upper.is_some_and(|upper| count <= upper));
        }
    }

    #[test]
    fn encode_into_appends() {
        let mut out = vec![b'>'];
        let written = encode_into(&[0x68, 0x69, 0xE9], &mut out).unwrap();
        assert_eq!(written, 4);
        assert_eq!(out, b">hi\xC3\xA9");
    }

    #[test]
    fn encode_into_rolls_back_on_error() {
        let mut out = vec![1, 2, 3];
        let err = encode_into(&[0x41, 0x42, 0xD800], &mut out).unwrap_err();
        assert_eq!(err.kind(), EncodingErrorKind::UnexpectedEndOfInput);
        assert_eq!(err.index(), 2);
        assert_eq!(out, [1, 2, 3]);
    }

    #[test]
    fn encode_is_exactly_sized() {
        let units: Vec<u16> = "añ€𝄞".encode_utf16().collect();
        let out = encode(&units).unwrap();
        assert_eq!(out.len(), 1 + 2 + 3 + 4);
        assert_eq!(out.capacity(), out.len());
        assert_eq!(encoded_len(&units), Ok(10));
    }
}
