//! UTF-8 to UTF-16.

use alloc::string::String;
use alloc::vec::Vec;
use core::iter::FusedIterator;

use crate::consts::{
    MAX_CODE_POINT, MIN_FOR_LEN, SUPPLEMENTARY_START, SURROGATES, is_continuation, sequence_len,
    split_surrogates,
};
use crate::error::{DecodingError, DecodingErrorKind};
use crate::options::DecodeOptions;

/// Payload bits of a leading byte, indexed by `len - 1`.
const LEAD_MASK: [u8; 4] = [0x7F, 0x1F, 0x0F, 0x07];

/// Iterator over the code points of a UTF-8 byte sequence.
///
/// Yields one code point per sequence. The first invalid sequence produces an
/// error and ends the iteration.
///
/// ```rust
/// use utf8conv::{DecodeOptions, Utf8CodePoints};
///
/// let mut cps = Utf8CodePoints::new(b"a\xF0\x9D\x84\x9E\xFF", DecodeOptions::new());
/// assert_eq!(cps.next(), Some(Ok(0x61)));
/// assert_eq!(cps.next(), Some(Ok(0x1D11E)));
/// assert_eq!(cps.next().unwrap().unwrap_err().offset(), 5);
/// assert_eq!(cps.next(), None);
/// ```
#[derive(Debug, Clone)]
pub struct Utf8CodePoints<'a> {
    bytes: &'a [u8],
    offset: usize,
    options: DecodeOptions,
    failed: bool,
}

impl<'a> Utf8CodePoints<'a> {
    /// Creates an iterator over `bytes`.
    #[must_use]
    pub fn new(bytes: &'a [u8], options: DecodeOptions) -> Self {
        Self {
            bytes,
            offset: 0,
            options,
            failed: false,
        }
    }

    /// Offset of the next byte to be read.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn read(&mut self) -> Option<Result<u32, DecodingErrorKind>> {
        let bytes = self.bytes;
        let rest = &bytes[self.offset..];
        let &lead = rest.first()?;

        let Some(len) = sequence_len(lead) else {
            self.offset += 1;
            return Some(Err(DecodingErrorKind::InvalidLeadingByte(lead)));
        };
        let Some(seq) = rest.get(..len) else {
            self.offset = bytes.len();
            return Some(Err(DecodingErrorKind::UnexpectedEndOfInput));
        };
        self.offset += len;

        let mut cp = u32::from(lead & LEAD_MASK[len - 1]);
        for &byte in &seq[1..] {
            if !is_continuation(byte) {
                return Some(Err(DecodingErrorKind::InvalidContinuationByte(byte)));
            }
            cp = (cp << 6) | u32::from(byte & 0x3F);
        }

        let overlong = cp < MIN_FOR_LEN[len - 1];
        let surrogate = SURROGATES.contains(&cp);
        if self.options.strict {
            if overlong {
                return Some(Err(DecodingErrorKind::NonCanonicalEncoding(cp)));
            }
            if surrogate {
                return Some(Err(DecodingErrorKind::ReservedCodePoint(cp)));
            }
        } else if overlong || surrogate {
            log::debug!(
                "accepting non-canonical sequence for U+{cp:04X} at byte {}",
                self.offset - len
            );
        }

        if cp > MAX_CODE_POINT {
            return Some(Err(DecodingErrorKind::CodePointOutOfRange(cp)));
        }
        Some(Ok(cp))
    }
}

impl Iterator for Utf8CodePoints<'_> {
    type Item = Result<u32, DecodingError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let start = self.offset;
        match self.read()? {
            Ok(cp) => Some(Ok(cp)),
            Err(kind) => {
                self.failed = true;
                log::trace!("rejecting UTF-8 input at byte {start}: {kind}");
                Some(Err(DecodingError::new(kind, start)))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        let remaining = self.bytes.len() - self.offset;
        // An error ends the iteration, so only one item is guaranteed.
        (usize::from(remaining > 0), Some(remaining))
    }
}

impl FusedIterator for Utf8CodePoints<'_> {}

#[inline]
#[allow(clippy::cast_possible_truncation)]
fn push_utf16(code_point: u32, out: &mut Vec<u16>) {
    if code_point < SUPPLEMENTARY_START {
        out.push(code_point as u16);
    } else {
        let (high, low) = split_surrogates(code_point);
        out.extend_from_slice(&[high, low]);
    }
}

/// Decodes strict UTF-8 into UTF-16 code units.
///
/// Equivalent to [`decode_with`] with [`DecodeOptions::new`].
///
/// # Errors
///
/// Returns a [`DecodingError`] for the first sequence that is truncated,
/// malformed, overlong, an encoded surrogate, or above U+10FFFF.
///
/// ```rust
/// use utf8conv::DecodingErrorKind;
///
/// assert_eq!(utf8conv::decode(&[0xF0, 0x90, 0x80, 0x80]).unwrap(), [0xD800, 0xDC00]);
/// assert_eq!(
///     utf8conv::decode(&[0xE0, 0xA0]).unwrap_err().kind(),
///     DecodingErrorKind::UnexpectedEndOfInput,
/// );
/// ```
pub fn decode(input: &[u8]) -> Result<Vec<u16>, DecodingError> {
    decode_with(input, DecodeOptions::new())
}

/// Decodes UTF-8 into UTF-16 code units with the given options.
///
/// The returned buffer is allocated to exactly the decoded length: the input
/// is validated and measured first, then written.
///
/// # Errors
///
/// See [`decode`]. With `strict: false`, overlong encodings and encoded
/// surrogates are accepted instead of reported.
pub fn decode_with(input: &[u8], options: DecodeOptions) -> Result<Vec<u16>, DecodingError> {
    let len = decoded_len(input, options)?;
    let mut out = Vec::with_capacity(len);
    decode_into(input, &mut out, options)?;
    debug_assert_eq!(out.len(), len);
    Ok(out)
}

/// Appends the UTF-16 decoding of `input` to `out`, returning the number of
/// code units written.
///
/// # Errors
///
/// See [`decode_with`]. `out` is truncated back to its original length, so
/// nothing from a failed call is kept.
pub fn decode_into(
    input: &[u8],
    out: &mut Vec<u16>,
    options: DecodeOptions,
) -> Result<usize, DecodingError> {
    let start = out.len();
    // Three bytes is the most any single code unit can take.
    out.reserve(input.len() / 3);

    for next in Utf8CodePoints::new(input, options) {
        match next {
            Ok(cp) => push_utf16(cp, out),
            Err(err) => {
                out.truncate(start);
                return Err(err);
            }
        }
    }
    Ok(out.len() - start)
}

/// Computes the exact number of UTF-16 code units `input` decodes to, without
/// allocating.
///
/// # Errors
///
/// Fails exactly when [`decode_with`] fails, with the same error.
pub fn decoded_len(input: &[u8], options: DecodeOptions) -> Result<usize, DecodingError> {
    Utf8CodePoints::new(input, options).try_fold(0usize, |len, next| {
        let cp = next?;
        Ok(len + if cp < SUPPLEMENTARY_START { 1 } else { 2 })
    })
}

/// Decodes strict UTF-8 into a [`String`].
///
/// Strict decoding only yields Unicode scalar values, so the result is always
/// well-formed.
///
/// # Errors
///
/// See [`decode`].
pub fn decode_to_string(input: &[u8]) -> Result<String, DecodingError> {
    let mut out = String::with_capacity(input.len());
    for next in Utf8CodePoints::new(input, DecodeOptions::new()) {
        let cp = next?;
        let c = char::from_u32(cp);
        debug_assert!(c.is_some(), "strict decoding yielded non-scalar U+{cp:04X}");
        out.push(c.unwrap_or(char::REPLACEMENT_CHARACTER));
    }
    Ok(out)
}
