//! Error types for both directions of transcoding.

use bstr::BStr;
use thiserror::Error;

use crate::consts::sequence_len;

/// Broad cause of a transcoding failure.
///
/// Hosts can use this to decide between rejecting the input outright and
/// retrying with [`DecodeOptions::lenient`](crate::DecodeOptions::lenient),
/// which only suppresses [`ErrorClass::Policy`] failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorClass {
    /// The input ended in the middle of a sequence.
    Structural,
    /// A byte or code unit does not fit the format grammar.
    Malformed,
    /// The input is decodable but not in canonical form.
    Policy,
    /// The value lies outside the Unicode code point range.
    Range,
}

/// Error returned by [`encode`](crate::encode) and friends.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{kind} at code unit {index}")]
pub struct EncodingError {
    pub(crate) kind: EncodingErrorKind,
    pub(crate) index: usize,
}

impl EncodingError {
    pub(crate) fn new(kind: EncodingErrorKind, index: usize) -> Self {
        Self { kind, index }
    }

    /// What went wrong.
    #[must_use]
    pub fn kind(&self) -> EncodingErrorKind {
        self.kind
    }

    /// Index of the code unit that starts the rejected character.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// The reason an encoding failed.
pub enum EncodingErrorKind {
    /// A high surrogate was the last code unit of the input.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// A high surrogate was followed by something other than a low surrogate,
    /// or a low surrogate appeared on its own. Carries the unit that broke
    /// the pair.
    #[error("invalid surrogate pair: unexpected code unit 0x{0:04X}")]
    InvalidSurrogatePair(u16),
    /// The code point is above U+10FFFF.
    #[error("code point 0x{0:X} is out of range")]
    CodePointOutOfRange(u32),
}

impl EncodingErrorKind {
    /// Groups the kind by cause.
    #[must_use]
    pub fn class(self) -> ErrorClass {
        match self {
            Self::UnexpectedEndOfInput => ErrorClass::Structural,
            Self::InvalidSurrogatePair(_) => ErrorClass::Malformed,
            Self::CodePointOutOfRange(_) => ErrorClass::Range,
        }
    }
}

/// Error returned by [`decode`](crate::decode) and friends.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{kind} at byte {offset}")]
pub struct DecodingError {
    pub(crate) kind: DecodingErrorKind,
    pub(crate) offset: usize,
}

impl DecodingError {
    pub(crate) fn new(kind: DecodingErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    /// What went wrong.
    #[must_use]
    pub fn kind(&self) -> DecodingErrorKind {
        self.kind
    }

    /// Offset of the leading byte of the rejected sequence.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The bytes of `input` that make up the rejected sequence, for
    /// diagnostics. `input` must be the buffer the error came from.
    ///
    /// ```rust
    /// let input = b"ok \xE0\x9F\xBF";
    /// let err = utf8conv::decode(input).unwrap_err();
    /// assert_eq!(format!("{:?}", err.sequence(input)), r#""\xE0\x9F\xBF""#);
    /// ```
    #[must_use]
    pub fn sequence<'a>(&self, input: &'a [u8]) -> &'a BStr {
        let start = self.offset.min(input.len());
        let len = match self.kind {
            DecodingErrorKind::InvalidLeadingByte(_) => 1,
            _ => input.get(start).copied().and_then(sequence_len).unwrap_or(1),
        };
        let end = start.saturating_add(len).min(input.len());
        BStr::new(&input[start..end])
    }
}

/// The reason a decoding failed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecodingErrorKind {
    /// The input ended before the sequence announced by its leading byte.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// A continuation byte or `11111xxx` byte where a sequence should start.
    #[error("invalid leading byte 0x{0:02X}")]
    InvalidLeadingByte(u8),
    /// A byte inside a sequence that does not match `10xxxxxx`.
    #[error("invalid continuation byte 0x{0:02X}")]
    InvalidContinuationByte(u8),
    /// An overlong encoding of the carried code point.
    #[error("overlong encoding of U+{0:04X}")]
    NonCanonicalEncoding(u32),
    /// A UTF-16 surrogate encoded directly.
    #[error("encoded surrogate U+{0:04X}")]
    ReservedCodePoint(u32),
    /// A four-byte sequence whose value is above U+10FFFF.
    #[error("code point 0x{0:X} is out of range")]
    CodePointOutOfRange(u32),
}

impl DecodingErrorKind {
    /// Groups the kind by cause.
    #[must_use]
    pub fn class(self) -> ErrorClass {
        match self {
            Self::UnexpectedEndOfInput => ErrorClass::Structural,
            Self::InvalidLeadingByte(_) | Self::InvalidContinuationByte(_) => {
                ErrorClass::Malformed
            }
            Self::NonCanonicalEncoding(_) | Self::ReservedCodePoint(_) => ErrorClass::Policy,
            Self::CodePointOutOfRange(_) => ErrorClass::Range,
        }
    }
}
