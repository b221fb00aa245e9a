/// Configuration options for [`decode_with`](crate::decode_with) and the other
/// decoding entry points.
///
/// # Examples
///
/// ```rust
/// use utf8conv::{DecodeOptions, decode_with};
///
/// // U+0000 written as the overlong pair C0 80, as some producers do.
/// let units = decode_with(b"a\xC0\x80b", DecodeOptions { strict: false }).unwrap();
/// assert_eq!(units, [0x61, 0x00, 0x62]);
/// ```
///
/// # Default
///
/// Strict decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecodeOptions {
    /// Whether to reject non-canonical input.
    ///
    /// When `true`, overlong encodings fail with
    /// [`NonCanonicalEncoding`](crate::DecodingErrorKind::NonCanonicalEncoding)
    /// and directly encoded surrogates (U+D800 to U+DFFF) fail with
    /// [`ReservedCodePoint`](crate::DecodingErrorKind::ReservedCodePoint).
    ///
    /// When `false`, both are decoded by their numeric value. An encoded
    /// surrogate becomes a lone surrogate code unit in the output, so the
    /// result may not be well-formed UTF-16. Values above U+10FFFF are
    /// rejected either way.
    ///
    /// # Default
    ///
    /// `true`
    pub strict: bool,
}

impl DecodeOptions {
    /// Strict decoding.
    #[must_use]
    pub const fn new() -> Self {
        Self { strict: true }
    }

    /// Decoding that accepts overlong forms and encoded surrogates.
    #[must_use]
    pub const fn lenient() -> Self {
        Self { strict: false }
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self::new()
    }
}
