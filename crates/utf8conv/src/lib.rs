//! Strict transcoding between UTF-16 code units and UTF-8 bytes.
//!
//! [`encode`] turns a `[u16]` string into UTF-8, reassembling surrogate pairs
//! along the way. [`decode`] goes the other direction and, by default, rejects
//! every sequence that is not the canonical RFC 3629 encoding of a scalar
//! value: overlong forms, directly encoded surrogates, and values above
//! U+10FFFF. [`decode_with`] takes [`DecodeOptions`] for hosts that have to
//! accept output from sloppy producers.
//!
//! Both directions work on complete in-memory buffers and never return a
//! partial result.
//!
//! ```rust
//! use utf8conv::{DecodeOptions, DecodingErrorKind, decode, decode_with, encode};
//!
//! let units: Vec<u16> = "G clef: 𝄞".encode_utf16().collect();
//! let bytes = encode(&units).unwrap();
//! assert_eq!(bytes, "G clef: 𝄞".as_bytes());
//! assert_eq!(decode(&bytes).unwrap(), units);
//!
//! // An overlong encoding of U+007F.
//! let err = decode(&[0xC1, 0xBF]).unwrap_err();
//! assert_eq!(err.kind(), DecodingErrorKind::NonCanonicalEncoding(0x7F));
//! assert_eq!(decode_with(&[0xC1, 0xBF], DecodeOptions::lenient()).unwrap(), [0x7F]);
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod consts;
mod decode;
mod encode;
mod error;
mod options;

#[cfg(test)]
mod tests;

pub use consts::MAX_CODE_POINT;
pub use decode::{
    Utf8CodePoints, decode, decode_into, decode_to_string, decode_with, decoded_len,
};
pub use encode::{CodePoints, Utf8Sequence, encode, encode_into, encoded_len};
pub use error::{DecodingError, DecodingErrorKind, EncodingError, EncodingErrorKind, ErrorClass};
pub use options::DecodeOptions;
