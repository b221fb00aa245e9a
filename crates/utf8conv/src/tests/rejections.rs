use rstest::rstest;

use crate::{
    DecodeOptions, DecodingErrorKind as D, EncodingErrorKind as E, ErrorClass, decode,
    decode_with, encode,
};

#[rstest]
#[case::lone_high_then_ascii(&[0xD800, 0x68, 0x65, 0x6C, 0x6C, 0x6F], E::InvalidSurrogatePair(0x68), 0)]
#[case::lone_low_first(&[0xDFFF, 0x68, 0x65, 0x6C, 0x6C, 0x6F], E::InvalidSurrogatePair(0xDFFF), 0)]
#[case::high_then_high(&[0x61, 0xD800, 0xDBFF], E::InvalidSurrogatePair(0xDBFF), 1)]
#[case::reversed_pair(&[0xDC00, 0xD800], E::InvalidSurrogatePair(0xDC00), 0)]
#[case::low_after_pair(&[0xD834, 0xDD1E, 0xDD1E], E::InvalidSurrogatePair(0xDD1E), 2)]
#[case::high_at_end(&[0x61, 0x62, 0xDBFF], E::UnexpectedEndOfInput, 2)]
#[case::only_high(&[0xD800], E::UnexpectedEndOfInput, 0)]
fn encode_rejects(#[case] units: &[u16], #[case] kind: E, #[case] index: usize) {
    let err = encode(units).unwrap_err();
    assert_eq!(err.kind(), kind);
    assert_eq!(err.index(), index);
}

#[rstest]
#[case::two_byte_overlong(&[0xC1, 0xBF], D::NonCanonicalEncoding(0x7F), 0)]
#[case::two_byte_nul(&[0xC0, 0x80], D::NonCanonicalEncoding(0x00), 0)]
#[case::three_byte_overlong(&[0xE0, 0x9F, 0xBF], D::NonCanonicalEncoding(0x7FF), 0)]
#[case::four_byte_overlong(&[0xF0, 0x8F, 0xBF, 0xBF], D::NonCanonicalEncoding(0xFFFF), 0)]
#[case::encoded_high_surrogate(&[0xED, 0xA0, 0x80], D::ReservedCodePoint(0xD800), 0)]
#[case::encoded_low_surrogate(&[0xED, 0xBF, 0xBF], D::ReservedCodePoint(0xDFFF), 0)]
#[case::encoded_pair(&[0xED, 0xA0, 0xBD, 0xED, 0xB8, 0x80], D::ReservedCodePoint(0xD83D), 0)]
#[case::truncated_two_byte(&[0xCF], D::UnexpectedEndOfInput, 0)]
#[case::truncated_three_byte(&[0xE0, 0xA0], D::UnexpectedEndOfInput, 0)]
#[case::truncated_three_byte_high(&[0xEF, 0xBF], D::UnexpectedEndOfInput, 0)]
#[case::truncated_four_byte(&[0xF7, 0xBF, 0xBF], D::UnexpectedEndOfInput, 0)]
#[case::truncated_after_text(b"abc\xF0\x9F\x98", D::UnexpectedEndOfInput, 3)]
#[case::stray_continuation(&[0x61, 0x80], D::InvalidLeadingByte(0x80), 1)]
#[case::five_byte_lead(&[0xF8, 0x88, 0x80, 0x80, 0x80], D::InvalidLeadingByte(0xF8), 0)]
#[case::ff(&[0xFF], D::InvalidLeadingByte(0xFF), 0)]
#[case::ascii_continuation(&[0xC3, 0x28], D::InvalidContinuationByte(0x28), 0)]
#[case::late_continuation(&[0xE2, 0x82, 0x28], D::InvalidContinuationByte(0x28), 0)]
#[case::above_max(&[0xF4, 0x90, 0x80, 0x80], D::CodePointOutOfRange(0x11_0000), 0)]
fn decode_rejects(#[case] bytes: &[u8], #[case] kind: D, #[case] offset: usize) {
    let err = decode(bytes).unwrap_err();
    assert_eq!(err.kind(), kind);
    assert_eq!(err.offset(), offset);
}

#[rstest]
#[case::overlong(&[0xC1, 0xBF])]
#[case::surrogate(&[0xED, 0xA0, 0x80])]
fn lenient_only_suppresses_policy_errors(#[case] bytes: &[u8]) {
    let err = decode(bytes).unwrap_err();
    assert_eq!(err.kind().class(), ErrorClass::Policy);
    assert!(decode_with(bytes, DecodeOptions::lenient()).is_ok());
}

#[rstest]
#[case::truncated(&[0xE0, 0xA0], ErrorClass::Structural)]
#[case::bad_lead(&[0xBF], ErrorClass::Malformed)]
#[case::bad_continuation(&[0xC2, 0xC2], ErrorClass::Malformed)]
#[case::out_of_range(&[0xF5, 0x80, 0x80, 0x80], ErrorClass::Range)]
fn lenient_still_rejects(#[case] bytes: &[u8], #[case] class: ErrorClass) {
    let err = decode_with(bytes, DecodeOptions::lenient()).unwrap_err();
    assert_eq!(err.kind().class(), class);
}
