#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use utf8conv::{DecodeOptions, ErrorClass, decode, decode_with, encode};

/// Sequences that sit right on a validation edge: overlong forms, encoded
/// surrogates, values past U+10FFFF, truncated and stray bytes, and a few
/// canonical neighbours.
static EDGE_SEQUENCES: &[&[u8]] = &[
    b"\xC0\x80",
    b"\xC1\xBF",
    b"\xC2\x80",
    b"\xE0\x80\xAF",
    b"\xE0\x9F\xBF",
    b"\xE0\xA0\x80",
    b"\xED\x9F\xBF",
    b"\xED\xA0\x80",
    b"\xED\xBF\xBF",
    b"\xEE\x80\x80",
    b"\xF0\x8F\xBF\xBF",
    b"\xF0\x90\x80\x80",
    b"\xF4\x8F\xBF\xBF",
    b"\xF4\x90\x80\x80",
    b"\xF7\xBF\xBF\xBF",
    b"\xF0\x9D\x84",
    b"\xE2\x82",
    b"\x80",
    b"\xBF",
    b"\xF8",
    b"\xFF",
];

/// Splices an edge sequence into the input at a random position, or defers to
/// libFuzzer's own mutations.
fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    let mut rng = SmallRng::seed_from_u64(u64::from(seed));
    if rng.random_range(0..4) != 0 {
        return fuzzer_mutate(data, size, max_size);
    }

    let seq = EDGE_SEQUENCES[rng.random_range(0..EDGE_SEQUENCES.len())];
    if size + seq.len() > max_size {
        return fuzzer_mutate(data, size, max_size);
    }

    let pos = rng.random_range(0..=size);
    data.copy_within(pos..size, pos + seq.len());
    data[pos..pos + seq.len()].copy_from_slice(seq);
    size + seq.len()
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

fn check_decode(data: &[u8]) {
    let strict = decode(data);
    let lenient = decode_with(data, DecodeOptions::lenient());

    match (&strict, &lenient) {
        (Ok(strict), Ok(lenient)) => assert_eq!(strict, lenient),
        (Ok(_), Err(err)) => panic!("lenient decoding rejected strict-valid input: {err}"),
        (Err(err), Ok(_)) => assert_eq!(err.kind().class(), ErrorClass::Policy),
        (Err(strict), Err(lenient)) => {
            if strict.kind().class() == ErrorClass::Policy {
                assert!(lenient.offset() > strict.offset());
            } else {
                assert_eq!(strict, lenient);
            }
        }
    }

    // Strict UTF-8 is exactly what the standard library accepts, and its
    // encoding is unique.
    match (&strict, std::str::from_utf8(data)) {
        (Ok(units), Ok(text)) => {
            assert!(units.iter().copied().eq(text.encode_utf16()));
            assert_eq!(encode(units).unwrap(), data);
        }
        (Err(_), Err(_)) => {}
        (strict, from_std) => panic!("strict decode {strict:?} disagrees with std {from_std:?}"),
    }
}

fn check_encode(data: &[u8]) {
    let Ok(units) = Vec::<u16>::arbitrary(&mut Unstructured::new(data)) else {
        return;
    };
    match encode(&units) {
        Ok(bytes) => {
            assert_eq!(decode(&bytes).unwrap(), units);
            assert_eq!(String::from_utf16(&units).unwrap().as_bytes(), bytes);
        }
        Err(err) => {
            assert!(String::from_utf16(&units).is_err(), "{err}");
        }
    }
}

fuzz_target!(|data: &[u8]| {
    check_decode(data);
    check_encode(data);
});
