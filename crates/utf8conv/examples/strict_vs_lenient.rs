//! Shows how a host can handle input from a producer that writes NUL as the
//! overlong pair `C0 80` (as Java's "modified UTF-8" does) while still
//! refusing anything structurally broken.
//!
//! Strict decoding is tried first. If it fails only for a policy reason
//! (overlong form or encoded surrogate) the frame is decoded again leniently
//! and flagged; any other failure rejects the frame.
//!
//! Run with
//!
//! ```bash
//! cargo run -p utf8conv --example strict_vs_lenient
//! ```

use utf8conv::{DecodeOptions, ErrorClass, decode, decode_with, encode};

fn main() {
    let units: Vec<u16> = "key\0value 𝄞".encode_utf16().collect();
    let canonical = encode(&units).expect("well-formed UTF-16");

    let frames: [(&str, Vec<u8>); 4] = [
        ("canonical", canonical),
        ("modified", b"key\xC0\x80value".to_vec()),
        ("truncated", b"key\xE2\x82".to_vec()),
        ("surrogate", b"\xED\xA0\xBD\xED\xB8\x80".to_vec()),
    ];

    for (name, frame) in &frames {
        match decode(frame) {
            Ok(units) => println!("{name:>10}: ok, {} code units", units.len()),
            Err(err) if err.kind().class() == ErrorClass::Policy => {
                let units = decode_with(frame, DecodeOptions::lenient())
                    .expect("policy errors are suppressed by lenient decoding");
                println!(
                    "{name:>10}: accepted leniently ({err}; sequence {:?}), {} code units",
                    err.sequence(frame),
                    units.len()
                );
            }
            Err(err) => println!("{name:>10}: rejected: {err}"),
        }
    }
}
