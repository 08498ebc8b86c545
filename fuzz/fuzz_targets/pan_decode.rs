//! Fuzz target for pan spec decoding.
//!
//! This fuzzer feeds arbitrary UTF-8 documents to the pan spec decoder,
//! as JSON and as YAML, checking for panics, crashes, or hangs.

#![no_main]

use croppan::pan::load::fuzz_decode_pans;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let _ = fuzz_decode_pans(text, false);
    let _ = fuzz_decode_pans(text, true);
});
