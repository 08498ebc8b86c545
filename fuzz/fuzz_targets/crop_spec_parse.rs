//! Fuzz target for crop spec parsing and resolution.
//!
//! This fuzzer feeds arbitrary strings to the crop spec parser and resolves
//! whatever parses, checking for panics (including arithmetic overflow).

#![no_main]

use croppan::crop::{CropSpec, ImageExtent};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(spec) = CropSpec::parse(text) {
        let _ = spec.resolve(ImageExtent::new(4000, 3000));
        let _ = spec.resolve(ImageExtent::unknown());
    }
});
