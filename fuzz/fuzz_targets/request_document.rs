#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(request) = warden::request::parse_bytes(data) {
        debug_assert!(data.ends_with(&request.body));
        drop(request.validate_assertions());
    }
});
