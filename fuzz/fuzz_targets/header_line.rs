#![no_main]

use libfuzzer_sys::fuzz_target;
use warden::request::Header;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let header = Header::new(input);
        debug_assert!(input.starts_with(header.name()));
        debug_assert!(!header.name().contains(':'));
        debug_assert_eq!(header.value(), header.value().trim_matches(' '));
    }
});
