#![no_main]

use libfuzzer_sys::fuzz_target;
use warden::config::types::ConfigFile;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data)
        && let Ok(config) = toml::from_str::<ConfigFile>(input)
        && let Some(timeout) = config.connect_timeout.as_ref()
    {
        drop(timeout.to_duration());
    }
});
