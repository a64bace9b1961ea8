#![no_main]

use libfuzzer_sys::fuzz_target;
use warden::config::types::ConfigFile;

fuzz_target!(|data: &[u8]| {
    if let Ok(config) = serde_json::from_slice::<ConfigFile>(data)
        && let Some(timeout) = config.connect_timeout.as_ref()
    {
        drop(timeout.to_duration());
    }
});
