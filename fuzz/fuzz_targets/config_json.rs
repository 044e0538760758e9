#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(config) = webstress::fuzzing::apply_config_from_json(data) {
        debug_assert!(config.concurrency >= 1);
        debug_assert!(!config.timeout.is_zero());
        debug_assert!(!config.host.is_empty());
    }
});
