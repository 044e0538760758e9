#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(value) = webstress::fuzzing::parse_seconds_input(input) {
            let _ = value.as_secs_f64();
        }
    }
});
