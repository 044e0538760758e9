#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let (host, path) = input.split_once('\n').unwrap_or((input, "/"));
        if let Ok(request) = webstress::fuzzing::build_request_input(host, path) {
            debug_assert!(request.ends_with(b"\r\n\r\n"));
            let head = &request[..request.len() - 4];
            debug_assert!(!head.windows(4).any(|window| window == b"\r\n\r\n"));
        }
    }
});
