#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&split, body)) = data.split_first() else {
        return;
    };
    let chunk_len = usize::from(split).max(1);
    let (complete, bytes_read, status_line) =
        webstress::fuzzing::scan_response_head_input(body.chunks(chunk_len));
    debug_assert!(bytes_read <= body.len() as u64);
    let whole = webstress::fuzzing::scan_response_head_input([body]);
    if whole.0 {
        debug_assert!(complete);
    }
    debug_assert!(!status_line.contains('\n'));
});
