#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let input: String = data
        .iter()
        .take(32)
        .map(|byte| match byte % 12 {
            0..=9 => char::from(b'0' + (byte % 10)),
            10 => '-',
            _ => '+',
        })
        .collect();

    if let Ok(value) = webstress::fuzzing::parse_positive_usize_input(&input) {
        debug_assert!(value >= 1);
    }
});
