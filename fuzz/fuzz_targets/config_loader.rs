#![no_main]

use std::io::Write;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&selector, body)) = data.split_first() else {
        return;
    };
    let suffix = match selector % 4 {
        0 => ".toml",
        1 => ".json",
        2 => ".yaml",
        _ => "",
    };
    let Ok(mut file) = tempfile::Builder::new().suffix(suffix).tempfile() else {
        return;
    };
    if file.write_all(body).is_err() {
        return;
    }
    let _ = webstress::fuzzing::load_config_file_input(file.path());
});
