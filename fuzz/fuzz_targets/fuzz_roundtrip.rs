#![no_main]
use libfuzzer_sys::fuzz_target;
use yamlite::{load, to_json_value, to_string};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let first = load(input);
        if let Ok(written) = to_string(&first) {
            let second = load(&written);
            if to_json_value(&first) != to_json_value(&second) {
                panic!(
                    "roundtrip mismatch!\nInput: {}\nWritten: {}\nFirst: {}\nSecond: {}",
                    input,
                    written,
                    to_json_value(&first),
                    to_json_value(&second)
                );
            }
        }
    }
});
