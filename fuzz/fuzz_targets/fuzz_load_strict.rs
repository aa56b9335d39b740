#![no_main]
use libfuzzer_sys::fuzz_target;
use yamlite::{Error, Options, load_with_options};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        match load_with_options(s, &Options::strict()) {
            Ok(_) => {}
            Err(Error::Syntax { line, column, .. }) => {
                assert!(line >= 1 && column >= 1, "positions are 1-based");
            }
            Err(e) => panic!("unexpected error kind from in-memory input: {e}"),
        }
    }
});
