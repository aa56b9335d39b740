#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let root = yamlite::load(s);
        let _ = root.at("a.0.b").as_int();
        let _ = yamlite::to_json_value(&root);
    }
});
