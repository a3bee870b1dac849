#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use vitrine::config::ConfigLoader;

fuzz_target!(|data: &[u8]| {
    if let Ok(yaml_str) = std::str::from_utf8(data) {
        let loader = ConfigLoader::with_defaults();
        let _ = loader.load_str(yaml_str, Path::new("fuzz.yaml"));
    }
});
