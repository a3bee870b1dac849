#![no_main]

use libfuzzer_sys::fuzz_target;
use vitrine::source::normalize_asset_path;

fuzz_target!(|data: &[u8]| {
    if let Ok(path) = std::str::from_utf8(data) {
        if let Ok(normalized) = normalize_asset_path(path) {
            assert!(!normalized.split('/').any(|s| s == ".." || s.is_empty()));
            assert!(!normalized.starts_with('/'));
        }
    }
});
