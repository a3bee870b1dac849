#![no_main]

use libfuzzer_sys::fuzz_target;
use vitrine::config::SiteConfig;
use vitrine::loader::{Loaded, render_cards};
use vitrine::manifest::{CollectionKind, parse_illustrations, parse_works};
use vitrine::view::render_nodes;

fuzz_target!(|data: &[u8]| {
    let Ok(body) = std::str::from_utf8(data) else {
        return;
    };
    let config = SiteConfig::default();

    // Whatever parses must render without panicking.
    if let Ok(items) = parse_works(body) {
        let cards = render_cards(CollectionKind::Projects, &Loaded::Works(items), &config);
        let _ = render_nodes(&cards);
    }
    if let Ok(urls) = parse_illustrations(body) {
        let cards = render_cards(
            CollectionKind::Illustrations,
            &Loaded::Illustrations(urls),
            &config,
        );
        let _ = render_nodes(&cards);
    }
});
