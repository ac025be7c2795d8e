#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the extension configuration decoder.
///
/// The host supplies the configuration as a JSON-encoded string; anything
/// an editor can be talked into storing ends up here.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = sitemorse_panel::PanelConfig::from_json(s);
    }
});
