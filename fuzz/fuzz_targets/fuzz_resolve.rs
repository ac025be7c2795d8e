#![no_main]
use libfuzzer_sys::fuzz_target;
use sitemorse_panel::{resolve_audit_url, PageContext};

/// Fuzz URL resolution.
///
/// Splits the input into url/path/mount on newlines; hosts report these as
/// free-form strings, so the resolver must hold up under any combination.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let mut parts = s.splitn(3, '\n');
        let url = parts.next().unwrap_or("");
        let path = parts.next().unwrap_or("");
        let mount = parts.next().unwrap_or("");
        let page = PageContext {
            url: url.to_string(),
            path: path.to_string(),
        };
        let _ = resolve_audit_url(&page, mount);
    }
});
