#![no_main]
use libfuzzer_sys::fuzz_target;

const MAX_WRAPPED_INPUT_LEN: usize = 10_000;

/// Fuzz the report decoder.
///
/// Feeds arbitrary UTF-8 strings to `AnalysisReport::from_json`, raw and
/// wrapped in the service's response envelope so the inputs also reach the
/// per-category diagnostic lists instead of failing at the top level.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = sitemorse_panel::AnalysisReport::from_json(s);

        if s.len() < MAX_WRAPPED_INPUT_LEN {
            let wrapped = format!(
                r#"{{"result":{{"priorities":{{"seo":{{"diagnostics":[{s}]}}}}}}}}"#,
            );
            let _ = sitemorse_panel::AnalysisReport::from_json(&wrapped);
        }
    }
});
