//! Property-based tests for URL resolution.
//!
//! Exercises the resolver over generated host/path/mount shapes and checks
//! the rewrite invariants hold for any input, not just the fixture pairs.

use proptest::prelude::*;
use sitemorse_panel::{ensure_https, resolve_audit_url, PageContext};

fn page(url: &str, path: &str) -> PageContext {
    PageContext {
        url: url.into(),
        path: path.into(),
    }
}

proptest! {
    // 500 cases balances coverage vs speed for these cheap string rewrites.
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn resolve_never_panics(
        url in "\\PC{0,200}",
        path in "\\PC{0,50}",
        mount in "\\PC{0,20}",
    ) {
        let _ = resolve_audit_url(&page(&url, &path), &mount);
    }

    #[test]
    fn root_resolution_is_literal_concatenation(
        host in "[a-z]{1,10}\\.example",
        mount in "[a-z]{0,8}",
    ) {
        prop_assume!(!host.contains("localhost"));
        let url = format!("https://{host}/");
        let resolved = resolve_audit_url(&page(&url, "/"), &mount);
        prop_assert_eq!(resolved, format!("{url}{mount}/"));
    }

    #[test]
    fn canonical_page_re_roots_under_mount(
        // Disjoint leading alphabets keep the path from matching inside the
        // host name, so the first occurrence is always the path boundary.
        host in "[m-z][a-z]{0,9}\\.example",
        segment in "[a-k][a-k0-9]{0,11}",
        mount in "[a-z]{0,8}",
    ) {
        let path = format!("/{segment}");
        let url = format!("https://{host}{path}");
        let resolved = resolve_audit_url(&page(&url, &path), &mount);
        prop_assert_eq!(resolved, format!("https://{host}/{mount}{path}"));
    }

    #[test]
    fn insecure_scheme_always_upgraded(
        host in "[m-z][a-z]{0,9}\\.example",
        segment in "[a-k][a-k0-9]{0,9}",
        mount in "[a-z]{0,8}",
    ) {
        prop_assume!(!host.contains("localhost"));
        let path = format!("/{segment}");
        let url = format!("http://{host}{path}");
        let resolved = resolve_audit_url(&page(&url, &path), &mount);
        prop_assert!(resolved.starts_with("https://"), "{}", resolved);
    }

    #[test]
    fn localhost_deployments_never_upgraded(
        port in 1024u16..=65535,
        // No leading 'l', so the path cannot match inside "localhost".
        segment in "[a-km-z0-9][a-z0-9]{0,9}",
    ) {
        let path = format!("/{segment}");
        let url = format!("http://localhost:{port}{path}");
        let resolved = resolve_audit_url(&page(&url, &path), "");
        prop_assert!(resolved.starts_with("http://localhost:"), "{}", resolved);
    }

    #[test]
    fn mount_and_path_always_terminal(
        url in "https://[a-z]{1,10}\\.example(/[a-z0-9]{1,8}){0,3}",
        path in "(/[a-z0-9]{1,8}){1,3}",
        mount in "[a-z]{0,8}",
    ) {
        let resolved = resolve_audit_url(&page(&url, &path), &mount);
        // Hoisted out of prop_assert!: the macro stringifies its condition
        // into a format string, where inline `{mount}{path}` captures are
        // rejected.
        let expected_suffix = format!("{mount}{path}");
        prop_assert!(resolved.ends_with(&expected_suffix));
    }

    #[test]
    fn ensure_https_idempotent(url in "\\PC{0,200}") {
        let once = ensure_https(url.clone());
        prop_assert_eq!(ensure_https(once.clone()), once);
    }
}
