//! Audit target URL resolution.
//!
//! The host reports each page as a `(url, path)` pair, while the audit
//! service must be asked about the published URL, which may live under a
//! configured mount (`previewMountName` in the extension configuration).
//! Resolution re-roots the path under that mount: the first occurrence of
//! the path inside the URL becomes `/`, then `{mount}{path}` is appended.
//! `https://site.example/about` with path `/about` and mount `live` thus
//! resolves to `https://site.example/live/about`. With no mount configured
//! the separator stays doubled (`https://site.example//about`); the service
//! accepts that. Finally the scheme is upgraded to HTTPS for anything that
//! is not a localhost deployment.

use tracing::debug;

use crate::bridge::PageContext;

/// Resolve the URL the audit service should analyze.
///
/// For the site root (`path == "/"`) the mount and path are appended to the
/// page URL as-is. For any other page, the first occurrence of the path
/// inside the URL is replaced by `/` before appending. A path that does not
/// occur in the URL leaves the URL untouched (the suffix is still appended);
/// hosts produce such pairs around fragments and rewritten previews, so this
/// stays lenient rather than failing the cycle.
pub fn resolve_audit_url(page: &PageContext, mount_prefix: &str) -> String {
    let base = if page.path == "/" {
        page.url.clone()
    } else {
        if !page.url.contains(&page.path) {
            debug!(
                url = %page.url,
                path = %page.path,
                "page path not found in page url; appending suffix unchanged"
            );
        }
        page.url.replacen(&page.path, "/", 1)
    };
    ensure_https(format!("{base}{mount_prefix}{}", page.path))
}

/// Upgrade a leading `http://` to `https://` unless the URL mentions
/// `localhost` anywhere. Other schemes and already-secure URLs pass
/// through unchanged.
pub fn ensure_https(url: String) -> String {
    if url.contains("localhost") {
        return url;
    }
    match url.strip_prefix("http://") {
        Some(rest) => format!("https://{rest}"),
        None => url,
    }
}
