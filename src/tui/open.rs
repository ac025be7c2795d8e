//! Opening service links in the system browser.
//!
//! Every URL handed to the platform open command comes from the remote
//! analysis service, so it is validated before being passed along.

/// Validate that a URL contains only characters from RFC 3986
/// (unreserved + reserved + percent-encoded) and uses a web scheme.
/// Rejects control characters, spaces, backticks, pipes, and other
/// characters that could be misinterpreted by platform open commands.
fn is_safe_url(url: &str) -> bool {
    let web_scheme = url.starts_with("https://") || url.starts_with("http://");
    web_scheme
        && url.chars().all(|c| {
            c.is_ascii_alphanumeric()
                || matches!(
                    c,
                    ':' | '/' | '.' | '-' | '_' | '~' | '?' | '#' | '[' | ']' | '@' | '!' | '$'
                        | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '=' | '%'
                )
        })
}

/// Open a URL in the default browser.
pub fn open_in_browser(url: &str) -> Result<(), String> {
    if !is_safe_url(url) {
        return Err("link is not a safe web URL".to_string());
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()
            .map_err(|e| format!("failed to open browser: {e}"))?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()
            .map_err(|e| format!("failed to open browser: {e}"))?;
    }

    #[cfg(target_os = "windows")]
    {
        // explorer.exe receives the URL as a direct process argument with
        // no shell involved, so metacharacters cannot be reinterpreted.
        std::process::Command::new("explorer")
            .arg(url)
            .spawn()
            .map_err(|e| format!("failed to open browser: {e}"))?;
    }

    Ok(())
}
