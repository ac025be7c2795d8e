//! Integration tests for the file-backed host bridge.

use std::path::Path;

use sitemorse_panel::bridge::{CODE_CONTEXT_MALFORMED, CODE_CONTEXT_MISSING};
use sitemorse_panel::{FileBridge, HostBridge, PanelError};

fn write_context(path: &Path, url: &str, page_path: &str) {
    let doc = format!(
        r#"{{"extension": {{"config": "{{\"sitemorseUrl\": \"https://audit.example\", \"previewMountName\": \"live\", \"sitemorseToken\": \"tok\"}}"}}, "page": {{"url": "{url}", "path": "{page_path}"}}}}"#
    );
    std::fs::write(path, doc).expect("write context");
}

// ============================================================================
// Registration
// ============================================================================

#[test]
fn test_register_reports_missing_context() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let mut bridge = FileBridge::new(dir.path().join("absent.json"));

    match bridge.register().unwrap_err() {
        PanelError::Registration { code, message } => {
            assert_eq!(code, CODE_CONTEXT_MISSING);
            assert!(message.contains("absent.json"), "message: {message}");
        }
        other => panic!("expected registration error, got {other}"),
    }
}

#[test]
fn test_register_reports_malformed_context() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("context.json");
    std::fs::write(&path, "{ not json").expect("write");

    let mut bridge = FileBridge::new(&path);
    match bridge.register().unwrap_err() {
        PanelError::Registration { code, message } => {
            assert_eq!(code, CODE_CONTEXT_MALFORMED);
            assert!(message.contains("context.json"), "message: {message}");
        }
        other => panic!("expected registration error, got {other}"),
    }
}

#[test]
fn test_register_decodes_embedded_config() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("context.json");
    write_context(&path, "https://www.example.com/about", "/about");

    let mut bridge = FileBridge::new(&path);
    let session = bridge.register().expect("register");
    assert_eq!(session.config.sitemorse_url, "https://audit.example");
    assert_eq!(session.config.preview_mount_name, "live");
    assert_eq!(session.config.sitemorse_token, "tok");
    assert_eq!(session.page.url, "https://www.example.com/about");
    assert_eq!(session.page.path, "/about");
}

#[test]
fn test_register_tolerates_unknown_keys() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("context.json");
    let doc = r#"{
        "version": 3,
        "extension": {
            "id": "sitemorse",
            "config": "{\"sitemorseToken\": \"tok\", \"theme\": \"dark\"}"
        },
        "page": {"url": "https://www.example.com/", "path": "/", "title": "Home"}
    }"#;
    std::fs::write(&path, doc).expect("write");

    let mut bridge = FileBridge::new(&path);
    let session = bridge.register().expect("register");
    assert_eq!(session.config.sitemorse_token, "tok");
    assert_eq!(session.page.path, "/");
}

// ============================================================================
// Navigation polling
// ============================================================================

#[test]
fn test_rapid_rewrites_collapse_to_latest() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("context.json");
    write_context(&path, "https://www.example.com/a", "/a");

    let mut bridge = FileBridge::new(&path);
    bridge.register().expect("register");

    // Two navigations land between polls; only the newest page is left in
    // the file, and that is the only one the panel should audit.
    write_context(&path, "https://www.example.com/b", "/b");
    write_context(&path, "https://www.example.com/contact", "/contact");

    let events = bridge.poll_navigation();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].path, "/contact");
}

#[test]
fn test_recreated_context_emits_navigation() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("context.json");
    write_context(&path, "https://www.example.com/a", "/a");

    let mut bridge = FileBridge::new(&path);
    bridge.register().expect("register");

    std::fs::remove_file(&path).expect("remove");
    assert!(bridge.poll_navigation().is_empty());

    write_context(&path, "https://www.example.com/welcome", "/welcome");
    let events = bridge.poll_navigation();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].path, "/welcome");
}
