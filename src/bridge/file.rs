//! File-backed host bridge.
//!
//! The host writes a small JSON context document; the panel treats that file
//! as its registration endpoint and every content-changing rewrite as a
//! navigation event. Change detection compares mtime and size first and
//! confirms with an xxh3 content hash, so a bare `touch` (or a rewrite of
//! identical bytes) is not a navigation.
//!
//! Document shape:
//!
//! ```json
//! {
//!   "extension": { "config": "{\"sitemorseUrl\": \"...\", ...}" },
//!   "page": { "url": "https://cms.example/preview/about", "path": "/about" }
//! }
//! ```

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::bridge::{HostBridge, HostSession, PageContext};
use crate::config::PanelConfig;
use crate::error::{PanelError, Result};

/// Registration failed because the context file does not exist.
pub const CODE_CONTEXT_MISSING: &str = "context-missing";
/// Registration failed because the context file could not be read.
pub const CODE_CONTEXT_UNREADABLE: &str = "context-unreadable";
/// Registration failed because the context file is not valid JSON.
pub const CODE_CONTEXT_MALFORMED: &str = "context-malformed";

/// On-disk context document.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ContextDoc {
    extension: ExtensionBlock,
    page: PageContext,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExtensionBlock {
    /// JSON-encoded [`PanelConfig`], exactly as the host supplies it.
    config: String,
}

/// Tracked file metadata from the last successful read.
#[derive(Debug, Clone)]
struct FileState {
    mtime: SystemTime,
    size: u64,
    content_hash: u64,
}

/// Bridge that registers against, and then watches, one context file.
#[derive(Debug)]
pub struct FileBridge {
    path: PathBuf,
    state: Option<FileState>,
}

impl FileBridge {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: None,
        }
    }

    /// The context file this bridge watches.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record_state(&mut self, data: &[u8]) {
        let (mtime, size) = match std::fs::metadata(&self.path) {
            Ok(meta) => (meta.modified().unwrap_or(SystemTime::UNIX_EPOCH), meta.len()),
            Err(_) => (SystemTime::UNIX_EPOCH, data.len() as u64),
        };
        self.state = Some(FileState {
            mtime,
            size,
            content_hash: xxhash_rust::xxh3::xxh3_64(data),
        });
    }
}

impl HostBridge for FileBridge {
    fn register(&mut self) -> Result<HostSession> {
        let data = std::fs::read(&self.path).map_err(|e| {
            let code = if e.kind() == std::io::ErrorKind::NotFound {
                CODE_CONTEXT_MISSING
            } else {
                CODE_CONTEXT_UNREADABLE
            };
            PanelError::registration(code, format!("{}: {e}", self.path.display()))
        })?;

        let doc: ContextDoc = serde_json::from_slice(&data).map_err(|e| {
            PanelError::registration(
                CODE_CONTEXT_MALFORMED,
                format!("{}: {e}", self.path.display()),
            )
        })?;

        // An absent embedded config registers fine; whether the settings can
        // drive a cycle is decided per navigation, not here.
        let config = if doc.extension.config.is_empty() {
            PanelConfig::default()
        } else {
            PanelConfig::from_json(&doc.extension.config).map_err(|e| {
                PanelError::registration(CODE_CONTEXT_MALFORMED, e.to_string())
            })?
        };

        // Remember what we read so the initial document is not replayed as a
        // navigation on the first poll.
        self.record_state(&data);

        debug!(path = %self.path.display(), "registered against context file");
        Ok(HostSession {
            config,
            page: doc.page,
        })
    }

    fn poll_navigation(&mut self) -> Vec<PageContext> {
        let meta = match std::fs::metadata(&self.path) {
            Ok(meta) => meta,
            Err(e) => {
                // A vanished file is not a navigation; the last page stays live.
                debug!(path = %self.path.display(), error = %e, "context file unavailable");
                return Vec::new();
            }
        };

        let mtime = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        let size = meta.len();
        if let Some(prev) = &self.state {
            if prev.mtime == mtime && prev.size == size {
                return Vec::new();
            }
        }

        // Metadata moved; hash to verify the content actually changed.
        let data = match std::fs::read(&self.path) {
            Ok(data) => data,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "context file became unreadable");
                return Vec::new();
            }
        };
        let content_hash = xxhash_rust::xxh3::xxh3_64(&data);
        let content_changed = self
            .state
            .as_ref()
            .map_or(true, |prev| prev.content_hash != content_hash);
        self.state = Some(FileState {
            mtime,
            size,
            content_hash,
        });
        if !content_changed {
            return Vec::new();
        }

        match serde_json::from_slice::<ContextDoc>(&data) {
            Ok(doc) => vec![doc.page],
            Err(e) => {
                // Hosts rewrite the file non-atomically at times; skip the
                // torn read and wait for the next rewrite.
                warn!(path = %self.path.display(), error = %e, "ignoring malformed context rewrite");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_context(path: &Path, url: &str, p: &str) {
        let doc = format!(
            r#"{{"extension": {{"config": "{{\"sitemorseUrl\": \"https://audit.example\", \"sitemorseToken\": \"tok\"}}"}}, "page": {{"url": "{url}", "path": "{p}"}}}}"#
        );
        std::fs::write(path, doc).expect("write context");
    }

    #[test]
    fn test_register_reads_config_and_page() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("context.json");
        write_context(&path, "https://cms.example/preview/about", "/about");

        let mut bridge = FileBridge::new(&path);
        let session = bridge.register().expect("register");
        assert_eq!(session.config.sitemorse_url, "https://audit.example");
        assert_eq!(session.config.sitemorse_token, "tok");
        assert_eq!(session.page.url, "https://cms.example/preview/about");
        assert_eq!(session.page.path, "/about");
    }

    #[test]
    fn test_register_missing_file_has_code() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let mut bridge = FileBridge::new(dir.path().join("absent.json"));
        let err = bridge.register().unwrap_err();
        assert!(err.to_string().contains(CODE_CONTEXT_MISSING));
    }

    #[test]
    fn test_register_malformed_file_has_code() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("context.json");
        std::fs::write(&path, "not json at all").expect("write");

        let mut bridge = FileBridge::new(&path);
        let err = bridge.register().unwrap_err();
        assert!(err.to_string().contains(CODE_CONTEXT_MALFORMED));
    }

    #[test]
    fn test_register_without_embedded_config_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("context.json");
        std::fs::write(&path, r#"{"page": {"url": "u", "path": "/"}}"#).expect("write");

        let mut bridge = FileBridge::new(&path);
        let session = bridge.register().expect("register");
        assert_eq!(session.config, PanelConfig::default());
    }

    #[test]
    fn test_initial_document_not_replayed_as_navigation() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("context.json");
        write_context(&path, "https://cms.example/a", "/a");

        let mut bridge = FileBridge::new(&path);
        bridge.register().expect("register");
        assert!(bridge.poll_navigation().is_empty());
    }

    #[test]
    fn test_rewrite_emits_navigation() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("context.json");
        write_context(&path, "https://cms.example/a", "/a");

        let mut bridge = FileBridge::new(&path);
        bridge.register().expect("register");

        write_context(&path, "https://cms.example/preview/b", "/b");
        let events = bridge.poll_navigation();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].path, "/b");
    }

    #[test]
    fn test_identical_rewrite_is_not_a_navigation() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("context.json");
        write_context(&path, "https://cms.example/a", "/a");

        let mut bridge = FileBridge::new(&path);
        bridge.register().expect("register");

        // Same bytes again: mtime moves, content hash does not.
        write_context(&path, "https://cms.example/a", "/a");
        assert!(bridge.poll_navigation().is_empty());
    }

    #[test]
    fn test_malformed_rewrite_skipped_then_recovers() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("context.json");
        write_context(&path, "https://cms.example/a", "/a");

        let mut bridge = FileBridge::new(&path);
        bridge.register().expect("register");

        std::fs::write(&path, "{ torn write").expect("write");
        assert!(bridge.poll_navigation().is_empty());

        write_context(&path, "https://cms.example/c", "/c");
        let events = bridge.poll_navigation();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].path, "/c");
    }

    #[test]
    fn test_vanished_file_is_not_a_navigation() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("context.json");
        write_context(&path, "https://cms.example/a", "/a");

        let mut bridge = FileBridge::new(&path);
        bridge.register().expect("register");

        std::fs::remove_file(&path).expect("remove");
        assert!(bridge.poll_navigation().is_empty());
    }
}
